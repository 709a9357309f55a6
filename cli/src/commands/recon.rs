use std::path::Path;

use reconic_common::config::Config;
use reconic_common::models::target::Target;
use reconic_common::{error, info, warn};
use reconic_core::engine::StopSignal;
use serde_json::{Map, Value};

use crate::commands::subdomains::SubdomainArgs;
use crate::commands::{SubdomainMode, Tuning, dirs, emit_json, ports, subdomains};
use crate::mprint;

pub struct ReconArgs<'a> {
    pub https: bool,
    pub wordlist: Option<&'a Path>,
    pub ports_file: Option<&'a Path>,
    pub tuning: &'a Tuning,
}

/// Port scan, then crt.sh subdomains, then directories under `<scheme>://<host>`.
///
/// A stage that fails is reported and the next one still runs; pressing `q`
/// skips the stages that have not started yet.
pub async fn recon(
    target: Target,
    args: ReconArgs<'_>,
    stop: &StopSignal,
    cfg: &Config,
) -> anyhow::Result<()> {
    let host: &str = target.host();
    let host_target: Target = host.parse()?;
    let url_target: Target = Target::with_scheme(host, args.https)?;
    let tuning: &Tuning = args.tuning;
    let mut collected: Map<String, Value> = Map::new();

    info!("Starting recon for the target: {host}");

    match ports::scan(&host_target, args.ports_file, tuning, stop, cfg).await {
        Ok((report, elapsed)) => {
            if !cfg.json {
                ports::render(&report, elapsed, cfg);
            }
            collected.insert("ports".to_string(), serde_json::to_value(&report)?);
        }
        Err(e) => error!("Port scan failed: {e}"),
    }

    if continue_after("Port scan", stop, cfg) {
        let subdomain_args = SubdomainArgs {
            mode: SubdomainMode::Crtsh,
            wordlist: None,
            https: false,
            tuning,
        };
        match subdomains::scan(&host_target, &subdomain_args, stop, cfg).await {
            Ok((report, elapsed)) => {
                if !cfg.json {
                    subdomains::render(&report, elapsed, cfg);
                }
                collected.insert("subdomains".to_string(), serde_json::to_value(&report)?);
            }
            Err(e) => error!("Subdomain scan failed: {e}"),
        }
    }

    if continue_after("Subdomain scan", stop, cfg) {
        match dirs::scan(&url_target, args.wordlist, tuning, stop, cfg).await {
            Ok((scan, elapsed)) => {
                if !cfg.json {
                    dirs::render(&scan, elapsed, cfg);
                }
                collected.insert("directories".to_string(), serde_json::to_value(&scan)?);
            }
            Err(e) => error!("Directory scan failed: {e}"),
        }
    }

    if cfg.json {
        return emit_json(&Value::Object(collected));
    }
    Ok(())
}

fn continue_after(stage: &str, stop: &StopSignal, cfg: &Config) -> bool {
    if stop.is_raised() {
        warn!("{stage} was interrupted, skipping the remaining stages");
        return false;
    }
    if !cfg.json && cfg.quiet == 0 {
        mprint!();
    }
    true
}
