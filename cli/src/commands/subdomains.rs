use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use reconic_common::config::Config;
use reconic_common::models::target::Target;
use reconic_common::{warn, wordlist};
use reconic_core::engine::{ScanReport, StopSignal};
use reconic_core::network::crtsh::CrtShSource;
use reconic_core::network::http;
use reconic_core::probe::dns::HickoryResolver;
use reconic_core::scanner::{self, SubdomainScanOptions};

use crate::commands::{SubdomainMode, Tuning, emit_json, tracked};
use crate::mprint;
use crate::terminal::{colors, format, print};

const CRTSH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SubdomainArgs<'a> {
    pub mode: SubdomainMode,
    pub wordlist: Option<&'a Path>,
    pub https: bool,
    pub tuning: &'a Tuning,
}

pub async fn subdomains(
    target: Target,
    args: SubdomainArgs<'_>,
    stop: &StopSignal,
    cfg: &Config,
) -> anyhow::Result<()> {
    let (report, elapsed) = scan(&target, &args, stop, cfg).await?;

    if cfg.json {
        return emit_json(&report);
    }
    render(&report, elapsed, cfg);
    Ok(())
}

pub async fn scan(
    target: &Target,
    args: &SubdomainArgs<'_>,
    stop: &StopSignal,
    cfg: &Config,
) -> anyhow::Result<(ScanReport, Duration)> {
    let defaults = SubdomainScanOptions::default();
    let options = SubdomainScanOptions {
        concurrency: args.tuning.concurrency.unwrap_or(defaults.concurrency),
        timeout: args.tuning.timeout.unwrap_or(defaults.timeout),
        https: args.https,
    };

    let (report, elapsed) = match args.mode {
        SubdomainMode::Crtsh => {
            let source = CrtShSource::new(http::redirect_client(CRTSH_TIMEOUT)?);
            let candidates: Vec<String> = scanner::discover_subdomains(&source, target).await;

            tracked("Checking subdomains", stop, cfg, |dispatcher| async move {
                scanner::subdomain_liveness_scan(target, &candidates, &options, &dispatcher).await
            })
            .await
        }
        SubdomainMode::Dns => {
            let labels: Vec<String> = wordlist::load_or(args.wordlist, wordlist::DEFAULT_SUBDOMAINS)?;
            let resolver = Arc::new(HickoryResolver::from_system_conf()?);

            tracked("Resolving subdomains", stop, cfg, |dispatcher| async move {
                scanner::subdomain_dns_scan(target, &labels, resolver, &options, &dispatcher).await
            })
            .await
        }
    };

    Ok((report?, elapsed))
}

pub fn render(report: &ScanReport, elapsed: Duration, cfg: &Config) {
    if report.is_cancelled() {
        warn!("Stopped early, {} of {} names checked", report.probed(), report.total());
    }

    if report.is_empty() {
        print::no_results("no live subdomains", cfg.quiet);
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header(&format!("subdomains of {}", report.target().host()), cfg.quiet);

    let resolved: BTreeMap<String, Vec<IpAddr>> = report.resolved_subdomains();
    if resolved.is_empty() || cfg.quiet >= 2 {
        for name in report.live_subdomains() {
            print::print_status(name.color(colors::PRIMARY).to_string());
        }
    } else {
        for (idx, (name, addrs)) in resolved.iter().enumerate() {
            print::tree_head(idx, name);
            print::as_tree_one_level(format::addresses_to_detail(addrs));
            if idx + 1 != resolved.len() {
                mprint!();
            }
        }
    }

    let found: String = format::count(report.len(), "live subdomain", "live subdomains");
    print::summary("Subdomain Scan", &found, elapsed, cfg.quiet);
}
