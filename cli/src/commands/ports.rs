use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use reconic_common::config::Config;
use reconic_common::models::target::Target;
use reconic_common::services::PortServiceMap;
use reconic_common::warn;
use reconic_core::engine::{ScanReport, StopSignal};
use reconic_core::scanner::{self, PortScanOptions};

use crate::commands::{Tuning, emit_json, tracked};
use crate::mprint;
use crate::terminal::{colors, format, print};

pub async fn ports(
    target: Target,
    ports_file: Option<&Path>,
    tuning: &Tuning,
    stop: &StopSignal,
    cfg: &Config,
) -> anyhow::Result<()> {
    let (report, elapsed) = scan(&target, ports_file, tuning, stop, cfg).await?;

    if cfg.json {
        return emit_json(&report);
    }
    render(&report, elapsed, cfg);
    Ok(())
}

pub async fn scan(
    target: &Target,
    ports_file: Option<&Path>,
    tuning: &Tuning,
    stop: &StopSignal,
    cfg: &Config,
) -> anyhow::Result<(ScanReport, Duration)> {
    let services: PortServiceMap = match ports_file {
        Some(path) => PortServiceMap::from_file(path)?,
        None => PortServiceMap::embedded()?,
    };

    let defaults = PortScanOptions::default();
    let options = PortScanOptions {
        concurrency: tuning.concurrency.unwrap_or(defaults.concurrency),
        timeout: tuning.timeout.unwrap_or(defaults.timeout),
    };

    let services: Arc<PortServiceMap> = Arc::new(services);
    let (report, elapsed) = tracked("Scanning ports", stop, cfg, |dispatcher| async move {
        scanner::port_scan(target, services, &options, &dispatcher).await
    })
    .await;

    Ok((report?, elapsed))
}

pub fn render(report: &ScanReport, elapsed: Duration, cfg: &Config) {
    if report.is_cancelled() {
        warn!("Stopped early, {} of {} ports probed", report.probed(), report.total());
    }

    let open_ports: Vec<(u16, String)> = report.open_ports();
    if open_ports.is_empty() {
        print::no_results("no open ports", cfg.quiet);
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header(&format!("open ports on {}", report.target()), cfg.quiet);

    let keys: Vec<String> = open_ports.iter().map(|(port, _)| format::port_key(*port)).collect();
    print::set_key_width(keys.iter().map(String::as_str));
    for (key, (_, service)) in keys.iter().zip(&open_ports) {
        print::aligned_line(key, service.as_str().color(colors::SERVICE));
    }

    let found: String = format::count(open_ports.len(), "open port", "open ports");
    print::summary("Port Scan", &found, elapsed, cfg.quiet);
}
