use std::path::Path;
use std::time::Duration;

use colored::*;
use reconic_common::config::Config;
use reconic_common::models::target::Target;
use reconic_common::{warn, wordlist};
use reconic_core::engine::StopSignal;
use reconic_core::scanner::{self, DirectoryScan, DirectoryScanOptions};

use crate::commands::{Tuning, emit_json, tracked};
use crate::mprint;
use crate::terminal::{colors, format, print};

pub async fn dirs(
    target: Target,
    wordlist: Option<&Path>,
    tuning: &Tuning,
    stop: &StopSignal,
    cfg: &Config,
) -> anyhow::Result<()> {
    let (scan, elapsed) = scan(&target, wordlist, tuning, stop, cfg).await?;

    if cfg.json {
        return emit_json(&scan);
    }
    render(&scan, elapsed, cfg);
    Ok(())
}

pub async fn scan(
    target: &Target,
    wordlist: Option<&Path>,
    tuning: &Tuning,
    stop: &StopSignal,
    cfg: &Config,
) -> anyhow::Result<(DirectoryScan, Duration)> {
    let paths: Vec<String> = wordlist::load_or(wordlist, wordlist::DEFAULT_DIRECTORIES)?;

    let defaults = DirectoryScanOptions::default();
    let options = DirectoryScanOptions {
        concurrency: tuning.concurrency.unwrap_or(defaults.concurrency),
        timeout: tuning.timeout.unwrap_or(defaults.timeout),
        ..defaults
    };

    let (scan, elapsed) = tracked("Probing directories", stop, cfg, |dispatcher| async move {
        scanner::directory_scan(target, &paths, &options, &dispatcher).await
    })
    .await;

    Ok((scan?, elapsed))
}

pub fn render(scan: &DirectoryScan, elapsed: Duration, cfg: &Config) {
    let report = &scan.report;
    if report.is_cancelled() {
        warn!("Stopped early, {} of {} paths probed", report.probed(), report.total());
    }

    let urls: Vec<String> = report.urls();
    if urls.is_empty() {
        print::no_results("no directories found", cfg.quiet);
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header("directories", cfg.quiet);
    if cfg.quiet < 2 {
        print::set_key_width(["Base", "Redirect"]);
        print::aligned_line("Base", scan.base.as_str().color(colors::URL));
        if let Some(original) = scan.base.redirected_from() {
            print::aligned_line("Redirect", format!("from {original}"));
        }
        mprint!();
    }

    for url in &urls {
        print::print_status(url.color(colors::URL).to_string());
    }

    let found: String = format::count(urls.len(), "directory", "directories");
    print::summary("Directory Scan", &found, elapsed, cfg.quiet);
}
