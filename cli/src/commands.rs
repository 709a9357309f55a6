pub mod dirs;
pub mod ports;
pub mod recon;
pub mod subdomains;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand, ValueEnum};
use reconic_common::config::Config;
use reconic_common::models::target::Target;
use reconic_core::engine::{Dispatcher, StopSignal};
use serde::Serialize;
use tracing::{Instrument, info_span};

use crate::terminal::input::InputHandle;
use crate::terminal::spinner::SpinnerHandle;

#[derive(Parser)]
#[command(name = "reconic", version)]
#[command(about = "Port, directory and subdomain reconnaissance.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output: -q drops headers, -qq prints results only
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// More log output: -v for debug, -vv for trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Do not listen for 'q' on the keyboard
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Print the final report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// TCP connect scan of the mapped ports
    #[command(alias = "p")]
    Ports {
        /// Hostname or IP address
        target: Target,
        /// JSON object of "<port>": "<service>" replacing the built-in map
        #[arg(long)]
        ports_file: Option<PathBuf>,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Brute-force directories under a base URL
    #[command(alias = "d")]
    Dirs {
        /// Base URL, e.g. https://example.com
        target: Target,
        #[arg(short, long)]
        wordlist: Option<PathBuf>,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Find live subdomains of a domain
    #[command(alias = "s")]
    Subdomains {
        /// Bare domain, e.g. example.com
        target: Target,
        #[arg(short, long, value_enum, default_value_t = SubdomainMode::Crtsh)]
        mode: SubdomainMode,
        /// Labels to try in dns mode
        #[arg(short, long)]
        wordlist: Option<PathBuf>,
        /// Check liveness over https instead of http
        #[arg(long)]
        https: bool,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Port, subdomain and directory scans of one host, in that order
    #[command(alias = "r")]
    #[command(group(ArgGroup::new("scheme").required(true).args(["https", "http"])))]
    Recon {
        /// Bare hostname, e.g. example.com
        target: Target,
        #[arg(long)]
        https: bool,
        #[arg(long)]
        http: bool,
        /// Directory wordlist
        #[arg(short, long)]
        wordlist: Option<PathBuf>,
        #[arg(long)]
        ports_file: Option<PathBuf>,
        /// Applied to every stage
        #[command(flatten)]
        tuning: Tuning,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SubdomainMode {
    /// Candidates from certificate transparency logs, checked over HTTP
    Crtsh,
    /// Wordlist labels resolved through DNS
    Dns,
}

/// Overrides for a scan's defaults.
#[derive(Args, Clone, Debug, Default)]
pub struct Tuning {
    /// Probes in flight at once
    #[arg(short, long)]
    pub concurrency: Option<usize>,
    /// Per-probe timeout in seconds
    #[arg(short, long, value_parser = parse_seconds)]
    pub timeout: Option<Duration>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            disable_input: self.no_input,
            json: self.json,
            verbose: self.verbose,
        }
    }
}

/// Runs `scan` with a dispatcher wired to a progress bar and the stop signal.
///
/// The keyboard listener (and raw mode with it) lives only while `scan` runs,
/// so everything printed afterwards gets normal line endings.
/// Returns the scan's output and how long it took.
pub async fn tracked<T, F, Fut>(label: &str, stop: &StopSignal, cfg: &Config, scan: F) -> (T, Duration)
where
    F: FnOnce(Dispatcher) -> Fut,
    Fut: Future<Output = T>,
{
    let span = info_span!("scan", indicatif.pb_show = true);
    let spinner: Arc<SpinnerHandle> =
        Arc::new(SpinnerHandle::start(span.clone(), label, !cfg.disable_input));

    let dispatcher: Dispatcher = Dispatcher::new()
        .with_progress(spinner.clone())
        .with_stop_signal(stop.clone());

    let input: Option<InputHandle> =
        (!cfg.disable_input).then(|| InputHandle::start(stop.clone()));

    let start_time: Instant = Instant::now();
    let output: T = scan(dispatcher).instrument(span).await;
    let elapsed: Duration = start_time.elapsed();

    drop(input);
    spinner.wait();
    (output, elapsed)
}

/// Writes `value` to stdout as pretty JSON.
pub fn emit_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number of seconds"))?;
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(format!("timeout must be positive, got '{s}'")),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
