mod commands;
mod terminal;

use commands::subdomains::SubdomainArgs;
use commands::recon::ReconArgs;
use commands::{CommandLine, Commands, dirs, ports, recon, subdomains};
use reconic_common::config::Config;
use reconic_core::engine::StopSignal;
use terminal::{input, logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.config();

    logging::init_logging(&cfg);
    print::banner(&cfg);

    let stop: StopSignal = StopSignal::new();
    input::watch_ctrl_c(stop.clone());

    match commands.command {
        Commands::Ports {
            target,
            ports_file,
            tuning,
        } => {
            print::header("starting port scan", cfg.quiet);
            ports::ports(target, ports_file.as_deref(), &tuning, &stop, &cfg).await
        }
        Commands::Dirs {
            target,
            wordlist,
            tuning,
        } => {
            print::header("starting directory scan", cfg.quiet);
            dirs::dirs(target, wordlist.as_deref(), &tuning, &stop, &cfg).await
        }
        Commands::Subdomains {
            target,
            mode,
            wordlist,
            https,
            tuning,
        } => {
            print::header("starting subdomain scan", cfg.quiet);
            let args = SubdomainArgs {
                mode,
                wordlist: wordlist.as_deref(),
                https,
                tuning: &tuning,
            };
            subdomains::subdomains(target, args, &stop, &cfg).await
        }
        Commands::Recon {
            target,
            https,
            http: _,
            wordlist,
            ports_file,
            tuning,
        } => {
            print::header("starting recon", cfg.quiet);
            let args = ReconArgs {
                https,
                wordlist: wordlist.as_deref(),
                ports_file: ports_file.as_deref(),
                tuning: &tuning,
            };
            recon::recon(target, args, &stop, &cfg).await
        }
    }
}
