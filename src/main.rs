use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use swapwidget::adapter::inbound::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use swapwidget::adapter::inbound::cli::{config, connect, output, resolve};
use swapwidget::error::Result;
use swapwidget::infrastructure::config::logging::LoggingConfig;

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Resolve(args) => resolve::execute(&args.scenario),
        Commands::Config(ConfigCommand::Check(arg)) => config::execute_check(&arg.config),
        Commands::Connect(arg) => connect::execute(&arg.config).await,
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    LoggingConfig::for_verbosity(cli.verbose, cli.json).init();
    info!(version = env!("CARGO_PKG_VERSION"), "swapwidget starting");

    tokio::select! {
        result = run(cli) => {
            if let Err(e) = result {
                error!(error = %e, "Command failed");
                output::error(&e.to_string());
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            std::process::exit(130);
        }
    }
}
