mod terminal;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use log::LevelFilter;

use vpc_builder_core::region::select_region;
use vpc_builder_core::session::Session;
use vpc_builder_core::wizard::Wizard;
use vpc_builder_provider_aws::AwsProvider;

use crate::terminal::{ConsoleReporter, DialoguerPrompter};

#[derive(Parser)]
#[command(name = "vpc-builder")]
#[command(about = "Interactive wizard for AWS VPC networking resources", long_about = None)]
struct Cli {
    /// AWS region; skips the region menu
    #[arg(long, env = "VPC_BUILDER_REGION")]
    region: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    // RUST_LOG wins over -v
    env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .try_init()
        .context("failed to initialise logger")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let prompter = DialoguerPrompter;
    let reporter = ConsoleReporter;

    terminal::print_banner();

    let region = match cli.region {
        Some(region) => {
            let region = region.trim().to_string();
            ensure!(!region.is_empty(), "--region must not be empty");
            region
        }
        None => select_region(&prompter, &reporter),
    };
    log::info!("using region {}", region);

    let provider = AwsProvider::new(&region).await;
    Wizard::new(Session::new(&provider, &prompter, &reporter))
        .run()
        .await;

    Ok(())
}
