use clap::Parser;
use kilo_sniper::catalog::CatalogLoader;
use kilo_sniper::config::{AppConfig, load_config};
use kilo_sniper::session::Session;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

const DEFAULT_CONFIG: &str = "config.json";

/// Find the cheapest price per kilogram across vendor CSV price lists.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding the `*price*.csv` files (overrides the config).
    dir: Option<PathBuf>,

    /// Path to the JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Destination of the HTML export (overrides the config).
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Logs go to stderr so they stay out of the result tables.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args = Args::parse();

    let config_path = args
        .config
        .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG)).filter(|p| p.exists()));
    let mut config = match config_path {
        Some(path) => match load_config(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Config load error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };
    if let Some(dir) = args.dir {
        config.price_dir = dir;
    }
    if let Some(output) = args.output {
        config.output_file = output;
    }

    info!("Loading price lists from {}", config.price_dir.display());
    let loader = CatalogLoader::new(config.synonyms.clone());
    let mut session = Session::new(config, loader);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    if let Err(e) = session
        .report_file_errors(&mut output)
        .and_then(|()| session.run(&mut input, &mut output))
    {
        error!("Session I/O error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
