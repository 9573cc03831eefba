use anyhow::{Context, Result};
use chessview::config::{self, Config};
use chessview::server::HttpStateSource;
use chessview::view::TextView;
use chessview::{cells, BoardSync};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse CLI arguments
    let matches = Command::new("chessview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a chessboard and syncs it with a game server")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file to read")
                .default_value(config::DEFAULT_CONFIG_PATH)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("server")
                .long("server")
                .value_name("URL")
                .help("Board state endpoint (overrides config)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("Request timeout in seconds (overrides config)")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("init-config")
                .long("init-config")
                .help("Write the effective config file and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the 64 cell descriptors as JSON and exit")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&cells()).context("Failed to encode cells")?;
        println!("{}", json);
        return Ok(());
    }

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
    let mut cfg: Config = config::load_config(&config_path)?;
    if let Some(url) = matches.get_one::<String>("server") {
        cfg.server_url = url.clone();
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        cfg.timeout_secs = *secs;
    }

    if matches.get_flag("init-config") {
        config::save_config(&config_path, &cfg)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let source = HttpStateSource::new(&cfg.server_url, Duration::from_secs(cfg.timeout_secs))?;
    log::info!("Fetching board state from {}", source.url());

    let mut sync = BoardSync::new(source, TextView::new());
    // Failures are already on the view; the board is still printed.
    let result = sync.initialize().await;
    print!("{}", sync.into_view());

    result.context("Board sync failed")?;
    Ok(())
}
