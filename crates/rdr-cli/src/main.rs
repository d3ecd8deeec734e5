use clap::Parser;
use rdr_core::AppError;
use rdr_core::storage::config::Config;
use rdr_core::utils::logging::{log_level, print_verbose};
use std::path::PathBuf;

mod cli;

use cli::dispatcher::Dispatcher;
use cli::main_types::Cli;

fn report(error: &AppError) -> ! {
    eprintln!("{} Error: {}", error.severity().emoji(), error);
    if let Some(hint) = error.troubleshooting_hint() {
        eprintln!("Hint: {}", hint);
    }
    std::process::exit(1)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    simple_logger::init_with_level(log_level(cli.verbose))?;

    let config_path = cli
        .config_dir
        .as_deref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = Config::load(config_path.clone()).unwrap_or_else(|e| report(&e.into()));

    if let Some(dir) = &cli.config_dir {
        print_verbose(cli.verbose, &format!("Using config directory: {}", dir));
    }

    let dispatcher = Dispatcher::new(config, config_path, cli.verbose, cli.api_key, cli.url);
    if let Err(e) = dispatcher.dispatch(cli.command).await {
        report(&e);
    }

    Ok(())
}
