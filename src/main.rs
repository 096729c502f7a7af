mod app;
mod catalog;
mod cli;
mod config;
mod constants;
mod domain;
mod error;
mod logging;
mod storage;
mod store;
mod timer;

use clap::Parser;

use crate::{cli::Cli, config::Config};

fn main() {
    let cli = Cli::parse();
    let config = Config::resolve(cli.data_dir);

    if let Err(e) = logging::init_logging(config.log_level, &config.log_dir) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match cli.command {
        Some(command) => cli::run_cli(&config, command),
        None => {
            if let Err(e) = cli::run_tui(&config) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
