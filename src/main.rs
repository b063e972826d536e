mod cli;
mod config;
mod core;
mod logging;
mod models;
mod sources;

#[cfg(feature = "gui")]
mod gui;

use clap::Parser;

fn main() {
    logging::init_logging();
    let cli = cli::Cli::parse();

    if let Err(e) = cli::run(cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("오류: {:#}", e);
        std::process::exit(1);
    }
}
