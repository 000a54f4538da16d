//! git-wash CLI - A Git extension to clean up your repo

mod cli;
mod colors;
mod commands;
mod interaction;
mod logging;

use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();
    let cli = cli::parse();

    let result = if cli.version {
        commands::run_version()
    } else {
        commands::run_wash(cli.flags())
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
