//! Binary entrypoint for the `divvy` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match divvy::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
