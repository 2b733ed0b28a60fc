//! Binary entrypoint for the `santa` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match santa::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
