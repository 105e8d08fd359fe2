//! Binary entrypoint for the `secrules` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    // Recording is handled in commands::dispatch via SECRULES_RECORD=<dir>.
    match secrules::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
