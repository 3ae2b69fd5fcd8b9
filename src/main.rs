use std::process::ExitCode;

use bullseye::cli::{Args, run_main};
use clap::Parser;

fn main() -> ExitCode {
    let args = Args::parse();
    match run_main(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("simulation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
