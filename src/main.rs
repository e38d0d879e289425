// ============================================================================
// imagelab binary — headless batch entry point
// ============================================================================
//
// The engine lives in the library crate; this binary is the thinnest
// possible front-end: parse arguments, run the batch, report failures
// through the exit code.

use std::process::ExitCode;

use clap::Parser;

use imagelab::cli::{self, CliArgs};
use imagelab::logger;

fn main() -> ExitCode {
    logger::init();
    let args = CliArgs::parse();
    cli::run(args)
}
