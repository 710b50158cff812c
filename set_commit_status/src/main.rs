use std::process::ExitCode;

use clap::Parser;
use domain::ProcessEnvironment;
use set_commit_status::{Args, CliError, logging::configure_logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Nothing, not even RUST_LOG, is read from the environment before the flags are valid.
    if let Err(e) = args.check_required() {
        return exit(e);
    }

    if let Err(e) = configure_logging(&ProcessEnvironment) {
        eprintln!("{e}");
    }

    match run(args, &ProcessEnvironment).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => exit(e),
    }
}

fn exit(error: CliError) -> ExitCode {
    eprintln!("{error}");
    ExitCode::from(error.exit_code())
}
