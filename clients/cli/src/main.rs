mod local;
mod parsing;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use echo_core::{EchoHandler, StructuredLogger};

use local::{handle_local, render};
use parsing::cli_args::Cli;
use parsing::cli_event::load_event;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    // Keep stdout for the result; echo log records go to stderr
    let logger = if cli.quiet {
        StructuredLogger::discard()
    } else {
        StructuredLogger::stderr()
    };
    let handler = EchoHandler::new(Arc::new(logger));

    let event = load_event(&cli)?;
    let result = handle_local(&handler, cli.mode, event)?;
    println!("{}", render(&result, cli.pretty)?);

    Ok(())
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        "echo_cli=debug,echo_core=debug"
    } else {
        "echo_cli=warn,echo_core=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
