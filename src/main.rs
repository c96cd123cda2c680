//! shiv - field extraction filter
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::io;
use std::process;

use shiv::cli::Args;
use shiv::config::Config;
use shiv::processor::Processor;
use shiv::report::print_error_chain;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; an explicit RUST_LOG wins
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(args) {
        print_error_chain(&e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Everything is validated before the first byte of input is read
    let config = Config::from_args(&args)?;

    log::debug!("input: {}", describe_input(&config));

    let processor = Processor::new(config);
    let stats = processor.process(io::stdout().lock())?;

    if processor.config().stats {
        stats.print_summary();
    }

    Ok(())
}

fn describe_input(config: &Config) -> String {
    if config.files.is_empty() {
        "stdin".to_string()
    } else {
        format!("{:?}", config.files)
    }
}
