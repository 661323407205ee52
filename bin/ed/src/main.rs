mod cli;
mod error;
mod parser;
mod run;

use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

use clap::Parser;

use cli::Cli;

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(&cli);

	let stdin = io::stdin();
	let stdout = io::stdout();
	let input = BufReader::new(stdin.lock());
	let output = BufWriter::new(stdout.lock());

	match run::run(input, output) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::warn!(error = %err, "aborting on malformed input");
			eprintln!("ed: {err}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(cli: &Cli) {
	let level = if cli.quiet {
		tracing::Level::WARN
	} else if cli.verbose {
		tracing::Level::DEBUG
	} else {
		tracing::Level::INFO
	};

	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(io::stderr)
		.init();
}
