//! The command loop: reads commands from a buffered reader, applies
//! them to an [`ed_core::Engine`], and writes `Printed` output to a
//! buffered writer.
//!
//! Kept generic over `BufRead`/`Write` rather than hard-wired to
//! stdin/stdout so integration tests can drive it over an in-memory
//! buffer and assert on the exact bytes written.

use std::io::{BufRead, Write};

use ed_core::{Command, Engine, Outcome};

use crate::error::HostError;
use crate::parser::read_command;

/// Runs the command loop to completion. Returns `Ok(())` on a clean
/// `q` or a clean end of input (treated the same way); returns
/// `Err(_)` for a parse or I/O failure, after flushing whatever has
/// already been written to `output` so far.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<(), HostError> {
	let mut engine = Engine::new();
	let mut line_no = 0usize;

	loop {
		let command = match read_command(&mut input, &mut line_no, engine.len()) {
			Ok(Some(command)) => command,
			Ok(None) => {
				output.flush()?;
				return Ok(());
			}
			Err(err) => {
				output.flush()?;
				return Err(err);
			}
		};

		let is_quit = matches!(command, Command::Quit);

		match engine.apply(command) {
			Ok(Outcome::Mutated) => {}
			Ok(Outcome::Printed(lines)) => {
				for line in lines {
					output.write_all(&line)?;
				}
			}
			Ok(Outcome::Quit) => {
				output.flush()?;
				return Ok(());
			}
			Err(never) => match never {},
		}

		if is_quit {
			output.flush()?;
			return Ok(());
		}
	}
}
