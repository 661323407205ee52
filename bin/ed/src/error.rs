//! Host-level errors: the tokenizer's parse failures and I/O failures
//! unified into one type so `main` has a single place to map an error
//! to a stderr message and a process exit status.

use std::io;

use thiserror::Error;

/// A single malformed input line. The line number is 1-indexed over
/// the lines actually read from stdin, including payload lines.
#[derive(Debug, Error)]
pub enum ParseError {
	#[error("line {line}: expected \"start,end\" address pair, found {text:?}")]
	MalformedAddress { line: usize, text: String },

	#[error("line {line}: unrecognized command letter {letter:?}")]
	UnknownCommand { line: usize, letter: char },

	#[error("line {line}: empty command line")]
	EmptyLine { line: usize },

	#[error("line {line}: change address {start},{end} is empty or starts before 1")]
	InvalidChangeRange { line: usize, start: i64, end: i64 },

	#[error("line {line}: change start {start} leaves a gap after the current length")]
	ChangeGap { line: usize, start: i64 },

	#[error("unexpected end of input: \"c\" on line {line} expects {expected} more payload line(s)")]
	TruncatedPayload { line: usize, expected: usize },
}

/// Unifies the two ways the host shell can fail to finish the command
/// loop. `ed-core`'s own [`ed_core::EngineError`] never surfaces here
/// because it's currently uninhabited — every semantic degeneracy the
/// engine sees saturates rather than errors.
#[derive(Debug, Error)]
pub enum HostError {
	#[error("parse error: {0}")]
	Parse(#[from] ParseError),

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}
