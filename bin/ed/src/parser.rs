//! The byte-level lexer referenced by ed-core's command spec: turns
//! lines read from a buffered reader into [`ed_core::Command`] values.
//!
//! This is hand-written rather than built on a regex crate — the
//! grammar is a single fixed-width shape (an address pair, a command
//! letter, optional payload lines) that's cheaper to read as a
//! handful of slice operations than as a pattern.

use std::io::BufRead;

use ed_core::Command;

use crate::error::{HostError, ParseError};

/// Reads one full command — including any payload lines a `c`
/// consumes — from `reader`. `current_len` is the engine's logical
/// length *before* this command runs, needed to reject a `c` whose
/// `start` would leave a gap (see the open question in the design
/// notes this tokenizer follows).
///
/// Returns `Ok(None)` at a clean end of input with no partial command
/// pending — the host shell treats that the same as an explicit `q`.
pub fn read_command<R: BufRead>(
	reader: &mut R,
	line_no: &mut usize,
	current_len: usize,
) -> Result<Option<Command>, HostError> {
	let Some(head) = read_line(reader, line_no)? else {
		return Ok(None);
	};
	let trimmed = head.trim_end_matches(['\n', '\r']);
	if trimmed.is_empty() {
		return Err(ParseError::EmptyLine { line: *line_no });
	}

	let mut chars = trimmed.char_indices();
	let (letter_idx, letter) = chars.next_back().map(|(i, c)| (i, c)).unwrap();
	let rest = trimmed[..letter_idx].trim_end();

	let addr = if rest.is_empty() {
		None
	} else {
		Some(parse_address(rest, *line_no)?)
	};

	match letter {
		'q' => Ok(Some(Command::Quit)),
		'c' => {
			let (start, end) = require_address(addr, letter, *line_no)?;
			if start < 1 || end < start {
				return Err(ParseError::InvalidChangeRange { line: *line_no, start, end });
			}
			if start as usize > current_len + 1 {
				return Err(ParseError::ChangeGap { line: *line_no, start });
			}
			let count = (end - start + 1) as usize;
			let mut lines = Vec::with_capacity(count);
			for _ in 0..count {
				let payload_line_no = *line_no;
				let Some(line) = read_line(reader, line_no)? else {
					return Err(ParseError::TruncatedPayload {
						line: payload_line_no,
						expected: count - lines.len(),
					});
				};
				lines.push(ensure_trailing_newline(line));
			}
			Ok(Some(Command::Change { start, end, lines }))
		}
		'd' => {
			let (start, end) = require_address(addr, letter, *line_no)?;
			Ok(Some(Command::Delete { start, end }))
		}
		'p' => {
			let (start, end) = require_address(addr, letter, *line_no)?;
			Ok(Some(Command::Print { start, end }))
		}
		'u' => {
			let (start, _) = require_address(addr, letter, *line_no)?;
			Ok(Some(Command::Undo(start.max(0) as u64)))
		}
		'r' => {
			let (start, _) = require_address(addr, letter, *line_no)?;
			Ok(Some(Command::Redo(start.max(0) as u64)))
		}
		other => Err(ParseError::UnknownCommand { line: *line_no, letter: other }),
	}
}

fn require_address(
	addr: Option<(i64, i64)>,
	letter: char,
	line: usize,
) -> Result<(i64, i64), ParseError> {
	addr.ok_or(ParseError::MalformedAddress { line, text: letter.to_string() })
}

fn parse_address(text: &str, line: usize) -> Result<(i64, i64), ParseError> {
	let (start_text, end_text) = text
		.split_once(',')
		.ok_or_else(|| ParseError::MalformedAddress { line, text: text.to_string() })?;
	let start = start_text
		.parse::<i64>()
		.map_err(|_| ParseError::MalformedAddress { line, text: text.to_string() })?;
	let end = end_text
		.parse::<i64>()
		.map_err(|_| ParseError::MalformedAddress { line, text: text.to_string() })?;
	Ok((start, end))
}

/// Reads one line, keeping its trailing newline when present. `None`
/// means the reader was already exhausted; a final line with no
/// trailing newline still comes back as `Some`.
fn read_line<R: BufRead>(reader: &mut R, line_no: &mut usize) -> std::io::Result<Option<String>> {
	let mut buf = String::new();
	let n = reader.read_line(&mut buf)?;
	if n == 0 {
		return Ok(None);
	}
	*line_no += 1;
	Ok(Some(buf))
}

fn ensure_trailing_newline(mut line: String) -> ed_core::Line {
	if !line.ends_with('\n') {
		line.push('\n');
	}
	ed_core::Line::from(line)
}
