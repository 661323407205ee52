//! The six commands the engine understands, already parsed.
//!
//! Producing a [`Command`] from raw input bytes is the host shell's
//! job (the tokenizer lives in the `ed` binary crate); this type is
//! the seam between that shell and the engine.

use thiserror::Error;

use crate::arena::Line;

/// A single parsed command.
///
/// Addresses are signed: `p` and degenerate `d` ranges may legally
/// carry a non-positive `start` or an `end` past the document's end,
/// and the engine must tolerate both (see [`crate::engine::Engine`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Replace (or append) lines `start..=end` with `lines`.
	///
	/// `lines.len()` must equal `end - start + 1`; the host shell reads
	/// exactly that many payload lines before constructing this value.
	Change { start: i64, end: i64, lines: Vec<Line> },
	/// Delete lines `start..=end`, clamped to the current document.
	Delete { start: i64, end: i64 },
	/// Print lines `start..=end`, emitting the sentinel line for any
	/// position outside the current document.
	Print { start: i64, end: i64 },
	/// Undo the last `n` versions (subject to batching, see
	/// [`crate::engine::Engine::apply`]).
	Undo(u64),
	/// Redo `n` previously-undone versions (subject to batching).
	Redo(u64),
	/// Stop the command loop.
	Quit,
}

/// Errors the engine itself can raise.
///
/// Every semantic degeneracy the five commands can hit (an
/// out-of-range delete, an undo past the start of history, a redo
/// past the most recent edit) saturates instead of erroring. This
/// type has no variants today; it exists so a
/// future command can report a real engine-level failure without
/// reshaping the host shell's error handling, which already unifies
/// over any `std::error::Error`.
#[derive(Debug, Error)]
pub enum EngineError {}
