//! The command engine: an `Idle`/`Batching` state machine over undo
//! and redo, and otherwise a straightforward command interpreter.
//!
//! `Engine` owns the [`LineArena`] and [`VersionIndex`] for the whole
//! process lifetime and is the only thing that mutates either. It
//! also owns the batching state that collapses a run of consecutive
//! `u`/`r` commands into a single net cursor displacement.

use crate::arena::{Line, LineArena, sentinel_empty_line};
use crate::command::{Command, EngineError};
use crate::version_index::{Range, VersionIndex};

/// What applying a command produced.
///
/// The engine never touches an I/O sink directly — `Print` hands its
/// selected lines back to the caller, which in the `ed` binary is the
/// host shell's buffered stdout writer. Keeping the engine ignorant of
/// I/O is what makes it straightforward to drive from tests without a
/// pipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	/// A `c`/`d`/`u`/`r` command ran; the document may have changed.
	Mutated,
	/// A `p` command ran; these are the lines it selected, in order,
	/// each including its trailing newline (or the sentinel `.\n` for
	/// an out-of-range position).
	Printed(Vec<Line>),
	/// A `q` command ran; the host shell should stop reading input.
	Quit,
}

/// Accumulated state for a run of consecutive undo/redo commands.
///
/// `undo_available`/`redo_available` start as snapshots of the cursor
/// and redo budget at the moment the run began, and are updated as
/// each undo/redo in the run is accepted — this is what makes "5 u, 3
/// r" collapse to a net two-version undo instead of eight cursor
/// hops.
#[derive(Debug)]
struct Batch {
	undo_available: u64,
	redo_available: u64,
	displacement: i64,
}

/// Owns the arena and version index; interprets commands against
/// them.
#[derive(Debug)]
pub struct Engine {
	arena: LineArena,
	versions: VersionIndex,
	batch: Option<Batch>,
}

impl Default for Engine {
	fn default() -> Self {
		Self::new()
	}
}

impl Engine {
	/// Creates a fresh engine: version `0` is the empty document, the
	/// cursor sits on it, and no undo/redo batch is in progress.
	pub fn new() -> Self {
		Self {
			arena: LineArena::new(),
			versions: VersionIndex::new(),
			batch: None,
		}
	}

	/// The current document's logical length, in lines.
	pub fn len(&self) -> usize {
		self.versions.current().len
	}

	/// The version the engine is currently showing.
	pub fn cursor(&self) -> usize {
		self.versions.cursor()
	}

	/// The highest version ever produced (the redo ceiling).
	pub fn highest(&self) -> usize {
		self.versions.highest()
	}

	/// Applies one parsed command, per the state machine in §4.3:
	/// `u`/`r` accumulate into the current batch; any other command
	/// first commits an in-progress batch (a single cursor seek), then
	/// runs normally.
	pub fn apply(&mut self, command: Command) -> Result<Outcome, EngineError> {
		match command {
			Command::Undo(n) => {
				self.accumulate_undo(n);
				Ok(Outcome::Mutated)
			}
			Command::Redo(n) => {
				self.accumulate_redo(n);
				Ok(Outcome::Mutated)
			}
			Command::Change { start, end, lines } => {
				self.commit_batch();
				self.change(start, end, lines);
				Ok(Outcome::Mutated)
			}
			Command::Delete { start, end } => {
				self.commit_batch();
				self.delete(start, end);
				Ok(Outcome::Mutated)
			}
			Command::Print { start, end } => {
				self.commit_batch();
				Ok(Outcome::Printed(self.print(start, end)))
			}
			Command::Quit => {
				self.commit_batch();
				Ok(Outcome::Quit)
			}
		}
	}

	fn ensure_batch(&mut self) -> &mut Batch {
		self.batch.get_or_insert_with(|| {
			let cursor = self.versions.cursor() as u64;
			let highest = self.versions.highest() as u64;
			Batch {
				undo_available: cursor,
				redo_available: highest - cursor,
				displacement: 0,
			}
		})
	}

	fn accumulate_undo(&mut self, n: u64) {
		let batch = self.ensure_batch();
		let taken = n.min(batch.undo_available);
		batch.displacement += taken as i64;
		batch.undo_available -= taken;
		batch.redo_available += taken;
	}

	fn accumulate_redo(&mut self, n: u64) {
		let batch = self.ensure_batch();
		let taken = n.min(batch.redo_available);
		batch.displacement -= taken as i64;
		batch.redo_available -= taken;
		batch.undo_available += taken;
	}

	/// Commits any in-progress undo/redo batch as a single cursor
	/// displacement. A no-op if no batch is in progress.
	fn commit_batch(&mut self) {
		if let Some(batch) = self.batch.take() {
			tracing::debug!(displacement = batch.displacement, cursor_before = self.versions.cursor(), "committing undo/redo batch");
			self.versions.seek(batch.displacement as isize);
		}
	}

	/// Truncates both the version index and the arena's logical tail
	/// back to the cursor, discarding any redo future. Always run at
	/// the top of `change`/`delete`, whether or not a batch just
	/// committed — if the cursor is already at the highest version
	/// this is a no-op, which is exactly the "no redo future to drop"
	/// case.
	fn drop_future(&mut self) {
		self.versions.drop_future();
		let end = self.versions.current().end;
		let live_len = if end < 0 { 0 } else { (end + 1) as usize };
		self.arena.truncate_to(live_len);
	}

	/// Reads the line at 1-indexed logical position `pos` in the
	/// current version, by reference (clones the `Line` handle, not
	/// its bytes).
	fn line_ref(&self, pos: i64) -> Line {
		let current = self.versions.current();
		let idx = (current.begin + (pos - 1) as isize) as usize;
		self.arena.get(idx).clone()
	}

	fn change(&mut self, start: i64, end: i64, lines: Vec<Line>) {
		debug_assert!(start >= 1 && start <= end);
		debug_assert_eq!(lines.len() as i64, end - start + 1);

		self.drop_future();
		let l = self.versions.current().len as i64;
		debug_assert!(start <= l + 1, "change must not leave a gap");

		if start > l {
			tracing::trace!(start, end, l, "change: pure append");
		} else {
			tracing::trace!(start, end, l, "change: overlapping replace");
		}

		let begin = self.arena.len() as isize;
		for pos in 1..start {
			let line = self.line_ref(pos);
			self.arena.append_ref(line);
		}
		for line in lines {
			self.arena.append_ref(line);
		}
		if end < l {
			for pos in (end + 1)..=l {
				let line = self.line_ref(pos);
				self.arena.append_ref(line);
			}
		}
		let end_idx = self.arena.len() as isize - 1;
		let new_len = l.max(end) as usize;
		self.versions.push(Range {
			begin,
			end: end_idx,
			len: new_len,
		});
	}

	fn delete(&mut self, start: i64, end: i64) {
		self.drop_future();
		let l = self.versions.current().len as i64;
		let begin = self.arena.len() as isize;

		let new_len = if end < 1 || start > l {
			// Out of range on either side: no-op on content, but a new
			// version is still produced (see §4.3).
			if l == 0 {
				self.arena.append_ref(sentinel_empty_line());
			} else {
				for pos in 1..=l {
					let line = self.line_ref(pos);
					self.arena.append_ref(line);
				}
			}
			l as usize
		} else {
			let s = start.max(1);
			let e = end.min(l);
			if s == 1 && e == l {
				self.arena.append_ref(sentinel_empty_line());
				0
			} else {
				for pos in 1..s {
					let line = self.line_ref(pos);
					self.arena.append_ref(line);
				}
				for pos in (e + 1)..=l {
					let line = self.line_ref(pos);
					self.arena.append_ref(line);
				}
				(l - (e - s + 1)) as usize
			}
		};

		let end_idx = self.arena.len() as isize - 1;
		self.versions.push(Range {
			begin,
			end: end_idx,
			len: new_len,
		});
	}

	fn print(&self, start: i64, end: i64) -> Vec<Line> {
		let l = self.versions.current().len as i64;
		let mut out = Vec::new();
		let mut i = start;
		while i <= end {
			if i < 1 || i > l {
				out.push(sentinel_empty_line());
			} else {
				out.push(self.line_ref(i));
			}
			i += 1;
		}
		out
	}
}
