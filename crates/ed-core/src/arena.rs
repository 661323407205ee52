//! Append-only line arena.
//!
//! The arena is the sole storage for document content across every
//! version the engine has ever produced. It never deletes or shuffles
//! a slot; a [`Line`] is shared by reference (not copied) whenever a
//! command carries it forward unchanged from the prior version.

use bytes::Bytes;

/// An immutable, reference-counted line of text, trailing newline
/// included.
///
/// Cloning a `Line` never duplicates bytes — it bumps a refcount. This
/// is what lets [`LineArena::truncate_to`] and geometric growth happen
/// without invalidating a `Line` a caller is still holding: growth may
/// relocate the arena's own backing storage, but never the payload a
/// clone points at.
pub type Line = Bytes;

/// The distinguished line used to represent the empty document: a
/// single `.` followed by newline.
pub const SENTINEL_EMPTY_LINE: &[u8] = b".\n";

/// Builds the sentinel empty [`Line`].
pub fn sentinel_empty_line() -> Line {
	Bytes::from_static(SENTINEL_EMPTY_LINE)
}

/// Append-only store of line references, addressed by absolute slot
/// index.
///
/// `LineArena` knows nothing about versions: it is a flat, growable
/// sequence of slots. The version index layered on top (see
/// [`crate::version_index::VersionIndex`]) is what gives meaning to a
/// contiguous range of slots as "version *i*'s document".
#[derive(Debug, Default)]
pub struct LineArena {
	slots: Vec<Line>,
}

impl LineArena {
	/// Creates an empty arena.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a slot referencing `line`, returning its absolute index.
	///
	/// `Vec::push` already grows geometrically (doubling capacity),
	/// which is the growth discipline this arena relies on.
	pub fn append_ref(&mut self, line: Line) -> usize {
		let idx = self.slots.len();
		self.slots.push(line);
		idx
	}

	/// Reads the line at absolute slot index `i`.
	///
	/// # Panics
	///
	/// Panics if `i` is out of bounds. Callers only ever read slots
	/// named by a version range that the engine itself produced, so an
	/// out-of-bounds read here is an engine bug, not a runtime
	/// condition to recover from.
	pub fn get(&self, i: usize) -> &Line {
		&self.slots[i]
	}

	/// Current logical length of the arena (number of live slots).
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Whether the arena holds no slots at all (only true before the
	/// very first version is pushed).
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Truncates the arena's logical length to `n`.
	///
	/// Slots beyond `n` are dropped; nothing is overwritten in place —
	/// the next [`append_ref`](Self::append_ref) simply grows the
	/// vector again from the new logical end. This is the mechanism
	/// behind `drop_future()` in the version index: undoing past a
	/// batch of edits and then making a fresh edit must make the stale
	/// tail unreachable without disturbing indices below it.
	pub fn truncate_to(&mut self, n: usize) {
		self.slots.truncate(n);
	}
}
