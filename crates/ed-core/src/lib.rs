//! Headless engine for a line-oriented text editor with an
//! append-only, version-indexed buffer.
//!
//! The crate is three small, layered pieces:
//!
//! - [`arena`]: the append-only store of line references.
//! - [`version_index`]: the append-only log of version ranges over
//!   the arena, plus cursor seeking.
//! - [`engine`]: the command interpreter — [`engine::Engine`] is the
//!   type most callers want. It owns an arena and a version index and
//!   applies [`command::Command`] values to them, batching runs of
//!   undo/redo into a single cursor displacement.
//!
//! This crate does not read stdin, tokenize a command line, or write
//! to stdout — that host-shell layer lives in the `ed` binary crate.
//! `ed-core` only knows about already-parsed [`command::Command`]
//! values and already-allocated [`arena::Line`]s.

pub mod arena;
pub mod command;
pub mod engine;
pub mod version_index;

pub use arena::Line;
pub use command::{Command, EngineError};
pub use engine::{Engine, Outcome};
