use clap::Parser;

/// A line-oriented text editor: reads commands from stdin, writes
/// selected lines to stdout.
#[derive(Parser, Debug)]
#[command(name = "ed")]
#[command(about = "A line-oriented text editor with batched undo/redo")]
#[command(version)]
pub struct Cli {
	/// Raise logging from INFO to DEBUG (also TRACE-level per-command
	/// regime tracing in ed-core).
	#[arg(short, long)]
	pub verbose: bool,

	/// Lower logging to WARN, silencing the per-command INFO trail.
	#[arg(long, conflicts_with = "verbose")]
	pub quiet: bool,
}
