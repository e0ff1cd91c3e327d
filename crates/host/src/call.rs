//! Values exchanged with the host: remote calls, batch identifiers, flush reports.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// A fire-and-forget call into the host process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCall {
	/// Host method name.
	pub method: String,
	/// Positional arguments.
	#[serde(default)]
	pub args: Vec<Value>,
}

impl RemoteCall {
	/// Creates a call with already-encoded positional arguments.
	pub fn new(method: impl Into<String>, args: Vec<Value>) -> Self {
		Self {
			method: method.into(),
			args,
		}
	}

	/// Creates a call from any serializable argument value.
	///
	/// Sequences and tuples become positional arguments, `()` becomes an empty
	/// argument list, and any other value is passed as the single argument.
	pub fn with_args<A: Serialize>(method: impl Into<String>, args: A) -> Result<Self> {
		let args = match serde_json::to_value(args)? {
			Value::Array(values) => values,
			Value::Null => Vec::new(),
			other => vec![other],
		};
		Ok(Self::new(method, args))
	}
}

/// Identifier of one atomic flush sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BatchId(pub u64);

impl fmt::Display for BatchId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "batch#{}", self.0)
	}
}

/// Simple counter-based generator for [`BatchId`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct CounterIdGen(pub u64);

impl CounterIdGen {
	/// Creates a new counter starting at 0.
	#[must_use]
	pub const fn new() -> Self {
		Self(0)
	}

	/// Generates the next batch ID and increments the counter.
	#[allow(clippy::should_implement_trait, reason = "convention")]
	pub fn next(&mut self) -> BatchId {
		let id = self.0;
		self.0 += 1;
		BatchId(id)
	}
}

/// Completion signal of a `resume_notification` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
	/// Batch sent to the host, if any calls were queued.
	pub batch: Option<BatchId>,
	/// Number of calls delivered in the batch.
	pub flushed: usize,
	/// True when an outer window is still open, so nothing was flushed yet.
	pub still_paused: bool,
}

impl FlushReport {
	/// Report for a resume that delivered nothing.
	#[must_use]
	pub const fn empty() -> Self {
		Self {
			batch: None,
			flushed: 0,
			still_paused: false,
		}
	}

	/// Report for a resume that closed an inner window of a nested pause.
	#[must_use]
	pub const fn nested() -> Self {
		Self {
			batch: None,
			flushed: 0,
			still_paused: true,
		}
	}

	/// Returns true if no call was delivered.
	pub const fn is_empty(&self) -> bool {
		self.flushed == 0
	}
}
