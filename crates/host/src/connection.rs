//! The host contract driven by the notifier core, and the transport seam below it.

use async_trait::async_trait;

use crate::{BatchId, FlushReport, RemoteCall, Result};

/// Connection to an editor host that supports batching windows.
///
/// Between [`pause_notification`](Self::pause_notification) and
/// [`resume_notification`](Self::resume_notification) the host queues every
/// call it receives instead of applying it. Resuming applies the queue as one
/// atomic flush.
///
/// Implementations decide whether nested pauses are reference-counted. The
/// notifier's `Batcher` serializes its own windows by default, so a host that
/// does not count pauses is only unsafe when several batchers share it.
#[async_trait]
pub trait HostConnection: Send + Sync {
	/// Begins queuing subsequent remote calls.
	fn pause_notification(&self) -> Result<()>;

	/// Closes the window and flushes queued calls as one unit.
	///
	/// Implementations must release the window before their first suspension
	/// point, so dropping the returned future never leaves the host paused.
	async fn resume_notification(&self) -> Result<FlushReport>;

	/// Issues a fire-and-forget remote call, queued while a window is open.
	fn notify(&self, call: RemoteCall) -> Result<()>;
}

/// Wire-level delivery used by [`QueuedHost`](crate::QueuedHost).
#[async_trait]
pub trait Transport: Send + Sync {
	/// Sends a single call immediately without waiting for the host.
	fn send(&self, call: RemoteCall) -> Result<()>;

	/// Sends a batch the host must apply atomically, resolving once applied.
	async fn send_atomic(&self, id: BatchId, calls: Vec<RemoteCall>) -> Result<()>;
}
