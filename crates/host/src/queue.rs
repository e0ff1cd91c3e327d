//! Reference-counted batching host.
//!
//! [`QueuedHost`] owns the batching window on the plugin side of the
//! connection. Pauses nest: only the outermost resume flushes, so two
//! independent callers opening overlapping windows still produce exactly one
//! atomic batch per outermost window instead of a half-flushed queue.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{BatchId, CounterIdGen, Error, FlushReport, HostConnection, RemoteCall, Result, Transport};


/// Lifetime counters for a [`QueuedHost`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
	/// Successful `pause_notification` calls.
	pub pauses: u64,
	/// Successful `resume_notification` calls, nested or not.
	pub resumes: u64,
	/// Batches handed to the transport.
	pub flushes: u64,
	/// Calls sent outside any window.
	pub immediate: u64,
}

#[derive(Debug, Default)]
struct QueueState {
	depth: usize,
	queued: Vec<RemoteCall>,
	ids: CounterIdGen,
	stats: HostStats,
}

/// Batching host that queues calls while paused and flushes them through a
/// [`Transport`] when the outermost window closes.
pub struct QueuedHost<T> {
	transport: T,
	state: Mutex<QueueState>,
}

impl<T> std::fmt::Debug for QueuedHost<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("QueuedHost")
			.field("depth", &state.depth)
			.field("queued", &state.queued.len())
			.finish_non_exhaustive()
	}
}

impl<T: Transport> QueuedHost<T> {
	/// Creates an unpaused host over `transport`.
	pub fn new(transport: T) -> Self {
		Self {
			transport,
			state: Mutex::new(QueueState::default()),
		}
	}

	/// Returns the underlying transport.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Current pause nesting depth.
	pub fn depth(&self) -> usize {
		self.state.lock().depth
	}

	/// Returns true while any batching window is open.
	pub fn is_paused(&self) -> bool {
		self.depth() > 0
	}

	/// Number of calls waiting for the outermost resume.
	pub fn queued(&self) -> usize {
		self.state.lock().queued.len()
	}

	/// Lifetime counters.
	pub fn stats(&self) -> HostStats {
		self.state.lock().stats
	}

	/// Releases one window level and takes the queue if it was the outermost.
	fn release(&self) -> Result<Release> {
		let mut state = self.state.lock();
		if state.depth == 0 {
			return Err(Error::NotPaused);
		}
		state.depth -= 1;
		state.stats.resumes += 1;
		if state.depth > 0 {
			trace!(depth = state.depth, queued = state.queued.len(), "host.resume.nested");
			return Ok(Release::Nested);
		}
		if state.queued.is_empty() {
			trace!("host.resume.empty");
			return Ok(Release::Empty);
		}
		let id = state.ids.next();
		state.stats.flushes += 1;
		Ok(Release::Flush(id, std::mem::take(&mut state.queued)))
	}
}

/// Outcome of closing one window level.
enum Release {
	Nested,
	Empty,
	Flush(BatchId, Vec<RemoteCall>),
}

#[async_trait]
impl<T: Transport> HostConnection for QueuedHost<T> {
	fn pause_notification(&self) -> Result<()> {
		let mut state = self.state.lock();
		state.depth += 1;
		state.stats.pauses += 1;
		trace!(depth = state.depth, "host.pause");
		Ok(())
	}

	async fn resume_notification(&self) -> Result<FlushReport> {
		let (id, calls) = match self.release()? {
			Release::Nested => return Ok(FlushReport::nested()),
			Release::Empty => return Ok(FlushReport::empty()),
			Release::Flush(id, calls) => (id, calls),
		};
		let flushed = calls.len();
		debug!(batch = %id, flushed, "host.flush");
		self.transport.send_atomic(id, calls).await?;
		Ok(FlushReport {
			batch: Some(id),
			flushed,
			still_paused: false,
		})
	}

	fn notify(&self, call: RemoteCall) -> Result<()> {
		{
			let mut state = self.state.lock();
			if state.depth > 0 {
				trace!(method = %call.method, queued = state.queued.len() + 1, "host.queue");
				state.queued.push(call);
				return Ok(());
			}
			state.stats.immediate += 1;
		}
		trace!(method = %call.method, "host.send");
		self.transport.send(call)
	}
}
