//! In-memory host used by unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use coalesce_host::{Error as HostError, FlushReport, HostConnection, RemoteCall};
use parking_lot::Mutex;

use crate::Notifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostEvent {
	Pause,
	Call(String),
	Resume,
}

#[derive(Debug, Default)]
struct MockState {
	events: Vec<HostEvent>,
	depth: usize,
	max_depth: usize,
}

/// Records every host interaction and tracks how many windows overlap.
#[derive(Debug, Default)]
pub(crate) struct MockHost {
	state: Mutex<MockState>,
	fail_pause: bool,
	fail_resume: bool,
	/// Yield to the scheduler inside resume, letting other tasks interleave.
	yield_on_resume: bool,
}

impl MockHost {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// A host that refuses every pause.
	pub fn failing_pause() -> Arc<Self> {
		Arc::new(Self {
			fail_pause: true,
			..Self::default()
		})
	}

	/// A host whose flush is always rejected.
	pub fn failing_resume() -> Arc<Self> {
		Arc::new(Self {
			fail_resume: true,
			..Self::default()
		})
	}

	/// A host that yields inside resume so concurrent windows can interleave.
	pub fn slow() -> Arc<Self> {
		Arc::new(Self {
			yield_on_resume: true,
			..Self::default()
		})
	}

	pub fn events(&self) -> Vec<HostEvent> {
		self.state.lock().events.clone()
	}

	pub fn pauses(&self) -> usize {
		self.count(&HostEvent::Pause)
	}

	pub fn resumes(&self) -> usize {
		self.count(&HostEvent::Resume)
	}

	pub fn max_depth(&self) -> usize {
		self.state.lock().max_depth
	}

	fn count(&self, event: &HostEvent) -> usize {
		self.state.lock().events.iter().filter(|e| *e == event).count()
	}

	/// A notifier that issues one host call named `method`.
	pub fn calling(self: &Arc<Self>, method: &'static str) -> Notifier {
		let host = Arc::clone(self);
		Notifier::create(move || {
			host.notify(RemoteCall::new(method, Vec::new()))?;
			Ok(())
		})
	}
}

#[async_trait]
impl HostConnection for MockHost {
	fn pause_notification(&self) -> coalesce_host::Result<()> {
		if self.fail_pause {
			return Err(HostError::HostStopped);
		}
		let mut state = self.state.lock();
		state.events.push(HostEvent::Pause);
		state.depth += 1;
		state.max_depth = state.max_depth.max(state.depth);
		Ok(())
	}

	async fn resume_notification(&self) -> coalesce_host::Result<FlushReport> {
		let flushed = {
			let mut state = self.state.lock();
			let flushed = state
				.events
				.iter()
				.rev()
				.take_while(|e| **e != HostEvent::Pause)
				.filter(|e| matches!(e, HostEvent::Call(_)))
				.count();
			state.events.push(HostEvent::Resume);
			flushed
		};
		if self.yield_on_resume {
			for _ in 0..4 {
				tokio::task::yield_now().await;
			}
		}
		self.state.lock().depth -= 1;
		if self.fail_resume {
			return Err(HostError::Remote("flush rejected".into()));
		}
		Ok(FlushReport {
			batch: None,
			flushed,
			still_paused: false,
		})
	}

	fn notify(&self, call: RemoteCall) -> coalesce_host::Result<()> {
		self.state.lock().events.push(HostEvent::Call(call.method));
		Ok(())
	}
}
