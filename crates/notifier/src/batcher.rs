//! Host-owning entry point for batched dispatch.

use std::sync::Arc;

use coalesce_host::{FlushReport, HostConnection};
use tokio::sync::Mutex;

use crate::batch::{dispatch, resolve};
use crate::{BatchConfig, Notifier, NotifierCell, Result, WindowPolicy};


/// Runs notifiers against an injected host connection.
///
/// With [`WindowPolicy::Serialized`] concurrent calls on one batcher take
/// turns between pause and resume. Resolution of deferred cells happens
/// before a call queues for its turn, so a slow cell never holds up others.
pub struct Batcher {
	host: Arc<dyn HostConnection>,
	policy: WindowPolicy,
	gate: Mutex<()>,
}

impl std::fmt::Debug for Batcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Batcher")
			.field("policy", &self.policy)
			.finish_non_exhaustive()
	}
}

impl Batcher {
	/// Creates a batcher over `host`.
	pub fn new(host: Arc<dyn HostConnection>, config: BatchConfig) -> Self {
		Self {
			host,
			policy: config.policy,
			gate: Mutex::new(()),
		}
	}

	/// Returns the host connection.
	pub fn host(&self) -> &Arc<dyn HostConnection> {
		&self.host
	}

	/// Returns the configured window policy.
	pub fn policy(&self) -> WindowPolicy {
		self.policy
	}

	/// Triggers one notifier inside a batching window.
	pub async fn run(&self, notifier: Notifier) -> Result<FlushReport> {
		self.run_all([notifier]).await
	}

	/// Batched dispatch with the same contract as [`run_all`](crate::run_all),
	/// plus this batcher's window policy.
	pub async fn run_all<I>(&self, cells: I) -> Result<FlushReport>
	where
		I: IntoIterator,
		I::Item: Into<NotifierCell>,
	{
		let Some(resolved) = resolve(cells).await? else {
			return Ok(FlushReport::empty());
		};
		let _turn = match self.policy {
			WindowPolicy::Serialized => Some(self.gate.lock().await),
			WindowPolicy::Nested => None,
		};
		dispatch(&*self.host, &resolved).await
	}
}
