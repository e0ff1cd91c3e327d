//! Batched dispatch: resolve every cell, then trigger all of them inside one
//! batching window.

use coalesce_host::{FlushReport, HostConnection};
use futures::future::try_join_all;
use tracing::trace;

use crate::{BatchWindow, Error, Notifier, NotifierCell, Result};


/// Triggers every cell's notifier inside a single batching window on `host`.
///
/// Deferred cells are awaited concurrently before the window opens, so a
/// failed or slow resolution never leaves a window open. Resolved notifiers
/// run in input order and absent cells are skipped. An empty input completes
/// without touching the host. Any non-empty input opens exactly one window,
/// even when every cell resolves absent.
///
/// This entry point does not serialize concurrent windows; see
/// [`Batcher`](crate::Batcher).
pub async fn run_all<I>(host: &dyn HostConnection, cells: I) -> Result<FlushReport>
where
	I: IntoIterator,
	I::Item: Into<NotifierCell>,
{
	let Some(resolved) = resolve(cells).await? else {
		return Ok(FlushReport::empty());
	};
	dispatch(host, &resolved).await
}

impl Notifier {
	/// Triggers this notifier alone inside one batching window on `host`.
	pub async fn run(self, host: &dyn HostConnection) -> Result<FlushReport> {
		run_all(host, [self]).await
	}
}

/// Resolves all cells in input order. `None` for an empty input.
pub(crate) async fn resolve<I>(cells: I) -> Result<Option<Vec<Option<Notifier>>>>
where
	I: IntoIterator,
	I::Item: Into<NotifierCell>,
{
	let cells: Vec<NotifierCell> = cells.into_iter().map(Into::into).collect();
	if cells.is_empty() {
		trace!("notifier.run_all.empty");
		return Ok(None);
	}
	let deferred = cells.iter().filter(|cell| cell.is_deferred()).count();
	trace!(cells = cells.len(), deferred, "notifier.run_all.resolve");
	let resolved = try_join_all(cells.into_iter().map(NotifierCell::resolve))
		.await
		.map_err(Error::resolve)?;
	Ok(Some(resolved))
}

/// Opens one window and triggers every present notifier in order.
pub(crate) async fn dispatch(host: &dyn HostConnection, resolved: &[Option<Notifier>]) -> Result<FlushReport> {
	BatchWindow::scope(host, || {
		for (slot, notifier) in resolved.iter().enumerate() {
			let Some(notifier) = notifier else {
				continue;
			};
			notifier.notify().map_err(|source| Error::Notify { slot, source })?;
		}
		Ok(())
	})
	.await
}
