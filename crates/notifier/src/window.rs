//! Scoped batching window over a [`HostConnection`].

use std::panic::{self, AssertUnwindSafe};

use coalesce_host::{FlushReport, HostConnection};
use tracing::{trace, warn};

use crate::Result;


/// An open batching window. Closing it flushes the host.
///
/// Opening and closing are crate-internal: callers go through
/// [`BatchWindow::scope`], which closes the window on every exit path.
#[must_use = "a batching window must be closed to flush the host"]
pub struct BatchWindow<'a> {
	host: &'a dyn HostConnection,
}

impl<'a> BatchWindow<'a> {
	fn open(host: &'a dyn HostConnection) -> Result<Self> {
		host.pause_notification()?;
		trace!("notifier.window.pause");
		Ok(Self { host })
	}

	async fn close(self) -> Result<FlushReport> {
		let report = self.host.resume_notification().await?;
		trace!(
			flushed = report.flushed,
			still_paused = report.still_paused,
			"notifier.window.resume"
		);
		Ok(report)
	}

	/// Runs `f` inside a batching window on `host`.
	///
	/// The window is closed after `f` returns, fails, or panics. A failure
	/// from `f` takes precedence over a failure to close; a panic is resumed
	/// once the window is closed. If the host refuses to pause, `f` does not
	/// run.
	pub async fn scope<F>(host: &'a dyn HostConnection, f: F) -> Result<FlushReport>
	where
		F: FnOnce() -> Result<()>,
	{
		let window = Self::open(host)?;
		let outcome = panic::catch_unwind(AssertUnwindSafe(f));
		let closed = window.close().await;
		match outcome {
			Ok(Ok(())) => closed,
			Ok(Err(err)) => {
				if let Err(close_err) = &closed {
					warn!(error = %close_err, "notifier.window.resume_failed");
				}
				Err(err)
			}
			Err(payload) => {
				warn!(resumed = closed.is_ok(), "notifier.window.panicked");
				panic::resume_unwind(payload)
			}
		}
	}
}
