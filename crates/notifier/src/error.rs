//! Error types for notifier dispatch.

use crate::NotifyError;

/// Boxed error carried from user callbacks and deferred cells.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A convenient type alias for `Result` with `E` = [`enum@crate::Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Possible dispatch errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// A deferred cell failed before any host call was made.
	#[error("failed to resolve deferred notifier: {0}")]
	Resolve(#[source] BoxError),
	/// A callback failed inside an open window. The window was closed first.
	#[error("notifier in slot {slot} failed: {source}")]
	Notify {
		/// Position of the failing notifier in the resolved input.
		slot: usize,
		/// The callback failure.
		#[source]
		source: NotifyError,
	},
	/// The host refused to pause or failed to flush.
	#[error(transparent)]
	Host(#[from] coalesce_host::Error),
	/// The batching configuration could not be parsed.
	#[error("invalid batching config: {0}")]
	Config(#[from] toml::de::Error),
}

impl Error {
	pub(crate) fn resolve(error: anyhow::Error) -> Self {
		Self::Resolve(error.into())
	}
}
