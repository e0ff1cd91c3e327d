//! Error types for host connections.

/// A convenient type alias for `Result` with `E` = [`enum@crate::Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Possible host connection errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The host side of the connection is gone.
	#[error("host connection stopped")]
	HostStopped,
	/// `resume_notification` was called with no batching window open.
	#[error("resume_notification called without a matching pause_notification")]
	NotPaused,
	/// The host rejected a flushed batch.
	#[error("host rejected batch: {0}")]
	Remote(String),
	/// Call arguments could not be encoded.
	#[error("failed to encode call arguments: {0}")]
	Serialize(#[from] serde_json::Error),
}
