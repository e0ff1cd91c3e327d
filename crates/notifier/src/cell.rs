//! Optional, possibly deferred notifiers contributed by call sites.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;

use crate::Notifier;


/// A notifier that may be absent, or may still need to be computed.
#[derive(Default)]
pub enum NotifierCell {
	/// A notifier ready to trigger.
	Ready(Notifier),
	/// Nothing to contribute.
	#[default]
	Absent,
	/// A computation yielding a notifier or nothing.
	Deferred(BoxFuture<'static, anyhow::Result<Option<Notifier>>>),
}

impl NotifierCell {
	/// Wraps a future that yields a notifier or nothing.
	pub fn deferred<F>(future: F) -> Self
	where
		F: Future<Output = anyhow::Result<Option<Notifier>>> + Send + 'static,
	{
		Self::Deferred(Box::pin(future))
	}

	/// Returns true if resolving requires awaiting.
	pub fn is_deferred(&self) -> bool {
		matches!(self, Self::Deferred(_))
	}

	/// Returns true for an absent cell.
	pub fn is_absent(&self) -> bool {
		matches!(self, Self::Absent)
	}

	/// Resolves the cell. Ready and absent cells never suspend.
	pub async fn resolve(self) -> anyhow::Result<Option<Notifier>> {
		match self {
			Self::Ready(notifier) => Ok(Some(notifier)),
			Self::Absent => Ok(None),
			Self::Deferred(future) => future.await,
		}
	}
}

impl fmt::Debug for NotifierCell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Ready(notifier) => f.debug_tuple("Ready").field(notifier).finish(),
			Self::Absent => f.write_str("Absent"),
			Self::Deferred(_) => f.write_str("Deferred(..)"),
		}
	}
}

impl From<Notifier> for NotifierCell {
	fn from(notifier: Notifier) -> Self {
		Self::Ready(notifier)
	}
}

impl From<Option<Notifier>> for NotifierCell {
	fn from(notifier: Option<Notifier>) -> Self {
		notifier.map_or(Self::Absent, Self::Ready)
	}
}
