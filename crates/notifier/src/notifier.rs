//! The [`Notifier`] value: an ordered bundle of deferred host side effects.

use std::fmt;
use std::sync::Arc;

use crate::BoxError;


/// A zero-argument side effect, usually one or more host calls.
pub type Effect = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// A composable bundle of deferred host-affecting side effects.
///
/// Nothing runs on construction or combination. Effects run in order when
/// the notifier is triggered through [`notify`](Self::notify) or one of the
/// batched entry points.
///
/// [`concat`](Self::concat) consumes both operands, so a notifier merged into
/// another cannot be triggered again on its own. Cloning is explicit and
/// yields an independent notifier over the same effects.
#[derive(Clone)]
pub struct Notifier {
	effects: Vec<Effect>,
}

impl fmt::Debug for Notifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Notifier")
			.field("effects", &self.effects.len())
			.finish()
	}
}

impl Default for Notifier {
	fn default() -> Self {
		Self::noop()
	}
}

impl Notifier {
	/// Creates a notifier whose only effect is `effect`.
	pub fn create<F>(effect: F) -> Self
	where
		F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
	{
		Self {
			effects: vec![Arc::new(effect)],
		}
	}

	/// Creates a notifier holding a single empty effect.
	pub fn noop() -> Self {
		Self::create(|| Ok(()))
	}

	/// Appends `other`'s effects after this notifier's and returns it.
	#[must_use]
	pub fn concat(mut self, other: Notifier) -> Self {
		self.effects.extend(other.effects);
		self
	}

	/// Number of effects; never zero.
	pub fn effect_count(&self) -> usize {
		self.effects.len()
	}

	/// Runs every effect in order with no batching window.
	///
	/// Stops at the first failing effect. Effects that already ran are not
	/// undone.
	pub fn notify(&self) -> Result<(), NotifyError> {
		for (index, effect) in self.effects.iter().enumerate() {
			if let Err(error) = effect() {
				tracing::warn!(index, effects = self.effects.len(), error = %error, "notifier.notify.failed");
				return Err(NotifyError {
					index,
					source: error.into(),
				});
			}
		}
		tracing::trace!(effects = self.effects.len(), "notifier.notify");
		Ok(())
	}
}

/// Reduces present-or-absent notifiers to one, skipping absent entries.
///
/// An all-absent input yields [`Notifier::noop`]. A single present entry is
/// returned as is. Otherwise entries are concatenated in encounter order.
pub fn combine<I>(cells: I) -> Notifier
where
	I: IntoIterator,
	I::Item: Into<Option<Notifier>>,
{
	let mut present = cells.into_iter().filter_map(Into::into);
	let Some(first) = present.next() else {
		return Notifier::noop();
	};
	present.fold(first, Notifier::concat)
}

impl FromIterator<Notifier> for Notifier {
	fn from_iter<I: IntoIterator<Item = Notifier>>(iter: I) -> Self {
		combine(iter)
	}
}

impl Extend<Notifier> for Notifier {
	fn extend<I: IntoIterator<Item = Notifier>>(&mut self, iter: I) {
		self.effects
			.extend(iter.into_iter().flat_map(|notifier| notifier.effects));
	}
}

/// An effect failed while a notifier was being triggered.
#[derive(Debug, thiserror::Error)]
#[error("notify effect {index} failed: {source}")]
pub struct NotifyError {
	/// Position of the failing effect within its notifier.
	pub index: usize,
	/// The error returned by the effect.
	#[source]
	pub source: BoxError,
}
