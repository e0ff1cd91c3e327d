//! Deferred host notifications, coalesced into one round trip.
//!
//! Call sites that may or may not have a UI update to perform hand back a
//! [`NotifierCell`]: a ready [`Notifier`], nothing, or a future computing one.
//! [`run_all`] resolves every cell, opens a single batching window on the
//! host, triggers each notifier inside it, and closes the window so the host
//! applies the queued calls as one atomic flush.
//!
//! ## Concurrent windows
//!
//! The window is an implicit lock on the host with the scope of one
//! `run_all`. [`Batcher`] serializes the windows it opens unless configured
//! with [`WindowPolicy::Nested`], which is only sound against a host that
//! reference-counts pauses (such as [`coalesce_host::QueuedHost`]). The free
//! [`run_all`] never serializes; callers sharing a host across tasks should go
//! through one `Batcher`.

#![warn(missing_docs)]

mod batch;
mod batcher;
mod cell;
mod config;
mod error;
mod notifier;
mod window;

#[cfg(test)]
mod mock;

pub use batch::run_all;
pub use batcher::Batcher;
pub use cell::NotifierCell;
pub use coalesce_host::FlushReport;
pub use config::{BatchConfig, WindowPolicy};
pub use error::{BoxError, Error, Result};
pub use notifier::{Effect, Notifier, NotifyError, combine};
pub use window::BatchWindow;
