//! Host connection contract for batched editor notifications.
//!
//! An editor host charges one round trip per remote call. Hosts that support
//! an explicit pause/resume pairing queue every call made between the two and
//! apply the queue as one atomic flush on resume. This crate provides:
//! * [`HostConnection`]: the contract the notifier core drives
//! * [`QueuedHost`]: a reference-counted batching host over any [`Transport`]
//! * [`ChannelTransport`]: a transport writing [`Outbound`] frames to a channel
//! * [`RemoteCall`], [`BatchId`], [`FlushReport`]: the values crossing the seam

#![warn(missing_docs)]

pub mod call;
pub mod channel;
pub mod connection;
pub mod error;
pub mod queue;

pub use call::{BatchId, CounterIdGen, FlushReport, RemoteCall};
pub use channel::{ChannelTransport, Outbound};
pub use connection::{HostConnection, Transport};
pub use error::{Error, Result};
pub use queue::{HostStats, QueuedHost};
