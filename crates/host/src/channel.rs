//! Channel-backed [`Transport`] feeding an outbound message pump.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::{BatchId, Error, RemoteCall, Result, Transport};


/// Reply sent back by the pump once an atomic batch was applied.
pub type AtomicReply = oneshot::Sender<std::result::Result<(), String>>;

/// Frame handed to the process pump that owns the host connection.
#[derive(Debug)]
pub enum Outbound {
	/// A single call to apply immediately.
	Call(RemoteCall),
	/// A batch the host must apply as one unit.
	Atomic {
		/// Batch identifier.
		id: BatchId,
		/// Calls in queue order.
		calls: Vec<RemoteCall>,
		/// Completion channel; dropping it reports the host as stopped.
		reply: AtomicReply,
	},
}

impl Outbound {
	/// Acknowledges an atomic batch and returns the carried calls.
	pub fn acknowledge(self) -> Vec<RemoteCall> {
		match self {
			Self::Call(call) => vec![call],
			Self::Atomic { calls, reply, .. } => {
				let _ = reply.send(Ok(()));
				calls
			}
		}
	}

	/// Rejects an atomic batch with a host-side error message.
	pub fn reject(self, message: impl Into<String>) {
		if let Self::Atomic { reply, .. } = self {
			let _ = reply.send(Err(message.into()));
		}
	}
}

/// Transport writing [`Outbound`] frames to an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
	tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelTransport {
	/// Creates a transport and the receiving end for the pump.
	pub fn new() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
		let (tx, rx) = mpsc::unbounded_channel();
		(Self { tx }, rx)
	}

	/// Creates a transport whose pump has already stopped.
	#[must_use]
	pub fn new_closed() -> Self {
		let (tx, _) = mpsc::unbounded_channel();
		Self { tx }
	}

	/// Returns true once the receiving pump is gone.
	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}
}

#[async_trait]
impl Transport for ChannelTransport {
	fn send(&self, call: RemoteCall) -> Result<()> {
		self.tx
			.send(Outbound::Call(call))
			.map_err(|_| Error::HostStopped)
	}

	async fn send_atomic(&self, id: BatchId, calls: Vec<RemoteCall>) -> Result<()> {
		let (reply, rx) = oneshot::channel();
		self.tx
			.send(Outbound::Atomic { id, calls, reply })
			.map_err(|_| Error::HostStopped)?;
		match rx.await {
			Ok(Ok(())) => Ok(()),
			Ok(Err(message)) => Err(Error::Remote(message)),
			Err(_) => Err(Error::HostStopped),
		}
	}
}
