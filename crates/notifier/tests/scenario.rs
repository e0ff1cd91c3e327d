//! Independent call sites contributing to one host flush.

use std::sync::Arc;

use coalesce_host::{ChannelTransport, HostConnection, Outbound, QueuedHost, RemoteCall};
use coalesce_notifier::{BatchConfig, Batcher, Notifier, NotifierCell, run_all};
use futures::FutureExt;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

type Host = QueuedHost<ChannelTransport>;
type Log = Arc<Mutex<Vec<&'static str>>>;

fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter("coalesce_notifier=trace,coalesce_host=trace")
		.with_test_writer()
		.try_init();
}

fn host() -> (Arc<Host>, UnboundedReceiver<Outbound>) {
	let (transport, rx) = ChannelTransport::new();
	(Arc::new(QueuedHost::new(transport)), rx)
}

fn update(host: &Arc<Host>, log: &Log, name: &'static str, args: serde_json::Value) -> Notifier {
	let host = Arc::clone(host);
	let log = Arc::clone(log);
	Notifier::create(move || {
		log.lock().push(name);
		host.notify(RemoteCall::with_args(name, args.clone())?)?;
		Ok(())
	})
}

/// Acknowledges `batches` atomic flushes and returns every call received.
async fn pump(rx: &mut UnboundedReceiver<Outbound>, batches: usize) -> Vec<Vec<String>> {
	let mut received = Vec::new();
	while received.len() < batches {
		let frame = rx.recv().await.expect("host transport closed early");
		let atomic = matches!(frame, Outbound::Atomic { .. });
		let methods = frame.acknowledge().into_iter().map(|call| call.method).collect();
		if atomic {
			received.push(methods);
		}
	}
	received
}

#[tokio::test]
async fn three_call_sites_share_one_flush() {
	init_tracing();
	let (host, mut rx) = host();
	let log: Log = Arc::default();

	// Constructed out of order on purpose; only the order handed to run_all matters.
	let buffer = update(&host, &log, "buffer", json!([1, ["hello"]]));
	let highlight = update(&host, &log, "highlight", json!(["Search", 3]));
	let cursor = update(&host, &log, "cursor", json!([0, [3, 4]]));

	let (report, batches) = tokio::join!(run_all(&*host, [cursor, highlight, buffer]), pump(&mut rx, 1));
	let report = report.unwrap();

	assert_eq!(*log.lock(), vec!["cursor", "highlight", "buffer"]);
	assert_eq!(batches, vec![vec!["cursor", "highlight", "buffer"]]);
	assert_eq!(report.flushed, 3);
	let stats = host.stats();
	assert_eq!((stats.pauses, stats.resumes, stats.flushes), (1, 1, 1));
	assert!(!host.is_paused());
}

#[tokio::test]
async fn deferred_call_sites_join_the_same_window() {
	init_tracing();
	let (host, mut rx) = host();
	let log: Log = Arc::default();
	let highlight = update(&host, &log, "highlight", json!([]));
	let cells = vec![
		NotifierCell::from(update(&host, &log, "cursor", json!([]))),
		NotifierCell::deferred(async { Ok(None) }),
		NotifierCell::deferred(async move {
			tokio::task::yield_now().await;
			Ok(Some(highlight))
		}),
	];

	let batcher = Batcher::new(host.clone(), BatchConfig::default());
	let (report, batches) = tokio::join!(batcher.run_all(cells), pump(&mut rx, 1));

	assert_eq!(report.unwrap().flushed, 2);
	assert_eq!(batches, vec![vec!["cursor", "highlight"]]);
	assert_eq!(host.stats().flushes, 1);
}

#[tokio::test]
async fn failing_update_still_flushes_the_queued_prefix() {
	init_tracing();
	let (host, mut rx) = host();
	let log: Log = Arc::default();
	let failing = Notifier::create(|| anyhow::bail!("window closed"));
	let cells = [update(&host, &log, "cursor", json!([])), failing];

	let (result, batches) = tokio::join!(run_all(&*host, cells), pump(&mut rx, 1));

	assert!(result.is_err());
	assert_eq!(batches, vec![vec!["cursor"]]);
	assert!(!host.is_paused());
}

#[tokio::test]
async fn stopped_host_surfaces_after_window_closes() {
	init_tracing();
	let host = Arc::new(QueuedHost::new(ChannelTransport::new_closed()));
	let log: Log = Arc::default();

	let err = update(&host, &log, "cursor", json!([])).run(&*host).await.unwrap_err();

	assert!(matches!(err, coalesce_notifier::Error::Host(coalesce_host::Error::HostStopped)));
	assert!(!host.is_paused());
}

#[tokio::test]
async fn dropping_run_all_mid_flush_releases_the_window() {
	init_tracing();
	let (host, mut rx) = host();
	let log: Log = Arc::default();

	// No pump is running, so the flush never completes and the future is dropped.
	let pending = run_all(&*host, [update(&host, &log, "cursor", json!([]))]).now_or_never();

	assert!(pending.is_none());
	assert!(!host.is_paused());
	assert_eq!(host.queued(), 0);
	assert_eq!(*log.lock(), vec!["cursor"]);
	match rx.recv().await {
		Some(Outbound::Atomic { calls, .. }) => assert_eq!(calls, vec![RemoteCall::new("cursor", Vec::new())]),
		other => panic!("expected the atomic flush frame, got {other:?}"),
	}
}
