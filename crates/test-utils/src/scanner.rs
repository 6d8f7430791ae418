//! A channel-backed scanner stub driven by test code.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use bitcoin::block::Header;
use sentinel_monitor::scanner::{EventStreams, Scanner};
use sentinel_primitives::checkpoint::CheckpointRecord;
use tokio::sync::mpsc;

/// Scanner stub: events pushed through the handles come out of the
/// monitor-facing streams, and lifecycle calls are counted.
pub struct TestScanner {
    streams: Option<EventStreams>,
    starts: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
}

/// Test-side handles for a [`TestScanner`].
pub struct TestScannerHandles {
    pub header_tx: mpsc::Sender<Header>,
    pub checkpoint_tx: mpsc::Sender<CheckpointRecord>,
    pub starts: Arc<AtomicUsize>,
    pub stops: Arc<AtomicUsize>,
}

impl TestScanner {
    pub fn new(buffer: usize) -> (Self, TestScannerHandles) {
        let (header_tx, headers) = mpsc::channel(buffer);
        let (checkpoint_tx, checkpoints) = mpsc::channel(buffer);
        let starts = Arc::new(AtomicUsize::new(0));
        let stops = Arc::new(AtomicUsize::new(0));

        let scanner = Self {
            streams: Some(EventStreams {
                headers,
                checkpoints,
            }),
            starts: starts.clone(),
            stops: stops.clone(),
        };
        let handles = TestScannerHandles {
            header_tx,
            checkpoint_tx,
            starts,
            stops,
        };
        (scanner, handles)
    }
}

#[async_trait]
impl Scanner for TestScanner {
    async fn start(&mut self) -> anyhow::Result<EventStreams> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.streams.take().context("scanner already started")
    }

    async fn stop(&mut self) -> anyhow::Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
