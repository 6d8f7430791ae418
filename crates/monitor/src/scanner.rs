//! The confirmed-event source the monitor consumes.

use async_trait::async_trait;
use bitcoin::block::Header;
use sentinel_primitives::checkpoint::CheckpointRecord;
use tokio::sync::mpsc;

/// The two event streams a scanner hands over once started.
///
/// Only headers and checkpoints that have reached the scanner's own
/// confirmation depth are emitted, in observation order. The streams are
/// independent; no ordering holds between them.
#[derive(Debug)]
pub struct EventStreams {
    /// Confirmed proof-of-work block headers.
    pub headers: mpsc::Receiver<Header>,
    /// Confirmed checkpoint records.
    pub checkpoints: mpsc::Receiver<CheckpointRecord>,
}

/// A process that watches the proof-of-work chain and surfaces confirmed
/// headers and checkpoints.
///
/// Implementations live outside this crate; the monitor only drives their
/// lifecycle and drains the streams.
#[async_trait]
pub trait Scanner: Send + Sync + 'static {
    /// Starts the scanning process and hands over its event streams.
    async fn start(&mut self) -> anyhow::Result<EventStreams>;

    /// Stops the scanning process, returning once its shutdown has
    /// completed.
    async fn stop(&mut self) -> anyhow::Result<()>;
}
