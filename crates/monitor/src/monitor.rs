//! The verification engine: event loop, two-stage checkpoint
//! verification, and epoch tracking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use bitcoin::block::Header;
use parking_lot::RwLock;
use sentinel_primitives::checkpoint::{CheckpointRecord, RawCheckpoint};
use sentinel_primitives::epoch::EpochInfo;
use sentinel_primitives::errors::ValSetError;
use sentinel_primitives::genesis::GenesisInfo;
use tokio::sync::Mutex;
use tracing::*;

use crate::bookkeeper::CheckpointsBookkeeper;
use crate::config::MonitorConfig;
use crate::errors::MonitorError;
use crate::querier::Querier;
use crate::scanner::{EventStreams, Scanner};
use crate::shutdown::ShutdownSignal;

/// The verification core.
///
/// Owns the current epoch context and the checkpoint checklist, drains the
/// scanner's confirmed-event streams one event at a time and cross-checks
/// every observed checkpoint against the anchor chain.
///
/// Lifecycle: constructed idle, [`run`](Self::run) drives the event loop
/// until [`stop`](Self::stop) is called or the scanner drops its streams;
/// once stopped the monitor is done and cannot be restarted.
pub struct Monitor<S, Q> {
    config: MonitorConfig,

    scanner: Mutex<S>,
    querier: Q,

    /// Verification context for the epoch the monitor currently expects on
    /// the proof-of-work chain. Replaced wholesale on epoch advance, and
    /// only from the event loop; readers grab the `Arc` and drop the lock.
    cur_epoch: RwLock<Arc<EpochInfo>>,

    /// Checkpoints pending liveness resolution.
    checklist: Arc<CheckpointsBookkeeper>,

    /// Set once the event loop has been claimed. The only lifecycle state
    /// shared between the loop and outside callers.
    started: AtomicBool,
    shutdown: ShutdownSignal,
    stopped: ShutdownSignal,
}

impl<S: Scanner, Q: Querier> Monitor<S, Q> {
    /// Creates the monitor, building the epoch-0 verification context from
    /// the genesis roster.
    ///
    /// Fails if the roster cannot be canonicalized; genesis data is
    /// validated upstream, so that means corrupted input and startup must
    /// abort.
    pub fn new(
        config: MonitorConfig,
        genesis: GenesisInfo,
        scanner: S,
        querier: Q,
    ) -> Result<Self, ValSetError> {
        let genesis_epoch = genesis.into_epoch_info()?;
        Ok(Self {
            config,
            scanner: Mutex::new(scanner),
            querier,
            cur_epoch: RwLock::new(Arc::new(genesis_epoch)),
            checklist: Arc::new(CheckpointsBookkeeper::new()),
            started: AtomicBool::new(false),
            shutdown: ShutdownSignal::new(),
            stopped: ShutdownSignal::new(),
        })
    }

    /// The epoch number the monitor currently expects checkpoints for.
    pub fn current_epoch(&self) -> u64 {
        self.cur_epoch.read().epoch_num()
    }

    /// Shared read handle to the checklist, for the liveness checker.
    pub fn checklist(&self) -> Arc<CheckpointsBookkeeper> {
        self.checklist.clone()
    }

    /// Starts the scanner and drives the event loop until stopped.
    ///
    /// Idempotent: a second call while the loop is running (or after it
    /// has stopped) returns immediately without starting anything twice.
    pub async fn run(&self) -> anyhow::Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            info!("monitor already started");
            return Ok(());
        }

        let streams = match self.scanner.lock().await.start().await {
            Ok(streams) => streams,
            Err(e) => {
                self.stopped.send();
                return Err(e.context("failed to start scanner"));
            }
        };
        info!(epoch = %self.current_epoch(), "monitor started");

        self.event_loop(streams).await;

        self.stopped.send();
        debug!("event loop exited");
        Ok(())
    }

    /// Signals the event loop to stop and returns once it has exited and
    /// the scanner's own shutdown has completed. No event is processed
    /// after this returns. A no-op if the monitor was never started.
    pub async fn stop(&self) -> anyhow::Result<()> {
        if !self.started.load(Ordering::SeqCst) {
            return Ok(());
        }

        info!("monitor stopping");
        self.shutdown.send();
        self.stopped.wait().await;
        self.scanner
            .lock()
            .await
            .stop()
            .await
            .context("failed to stop scanner")?;
        info!("monitor stopped");
        Ok(())
    }

    /// Processes exactly one event to completion per iteration; shutdown
    /// is only observed between iterations.
    async fn event_loop(&self, mut streams: EventStreams) {
        loop {
            tokio::select! {
                _ = self.shutdown.wait() => {
                    info!("shutdown signal received");
                    break;
                }
                maybe_header = streams.headers.recv() => {
                    let Some(header) = maybe_header else {
                        warn!("header stream closed, stopping");
                        break;
                    };
                    if let Err(e) = self.handle_new_confirmed_header(&header).await {
                        error!(err = %e, "failed to handle confirmed header");
                    }
                }
                maybe_record = streams.checkpoints.recv() => {
                    let Some(record) = maybe_record else {
                        warn!("checkpoint stream closed, stopping");
                        break;
                    };
                    let epoch = record.epoch_num();
                    if let Err(e) = self.handle_new_confirmed_checkpoint(record).await {
                        error!(%epoch, err = %e, "failed to handle confirmed checkpoint");
                    }
                }
            }
        }
    }

    /// Cross-checks one confirmed checkpoint and advances the epoch on
    /// success.
    ///
    /// Skippable verification failures are reported here and absorbed so
    /// the same epoch is retried on the next checkpoint. A commit-hash
    /// divergence is surfaced to the caller as the fork signal, after
    /// being recorded for the liveness checker.
    async fn handle_new_confirmed_checkpoint(
        &self,
        record: CheckpointRecord,
    ) -> Result<(), MonitorError> {
        if let Err(err) = self.verify_checkpoint(record.checkpoint()).await {
            if matches!(err, MonitorError::InconsistentCommitHash { .. }) {
                // A conflicting checkpoint is still recorded: if it gets
                // censored, the liveness checker must still raise an
                // alarm for it.
                if self.config.enable_liveness_checker {
                    self.checklist.add(record);
                }
                return Err(err);
            }
            warn!(epoch = %self.current_epoch(), err = %err, "invalid checkpoint observed");
            return Ok(());
        }

        if self.config.enable_liveness_checker {
            self.checklist.add(record);
        }

        info!(epoch = %self.current_epoch(), "checkpoint passed verification");

        let next_epoch = self.current_epoch() + 1;
        self.update_epoch_info(next_epoch).await?;

        Ok(())
    }

    /// Checks that the anchor chain's light client recognizes a confirmed
    /// proof-of-work header. Pure consistency check, no state change.
    async fn handle_new_confirmed_header(&self, header: &Header) -> Result<(), MonitorError> {
        let hash = header.block_hash();
        if !self.querier.contains_header(&hash).await? {
            return Err(MonitorError::HeaderNotRecognized(hash));
        }
        Ok(())
    }

    /// Runs the two-stage verification protocol for a checkpoint observed
    /// on the proof-of-work chain.
    ///
    /// The candidate must be for the tracked epoch and well signed; the
    /// anchor chain's own copy for that epoch must be well signed too,
    /// otherwise the final consistency comparison proves nothing. Two
    /// individually valid copies with diverging commit hashes are the fork
    /// signal.
    pub async fn verify_checkpoint(&self, candidate: &RawCheckpoint) -> Result<(), MonitorError> {
        let cur_epoch = self.cur_epoch.read().clone();
        let expected = cur_epoch.epoch_num();

        if candidate.epoch_num() != expected {
            return Err(MonitorError::InvalidEpochNumber {
                expected,
                found: candidate.epoch_num(),
            });
        }

        cur_epoch
            .verify_multisig(candidate)
            .map_err(|source| MonitorError::InvalidSignature {
                epoch: expected,
                source,
            })?;

        let anchor_ckpt = self.querier.query_raw_checkpoint(expected).await?;

        cur_epoch
            .verify_multisig(&anchor_ckpt)
            .map_err(|source| MonitorError::InvalidSignature {
                epoch: expected,
                source,
            })?;

        if anchor_ckpt.last_commit_hash() != candidate.last_commit_hash() {
            return Err(MonitorError::InconsistentCommitHash {
                epoch: expected,
                anchor: anchor_ckpt.last_commit_hash(),
                observed: candidate.last_commit_hash(),
            });
        }

        Ok(())
    }

    /// Replaces the current epoch context with the queried info for
    /// `epoch`. On failure the current context is left untouched, so the
    /// same epoch is retried on the next checkpoint.
    pub async fn update_epoch_info(&self, epoch: u64) -> Result<(), MonitorError> {
        let info = self.querier.query_info_for_next_epoch(epoch).await?;
        *self.cur_epoch.write() = Arc::new(info);
        debug!(%epoch, "tracking new epoch");
        Ok(())
    }
}

