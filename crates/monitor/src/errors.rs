//! Failure taxonomy for header and checkpoint verification.

use bitcoin::BlockHash;
use sentinel_primitives::buf::Buf32;
use sentinel_primitives::errors::MultiSigError;
use thiserror::Error;

/// Transport-level failure from the anchor chain client.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request never completed (connection, timeout, protocol).
    #[error("transport: {0}")]
    Transport(String),

    /// The anchor chain answered, but without the data we asked for.
    #[error("missing data: {0}")]
    MissingData(String),
}

/// A failure while processing one header or checkpoint event.
///
/// Every variant is local to the event that produced it: the event loop
/// reports it and moves on. Query failures leave the current epoch
/// untouched, so the same epoch is retried on the next event.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The checkpoint is not for the epoch the monitor currently tracks.
    /// Out-of-order and duplicate epochs are rejected, never buffered.
    #[error("checkpoint carries epoch {found}, expected epoch {expected}")]
    InvalidEpochNumber { expected: u64, found: u64 },

    /// One of the two checkpoint copies fails the multisignature check.
    #[error("invalid checkpoint multisignature at epoch {epoch}: {source}")]
    InvalidSignature {
        epoch: u64,
        #[source]
        source: MultiSigError,
    },

    /// Both copies are individually well signed but assert different
    /// ledger states: the fork/censorship signal.
    #[error(
        "commit hash diverges at epoch {epoch}: anchor chain has {anchor}, observed {observed}"
    )]
    InconsistentCommitHash {
        epoch: u64,
        anchor: Buf32,
        observed: Buf32,
    },

    /// The anchor chain could not be queried.
    #[error("anchor chain query failed: {0}")]
    Query(#[from] QueryError),

    /// The anchor chain's Bitcoin light client does not know the header.
    #[error("header {0} is not recognized by the anchor chain light client")]
    HeaderNotRecognized(BlockHash),
}
