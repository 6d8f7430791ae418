//! Error types for roster construction and multisignature checks.

use thiserror::Error;

/// Failure while canonicalizing a validator set.
///
/// Roster inputs come from pre-validated sources (genesis data or anchor
/// chain query responses), so these are treated as corruption: the caller
/// aborts construction instead of skipping entries.
#[derive(Debug, Error)]
pub enum ValSetError {
    #[error("malformed validator address `{raw}`: {reason}")]
    MalformedAddress { raw: String, reason: String },
}

/// Failure while checking an aggregate checkpoint signature.
#[derive(Debug, Error)]
pub enum MultiSigError {
    #[error("signer bitmap has {bits} bits, validator set has {validators} entries")]
    BitmapTooShort { bits: usize, validators: usize },

    #[error(
        "signers hold {subset_power} of {total_power} voting power, short of a two-thirds quorum"
    )]
    QuorumNotReached { subset_power: u64, total_power: u64 },

    #[error("malformed aggregate signature: {0}")]
    MalformedSignature(String),

    #[error("malformed BLS public key in signer subset: {0}")]
    MalformedPublicKey(String),

    #[error("aggregate signature does not verify against the signer subset")]
    SignatureMismatch,
}

/// Failure while loading genesis data.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("reading genesis file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing genesis file: {0}")]
    Parse(#[from] serde_json::Error),
}
