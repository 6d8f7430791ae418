//! Checkpoints as observed on either chain.

use serde::{Deserialize, Serialize};

use crate::buf::Buf32;

/// Length in bytes of a compressed aggregate BLS signature.
pub const BLS_SIG_LEN: usize = 48;

/// A signed assertion, for one epoch, of the anchor chain's ledger state.
///
/// Produced externally (by the anchor chain's checkpointing mechanism and
/// mirrored onto the proof-of-work chain); immutable once observed. The
/// signer bitmap refers to bit positions in the epoch's canonical roster
/// order, LSB first within each byte.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawCheckpoint {
    epoch_num: u64,
    last_commit_hash: Buf32,
    #[serde(with = "hex")]
    bitmap: Vec<u8>,
    #[serde(with = "hex")]
    bls_multi_sig: Vec<u8>,
}

impl RawCheckpoint {
    pub fn new(
        epoch_num: u64,
        last_commit_hash: Buf32,
        bitmap: Vec<u8>,
        bls_multi_sig: Vec<u8>,
    ) -> Self {
        Self {
            epoch_num,
            last_commit_hash,
            bitmap,
            bls_multi_sig,
        }
    }

    pub fn epoch_num(&self) -> u64 {
        self.epoch_num
    }

    pub fn last_commit_hash(&self) -> Buf32 {
        self.last_commit_hash
    }

    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    pub fn bls_multi_sig(&self) -> &[u8] {
        &self.bls_multi_sig
    }

    /// The canonical message validators sign for an epoch and commit hash:
    /// the epoch number in big-endian bytes followed by the hash.
    pub fn signing_payload(epoch_num: u64, commit_hash: &Buf32) -> Vec<u8> {
        let mut msg = epoch_num.to_be_bytes().to_vec();
        msg.extend_from_slice(commit_hash.as_slice());
        msg
    }

    /// The canonical signed message of this checkpoint.
    pub fn signed_msg(&self) -> Vec<u8> {
        Self::signing_payload(self.epoch_num, &self.last_commit_hash)
    }
}

/// A checkpoint paired with the proof-of-work chain height at which it was
/// first confirmed.
///
/// The scanner's checkpoint event payload, and the unit the liveness
/// checklist stores.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckpointRecord {
    checkpoint: RawCheckpoint,
    first_seen_height: u64,
}

impl CheckpointRecord {
    pub fn new(checkpoint: RawCheckpoint, first_seen_height: u64) -> Self {
        Self {
            checkpoint,
            first_seen_height,
        }
    }

    pub fn checkpoint(&self) -> &RawCheckpoint {
        &self.checkpoint
    }

    pub fn epoch_num(&self) -> u64 {
        self.checkpoint.epoch_num()
    }

    pub fn first_seen_height(&self) -> u64 {
        self.first_seen_height
    }
}
