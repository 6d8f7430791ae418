//! Per-epoch verification context.

use crate::bls;
use crate::checkpoint::RawCheckpoint;
use crate::errors::MultiSigError;
use crate::valset::ValidatorSet;

/// The verification context for a single epoch: its number and the
/// canonical validator set authoritative for it.
///
/// Built once per epoch (from genesis data for epoch 0, from an anchor
/// chain query afterwards) and replaced wholesale on epoch advance, never
/// mutated in place.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EpochInfo {
    epoch_num: u64,
    valset: ValidatorSet,
}

impl EpochInfo {
    pub fn new(epoch_num: u64, valset: ValidatorSet) -> Self {
        Self { epoch_num, valset }
    }

    pub fn epoch_num(&self) -> u64 {
        self.epoch_num
    }

    pub fn valset(&self) -> &ValidatorSet {
        &self.valset
    }

    /// Checks a checkpoint's aggregate signature against this epoch's
    /// roster.
    ///
    /// The signer subset is read from the checkpoint bitmap in canonical
    /// roster order and must hold more than two thirds of the total voting
    /// power; the aggregate signature must then verify over the canonical
    /// signed message.
    pub fn verify_multisig(&self, ckpt: &RawCheckpoint) -> Result<(), MultiSigError> {
        let (subset, subset_power) = self.valset.subset_from_bitmap(ckpt.bitmap())?;

        let total_power = self.valset.total_power();
        if (subset_power as u128) * 3 <= (total_power as u128) * 2 {
            return Err(MultiSigError::QuorumNotReached {
                subset_power,
                total_power,
            });
        }

        let pubkeys: Vec<&[u8]> = subset.iter().map(|v| v.bls_pub_key()).collect();
        bls::verify_aggregate(ckpt.bls_multi_sig(), &pubkeys, &ckpt.signed_msg())
    }
}

