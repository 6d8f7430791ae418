//! Deterministic validator-set fixtures with real BLS keys.

use blst::min_sig::{AggregateSignature, SecretKey, Signature};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sentinel_primitives::bls::BLS_DST;
use sentinel_primitives::buf::Buf32;
use sentinel_primitives::checkpoint::RawCheckpoint;
use sentinel_primitives::epoch::EpochInfo;
use sentinel_primitives::genesis::GenesisInfo;
use sentinel_primitives::valset::{RawValidator, ValidatorSet, ADDRESS_LEN};

struct TestValidator {
    sk: SecretKey,
    address: [u8; ADDRESS_LEN],
    voting_power: u64,
}

impl TestValidator {
    fn raw(&self) -> RawValidator {
        RawValidator {
            address: hex::encode(self.address),
            bls_pub_key: self.sk.sk_to_pk().to_bytes().to_vec(),
            voting_power: self.voting_power,
        }
    }
}

/// A reproducible validator set, held in canonical (address) order so
/// subset indices line up with signer bitmap positions.
pub struct TestValSet {
    validators: Vec<TestValidator>,
}

impl TestValSet {
    /// Generates one validator per entry of `powers`, keyed from `seed`,
    /// and sorts them into canonical order.
    pub fn generate(seed: u64, powers: &[u64]) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut validators: Vec<TestValidator> = powers
            .iter()
            .map(|&voting_power| {
                let mut ikm = [0u8; 32];
                rng.fill_bytes(&mut ikm);
                let sk = SecretKey::key_gen(&ikm, &[]).expect("ikm is long enough");
                let mut address = [0u8; ADDRESS_LEN];
                rng.fill_bytes(&mut address);
                TestValidator {
                    sk,
                    address,
                    voting_power,
                }
            })
            .collect();
        validators.sort_by(|a, b| a.address.cmp(&b.address));
        Self { validators }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Voting powers in canonical order.
    pub fn powers(&self) -> Vec<u64> {
        self.validators.iter().map(|v| v.voting_power).collect()
    }

    /// The roster in canonical order, in its unparsed form.
    pub fn raw_validators(&self) -> Vec<RawValidator> {
        self.validators.iter().map(TestValidator::raw).collect()
    }

    pub fn genesis(&self) -> GenesisInfo {
        GenesisInfo::new(self.raw_validators())
    }

    pub fn valset(&self) -> ValidatorSet {
        ValidatorSet::canonicalize(self.raw_validators()).expect("fixture addresses are valid hex")
    }

    pub fn epoch_info(&self, epoch_num: u64) -> EpochInfo {
        EpochInfo::new(epoch_num, self.valset())
    }

    /// Builds a checkpoint for `epoch_num` and `commit_hash`, signed by
    /// the validators at the given canonical positions.
    pub fn signed_checkpoint(
        &self,
        epoch_num: u64,
        commit_hash: Buf32,
        signers: &[usize],
    ) -> RawCheckpoint {
        let msg = RawCheckpoint::signing_payload(epoch_num, &commit_hash);

        let mut bitmap = vec![0u8; self.validators.len().div_ceil(8)];
        for &idx in signers {
            bitmap[idx / 8] |= 1 << (idx % 8);
        }

        let sigs: Vec<Signature> = signers
            .iter()
            .map(|&idx| self.validators[idx].sk.sign(&msg, BLS_DST, &[]))
            .collect();
        let sig_refs: Vec<&Signature> = sigs.iter().collect();
        let agg = AggregateSignature::aggregate(&sig_refs, true)
            .expect("fixture signatures are valid");

        RawCheckpoint::new(
            epoch_num,
            commit_hash,
            bitmap,
            agg.to_signature().to_bytes().to_vec(),
        )
    }
}
