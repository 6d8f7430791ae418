//! Validator rosters and their canonical ordering.

use std::fmt;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{MultiSigError, ValSetError};

/// Length in bytes of a validator address.
pub const ADDRESS_LEN: usize = 20;

/// Length in bytes of a compressed BLS public key.
pub const BLS_PUBKEY_LEN: usize = 96;

/// A validator address: the raw 20-byte account identifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ValAddress([u8; ADDRESS_LEN]);

impl ValAddress {
    /// Parses a hex-encoded 20-byte address.
    pub fn parse(raw: &str) -> Result<Self, ValSetError> {
        let bytes = hex::decode(raw).map_err(|e| ValSetError::MalformedAddress {
            raw: raw.to_owned(),
            reason: e.to_string(),
        })?;
        let bytes: [u8; ADDRESS_LEN] =
            bytes
                .try_into()
                .map_err(|b: Vec<u8>| ValSetError::MalformedAddress {
                    raw: raw.to_owned(),
                    reason: format!("expected {ADDRESS_LEN} bytes, got {}", b.len()),
                })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for ValAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ValAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A roster entry as it appears in genesis files and anchor chain query
/// responses, before address parsing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawValidator {
    pub address: String,
    #[serde(with = "hex")]
    pub bls_pub_key: Vec<u8>,
    pub voting_power: u64,
}

/// A parsed roster entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidatorEntry {
    address: ValAddress,
    bls_pub_key: Vec<u8>,
    voting_power: u64,
}

impl ValidatorEntry {
    pub fn address(&self) -> &ValAddress {
        &self.address
    }

    pub fn bls_pub_key(&self) -> &[u8] {
        &self.bls_pub_key
    }

    pub fn voting_power(&self) -> u64 {
        self.voting_power
    }
}

/// The canonical, ordered validator set for one epoch.
///
/// Entries are sorted ascending by the big-endian unsigned numeric value
/// of the validator address; signer bitmaps refer to positions in this
/// order, so the ordering is load-bearing for signature verification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidatorSet {
    validators: Vec<ValidatorEntry>,
}

impl ValidatorSet {
    /// Parses and orders an unordered roster.
    ///
    /// Fails on the first unparseable address; roster inputs are
    /// pre-validated upstream, so a malformed address means corrupted data
    /// and the whole set is rejected. For fixed-width addresses the
    /// big-endian numeric order is plain byte order.
    pub fn canonicalize(raw: Vec<RawValidator>) -> Result<Self, ValSetError> {
        let mut validators = raw
            .into_iter()
            .map(|rv| {
                Ok(ValidatorEntry {
                    address: ValAddress::parse(&rv.address)?,
                    bls_pub_key: rv.bls_pub_key,
                    voting_power: rv.voting_power,
                })
            })
            .collect::<Result<Vec<_>, ValSetError>>()?;
        validators.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(Self { validators })
    }

    pub fn validators(&self) -> &[ValidatorEntry] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Sum of all voting power in the set.
    pub fn total_power(&self) -> u64 {
        self.validators.iter().map(|v| v.voting_power).sum()
    }

    /// Selects the entries flagged by `bitmap` (LSB first within each
    /// byte, positions in canonical order) together with their combined
    /// voting power.
    ///
    /// The bitmap must cover the whole set; bits beyond the set size are
    /// ignored.
    pub fn subset_from_bitmap(
        &self,
        bitmap: &[u8],
    ) -> Result<(Vec<&ValidatorEntry>, u64), MultiSigError> {
        let bits = bitmap.view_bits::<Lsb0>();
        if bits.len() < self.validators.len() {
            return Err(MultiSigError::BitmapTooShort {
                bits: bits.len(),
                validators: self.validators.len(),
            });
        }

        let mut subset = Vec::new();
        let mut power = 0u64;
        for (validator, bit) in self.validators.iter().zip(bits.iter()) {
            if *bit {
                subset.push(validator);
                power += validator.voting_power;
            }
        }
        Ok((subset, power))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(addr_byte: u8, power: u64) -> RawValidator {
        RawValidator {
            address: hex::encode([addr_byte; ADDRESS_LEN]),
            bls_pub_key: vec![addr_byte; BLS_PUBKEY_LEN],
            voting_power: power,
        }
    }

    #[test]
    fn canonicalize_sorts_ascending_by_address_value() {
        let set =
            ValidatorSet::canonicalize(vec![raw(0x30, 1), raw(0x10, 2), raw(0x20, 3)]).unwrap();

        let addrs: Vec<_> = set.validators().iter().map(|v| *v.address()).collect();
        for pair in addrs.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(set.validators()[0].voting_power(), 2);
        assert_eq!(set.validators()[2].voting_power(), 1);
    }

    #[test]
    fn canonicalize_is_deterministic_and_idempotent() {
        let input = vec![raw(0x05, 1), raw(0x01, 1), raw(0x03, 1)];
        let once = ValidatorSet::canonicalize(input.clone()).unwrap();
        let twice = ValidatorSet::canonicalize(input).unwrap();
        assert_eq!(once, twice);

        // Re-canonicalizing the already-sorted roster changes nothing.
        let sorted_raw: Vec<_> = once
            .validators()
            .iter()
            .map(|v| RawValidator {
                address: v.address().to_string(),
                bls_pub_key: v.bls_pub_key().to_vec(),
                voting_power: v.voting_power(),
            })
            .collect();
        assert_eq!(ValidatorSet::canonicalize(sorted_raw).unwrap(), once);
    }

    #[test]
    fn malformed_address_rejects_whole_set() {
        let mut input = vec![raw(0x01, 1)];
        input.push(RawValidator {
            address: "zz".to_owned(),
            bls_pub_key: vec![],
            voting_power: 1,
        });
        assert!(matches!(
            ValidatorSet::canonicalize(input),
            Err(ValSetError::MalformedAddress { .. })
        ));

        // Valid hex of the wrong width is just as fatal.
        let short = vec![RawValidator {
            address: "abcd".to_owned(),
            bls_pub_key: vec![],
            voting_power: 1,
        }];
        assert!(matches!(
            ValidatorSet::canonicalize(short),
            Err(ValSetError::MalformedAddress { .. })
        ));
    }

    #[test]
    fn bitmap_selects_subset_and_sums_power() {
        let set = ValidatorSet::canonicalize(vec![
            raw(0x01, 10),
            raw(0x02, 20),
            raw(0x03, 30),
            raw(0x04, 40),
        ])
        .unwrap();
        assert_eq!(set.total_power(), 100);

        let (subset, power) = set.subset_from_bitmap(&[0b0000_0101]).unwrap();
        assert_eq!(power, 40);
        assert_eq!(subset.len(), 2);
        assert_eq!(subset[0].voting_power(), 10);
        assert_eq!(subset[1].voting_power(), 30);
    }

    #[test]
    fn bitmap_must_cover_the_set() {
        let entries: Vec<_> = (1..=9).map(|i| raw(i, 1)).collect();
        let set = ValidatorSet::canonicalize(entries).unwrap();

        // One byte only covers 8 of the 9 validators.
        assert!(matches!(
            set.subset_from_bitmap(&[0xff]),
            Err(MultiSigError::BitmapTooShort { .. })
        ));
        assert!(set.subset_from_bitmap(&[0xff, 0x01]).is_ok());
    }

    #[test]
    fn bitmap_bits_beyond_set_are_ignored() {
        let set = ValidatorSet::canonicalize(vec![raw(0x01, 1), raw(0x02, 1)]).unwrap();
        let (subset, power) = set.subset_from_bitmap(&[0b1111_1111]).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(power, 2);
    }
}
