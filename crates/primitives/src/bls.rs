//! Aggregate BLS signature verification.
//!
//! BLS12-381 in the minimal-signature-size configuration: signatures are
//! 48-byte compressed G1 points, public keys 96-byte compressed G2 points.

use blst::min_sig::{AggregatePublicKey, Signature};
use blst::BLST_ERROR;

use crate::errors::MultiSigError;

/// Domain separation tag for signatures on G1.
pub const BLS_DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// Verifies `sig_bytes` as an aggregate signature over `msg` by all of the
/// given serialized public keys.
pub fn verify_aggregate(
    sig_bytes: &[u8],
    pubkeys: &[&[u8]],
    msg: &[u8],
) -> Result<(), MultiSigError> {
    let sig = Signature::from_bytes(sig_bytes)
        .map_err(|e| MultiSigError::MalformedSignature(format!("{e:?}")))?;

    let agg_pk = AggregatePublicKey::aggregate_serialized(pubkeys, true)
        .map_err(|e| MultiSigError::MalformedPublicKey(format!("{e:?}")))?;

    match sig.fast_aggregate_verify_pre_aggregated(true, msg, BLS_DST, &agg_pk.to_public_key()) {
        BLST_ERROR::BLST_SUCCESS => Ok(()),
        _ => Err(MultiSigError::SignatureMismatch),
    }
}
