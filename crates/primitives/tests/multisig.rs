//! Aggregate-signature verification against real BLS keys.

use sentinel_primitives::buf::Buf32;
use sentinel_primitives::checkpoint::RawCheckpoint;
use sentinel_primitives::errors::MultiSigError;
use sentinel_test_utils::TestValSet;

#[test]
fn accepts_checkpoint_with_quorum() {
    let valset = TestValSet::generate(1, &[10, 10, 10, 10]);
    let ckpt = valset.signed_checkpoint(4, Buf32::new([0xaa; 32]), &[0, 1, 2]);
    valset.epoch_info(4).verify_multisig(&ckpt).unwrap();
}

#[test]
fn rejects_subset_below_quorum() {
    let valset = TestValSet::generate(1, &[10, 10, 10, 10]);
    // Two of four equal-power validators hold exactly half, not > 2/3.
    let ckpt = valset.signed_checkpoint(4, Buf32::new([0xaa; 32]), &[0, 1]);
    assert!(matches!(
        valset.epoch_info(4).verify_multisig(&ckpt),
        Err(MultiSigError::QuorumNotReached {
            subset_power: 20,
            total_power: 40,
        })
    ));
}

#[test]
fn exact_two_thirds_is_not_a_quorum() {
    let valset = TestValSet::generate(3, &[1, 1, 1]);
    // The quorum rule is strictly-greater-than: two of three unit-power
    // validators sit exactly on the two-thirds line.
    let ckpt = valset.signed_checkpoint(0, Buf32::new([0x33; 32]), &[0, 1]);
    assert!(matches!(
        valset.epoch_info(0).verify_multisig(&ckpt),
        Err(MultiSigError::QuorumNotReached {
            subset_power: 2,
            total_power: 3,
        })
    ));
}

#[test]
fn quorum_weighs_voting_power_not_headcount() {
    let valset = TestValSet::generate(2, &[70, 10, 10, 10]);
    // A single heavyweight signer clears the two-thirds bar alone.
    let heavy = valset
        .powers()
        .iter()
        .position(|&p| p == 70)
        .expect("fixture has a 70-power validator");
    let ckpt = valset.signed_checkpoint(0, Buf32::new([0x55; 32]), &[heavy]);
    valset.epoch_info(0).verify_multisig(&ckpt).unwrap();
}

#[test]
fn rejects_signature_over_different_message() {
    let valset = TestValSet::generate(1, &[10, 10, 10]);
    let signed = valset.signed_checkpoint(9, Buf32::new([0x01; 32]), &[0, 1, 2]);

    // Same signature, different asserted commit hash.
    let tampered = RawCheckpoint::new(
        9,
        Buf32::new([0x02; 32]),
        signed.bitmap().to_vec(),
        signed.bls_multi_sig().to_vec(),
    );
    assert!(matches!(
        valset.epoch_info(9).verify_multisig(&tampered),
        Err(MultiSigError::SignatureMismatch)
    ));
}

#[test]
fn rejects_bitmap_claiming_non_signers() {
    let valset = TestValSet::generate(1, &[10, 10, 10, 10]);
    let signed = valset.signed_checkpoint(2, Buf32::new([0x0f; 32]), &[0, 1, 2]);

    // Bitmap claims validator 3 signed instead of validator 2.
    let forged = RawCheckpoint::new(
        2,
        signed.last_commit_hash(),
        vec![0b0000_1011],
        signed.bls_multi_sig().to_vec(),
    );
    assert!(matches!(
        valset.epoch_info(2).verify_multisig(&forged),
        Err(MultiSigError::SignatureMismatch)
    ));
}

#[test]
fn rejects_garbage_signature_bytes() {
    let valset = TestValSet::generate(1, &[10, 10, 10]);
    let signed = valset.signed_checkpoint(5, Buf32::zero(), &[0, 1, 2]);

    let garbage = RawCheckpoint::new(5, Buf32::zero(), signed.bitmap().to_vec(), vec![0xff; 48]);
    assert!(matches!(
        valset.epoch_info(5).verify_multisig(&garbage),
        Err(MultiSigError::MalformedSignature(_))
    ));
}

#[test]
fn rejects_short_bitmap() {
    let valset = TestValSet::generate(1, &[10; 9]);
    let signed = valset.signed_checkpoint(1, Buf32::zero(), &[0, 1, 2, 3, 4, 5, 6]);

    let short = RawCheckpoint::new(
        1,
        Buf32::zero(),
        vec![0b0111_1111],
        signed.bls_multi_sig().to_vec(),
    );
    assert!(matches!(
        valset.epoch_info(1).verify_multisig(&short),
        Err(MultiSigError::BitmapTooShort { .. })
    ));
}
