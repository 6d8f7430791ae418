//! Core data types for the sentinel checkpoint monitor: observed
//! checkpoints, validator rosters, per-epoch verification contexts, and
//! the BLS aggregate-signature primitive they delegate to.

pub mod bls;
pub mod buf;
pub mod checkpoint;
pub mod epoch;
pub mod errors;
pub mod genesis;
pub mod valset;
