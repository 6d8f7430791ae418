//! Cross-chain checkpoint verification engine.
//!
//! Consumes confirmed headers and checkpoints surfaced from the
//! proof-of-work chain and verifies each checkpoint against the anchor
//! chain that issued it: a two-stage aggregate-signature check followed
//! by a ledger-state consistency comparison. Verified and diverging
//! checkpoints are recorded so a liveness checker can alarm on
//! checkpoints that never resolve.

pub mod bookkeeper;
pub mod config;
pub mod errors;
pub mod monitor;
pub mod querier;
pub mod scanner;
mod shutdown;

pub use monitor::Monitor;
