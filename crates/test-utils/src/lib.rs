//! Shared test fixtures: deterministic BLS validator sets, checkpoint
//! builders, and a channel-backed scanner stub.

mod scanner;
mod valset;

pub use scanner::{TestScanner, TestScannerHandles};
pub use valset::TestValSet;
