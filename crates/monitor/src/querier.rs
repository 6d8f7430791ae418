//! Read access to the anchor chain.

use async_trait::async_trait;
use bitcoin::BlockHash;
use sentinel_primitives::checkpoint::RawCheckpoint;
use sentinel_primitives::epoch::EpochInfo;

use crate::errors::QueryError;

/// Client-side view of the anchor chain.
///
/// Implementations are expected to build `EpochInfo` responses through
/// `ValidatorSet::canonicalize` and to apply their own timeout policy to
/// every call; the monitor treats each call as bounded.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait Querier: Send + Sync + 'static {
    /// The anchor chain's own checkpoint for `epoch`.
    async fn query_raw_checkpoint(&self, epoch: u64) -> Result<RawCheckpoint, QueryError>;

    /// Epoch metadata, validator roster included, for `epoch`.
    async fn query_info_for_next_epoch(&self, epoch: u64) -> Result<EpochInfo, QueryError>;

    /// Whether the anchor chain's Bitcoin light client contains `hash`.
    async fn contains_header(&self, hash: &BlockHash) -> Result<bool, QueryError>;
}
