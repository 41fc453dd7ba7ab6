use crate::models::node_stats::NodeStats;

/// Source of peer statistics for the table
///
/// Implementations must never block: when the underlying peer list is busy
/// they return `None` and the caller skips that refresh.
pub trait SnapshotProvider: Send + Sync {
    fn try_enumerate(&self) -> Option<Vec<NodeStats>>;
}
