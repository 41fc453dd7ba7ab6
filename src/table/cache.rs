use crate::models::node_stats::{NodeId, NodeStats};
use crate::table::provider::SnapshotProvider;
use crate::table::sorting::SortKey;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Local, sortable copy of the connected peers plus a row index by node id
#[derive(Debug, Default)]
pub struct PeerSnapshotCache {
    nodes: Vec<NodeStats>,
    rows_by_id: HashMap<NodeId, usize>,
    sort_key: Option<SortKey>,
}

impl PeerSnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull a full copy of the peer list from `provider`.
    ///
    /// Returns `false` without touching any state when the provider's list is
    /// busy. Otherwise the copy is sorted by the current key (if any), indexed,
    /// and swapped in as a whole.
    pub fn refresh<P: SnapshotProvider + ?Sized>(&mut self, provider: &P) -> bool {
        let Some(nodes) = provider.try_enumerate() else {
            debug!("Peer list busy, skipping refresh");
            return false;
        };

        self.install(nodes);
        trace!(peers = self.nodes.len(), "Peer snapshot refreshed");
        true
    }

    /// Re-sort the snapshot already held, without consulting any provider
    pub fn resort(&mut self) {
        let nodes = std::mem::take(&mut self.nodes);
        self.install(nodes);
    }

    fn install(&mut self, mut nodes: Vec<NodeStats>) {
        if let Some(key) = self.sort_key {
            key.sort(&mut nodes);
        }

        let rows_by_id = build_row_index(&nodes);
        self.nodes = nodes;
        self.rows_by_id = rows_by_id;
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stats at `row`, if the row exists
    pub fn index(&self, row: usize) -> Option<&NodeStats> {
        self.nodes.get(row)
    }

    pub fn row_by_node_id(&self, node_id: NodeId) -> Option<usize> {
        self.rows_by_id.get(&node_id).copied()
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    /// Takes effect on the next refresh or resort
    pub fn set_sort_key(&mut self, key: Option<SortKey>) {
        self.sort_key = key;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeStats> {
        self.nodes.iter()
    }
}

/// First occurrence of a node id wins
fn build_row_index(nodes: &[NodeStats]) -> HashMap<NodeId, usize> {
    let mut rows_by_id = HashMap::with_capacity(nodes.len());
    for (row, stats) in nodes.iter().enumerate() {
        rows_by_id.entry(stats.node_id).or_insert(row);
    }
    rows_by_id
}
