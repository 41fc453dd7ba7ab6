use crate::models::node_stats::{NodeId, NodeStats};
use crate::table::provider::SnapshotProvider;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard, TryLockError};

/// Shared list of connected peers, in connection order
///
/// Stands in for the connection manager's peer list: network code mutates it
/// under the write lock while the table only ever takes a non-blocking read.
pub struct NodeList {
    nodes: RwLock<Vec<NodeStats>>,
}

impl NodeList {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(Vec::new()),
        }
    }

    pub fn with_nodes(nodes: Vec<NodeStats>) -> Self {
        Self {
            nodes: RwLock::new(nodes),
        }
    }

    /// Register a new connection
    /// If a connection with the same node_id exists, it is replaced in place
    pub fn connect(&self, stats: NodeStats) {
        let mut nodes = self.write();
        match nodes.iter_mut().find(|n| n.node_id == stats.node_id) {
            Some(existing) => *existing = stats,
            None => nodes.push(stats),
        }
    }

    /// Drop a connection, returning its last stats
    pub fn disconnect(&self, node_id: NodeId) -> Option<NodeStats> {
        let mut nodes = self.write();
        let position = nodes.iter().position(|n| n.node_id == node_id)?;
        Some(nodes.remove(position))
    }

    /// Record a new ping measurement; returns false for unknown nodes
    pub fn update_ping(&self, node_id: NodeId, ping_time: f64) -> bool {
        let mut nodes = self.write();
        match nodes.iter_mut().find(|n| n.node_id == node_id) {
            Some(node) => {
                node.ping_time = ping_time;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exclusive access to the list, held by the caller for as long as it needs
    pub fn write(&self) -> RwLockWriteGuard<'_, Vec<NodeStats>> {
        self.nodes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NodeList {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotProvider for NodeList {
    fn try_enumerate(&self) -> Option<Vec<NodeStats>> {
        let nodes = match self.nodes.try_read() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return None,
        };

        let mut snapshot = Vec::with_capacity(nodes.len());
        snapshot.extend(nodes.iter().cloned());
        Some(snapshot)
    }
}
