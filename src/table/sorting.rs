use crate::models::column::{Column, SortOrder};
use crate::models::node_stats::NodeStats;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Column and direction the table is sorted by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: Column,
    pub order: SortOrder,
}

impl SortKey {
    pub fn new(column: Column, order: SortOrder) -> Self {
        Self { column, order }
    }

    /// Compare two rows under this key.
    /// Descending swaps the operands, the per-column comparison stays the same.
    pub fn compare(&self, left: &NodeStats, right: &NodeStats) -> Ordering {
        let (left, right) = match self.order {
            SortOrder::Ascending => (left, right),
            SortOrder::Descending => (right, left),
        };

        match self.column {
            Column::Address => left.addr_name.cmp(&right.addr_name),
            Column::Subversion => left.clean_sub_ver.cmp(&right.clean_sub_ver),
            // +0.0 folds -0.0 into 0.0 so equal pings stay in place
            Column::Ping => (left.ping_time + 0.0).total_cmp(&(right.ping_time + 0.0)),
        }
    }

    /// Stable in-place sort; equal keys keep their previous relative order
    pub fn sort(&self, nodes: &mut [NodeStats]) {
        nodes.sort_by(|a, b| self.compare(a, b));
    }
}
