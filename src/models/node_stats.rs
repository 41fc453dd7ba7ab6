use serde::{Deserialize, Serialize};

/// Identifier the connection manager assigns to a connection
pub type NodeId = i64;

/// Statistics for one connected peer, as copied out of the connection manager
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    /// Stable for the lifetime of the connection
    pub node_id: NodeId,
    /// Address as shown to the user (host:port)
    pub addr_name: String,
    /// Client version string with unprintable characters stripped
    pub clean_sub_ver: String,
    /// Last measured round-trip time in seconds
    pub ping_time: f64,
}

impl NodeStats {
    pub fn new(
        node_id: NodeId,
        addr_name: impl Into<String>,
        clean_sub_ver: impl Into<String>,
        ping_time: f64,
    ) -> Self {
        Self {
            node_id,
            addr_name: addr_name.into(),
            clean_sub_ver: clean_sub_ver.into(),
            ping_time,
        }
    }

    /// Ping rendered the way the table shows it
    pub fn ping_display(&self) -> String {
        format!("{:.3}", self.ping_time)
    }
}
