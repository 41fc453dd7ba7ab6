// Application state (AppState)

use crate::core::config::Config;
use crate::stores::node_list::NodeList;
use crate::table::auto_refresh::SharedPeerTable;
use crate::table::model::PeerTableModel;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state
///
/// Cloned into every request handler; all fields are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Peer table rendered by the HTTP view
    pub table: SharedPeerTable,

    /// Connected peers the table snapshots from
    pub node_list: Arc<NodeList>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, node_list: Arc<NodeList>) -> Self {
        let model = PeerTableModel::new(node_list.clone());

        Self {
            table: Arc::new(Mutex::new(model)),
            node_list,
            config: Arc::new(config),
        }
    }
}
