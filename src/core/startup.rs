// Startup helpers: node list seeding and initial table setup

use crate::core::config::Config;
use crate::core::state::AppState;
use crate::stores::node_list::NodeList;
use crate::table::auto_refresh::AutoRefresh;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Load the statically configured peers into a fresh node list
pub fn seed_node_list(config: &Config) -> Arc<NodeList> {
    let node_list = NodeList::new();
    for peer in &config.static_peers {
        node_list.connect(peer.clone());
    }

    info!(static_peers = node_list.len(), "Node list seeded");
    Arc::new(node_list)
}

/// Build the state, apply the configured sort and start auto refresh if enabled.
/// The returned `AutoRefresh` stops the timer when dropped.
pub async fn prepare(config: Config) -> Result<(AppState, AutoRefresh)> {
    let node_list = seed_node_list(&config);
    let state = AppState::new(config, node_list);

    if let Some(sort) = state.config.sort {
        state.table.lock().await.sort_by(Some(sort.into()));
        info!(column = ?sort.column, order = ?sort.order, "Initial sort applied");
    }

    let mut auto_refresh = AutoRefresh::new(Arc::clone(&state.table));
    if state.config.refresh.auto_start {
        auto_refresh
            .start(state.config.refresh.interval_ms)
            .context("Failed to start auto refresh")?;
    }

    Ok((state, auto_refresh))
}
