// Peer table endpoints

use crate::core::error::TableError;
use crate::core::state::AppState;
use crate::models::column::{Column, Orientation, SortOrder};
use crate::models::node_stats::{NodeId, NodeStats};
use crate::table::model::{PeerTableModel, TableModel};
use crate::table::sorting::SortKey;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub sort: Option<SortKey>,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RowView {
    pub row: usize,
    pub node_id: NodeId,
    pub cells: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeerDetail {
    pub row: usize,
    pub stats: NodeStats,
}

/// `column: null` restores connection order
#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub column: Option<Column>,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
    pub rows: usize,
}

fn render(model: &PeerTableModel) -> TableView {
    let columns = (0..model.column_count())
        .filter_map(|section| model.header_label(section, Orientation::Horizontal))
        .map(str::to_string)
        .collect();

    let rows = model
        .rows()
        .enumerate()
        .map(|(row, stats)| RowView {
            row,
            node_id: stats.node_id,
            cells: (0..model.column_count())
                .filter_map(|column| model.cell_value(row, column))
                .collect(),
        })
        .collect();

    TableView {
        columns,
        sort: model.sort_key(),
        rows,
    }
}

/// GET /peers
pub async fn table_handler(State(state): State<Arc<AppState>>) -> Json<TableView> {
    let model = state.table.lock().await;
    Json(render(&model))
}

/// GET /peers/{node_id}
pub async fn peer_handler(
    State(state): State<Arc<AppState>>,
    Path(node_id): Path<NodeId>,
) -> Result<Json<PeerDetail>, TableError> {
    let model = state.table.lock().await;

    let row = model
        .row_by_node_id(node_id)
        .ok_or(TableError::NodeNotFound(node_id))?;
    let stats = model
        .node_stats(row)
        .cloned()
        .ok_or(TableError::NodeNotFound(node_id))?;

    Ok(Json(PeerDetail { row, stats }))
}

/// POST /peers/sort
pub async fn sort_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<SortRequest>, JsonRejection>,
) -> Result<Json<TableView>, TableError> {
    let Json(request) = request.map_err(|rejection| {
        TableError::InvalidParameter(rejection.body_text())
    })?;
    let key = request.column.map(|column| SortKey::new(column, request.order));
    debug!(sort = ?key, "Sort requested over HTTP");

    let mut model = state.table.lock().await;
    model.sort_by(key);
    Ok(Json(render(&model)))
}

/// POST /peers/refresh
pub async fn refresh_handler(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    let mut model = state.table.lock().await;
    let refreshed = model.refresh();

    Json(RefreshResponse {
        refreshed,
        rows: model.row_count(),
    })
}
