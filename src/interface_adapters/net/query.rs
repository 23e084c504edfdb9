use crate::domain::InventoryEntry;
use crate::interface_adapters::state::AppState;
use crate::use_cases::HostStatus;
use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub items: Vec<InventoryEntry>,
}

// Served from the host's cached projection, so it keeps answering between sessions.
pub async fn inventory_handler(State(state): State<Arc<AppState>>) -> Json<InventoryResponse> {
    Json(InventoryResponse {
        items: state.host.inventory(),
    })
}

pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<HostStatus> {
    Json(state.host.status())
}
