//! Disk, CPU, memory and uptime handlers.

use super::{run_blocking, ApiError};
use crate::server::AppState;
use axum::{extract::State, Json};
use hostwatch_core::{CpuUsage, DiskUsage, MemoryUsage, SystemReport, Uptime};
use std::sync::Arc;

pub async fn handle_disk(State(state): State<Arc<AppState>>) -> Result<Json<DiskUsage>, ApiError> {
    let metrics = state.metrics.clone();
    Ok(Json(run_blocking(move || metrics.disk_usage()).await?))
}

pub async fn handle_cpu(State(state): State<Arc<AppState>>) -> Result<Json<CpuUsage>, ApiError> {
    let metrics = state.metrics.clone();
    Ok(Json(run_blocking(move || metrics.cpu_usage()).await?))
}

pub async fn handle_memory(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MemoryUsage>, ApiError> {
    let metrics = state.metrics.clone();
    Ok(Json(run_blocking(move || metrics.memory_usage()).await?))
}

pub async fn handle_uptime(State(state): State<Arc<AppState>>) -> Result<Json<Uptime>, ApiError> {
    let metrics = state.metrics.clone();
    Ok(Json(run_blocking(move || metrics.uptime()).await?))
}

/// Overall system health: every metric in one body.
pub async fn handle_system(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SystemReport>, ApiError> {
    let metrics = state.metrics.clone();
    Ok(Json(run_blocking(move || metrics.report()).await?))
}
