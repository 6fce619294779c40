//! Process liveness handler.

use super::{run_blocking, ApiError};
use crate::server::AppState;
use axum::{
    extract::{RawQuery, State},
    Json,
};
use hostwatch_core::config::LivenessConfig;
use hostwatch_core::{HostwatchError, TermVerdict};
use std::sync::Arc;
use tracing::debug;

/// Collect the repeated `q` parameter, in order, and enforce the term limit.
///
/// A missing query string yields no terms.
pub fn parse_query_terms(query: Option<&str>) -> hostwatch_core::Result<Vec<String>> {
    let terms: Vec<String> = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .filter(|(key, _)| key == LivenessConfig::QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .collect();

    if terms.len() > LivenessConfig::MAX_QUERY_TERMS {
        return Err(HostwatchError::Validation {
            field: LivenessConfig::QUERY_PARAM.to_string(),
            message: format!(
                "at most {} values allowed, got {}",
                LivenessConfig::MAX_QUERY_TERMS,
                terms.len()
            ),
        });
    }

    Ok(terms)
}

/// `GET /health?q=<name>&q=<name>...`
pub async fn handle_liveness(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<TermVerdict>>, ApiError> {
    let terms = parse_query_terms(query.as_deref())?;
    debug!("Liveness check for {:?}", terms);

    let matcher = state.matcher.clone();
    let verdicts = run_blocking(move || matcher.check(&terms)).await?;

    Ok(Json(verdicts))
}
