use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::error::DashboardError;
use crate::metrics::Normalizer;
use crate::models::{Coordinate, Metric, MetricResult};

#[derive(Clone)]
pub struct AppState {
    pub normalizer: Normalizer,
}

/// Coordinate plus a comma separated metric selection
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub metrics: Option<String>,
}

impl DashboardQuery {
    /// Validate the coordinate and parse the selection; blank selects every tile.
    pub fn selection(&self) -> Result<(Coordinate, Vec<Metric>), DashboardError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DashboardError::validation(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DashboardError::validation(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }

        let metrics = match self.metrics.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Metric::parse_selection(raw)?,
            _ => Metric::DEFAULT_SELECTION.to_vec(),
        };

        Ok((Coordinate::new(self.latitude, self.longitude), metrics))
    }
}

pub struct ApiError(DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            DashboardError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/display", post(post_display))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

async fn get_metrics(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<MetricResult>>, ApiError> {
    render(&state, &query).await
}

async fn post_display(
    State(state): State<AppState>,
    Form(query): Form<DashboardQuery>,
) -> Result<Json<Vec<MetricResult>>, ApiError> {
    render(&state, &query).await
}

async fn render(
    state: &AppState,
    query: &DashboardQuery,
) -> Result<Json<Vec<MetricResult>>, ApiError> {
    let (origin, metrics) = query.selection()?;
    info!(
        "Dashboard requested for {} ({} metrics)",
        origin.format_coordinates(),
        metrics.len()
    );
    let results = state
        .normalizer
        .dashboard(&origin, &metrics, Utc::now())
        .await;
    Ok(Json(results))
}
