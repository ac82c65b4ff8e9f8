use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tripwise_core::domain::plan::TravelPlan;
use tripwise_core::planner::PLAN_TRAVEL_PATH;

pub const BUNDLED_FIXTURE: &str = include_str!("../fixtures/tokyo_plan.json");

pub const DEFAULT_PORT: u16 = 5000;

const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub plan: Option<Arc<TravelPlan>>,
}

impl AppState {
    pub fn with_plan(plan: TravelPlan) -> Self {
        Self {
            plan: Some(Arc::new(plan)),
        }
    }
}

/// Reads the plan from `path`, or the bundled Tokyo plan when no path is set.
pub fn load_fixture(path: Option<&str>) -> anyhow::Result<TravelPlan> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read plan fixture {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parse plan fixture {path}"))
        }
        None => serde_json::from_str(BUNDLED_FIXTURE).context("parse bundled plan fixture"),
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/healthz", get(healthz))
        .route(PLAN_TRAVEL_PATH, post(plan_travel))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct PlanTravelBody {
    #[serde(default)]
    user_input: Option<String>,
}

async fn plan_travel(
    State(state): State<AppState>,
    body: Result<Json<PlanTravelBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected plan request body");
            return error_response(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    let Some(user_input) = body.user_input.filter(|s| !s.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "User input is required");
    };

    let Some(plan) = &state.plan else {
        tracing::error!("no plan fixture loaded");
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "No travel plan available");
    };

    tracing::info!(
        input_len = user_input.len(),
        destination = %plan.travel_details.destination,
        "serving plan fixture"
    );
    Json(plan.as_ref()).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
