use crate::config::Settings;
use crate::domain::plan::TravelPlan;
use crate::planner::{PlanRequestError, PlanningService, PLAN_TRAVEL_PATH};
use anyhow::Context;
use reqwest::header::{HeaderValue, ACCEPT};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct HttpPlanningClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct PlanTravelRequest<'a> {
    user_input: &'a str,
}

impl HttpPlanningClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let base_url = settings
            .planner_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, settings.planner_timeout())
    }

    /// Without a timeout a hung service keeps the caller waiting indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build planner http client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), PLAN_TRAVEL_PATH)
    }
}

#[async_trait::async_trait]
impl PlanningService for HttpPlanningClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn plan(&self, user_input: &str) -> Result<TravelPlan, PlanRequestError> {
        let started = Instant::now();
        let res = self
            .http
            .post(self.url())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&PlanTravelRequest { user_input })
            .send()
            .await
            .map_err(|e| PlanRequestError::Transport {
                detail: e.to_string(),
            })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| PlanRequestError::Transport {
            detail: format!("failed to read planner response body: {e}"),
        })?;

        tracing::debug!(
            %status,
            body_len = text.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "planner responded"
        );

        if !status.is_success() {
            return Err(PlanRequestError::Service {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        serde_json::from_str::<TravelPlan>(&text).map_err(|e| PlanRequestError::Decode {
            detail: e.to_string(),
            raw_output: text,
        })
    }
}

fn error_message(body: &str) -> Option<String> {
    let raw = serde_json::from_str::<Value>(body).ok()?;
    raw.get("error")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    async fn serve(app: Router) -> Option<String> {
        let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
            Ok(l) => l,
            Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                eprintln!("skipping test: sandbox does not permit local TCP listeners");
                return None;
            }
            Err(err) => panic!("failed to bind: {err}"),
        };
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Some(format!("http://{addr}"))
    }

    fn client(base_url: &str) -> HttpPlanningClient {
        HttpPlanningClient::new(base_url, Some(Duration::from_secs(5))).unwrap()
    }

    fn plan_body() -> Value {
        json!({
            "travel_details": {"destination": "Seoul, South Korea", "duration": 1, "travelers": 2},
            "itinerary": [{"day": 1, "title": "Palaces"}],
            "budget_breakdown": {"total_estimated": 800, "user_budget": 1000, "remaining": 200, "within_budget": true},
            "error": null
        })
    }

    #[test]
    fn url_joins_base_and_fixed_path() {
        assert_eq!(
            client("http://planner.local/").url(),
            "http://planner.local/api/plan_travel"
        );
    }

    #[test]
    fn extracts_only_string_error_fields() {
        assert_eq!(
            error_message(r#"{"error":"User input is required"}"#).as_deref(),
            Some("User input is required")
        );
        assert_eq!(error_message(r#"{"error":{"code":1}}"#), None);
        assert_eq!(error_message("Internal Server Error"), None);
    }

    #[tokio::test]
    async fn posts_user_input_and_decodes_plan() {
        let seen = Arc::new(Mutex::new(None::<Value>));
        let captured = seen.clone();
        let app = Router::new().route(
            PLAN_TRAVEL_PATH,
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(plan_body())
                }
            }),
        );
        let Some(base) = serve(app).await else {
            return;
        };

        let plan = client(&base).plan("Seoul for a day").await.unwrap();

        let expected: TravelPlan = serde_json::from_value(plan_body()).unwrap();
        assert_eq!(plan, expected);
        assert_eq!(
            seen.lock().unwrap().clone(),
            Some(json!({"user_input": "Seoul for a day"}))
        );
    }

    #[tokio::test]
    async fn failing_status_prefers_service_message() {
        let app = Router::new().route(
            PLAN_TRAVEL_PATH,
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Extraction failed"})),
                )
            }),
        );
        let Some(base) = serve(app).await else {
            return;
        };

        let err = client(&base).plan("somewhere").await.unwrap_err();
        assert!(matches!(
            err,
            PlanRequestError::Service { status: 500, ref message } if message.as_deref() == Some("Extraction failed")
        ));
        assert_eq!(err.display_message(), "Extraction failed");
    }

    #[tokio::test]
    async fn failing_status_without_error_field_is_generic() {
        let app = Router::new()
            .route(
                PLAN_TRAVEL_PATH,
                post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"detail": "nope"}))) }),
            )
            .route(
                "/text/api/plan_travel",
                post(|| async { (StatusCode::BAD_GATEWAY, "Bad gateway") }),
            );
        let Some(base) = serve(app).await else {
            return;
        };

        let err = client(&base).plan("somewhere").await.unwrap_err();
        assert!(matches!(err, PlanRequestError::Service { status: 400, message: None }));
        assert_eq!(err.display_message(), crate::planner::GENERIC_FAILURE_MESSAGE);

        let err = client(&format!("{base}/text")).plan("somewhere").await.unwrap_err();
        assert!(matches!(err, PlanRequestError::Service { status: 502, message: None }));
    }

    #[tokio::test]
    async fn success_status_with_invalid_body_is_decode_error() {
        let app = Router::new().route(
            PLAN_TRAVEL_PATH,
            post(|| async { "<html>maintenance</html>" }),
        );
        let Some(base) = serve(app).await else {
            return;
        };

        let err = client(&base).plan("somewhere").await.unwrap_err();
        match err {
            PlanRequestError::Decode { raw_output, .. } => {
                assert_eq!(raw_output, "<html>maintenance</html>")
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
            Ok(l) => l,
            Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => return,
            Err(err) => panic!("failed to bind: {err}"),
        };
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .plan("somewhere")
            .await
            .unwrap_err();
        assert_eq!(err.stage(), "transport");
        assert_eq!(err.display_message(), crate::planner::GENERIC_FAILURE_MESSAGE);
    }
}
