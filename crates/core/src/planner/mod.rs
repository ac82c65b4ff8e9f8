use crate::domain::plan::TravelPlan;

pub mod error;
pub mod http;

pub use error::{PlanRequestError, GENERIC_FAILURE_MESSAGE};

pub const PLAN_TRAVEL_PATH: &str = "/api/plan_travel";

#[async_trait::async_trait]
pub trait PlanningService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn plan(&self, user_input: &str) -> Result<TravelPlan, PlanRequestError>;
}
