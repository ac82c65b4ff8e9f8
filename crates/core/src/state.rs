
use crate::domain::contract;
use crate::domain::plan::TravelPlan;
use crate::planner::PlanRequestError;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: Uuid,
    pub dispatched_at: DateTime<Utc>,
}

impl Ticket {
    fn issue() -> Self {
        Self {
            id: Uuid::new_v4(),
            dispatched_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading(Ticket),
    Loaded(Box<TravelPlan>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    EmptyInput,
    Busy,
    NotLoading,
    StaleTicket { current: Uuid, received: Uuid },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "trip description must not be empty"),
            Self::Busy => write!(f, "a plan request is already in flight"),
            Self::NotLoading => write!(f, "no plan request is in flight"),
            Self::StaleTicket { current, received } => write!(
                f,
                "outcome for request {received} ignored; request {current} is in flight"
            ),
        }
    }
}

impl std::error::Error for TransitionError {}

// At most one request in flight; `finish` only accepts the current ticket.
#[derive(Debug, Clone, Default)]
pub struct PlanState {
    phase: Phase,
    input: String,
}

impl PlanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn plan(&self) -> Option<&TravelPlan> {
        match &self.phase {
            Phase::Loaded(plan) => Some(plan.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn submit(&mut self, text: impl Into<String>) -> Result<Ticket, TransitionError> {
        if self.is_loading() {
            return Err(TransitionError::Busy);
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TransitionError::EmptyInput);
        }

        let ticket = Ticket::issue();
        tracing::info!(
            request_id = %ticket.id,
            input_len = text.len(),
            "plan request dispatched"
        );
        self.input = text;
        self.phase = Phase::Loading(ticket.clone());
        Ok(ticket)
    }

    pub fn finish(
        &mut self,
        ticket: &Ticket,
        outcome: Result<TravelPlan, PlanRequestError>,
    ) -> Result<(), TransitionError> {
        let Phase::Loading(current) = &self.phase else {
            return Err(TransitionError::NotLoading);
        };
        if current.id != ticket.id {
            return Err(TransitionError::StaleTicket {
                current: current.id,
                received: ticket.id,
            });
        }

        let elapsed_ms = (Utc::now() - ticket.dispatched_at).num_milliseconds();
        self.phase = match outcome {
            Ok(plan) => {
                for issue in contract::inspect(&plan) {
                    tracing::warn!(request_id = %ticket.id, %issue, "plan departs from producer contract");
                }
                tracing::info!(
                    request_id = %ticket.id,
                    elapsed_ms,
                    destination = %plan.travel_details.destination,
                    days = plan.itinerary.len(),
                    "plan loaded"
                );
                Phase::Loaded(Box::new(plan))
            }
            Err(err) => {
                tracing::warn!(
                    request_id = %ticket.id,
                    elapsed_ms,
                    stage = err.stage(),
                    error = %err,
                    "plan request failed"
                );
                Phase::Failed(err.display_message())
            }
        };
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.is_loading() {
            return Err(TransitionError::Busy);
        }
        self.phase = Phase::Idle;
        self.input.clear();
        Ok(())
    }
}
