use crate::domain::plan::{BudgetBreakdown, TravelPlan};
use std::fmt;

// The producer rounds every amount to cents independently, so sums can drift
// by a few cents.
const AMOUNT_TOLERANCE: f64 = 0.05;

/// A place where a decoded plan departs from the producer's contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractIssue {
    NonPositiveDuration,
    NonPositiveTravelers,
    ItineraryLengthMismatch { duration: u32, days: usize },
    DayOutOfOrder { position: usize, day: u32 },
    RatingOutOfRange { entity: &'static str, name: String, rating: f64 },
    TotalMismatch { reported: f64, summed: f64 },
    RemainingMismatch { reported: f64, derived: f64 },
    WithinBudgetMismatch { within_budget: bool, remaining: f64 },
}

impl fmt::Display for ContractIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDuration => write!(f, "travel_details.duration must be positive"),
            Self::NonPositiveTravelers => write!(f, "travel_details.travelers must be positive"),
            Self::ItineraryLengthMismatch { duration, days } => {
                write!(f, "itinerary has {days} days but duration is {duration}")
            }
            Self::DayOutOfOrder { position, day } => {
                write!(f, "itinerary entry {position} has day {day} out of order")
            }
            Self::RatingOutOfRange {
                entity,
                name,
                rating,
            } => write!(f, "{entity} {name:?} has rating {rating} outside [0, 5]"),
            Self::TotalMismatch { reported, summed } => write!(
                f,
                "budget total_estimated={reported} but components sum to {summed}"
            ),
            Self::RemainingMismatch { reported, derived } => write!(
                f,
                "budget remaining={reported} but user_budget - total_estimated = {derived}"
            ),
            Self::WithinBudgetMismatch {
                within_budget,
                remaining,
            } => write!(
                f,
                "budget within_budget={within_budget} disagrees with remaining={remaining}"
            ),
        }
    }
}

pub fn inspect(plan: &TravelPlan) -> Vec<ContractIssue> {
    let mut issues = Vec::new();
    let details = &plan.travel_details;

    if details.duration == 0 {
        issues.push(ContractIssue::NonPositiveDuration);
    }
    if details.travelers == 0 {
        issues.push(ContractIssue::NonPositiveTravelers);
    }
    if details.duration as usize != plan.itinerary.len() {
        issues.push(ContractIssue::ItineraryLengthMismatch {
            duration: details.duration,
            days: plan.itinerary.len(),
        });
    }

    let mut previous = 0u32;
    for (position, day) in plan.itinerary.iter().enumerate() {
        if day.day <= previous {
            issues.push(ContractIssue::DayOutOfOrder {
                position,
                day: day.day,
            });
        }
        previous = previous.max(day.day);
    }

    let ratings = plan
        .places
        .iter()
        .map(|p| ("place", &p.name, p.rating))
        .chain(plan.restaurants.iter().map(|r| ("restaurant", &r.name, r.rating)))
        .chain(plan.hotels.iter().map(|h| ("hotel", &h.name, h.rating)));
    for (entity, name, rating) in ratings {
        if !(0.0..=5.0).contains(&rating) {
            issues.push(ContractIssue::RatingOutOfRange {
                entity,
                name: name.clone(),
                rating,
            });
        }
    }

    if let Some(budget) = &plan.budget_breakdown {
        inspect_budget(budget, &mut issues);
    }

    issues
}

fn inspect_budget(budget: &BudgetBreakdown, issues: &mut Vec<ContractIssue>) {
    let summed: f64 = budget.components().iter().map(|(_, amount)| amount).sum();
    if (summed - budget.total_estimated).abs() > AMOUNT_TOLERANCE {
        issues.push(ContractIssue::TotalMismatch {
            reported: budget.total_estimated,
            summed,
        });
    }

    let derived = budget.user_budget - budget.total_estimated;
    if (derived - budget.remaining).abs() > AMOUNT_TOLERANCE {
        issues.push(ContractIssue::RemainingMismatch {
            reported: budget.remaining,
            derived,
        });
    }

    if budget.within_budget != (budget.remaining >= 0.0) {
        issues.push(ContractIssue::WithinBudgetMismatch {
            within_budget: budget.within_budget,
            remaining: budget.remaining,
        });
    }
}
