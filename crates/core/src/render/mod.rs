use crate::domain::plan::{TravelDetails, TravelPlan};
use crate::state::PlanState;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub mod budget;
pub mod cards;
pub mod itinerary;
pub mod text;

use budget::BudgetPanel;
use cards::{Card, ImageKey};
use itinerary::DayCard;

pub const APP_TITLE: &str = "AI Travel Planner";
pub const APP_TAGLINE: &str = "Plan your perfect trip with AI-powered recommendations";
pub const RESET_LABEL: &str = "Plan Another Trip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Tab {
    #[default]
    Itinerary,
    Places,
    Restaurants,
    Hotels,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Itinerary, Tab::Places, Tab::Restaurants, Tab::Hotels];

    pub fn name(self) -> &'static str {
        match self {
            Self::Itinerary => "itinerary",
            Self::Places => "places",
            Self::Restaurants => "restaurants",
            Self::Hotels => "hotels",
        }
    }

    fn label(self, plan: &TravelPlan) -> String {
        match self {
            Self::Itinerary => "Itinerary".to_string(),
            Self::Places => format!("Places ({})", plan.places.len()),
            Self::Restaurants => format!("Restaurants ({})", plan.restaurants.len()),
            Self::Hotels => format!("Hotels ({})", plan.hotels.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTab(pub String);

impl fmt::Display for UnknownTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown tab {:?} (expected itinerary, places, restaurants or hotels)",
            self.0
        )
    }
}

impl std::error::Error for UnknownTab {}

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Tab::ALL
            .into_iter()
            .find(|tab| tab.name() == wanted)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    tab: Tab,
    failed_images: BTreeSet<ImageKey>,
}

impl ViewState {
    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Records that an image slot failed to load. Returns `false` when the
    /// slot already shows its placeholder, so callers never retry.
    pub fn mark_image_failed(&mut self, key: ImageKey) -> bool {
        self.failed_images.insert(key)
    }

    pub fn image_failed(&self, key: ImageKey) -> bool {
        self.failed_images.contains(&key)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Submission(SubmissionView),
    Results(Box<ResultsView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub busy: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionView {
    pub title: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub input: String,
    pub submit: SubmitButton,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPanel {
    pub title: &'static str,
    pub overview: String,
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabHeader {
    pub tab: Tab,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabContent {
    Itinerary(Vec<DayCard>),
    Places(Vec<Card>),
    Restaurants(Vec<Card>),
    Hotels(Vec<Card>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub summary: SummaryPanel,
    pub budget: Option<BudgetPanel>,
    pub tabs: Vec<TabHeader>,
    pub content: TabContent,
    pub reset_label: &'static str,
}

pub fn render(state: &PlanState, view: &ViewState) -> Screen {
    match state.plan() {
        Some(plan) => Screen::Results(Box::new(results_view(plan, view))),
        None => Screen::Submission(submission_view(state)),
    }
}

fn submission_view(state: &PlanState) -> SubmissionView {
    let busy = state.is_loading();
    SubmissionView {
        title: "Describe Your Dream Trip",
        description: "Tell us about your destination, duration, budget, and interests",
        placeholder: "e.g., I want to visit Tokyo for 5 days with a budget of $3000. \
                      I love anime, traditional temples, sushi, and shopping...",
        input: state.input().to_string(),
        submit: SubmitButton {
            label: if busy {
                "Generating Your Travel Plan..."
            } else {
                "Generate Travel Plan"
            },
            busy,
            disabled: busy,
        },
        error: state.error().map(str::to_string),
    }
}

fn results_view(plan: &TravelPlan, view: &ViewState) -> ResultsView {
    let selected = view.tab();
    let content = match selected {
        Tab::Itinerary => TabContent::Itinerary(itinerary::day_cards(&plan.itinerary)),
        Tab::Places => TabContent::Places(cards::place_cards(&plan.places, view)),
        Tab::Restaurants => {
            TabContent::Restaurants(cards::restaurant_cards(&plan.restaurants, view))
        }
        Tab::Hotels => TabContent::Hotels(cards::hotel_cards(&plan.hotels, view)),
    };

    ResultsView {
        summary: summary_panel(&plan.travel_details),
        budget: plan.budget_breakdown.as_ref().map(budget::budget_panel),
        tabs: Tab::ALL
            .into_iter()
            .map(|tab| TabHeader {
                tab,
                label: tab.label(plan),
                selected: tab == selected,
            })
            .collect(),
        content,
        reset_label: RESET_LABEL,
    }
}

fn summary_panel(details: &TravelDetails) -> SummaryPanel {
    let mut facts = vec![
        Fact {
            label: "Destination",
            value: details.destination.clone(),
        },
        Fact {
            label: "Duration",
            value: format!("{} days", details.duration),
        },
        Fact {
            label: "Budget",
            value: format!("${}", details.budget),
        },
        Fact {
            label: "Travelers",
            value: details.travelers.to_string(),
        },
    ];
    if !details.travel_type.trim().is_empty() {
        facts.push(Fact {
            label: "Travel Style",
            value: details.travel_type.trim().to_string(),
        });
    }
    if !details.interests.is_empty() {
        facts.push(Fact {
            label: "Interests",
            value: details.interests.join(", "),
        });
    }

    SummaryPanel {
        title: "Your Personalized Travel Plan",
        overview: details.overview.clone(),
        facts,
    }
}
