use crate::images::ImageProbe;
use std::fmt;
use tripwise_core::planner::PlanningService;
use tripwise_core::render::text::{screen_to_string, TextStyle};
use tripwise_core::render::{render, Screen, Tab, UnknownTab, ViewState};
use tripwise_core::state::{PlanState, Ticket, TransitionError};

pub const HELP: &str = "\
Type a trip description and press enter to generate a plan.
  :tab <itinerary|places|restaurants|hotels>  switch the results tab
  :reset                                       plan another trip
  :images                                      check image links, use placeholders for broken ones
  :help                                        show this help
  :quit                                        exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Tab(Tab),
    Reset,
    Images,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument(&'static str),
    Tab(UnknownTab),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(cmd) => write!(f, "unknown command :{cmd} (try :help)"),
            Self::MissingArgument(cmd) => write!(f, ":{cmd} needs an argument"),
            Self::Tab(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Blank lines yield `None`. Anything not starting with `:` is a trip
/// description.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Some(Command::Submit(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let command = match name.to_ascii_lowercase().as_str() {
        "tab" if arg.is_empty() => return Err(CommandError::MissingArgument("tab")),
        "tab" => Command::Tab(arg.parse().map_err(CommandError::Tab)?),
        "reset" | "new" => Command::Reset,
        "images" => Command::Images,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

pub struct Session<S> {
    service: S,
    state: PlanState,
    view: ViewState,
    style: TextStyle,
}

impl<S: PlanningService> Session<S> {
    pub fn new(service: S, style: TextStyle) -> Self {
        Self {
            service,
            state: PlanState::new(),
            view: ViewState::default(),
            style,
        }
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn begin(&mut self, text: impl Into<String>) -> Result<Ticket, TransitionError> {
        let ticket = self.state.submit(text)?;
        self.view.clear();
        Ok(ticket)
    }

    pub async fn settle(&mut self, ticket: &Ticket) -> Result<(), TransitionError> {
        let input = self.state.input().to_string();
        tracing::debug!(service = self.service.name(), request_id = %ticket.id, "awaiting planner");
        let outcome = self.service.plan(&input).await;
        if let Err(err) = &outcome {
            sentry::capture_error(err);
        }
        self.state.finish(ticket, outcome)
    }

    pub async fn submit(&mut self, text: impl Into<String>) -> Result<(), TransitionError> {
        let ticket = self.begin(text)?;
        self.settle(&ticket).await
    }

    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.state.reset()?;
        self.view.clear();
        Ok(())
    }

    /// Free text starts a new plan only from the submission view; results
    /// must be dismissed with `reset` first.
    pub fn accepts_description(&self) -> bool {
        self.state.plan().is_none() && !self.state.is_loading()
    }

    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.state.plan().is_none() {
            return false;
        }
        self.view.select_tab(tab);
        true
    }

    pub async fn check_images(&mut self, probe: &ImageProbe) -> usize {
        let Some(plan) = self.state.plan() else {
            return 0;
        };
        probe.check_plan(plan, &mut self.view).await
    }

    pub fn screen(&self) -> Screen {
        render(&self.state, &self.view)
    }

    pub fn render_text(&self) -> String {
        screen_to_string(&self.screen(), &self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tripwise_core::domain::plan::{TravelDetails, TravelPlan};
    use tripwise_core::planner::PlanRequestError;
    use tripwise_core::render::cards::{CardKind, ImageKey};

    struct Canned {
        outcome: Result<TravelPlan, PlanRequestError>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn ok(destination: &str) -> Self {
            Self {
                outcome: Ok(TravelPlan {
                    travel_details: TravelDetails {
                        destination: destination.to_string(),
                        duration: 3,
                        ..Default::default()
                    },
                    ..Default::default()
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(err: PlanRequestError) -> Self {
            Self {
                outcome: Err(err),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl PlanningService for Canned {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn plan(&self, _user_input: &str) -> Result<TravelPlan, PlanRequestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command(" Kyoto for 3 days "),
            Ok(Some(Command::Submit("Kyoto for 3 days".to_string())))
        );
        assert_eq!(
            parse_command(":tab Hotels"),
            Ok(Some(Command::Tab(Tab::Hotels)))
        );
        assert_eq!(parse_command(":reset"), Ok(Some(Command::Reset)));
        assert_eq!(parse_command(":q"), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_command(":tab"),
            Err(CommandError::MissingArgument("tab"))
        );
        assert!(matches!(
            parse_command(":tab beaches"),
            Err(CommandError::Tab(_))
        ));
        assert_eq!(
            parse_command(":fly"),
            Err(CommandError::Unknown("fly".to_string()))
        );
    }

    #[tokio::test]
    async fn submit_loads_plan_and_renders_results() {
        let mut session = Session::new(Canned::ok("Kyoto, Japan"), TextStyle::default());
        session.submit("Kyoto for 3 days").await.unwrap();

        assert!(matches!(session.screen(), Screen::Results(_)));
        assert!(session.render_text().contains("Destination: Kyoto, Japan"));
        assert_eq!(session.service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_input_makes_no_request() {
        let mut session = Session::new(Canned::ok("Nowhere"), TextStyle::default());
        assert_eq!(session.submit("  ").await, Err(TransitionError::EmptyInput));
        assert_eq!(session.service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn begin_while_loading_is_busy() {
        let mut session = Session::new(Canned::ok("Kyoto"), TextStyle::default());
        let ticket = session.begin("Kyoto").unwrap();
        assert_eq!(session.begin("Osaka").err(), Some(TransitionError::Busy));
        assert_eq!(session.reset(), Err(TransitionError::Busy));

        session.settle(&ticket).await.unwrap();
        assert_eq!(session.service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.state().input(), "Kyoto");
    }

    #[tokio::test]
    async fn failure_shows_service_message() {
        let err = PlanRequestError::Service {
            status: 500,
            message: Some("Planner overloaded".to_string()),
        };
        let mut session = Session::new(Canned::err(err), TextStyle::default());
        session.submit("Lima").await.unwrap();

        assert_eq!(session.state().error(), Some("Planner overloaded"));
        let text = session.render_text();
        assert!(text.contains("! Planner overloaded"));
        assert!(text.contains("> Lima"));
    }

    #[tokio::test]
    async fn descriptions_wait_for_reset_once_results_show() {
        let mut session = Session::new(Canned::ok("Kyoto"), TextStyle::default());
        assert!(session.accepts_description());

        session.submit("Kyoto").await.unwrap();
        assert!(!session.accepts_description());

        session.reset().unwrap();
        assert!(session.accepts_description());

        let err = PlanRequestError::Transport {
            detail: "refused".to_string(),
        };
        let mut failing = Session::new(Canned::err(err), TextStyle::default());
        failing.submit("Lima").await.unwrap();
        assert!(failing.accepts_description());
    }

    #[tokio::test]
    async fn new_plan_and_reset_clear_view_state() {
        let mut session = Session::new(Canned::ok("Kyoto"), TextStyle::default());
        assert!(!session.select_tab(Tab::Hotels));

        session.submit("Kyoto").await.unwrap();
        assert!(session.select_tab(Tab::Hotels));
        session.view.mark_image_failed(ImageKey {
            kind: CardKind::Hotel,
            index: 0,
        });

        session.submit("Kyoto again").await.unwrap();
        assert_eq!(session.view().tab(), Tab::Itinerary);

        session.select_tab(Tab::Places);
        session.reset().unwrap();
        assert_eq!(session.view().tab(), Tab::Itinerary);
        assert_eq!(session.state().input(), "");
        assert!(matches!(session.screen(), Screen::Submission(_)));
    }
}
