use tripwise_api::{load_fixture, router, AppState};
use tripwise_client::session::Session;
use tripwise_core::planner::http::HttpPlanningClient;
use tripwise_core::render::text::TextStyle;
use tripwise_core::render::{Screen, Tab, TabContent};

async fn serve_fixture(state: AppState) -> Option<String> {
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
        axum::serve(listener, router(state)).await.unwrap();
    });
    Some(format!("http://{addr}"))
}

fn session(base_url: &str) -> Session<HttpPlanningClient> {
    let client = HttpPlanningClient::new(base_url, Some(std::time::Duration::from_secs(5))).unwrap();
    Session::new(client, TextStyle::default())
}

#[tokio::test]
async fn tokyo_request_renders_full_results() {
    let state = AppState::with_plan(load_fixture(None).unwrap());
    let Some(base) = serve_fixture(state).await else {
        return;
    };
    let mut session = session(&base);
    session.submit("Tokyo, 5 days, $3000").await.unwrap();

    let Screen::Results(results) = session.screen() else {
        panic!("expected results, error: {:?}", session.state().error());
    };
    let facts: Vec<_> = results
        .summary
        .facts
        .iter()
        .map(|f| (f.label, f.value.clone()))
        .collect();
    assert_eq!(facts[0], ("Destination", "Tokyo, Japan".to_string()));
    assert_eq!(facts[1], ("Duration", "5 days".to_string()));
    assert_eq!(facts[2], ("Budget", "$3000".to_string()));

    let budget = results.budget.as_ref().unwrap();
    assert_eq!(budget.balance.amount, "+$250.00");
    assert_eq!(budget.total.amount, "$2750.00");
    match &results.content {
        TabContent::Itinerary(days) => assert_eq!(days.len(), 5),
        other => panic!("expected itinerary, got {other:?}"),
    }

    let text = session.render_text();
    assert!(text.contains("You're within budget! $250.00 remaining"));
    assert_eq!(text.matches("-- Day ").count(), 5);

    assert!(session.select_tab(Tab::Hotels));
    let text = session.render_text();
    assert!(text.contains("Hotel Gracery Shinjuku"));
    assert!(text.contains("[Luggage Storage]"));
    assert!(!text.contains("[Vending Machines]"));
}

#[tokio::test]
async fn unavailable_service_shows_error_and_keeps_input() {
    let Some(base) = serve_fixture(AppState::default()).await else {
        return;
    };
    let mut session = session(&base);
    session.submit("Tokyo, 5 days, $3000").await.unwrap();

    assert_eq!(session.state().error(), Some("No travel plan available"));
    let text = session.render_text();
    assert!(text.contains("! No travel plan available"));
    assert!(text.contains("> Tokyo, 5 days, $3000"));

    session.reset().unwrap();
    assert!(session.state().error().is_none());
    assert_eq!(session.state().input(), "");
}
