use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripwise_client::images::ImageProbe;
use tripwise_client::session::{parse_command, Command, Session, HELP};
use tripwise_core::planner::http::HttpPlanningClient;
use tripwise_core::render::text::TextStyle;
use tripwise_core::render::Tab;

const LOADING_MESSAGE: &str = "Generating Your Travel Plan...";

#[derive(Debug, Parser)]
#[command(name = "tripwise", about = "Plan a trip from a free-text description")]
struct Args {
    /// Trip description. Runs once and exits instead of starting a session.
    #[arg(long)]
    input: Option<String>,

    /// Results tab to show first.
    #[arg(long)]
    tab: Option<Tab>,

    /// Planning service base URL. Overrides PLANNER_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Disable ANSI colours.
    #[arg(long)]
    no_color: bool,

    /// Probe image links after a plan loads.
    #[arg(long)]
    check_images: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut settings = tripwise_core::config::Settings::from_env()?;
    if let Some(base_url) = args.base_url.clone() {
        settings.planner_base_url = Some(base_url);
    }
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let color = !args.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    let style = TextStyle {
        color,
        ..TextStyle::default()
    };

    let client = HttpPlanningClient::from_settings(&settings)?;
    tracing::debug!(url = %client.url(), "planner endpoint");
    let mut session = Session::new(client, style);
    let probe = if args.check_images {
        Some(ImageProbe::new()?)
    } else {
        None
    };

    match args.input.as_deref() {
        Some(input) => run_once(&mut session, input, args.tab, probe.as_ref()).await,
        None => {
            interactive(&mut session, args.tab, probe.as_ref()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_once(
    session: &mut Session<HttpPlanningClient>,
    input: &str,
    tab: Option<Tab>,
    probe: Option<&ImageProbe>,
) -> anyhow::Result<ExitCode> {
    generate(session, input, tab, probe).await?;
    print!("{}", session.render_text());

    if session.state().error().is_some() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

async fn interactive(
    session: &mut Session<HttpPlanningClient>,
    first_tab: Option<Tab>,
    probe: Option<&ImageProbe>,
) -> anyhow::Result<()> {
    print!("{}", session.render_text());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match command {
            Command::Submit(text) => {
                if !session.accepts_description() {
                    eprintln!("A plan is already shown. Use :reset to plan another trip.");
                    continue;
                }
                if let Err(e) = generate(session, &text, first_tab, probe).await {
                    eprintln!("{e}");
                    continue;
                }
            }
            Command::Tab(tab) => {
                if !session.select_tab(tab) {
                    eprintln!("No plan loaded yet.");
                    continue;
                }
            }
            Command::Reset => {
                if let Err(e) = session.reset() {
                    eprintln!("{e}");
                    continue;
                }
            }
            Command::Images => match probe {
                Some(probe) => {
                    session.check_images(probe).await;
                }
                None => {
                    let probe = ImageProbe::new()?;
                    session.check_images(&probe).await;
                }
            },
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        }
        print!("{}", session.render_text());
    }
    Ok(())
}

/// Submits `input` with a spinner running until the planner answers.
async fn generate(
    session: &mut Session<HttpPlanningClient>,
    input: &str,
    tab: Option<Tab>,
    probe: Option<&ImageProbe>,
) -> anyhow::Result<()> {
    let ticket = session.begin(input)?;

    let spinner = loading_spinner();
    let settled = session.settle(&ticket).await;
    spinner.finish_and_clear();
    settled?;

    if let Some(tab) = tab {
        session.select_tab(tab);
    }
    if let Some(probe) = probe {
        session.check_images(probe).await;
    }
    Ok(())
}

fn loading_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner} {msg}");
    if let Ok(style) = style {
        spinner.set_style(style);
    }
    spinner.set_message(LOADING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn init_sentry(settings: &tripwise_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
