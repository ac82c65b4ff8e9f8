pub mod domain;
pub mod planner;
pub mod render;
pub mod state;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub planner_base_url: Option<String>,
        pub planner_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
        pub plan_fixture_path: Option<String>,
        pub port: Option<u16>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                planner_base_url: non_empty_var("PLANNER_BASE_URL"),
                planner_timeout_secs: parsed_var("PLANNER_TIMEOUT_SECS")?,
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                plan_fixture_path: non_empty_var("PLAN_FIXTURE_PATH"),
                port: parsed_var("PORT")?,
            })
        }

        /// `None` leaves requests unbounded.
        pub fn planner_timeout(&self) -> Option<Duration> {
            self.planner_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    fn parsed_var<T>(key: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        non_empty_var(key)
            .map(|s| s.trim().parse::<T>())
            .transpose()
            .with_context(|| format!("{key} is not valid"))
    }
}
