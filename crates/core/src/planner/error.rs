use std::fmt;

/// Shown whenever the service did not supply a usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to create travel plan";

#[derive(Debug, Clone)]
pub enum PlanRequestError {
    Transport { detail: String },
    Decode { detail: String, raw_output: String },
    Service {
        status: u16,
        message: Option<String>,
    },
}

impl PlanRequestError {
    pub fn display_message(&self) -> String {
        match self {
            Self::Service {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Decode { .. } => "decode",
            Self::Service { .. } => "service",
        }
    }
}

impl fmt::Display for PlanRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { detail } => write!(f, "planner request failed: {detail}"),
            Self::Decode { detail, .. } => write!(f, "planner response is not a plan: {detail}"),
            Self::Service { status, message } => write!(
                f,
                "planner returned status={status}: {}",
                message.as_deref().unwrap_or("<no message>")
            ),
        }
    }
}

impl std::error::Error for PlanRequestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_wins_when_present() {
        let err = PlanRequestError::Service {
            status: 500,
            message: Some("Destination not recognised".to_string()),
        };
        assert_eq!(err.display_message(), "Destination not recognised");
        assert_eq!(err.stage(), "service");
    }

    #[test]
    fn falls_back_to_generic_message() {
        let blank = PlanRequestError::Service {
            status: 502,
            message: Some("  ".to_string()),
        };
        let missing = PlanRequestError::Service {
            status: 400,
            message: None,
        };
        let transport = PlanRequestError::Transport {
            detail: "connection refused".to_string(),
        };
        let decode = PlanRequestError::Decode {
            detail: "expected value at line 1 column 1".to_string(),
            raw_output: "<html>".to_string(),
        };

        for err in [blank, missing, transport, decode] {
            assert_eq!(err.display_message(), GENERIC_FAILURE_MESSAGE);
        }
    }
}
