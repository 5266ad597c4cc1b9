//! User-facing command errors and exit codes.

use colored::Colorize;
use rust_i18n::t;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const AUTH: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const RATE_LIMITED: i32 = 4;
}

/// An error reported to the user with an optional hint.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    pub message: String,
    pub hint: Option<String>,
    pub code: i32,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            code: exit_code::GENERAL,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: exit_code::NOT_FOUND,
            ..Self::new(message)
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Map any command error to what the user sees.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(cli) = err.downcast_ref::<CliError>() {
            return Self {
                message: cli.message.clone(),
                hint: cli.hint.clone(),
                code: cli.code,
            };
        }
        if let Some(api) = err.downcast_ref::<lnr::Error>() {
            return Self::from_api(api);
        }
        Self::from_message(&err.to_string())
    }

    fn from_api(err: &lnr::Error) -> Self {
        if err.is_auth_error() {
            Self {
                code: exit_code::AUTH,
                ..Self::new(t!("error_not_authenticated")).with_hint(t!("hint_auth"))
            }
        } else if err.is_rate_limited() {
            Self {
                code: exit_code::RATE_LIMITED,
                ..Self::new(t!("error_rate_limited"))
            }
        } else if err.is_not_found() {
            Self::not_found(err.to_string().to_lowercase())
        } else {
            Self::from_message(&err.to_string())
        }
    }

    /// Classify a bare message the way the API's wording suggests.
    fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("unauthorized") || lower.contains("authentication") {
            Self {
                code: exit_code::AUTH,
                ..Self::new(t!("error_not_authenticated")).with_hint(t!("hint_auth"))
            }
        } else if lower.contains("not found") {
            Self::not_found(lower)
        } else if lower.contains("rate limit") {
            Self {
                code: exit_code::RATE_LIMITED,
                ..Self::new(t!("error_rate_limited"))
            }
        } else {
            Self::new(lower)
        }
    }

    /// Print to stderr.
    pub fn report(&self) {
        eprintln!("{}", format!("error: {}", self.message).red());
        if let Some(hint) = &self.hint {
            eprintln!("{}", format!("  {}", hint).dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_map_to_exit_codes() {
        let err = anyhow::Error::new(lnr::Error::AuthRequired);
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.code, exit_code::AUTH);
        assert_eq!(cli.message, "not authenticated");
        assert_eq!(cli.hint.as_deref(), Some("run: lnr auth login <api-key>"));

        let err = anyhow::Error::new(lnr::Error::RateLimited);
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.code, exit_code::RATE_LIMITED);
        assert_eq!(cli.message, "rate limited, retry in 30s");

        let err = anyhow::Error::new(lnr::Error::NotFound("Entity not found: Issue".into()));
        assert_eq!(CliError::from_anyhow(&err).code, exit_code::NOT_FOUND);
    }

    #[test]
    fn test_context_keeps_underlying_api_error() {
        let err = anyhow::Error::new(lnr::Error::Unauthorized("bad key".into()))
            .context("failed to list issues");
        assert_eq!(CliError::from_anyhow(&err).code, exit_code::AUTH);
    }

    #[test]
    fn test_cli_error_passthrough() {
        let err = anyhow::Error::new(
            CliError::not_found("issue ENG-9 not found").with_hint("check the id"),
        );
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.code, exit_code::NOT_FOUND);
        assert_eq!(cli.hint.as_deref(), Some("check the id"));
    }

    #[test]
    fn test_plain_messages() {
        let err = anyhow::anyhow!("Something Broke");
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.code, exit_code::GENERAL);
        assert_eq!(cli.message, "something broke");
    }
}
