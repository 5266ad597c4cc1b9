//! Team handlers.

use anyhow::Result;
use lnr::{LinearClient, Team};
use rust_i18n::t;

use crate::config::Config;
use crate::error::CliError;

/// Pick the team key: the explicit flag, then `default_team`.
pub fn team_key(explicit: Option<String>, config: &Config) -> Result<String> {
    explicit
        .or_else(|| config.default_team.clone())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| CliError::new(t!("team_required")).with_hint(t!("hint_team")).into())
}

/// Find a team by key or name, listing the available keys when it is missing.
pub async fn find_team(client: &LinearClient, key_or_name: &str) -> Result<Team> {
    tracing::debug!("resolving team {}", key_or_name);
    match client.teams().find(key_or_name).await? {
        Some(team) => Ok(team),
        None => Err(team_not_found(client, key_or_name).await?.into()),
    }
}

/// `team "x" not found` with the available keys as a hint.
pub async fn team_not_found(client: &LinearClient, key: &str) -> Result<CliError> {
    let keys = client.teams().keys().await?;
    Ok(CliError::not_found(t!("team_not_found", key = key))
        .with_hint(t!("hint_available_teams", teams = keys.join(", "))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_team_wins() {
        let config = Config {
            default_team: Some("OPS".into()),
            ..Default::default()
        };
        assert_eq!(team_key(Some("ENG".into()), &config).unwrap(), "ENG");
        assert_eq!(team_key(None, &config).unwrap(), "OPS");
    }

    #[test]
    fn test_missing_team() {
        let err = team_key(None, &Config::default()).unwrap_err();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli.message, "team is required");
        assert!(cli.hint.as_deref().unwrap().contains("default_team"));
    }
}
