//! Cycle API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::{fetch_opt, issue_fields, issues_from, Connection, IssueNode};
use crate::{
    client::LinearClientInner,
    error::Result,
    models::{Cycle, Issue},
};

const LIST_QUERY: &str = "query TeamCycles($key: String!) { team(id: $key) { \
     cycles { nodes { id number name startsAt endsAt progress } } } }";

const CURRENT_QUERY: &str = "query ActiveCycle($key: String!) { team(id: $key) { \
     activeCycle { id number name startsAt endsAt progress } } }";

const CURRENT_ISSUES_QUERY: &str = concat!(
    "query ActiveCycleIssues($key: String!) { team(id: $key) { activeCycle { issues { nodes { ",
    issue_fields!(),
    " } } } } }"
);

/// API for cycle operations.
pub struct CycleApi {
    client: Arc<LinearClientInner>,
}

impl CycleApi {
    pub(crate) fn new(client: Arc<LinearClientInner>) -> Self {
        Self { client }
    }

    /// List cycles of a team. Unknown teams have no cycles.
    pub async fn list(&self, team_key: &str) -> Result<Vec<Cycle>> {
        #[derive(Deserialize)]
        struct Raw {
            cycles: Connection<Cycle>,
        }

        let team: Option<Raw> =
            fetch_opt(&self.client, LIST_QUERY, json!({ "key": team_key }), "team").await?;
        Ok(team.map(|t| t.cycles.nodes).unwrap_or_default())
    }

    /// The team's active cycle, if any.
    pub async fn current(&self, team_key: &str) -> Result<Option<Cycle>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            active_cycle: Option<Cycle>,
        }

        let team: Option<Raw> =
            fetch_opt(&self.client, CURRENT_QUERY, json!({ "key": team_key }), "team").await?;
        Ok(team.and_then(|t| t.active_cycle))
    }

    /// Issues in the team's active cycle.
    pub async fn current_issues(&self, team_key: &str) -> Result<Vec<Issue>> {
        #[derive(Deserialize)]
        struct RawCycle {
            issues: Connection<IssueNode>,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            active_cycle: Option<RawCycle>,
        }

        let team: Option<Raw> = fetch_opt(
            &self.client,
            CURRENT_ISSUES_QUERY,
            json!({ "key": team_key }),
            "team",
        )
        .await?;
        Ok(team
            .and_then(|t| t.active_cycle)
            .map(|c| issues_from(c.issues))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_util::{client, issue_node};
    use crate::client::mock::MockTransport;
    use crate::error::Error;

    #[tokio::test]
    async fn test_current_without_active_cycle() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "team": { "activeCycle": null }
        })));
        assert!(client(&mock).cycles().current("ENG").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "team": { "activeCycle": {
                "id": "cy1", "number": 12, "name": null,
                "startsAt": "2024-01-08T00:00:00.000Z",
                "endsAt": "2024-01-22T00:00:00.000Z",
                "progress": 0.25
            } }
        })));
        let cycle = client(&mock).cycles().current("ENG").await.unwrap().unwrap();
        assert_eq!(cycle.number, 12);
        assert_eq!(cycle.display_name(), "Cycle 12");
    }

    #[tokio::test]
    async fn test_list_unknown_team() {
        let mock = Arc::new(MockTransport::new().fail(Error::not_found("Entity not found: Team")));
        assert!(client(&mock).cycles().list("NOPE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_current_issues() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "team": { "activeCycle": { "issues": { "nodes": [issue_node("ENG-3", "in cycle")] } } }
        })));
        let issues = client(&mock).cycles().current_issues("ENG").await.unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].identifier, "ENG-3");
    }
}
