//! Team API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::{fetch, Connection};
use crate::{
    client::LinearClientInner,
    error::Result,
    models::{Team, TeamMember, WorkflowState},
};

const LIST_QUERY: &str = "query Teams { teams { nodes { id key name description } } }";

const BY_KEY_QUERY: &str = "query TeamByKey($key: String!) { \
     teams(filter: { key: { eq: $key } }) { nodes { id key name description } } }";

const MEMBERS_QUERY: &str = "query TeamMembers($key: String!) { \
     teams(filter: { key: { eq: $key } }) { nodes { members { nodes { id name email } } } } }";

const STATES_QUERY: &str =
    "query TeamStates($id: String!) { team(id: $id) { states { nodes { id name type } } } }";

/// API for team operations.
pub struct TeamApi {
    client: Arc<LinearClientInner>,
}

impl TeamApi {
    pub(crate) fn new(client: Arc<LinearClientInner>) -> Self {
        Self { client }
    }

    /// List all teams.
    pub async fn list(&self) -> Result<Vec<Team>> {
        let teams: Connection<Team> = fetch(&self.client, LIST_QUERY, json!({}), "teams").await?;
        Ok(teams.nodes)
    }

    /// Get a team by key. The key is upper-cased first.
    pub async fn get(&self, key: &str) -> Result<Option<Team>> {
        let teams: Connection<Team> = fetch(
            &self.client,
            BY_KEY_QUERY,
            json!({ "key": key.to_uppercase() }),
            "teams",
        )
        .await?;
        Ok(teams.nodes.into_iter().next())
    }

    /// List members of the team with the given key. Unknown teams have no members.
    pub async fn members(&self, key: &str) -> Result<Vec<TeamMember>> {
        #[derive(Deserialize)]
        struct Raw {
            members: Connection<TeamMember>,
        }

        let teams: Connection<Raw> = fetch(
            &self.client,
            MEMBERS_QUERY,
            json!({ "key": key.to_uppercase() }),
            "teams",
        )
        .await?;
        Ok(teams
            .nodes
            .into_iter()
            .next()
            .map(|t| t.members.nodes)
            .unwrap_or_default())
    }

    /// Find a team by key or name, ignoring case.
    pub async fn find(&self, key_or_name: &str) -> Result<Option<Team>> {
        let teams = self.list().await?;
        Ok(teams.into_iter().find(|t| t.matches(key_or_name)))
    }

    /// Keys of all teams, for error hints.
    pub async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.list().await?.into_iter().map(|t| t.key).collect())
    }

    /// Workflow states of a team.
    pub async fn states(&self, team_id: &str) -> Result<Vec<WorkflowState>> {
        #[derive(Deserialize)]
        struct Raw {
            states: Connection<WorkflowState>,
        }

        let team: Raw = fetch(&self.client, STATES_QUERY, json!({ "id": team_id }), "team").await?;
        Ok(team.states.nodes)
    }
}
