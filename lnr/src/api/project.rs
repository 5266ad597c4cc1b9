//! Project API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{fetch, fetch_opt, issue_fields, issues_from, mutate, Connection, IssueNode};
use crate::{
    client::LinearClientInner,
    error::Result,
    models::{CreateProjectInput, Issue, Project, Team},
};

macro_rules! project_fields {
    () => {
        "id name description state progress startDate targetDate url"
    };
}

const LIST_QUERY: &str = concat!(
    "query Projects { projects { nodes { ",
    project_fields!(),
    " } } }"
);

const TEAM_PROJECTS_QUERY: &str = concat!(
    "query TeamProjects($id: String!) { team(id: $id) { projects { nodes { ",
    project_fields!(),
    " } } } }"
);

const ISSUES_QUERY: &str = concat!(
    "query ProjectIssues($id: String!) { project(id: $id) { issues { nodes { ",
    issue_fields!(),
    " } } } }"
);

const CREATE_MUTATION: &str = concat!(
    "mutation ProjectCreate($input: ProjectCreateInput!) { projectCreate(input: $input) { success project { ",
    project_fields!(),
    " } } }"
);

const DELETE_MUTATION: &str =
    "mutation ProjectDelete($id: String!) { projectDelete(id: $id) { success } }";

const TEAMS_QUERY: &str = "query Teams { teams { nodes { id key name description } } }";

/// API for project operations.
pub struct ProjectApi {
    client: Arc<LinearClientInner>,
}

impl ProjectApi {
    pub(crate) fn new(client: Arc<LinearClientInner>) -> Self {
        Self { client }
    }

    /// List projects, optionally of one team (key or name) and matching a status.
    ///
    /// An unknown team yields an empty list. The status matches exactly or as
    /// a substring, ignoring case.
    pub async fn list(&self, team: Option<&str>, status: Option<&str>) -> Result<Vec<Project>> {
        let projects = match team {
            Some(team) => {
                let teams: Connection<Team> =
                    fetch(&self.client, TEAMS_QUERY, json!({}), "teams").await?;
                let Some(team) = teams.nodes.into_iter().find(|t| t.matches(team)) else {
                    return Ok(Vec::new());
                };

                #[derive(Deserialize)]
                struct Raw {
                    projects: Connection<Project>,
                }

                let raw: Raw = fetch(
                    &self.client,
                    TEAM_PROJECTS_QUERY,
                    json!({ "id": team.id }),
                    "team",
                )
                .await?;
                raw.projects.nodes
            }
            None => self.all().await?,
        };

        Ok(match status {
            Some(status) => projects
                .into_iter()
                .filter(|p| p.status_matches(status))
                .collect(),
            None => projects,
        })
    }

    /// Find a project by name (ignoring case) or ID.
    pub async fn get(&self, name_or_id: &str) -> Result<Option<Project>> {
        let lower = name_or_id.to_lowercase();
        Ok(self
            .all()
            .await?
            .into_iter()
            .find(|p| p.name.to_lowercase() == lower || p.id == name_or_id))
    }

    /// Issues of a project. Unknown projects have no issues.
    pub async fn issues(&self, name_or_id: &str) -> Result<Vec<Issue>> {
        let Some(project) = self.get(name_or_id).await? else {
            return Ok(Vec::new());
        };

        #[derive(Deserialize)]
        struct Raw {
            issues: Connection<IssueNode>,
        }

        let raw: Option<Raw> = fetch_opt(
            &self.client,
            ISSUES_QUERY,
            json!({ "id": project.id }),
            "project",
        )
        .await?;
        Ok(raw.map(|r| issues_from(r.issues)).unwrap_or_default())
    }

    /// Create a project.
    pub async fn create(&self, input: &CreateProjectInput) -> Result<Project> {
        #[derive(Deserialize)]
        struct Created {
            project: Project,
        }

        let created: Created = mutate(
            &self.client,
            CREATE_MUTATION,
            json!({ "input": input }),
            "projectCreate",
        )
        .await?;
        Ok(created.project)
    }

    /// Delete a project by name or ID. Returns `false` if no project matched.
    pub async fn delete(&self, name_or_id: &str) -> Result<bool> {
        let Some(project) = self.get(name_or_id).await? else {
            return Ok(false);
        };
        mutate::<Value>(
            &self.client,
            DELETE_MUTATION,
            json!({ "id": project.id }),
            "projectDelete",
        )
        .await?;
        Ok(true)
    }

    async fn all(&self) -> Result<Vec<Project>> {
        let projects: Connection<Project> =
            fetch(&self.client, LIST_QUERY, json!({}), "projects").await?;
        Ok(projects.nodes)
    }
}
