//! Issue API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{fetch, fetch_opt, issue_fields, issues_from, mutate, Connection, IdRef, IssueNode};
use crate::{
    client::LinearClientInner,
    error::Result,
    models::{CreateIssueInput, Issue, IssueContext, IssueFilter, RelationKind, UpdateIssueInput},
};

const LIST_QUERY: &str = concat!(
    "query Issues($filter: IssueFilter) { issues(filter: $filter) { nodes { ",
    issue_fields!(),
    " } } }"
);

const GET_QUERY: &str = concat!(
    "query Issue($id: String!) { issue(id: $id) { ",
    issue_fields!(),
    " } }"
);

const CHILDREN_QUERY: &str = concat!(
    "query IssueChildren($id: String!) { issue(id: $id) { children { nodes { ",
    issue_fields!(),
    " } } } }"
);

const CONTEXT_QUERY: &str =
    "query IssueContext($id: String!) { issue(id: $id) { team { id } labels { nodes { id } } } }";

const SEARCH_QUERY: &str = concat!(
    "query SearchIssues($term: String!) { searchIssues(term: $term) { nodes { ",
    issue_fields!(),
    " } } }"
);

const CREATE_MUTATION: &str = concat!(
    "mutation IssueCreate($input: IssueCreateInput!) { issueCreate(input: $input) { success issue { ",
    issue_fields!(),
    " } } }"
);

const UPDATE_MUTATION: &str = "mutation IssueUpdate($id: String!, $input: IssueUpdateInput!) { \
     issueUpdate(id: $id, input: $input) { success } }";

const ARCHIVE_MUTATION: &str =
    "mutation IssueArchive($id: String!) { issueArchive(id: $id) { success } }";

const RELATION_MUTATION: &str = "mutation IssueRelationCreate($input: IssueRelationCreateInput!) { \
     issueRelationCreate(input: $input) { success } }";

/// API for issue operations.
pub struct IssueApi {
    client: Arc<LinearClientInner>,
}

impl IssueApi {
    pub(crate) fn new(client: Arc<LinearClientInner>) -> Self {
        Self { client }
    }

    /// List issues.
    pub fn list(&self) -> IssueListBuilder {
        IssueListBuilder {
            client: self.client.clone(),
            filter: IssueFilter::default(),
        }
    }

    /// Get an issue by identifier (`ENG-123`) or UUID.
    pub async fn get(&self, identifier: &str) -> Result<Option<Issue>> {
        let node: Option<IssueNode> =
            fetch_opt(&self.client, GET_QUERY, json!({ "id": identifier }), "issue").await?;
        Ok(node.map(Issue::from))
    }

    /// Create an issue.
    pub async fn create(&self, input: &CreateIssueInput) -> Result<Issue> {
        #[derive(Deserialize)]
        struct Created {
            issue: IssueNode,
        }

        let created: Created = mutate(
            &self.client,
            CREATE_MUTATION,
            json!({ "input": input }),
            "issueCreate",
        )
        .await?;
        Ok(created.issue.into())
    }

    /// Update an issue.
    pub async fn update(&self, id: &str, input: &UpdateIssueInput) -> Result<()> {
        mutate::<Value>(
            &self.client,
            UPDATE_MUTATION,
            json!({ "id": id, "input": input }),
            "issueUpdate",
        )
        .await?;
        Ok(())
    }

    /// Archive an issue.
    pub async fn archive(&self, id: &str) -> Result<()> {
        mutate::<Value>(&self.client, ARCHIVE_MUTATION, json!({ "id": id }), "issueArchive")
            .await?;
        Ok(())
    }

    /// Get the sub-issues of an issue.
    pub async fn children(&self, id: &str) -> Result<Vec<Issue>> {
        #[derive(Deserialize)]
        struct Children {
            children: Connection<IssueNode>,
        }

        let parent: Option<Children> =
            fetch_opt(&self.client, CHILDREN_QUERY, json!({ "id": id }), "issue").await?;
        Ok(parent.map(|p| issues_from(p.children)).unwrap_or_default())
    }

    /// Get the owning team and current labels of an issue.
    pub async fn context(&self, id: &str) -> Result<IssueContext> {
        #[derive(Deserialize)]
        struct Raw {
            team: Option<IdRef>,
            labels: Connection<IdRef>,
        }

        let raw: Option<Raw> =
            fetch_opt(&self.client, CONTEXT_QUERY, json!({ "id": id }), "issue").await?;
        Ok(raw
            .map(|r| IssueContext {
                team_id: r.team.map(|t| t.id),
                label_ids: r.labels.nodes.into_iter().map(|l| l.id).collect(),
            })
            .unwrap_or_default())
    }

    /// Full-text issue search, optionally restricted to a team key.
    pub async fn search(&self, term: &str, team: Option<&str>) -> Result<Vec<Issue>> {
        let connection: Connection<IssueNode> = fetch(
            &self.client,
            SEARCH_QUERY,
            json!({ "term": term }),
            "searchIssues",
        )
        .await?;

        let mut issues = issues_from(connection);
        if let Some(team) = team {
            let prefix = format!("{}-", team.to_uppercase());
            issues.retain(|i| i.identifier.starts_with(&prefix));
        }
        Ok(issues)
    }

    /// Create a relation from `issue_id` to `related_id`.
    pub async fn relate(&self, issue_id: &str, related_id: &str, kind: RelationKind) -> Result<()> {
        let input = json!({
            "issueId": issue_id,
            "relatedIssueId": related_id,
            "type": kind.param(),
        });
        mutate::<Value>(
            &self.client,
            RELATION_MUTATION,
            json!({ "input": input }),
            "issueRelationCreate",
        )
        .await?;
        Ok(())
    }
}

/// Builder for listing issues.
pub struct IssueListBuilder {
    client: Arc<LinearClientInner>,
    filter: IssueFilter,
}

impl IssueListBuilder {
    /// Replace the whole filter.
    pub fn filter(mut self, filter: IssueFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Only issues of the team with this key.
    pub fn team(mut self, key: impl Into<String>) -> Self {
        self.filter.team = Some(key.into());
        self
    }

    /// Only issues in this state (case-insensitive).
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.filter.state = Some(state.into());
        self
    }

    /// Only issues assigned to this email, or to the viewer with `@me`.
    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.filter.assignee = Some(assignee.into());
        self
    }

    /// Only issues carrying this label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.filter.label = Some(label.into());
        self
    }

    /// Only issues in this project.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.filter.project = Some(project.into());
        self
    }

    /// Send the request.
    pub async fn send(self) -> Result<Vec<Issue>> {
        let connection: Connection<IssueNode> = fetch(
            &self.client,
            LIST_QUERY,
            json!({ "filter": filter_variables(&self.filter) }),
            "issues",
        )
        .await?;
        Ok(issues_from(connection))
    }
}

/// Translate a list filter into the API's `IssueFilter` input.
fn filter_variables(filter: &IssueFilter) -> Value {
    let mut api = Map::new();
    if let Some(team) = &filter.team {
        api.insert("team".into(), json!({ "key": { "eq": team } }));
    }
    if let Some(state) = &filter.state {
        api.insert("state".into(), json!({ "name": { "eqIgnoreCase": state } }));
    }
    if let Some(assignee) = &filter.assignee {
        let value = if assignee == "@me" {
            json!({ "isMe": { "eq": true } })
        } else {
            json!({ "email": { "eq": assignee } })
        };
        api.insert("assignee".into(), value);
    }
    if let Some(label) = &filter.label {
        api.insert(
            "labels".into(),
            json!({ "some": { "name": { "eqIgnoreCase": label } } }),
        );
    }
    if let Some(project) = &filter.project {
        api.insert("project".into(), json!({ "name": { "eqIgnoreCase": project } }));
    }
    Value::Object(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_util::{client, issue_node};
    use crate::client::mock::MockTransport;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_variables() {
        let filter = IssueFilter {
            team: Some("ENG".into()),
            state: Some("todo".into()),
            assignee: Some("@me".into()),
            ..Default::default()
        };
        assert_eq!(
            filter_variables(&filter),
            json!({
                "team": { "key": { "eq": "ENG" } },
                "state": { "name": { "eqIgnoreCase": "todo" } },
                "assignee": { "isMe": { "eq": true } }
            })
        );
        assert_eq!(filter_variables(&IssueFilter::default()), json!({}));
    }

    #[tokio::test]
    async fn test_list_issues() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "issues": { "nodes": [issue_node("ENG-1", "first"), issue_node("ENG-2", "second")] }
        })));
        let issues = client(&mock)
            .issues()
            .list()
            .team("ENG")
            .label("bug")
            .send()
            .await
            .unwrap();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].identifier, "ENG-1");
        assert_eq!(issues[0].state.as_deref(), Some("In Progress"));
        assert_eq!(issues[0].priority, Some(2));

        let requests = mock.requests();
        assert_eq!(
            requests[0].variables["filter"]["labels"],
            json!({ "some": { "name": { "eqIgnoreCase": "bug" } } })
        );
    }

    #[tokio::test]
    async fn test_get_missing_issue() {
        let mock = Arc::new(
            MockTransport::new()
                .respond(json!({ "issue": null }))
                .fail(Error::not_found("Entity not found")),
        );
        let api = client(&mock).issues();
        assert!(api.get("ENG-404").await.unwrap().is_none());
        assert!(api.get("ENG-405").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_issue_with_parent() {
        let mut node = issue_node("ENG-7", "child");
        node["parent"] = json!({ "id": "p-1", "identifier": "ENG-1" });
        let mock = Arc::new(MockTransport::new().respond(json!({ "issue": node })));

        let issue = client(&mock).issues().get("ENG-7").await.unwrap().unwrap();
        assert_eq!(issue.parent_id.as_deref(), Some("p-1"));
        assert_eq!(issue.parent.as_deref(), Some("ENG-1"));
        assert_eq!(mock.requests()[0].variables, json!({ "id": "ENG-7" }));
    }

    #[tokio::test]
    async fn test_create_failure() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "issueCreate": { "success": false, "issue": null }
        })));
        let input = CreateIssueInput {
            team_id: "t1".into(),
            title: "broken".into(),
            ..Default::default()
        };
        let err = client(&mock).issues().create(&input).await.unwrap_err();
        assert!(matches!(err, Error::MutationFailed(_)));
    }

    #[tokio::test]
    async fn test_search_filters_by_team_prefix() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "searchIssues": { "nodes": [
                issue_node("ENG-1", "login bug"),
                issue_node("DES-2", "login screen"),
                issue_node("ENGX-3", "login api")
            ] }
        })));
        let issues = client(&mock)
            .issues()
            .search("login", Some("eng"))
            .await
            .unwrap();
        let ids: Vec<&str> = issues.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(ids, vec!["ENG-1"]);
    }

    #[tokio::test]
    async fn test_context() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "issue": { "team": { "id": "t1" }, "labels": { "nodes": [{ "id": "l1" }, { "id": "l2" }] } }
        })));
        let context = client(&mock).issues().context("ENG-1").await.unwrap();
        assert_eq!(context.team_id.as_deref(), Some("t1"));
        assert_eq!(context.label_ids, vec!["l1".to_owned(), "l2".to_owned()]);
    }

    #[tokio::test]
    async fn test_relate_sends_kind() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "issueRelationCreate": { "success": true }
        })));
        client(&mock)
            .issues()
            .relate("a", "b", RelationKind::Blocks)
            .await
            .unwrap();
        assert_eq!(mock.requests()[0].variables["input"]["type"], "blocks");
    }
}
