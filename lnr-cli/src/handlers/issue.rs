//! Issue handlers: resolving names given on the command line to IDs.

use anyhow::Result;
use lnr::{Issue, Label, LinearClient};
use rust_i18n::t;
use std::collections::HashSet;

use crate::error::CliError;

/// A `--label` argument: `+name` or `name` adds, `-name` removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelChange {
    Add(String),
    Remove(String),
}

impl LabelChange {
    pub fn parse(raw: &str) -> Self {
        if let Some(name) = raw.strip_prefix('+') {
            LabelChange::Add(name.to_owned())
        } else if let Some(name) = raw.strip_prefix('-') {
            LabelChange::Remove(name.to_owned())
        } else {
            LabelChange::Add(raw.to_owned())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LabelChange::Add(name) | LabelChange::Remove(name) => name,
        }
    }
}

/// Apply a label change to the current label IDs.
///
/// Returns `None` when nothing changes, so the update can be skipped.
pub fn apply_label_change(
    current: &[String],
    available: &[Label],
    change: &LabelChange,
) -> Result<Option<Vec<String>>> {
    let name = change.name();
    let label = available
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            let names: Vec<&str> = available.iter().map(|l| l.name.as_str()).collect();
            CliError::new(t!("label_not_found", name = name))
                .with_hint(t!("hint_available_labels", labels = names.join(", ")))
        })?;

    let present = current.iter().any(|id| id == &label.id);
    let updated = match change {
        LabelChange::Add(_) if present => None,
        LabelChange::Add(_) => {
            let mut ids = current.to_vec();
            ids.push(label.id.clone());
            Some(ids)
        }
        LabelChange::Remove(_) => Some(
            current
                .iter()
                .filter(|id| *id != &label.id)
                .cloned()
                .collect(),
        ),
    };
    Ok(updated)
}

/// Fetch an issue by identifier, failing with a not-found error.
pub async fn get_issue(client: &LinearClient, identifier: &str) -> Result<Issue> {
    client
        .issues()
        .get(identifier)
        .await?
        .ok_or_else(|| CliError::not_found(t!("issue_not_found", id = identifier)).into())
}

/// Resolve the parent issue's UUID.
pub async fn resolve_parent(client: &LinearClient, identifier: &str) -> Result<String> {
    tracing::debug!("resolving parent {}", identifier);
    match client.issues().get(identifier).await? {
        Some(issue) => Ok(issue.id),
        None => Err(CliError::new(t!("parent_not_found", id = identifier)).into()),
    }
}

/// Resolve an issue named by a relation flag.
pub async fn resolve_related(client: &LinearClient, identifier: &str) -> Result<String> {
    match client.issues().get(identifier).await? {
        Some(issue) => Ok(issue.id),
        None => Err(CliError::new(t!("related_not_found", id = identifier)).into()),
    }
}

/// Resolve an assignee: `@me` is the viewer, anything else an email address.
pub async fn resolve_assignee(client: &LinearClient, assignee: &str) -> Result<String> {
    tracing::debug!("resolving assignee {}", assignee);
    if assignee == "@me" {
        return Ok(client.users().viewer().await?.id);
    }
    match client.users().find_by_email(assignee).await? {
        Some(user) => Ok(user.id),
        None => Err(CliError::new(t!("user_not_found", user = assignee)).into()),
    }
}

/// Resolve a workflow state name within a team, case-insensitively.
pub async fn resolve_state(client: &LinearClient, team_id: &str, name: &str) -> Result<String> {
    tracing::debug!("resolving state {} in team {}", name, team_id);
    let states = client.teams().states(team_id).await?;
    match states.iter().find(|s| s.name.eq_ignore_ascii_case(name)) {
        Some(state) => Ok(state.id.clone()),
        None => {
            let names: Vec<&str> = states.iter().map(|s| s.name.as_str()).collect();
            Err(CliError::new(t!("state_not_found", name = name))
                .with_hint(t!("hint_available_states", states = names.join(", ")))
                .into())
        }
    }
}

/// Resolve label names for a new issue.
pub async fn resolve_labels(
    client: &LinearClient,
    team_id: &str,
    names: &[String],
) -> Result<Vec<String>> {
    let available = client.labels().list(Some(team_id)).await?;
    let mut ids = Vec::new();
    for name in names {
        let change = LabelChange::Add(name.clone());
        if let Some(updated) = apply_label_change(&ids, &available, &change)? {
            ids = updated;
        }
    }
    Ok(ids)
}

/// Concatenate issue lists, keeping the first occurrence of each ID.
pub fn merge_issues(lists: impl IntoIterator<Item = Vec<Issue>>) -> Vec<Issue> {
    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|issue| seen.insert(issue.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn label(id: &str, name: &str) -> Label {
        Label {
            id: id.to_owned(),
            name: name.to_owned(),
            color: "#000000".to_owned(),
            description: None,
        }
    }

    fn labels() -> Vec<Label> {
        vec![label("l-bug", "Bug"), label("l-ui", "UI")]
    }

    fn issue(id: &str) -> Issue {
        Issue {
            id: id.to_owned(),
            identifier: format!("ENG-{}", id),
            title: "title".to_owned(),
            description: None,
            state: None,
            assignee: None,
            priority: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            url: String::new(),
            branch_name: None,
            parent_id: None,
            parent: None,
        }
    }

    #[test]
    fn test_parse_label_change() {
        assert_eq!(LabelChange::parse("+bug"), LabelChange::Add("bug".into()));
        assert_eq!(LabelChange::parse("-bug"), LabelChange::Remove("bug".into()));
        assert_eq!(LabelChange::parse("bug"), LabelChange::Add("bug".into()));
    }

    #[test]
    fn test_add_label() {
        let current = vec!["l-ui".to_owned()];
        let updated = apply_label_change(&current, &labels(), &LabelChange::parse("+bug")).unwrap();
        assert_eq!(updated, Some(vec!["l-ui".to_owned(), "l-bug".to_owned()]));
    }

    #[test]
    fn test_add_present_label_is_noop() {
        let current = vec!["l-bug".to_owned()];
        let updated = apply_label_change(&current, &labels(), &LabelChange::parse("BUG")).unwrap();
        assert_eq!(updated, None);
    }

    #[test]
    fn test_remove_label() {
        let current = vec!["l-bug".to_owned(), "l-ui".to_owned()];
        let updated = apply_label_change(&current, &labels(), &LabelChange::parse("-bug")).unwrap();
        assert_eq!(updated, Some(vec!["l-ui".to_owned()]));
    }

    #[test]
    fn test_unknown_label_lists_available() {
        let err = apply_label_change(&[], &labels(), &LabelChange::parse("+perf")).unwrap_err();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli.message, "label \"perf\" not found");
        assert_eq!(cli.hint.as_deref(), Some("available labels: Bug, UI"));
    }

    #[test]
    fn test_merge_issues_dedupes() {
        let merged = merge_issues(vec![vec![issue("1"), issue("2")], vec![issue("2"), issue("3")]]);
        let ids: Vec<&str> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
