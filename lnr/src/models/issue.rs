//! Issue models.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Issue UUID.
    pub id: String,
    /// Human readable identifier, e.g. `ENG-123`.
    pub identifier: String,
    /// Title.
    pub title: String,
    /// Markdown description.
    pub description: Option<String>,
    /// Workflow state name.
    pub state: Option<String>,
    /// Assignee name.
    pub assignee: Option<String>,
    /// Priority, 0 (none) to 4 (low).
    pub priority: Option<u8>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Web URL.
    pub url: String,
    /// Suggested git branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    /// Parent issue UUID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Parent issue identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Team and label context needed to update an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueContext {
    /// Owning team.
    pub team_id: Option<String>,
    /// Labels currently applied.
    pub label_ids: Vec<String>,
}

/// Filter for listing issues.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Team key.
    pub team: Option<String>,
    /// Workflow state name.
    pub state: Option<String>,
    /// Assignee email, or `@me`.
    pub assignee: Option<String>,
    /// Label name.
    pub label: Option<String>,
    /// Project name.
    pub project: Option<String>,
}

/// Input for creating an issue.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueInput {
    pub team_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Input for updating an issue. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl UpdateIssueInput {
    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.state_id.is_none()
            && self.assignee_id.is_none()
            && self.priority.is_none()
            && self.label_ids.is_none()
            && self.parent_id.is_none()
    }
}

/// Kind of relation between two issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// The first issue blocks the second.
    Blocks,
    /// The issues are related.
    Related,
}

impl RelationKind {
    /// Get the API enum value.
    pub fn param(&self) -> &'static str {
        match self {
            RelationKind::Blocks => "blocks",
            RelationKind::Related => "related",
        }
    }
}

/// Map a priority name to its numeric value. Unknown names map to 0.
pub fn priority_from_str(priority: &str) -> u8 {
    match priority.to_lowercase().as_str() {
        "urgent" => 1,
        "high" => 2,
        "medium" => 3,
        "low" => 4,
        _ => 0,
    }
}

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^([A-Za-z][A-Za-z0-9]*)-(\d+)$").unwrap();
}

/// A parsed issue identifier such as `ENG-123`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueIdentifier {
    /// Team key, upper-cased.
    pub team_key: String,
    /// Issue number within the team.
    pub number: u64,
}

impl FromStr for IssueIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = IDENTIFIER_RE
            .captures(s.trim())
            .ok_or_else(|| Error::InvalidArgument(format!("not an issue identifier: {}", s)))?;
        let number = caps[2]
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("issue number out of range: {}", s)))?;
        Ok(Self {
            team_key: caps[1].to_uppercase(),
            number,
        })
    }
}

impl fmt::Display for IssueIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team_key, self.number)
    }
}

impl Issue {
    /// Check if this issue belongs to the team with the given key.
    pub fn in_team(&self, team_key: &str) -> bool {
        self.identifier
            .parse::<IssueIdentifier>()
            .map(|id| id.team_key.eq_ignore_ascii_case(team_key))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_str() {
        assert_eq!(priority_from_str("Urgent"), 1);
        assert_eq!(priority_from_str("high"), 2);
        assert_eq!(priority_from_str("medium"), 3);
        assert_eq!(priority_from_str("LOW"), 4);
        assert_eq!(priority_from_str("none"), 0);
        assert_eq!(priority_from_str("whenever"), 0);
    }

    #[test]
    fn test_parse_identifier() {
        let id: IssueIdentifier = "eng-42".parse().unwrap();
        assert_eq!(id.team_key, "ENG");
        assert_eq!(id.number, 42);
        assert_eq!(id.to_string(), "ENG-42");

        assert!("42".parse::<IssueIdentifier>().is_err());
        assert!("ENG-".parse::<IssueIdentifier>().is_err());
    }

    #[test]
    fn test_update_input_serialization() {
        let input = UpdateIssueInput {
            priority: Some(2),
            ..Default::default()
        };
        assert!(!input.is_empty());
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({ "priority": 2 })
        );
        assert!(UpdateIssueInput::default().is_empty());
    }
}
