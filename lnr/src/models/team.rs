//! Team models.

use serde::{Deserialize, Serialize};

/// A team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Team UUID.
    pub id: String,
    /// Short key used in issue identifiers.
    pub key: String,
    /// Display name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Team {
    /// Check if `key_or_name` matches this team's key or name, ignoring case.
    pub fn matches(&self, key_or_name: &str) -> bool {
        self.key.eq_ignore_ascii_case(key_or_name) || self.name.eq_ignore_ascii_case(key_or_name)
    }
}

/// A member of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A workflow state, such as "In Progress".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    /// State category: `triage`, `backlog`, `unstarted`, `started`, `completed` or `canceled`.
    #[serde(rename = "type")]
    pub state_type: String,
}

impl WorkflowState {
    /// Check if issues in this state are finished.
    pub fn is_closed(&self) -> bool {
        matches!(self.state_type.as_str(), "completed" | "canceled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_matches() {
        let team = Team {
            id: "t1".into(),
            key: "ENG".into(),
            name: "Engineering".into(),
            description: None,
        };
        assert!(team.matches("eng"));
        assert!(team.matches("ENGINEERING"));
        assert!(!team.matches("design"));
    }

    #[test]
    fn test_state_is_closed() {
        let state = |t: &str| WorkflowState {
            id: "s".into(),
            name: "State".into(),
            state_type: t.into(),
        };
        assert!(state("completed").is_closed());
        assert!(state("canceled").is_closed());
        assert!(!state("started").is_closed());
    }
}
