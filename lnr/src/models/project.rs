//! Project models.

use serde::{Deserialize, Serialize};

/// A project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Project status, e.g. `started` or `planned`.
    pub state: String,
    /// Completion ratio between 0 and 1.
    pub progress: f64,
    /// Calendar date, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub target_date: Option<String>,
    pub url: String,
}

impl Project {
    /// Check if the status matches `status` exactly or as a substring, ignoring case.
    pub fn status_matches(&self, status: &str) -> bool {
        let state = self.state.to_lowercase();
        let status = status.to_lowercase();
        state == status || state.contains(&status)
    }

    /// Progress as a whole percentage.
    pub fn percent(&self) -> u32 {
        (self.progress * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Input for creating a project.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    pub name: String,
    pub team_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_percent() {
        let project = Project {
            id: "p1".into(),
            name: "Launch".into(),
            description: None,
            state: "Started".into(),
            progress: 0.426,
            start_date: None,
            target_date: Some("2024-06-01".into()),
            url: "https://linear.app/p/launch".into(),
        };
        assert!(project.status_matches("started"));
        assert!(project.status_matches("art"));
        assert!(!project.status_matches("planned"));
        assert_eq!(project.percent(), 43);
    }
}
