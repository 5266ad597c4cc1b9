//! Rust client library for the Linear GraphQL API.

pub mod api;
pub mod client;
pub mod error;
pub mod models;

// Re-export main types
pub use client::{ApiKey, HttpConfig, LinearClient, LinearClientBuilder, Transport};
pub use error::{Error, Result};

// Re-export commonly used models
pub use models::{
    priority_from_str, Comment, CommentReaction, CreateDocumentInput, CreateIssueInput,
    CreateLabelInput, CreateProjectInput, Cycle, Document, Issue, IssueContext, IssueFilter,
    IssueIdentifier, Label, Project, Reaction, RelationKind, SyncInfo, SyncMeta, Team, TeamMember,
    UpdateDocumentInput, UpdateIssueInput, UpdateLabelInput, User, WorkflowState,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = LinearClient::builder().build();
        assert!(matches!(client, Err(Error::AuthRequired)));
    }

    #[test]
    fn test_client_with_key() {
        let client = LinearClient::builder()
            .api_key("lin_api_0123456789")
            .build();
        assert!(client.is_ok());
    }
}
