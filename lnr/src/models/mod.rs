//! Data models for Linear entities.

mod comment;
mod cycle;
mod document;
mod issue;
mod label;
mod project;
mod team;
mod user;

pub use comment::{
    aggregate_reactions, Comment, CommentReaction, RawReaction, RawSyncMetadata, Reaction,
    SyncInfo, SyncMeta,
};
pub use cycle::Cycle;
pub use document::{CreateDocumentInput, Document, UpdateDocumentInput};
pub use issue::{
    priority_from_str, CreateIssueInput, Issue, IssueContext, IssueFilter, IssueIdentifier,
    RelationKind, UpdateIssueInput,
};
pub use label::{CreateLabelInput, Label, UpdateLabelInput};
pub use project::{CreateProjectInput, Project};
pub use team::{Team, TeamMember, WorkflowState};
pub use user::User;
