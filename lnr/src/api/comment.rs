//! Comment and reaction API.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{fetch_opt, mutate, Connection, IdRef, Named};
use crate::{
    client::LinearClientInner,
    error::Result,
    models::{aggregate_reactions, Comment, RawReaction, RawSyncMetadata, Reaction, SyncInfo},
};

const LIST_QUERY: &str =
    "query IssueComments($id: String!) { issue(id: $id) { comments(first: 250) { nodes { \
     id body createdAt updatedAt url \
     parent { id } user { name } externalUser { name } botActor { name } \
     reactions { emoji user { name } } \
     syncedWith { service metadata { \
       ... on ExternalEntitySlackMetadata { channelName messageUrl } \
       ... on ExternalEntityInfoGithubMetadata { owner repo number } \
       ... on ExternalEntityInfoJiraMetadata { issueKey projectId } \
     } } \
     } } } }";

const CREATE_MUTATION: &str = "mutation CommentCreate($input: CommentCreateInput!) { \
     commentCreate(input: $input) { success comment { id } } }";

const UPDATE_MUTATION: &str = "mutation CommentUpdate($id: String!, $input: CommentUpdateInput!) { \
     commentUpdate(id: $id, input: $input) { success } }";

const DELETE_MUTATION: &str =
    "mutation CommentDelete($id: String!) { commentDelete(id: $id) { success } }";

const REACT_MUTATION: &str = "mutation ReactionCreate($input: ReactionCreateInput!) { \
     reactionCreate(input: $input) { success reaction { id emoji } } }";

const UNREACT_MUTATION: &str =
    "mutation ReactionDelete($id: String!) { reactionDelete(id: $id) { success } }";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    id: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    url: String,
    parent: Option<IdRef>,
    user: Option<Named>,
    external_user: Option<Named>,
    bot_actor: Option<Named>,
    #[serde(default)]
    reactions: Vec<ReactionNode>,
    #[serde(default)]
    synced_with: Option<Vec<SyncNode>>,
}

#[derive(Debug, Deserialize)]
struct ReactionNode {
    emoji: String,
    user: Option<Named>,
}

#[derive(Debug, Deserialize)]
struct SyncNode {
    service: String,
    metadata: Option<RawSyncMetadata>,
}

impl From<CommentNode> for Comment {
    fn from(node: CommentNode) -> Self {
        let raw: Vec<RawReaction> = node
            .reactions
            .into_iter()
            .map(|r| RawReaction {
                emoji: r.emoji,
                user: r.user.map(|u| u.name),
            })
            .collect();

        Comment {
            id: node.id,
            body: node.body,
            created_at: node.created_at,
            updated_at: node.updated_at,
            user: node.user.map(|u| u.name),
            external_user: node.external_user.map(|u| u.name),
            bot_actor: node.bot_actor.map(|b| b.name),
            parent_id: node.parent.map(|p| p.id),
            url: node.url,
            reactions: aggregate_reactions(&raw),
            synced_with: node
                .synced_with
                .unwrap_or_default()
                .into_iter()
                .map(|s| SyncInfo::new(s.service, s.metadata.unwrap_or_default()))
                .collect(),
        }
    }
}

/// API for comments and reactions.
pub struct CommentApi {
    client: Arc<LinearClientInner>,
}

impl CommentApi {
    pub(crate) fn new(client: Arc<LinearClientInner>) -> Self {
        Self { client }
    }

    /// List all comments on an issue. Returns an empty list for unknown issues.
    pub async fn list(&self, issue_id: &str) -> Result<Vec<Comment>> {
        #[derive(Deserialize)]
        struct Raw {
            comments: Connection<CommentNode>,
        }

        let raw: Option<Raw> =
            fetch_opt(&self.client, LIST_QUERY, json!({ "id": issue_id }), "issue").await?;
        Ok(raw
            .map(|r| r.comments.nodes.into_iter().map(Comment::from).collect())
            .unwrap_or_default())
    }

    /// Add a top-level comment. Returns the new comment ID.
    pub async fn create(&self, issue_id: &str, body: &str) -> Result<String> {
        self.create_with(json!({ "issueId": issue_id, "body": body }))
            .await
    }

    /// Reply to an existing comment. Returns the new comment ID.
    pub async fn reply(&self, issue_id: &str, parent_id: &str, body: &str) -> Result<String> {
        self.create_with(json!({ "issueId": issue_id, "parentId": parent_id, "body": body }))
            .await
    }

    async fn create_with(&self, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Created {
            comment: IdRef,
        }

        let created: Created = mutate(
            &self.client,
            CREATE_MUTATION,
            json!({ "input": input }),
            "commentCreate",
        )
        .await?;
        Ok(created.comment.id)
    }

    /// Replace a comment's body.
    pub async fn update(&self, id: &str, body: &str) -> Result<()> {
        mutate::<Value>(
            &self.client,
            UPDATE_MUTATION,
            json!({ "id": id, "input": { "body": body } }),
            "commentUpdate",
        )
        .await?;
        Ok(())
    }

    /// Delete a comment.
    pub async fn delete(&self, id: &str) -> Result<()> {
        mutate::<Value>(&self.client, DELETE_MUTATION, json!({ "id": id }), "commentDelete")
            .await?;
        Ok(())
    }

    /// React to a comment with an emoji shortcode.
    pub async fn react(&self, comment_id: &str, emoji: &str) -> Result<Reaction> {
        #[derive(Deserialize)]
        struct Created {
            reaction: Reaction,
        }

        let created: Created = mutate(
            &self.client,
            REACT_MUTATION,
            json!({ "input": { "commentId": comment_id, "emoji": emoji } }),
            "reactionCreate",
        )
        .await?;
        Ok(created.reaction)
    }

    /// Remove a reaction.
    pub async fn unreact(&self, reaction_id: &str) -> Result<()> {
        mutate::<Value>(
            &self.client,
            UNREACT_MUTATION,
            json!({ "id": reaction_id }),
            "reactionDelete",
        )
        .await?;
        Ok(())
    }
}
