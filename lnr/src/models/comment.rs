//! Comment, reaction and external sync models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment ID.
    pub id: String,
    /// Markdown body.
    pub body: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Workspace user who wrote the comment.
    pub user: Option<String>,
    /// External user, for comments mirrored from another service.
    pub external_user: Option<String>,
    /// Bot or integration that posted the comment.
    pub bot_actor: Option<String>,
    /// Parent comment, `None` for thread roots.
    pub parent_id: Option<String>,
    /// Permalink.
    pub url: String,
    /// Aggregated reactions, in first-seen order.
    pub reactions: Vec<CommentReaction>,
    /// External services this comment is synced with.
    pub synced_with: Vec<SyncInfo>,
}

impl Comment {
    /// Display name of whoever wrote the comment.
    pub fn actor_name(&self) -> &str {
        self.external_user
            .as_deref()
            .or(self.user.as_deref())
            .or(self.bot_actor.as_deref())
            .unwrap_or("unknown")
    }

    /// The first sync descriptor, if any.
    pub fn sync(&self) -> Option<&SyncInfo> {
        self.synced_with.first()
    }
}

/// A reaction as reported by the API, one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReaction {
    /// Emoji shortcode.
    pub emoji: String,
    /// User who reacted.
    pub user: Option<String>,
}

/// Reactions on a comment collapsed by emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentReaction {
    /// Emoji shortcode.
    pub emoji: String,
    /// Number of users who reacted with it.
    pub count: u32,
}

/// A reaction created by the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Reaction ID.
    pub id: String,
    /// Emoji shortcode.
    pub emoji: String,
}

/// Collapse individual reactions into per-emoji counts.
///
/// Distinct emojis keep the order in which they were first seen.
pub fn aggregate_reactions<'a, I>(reactions: I) -> Vec<CommentReaction>
where
    I: IntoIterator<Item = &'a RawReaction>,
{
    let mut aggregated: Vec<CommentReaction> = Vec::new();
    for reaction in reactions {
        match aggregated.iter_mut().find(|r| r.emoji == reaction.emoji) {
            Some(existing) => existing.count += 1,
            None => aggregated.push(CommentReaction {
                emoji: reaction.emoji.clone(),
                count: 1,
            }),
        }
    }
    aggregated
}

/// External service a comment is mirrored from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncInfo {
    /// Service name as reported by the API.
    pub service: String,
    /// Service specific metadata.
    pub meta: SyncMeta,
}

/// Metadata for a synced comment, keyed by service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SyncMeta {
    Slack {
        #[serde(rename = "channelName")]
        channel_name: Option<String>,
        #[serde(rename = "messageUrl")]
        message_url: Option<String>,
    },
    Github {
        owner: Option<String>,
        repo: Option<String>,
        number: Option<u64>,
    },
    Jira {
        #[serde(rename = "issueKey")]
        issue_key: Option<String>,
        #[serde(rename = "projectId")]
        project_id: Option<String>,
    },
    Unknown,
}

/// Loosely typed metadata as returned by the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSyncMetadata {
    pub channel_name: Option<String>,
    pub message_url: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub number: Option<u64>,
    pub issue_key: Option<String>,
    pub project_id: Option<String>,
}

impl SyncInfo {
    /// Build sync info; the metadata variant follows the lower-cased service name.
    pub fn new(service: impl Into<String>, raw: RawSyncMetadata) -> Self {
        let service = service.into();
        let meta = match service.to_lowercase().as_str() {
            "slack" => SyncMeta::Slack {
                channel_name: raw.channel_name,
                message_url: raw.message_url,
            },
            "github" => SyncMeta::Github {
                owner: raw.owner,
                repo: raw.repo,
                number: raw.number,
            },
            "jira" => SyncMeta::Jira {
                issue_key: raw.issue_key,
                project_id: raw.project_id,
            },
            _ => SyncMeta::Unknown,
        };
        Self { service, meta }
    }

    /// Service name with the first letter upper-cased and the rest lower-cased.
    pub fn service_title(&self) -> String {
        let mut chars = self.service.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }

    /// Channel, repository or ticket label, when the metadata has one.
    pub fn channel_label(&self) -> Option<String> {
        match &self.meta {
            SyncMeta::Slack { channel_name, .. } => channel_name.clone(),
            SyncMeta::Github {
                owner,
                repo: Some(repo),
                ..
            } => Some(format!("{}/{}", owner.as_deref().unwrap_or(""), repo)),
            SyncMeta::Jira {
                issue_key: Some(key),
                ..
            } => Some(key.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(emoji: &str) -> RawReaction {
        RawReaction {
            emoji: emoji.to_owned(),
            user: None,
        }
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_reactions(&Vec::<RawReaction>::new()).is_empty());
    }

    #[test]
    fn test_aggregate_identical() {
        let reactions = vec![raw("+1"), raw("+1"), raw("+1")];
        assert_eq!(
            aggregate_reactions(&reactions),
            vec![CommentReaction {
                emoji: "+1".into(),
                count: 3
            }]
        );
    }

    #[test]
    fn test_aggregate_mixed_keeps_first_seen_order() {
        let reactions = vec![raw("fire"), raw("+1"), raw("fire"), raw("eyes"), raw("+1")];
        let aggregated = aggregate_reactions(&reactions);
        let pairs: Vec<(&str, u32)> = aggregated
            .iter()
            .map(|r| (r.emoji.as_str(), r.count))
            .collect();
        assert_eq!(pairs, vec![("fire", 2), ("+1", 2), ("eyes", 1)]);
    }

    #[test]
    fn test_sync_meta_from_service_name() {
        let slack = SyncInfo::new(
            "SLACK",
            RawSyncMetadata {
                channel_name: Some("eng".into()),
                ..Default::default()
            },
        );
        assert!(matches!(slack.meta, SyncMeta::Slack { .. }));
        assert_eq!(slack.service_title(), "Slack");
        assert_eq!(slack.channel_label().as_deref(), Some("eng"));

        let github = SyncInfo::new(
            "github",
            RawSyncMetadata {
                repo: Some("lnr".into()),
                ..Default::default()
            },
        );
        assert_eq!(github.channel_label().as_deref(), Some("/lnr"));

        let jira = SyncInfo::new(
            "Jira",
            RawSyncMetadata {
                issue_key: Some("OPS-4".into()),
                ..Default::default()
            },
        );
        assert_eq!(jira.channel_label().as_deref(), Some("OPS-4"));

        let other = SyncInfo::new("intercom", RawSyncMetadata::default());
        assert_eq!(other.meta, SyncMeta::Unknown);
        assert_eq!(other.channel_label(), None);
    }

    #[test]
    fn test_sync_meta_serializes_with_type_tag() {
        let info = SyncInfo::new(
            "github",
            RawSyncMetadata {
                owner: Some("bdsqqq".into()),
                repo: Some("lnr".into()),
                number: Some(7),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["meta"]["type"], "github");
        assert_eq!(json["meta"]["number"], 7);
    }
}
