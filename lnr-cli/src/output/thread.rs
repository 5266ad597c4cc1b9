//! Comment thread reconstruction and rendering.

use chrono::{DateTime, Utc};
use colored::Colorize;
use lnr::Comment;
use std::collections::HashMap;

use super::emoji::format_reactions;
use super::text::{relative_time_between, wrap_text};

/// Replies shown per thread.
const MAX_REPLIES: usize = 3;

/// Column at which comment bodies wrap.
const BODY_WIDTH: usize = 60;

/// A root comment and its direct replies, oldest first.
#[derive(Debug)]
pub struct CommentThread<'a> {
    pub root: &'a Comment,
    pub replies: Vec<&'a Comment>,
}

/// Group comments by parent ID; `None` holds the roots.
///
/// Each group is sorted by creation time. The sort is stable so equal
/// timestamps keep their input order.
pub fn build_child_map(comments: &[Comment]) -> HashMap<Option<&str>, Vec<&Comment>> {
    let mut map: HashMap<Option<&str>, Vec<&Comment>> = HashMap::new();
    for comment in comments {
        map.entry(comment.parent_id.as_deref())
            .or_default()
            .push(comment);
    }
    for children in map.values_mut() {
        children.sort_by_key(|c| c.created_at);
    }
    map
}

/// Assemble threads ordered by root creation time.
///
/// Only direct children of a root are attached; deeper replies are dropped.
pub fn build_comment_threads(comments: &[Comment]) -> Vec<CommentThread<'_>> {
    let mut children = build_child_map(comments);
    let roots = children.remove(&None).unwrap_or_default();

    roots
        .into_iter()
        .map(|root| CommentThread {
            root,
            replies: children
                .get(&Some(root.id.as_str()))
                .cloned()
                .unwrap_or_default(),
        })
        .collect()
}

/// Render the `max_threads` most recent threads, each with its three most recent replies.
///
/// A `max_threads` of zero renders no threads at all.
pub fn render_comment_threads(
    comments: &[Comment],
    max_threads: usize,
    now: DateTime<Utc>,
) -> Vec<String> {
    if comments.is_empty() {
        return vec!["no comments".dimmed().to_string()];
    }

    let threads = build_comment_threads(comments);
    let recent = &threads[threads.len().saturating_sub(max_threads)..];

    let mut lines = Vec::new();
    for (i, thread) in recent.iter().enumerate() {
        let total = thread.replies.len();
        let replies = &thread.replies[total.saturating_sub(MAX_REPLIES)..];

        match thread.root.sync() {
            Some(_) => lines.extend(sync_header(thread.root, total, now)),
            None => {
                lines.push(actor_header(thread.root, now));
                lines.extend(comment_body(thread.root, ""));
            }
        }

        for reply in replies {
            lines.push(format!("└ {}", actor_header(reply, now)));
            lines.extend(comment_body(reply, "  "));
        }

        if i + 1 < recent.len() {
            lines.push(String::new());
        }
    }
    lines
}

/// Print comment threads to stdout.
pub fn output_comment_threads(comments: &[Comment], max_threads: usize) {
    for line in render_comment_threads(comments, max_threads, Utc::now()) {
        println!("{}", line);
    }
}

/// Banner for a thread mirrored from another service.
fn sync_header(root: &Comment, reply_count: usize, now: DateTime<Utc>) -> Vec<String> {
    let Some(sync) = root.sync() else {
        return vec![actor_header(root, now)];
    };

    let time = relative_time_between(root.created_at, now);
    let channel = match sync.channel_label() {
        Some(label) => format!(" in #{}", label.white()),
        None => String::new(),
    };

    let mut lines = vec![format!(
        "{} thread connected{} {}",
        sync.service_title().white(),
        channel,
        time.dimmed()
    )];

    if reply_count > MAX_REPLIES && !root.url.is_empty() {
        lines.push(format!(
            "└ {} [view all]({})",
            format!("{} previous replies,", reply_count - MAX_REPLIES).dimmed(),
            root.url
        ));
    }
    lines
}

/// `@actor time`, plus ` via Service` for synced comments.
fn actor_header(comment: &Comment, now: DateTime<Utc>) -> String {
    let actor = format!("@{}", comment.actor_name());
    let time = relative_time_between(comment.created_at, now);
    let source = match comment.sync() {
        Some(sync) => format!(" via {}", sync.service_title()),
        None => String::new(),
    };
    format!("{} {}{}", actor.white(), time.dimmed(), source.dimmed())
}

fn comment_body(comment: &Comment, indent: &str) -> Vec<String> {
    let mut lines = wrap_text(comment.body.trim(), BODY_WIDTH, &format!("{}└ ", indent));

    let reactions = format_reactions(&comment.reactions);
    if !reactions.is_empty() {
        lines.push(format!(
            "{}└ {}",
            indent,
            format!("[{}]", reactions).dimmed()
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use lnr::models::{CommentReaction, RawSyncMetadata, SyncInfo};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn comment(id: &str, parent: Option<&str>, minutes_ago: i64, body: &str) -> Comment {
        let created = now() - Duration::minutes(minutes_ago);
        Comment {
            id: id.to_owned(),
            body: body.to_owned(),
            created_at: created,
            updated_at: created,
            user: Some(format!("user-{}", id)),
            external_user: None,
            bot_actor: None,
            parent_id: parent.map(str::to_owned),
            url: format!("https://linear.app/acme/issue/ENG-1#comment-{}", id),
            reactions: Vec::new(),
            synced_with: Vec::new(),
        }
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_child_map_roots_and_children() {
        let comments = vec![
            comment("a", None, 30, "root"),
            comment("b", Some("a"), 20, "reply"),
        ];
        let map = build_child_map(&comments);
        assert_eq!(map[&None][0].id, "a");
        assert_eq!(map[&Some("a")][0].id, "b");
    }

    #[test]
    fn test_child_map_sorts_roots() {
        let comments = vec![
            comment("mid", None, 20, ""),
            comment("new", None, 10, ""),
            comment("old", None, 30, ""),
        ];
        let map = build_child_map(&comments);
        let ids: Vec<&str> = map[&None].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "mid", "new"]);
    }

    #[test]
    fn test_child_map_stable_on_equal_timestamps() {
        let comments = vec![
            comment("x", None, 10, ""),
            comment("y", None, 10, ""),
            comment("z", None, 10, ""),
        ];
        let map = build_child_map(&comments);
        let ids: Vec<&str> = map[&None].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_threads_drop_grandchildren() {
        let comments = vec![
            comment("root", None, 30, ""),
            comment("child", Some("root"), 20, ""),
            comment("grandchild", Some("child"), 10, ""),
            comment("orphan", Some("missing"), 5, ""),
        ];
        let threads = build_comment_threads(&comments);
        assert_eq!(threads.len(), 1);
        let replies: Vec<&str> = threads[0].replies.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(replies, vec!["child"]);
    }

    #[test]
    fn test_empty_renders_placeholder() {
        plain();
        assert_eq!(render_comment_threads(&[], 3, now()), vec!["no comments"]);
    }

    #[test]
    fn test_five_comment_scenario() {
        plain();
        let comments = vec![
            comment("r1", None, 300, "first root"),
            comment("r2", None, 200, "second root"),
            comment("r3", None, 100, "third root"),
            comment("c2", Some("r2"), 150, "second reply"),
            comment("c1", Some("r2"), 180, "first reply"),
        ];

        let threads = build_comment_threads(&comments);
        assert_eq!(threads.len(), 3);
        let replies: Vec<&str> = threads[1].replies.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(replies, vec!["c1", "c2"]);

        let lines = render_comment_threads(&comments, 3, now());
        assert_eq!(
            lines,
            vec![
                "@user-r1 5h ago",
                "└ first root",
                "",
                "@user-r2 3h ago",
                "└ second root",
                "└ @user-c1 3h ago",
                "  └ first reply",
                "└ @user-c2 2h ago",
                "  └ second reply",
                "",
                "@user-r3 1h ago",
                "└ third root",
            ]
        );
        assert!(!lines.iter().any(|l| l.contains("previous replies")));
    }

    #[test]
    fn test_windowing_keeps_most_recent() {
        plain();
        let mut comments = vec![
            comment("old", None, 500, "old"),
            comment("root", None, 400, "root"),
        ];
        for i in 0..5 {
            comments.push(comment(&format!("r{}", i), Some("root"), 300 - i * 10, "reply"));
        }

        let lines = render_comment_threads(&comments, 1, now());
        assert!(!lines.iter().any(|l| l.contains("@user-old")));
        let shown: Vec<&String> = lines.iter().filter(|l| l.starts_with("└ @")).collect();
        assert_eq!(shown.len(), 3);
        assert!(shown[0].contains("@user-r2"));
        assert!(shown[2].contains("@user-r4"));
    }

    #[test]
    fn test_synced_root_header() {
        plain();
        let mut root = comment("root", None, 120, "mirrored body");
        root.synced_with = vec![SyncInfo::new(
            "SLACK",
            RawSyncMetadata {
                channel_name: Some("eng".into()),
                ..Default::default()
            },
        )];
        let mut comments = vec![root];
        for i in 0..4 {
            let mut reply = comment(&format!("r{}", i), Some("root"), 60 - i * 10, "ok");
            reply.external_user = Some("slackbob".into());
            reply.synced_with = comments[0].synced_with.clone();
            comments.push(reply);
        }

        let lines = render_comment_threads(&comments, 3, now());
        assert_eq!(lines[0], "Slack thread connected in #eng 2h ago");
        assert_eq!(
            lines[1],
            "└ 1 previous replies, [view all](https://linear.app/acme/issue/ENG-1#comment-root)"
        );
        assert_eq!(lines[2], "└ @slackbob 50m ago via Slack");
        assert!(!lines.iter().any(|l| l.contains("mirrored body")));
    }

    #[test]
    fn test_reactions_line() {
        plain();
        let mut root = comment("root", None, 10, "nice");
        root.reactions = vec![
            CommentReaction {
                emoji: "+1".into(),
                count: 2,
            },
            CommentReaction {
                emoji: "unknown_code".into(),
                count: 1,
            },
        ];
        let lines = render_comment_threads(&[root], 3, now());
        assert_eq!(lines[2], "└ [\u{1f44d}2 :unknown_code:]");
    }

    fn synced(mut root: Comment, service: &str, channel: Option<&str>) -> Comment {
        root.synced_with = vec![SyncInfo::new(
            service,
            RawSyncMetadata {
                channel_name: channel.map(str::to_owned),
                ..Default::default()
            },
        )];
        root
    }

    #[test]
    fn test_reply_reactions_are_indented() {
        plain();
        let mut reply = comment("r", Some("root"), 5, "agreed");
        reply.reactions = vec![CommentReaction {
            emoji: "+1".into(),
            count: 2,
        }];
        let comments = vec![comment("root", None, 10, "hi"), reply];

        assert_eq!(
            render_comment_threads(&comments, 3, now()),
            vec![
                "@user-root 10m ago",
                "└ hi",
                "└ @user-r 5m ago",
                "  └ agreed",
                "  └ [\u{1f44d}2]",
            ]
        );
    }

    #[test]
    fn test_unsynced_root_has_no_previous_replies_banner() {
        plain();
        let mut comments = vec![comment("root", None, 100, "root")];
        for i in 0..5 {
            comments.push(comment(&format!("r{}", i), Some("root"), 50 - i * 10, "reply"));
        }

        assert_eq!(
            render_comment_threads(&comments, 3, now()),
            vec![
                "@user-root 1h ago",
                "└ root",
                "└ @user-r2 30m ago",
                "  └ reply",
                "└ @user-r3 20m ago",
                "  └ reply",
                "└ @user-r4 10m ago",
                "  └ reply",
            ]
        );
    }

    #[test]
    fn test_synced_root_with_few_replies_has_no_banner() {
        plain();
        let mut comments = vec![synced(comment("root", None, 120, "body"), "slack", Some("eng"))];
        for i in 0..3 {
            comments.push(comment(&format!("r{}", i), Some("root"), 30 - i * 10, "ok"));
        }

        assert_eq!(
            render_comment_threads(&comments, 3, now()),
            vec![
                "Slack thread connected in #eng 2h ago",
                "└ @user-r0 30m ago",
                "  └ ok",
                "└ @user-r1 20m ago",
                "  └ ok",
                "└ @user-r2 10m ago",
                "  └ ok",
            ]
        );
    }

    #[test]
    fn test_unknown_service_banner_has_no_channel() {
        plain();
        let mut comments = vec![synced(comment("root", None, 120, "body"), "intercom", None)];
        for i in 0..4 {
            comments.push(comment(&format!("r{}", i), Some("root"), 40 - i * 10, "ok"));
        }

        assert_eq!(
            render_comment_threads(&comments, 3, now()),
            vec![
                "Intercom thread connected 2h ago",
                "└ 1 previous replies, [view all](https://linear.app/acme/issue/ENG-1#comment-root)",
                "└ @user-r1 30m ago",
                "  └ ok",
                "└ @user-r2 20m ago",
                "  └ ok",
                "└ @user-r3 10m ago",
                "  └ ok",
            ]
        );
    }

    #[test]
    fn test_zero_threads_renders_nothing() {
        plain();
        let comments = vec![comment("root", None, 10, "hi")];
        assert!(render_comment_threads(&comments, 0, now()).is_empty());
    }

    #[test]
    fn test_missing_optional_fields_render() {
        plain();
        let mut bare = comment("bare", None, 1, "");
        bare.user = None;
        let lines = render_comment_threads(&[bare], 3, now());
        assert_eq!(lines[0], "@unknown 1m ago");
        assert_eq!(lines[1], "");
    }
}
