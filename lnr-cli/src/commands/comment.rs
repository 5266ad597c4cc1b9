//! Comment commands.

use anyhow::Result;
use clap::Subcommand;
use rust_i18n::t;

use super::{short_id, Context};
use crate::handlers::issue::get_issue;
use crate::output::{print_json, shortcode_to_emoji, OutputFormat};

#[derive(Subcommand)]
pub enum CommentAction {
    /// Comment on an issue
    #[command(alias = "new")]
    Add {
        /// Issue identifier
        issue: String,
        /// Comment body (markdown)
        body: String,
    },

    /// Reply to a comment
    Reply {
        /// Issue identifier
        issue: String,
        /// Parent comment ID
        comment_id: String,
        /// Reply body (markdown)
        body: String,
    },

    /// Edit a comment
    Edit {
        /// Comment ID
        comment_id: String,
        /// New body
        body: String,
    },

    /// Delete a comment
    #[command(alias = "rm")]
    Delete {
        /// Comment ID
        comment_id: String,
    },

    /// React to a comment
    React {
        /// Comment ID
        comment_id: String,
        /// Emoji shortcode, e.g. +1
        emoji: String,
    },

    /// Remove a reaction
    Unreact {
        /// Reaction ID
        reaction_id: String,
    },
}

pub async fn handle(action: CommentAction, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match action {
        CommentAction::Add { issue, body } => {
            let issue = get_issue(&client, &issue).await?;
            let id = client.comments().create(&issue.id, &body).await?;
            confirm(ctx, &id, t!("commented_on", id = &issue.identifier).to_string());
        }
        CommentAction::Reply {
            issue,
            comment_id,
            body,
        } => {
            let issue = get_issue(&client, &issue).await?;
            let id = client.comments().reply(&issue.id, &comment_id, &body).await?;
            confirm(
                ctx,
                &id,
                t!("replied_to_comment", id = short_id(&comment_id)).to_string(),
            );
        }
        CommentAction::Edit { comment_id, body } => {
            client.comments().update(&comment_id, &body).await?;
            println!("{}", t!("updated_comment", id = short_id(&comment_id)));
        }
        CommentAction::Delete { comment_id } => {
            client.comments().delete(&comment_id).await?;
            println!("{}", t!("deleted_comment", id = short_id(&comment_id)));
        }
        CommentAction::React { comment_id, emoji } => {
            let emoji = emoji.trim_matches(':');
            let reaction = client.comments().react(&comment_id, emoji).await?;
            match ctx.output.format {
                OutputFormat::Json => print_json(&reaction)?,
                OutputFormat::Quiet => println!("{}", reaction.id),
                OutputFormat::Table => println!(
                    "{}",
                    t!(
                        "added_reaction",
                        emoji = shortcode_to_emoji(emoji),
                        id = short_id(&comment_id)
                    )
                ),
            }
        }
        CommentAction::Unreact { reaction_id } => {
            client.comments().unreact(&reaction_id).await?;
            println!("{}", t!("removed_reaction", id = short_id(&reaction_id)));
        }
    }
    Ok(())
}

/// Print the new comment's ID in quiet mode, the message otherwise.
fn confirm(ctx: &Context, id: &str, message: String) {
    match ctx.output.format {
        OutputFormat::Quiet => println!("{}", id),
        _ => println!("{}", message),
    }
}
