//! Command-line surface over the post collection.

use anyhow::bail;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use postdesk_core::domain::{Post, PostStatus};
use postdesk_core::{EditMode, EditorError, Field, PostEditor, PostError};

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "postdesk", version, about = "Manage your posts")]
pub struct Cli {
    /// Print posts as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List your posts, newest first.
    List,
    /// Create a post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// `draft` or `published`.
        #[arg(long, default_value = "draft")]
        status: String,
    },
    /// Create a placeholder draft.
    QuickCreate,
    /// Edit fields of an existing post.
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    Publish {
        id: Uuid,
    },
    Unpublish {
        id: Uuid,
    },
    /// Delete a post. Requires `--yes`.
    Delete {
        id: Uuid,
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(cli: Cli, state: &AppState) -> anyhow::Result<()> {
    let posts = &state.posts;

    if let Command::Delete { yes: false, .. } = cli.command {
        bail!("refusing to delete without --yes");
    }

    posts.load().await?;

    match cli.command {
        Command::List => {
            let list = posts.posts().await;
            print_posts(&list, cli.json)?;
        }
        Command::Create {
            title,
            content,
            status,
        } => {
            let mut editor = PostEditor::new();
            editor.begin(EditMode::Create);
            editor.set_field(Field::Title, title)?;
            editor.set_field(Field::Content, content)?;
            editor.set_field(Field::Status, status)?;

            let post = submit(&mut editor, state).await?;
            print_posts(&[post], cli.json)?;
        }
        Command::QuickCreate => {
            let post = posts.quick_create().await?;
            print_posts(&[post], cli.json)?;
        }
        Command::Edit {
            id,
            title,
            content,
            status,
        } => {
            let Some(target) = posts.get(id).await else {
                let err = PostError::UnknownPost(id);
                state.sink.on_error(err.kind(), &err.message()).await;
                return Err(err.into());
            };

            let mut editor = PostEditor::new();
            editor.begin(EditMode::Edit(target));
            for (field, value) in [
                (Field::Title, title),
                (Field::Content, content),
                (Field::Status, status),
            ] {
                if let Some(value) = value {
                    editor.set_field(field, value)?;
                }
            }

            let post = submit(&mut editor, state).await?;
            print_posts(&[post], cli.json)?;
        }
        Command::Publish { id } => {
            let post = posts.set_status(id, PostStatus::Published).await?;
            print_posts(&[post], cli.json)?;
        }
        Command::Unpublish { id } => {
            let post = posts.set_status(id, PostStatus::Draft).await?;
            print_posts(&[post], cli.json)?;
        }
        Command::Delete { id, .. } => {
            posts.delete(id).await?;
            println!("deleted {id}");
        }
    }

    Ok(())
}

/// Submit the open session. Validation failures are reported like any
/// other outcome, without touching the store.
async fn submit(editor: &mut PostEditor, state: &AppState) -> anyhow::Result<Post> {
    let mutation = match editor.submit() {
        Ok(mutation) => mutation,
        Err(err @ EditorError::Validation(_)) => {
            state.sink.on_error(err.kind(), &err.to_string()).await;
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    Ok(state.posts.apply(mutation).await?)
}

fn print_posts(posts: &[Post], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("No posts yet.");
    }
    for post in posts {
        println!(
            "{}  {:<9}  {}  {}",
            post.id,
            post.status.as_str(),
            post.created_at.format("%Y-%m-%d"),
            post.title
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_defaults_to_draft() {
        let cli = Cli::try_parse_from(["postdesk", "create", "--title", "Hello", "--content", "World"])
            .unwrap();
        match cli.command {
            Command::Create { status, .. } => assert_eq!(status, "draft"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn delete_confirmation_flag() {
        let id = Uuid::new_v4().to_string();
        let cli = Cli::try_parse_from(["postdesk", "delete", id.as_str(), "--yes", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Delete { yes: true, .. }));
    }

    #[test]
    fn ids_must_be_uuids() {
        assert!(Cli::try_parse_from(["postdesk", "publish", "p1"]).is_err());
    }
}
