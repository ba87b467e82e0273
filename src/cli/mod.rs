//! Command line front-end over the admin client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quill_api::AdminClient;
use std::path::PathBuf;

use commands::{
    run_avatar, run_categories, run_category_create, run_category_delete, run_delete, run_fetch,
    run_insert, run_list, run_login, run_logout, run_normalize, run_password, run_post_delete,
    run_posts, run_profile_update, run_rename, run_show, run_upload, run_whoami,
};

#[derive(Debug, Parser)]
#[command(name = "quill")]
#[command(about = "Quill blog admin: resources, uploads and links", long_about = None)]
pub struct Cli {
    /// Suppress coloured notifications
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Sign in and remember the token.
    Login {
        username: String,
        /// Read from QUILL_PASSWORD or stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored token.
    Logout,

    /// Show the signed-in user and their menu.
    Whoami,

    /// Edit the signed-in user's profile.
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Browse and manage stored resources.
    #[command(subcommand)]
    Files(FilesCommand),

    /// List and delete posts.
    #[command(subcommand)]
    Posts(PostsCommand),

    /// Manage post categories.
    #[command(subcommand)]
    Categories(CategoriesCommand),

    /// Upload files; directories are walked.
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Storage bucket hint.
        #[arg(long)]
        bucket: Option<String>,
        /// Use the resource-manager limits (large files, Android packages).
        #[arg(long)]
        resource: bool,
    },

    /// Print the proxy URL for any stored-object reference.
    Normalize { raw: String },

    /// Append the Markdown for a resource to a document.
    Insert {
        id: i64,
        #[arg(long, value_name = "FILE")]
        into: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// List one page of resources.
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long)]
        search: Option<String>,
        /// Images only.
        #[arg(long)]
        images: bool,
    },

    /// Show one resource.
    Show { id: i64 },

    /// Change the display name of a resource.
    Rename { id: i64, name: String },

    /// Delete a resource.
    Delete { id: i64 },

    /// Download a resource through the proxy.
    Fetch {
        id: i64,
        #[arg(long, value_name = "PATH")]
        out: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Change profile fields; omitted ones are kept.
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },

    /// Upload a JPEG or PNG and use it as the avatar.
    Avatar { path: PathBuf },

    /// Change the password; both values are read from stdin.
    Password,
}

#[derive(Debug, Subcommand)]
pub enum PostsCommand {
    /// List posts, optionally filtered.
    List {
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        category: Option<i64>,
    },

    /// Delete a post.
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List every category.
    List,

    /// Create a category.
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a category.
    Delete { id: i64 },
}

impl CliCommand {
    pub async fn run(self, client: &AdminClient) -> Result<()> {
        match self {
            CliCommand::Login { username, password } => run_login(client, &username, password).await?,
            CliCommand::Logout => run_logout(client).await?,
            CliCommand::Whoami => run_whoami(client)?,
            CliCommand::Profile(command) => match command {
                ProfileCommand::Update { email, nickname, bio } => {
                    run_profile_update(client, email, nickname, bio).await?
                }
                ProfileCommand::Avatar { path } => run_avatar(client, &path).await?,
                ProfileCommand::Password => run_password(client).await?,
            },
            CliCommand::Posts(command) => match command {
                PostsCommand::List { keyword, category } => {
                    run_posts(client, keyword.as_deref(), category).await?
                }
                PostsCommand::Delete { id } => run_post_delete(client, id).await?,
            },
            CliCommand::Categories(command) => match command {
                CategoriesCommand::List => run_categories(client).await?,
                CategoriesCommand::Create { name, description } => {
                    run_category_create(client, name, description).await?
                }
                CategoriesCommand::Delete { id } => run_category_delete(client, id).await?,
            },
            CliCommand::Files(command) => match command {
                FilesCommand::List { page, search, images } => {
                    run_list(client, page, search.as_deref(), images).await?
                }
                FilesCommand::Show { id } => run_show(client, id).await?,
                FilesCommand::Rename { id, name } => run_rename(client, id, name).await?,
                FilesCommand::Delete { id } => run_delete(client, id).await?,
                FilesCommand::Fetch { id, out } => run_fetch(client, id, &out).await?,
            },
            CliCommand::Upload { paths, bucket, resource } => {
                run_upload(client, &paths, bucket, resource).await?
            }
            CliCommand::Normalize { raw } => run_normalize(client, &raw),
            CliCommand::Insert { id, into } => run_insert(client, id, &into).await?,
        }

        Ok(())
    }
}
