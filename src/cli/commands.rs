use anyhow::{bail, Context, Result};
use quill_api::AdminClient;
use quill_filesystem::FileSystem;
use quill_models::{CategoryDraft, FileQuery, FileResource, FileUpdate, PostQuery, UserPatch};
use quill_session::{account_menu, menu_for, RouteDecision};
use quill_utils::format_bytes;
use std::path::{Path, PathBuf};

const ENV_PASSWORD: &str = "QUILL_PASSWORD";

/// Admin commands run "on" a screen so the route guard applies
fn enter(client: &AdminClient, route: &str) -> Result<()> {
    match client.session().guard(route) {
        RouteDecision::Allow => Ok(()),
        RouteDecision::RedirectToLogin { from } => {
            bail!("{} requires sign-in, run `quill login <username>` first", from)
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{}: ", label);
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn run_login(client: &AdminClient, username: &str, password: Option<String>) -> Result<()> {
    let password = match password.or_else(|| std::env::var(ENV_PASSWORD).ok()) {
        Some(password) => password,
        None => prompt("Password")?,
    };

    client.session().navigate("/login");
    let user = client.auth().login(username, &password).await?;
    tracing::info!("Signed in as {} ({:?})", user.username, user.role);
    Ok(())
}

pub async fn run_logout(client: &AdminClient) -> Result<()> {
    client.auth().logout().await?;
    Ok(())
}

pub fn run_whoami(client: &AdminClient) -> Result<()> {
    enter(client, "/admin/profile")?;

    let Some(user) = client.session().user() else {
        bail!("Not signed in");
    };

    println!("{} <{}>", user.username, user.email);
    println!("role: {:?}", user.role);
    if let Some(nickname) = &user.nickname {
        println!("nickname: {}", nickname);
    }

    println!();
    for item in menu_for(user.role).iter().chain(account_menu().iter()) {
        println!("  {:<14} {}", item.label, item.key);
    }
    Ok(())
}

pub async fn run_profile_update(
    client: &AdminClient,
    email: Option<String>,
    nickname: Option<String>,
    bio: Option<String>,
) -> Result<()> {
    enter(client, "/admin/profile")?;

    let patch = UserPatch {
        email,
        nickname,
        bio,
        ..Default::default()
    };
    if patch.is_empty() {
        bail!("Nothing to change, pass --email, --nickname or --bio");
    }

    let user = client.users().update_profile(patch).await?;
    println!("{} <{}>", user.username, user.email);
    Ok(())
}

pub async fn run_avatar(client: &AdminClient, path: &Path) -> Result<()> {
    enter(client, "/admin/profile")?;

    let file = FileSystem::read_upload(path).await?;
    let config = client.upload_settings().avatar_config();
    let uploaded = client.uploads().upload(&file, &config).await?;
    client.users().set_avatar(&uploaded.url).await?;

    println!("avatar: {}", uploaded.url);
    Ok(())
}

pub async fn run_password(client: &AdminClient) -> Result<()> {
    enter(client, "/admin/profile")?;

    let old_password = prompt("Current password")?;
    let new_password = prompt("New password")?;
    if new_password.is_empty() {
        bail!("New password must not be empty");
    }

    client.users().change_password(&old_password, &new_password).await?;
    Ok(())
}

pub async fn run_posts(client: &AdminClient, keyword: Option<&str>, category: Option<i64>) -> Result<()> {
    enter(client, "/admin/posts")?;

    let query = PostQuery {
        category_id: category,
        ..Default::default()
    }
    .with_keyword(keyword);

    let posts = client.posts().list(&query).await?;
    for post in &posts {
        let categories: Vec<&str> = post.categories.iter().map(|c| c.name.as_str()).collect();
        println!(
            "{:>6}  {:<40} {:<10} {}",
            post.id,
            post.title,
            format!("{:?}", post.status).to_lowercase(),
            categories.join(", ")
        );
    }
    println!("{} posts", posts.len());
    Ok(())
}

pub async fn run_post_delete(client: &AdminClient, id: i64) -> Result<()> {
    enter(client, "/admin/posts")?;
    client.posts().delete(id).await?;
    Ok(())
}

pub async fn run_categories(client: &AdminClient) -> Result<()> {
    enter(client, "/admin/categories")?;

    for category in client.categories().list().await? {
        println!("{:>6}  {:<24} {}", category.id, category.name, category.description);
    }
    Ok(())
}

pub async fn run_category_create(client: &AdminClient, name: String, description: Option<String>) -> Result<()> {
    enter(client, "/admin/categories")?;

    let draft = CategoryDraft {
        name: Some(name),
        description,
    };
    let category = client.categories().create(&draft).await?;
    println!("{:>6}  {}", category.id, category.name);
    Ok(())
}

pub async fn run_category_delete(client: &AdminClient, id: i64) -> Result<()> {
    enter(client, "/admin/categories")?;
    client.categories().delete(id).await?;
    Ok(())
}

pub async fn run_list(client: &AdminClient, page: u32, search: Option<&str>, images: bool) -> Result<()> {
    enter(client, "/admin/files")?;

    let result = if images {
        let query = FileQuery::new(page.max(1), client.picker().page_size()).with_search(search);
        client.files().images(&query).await?
    } else {
        client.picker().list(page, search).await?
    };

    for resource in &result.items {
        println!(
            "{:>6}  {:<32} {:<24} {:>10}  {}",
            resource.id,
            resource.display_name(),
            resource.mime_type,
            format_bytes(resource.size_bytes),
            client.picker().url_for(resource)
        );
    }
    println!("{} of {} shown (page {})", result.items.len(), result.total, page.max(1));
    Ok(())
}

pub async fn run_show(client: &AdminClient, id: i64) -> Result<()> {
    enter(client, "/admin/files")?;

    let resource = client.files().get(id).await?;
    print_resource(client, &resource);
    Ok(())
}

pub async fn run_rename(client: &AdminClient, id: i64, name: String) -> Result<()> {
    enter(client, "/admin/files")?;

    let update = FileUpdate {
        original_name: Some(name),
    };
    let resource = client.files().update(id, &update).await?;
    print_resource(client, &resource);
    Ok(())
}

pub async fn run_delete(client: &AdminClient, id: i64) -> Result<()> {
    enter(client, "/admin/files")?;
    client.files().delete(id).await?;
    Ok(())
}

pub async fn run_fetch(client: &AdminClient, id: i64, out: &Path) -> Result<()> {
    enter(client, "/admin/files")?;

    let resource = client.files().get(id).await?;
    let url = client.picker().copy_link(&resource)?;
    let data = client.files().fetch(&url).await?;

    tokio::fs::write(out, &data)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!("{} -> {} ({})", url, out.display(), format_bytes(data.len() as u64));
    Ok(())
}

pub async fn run_upload(
    client: &AdminClient,
    paths: &[PathBuf],
    bucket: Option<String>,
    resource: bool,
) -> Result<()> {
    enter(client, "/admin/resources")?;

    let settings = client.upload_settings();
    let mut config = if resource {
        settings.resource_config()
    } else {
        settings.image_config()
    };
    if let Some(bucket) = bucket {
        config = config.with_bucket(bucket);
    }

    let mut files = Vec::new();
    for path in FileSystem::collect_uploads(paths) {
        files.push(FileSystem::read_upload(&path).await?);
    }
    if files.is_empty() {
        bail!("Nothing to upload");
    }

    let results = client.uploads().upload_many(&files, &config).await;

    let mut failed = 0;
    for (file, result) in files.iter().zip(&results) {
        match result {
            Ok(uploaded) => println!("{}  {}", file.name, uploaded.url),
            Err(e) => {
                failed += 1;
                eprintln!("{}  failed: {}", file.name, e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} uploads failed", failed, results.len());
    }
    Ok(())
}

pub fn run_normalize(client: &AdminClient, raw: &str) {
    println!("{}", client.normalizer().normalize(raw));
}

pub async fn run_insert(client: &AdminClient, id: i64, into: &Path) -> Result<()> {
    enter(client, "/admin/posts")?;

    let resource = client.files().get(id).await?;
    let content = match tokio::fs::read_to_string(into).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", into.display())),
    };

    let updated = client.picker().insert(&content, &resource);
    tokio::fs::write(into, updated)
        .await
        .with_context(|| format!("Failed to write {}", into.display()))?;

    println!("{}", client.picker().fragment(&resource));
    Ok(())
}

fn print_resource(client: &AdminClient, resource: &FileResource) {
    println!("id:       {}", resource.id);
    println!("name:     {}", resource.display_name());
    println!("type:     {}", resource.mime_type);
    println!("size:     {}", format_bytes(resource.size_bytes));
    println!("created:  {}", resource.created_at);
    println!("url:      {}", client.picker().url_for(resource));
    println!("markdown: {}", client.picker().fragment(resource));
}
