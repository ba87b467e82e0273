use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<quill_events::EventBus>>,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let (migrated, added_fields) = migrate_document(&content)?;

    // Only write if something changed
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), migrated).await?;

        if let Some(event_bus) = events {
            event_bus.emit(quill_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

/// Returns the migrated document text and the list of changes applied
pub fn migrate_document(content: &str) -> anyhow::Result<(String, Vec<String>)> {
    let mut doc = content.parse::<DocumentMut>()?;
    let mut added_fields = Vec::new();

    migrate_api_section(&mut doc, &mut added_fields)?;
    migrate_storage_section(&mut doc, &mut added_fields)?;
    migrate_upload_section(&mut doc, &mut added_fields)?;
    migrate_simple_sections(&mut doc, &mut added_fields)?;

    Ok((doc.to_string(), added_fields))
}

fn ensure_table<'a>(
    doc: &'a mut DocumentMut,
    name: &str,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<&'a mut Table> {
    if !doc.contains_key(name) {
        let mut table = Table::new();
        table.set_implicit(true);
        doc[name] = Item::Table(table);
        added_fields.push(name.to_string());
    }

    doc[name]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [{}] section in config", name))
}

fn migrate_api_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let api = ensure_table(doc, "api", added_fields)?;
    ensure_field(api, "base_url", Value::from("http://localhost:3000"), added_fields);
    ensure_field(api, "base_path", Value::from("/api"), added_fields);
    ensure_field(api, "timeout_secs", Value::from(10), added_fields);
    Ok(())
}

fn migrate_storage_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    // Older files kept the storage host as a single `minio_url` under [api]
    let legacy_host = doc
        .get("api")
        .and_then(|api| api.get("minio_url"))
        .and_then(|v| v.as_str())
        .map(str::to_string);

    if let Some(api) = doc.get_mut("api").and_then(|api| api.as_table_mut()) {
        if api.contains_key("minio_url") {
            api.remove("minio_url");
            added_fields.push("removed deprecated api.minio_url".to_string());
        }
    }

    let storage = ensure_table(doc, "storage", added_fields)?;

    if !storage.contains_key("direct_hosts") {
        let mut hosts = Array::new();
        hosts.push("localhost:9000");
        if let Some(host) = legacy_host.as_deref().filter(|h| !h.is_empty() && *h != "localhost:9000") {
            hosts.push(host);
        }
        storage["direct_hosts"] = Item::Value(Value::Array(hosts));
        added_fields.push("storage.direct_hosts".to_string());
    }

    ensure_field(storage, "base_url", Value::from(""), added_fields);

    if !storage.contains_key("buckets") {
        let mut buckets = Array::new();
        buckets.push("blog-images");
        buckets.push("blog-avatars");
        storage["buckets"] = Item::Value(Value::Array(buckets));
        added_fields.push("storage.buckets".to_string());
    }

    ensure_field(
        storage,
        "default_image",
        Value::from("/assets/default-image.png"),
        added_fields,
    );

    Ok(())
}

fn migrate_upload_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let upload = ensure_table(doc, "upload", added_fields)?;

    // `max_size_mb` was replaced by an exact byte count
    let legacy_mb = match upload.get("max_size_mb") {
        Some(Item::Value(Value::Integer(val))) => Some(*val.value()),
        _ => None,
    };
    if upload.contains_key("max_size_mb") {
        upload.remove("max_size_mb");
        added_fields.push("removed deprecated upload.max_size_mb".to_string());
    }

    let max_size = legacy_mb.map(|mb| mb * 1024 * 1024).unwrap_or(2 * 1024 * 1024);
    ensure_field(upload, "max_size_bytes", Value::from(max_size), added_fields);

    if !upload.contains_key("allowed_types") {
        let mut types = Array::new();
        for t in ["image/jpeg", "image/png", "image/gif", "image/webp"] {
            types.push(t);
        }
        upload["allowed_types"] = Item::Value(Value::Array(types));
        added_fields.push("upload.allowed_types".to_string());
    }

    ensure_field(upload, "bucket", Value::from("blog-images"), added_fields);
    ensure_field(
        upload,
        "resource_max_size_bytes",
        Value::from(100 * 1024 * 1024),
        added_fields,
    );

    Ok(())
}

fn migrate_simple_sections(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let picker = ensure_table(doc, "picker", added_fields)?;
    ensure_field(picker, "page_size", Value::from(10), added_fields);

    let cache = ensure_table(doc, "cache", added_fields)?;
    ensure_field(cache, "enabled", Value::from(true), added_fields);
    ensure_field(cache, "ttl_secs", Value::from(300), added_fields);
    ensure_field(cache, "max_entries", Value::from(256), added_fields);

    let session = ensure_table(doc, "session", added_fields)?;
    ensure_field(session, "credentials_path", Value::from("session.json"), added_fields);
    if !session.contains_key("login_routes") {
        let mut routes = Array::new();
        routes.push("/");
        routes.push("/login");
        session["login_routes"] = Item::Value(Value::Array(routes));
        added_fields.push("session.login_routes".to_string());
    }

    Ok(())
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}
