use super::models::FileSystem;
use anyhow::Result;
use quill_models::LocalFile;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

impl FileSystem {
    /// Reads a file into memory, guessing its MIME type from the extension
    pub async fn read_upload(path: &Path) -> Result<LocalFile> {
        let data = fs::read(path).await?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| anyhow::anyhow!("Not a file path: {}", path.display()))?;

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        tracing::debug!("Read {} ({} bytes, {})", name, data.len(), mime_type);

        Ok(LocalFile::new(name, mime_type, data))
    }

    /// Expands directories into the regular files below them, keeping
    /// plain file arguments as given. Output order is stable.
    pub fn collect_uploads(paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_dir() {
                let mut found: Vec<_> = WalkDir::new(path)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.path().to_path_buf())
                    .collect();
                found.sort();
                tracing::debug!("    Found {} file(s) in {}", found.len(), path.display());
                files.extend(found);
            } else {
                files.push(path.clone());
            }
        }

        files
    }

    fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }

    pub fn get_absolute_path_string(path: &str) -> Result<String> {
        let path_buf = PathBuf::from(path);
        let abs = Self::get_absolute_path(&path_buf)?;
        Ok(abs.to_string_lossy().to_string())
    }
}
