use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Fallback stored name when the client sends no usable filename.
const DEFAULT_FILENAME: &str = "resume";

/// Directory of uploaded résumés. Files are named `{uuid}_{original}`.
#[derive(Debug, Clone)]
pub struct ResumeStorage {
    root: PathBuf,
}

impl ResumeStorage {
    /// Creates the directory if it does not exist.
    pub async fn init(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` under a fresh unique name and returns the full path.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));
        let path = self.root.join(stored_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    pub async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    pub async fn remove(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}

/// Keeps only the final path component of a client-supplied filename.
pub fn sanitize_filename(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if last.is_empty() || last == "." || last == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        last.to_string()
    }
}

/// Recovers the client filename from a stored path by dropping the token prefix.
pub fn original_filename(stored: &Path) -> String {
    let name = stored
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
    match name.split_once('_') {
        Some((token, rest)) if Uuid::parse_str(token).is_ok() && !rest.is_empty() => {
            rest.to_string()
        }
        _ => name,
    }
}
