//! Article discovery on the filesystem.
//!
//! Articles live as flat `*.md` files in one directory. The slug is the
//! lowercased file stem, stable across reloads. Files are sorted by name
//! before loading so the article order (and with it category and article
//! ordering in the tree) is deterministic across platforms.

use std::fs;
use std::path::{Path, PathBuf};

use crate::article::Article;

/// Error loading the article directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The directory itself could not be read.
    #[error("failed to read article directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load all articles from `dir`.
///
/// Scans non-recursively for `.md` files; hidden files are skipped.
/// Individual unreadable files are skipped with a warning rather than
/// failing the whole load.
pub fn load_articles(dir: &Path) -> Result<Vec<Article>, LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .map(|e| e.path())
        .filter(|p| is_article_file(p))
        .collect();
    files.sort();

    let mut articles = Vec::with_capacity(files.len());
    for path in files {
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable article");
                continue;
            }
        };
        articles.push(Article::from_source(slug_from_path(&path), &raw));
    }
    Ok(articles)
}

fn is_article_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'));
    !hidden && path.extension().is_some_and(|e| e == "md")
}

/// Slug from file path: lowercased stem, extension stripped.
fn slug_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
