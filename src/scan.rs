//! Source document discovery.
//!
//! Walks every configured category root depth-first and collects each file
//! whose extension matches the document extension:
//!
//! ```text
//! content/                         # Source root
//! ├── docsite.toml                 # Site config (optional)
//! ├── assets/                      # Opaque static files (not scanned)
//! ├── notes/                       # Category "notes"
//! │   ├── intro.md
//! │   └── rust/
//! │       ├── index.md
//! │       └── ownership.md
//! └── practice/                    # Category "practice"
//!     └── drills/
//!         └── loops.md
//! ```
//!
//! Directories are always descended; files with any other extension, case
//! variants such as `.MD` included, are ignored.
//! Entries are visited in file-name order so repeated runs see the same
//! sequence. A category root that does not exist is a configuration error and
//! stops the build before anything is rendered.

use crate::config::CategoryConfig;
use crate::paths::relative_to;
use crate::types::SourceDocument;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Category root does not exist: {0}")]
    MissingRoot(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<walkdir::Error> for ScanError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        ScanError::Io { path, source }
    }
}

/// Discover every document under the configured categories.
///
/// Categories are scanned in configuration order; within a category, files
/// come out depth-first in file-name order.
pub fn discover(
    source_root: &Path,
    categories: &[CategoryConfig],
    extension: &str,
) -> Result<Vec<SourceDocument>, ScanError> {
    let source_root = std::path::absolute(source_root).map_err(|source| ScanError::Io {
        path: source_root.to_path_buf(),
        source,
    })?;

    let mut documents = Vec::new();
    for category in categories {
        let found = discover_category(&source_root, category, extension)?;
        tracing::debug!(
            category = %category.key,
            count = found.len(),
            "scanned category root"
        );
        documents.extend(found);
    }
    Ok(documents)
}

fn discover_category(
    source_root: &Path,
    category: &CategoryConfig,
    extension: &str,
) -> Result<Vec<SourceDocument>, ScanError> {
    let category_root = source_root.join(&category.dir);
    if !category_root.is_dir() {
        return Err(ScanError::MissingRoot(category_root));
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(&category_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_document(entry.path(), extension) {
            continue;
        }
        let path = entry.path().to_path_buf();
        documents.push(SourceDocument {
            category: category.key.clone(),
            rel_path: relative_to(&path, source_root),
            category_path: relative_to(&path, &category_root),
            path,
        });
    }
    Ok(documents)
}

/// Exact, case-sensitive match: `intro.MD` next to `intro.md` would otherwise
/// map onto the same `intro.html`.
fn is_document(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|e| e == extension)
}
