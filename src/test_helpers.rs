//! Shared test utilities for the docsite test suite.
//!
//! Provides fixture setup, lookup helpers and bulk extractors over discovery
//! and navigation data.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let docs = discover(tmp.path(), &categories, "md").unwrap();
//!
//! let group = find_group(&groups, "Notes / Rust");
//! assert_eq!(item_titles(group), vec!["Ownership", "Rust"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::paths::to_href;
use crate::types::{NavGroup, SourceDocument};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups, panicking with a clear message on miss
// =========================================================================

/// Find a discovered document by its `/`-joined source-relative path.
pub fn find_document<'a>(docs: &'a [SourceDocument], rel: &str) -> &'a SourceDocument {
    docs.iter()
        .find(|d| to_href(&d.rel_path) == rel)
        .unwrap_or_else(|| panic!("document '{rel}' not found. Available: {:?}", rel_paths(docs)))
}

/// Find a nav group by label. Panics if not found.
pub fn find_group<'a>(groups: &'a [NavGroup], label: &str) -> &'a NavGroup {
    groups
        .iter()
        .find(|g| g.label == label)
        .unwrap_or_else(|| {
            panic!(
                "nav group '{label}' not found. Available: {:?}",
                group_labels(groups)
            )
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Source-relative paths of discovered documents, `/`-joined, in order.
pub fn rel_paths(docs: &[SourceDocument]) -> Vec<String> {
    docs.iter().map(|d| to_href(&d.rel_path)).collect()
}

/// All group labels in nav order.
pub fn group_labels(groups: &[NavGroup]) -> Vec<&str> {
    groups.iter().map(|g| g.label.as_str()).collect()
}

/// Item titles of a group in nav order.
pub fn item_titles(group: &NavGroup) -> Vec<&str> {
    group.items.iter().map(|i| i.title.as_str()).collect()
}
