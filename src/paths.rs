//! Source-to-output path mapping.
//!
//! The output tree mirrors the source tree. A document's path relative to the
//! source root is reused verbatim under the output root, with the extension
//! swapped for `.html`:
//!
//! ```text
//! content/notes/rust/ownership.md  →  dist/notes/rust/ownership.html
//!                                      href: notes/rust/ownership.html
//! ```
//!
//! Because the mapping is a bijection on relative paths, two distinct sources
//! can never collide. Hrefs are always `/`-separated regardless of the host
//! platform, and pages link to each other through a `../` prefix computed from
//! their own depth, so the site works from any sub-path.

use crate::types::OutputMapping;
use std::path::{Component, Path, PathBuf};

/// Map a source-root-relative document path into the output tree.
pub fn map_output(rel_path: &Path, output_root: &Path) -> OutputMapping {
    let html_rel = rel_path.with_extension("html");
    let output_file = output_root.join(&html_rel);
    let target_dir = output_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_root.to_path_buf());

    OutputMapping {
        target_dir,
        output_file,
        href: to_href(&html_rel),
    }
}

/// Join the normal components of a relative path with `/`.
pub fn to_href(rel_path: &Path) -> String {
    rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Number of directories between a page and the output root.
pub fn depth(href: &str) -> usize {
    href.matches('/').count()
}

/// Prefix that leads from a page back to the output root (`""`, `"../"`, ...).
pub fn root_prefix(href: &str) -> String {
    "../".repeat(depth(href))
}

/// Strip `root` from `path`, falling back to the path itself.
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root; leading `..` of a relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
