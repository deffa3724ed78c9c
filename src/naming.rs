//! Display titles derived from filenames and directory names.
//!
//! Documents carry no front-matter, so every human-readable label in the site
//! comes from the filesystem:
//!
//! - `getting-started.md` → "Getting Started" (page title)
//! - `error_handling/index.md` → "Error Handling" (index files take the parent directory's name)
//! - `notes` + `rust/async` → "Notes / Rust / Async" (nav group label)
//!
//! Hyphens and underscores become spaces, and each word gets an upper-case
//! first letter. The rest of the word is left alone, so `API-design` stays
//! "API Design".

use std::path::{Component, Path};

/// Separator placed between segments of a nav group label.
pub const LABEL_SEPARATOR: &str = " / ";

/// Title-case a single file or directory name.
pub fn title_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Page title for a document path.
///
/// Index files (`index.md`) are named after their parent directory.
pub fn page_title(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    if stem.eq_ignore_ascii_case("index")
        && let Some(parent) = path.parent().and_then(Path::file_name)
    {
        return title_case(&parent.to_string_lossy());
    }
    title_case(&stem)
}

/// Nav group label for a category and a directory inside it.
///
/// An empty directory means the category root, which is labelled with the
/// category label alone.
pub fn group_label(category_label: &str, dir: &Path) -> String {
    let mut parts = vec![category_label.to_string()];
    parts.extend(dir.components().filter_map(|c| match c {
        Component::Normal(name) => Some(title_case(&name.to_string_lossy())),
        _ => None,
    }));
    parts.join(LABEL_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_hyphens_and_underscores() {
        assert_eq!(title_case("getting-started"), "Getting Started");
        assert_eq!(title_case("error_handling"), "Error Handling");
        assert_eq!(title_case("mixed-case_name"), "Mixed Case Name");
    }

    #[test]
    fn title_case_keeps_inner_capitals() {
        assert_eq!(title_case("API-design"), "API Design");
    }

    #[test]
    fn title_case_collapses_repeated_separators() {
        assert_eq!(title_case("a--b__c"), "A B C");
        assert_eq!(title_case("-leading"), "Leading");
    }

    #[test]
    fn title_case_non_ascii() {
        assert_eq!(title_case("über-notes"), "Über Notes");
    }

    #[test]
    fn page_title_from_filename() {
        assert_eq!(page_title(Path::new("notes/intro.md")), "Intro");
        assert_eq!(
            page_title(Path::new("notes/rust/borrow-checker.md")),
            "Borrow Checker"
        );
    }

    #[test]
    fn page_title_index_uses_parent_dir() {
        assert_eq!(
            page_title(Path::new("practice/error_handling/index.md")),
            "Error Handling"
        );
        assert_eq!(page_title(Path::new("notes/INDEX.md")), "Notes");
    }

    #[test]
    fn page_title_bare_index() {
        assert_eq!(page_title(Path::new("index.md")), "Index");
    }

    #[test]
    fn group_label_root_and_nested() {
        assert_eq!(group_label("Notes", Path::new("")), "Notes");
        assert_eq!(
            group_label("Notes", Path::new("rust/async-io")),
            "Notes / Rust / Async Io"
        );
    }
}
