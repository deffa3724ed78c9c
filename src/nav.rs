//! Navigation tree construction.
//!
//! Every discovered page is placed in exactly one [`NavGroup`], keyed by its
//! category and the directory it sits in relative to the category root:
//!
//! ```text
//! notes/intro.md                  →  "Notes"            : Intro
//! notes/rust/index.md             →  "Notes / Rust"     : Rust
//! notes/rust/ownership.md         →  "Notes / Rust"     : Ownership
//! practice/drills/loops.md        →  "Practice / Drills": Loops
//! ```
//!
//! Items within a group and the groups themselves are ordered
//! case-insensitively by title and label. The whole structure is built before
//! any page renders because every page embeds all of it.

use crate::config::CategoryConfig;
use crate::naming::{group_label, title_case};
use crate::types::{NavGroup, NavItem, PlannedPage};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Case-insensitive ordering key with the original text as a tiebreak.
fn sort_key(text: &str) -> (String, String) {
    (text.to_lowercase(), text.to_string())
}

fn category_label(categories: &[CategoryConfig], key: &str) -> String {
    categories
        .iter()
        .find(|c| c.key == key)
        .map(CategoryConfig::display_label)
        .unwrap_or_else(|| title_case(key))
}

/// Group pages by (category, directory) and sort groups and items.
pub fn build_navigation(pages: &[PlannedPage], categories: &[CategoryConfig]) -> Vec<NavGroup> {
    let mut grouped: BTreeMap<(String, PathBuf), Vec<NavItem>> = BTreeMap::new();

    for page in pages {
        let dir = page
            .document
            .category_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        grouped
            .entry((page.document.category.clone(), dir))
            .or_default()
            .push(NavItem {
                title: page.title.clone(),
                href: page.mapping.href.clone(),
            });
    }

    let mut groups: Vec<NavGroup> = grouped
        .into_iter()
        .map(|((category, dir), mut items)| {
            items.sort_by_cached_key(|item| (sort_key(&item.title), item.href.clone()));
            NavGroup {
                label: group_label(&category_label(categories, &category), &dir),
                items,
            }
        })
        .collect();

    groups.sort_by_cached_key(|g| sort_key(&g.label));
    groups
}

/// Total number of items across all groups.
pub fn item_count(groups: &[NavGroup]) -> usize {
    groups.iter().map(|g| g.items.len()).sum()
}
