//! CLI output formatting for discovery and build results.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each page leads with
//! its positional index within its nav group and its title; filesystem paths
//! are secondary context, shown on indented `Source:` lines or after `→`.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Notes
//!     001 Intro
//!         Source: notes/intro.md
//! Notes / Rust
//!     001 Ownership
//!         Source: notes/rust/ownership.md
//!
//! Discovered 2 documents in 2 groups
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Notes
//!     001 Intro → notes/intro.html
//!
//! Assets
//!     assets/style.css
//!
//! Generated 1 page in 1 group
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::paths::to_href;
use crate::site::SitePlan;
use crate::types::SiteManifest;
use std::collections::HashMap;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `2 pages`.
fn count(n: usize, singular: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {singular}s")
    }
}

/// Format the result of discovery: every nav group with its pages and sources.
pub fn format_discovery_output(plan: &SitePlan) -> Vec<String> {
    let sources: HashMap<&str, String> = plan
        .pages
        .iter()
        .map(|p| (p.mapping.href.as_str(), to_href(&p.document.rel_path)))
        .collect();

    let mut lines = Vec::new();
    for group in &plan.groups {
        lines.push(group.label.clone());
        for (i, item) in group.items.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), item.title));
            if let Some(source) = sources.get(item.href.as_str()) {
                lines.push(format!("{}Source: {}", indent(2), source));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Discovered {} in {}",
        count(plan.pages.len(), "document"),
        count(plan.groups.len(), "group")
    ));
    lines
}

/// Print discovery output to stdout.
pub fn print_discovery_output(plan: &SitePlan) {
    for line in format_discovery_output(plan) {
        println!("{}", line);
    }
}

/// Format the result of a build: generated pages per group, then assets.
pub fn format_build_output(manifest: &SiteManifest) -> Vec<String> {
    let mut lines = vec!["Home \u{2192} index.html".to_string()];

    for group in &manifest.groups {
        lines.push(group.label.clone());
        for (i, item) in group.items.iter().enumerate() {
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                format_index(i + 1),
                item.title,
                item.href
            ));
        }
    }

    if !manifest.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for asset in &manifest.assets {
            lines.push(format!("{}{}", indent(1), asset));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {}",
        count(manifest.rendered.len(), "page"),
        count(manifest.groups.len(), "group")
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(manifest: &SiteManifest) {
    for line in format_build_output(manifest) {
        println!("{}", line);
    }
}
