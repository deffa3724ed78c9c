//! Shared types passed between pipeline stages.
//!
//! Discovery produces [`SourceDocument`]s, the path mapper turns each into an
//! [`OutputMapping`], the navigation builder groups them into [`NavGroup`]s,
//! and the orchestrator reports the finished run as a [`SiteManifest`].
//! Everything here is immutable once built.

use serde::Serialize;
use std::path::PathBuf;

/// A markdown file found under one of the configured category roots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceDocument {
    /// Key of the category whose root contains this file (e.g. `"notes"`).
    pub category: String,
    /// Absolute path to the source file.
    pub path: PathBuf,
    /// Path relative to the overall source root (e.g. `notes/rust/ownership.md`).
    pub rel_path: PathBuf,
    /// Path relative to the category root (e.g. `rust/ownership.md`).
    pub category_path: PathBuf,
}

/// Where a source document lands in the output tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputMapping {
    /// Directory the output file is written into.
    pub target_dir: PathBuf,
    /// Full filesystem path of the generated `.html` file.
    pub output_file: PathBuf,
    /// POSIX-style link relative to the output root (e.g. `notes/rust/ownership.html`).
    pub href: String,
}

/// A single navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub title: String,
    pub href: String,
}

/// Documents that share a category and a directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavGroup {
    /// Display label, e.g. `"Notes / Rust"`.
    pub label: String,
    /// Items sorted by title.
    pub items: Vec<NavItem>,
}

/// Result of one build run.
#[derive(Debug, Clone, Serialize)]
pub struct SiteManifest {
    pub groups: Vec<NavGroup>,
    /// Hrefs of every rendered document page, in render order.
    pub rendered: Vec<String>,
    /// Hrefs of every file written under `assets/`.
    pub assets: Vec<String>,
}

/// A discovered document together with its output location and title.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedPage {
    pub document: SourceDocument,
    pub mapping: OutputMapping,
    /// Title derived from the filename (see [`crate::naming::page_title`]).
    pub title: String,
}
