//! Build orchestration.
//!
//! Runs the whole pipeline for one build, each step a precondition for the
//! next:
//!
//! ```text
//! 1. Discover  walk every category root          → SourceDocument[]
//! 2. Plan      map output paths + build nav       → SitePlan
//! 3. Reset     wipe and recreate the output root
//! 4. Render    parse → assemble → write, per page
//! 5. Assets    style.css, theme.css, assets_dir/  → <output>/assets/
//! 6. Index     one index.html over every nav group
//! ```
//!
//! Discovery and planning deliberately run ahead of the reset: both only
//! read, so a missing category root aborts the run before the output root is
//! touched. The reset also refuses an output root that overlaps the source
//! root, a category root or the assets directory.
//!
//! Rendering is sequential and every run is a full rebuild, so the same input
//! always produces a byte-identical tree. A later failure aborts the run and
//! leaves the output root as far as it got.

use crate::config::{self, ConfigError, SiteConfig};
use crate::generate::{self, INDEX_HREF, SiteContext};
use crate::markdown::parse_document;
use crate::naming::page_title;
use crate::nav::build_navigation;
use crate::paths::{map_output, normalize, to_href};
use crate::scan::{self, ScanError};
use crate::types::{NavGroup, PlannedPage, SiteManifest};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const STYLE_CSS: &str = include_str!("../static/style.css");

/// Name of the assets directory inside the output root.
pub const ASSETS_DIR: &str = "assets";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Refusing to use {output} as output root: it overlaps {protected}")]
    UnsafeOutput { output: PathBuf, protected: PathBuf },
    #[error("Failed to reset output root {path}: {source}")]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<walkdir::Error> for BuildError {
    fn from(err: walkdir::Error) -> Self {
        match ScanError::from(err) {
            ScanError::Io { path, source } => BuildError::Io { path, source },
            other => BuildError::Scan(other),
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError + '_ {
    move |source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Structural skeleton of the site: every page and the full navigation.
#[derive(Debug, Serialize)]
pub struct SitePlan {
    pub pages: Vec<PlannedPage>,
    pub groups: Vec<NavGroup>,
}

/// Discover documents, map their output paths and build navigation.
///
/// Touches nothing on disk beyond reading directory listings.
pub fn plan(
    source_root: &Path,
    output_root: &Path,
    config: &SiteConfig,
) -> Result<SitePlan, ScanError> {
    let documents = scan::discover(source_root, &config.categories, &config.extension)?;
    tracing::info!(count = documents.len(), "discovered documents");

    let pages: Vec<PlannedPage> = documents
        .into_iter()
        .map(|document| PlannedPage {
            title: page_title(&document.rel_path),
            mapping: map_output(&document.rel_path, output_root),
            document,
        })
        .collect();
    let groups = build_navigation(&pages, &config.categories);

    Ok(SitePlan { pages, groups })
}

/// Run a full build from `source_root` into `output_root`.
pub fn build(
    source_root: &Path,
    output_root: &Path,
    config: &SiteConfig,
) -> Result<SiteManifest, BuildError> {
    let plan = plan(source_root, output_root, config)?;
    reset_output(source_root, output_root, config)?;
    let site = SiteContext {
        title: &config.title,
        nav: &plan.groups,
    };

    let mut rendered = Vec::with_capacity(plan.pages.len());
    for page in &plan.pages {
        render_page(page, &site)?;
        rendered.push(page.mapping.href.clone());
    }
    tracing::info!(count = rendered.len(), "rendered pages");

    let assets = copy_assets(source_root, output_root, config)?;
    tracing::info!(count = assets.len(), "copied assets");

    let index_path = output_root.join(INDEX_HREF);
    fs::write(&index_path, generate::render_index(&site).into_string())
        .map_err(io_error(&index_path))?;

    Ok(SiteManifest {
        groups: plan.groups,
        rendered,
        assets,
    })
}

/// Absolute form of `path` with `..` resolved and symlinks followed as far
/// as the path exists on disk.
fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    let lexical = normalize(&std::path::absolute(path)?);
    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }
    let mut resolved = fs::canonicalize(existing)?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

/// Refuse an output root that would wipe source content.
///
/// The output may sit inside the source root, but it must not be the source
/// root, contain it, or overlap a category root or the assets directory.
fn check_output_root(
    source_root: &Path,
    output_root: &Path,
    config: &SiteConfig,
) -> Result<(), BuildError> {
    let resolve = |path: &Path| {
        resolve_path(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })
    };
    let source = resolve(source_root)?;
    let output = resolve(output_root)?;
    let unsafe_output = |protected: PathBuf| BuildError::UnsafeOutput {
        output: output_root.to_path_buf(),
        protected,
    };

    if source.starts_with(&output) {
        return Err(unsafe_output(source_root.to_path_buf()));
    }
    if !output.starts_with(&source) {
        return Ok(());
    }

    let content_dirs = config
        .categories
        .iter()
        .map(|c| c.dir.as_str())
        .chain([config.assets_dir.as_str()]);
    for dir in content_dirs {
        let protected = resolve(&source_root.join(dir))?;
        if output.starts_with(&protected) || protected.starts_with(&output) {
            return Err(unsafe_output(source_root.join(dir)));
        }
    }
    Ok(())
}

/// Delete and recreate the output root.
fn reset_output(
    source_root: &Path,
    output_root: &Path,
    config: &SiteConfig,
) -> Result<(), BuildError> {
    check_output_root(source_root, output_root, config)?;

    let clean_error = |source| BuildError::Clean {
        path: output_root.to_path_buf(),
        source,
    };
    if output_root.exists() {
        fs::remove_dir_all(output_root).map_err(clean_error)?;
    }
    fs::create_dir_all(output_root).map_err(clean_error)?;
    tracing::info!(output = %output_root.display(), "reset output root");
    Ok(())
}

fn render_page(page: &PlannedPage, site: &SiteContext) -> Result<(), BuildError> {
    let source = fs::read_to_string(&page.document.path).map_err(io_error(&page.document.path))?;
    let parsed = parse_document(&source);
    let html = generate::render_page(page, &parsed, site).into_string();

    fs::create_dir_all(&page.mapping.target_dir).map_err(io_error(&page.mapping.target_dir))?;
    fs::write(&page.mapping.output_file, html).map_err(io_error(&page.mapping.output_file))?;
    tracing::debug!(
        href = %page.mapping.href,
        blocks = parsed.blocks.len(),
        headings = parsed.headings.len(),
        "rendered page"
    );
    Ok(())
}

/// Write the stylesheets and copy `assets_dir` verbatim into `<output>/assets/`.
///
/// User files are copied last, so an `assets/style.css` in the source
/// replaces the built-in one. Returns output-relative hrefs of every file
/// written.
fn copy_assets(
    source_root: &Path,
    output_root: &Path,
    config: &SiteConfig,
) -> Result<Vec<String>, BuildError> {
    let assets_out = output_root.join(ASSETS_DIR);
    fs::create_dir_all(&assets_out).map_err(io_error(&assets_out))?;

    let mut written = Vec::new();
    for (href, contents) in [
        (generate::STYLE_HREF, STYLE_CSS.to_string()),
        (
            generate::THEME_HREF,
            config::generate_color_css(&config.colors),
        ),
    ] {
        let path = output_root.join(href);
        fs::write(&path, contents).map_err(io_error(&path))?;
        written.push(href.to_string());
    }

    let assets_src = source_root.join(&config.assets_dir);
    if !assets_src.is_dir() {
        return Ok(written);
    }

    for entry in WalkDir::new(&assets_src).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = crate::paths::relative_to(entry.path(), &assets_src);
        let dest = assets_out.join(&rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        fs::copy(entry.path(), &dest).map_err(io_error(entry.path()))?;

        let href = format!("{}/{}", ASSETS_DIR, to_href(&rel));
        if !written.contains(&href) {
            written.push(href);
        }
    }
    Ok(written)
}
