//! # docsite
//!
//! A static documentation site builder for personal markdown notes.
//! Your filesystem is the data source: category directories hold markdown
//! files, every file becomes one HTML page, and every directory becomes one
//! navigation group.
//!
//! # Architecture: One Linear Pipeline
//!
//! ```text
//! 1. Discover  category roots  →  SourceDocument[]   (sorted, deterministic)
//! 2. Plan      documents       →  pages + nav groups (pure, no I/O)
//! 3. Render    markdown        →  blocks → HTML page (per document)
//! 4. Publish   pages + assets  →  <output>/          (full rebuild)
//! ```
//!
//! Discovery and planning never write to disk, which is what the `check`
//! command runs. Rendering and publishing happen only in [`site::build`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`inline`] | Inline formatter: escaping, code spans, bold, italic, links |
//! | [`markdown`] | Line-oriented block parser and heading extraction |
//! | [`scan`] | Discovers markdown files under each category root |
//! | [`paths`] | Maps source paths to output files and relative hrefs |
//! | [`naming`] | Titles and group labels derived from file and directory names |
//! | [`nav`] | Groups pages by category and directory into the sidebar tree |
//! | [`generate`] | Assembles full HTML pages and the index using Maud |
//! | [`site`] | Build orchestrator: reset, render, copy assets, write index |
//! | [`config`] | `docsite.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types passed between stages |
//! | [`output`] | CLI output formatting for check and build results |
//!
//! # Design Decisions
//!
//! ## A Small Markdown Dialect
//!
//! The parser understands headings, paragraphs, flat lists, blockquotes,
//! fenced code and pipe tables, with code spans, bold, italic and links
//! inline. Anything else is text. Every character of source text is
//! HTML-escaped before any markup is added, so raw HTML in a note shows up as
//! text rather than being injected into the page.
//!
//! ## Titles From the Filesystem
//!
//! There is no front-matter. A page is titled after its filename
//! (`getting-started.md` → "Getting Started"), and `index.md` takes its
//! directory's name. See [`naming`].
//!
//! ## Full Rebuilds
//!
//! Every build deletes the output root and regenerates it from scratch.
//! Documents are rendered in sorted order, so identical input yields a
//! byte-identical output tree.
//!
//! ## Relative Links Everywhere
//!
//! Generated pages link to each other and to their assets through `../`
//! prefixes computed from their own depth, so the site works from any
//! sub-path or straight from disk.

pub mod config;
pub mod generate;
pub mod inline;
pub mod markdown;
pub mod naming;
pub mod nav;
pub mod output;
pub mod paths;
pub mod scan;
pub mod site;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
