//! HTML page assembly.
//!
//! Wraps rendered block HTML in the site frame: header with breadcrumb,
//! sidebar navigation, table of contents, and the document body. Nothing here
//! transforms content; it only composes already-rendered pieces.
//!
//! ## Page Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Site title        Home › notes/rust/intro.md │  header.site-header
//! ├──────────────┬───────────────────────────────┤
//! │ Notes        │ Contents                      │  nav.toc
//! │   Intro      │   Heading one                 │
//! │ Notes / Rust │ ───────────────────────────── │
//! │ ▸ Ownership  │ <rendered blocks>             │  article.doc
//! └──────────────┴───────────────────────────────┘
//!   aside.sidebar  main.content
//! ```
//!
//! ## Relative Links
//!
//! Pages never use absolute URLs. Each page computes a `../` prefix from its
//! own depth ([`crate::paths::root_prefix`]) and prepends it to asset and
//! navigation hrefs, so the output tree can be served from any sub-path or
//! opened straight from disk.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Titles, labels and paths are auto-escaped; only the parser's block HTML is
//! injected with `PreEscaped`.

use crate::markdown::{Heading, ParsedDocument};
use crate::paths::{root_prefix, to_href};
use crate::types::{NavGroup, PlannedPage};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Path of the compiled-in stylesheet inside the output root.
pub const STYLE_HREF: &str = "assets/style.css";
/// Path of the generated color stylesheet inside the output root.
pub const THEME_HREF: &str = "assets/theme.css";
/// The site index page.
pub const INDEX_HREF: &str = "index.html";

/// Site-wide values every page needs.
#[derive(Debug, Clone, Copy)]
pub struct SiteContext<'a> {
    pub title: &'a str,
    pub nav: &'a [NavGroup],
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, prefix: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href={ (prefix) (STYLE_HREF) };
                link rel="stylesheet" href={ (prefix) (THEME_HREF) };
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with title link and breadcrumb
fn site_header(site_title: &str, prefix: &str, breadcrumb: Markup) -> Markup {
    html! {
        header.site-header {
            a.site-title href={ (prefix) (INDEX_HREF) } { (site_title) }
            nav.breadcrumb {
                (breadcrumb)
            }
        }
    }
}

/// Renders the sidebar navigation, marking `current_href` as active
pub fn render_nav(groups: &[NavGroup], current_href: Option<&str>, prefix: &str) -> Markup {
    html! {
        nav.site-nav {
            @for group in groups {
                section.nav-group {
                    h2.nav-group-label { (group.label) }
                    ul {
                        @for item in &group.items {
                            @let active = current_href == Some(item.href.as_str());
                            li class=[active.then_some("active")] {
                                a href={ (prefix) (item.href) } aria-current=[active.then_some("page")] {
                                    (item.title)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the table of contents, or nothing for a document without headings
pub fn render_toc(headings: &[Heading]) -> Markup {
    html! {
        @if !headings.is_empty() {
            nav.toc {
                h2.toc-title { "Contents" }
                ul {
                    @for heading in headings {
                        li class={ "toc-level-" (heading.level) } {
                            a href={ "#" (heading.id) } { (heading.text) }
                        }
                    }
                }
            }
        }
    }
}

/// Sidebar plus main column
fn layout(site: &SiteContext, current_href: Option<&str>, prefix: &str, main: Markup) -> Markup {
    html! {
        div.layout {
            aside.sidebar {
                (render_nav(site.nav, current_href, prefix))
            }
            main.content {
                (main)
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders one document page
pub fn render_page(page: &PlannedPage, parsed: &ParsedDocument, site: &SiteContext) -> Markup {
    let href = page.mapping.href.as_str();
    let prefix = root_prefix(href);

    let breadcrumb = html! {
        a href={ (prefix) (INDEX_HREF) } { "Home" }
        " › "
        span.breadcrumb-path { (to_href(&page.document.rel_path)) }
    };

    let main = html! {
        (render_toc(&parsed.headings))
        article.doc data-category=(page.document.category) {
            (PreEscaped(parsed.html()))
        }
    };

    let content = html! {
        (site_header(site.title, &prefix, breadcrumb))
        (layout(site, Some(href), &prefix, main))
    };

    base_document(&format!("{} · {}", page.title, site.title), &prefix, content)
}

/// Renders the site index summarizing every nav group
pub fn render_index(site: &SiteContext) -> Markup {
    let breadcrumb = html! { span.breadcrumb-path { "Home" } };

    let main = html! {
        h1.index-title { (site.title) }
        @for group in site.nav {
            section.index-group {
                h2 {
                    (group.label)
                    " "
                    span.index-count { "(" (group.items.len()) ")" }
                }
                ul {
                    @for item in &group.items {
                        li { a href=(item.href) { (item.title) } }
                    }
                }
            }
        }
    };

    let content = html! {
        (site_header(site.title, "", breadcrumb))
        (layout(site, None, "", main))
    };

    base_document(site.title, "", content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parse_document;
    use crate::paths::map_output;
    use crate::types::{NavItem, SourceDocument};
    use std::path::{Path, PathBuf};

    fn nav() -> Vec<NavGroup> {
        vec![
            NavGroup {
                label: "Notes".to_string(),
                items: vec![NavItem {
                    title: "Intro".to_string(),
                    href: "notes/intro.html".to_string(),
                }],
            },
            NavGroup {
                label: "Notes / Rust".to_string(),
                items: vec![
                    NavItem {
                        title: "Ownership".to_string(),
                        href: "notes/rust/ownership.html".to_string(),
                    },
                    NavItem {
                        title: "Rust".to_string(),
                        href: "notes/rust/index.html".to_string(),
                    },
                ],
            },
        ]
    }

    fn planned(rel: &str, title: &str) -> PlannedPage {
        let rel_path = PathBuf::from(rel);
        PlannedPage {
            mapping: map_output(&rel_path, Path::new("dist")),
            document: SourceDocument {
                category: "notes".to_string(),
                path: Path::new("/src").join(&rel_path),
                category_path: rel_path.strip_prefix("notes").unwrap().to_path_buf(),
                rel_path,
            },
            title: title.to_string(),
        }
    }

    #[test]
    fn base_document_includes_doctype() {
        let doc = base_document("Test", "", html! { p { "x" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Test</title>"));
    }

    #[test]
    fn nav_marks_only_current_item_active() {
        let groups = nav();
        let html = render_nav(&groups, Some("notes/rust/ownership.html"), "../../").into_string();

        assert_eq!(html.matches(r#"class="active""#).count(), 1);
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
        assert!(html.contains(r#"<li class="active"><a href="../../notes/rust/ownership.html""#));
        assert!(html.contains(r#"href="../../notes/intro.html""#));
    }

    #[test]
    fn nav_without_current_page() {
        let groups = nav();
        let html = render_nav(&groups, None, "").into_string();
        assert!(!html.contains("active"));
        assert!(html.contains("Notes / Rust"));
    }

    #[test]
    fn nav_escapes_titles() {
        let groups = vec![NavGroup {
            label: "<b>".to_string(),
            items: vec![NavItem {
                title: "<script>alert('x')</script>".to_string(),
                href: "a.html".to_string(),
            }],
        }];
        let html = render_nav(&groups, None, "").into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn toc_lists_headings_with_anchors() {
        let parsed = parse_document("# Title\n## Part One\n### Detail");
        let html = render_toc(&parsed.headings).into_string();
        assert!(html.contains(r##"<li class="toc-level-1"><a href="#title">Title</a></li>"##));
        assert!(html.contains(r##"<li class="toc-level-2"><a href="#part-one">Part One</a></li>"##));
        assert!(html.contains(r##"<li class="toc-level-3"><a href="#detail">Detail</a></li>"##));
    }

    #[test]
    fn toc_empty_without_headings() {
        assert_eq!(render_toc(&[]).into_string(), "");
    }

    #[test]
    fn page_resolves_assets_by_depth() {
        let groups = nav();
        let site = SiteContext {
            title: "Docs",
            nav: &groups,
        };
        let page = planned("notes/rust/ownership.md", "Ownership");
        let parsed = parse_document("# Ownership\nMoves and **borrows**.");
        let html = render_page(&page, &parsed, &site).into_string();

        assert!(html.contains(r#"href="../../assets/style.css""#));
        assert!(html.contains(r#"href="../../assets/theme.css""#));
        assert!(html.contains(r#"href="../../index.html""#));
        assert!(!html.contains(r#"href="/"#));
    }

    #[test]
    fn page_contains_title_breadcrumb_toc_and_content() {
        let groups = nav();
        let site = SiteContext {
            title: "Docs",
            nav: &groups,
        };
        let page = planned("notes/intro.md", "Intro");
        let parsed = parse_document("# Hello\nThis is **bold**.");
        let html = render_page(&page, &parsed, &site).into_string();

        assert!(html.contains("<title>Intro · Docs</title>"));
        assert!(html.contains(r#"<span class="breadcrumb-path">notes/intro.md</span>"#));
        assert!(html.contains(r#"<nav class="toc">"#));
        assert!(html.contains(r#"<h1 id="hello">Hello</h1>"#));
        assert!(html.contains("<p>This is <strong>bold</strong>.</p>"));
        assert!(html.contains(r#"<li class="active"><a href="../notes/intro.html""#));
    }

    #[test]
    fn index_lists_every_group_with_counts() {
        let groups = nav();
        let site = SiteContext {
            title: "Field Notes",
            nav: &groups,
        };
        let html = render_index(&site).into_string();

        assert!(html.contains("<title>Field Notes</title>"));
        assert!(html.contains(r#"<span class="index-count">(1)</span>"#));
        assert!(html.contains(r#"<span class="index-count">(2)</span>"#));
        assert!(html.contains(r#"<a href="notes/rust/index.html">Rust</a>"#));
        assert!(html.contains(r#"href="assets/style.css""#));
        assert!(!html.contains("active"));
    }
}
