//! Line-oriented markdown block parser.
//!
//! Documents are consumed one line at a time. Exactly one block accumulator is
//! open at any moment ([`Current`]); every line is classified by a pure
//! function ([`classify`]) and the parser either extends the open accumulator
//! or flushes it and opens a new one.
//!
//! ## Line Classification
//!
//! Checked in priority order:
//!
//! | Line | Effect |
//! |------|--------|
//! | ```` ```lang ```` | Open (or close) a code fence |
//! | *(inside a fence)* | Appended verbatim, escaped |
//! | blank | Flush, back to idle |
//! | `\|a\|b\|` | Table row (a dash/colon-only row is the alignment separator) |
//! | `#`..`######` text | Flush, emit heading, record TOC entry |
//! | `- `, `* `, `+ `, `N. ` | List item (marker kind picks ordered/unordered) |
//! | `> ` | Blockquote line |
//! | anything else | Paragraph line |
//!
//! The parser never fails. An unclosed fence runs to the end of the document,
//! and a run of `|…|` lines without a separator row is rendered as a paragraph.
//! Nested lists are not supported; indented items join the surrounding list.

use crate::inline::{escape_html, format_inline};
use serde::Serialize;

/// A heading recorded for the table of contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    /// Nesting level, 1 through 6.
    pub level: u8,
    /// Heading text as written, without the `#` marker.
    pub text: String,
    /// Anchor id derived with [`slugify`].
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// A rendered structural unit. Text fields hold inline-formatted HTML.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        id: String,
        html: String,
    },
    Paragraph(String),
    List {
        kind: ListKind,
        items: Vec<String>,
    },
    Blockquote(String),
    CodeFence {
        language: Option<String>,
        code: String,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl Block {
    pub fn to_html(&self) -> String {
        match self {
            Block::Heading { level, id, html } => {
                format!(r#"<h{level} id="{id}">{html}</h{level}>"#)
            }
            Block::Paragraph(html) => format!("<p>{html}</p>"),
            Block::List { kind, items } => {
                let tag = kind.tag();
                let body: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
                format!("<{tag}>{body}</{tag}>")
            }
            Block::Blockquote(html) => format!("<blockquote><p>{html}</p></blockquote>"),
            Block::CodeFence { language, code } => match language {
                Some(lang) => format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    code
                ),
                None => format!("<pre><code>{code}</code></pre>"),
            },
            Block::Table { header, rows } => {
                let head: String = header.iter().map(|c| format!("<th>{c}</th>")).collect();
                let body: String = rows
                    .iter()
                    .map(|row| {
                        let cells: String = row.iter().map(|c| format!("<td>{c}</td>")).collect();
                        format!("<tr>{cells}</tr>")
                    })
                    .collect();
                format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>")
            }
        }
    }
}

/// Output of parsing one document.
#[derive(Debug, Default)]
pub struct ParsedDocument {
    pub blocks: Vec<Block>,
    pub headings: Vec<Heading>,
}

impl ParsedDocument {
    /// Block HTML joined in document order.
    pub fn html(&self) -> String {
        self.blocks
            .iter()
            .map(Block::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Derive an anchor id from heading text.
///
/// Lower-cases, drops everything except ASCII letters, digits, whitespace and
/// hyphens, then collapses whitespace runs into single hyphens.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// What a single line means outside of a code fence.
#[derive(Debug, PartialEq)]
enum LineKind<'a> {
    Fence(Option<&'a str>),
    Blank,
    TableRow(&'a str),
    Heading { level: u8, text: &'a str },
    ListItem { kind: ListKind, text: &'a str },
    Quote(&'a str),
    Text(&'a str),
}

fn fence_language(line: &str) -> Option<Option<&str>> {
    let rest = line.trim_start().strip_prefix("```")?;
    let lang = rest.trim();
    Some((!lang.is_empty()).then_some(lang))
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some((hashes as u8, text))
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    let line = line.trim_start();
    for marker in ["- ", "* ", "+ "] {
        if let Some(text) = line.strip_prefix(marker) {
            return Some((ListKind::Unordered, text.trim()));
        }
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0
        && let Some(text) = line[digits..].strip_prefix(". ")
    {
        return Some((ListKind::Ordered, text.trim()));
    }
    None
}

fn quote(line: &str) -> Option<&str> {
    let line = line.trim_start();
    if line == ">" {
        return Some("");
    }
    line.strip_prefix("> ").map(str::trim)
}

fn is_table_row(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 2 && t.starts_with('|') && t.ends_with('|')
}

fn classify(line: &str) -> LineKind<'_> {
    if let Some(lang) = fence_language(line) {
        return LineKind::Fence(lang);
    }
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if is_table_row(line) {
        return LineKind::TableRow(line.trim());
    }
    if let Some((level, text)) = heading(line) {
        return LineKind::Heading { level, text };
    }
    if let Some((kind, text)) = list_item(line) {
        return LineKind::ListItem { kind, text };
    }
    if let Some(text) = quote(line) {
        return LineKind::Quote(text);
    }
    LineKind::Text(line.trim())
}

fn table_cells(row: &str) -> Vec<&str> {
    row[1..row.len() - 1].split('|').map(str::trim).collect()
}

fn is_separator(cells: &[&str]) -> bool {
    cells
        .iter()
        .all(|c| !c.is_empty() && c.chars().all(|ch| ch == '-' || ch == ':'))
}

#[derive(Debug, Default)]
struct TableBuffer {
    raw: Vec<String>,
    rows: Vec<Vec<String>>,
    separator_seen: bool,
}

impl TableBuffer {
    fn push(&mut self, row: &str) {
        self.raw.push(row.to_string());
        let cells = table_cells(row);
        if is_separator(&cells) {
            self.separator_seen = true;
        } else {
            self.rows
                .push(cells.into_iter().map(format_inline).collect());
        }
    }

    fn into_block(self) -> Option<Block> {
        if !self.separator_seen {
            return Some(Block::Paragraph(format_inline(&self.raw.join(" "))));
        }
        let mut rows = self.rows.into_iter();
        let header = rows.next()?;
        Some(Block::Table {
            header,
            rows: rows.collect(),
        })
    }
}

/// Which accumulator a line wants open.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Accumulator {
    Paragraph,
    List(ListKind),
    Blockquote,
    Table,
}

/// The single open block accumulator.
#[derive(Debug, Default)]
enum Current {
    #[default]
    Idle,
    Paragraph(Vec<String>),
    List {
        kind: ListKind,
        items: Vec<String>,
    },
    Blockquote(Vec<String>),
    CodeFence {
        language: Option<String>,
        lines: Vec<String>,
    },
    Table(TableBuffer),
}

impl Current {
    fn accumulator(&self) -> Option<Accumulator> {
        match self {
            Current::Paragraph(_) => Some(Accumulator::Paragraph),
            Current::List { kind, .. } => Some(Accumulator::List(*kind)),
            Current::Blockquote(_) => Some(Accumulator::Blockquote),
            Current::Table(_) => Some(Accumulator::Table),
            Current::Idle | Current::CodeFence { .. } => None,
        }
    }

    fn start(acc: Accumulator) -> Self {
        match acc {
            Accumulator::Paragraph => Current::Paragraph(Vec::new()),
            Accumulator::List(kind) => Current::List {
                kind,
                items: Vec::new(),
            },
            Accumulator::Blockquote => Current::Blockquote(Vec::new()),
            Accumulator::Table => Current::Table(TableBuffer::default()),
        }
    }

    fn into_block(self) -> Option<Block> {
        match self {
            Current::Idle => None,
            Current::Paragraph(lines) => Some(Block::Paragraph(format_inline(&lines.join(" ")))),
            Current::List { kind, items } => Some(Block::List { kind, items }),
            Current::Blockquote(lines) => Some(Block::Blockquote(format_inline(&lines.join(" ")))),
            Current::CodeFence { language, lines } => Some(Block::CodeFence {
                language,
                code: escape_html(&lines.join("\n")),
            }),
            Current::Table(table) => table.into_block(),
        }
    }
}

#[derive(Default)]
struct BlockParser {
    current: Current,
    blocks: Vec<Block>,
    headings: Vec<Heading>,
}

impl BlockParser {
    fn flush(&mut self) {
        if let Some(block) = std::mem::take(&mut self.current).into_block() {
            self.blocks.push(block);
        }
    }

    /// Return the accumulator for `acc`, flushing whatever else was open.
    fn open(&mut self, acc: Accumulator) -> &mut Current {
        if self.current.accumulator() != Some(acc) {
            self.flush();
            self.current = Current::start(acc);
        }
        &mut self.current
    }

    fn feed(&mut self, line: &str) {
        if let Current::CodeFence { lines, .. } = &mut self.current {
            if fence_language(line).is_some() {
                self.flush();
            } else {
                lines.push(line.to_string());
            }
            return;
        }

        match classify(line) {
            LineKind::Fence(language) => {
                self.flush();
                self.current = Current::CodeFence {
                    language: language.map(str::to_string),
                    lines: Vec::new(),
                };
            }
            LineKind::Blank => self.flush(),
            LineKind::TableRow(row) => {
                if let Current::Table(table) = self.open(Accumulator::Table) {
                    table.push(row);
                }
            }
            LineKind::Heading { level, text } => {
                self.flush();
                let id = slugify(text);
                self.blocks.push(Block::Heading {
                    level,
                    id: id.clone(),
                    html: format_inline(text),
                });
                self.headings.push(Heading {
                    level,
                    text: text.to_string(),
                    id,
                });
            }
            LineKind::ListItem { kind, text } => {
                if let Current::List { items, .. } = self.open(Accumulator::List(kind)) {
                    items.push(format_inline(text));
                }
            }
            LineKind::Quote(text) => {
                if let Current::Blockquote(lines) = self.open(Accumulator::Blockquote) {
                    lines.push(text.to_string());
                }
            }
            LineKind::Text(text) => {
                if let Current::Paragraph(lines) = self.open(Accumulator::Paragraph) {
                    lines.push(text.to_string());
                }
            }
        }
    }

    fn finish(mut self) -> ParsedDocument {
        self.flush();
        ParsedDocument {
            blocks: self.blocks,
            headings: self.headings,
        }
    }
}

/// Parse a whole document into blocks and TOC headings.
pub fn parse_document(source: &str) -> ParsedDocument {
    let mut parser = BlockParser::default();
    for line in source.lines() {
        parser.feed(line);
    }
    parser.finish()
}
