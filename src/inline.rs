//! Span-level markdown formatting.
//!
//! Rewrites the inline markup of a single line into HTML. Code spans
//! (`` `text` ``) are resolved first and their contents are escaped and never
//! touched again. Bold (`**text**`), italic (`*text*`) and links
//! (`[label](url)`) then run over the whole escaped line, so they can wrap a
//! code span.
//!
//! Finished spans are parked behind `<@N>` tokens while later patterns run.
//! Escaped text never contains a raw `<`, so a token cannot be forged by the
//! input, and a URL parked behind one is safe from the emphasis patterns.
//!
//! Everything else is HTML-escaped. Unmatched markers (a lone `*`, an
//! unterminated backtick) pass through as literal characters.
//!
//! ```text
//! Use `a < b` for **strict** ordering  →  Use <code>a &lt; b</code> for <strong>strict</strong> ordering
//! ```

use regex::{Captures, Regex};
use std::sync::LazyLock;

static STRONG_EM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("bold italic pattern is valid"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+?)\*").expect("italic pattern is valid"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("link pattern is valid")
});

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A run of a line, either inside a code span or outside of one.
#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Text(&'a str),
    Code(&'a str),
}

/// Split a line on balanced backtick pairs.
///
/// An opening backtick with no closing partner is kept as text.
fn split_code_spans(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find('`') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('`') else {
            break;
        };
        if open > 0 {
            segments.push(Segment::Text(&rest[..open]));
        }
        segments.push(Segment::Code(&after[..close]));
        rest = &after[close + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}

/// Finished HTML spans, each standing in the working line as `<@N>`.
#[derive(Debug, Default)]
struct Parked {
    spans: Vec<String>,
}

impl Parked {
    fn park(&mut self, html: String) -> String {
        self.spans.push(html);
        format!("<@{}>", self.spans.len() - 1)
    }

    /// Swap tokens back, newest first, so spans parked inside later spans
    /// are restored too.
    fn restore(self, mut line: String) -> String {
        for (i, html) in self.spans.iter().enumerate().rev() {
            line = line.replacen(&format!("<@{i}>"), html, 1);
        }
        line
    }
}

/// Bold-italic, bold, then italic.
fn emphasize(text: &str) -> String {
    let strong_em = STRONG_EM_RE.replace_all(text, "<strong><em>$1</em></strong>");
    let bold = BOLD_RE.replace_all(&strong_em, "<strong>$1</strong>");
    ITALIC_RE.replace_all(&bold, "<em>$1</em>").into_owned()
}

/// Render one line of raw text as inline HTML.
pub fn format_inline(line: &str) -> String {
    let mut parked = Parked::default();

    let escaped: String = split_code_spans(line)
        .into_iter()
        .map(|segment| match segment {
            Segment::Code(code) => parked.park(format!("<code>{}</code>", escape_html(code))),
            Segment::Text(text) => escape_html(text),
        })
        .collect();

    let linked = LINK_RE
        .replace_all(&escaped, |caps: &Captures| {
            parked.park(format!(r#"<a href="{}">{}</a>"#, &caps[2], emphasize(&caps[1])))
        })
        .into_owned();

    parked.restore(emphasize(&linked))
}
