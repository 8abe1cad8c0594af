//! Conversion of report markdown into an HTML fragment.
//!
//! The analysis service emits a constrained markdown dialect (ATX headings,
//! `**`/`*` emphasis, `• ` bullets, bare links) and this module renders it
//! with a fixed pipeline of regex rewrites. The function is total: any input
//! string produces a fragment, and unrecognized markup passes through as
//! plain text.

use std::sync::LazyLock;

use regex::Regex;

static H3_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^• (.*)$").unwrap());
static LIST_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:<li>.*</li>\n)*<li>.*</li>").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Renders report markdown to an HTML fragment.
///
/// Rules run in a fixed order: headings (deepest first, so `###` is not
/// swallowed by the `#` rule), bold, italic, bullets, paragraph wrapping,
/// links. Each contiguous run of bullet lines becomes its own `<ul>`, so a
/// report that alternates lists and prose keeps its structure.
pub fn render(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let mut html = H3_RE.replace_all(markdown, "<h3>$1</h3>").into_owned();
    html = H2_RE.replace_all(&html, "<h2>$1</h2>").into_owned();
    html = H1_RE.replace_all(&html, "<h1>$1</h1>").into_owned();
    html = BOLD_RE
        .replace_all(&html, "<strong>$1</strong>")
        .into_owned();
    html = ITALIC_RE.replace_all(&html, "<em>$1</em>").into_owned();
    html = BULLET_RE.replace_all(&html, "<li>$1</li>").into_owned();
    // The run regex leaves the trailing newline unconsumed so blank-line
    // paragraph boundaries around a list survive the wrap.
    html = LIST_RUN_RE
        .replace_all(&html, |caps: &regex::Captures| {
            format!("<ul>{}</ul>", &caps[0])
        })
        .into_owned();
    html = format!("<p>{}</p>", html.replace("\n\n", "</p><p>"));
    LINK_RE
        .replace_all(
            &html,
            "<a href=\"$2\" target=\"_blank\" rel=\"noopener\">$1</a>",
        )
        .into_owned()
}

/// Renders an optional markdown field, treating absence as an empty fragment.
pub fn render_opt(markdown: Option<&str>) -> String {
    markdown.map(render).unwrap_or_default()
}
