//! Page text reduction and cleaning.
//!
//! Two steps turn a fetched page into evidence text:
//!
//! 1. [`readable_text`] reduces HTML to its visible text, dropping scripts,
//!    styles, navigation, footers and similar chrome. Non-HTML bodies pass
//!    through untouched.
//! 2. [`clean_text`] removes markdown link syntax, bare and inline URLs,
//!    search-page boilerplate lines and redundant whitespace.
//!
//! Both are pure and deterministic.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

/// Default maximum characters of cleaned text kept per evidence source.
pub const DEFAULT_MAX_CHARS: usize = 20_000;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid image pattern"));

static EMPTY_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\]\([^)]*\)").expect("valid empty link pattern"));

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("valid link pattern"));

static INLINE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid inline URL pattern"));

static SPACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid spaces pattern"));

/// Whole lines that carry no content: site names, search-page widgets and
/// AI-overview notices.
static BOILERPLATE_LINES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^www\.\S+$",
        r"^[\w\s]+\.com$",
        r"^\w+Dictionary$",
        r"^Wikipedia$",
        r"^Ancestry\.com$",
        r"^Hinkhoj$",
        r"^Show more$",
        r"^See more$",
        r"^Feedback$",
        r"^People also ask$",
        r"^Generative AI is experimental\. Learn more$",
        r"^Can't generate an AI overview.*$",
        r"^An AI Overview is not available.*$",
        r"^AI Overview$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid boilerplate pattern"))
    .collect()
});

/// Elements that start a new line of text when flattened.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "tr", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article",
    "blockquote", "pre", "dd", "dt", "figcaption", "td", "th",
];

// ── Cleaning ──────────────────────────────────────────────────

/// Normalise page text into plain readable paragraphs.
///
/// Applies, in order: image and empty-link removal, `[text](url)` to
/// `text`, inline URL and `›` removal, per-line whitespace collapse, and
/// removal of blank, bare-URL and boilerplate lines. Surviving lines are
/// joined as paragraphs separated by one blank line.
///
/// The transform is repeated until the output stops changing, so cleaning
/// already-clean text is a no-op.
pub fn clean_text(content: &str) -> String {
    // Passes after the first only delete text, so this reaches a fixpoint.
    let mut current = clean_pass(content);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(content: &str) -> String {
    let text = IMAGE_RE.replace_all(content, "");
    let text = EMPTY_LINK_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "$1");

    let paragraphs: Vec<String> = text
        .lines()
        .filter_map(|line| {
            let line = INLINE_URL_RE.replace_all(line, "");
            let line = line.replace('›', "");
            let line = SPACES_RE.replace_all(&line, " ");
            let line = line.trim();
            if line.is_empty() || is_boilerplate(line) {
                None
            } else {
                Some(line.to_owned())
            }
        })
        .collect();

    paragraphs.join("\n\n")
}

fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE_LINES.iter().any(|re| re.is_match(line))
}

/// Character count used by the evidence length gates.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

// ── HTML reduction ────────────────────────────────────────────

/// Returns true if `body` looks like an HTML document rather than text.
pub fn looks_like_html(body: &str) -> bool {
    let head: String = body.chars().take(2_048).collect::<String>().to_lowercase();
    head.contains("<html") || head.contains("<body") || head.contains("<!doctype html")
}

/// Reduce a fetched page to readable text; non-HTML bodies are returned as-is.
pub fn readable_text(body: &str) -> String {
    if looks_like_html(body) {
        html_to_text(body)
    } else {
        body.to_owned()
    }
}

/// Extract readable text from raw HTML.
///
/// The first non-empty `article`, `main`, `[role="main"]` or `body`
/// element is walked in document order. Chrome elements and everything
/// under them are skipped, and block elements break the line.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    for root in CONTENT_ROOTS {
        let Ok(selector) = Selector::parse(root) else {
            continue;
        };
        let Some(element) = document.select(&selector).next() else {
            continue;
        };
        let mut raw = String::new();
        push_visible_text(element, &mut raw);
        let text = tidy_lines(&raw);
        if !text.is_empty() {
            return text;
        }
    }
    String::new()
}

/// Candidate content roots, most specific first.
const CONTENT_ROOTS: [&str; 4] = ["article", "main", "[role=\"main\"]", "body"];

/// Elements whose whole subtree is page chrome, not content.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "noscript", "svg", "form", "iframe",
];

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                if SKIPPED_TAGS.contains(&el.name()) {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&el.name());
                if block {
                    out.push('\n');
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    push_visible_text(child_element, out);
                }
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Collapse whitespace inside lines and keep at most one blank line
/// between text lines.
fn tidy_lines(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() && lines.last().map_or(true, String::is_empty) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

/// Truncate text to `max_chars` characters, marking the cut.
pub fn truncate_to_limit(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_owned(),
        Some((end, _)) => {
            let mut truncated = text[..end].to_owned();
            truncated.push_str("\n\n[Content truncated]");
            truncated
        }
    }
}
