//! Post-render text transforms.
//!
//! Transforms run on rendered HTML after the backend render step. An
//! adapter composes an ordered list of them from its configuration, so a
//! behavior like smart typography is a capability added to a base
//! renderer rather than a separate render path.

/// A text transformation applied to rendered HTML.
pub trait TextTransform: Send + Sync {
    /// Stable name used in configuration and diagnostics.
    fn name(&self) -> &'static str;

    /// Apply the transformation.
    fn apply(&self, html: &str) -> String;
}

/// Typographic substitution: straight quotes to curly quotes, `--`/`---`
/// to en/em dashes, `...` to an ellipsis.
///
/// Substitutions apply only to text content. Markup is passed through
/// untouched, as is everything inside `<pre>`, `<code>`, `<kbd>`,
/// `<script>`, and `<style>` elements.
pub struct SmartTypography;

impl TextTransform for SmartTypography {
    fn name(&self) -> &'static str {
        "smart"
    }

    fn apply(&self, html: &str) -> String {
        smarten(html)
    }
}

/// Elements whose text content must never be typographically altered.
const VERBATIM_TAGS: &[&str] = &["pre", "code", "kbd", "script", "style"];

/// Elements that begin a new quoting context. A quote right after one of
/// these opens, no matter what text preceded the tag.
const BLOCK_TAGS: &[&str] = &[
    "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "td", "th", "tr", "ul", "ol",
    "table", "div", "br",
];

fn smarten(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    let mut verbatim_depth = 0usize;
    // Last visible text character, used to pick quote direction.
    let mut prev: Option<char> = None;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let end = rest.find('>').map_or(rest.len(), |pos| pos + 1);
            let tag = &rest[..end];
            match verbatim_delta(tag) {
                Some(true) => verbatim_depth += 1,
                Some(false) => verbatim_depth = verbatim_depth.saturating_sub(1),
                None => {}
            }
            // A block boundary starts a fresh quoting context.
            if BLOCK_TAGS.contains(&tag_name(tag).as_str()) {
                prev = None;
            }
            out.push_str(tag);
            rest = &rest[end..];
            continue;
        }

        if verbatim_depth > 0 {
            let end = rest.find('<').unwrap_or(rest.len());
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if let Some(tail) = rest.strip_prefix("&quot;") {
            out.push(if opens_quote(prev) { '\u{201C}' } else { '\u{201D}' });
            prev = Some('"');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('"') {
            out.push(if opens_quote(prev) { '\u{201C}' } else { '\u{201D}' });
            prev = Some('"');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("...") {
            out.push('\u{2026}');
            prev = Some('\u{2026}');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("---") {
            out.push('\u{2014}');
            prev = Some('\u{2014}');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("--") {
            out.push('\u{2013}');
            prev = Some('\u{2013}');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('\'') {
            out.push(if opens_quote(prev) { '\u{2018}' } else { '\u{2019}' });
            prev = Some('\'');
            rest = tail;
        } else if let Some(ch) = rest.chars().next() {
            out.push(ch);
            prev = Some(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    out
}

/// Whether a quote at this position opens (`Some(true)` after whitespace or
/// an opening bracket) rather than closes.
fn opens_quote(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(ch) => {
            ch.is_whitespace() || matches!(ch, '(' | '[' | '{' | '\u{2018}' | '\u{201C}')
        }
    }
}

/// Lowercased element name of a raw `<...>` tag, for either an opening or
/// a closing tag.
fn tag_name(tag: &str) -> String {
    let name_start = if tag.starts_with("</") { 2 } else { 1 };
    tag[name_start..]
        .chars()
        .take_while(|ch| ch.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Classify a tag's effect on the verbatim region: `Some(true)` enters one,
/// `Some(false)` leaves one, `None` is neutral.
fn verbatim_delta(tag: &str) -> Option<bool> {
    let closing = tag.starts_with("</");
    if !VERBATIM_TAGS.contains(&tag_name(tag).as_str()) {
        return None;
    }
    if closing {
        Some(false)
    } else if tag.ends_with("/>") {
        None
    } else {
        Some(true)
    }
}
