//! markdown-it backend adapter.
//!
//! Extensions are plugin registrations applied in list order on top of
//! CommonMark. The `toc` extension enables heading collection: after
//! rendering, every occurrence of the configured marker token is replaced
//! with a generated table of contents. When the marker is absent the
//! output is returned unmodified even if a TOC was generated.

use std::collections::HashMap;
use std::fmt::Write;

use markdown_it::parser::inline::Text;
use markdown_it::plugins::cmark::block::heading::ATXHeading;
use markdown_it::plugins::cmark::block::lheading::SetextHeader;
use markdown_it::{MarkdownIt, Node};

use crate::config::MarkdownItConfig;
use crate::error::ConvertError;

use super::RenderAdapter;

pub struct MarkdownItAdapter {
    md: MarkdownIt,
    collect_toc: bool,
    toc_token: String,
}

impl MarkdownItAdapter {
    pub(crate) fn new(config: &MarkdownItConfig) -> Self {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);

        let mut collect_toc = false;
        for name in &config.extensions {
            match name.as_str() {
                "tables" => markdown_it::plugins::extra::tables::add(&mut md),
                "strikethrough" => markdown_it::plugins::extra::strikethrough::add(&mut md),
                "linkify" => markdown_it::plugins::extra::linkify::add(&mut md),
                "typographer" => markdown_it::plugins::extra::typographer::add(&mut md),
                "smartquotes" => markdown_it::plugins::extra::smartquotes::add(&mut md),
                "html" => markdown_it::plugins::html::add(&mut md),
                "sourcepos" => markdown_it::plugins::sourcepos::add(&mut md),
                "toc" => collect_toc = true,
                other => {
                    tracing::debug!(extension = other, "ignoring unknown markdown-it extension");
                }
            }
        }

        Self {
            md,
            collect_toc,
            toc_token: config.toc_token.clone(),
        }
    }
}

impl RenderAdapter for MarkdownItAdapter {
    fn render(&self, content: &str) -> Result<String, ConvertError> {
        let ast = self.md.parse(content);
        let html = ast.render();

        if !self.collect_toc || self.toc_token.is_empty() || !html.contains(&self.toc_token) {
            return Ok(html);
        }
        let headings = collect_headings(&ast);
        if headings.is_empty() {
            return Ok(html);
        }
        Ok(html.replace(&self.toc_token, &render_toc(&headings)))
    }
}

/// One table-of-contents entry.
struct TocEntry {
    level: u8,
    title: String,
    id: String,
}

fn collect_headings(root: &Node) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut seen = HashMap::new();
    walk(root, &mut entries, &mut seen);
    entries
}

fn walk(node: &Node, entries: &mut Vec<TocEntry>, seen: &mut HashMap<String, usize>) {
    let level = if let Some(heading) = node.cast::<ATXHeading>() {
        Some(heading.level)
    } else {
        node.cast::<SetextHeader>().map(|heading| heading.level)
    };

    if let Some(level) = level {
        let title = text_content(node);
        let id = unique_slug(&title, seen);
        entries.push(TocEntry { level, title, id });
    }

    for child in &node.children {
        walk(child, entries, seen);
    }
}

/// Plain text of a node and its descendants. Inline code contributes its
/// literal content through its child text node; other inline containers
/// contribute their children's.
fn text_content(node: &Node) -> String {
    let mut text = String::new();
    if let Some(text_node) = node.cast::<Text>() {
        text.push_str(&text_node.content);
    }
    for child in &node.children {
        text.push_str(&text_content(child));
    }
    text
}

/// Anchor slug for a heading title, deduplicated with `-N` suffixes
/// (`faq`, `faq-1`, `faq-2`).
fn unique_slug(title: &str, seen: &mut HashMap<String, usize>) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }

    let count = seen.entry(slug.clone()).or_insert(0);
    let unique = if *count == 0 {
        slug.clone()
    } else {
        format!("{slug}-{count}")
    };
    *count += 1;
    unique
}

fn render_toc(entries: &[TocEntry]) -> String {
    let base = entries.iter().map(|entry| entry.level).min().unwrap_or(1);
    let mut out = String::from("<ul>\n");
    let mut depth = 1usize;
    for entry in entries {
        let target = usize::from(entry.level.saturating_sub(base)) + 1;
        while depth < target {
            out.push_str("<ul>\n");
            depth += 1;
        }
        while depth > target {
            out.push_str("</ul>\n");
            depth -= 1;
        }
        // Infallible writes to String.
        let _ = writeln!(
            out,
            r##"<li><a href="#{}">{}</a></li>"##,
            entry.id,
            escape_html(&entry.title)
        );
    }
    while depth > 0 {
        out.push_str("</ul>");
        depth -= 1;
        if depth > 0 {
            out.push('\n');
        }
    }
    out
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
