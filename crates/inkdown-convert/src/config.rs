//! Converter configuration structures.
//!
//! These are plain deserializable views: loading them from disk is the
//! caller's concern (see the `inkdown-config` crate). Every field has a
//! default so an empty table is always well-formed; backend-specific
//! sections are only consulted once that backend has been selected.

use serde::Deserialize;

/// Extensions claimed by default when the configuration omits a pattern.
pub const DEFAULT_EXTENSION_PATTERN: &str = "markdown,mkdown,mkdn,mkd,md";

/// Top-level converter configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Backend identifier (see [`crate::Backend`] for valid values).
    pub backend: String,
    /// Comma-separated extension tokens this converter claims
    /// (no leading dots, e.g. `"markdown,mkdn,md"`).
    pub extension_pattern: String,
    /// Options for the `pulldown` backend.
    pub pulldown: PulldownConfig,
    /// Options for the `comrak` backend.
    pub comrak: ComrakConfig,
    /// Options for the `markdown-it` backend.
    #[serde(alias = "markdown-it")]
    pub markdown_it: MarkdownItConfig,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            backend: "pulldown".to_owned(),
            extension_pattern: DEFAULT_EXTENSION_PATTERN.to_owned(),
            pulldown: PulldownConfig::default(),
            comrak: ComrakConfig::default(),
            markdown_it: MarkdownItConfig::default(),
        }
    }
}

/// Options for the pulldown-cmark backend.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PulldownConfig {
    /// Named extension flags, applied in order. Recognized names map onto
    /// parser extensions; `smart` composes a typographic post-render
    /// transform. Unknown names are ignored.
    pub extensions: Vec<String>,
    /// Named render-behavior flags. Unknown names are ignored.
    pub render_options: Vec<String>,
}

/// Options for the comrak backend.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ComrakConfig {
    /// Generate `id` attributes on headings.
    pub auto_ids: bool,
    /// Enable footnote syntax.
    pub footnotes: bool,
    /// Convert straight quotes and dashes to typographic equivalents.
    pub smart_quotes: bool,
    /// Render soft line breaks as `<br>`.
    pub hardbreaks: bool,
    /// Pass raw HTML through instead of escaping it.
    pub unsafe_html: bool,
    /// Enable GFM tables.
    pub tables: bool,
    /// Enable GFM strikethrough.
    pub strikethrough: bool,
    /// Enable GFM task lists.
    pub tasklists: bool,
    /// Enable syntect syntax highlighting for fenced code blocks.
    ///
    /// When `false`, the `syntect` sub-block is ignored entirely and no
    /// highlighting options reach the renderer.
    pub highlight: bool,
    /// Syntax highlighting options, consulted only when `highlight` is on.
    pub syntect: SyntectConfig,
}

/// Syntax highlighting sub-options for the comrak backend.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SyntectConfig {
    /// Color theme name. `None` emits class-annotated spans for external
    /// stylesheets instead of inline colors.
    pub theme: Option<String>,
}

/// Options for the markdown-it backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkdownItConfig {
    /// Plugin names registered in list order on top of CommonMark.
    /// The `toc` name enables table-of-contents collection instead of
    /// registering a plugin. Unknown names are ignored.
    pub extensions: Vec<String>,
    /// Marker token replaced with the generated table of contents.
    ///
    /// Substitution only happens when the `toc` extension is enabled, the
    /// document produced headings, and the rendered output contains this
    /// token; otherwise the output is returned unchanged.
    pub toc_token: String,
}

impl Default for MarkdownItConfig {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            toc_token: "{{TOC}}".to_owned(),
        }
    }
}
