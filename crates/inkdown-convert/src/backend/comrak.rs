//! comrak backend adapter.
//!
//! Flat document options plus an optional syntax-highlighting sub-block.
//! The highlighting gate is structural: when it is off, no syntect
//! adapter is constructed and the plugin-free render entry point is used,
//! so highlighting options never reach the renderer at all.

use comrak::plugins::syntect::SyntectAdapter;
use comrak::{Options, Plugins, markdown_to_html, markdown_to_html_with_plugins};

use crate::config::ComrakConfig;
use crate::error::ConvertError;

use super::RenderAdapter;

/// Render options derived from configuration once at setup.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ComrakPlan {
    auto_ids: bool,
    footnotes: bool,
    smart_quotes: bool,
    hardbreaks: bool,
    unsafe_html: bool,
    tables: bool,
    strikethrough: bool,
    tasklists: bool,
    /// Highlighting theme, present only when highlighting is enabled.
    /// `Some(None)` means class-annotated output without inline colors.
    highlight: Option<Option<String>>,
}

impl ComrakPlan {
    fn from_config(config: &ComrakConfig) -> Self {
        Self {
            auto_ids: config.auto_ids,
            footnotes: config.footnotes,
            smart_quotes: config.smart_quotes,
            hardbreaks: config.hardbreaks,
            unsafe_html: config.unsafe_html,
            tables: config.tables,
            strikethrough: config.strikethrough,
            tasklists: config.tasklists,
            highlight: config.highlight.then(|| config.syntect.theme.clone()),
        }
    }
}

pub struct ComrakAdapter {
    plan: ComrakPlan,
    highlighter: Option<SyntectAdapter>,
}

impl ComrakAdapter {
    pub(crate) fn new(config: &ComrakConfig) -> Self {
        let plan = ComrakPlan::from_config(config);
        let highlighter = plan
            .highlight
            .as_ref()
            .map(|theme| SyntectAdapter::new(theme.as_deref()));
        Self { plan, highlighter }
    }

    /// Materialize native options from the plan. The comrak option structs
    /// carry borrows, so they are rebuilt per render call; the plan itself
    /// is immutable after setup.
    #[allow(elided_lifetimes_in_paths)]
    fn options(&self) -> Options {
        let mut options = Options::default();
        options.extension.header_ids = self.plan.auto_ids.then(String::new);
        options.extension.footnotes = self.plan.footnotes;
        options.extension.table = self.plan.tables;
        options.extension.strikethrough = self.plan.strikethrough;
        options.extension.tasklist = self.plan.tasklists;
        options.parse.smart = self.plan.smart_quotes;
        options.render.hardbreaks = self.plan.hardbreaks;
        options.render.unsafe_ = self.plan.unsafe_html;
        options
    }

    #[cfg(test)]
    fn plan(&self) -> &ComrakPlan {
        &self.plan
    }
}

impl RenderAdapter for ComrakAdapter {
    fn render(&self, content: &str) -> Result<String, ConvertError> {
        let options = self.options();
        let html = match &self.highlighter {
            Some(adapter) => {
                let mut plugins = Plugins::default();
                plugins.render.codefence_syntax_highlighter = Some(adapter);
                markdown_to_html_with_plugins(content, &options, &plugins)
            }
            None => markdown_to_html(content, &options),
        };
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_off_suppresses_syntect_options() {
        let config = ComrakConfig {
            highlight: false,
            syntect: crate::config::SyntectConfig {
                theme: Some("base16-ocean.dark".to_owned()),
            },
            ..ComrakConfig::default()
        };
        let adapter = ComrakAdapter::new(&config);
        // The sub-block is present in config but must not reach the plan.
        assert_eq!(adapter.plan().highlight, None);
        assert!(adapter.highlighter.is_none());
    }

    #[test]
    fn test_highlight_on_threads_theme_through() {
        let config = ComrakConfig {
            highlight: true,
            syntect: crate::config::SyntectConfig {
                theme: Some("base16-ocean.dark".to_owned()),
            },
            ..ComrakConfig::default()
        };
        let adapter = ComrakAdapter::new(&config);
        assert_eq!(
            adapter.plan().highlight,
            Some(Some("base16-ocean.dark".to_owned()))
        );
        assert!(adapter.highlighter.is_some());
    }

    #[test]
    fn test_plain_render() {
        let adapter = ComrakAdapter::new(&ComrakConfig::default());
        let html = adapter.render("# Hello").unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
    }

    #[test]
    fn test_auto_ids() {
        let config = ComrakConfig {
            auto_ids: true,
            ..ComrakConfig::default()
        };
        let adapter = ComrakAdapter::new(&config);
        let html = adapter.render("# Section Title").unwrap();
        assert!(html.contains(r#"id="section-title""#), "html: {html}");
    }

    #[test]
    fn test_footnotes() {
        let config = ComrakConfig {
            footnotes: true,
            ..ComrakConfig::default()
        };
        let adapter = ComrakAdapter::new(&config);
        let html = adapter.render("text[^1]\n\n[^1]: note").unwrap();
        assert!(html.contains("footnote"));
    }

    #[test]
    fn test_smart_quotes() {
        let config = ComrakConfig {
            smart_quotes: true,
            ..ComrakConfig::default()
        };
        let adapter = ComrakAdapter::new(&config);
        let html = adapter.render("\"hello\"").unwrap();
        assert!(html.contains('\u{201C}'));
    }

    #[test]
    fn test_highlighted_code_fence() {
        let config = ComrakConfig {
            highlight: true,
            ..ComrakConfig::default()
        };
        let adapter = ComrakAdapter::new(&config);
        let html = adapter.render("```rust\nfn main() {}\n```").unwrap();
        // Class-based output without a theme.
        assert!(html.contains("<span"), "html: {html}");
    }
}
