//! pulldown-cmark backend adapter.
//!
//! Extension flags map onto parser [`Options`] bits; the `smart` flag
//! instead composes a typographic post-render transform, so a renderer
//! with smart typography is the base renderer plus one more pipeline step
//! rather than a separate code path.

use pulldown_cmark::{Options, Parser, html};

use crate::config::PulldownConfig;
use crate::error::ConvertError;
use crate::transform::{SmartTypography, TextTransform};

use super::RenderAdapter;

pub struct PulldownAdapter {
    options: Options,
    transforms: Vec<Box<dyn TextTransform>>,
}

impl PulldownAdapter {
    pub(crate) fn new(config: &PulldownConfig) -> Self {
        let mut options = Options::empty();
        let mut transforms: Vec<Box<dyn TextTransform>> = Vec::new();

        for name in &config.extensions {
            match name.as_str() {
                "tables" => options.insert(Options::ENABLE_TABLES),
                "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
                "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
                "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
                "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
                "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
                "math" => options.insert(Options::ENABLE_MATH),
                "gfm" => options.insert(Options::ENABLE_GFM),
                "smart" => {
                    if !transforms.iter().any(|t| t.name() == "smart") {
                        transforms.push(Box::new(SmartTypography));
                    }
                }
                other => {
                    tracing::debug!(extension = other, "ignoring unknown pulldown extension");
                }
            }
        }

        for name in &config.render_options {
            match name.as_str() {
                "smart_punctuation" => options.insert(Options::ENABLE_SMART_PUNCTUATION),
                other => {
                    tracing::debug!(option = other, "ignoring unknown pulldown render option");
                }
            }
        }

        Self {
            options,
            transforms,
        }
    }

    #[cfg(test)]
    fn options(&self) -> Options {
        self.options
    }
}

impl RenderAdapter for PulldownAdapter {
    fn render(&self, content: &str) -> Result<String, ConvertError> {
        let parser = Parser::new_ext(content, self.options);
        let mut output = String::with_capacity(content.len() * 3 / 2);
        html::push_html(&mut output, parser);
        for transform in &self.transforms {
            output = transform.apply(&output);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(extensions: &[&str], render_options: &[&str]) -> PulldownAdapter {
        PulldownAdapter::new(&PulldownConfig {
            extensions: extensions.iter().map(|s| (*s).to_owned()).collect(),
            render_options: render_options.iter().map(|s| (*s).to_owned()).collect(),
        })
    }

    #[test]
    fn test_default_options_are_empty() {
        let adapter = adapter(&[], &[]);
        assert_eq!(adapter.options(), Options::empty());
        assert!(adapter.transforms.is_empty());
    }

    #[test]
    fn test_extension_flags_map_to_options() {
        let adapter = adapter(&["tables", "footnotes", "strikethrough"], &[]);
        assert!(adapter.options().contains(Options::ENABLE_TABLES));
        assert!(adapter.options().contains(Options::ENABLE_FOOTNOTES));
        assert!(adapter.options().contains(Options::ENABLE_STRIKETHROUGH));
        assert!(!adapter.options().contains(Options::ENABLE_TASKLISTS));
    }

    #[test]
    fn test_unknown_flags_ignored() {
        let adapter = adapter(&["no_such_extension"], &["no_such_option"]);
        assert_eq!(adapter.options(), Options::empty());
        assert!(adapter.transforms.is_empty());
    }

    #[test]
    fn test_tables_render() {
        let adapter = adapter(&["tables"], &[]);
        let html = adapter
            .render("| a | b |\n|---|---|\n| 1 | 2 |")
            .unwrap();
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_smart_flag_composes_transform() {
        let adapter = adapter(&["smart"], &[]);
        assert_eq!(adapter.transforms.len(), 1);
        assert_eq!(adapter.transforms[0].name(), "smart");
    }

    #[test]
    fn test_smart_flag_not_duplicated() {
        let adapter = adapter(&["smart", "smart"], &[]);
        assert_eq!(adapter.transforms.len(), 1);
    }

    #[test]
    fn test_smart_changes_only_typography() {
        let source = "# Title\n\nit's \"quoted\" -- done";
        let plain = adapter(&[], &[]).render(source).unwrap();
        let smart = adapter(&["smart"], &[]).render(source).unwrap();
        assert_ne!(plain, smart);
        // Mapping the typographic characters back yields the plain render.
        let reverted = smart
            .replace('\u{2019}', "'")
            .replace('\u{201C}', "\"")
            .replace('\u{201D}', "\"")
            .replace('\u{2013}', "--");
        assert_eq!(reverted, plain);
    }

    #[test]
    fn test_smart_skips_code_blocks() {
        let source = "```\na -- b\n```";
        let html = adapter(&["smart"], &[]).render(source).unwrap();
        assert!(html.contains("a -- b"));
    }
}
