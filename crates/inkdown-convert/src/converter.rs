//! Converter dispatcher.

use std::sync::OnceLock;

use crate::backend::{self, RenderAdapter};
use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::matcher::ExtensionMatcher;

/// Output extension for every conversion, regardless of input.
const OUTPUT_EXT: &str = ".html";

/// Markdown-to-HTML converter with a configuration-selected backend.
///
/// The backend adapter is built lazily on the first [`convert`] call and
/// owned for the converter's lifetime; [`matches`] and [`output_ext`]
/// never trigger setup. Setup failures are terminal: the stored error is
/// returned to every subsequent caller, with no retry and no fallback to
/// another backend. A failed render, by contrast, leaves the converter
/// fully usable.
///
/// Concurrent first use is safe: the setup cell guarantees the adapter is
/// built at most once, and all callers observe either the initialized
/// adapter or the propagated setup failure. After setup, [`convert`] may
/// be called concurrently without additional synchronization.
///
/// [`convert`]: MarkdownConverter::convert
/// [`matches`]: MarkdownConverter::matches
/// [`output_ext`]: MarkdownConverter::output_ext
pub struct MarkdownConverter {
    config: ConverterConfig,
    matcher: ExtensionMatcher,
    adapter: OnceLock<Result<Box<dyn RenderAdapter>, ConvertError>>,
}

impl MarkdownConverter {
    #[must_use]
    pub fn new(config: ConverterConfig) -> Self {
        let matcher = ExtensionMatcher::new(&config.extension_pattern);
        Self {
            config,
            matcher,
            adapter: OnceLock::new(),
        }
    }

    /// Whether this converter claims files with the given extension
    /// (case-insensitive, token-exact against the configured pattern).
    #[must_use]
    pub fn matches(&self, ext: &str) -> bool {
        self.matcher.matches(ext)
    }

    /// Output file extension produced by [`convert`](Self::convert).
    #[must_use]
    pub fn output_ext(&self, _ext: &str) -> &'static str {
        OUTPUT_EXT
    }

    /// Convert markdown source to HTML with the configured backend.
    ///
    /// The first call builds the backend adapter; see the type-level
    /// documentation for the setup and failure semantics.
    pub fn convert(&self, content: &str) -> Result<String, ConvertError> {
        self.setup()?.render(content)
    }

    /// One-time adapter construction, idempotent and terminal on failure.
    fn setup(&self) -> Result<&dyn RenderAdapter, ConvertError> {
        match self.adapter.get_or_init(|| backend::instantiate(&self.config)) {
            Ok(adapter) => Ok(adapter.as_ref()),
            Err(err) => Err(err.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter_with_backend(backend: &str) -> MarkdownConverter {
        MarkdownConverter::new(ConverterConfig {
            backend: backend.to_owned(),
            ..ConverterConfig::default()
        })
    }

    #[test]
    fn test_output_ext_is_constant() {
        let converter = MarkdownConverter::new(ConverterConfig::default());
        assert_eq!(converter.output_ext("md"), ".html");
        assert_eq!(converter.output_ext("weird"), ".html");
        assert_eq!(converter.output_ext(""), ".html");
    }

    #[test]
    fn test_matches_without_setup() {
        // An invalid backend must not affect extension matching.
        let converter = converter_with_backend("nonexistent");
        assert!(converter.matches("md"));
        assert!(converter.matches("MARKDOWN"));
        assert!(!converter.matches("txt"));
    }

    #[test]
    fn test_invalid_backend_is_fatal_and_terminal() {
        let converter = converter_with_backend("nonexistent");
        let first = converter.convert("# Hi").unwrap_err();
        assert!(matches!(first, ConvertError::InvalidBackend { .. }));
        // No re-setup: the same terminal error is replayed.
        let second = converter.convert("# Hi").unwrap_err();
        assert_eq!(first, second);
    }

    #[cfg(feature = "pulldown")]
    #[test]
    fn test_convert_reuses_adapter() {
        let converter = converter_with_backend("pulldown");
        let first = converter.convert("# One").unwrap();
        let second = converter.convert("# One").unwrap();
        assert_eq!(first, second);
        assert!(converter.adapter.get().is_some());
    }

    #[cfg(feature = "pulldown")]
    #[test]
    fn test_concurrent_first_use() {
        let converter = std::sync::Arc::new(converter_with_backend("pulldown"));
        let outputs: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let converter = std::sync::Arc::clone(&converter);
                    scope.spawn(move || converter.convert("# Shared").unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(outputs.iter().all(|html| html == &outputs[0]));
        assert!(outputs[0].contains("<h1>Shared</h1>"));
    }

    #[cfg(not(feature = "comrak"))]
    #[test]
    fn test_missing_backend_is_reported() {
        let converter = converter_with_backend("comrak");
        let err = converter.convert("# Hi").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingBackend {
                backend: "comrak",
                ..
            }
        ));
    }
}
