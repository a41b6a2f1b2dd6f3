//! Backend identifiers and adapter construction.
//!
//! Each backend is an external rendering engine compiled in behind a
//! feature flag. [`instantiate`] runs exactly once per converter lifetime
//! and turns the configured identifier into the one adapter the converter
//! will own; after that point conversion is plain dynamic dispatch.

#[cfg(feature = "comrak")]
mod comrak;
#[cfg(feature = "markdown-it")]
mod markdownit;
#[cfg(feature = "micromark")]
mod micromark;
#[cfg(feature = "pulldown")]
mod pulldown;

use crate::config::ConverterConfig;
use crate::error::ConvertError;

/// A rendering backend adapter.
///
/// Implementations own their derived render options and any engine state,
/// built once at construction. `render` must be safe to call concurrently
/// on shared state; adapters whose engine is not, must serialize
/// internally or allocate per-call state.
pub trait RenderAdapter: Send + Sync {
    /// Render markdown source to HTML, including any backend-specific
    /// post-processing.
    fn render(&self, content: &str) -> Result<String, ConvertError>;
}

/// Identifier for a supported rendering backend.
///
/// The set is closed; selection happens once at configuration time and is
/// immutable for a converter's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// pulldown-cmark: fast CommonMark with extension flags.
    Pulldown,
    /// comrak: configurable GFM document renderer with optional syntax
    /// highlighting.
    Comrak,
    /// markdown-it: plugin-based renderer with TOC marker substitution.
    MarkdownIt,
    /// markdown (micromark port): plain CommonMark, no options.
    Micromark,
}

impl Backend {
    /// Human-readable list of valid identifiers, for error messages.
    pub const VALID_NAMES: &'static str = "pulldown | comrak | markdown-it | micromark";

    /// Parse a configuration value into a backend identifier.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pulldown" => Some(Self::Pulldown),
            "comrak" => Some(Self::Comrak),
            "markdown-it" => Some(Self::MarkdownIt),
            "micromark" => Some(Self::Micromark),
            _ => None,
        }
    }

    /// Configuration identifier for this backend.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pulldown => "pulldown",
            Self::Comrak => "comrak",
            Self::MarkdownIt => "markdown-it",
            Self::Micromark => "micromark",
        }
    }

    /// Cargo feature that compiles this backend in.
    #[must_use]
    pub fn feature(self) -> &'static str {
        self.name()
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the adapter for the configured backend.
///
/// Called exactly once per converter, from inside the setup cell. Fatal
/// outcomes are logged before being returned so the operator sees the
/// invalid value or the missing-feature remediation even when the caller
/// only propagates the error.
pub(crate) fn instantiate(
    config: &ConverterConfig,
) -> Result<Box<dyn RenderAdapter>, ConvertError> {
    let Some(backend) = Backend::parse(&config.backend) else {
        tracing::error!(
            backend = %config.backend,
            valid = Backend::VALID_NAMES,
            "invalid markdown backend"
        );
        return Err(ConvertError::invalid_backend(&config.backend));
    };
    match backend {
        Backend::Pulldown => build_pulldown(config),
        Backend::Comrak => build_comrak(config),
        Backend::MarkdownIt => build_markdown_it(config),
        Backend::Micromark => build_micromark(config),
    }
}

#[cfg(feature = "pulldown")]
fn build_pulldown(config: &ConverterConfig) -> Result<Box<dyn RenderAdapter>, ConvertError> {
    Ok(Box::new(pulldown::PulldownAdapter::new(&config.pulldown)))
}

#[cfg(not(feature = "pulldown"))]
fn build_pulldown(_config: &ConverterConfig) -> Result<Box<dyn RenderAdapter>, ConvertError> {
    Err(unavailable(Backend::Pulldown))
}

#[cfg(feature = "comrak")]
fn build_comrak(config: &ConverterConfig) -> Result<Box<dyn RenderAdapter>, ConvertError> {
    Ok(Box::new(comrak::ComrakAdapter::new(&config.comrak)))
}

#[cfg(not(feature = "comrak"))]
fn build_comrak(_config: &ConverterConfig) -> Result<Box<dyn RenderAdapter>, ConvertError> {
    Err(unavailable(Backend::Comrak))
}

#[cfg(feature = "markdown-it")]
fn build_markdown_it(config: &ConverterConfig) -> Result<Box<dyn RenderAdapter>, ConvertError> {
    Ok(Box::new(markdownit::MarkdownItAdapter::new(
        &config.markdown_it,
    )))
}

#[cfg(not(feature = "markdown-it"))]
fn build_markdown_it(_config: &ConverterConfig) -> Result<Box<dyn RenderAdapter>, ConvertError> {
    Err(unavailable(Backend::MarkdownIt))
}

#[cfg(feature = "micromark")]
fn build_micromark(_config: &ConverterConfig) -> Result<Box<dyn RenderAdapter>, ConvertError> {
    Ok(Box::new(micromark::MicromarkAdapter))
}

#[cfg(not(feature = "micromark"))]
fn build_micromark(_config: &ConverterConfig) -> Result<Box<dyn RenderAdapter>, ConvertError> {
    Err(unavailable(Backend::Micromark))
}

#[cfg(not(all(
    feature = "pulldown",
    feature = "comrak",
    feature = "markdown-it",
    feature = "micromark"
)))]
fn unavailable(backend: Backend) -> ConvertError {
    tracing::error!(
        backend = backend.name(),
        feature = backend.feature(),
        "markdown backend not compiled into this build"
    );
    ConvertError::missing_backend(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for backend in [
            Backend::Pulldown,
            Backend::Comrak,
            Backend::MarkdownIt,
            Backend::Micromark,
        ] {
            assert_eq!(Backend::parse(backend.name()), Some(backend));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_cased_values() {
        assert_eq!(Backend::parse("nonexistent"), None);
        assert_eq!(Backend::parse("Pulldown"), None);
        assert_eq!(Backend::parse(""), None);
    }

    #[test]
    fn test_instantiate_unknown_backend_fails() {
        let config = ConverterConfig {
            backend: "nonexistent".to_owned(),
            ..ConverterConfig::default()
        };
        let err = instantiate(&config).err().unwrap();
        assert!(matches!(err, ConvertError::InvalidBackend { .. }));
    }
}
