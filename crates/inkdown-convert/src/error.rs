//! Error taxonomy for the conversion pipeline.

use crate::backend::Backend;

/// Conversion error.
///
/// [`InvalidBackend`](ConvertError::InvalidBackend) and
/// [`MissingBackend`](ConvertError::MissingBackend) are setup failures and
/// terminal for the converter instance; every later call observes the same
/// error. [`Render`](ConvertError::Render) failures propagate per call and
/// do not alter converter state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Unrecognized backend identifier in configuration.
    #[error("invalid markdown backend `{value}` (valid backends: {valid})")]
    InvalidBackend {
        /// The configured value.
        value: String,
        /// Human-readable list of valid identifiers.
        valid: &'static str,
    },
    /// Backend selected in configuration but not compiled into this build.
    #[error("missing markdown backend `{backend}`: rebuild with `--features {feature}`")]
    MissingBackend {
        /// Backend identifier.
        backend: &'static str,
        /// Cargo feature that provides it.
        feature: &'static str,
    },
    /// Backend-raised render failure, propagated unchanged.
    #[error("render failed: {0}")]
    Render(String),
}

impl ConvertError {
    pub(crate) fn invalid_backend(value: &str) -> Self {
        Self::InvalidBackend {
            value: value.to_owned(),
            valid: Backend::VALID_NAMES,
        }
    }

    pub(crate) fn missing_backend(backend: Backend) -> Self {
        Self::MissingBackend {
            backend: backend.name(),
            feature: backend.feature(),
        }
    }
}
