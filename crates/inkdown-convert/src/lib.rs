//! Config-driven markdown-to-HTML conversion with pluggable backends.
//!
//! This crate provides a [`MarkdownConverter`] that claims files by
//! extension and renders their markdown source to HTML through one of
//! several interchangeable backend engines.
//!
//! # Architecture
//!
//! The converter owns exactly one [`RenderAdapter`], selected by the
//! `backend` configuration value and built lazily on the first
//! [`MarkdownConverter::convert`] call:
//!
//! - `pulldown` — pulldown-cmark with named extension flags and optional
//!   smart-typography post-processing
//! - `comrak` — comrak with flat document options and an optional syntax
//!   highlighting sub-block
//! - `markdown-it` — markdown-it with an ordered plugin list and
//!   table-of-contents marker substitution
//! - `micromark` — plain CommonMark rendering, no options
//!
//! Adapters absorb the differences in backend option shape; the converter
//! itself never branches on backend identity after setup.
//!
//! # Example
//!
//! ```
//! use inkdown_convert::{ConverterConfig, MarkdownConverter};
//!
//! let converter = MarkdownConverter::new(ConverterConfig::default());
//! assert!(converter.matches("md"));
//! assert_eq!(converter.output_ext("md"), ".html");
//!
//! let html = converter.convert("# Hello").unwrap();
//! assert!(html.contains("<h1>Hello</h1>"));
//! ```

mod backend;
mod config;
mod converter;
mod error;
mod matcher;
mod transform;

pub use backend::{Backend, RenderAdapter};
pub use config::{
    ComrakConfig, ConverterConfig, DEFAULT_EXTENSION_PATTERN, MarkdownItConfig, PulldownConfig,
    SyntectConfig,
};
pub use converter::MarkdownConverter;
pub use error::ConvertError;
pub use matcher::ExtensionMatcher;
pub use transform::{SmartTypography, TextTransform};
