//! markdown-rs backend adapter.
//!
//! Plain CommonMark rendering with the engine's defaults; configuration
//! beyond backend selection is ignored.

use crate::error::ConvertError;

use super::RenderAdapter;

pub struct MicromarkAdapter;

impl RenderAdapter for MicromarkAdapter {
    fn render(&self, content: &str) -> Result<String, ConvertError> {
        Ok(markdown::to_html(content))
    }
}
