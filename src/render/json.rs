//! JSON renderer — structured output for custom rendering pipelines.
//!
//! Serializes the assembled model directly.

use crate::model::Assembly;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Assembly) -> Result<String> {
        let mut out = serde_json::to_string_pretty(doc).context("failed to serialize assembly")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
