//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::Assembly;
use anyhow::{anyhow, Result};

/// Trait for rendering an assembled reference into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Assembly) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
///
/// `prelude` is prepended to every example's code where the format shows code.
pub fn create_renderer(format: &str, prelude: Option<String>) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer { prelude })),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}
