//! Markdown/MDX renderer.
//!
//! Produces one page: preamble prose, an index of every function, then one
//! anchored section per record with parameters and examples.

use crate::model::*;
use crate::render::Renderer;
use crate::toc;
use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

/// Opening fence with an optional language, e.g. "```js"
static RE_FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\s*```([\w+-]*)[ \t]*\r?\n").unwrap());

static RE_FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?```\s*\z").unwrap());

const DEFAULT_CODE_LANG: &str = "js";

pub struct MarkdownRenderer {
    /// Prepended to every example's code
    pub prelude: Option<String>,
}

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Assembly) -> Result<String> {
        let mut output = String::new();

        for page in &doc.preamble {
            if let Some(ref prose) = page.prose {
                output.push_str(&prose.body);
                output.push_str("\n\n");
            }
        }

        if !doc.records.is_empty() {
            output.push_str("## Index\n\n");
            for record in &doc.records {
                output.push_str(&toc::render_toc_item(&record.title, &record.slug));
                output.push('\n');
            }
            output.push('\n');
        }

        for record in &doc.records {
            output.push_str(&self.render_record(record));
            output.push('\n');
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "mdx"
    }
}

impl MarkdownRenderer {
    /// Render a single function section.
    fn render_record(&self, record: &DocumentationRecord) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("<a id=\"{}\"></a>\n", toc::anchor(&record.slug)));
        lines.push(format!("## {}\n", record.title));

        if !record.short_text.is_empty() {
            lines.push(record.short_text.clone());
            lines.push(String::new());
        }

        // Authored text in page order: description, prose, notes
        let prose = record.prose.as_ref().map(|p| p.body.as_str());
        for text in [record.description.as_deref(), prose, record.notes.as_deref()]
            .into_iter()
            .flatten()
        {
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
                lines.push(String::new());
            }
        }

        if !record.params.is_empty() {
            lines.push("### Parameters\n".to_string());
            for param in &record.params {
                render_param(&mut lines, param, 0);
            }
            lines.push(String::new());
        }

        if !record.examples.is_empty() {
            lines.push("### Examples\n".to_string());
            for example in &record.examples {
                self.render_example(&mut lines, example);
            }
        }

        lines.join("\n")
    }

    fn render_example(&self, lines: &mut Vec<String>, example: &ExampleSpec) {
        let heading = if example.name.is_empty() {
            &example.id
        } else {
            &example.name
        };
        lines.push(format!("#### {}\n", heading));

        if let Some(ref data) = example.data {
            if !data.tables.is_empty() {
                let names: Vec<String> = data.tables.iter().map(|t| format!("`{}`", t.name)).collect();
                lines.push(format!("Example data source: {}\n", names.join(", ")));
            }
            if let Some(ref sql) = data.sql {
                push_code_block(lines, "sql", sql);
            }
        }

        let (lang, code) = strip_fence(&example.code);
        let code = match self.prelude.as_deref().map(str::trim) {
            Some(prelude) if !prelude.is_empty() => format!("{}\n\n{}", prelude, code),
            _ => code,
        };
        if !code.trim().is_empty() {
            push_code_block(lines, lang.unwrap_or(DEFAULT_CODE_LANG), &code);
        }

        if let Some(ref response) = example.response {
            let (_, response) = strip_fence(response);
            push_code_block(lines, "json", &response);
        }
    }
}

/// Render a parameter and its nested fields as an indented list.
fn render_param(lines: &mut Vec<String>, param: &ResolvedParameter, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut head = format!("{}* **{}**", indent, param.name);
    if !param.type_text.is_empty() {
        head.push_str(&format!(" `{}`", param.type_text));
    }
    if !param.required {
        head.push_str(" _(optional)_");
    }
    lines.push(head);

    let desc = param.description.trim();
    if !desc.is_empty() {
        // Continuation lines belong to the list item
        let continued = desc.replace('\n', &format!("\n{}  ", indent));
        lines.push(format!("{}  {}", indent, continued));
    }

    for sub in &param.sub_params {
        render_param(lines, sub, depth + 1);
    }
}

fn push_code_block(lines: &mut Vec<String>, lang: &str, code: &str) {
    lines.push(format!("```{}", lang));
    lines.push(code.trim_end().to_string());
    lines.push("```".to_string());
    lines.push(String::new());
}

/// Strip a surrounding markdown fence, returning its language (if any) and
/// the unindented body.
fn strip_fence(code: &str) -> (Option<&str>, String) {
    let Some(open) = RE_FENCE_OPEN.captures(code) else {
        return (None, unindent(code.trim_end()));
    };
    let lang = open.get(1).map(|m| m.as_str()).filter(|l| !l.is_empty());
    let rest = &code[open[0].len()..];
    let body = match RE_FENCE_CLOSE.find(rest) {
        Some(close) => &rest[..close.start()],
        None => rest,
    };
    (lang, unindent(body))
}

/// Remove common leading indentation from a multi-line string.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    // First non-blank line
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };

    let min_indent = lines[start..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    lines[start..]
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                l.get(min_indent..).unwrap_or_else(|| l.trim_start())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
