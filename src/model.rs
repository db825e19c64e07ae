//! Data model for the hand-authored spec sources and the assembled records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The function-list specification (`functions:` at the top level).
#[derive(Debug, Default, Deserialize)]
pub struct FunctionSpec {
    #[serde(default)]
    pub functions: Vec<FunctionSpecEntry>,
}

/// One documented function (or preamble page) in the function list.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSpecEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Symbolic path into the type-doc tree
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub examples: Vec<ExampleSpec>,
    #[serde(default)]
    pub override_params: Vec<ParameterOverride>,
    #[serde(default, alias = "preamblePage")]
    pub preamble: bool,
}

/// Hand-authored correction to an extracted parameter, matched by name.
///
/// Every field except `name` is optional; unspecified fields keep the
/// extracted value.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterOverride {
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub is_optional: Option<bool>,
    #[serde(default)]
    pub sub_content: Option<Vec<ParameterOverride>>,
}

impl ParameterOverride {
    /// Explicit `required` wins over the inverted `isOptional`.
    pub fn required(&self) -> Option<bool> {
        self.required.or(self.is_optional.map(|optional| !optional))
    }
}

/// Render-ready parameter.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub description: String,
    pub required: bool,
    #[serde(rename = "subContent", skip_serializing_if = "Vec::is_empty")]
    pub sub_params: Vec<ResolvedParameter>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ExampleSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Raw code, possibly wrapped in a markdown fence
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExampleData>,
}

/// Data source shown alongside an example.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ExampleData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<ExampleTable>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ExampleTable {
    pub name: String,
}

/// The cross-library specification: canonical slugs per function id.
#[derive(Debug, Default, Deserialize)]
pub struct CommonLibSpec {
    #[serde(default)]
    pub functions: Vec<CommonLibEntry>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct CommonLibEntry {
    pub id: String,
    pub slug: String,
}

/// The examples specification: display titles per function id.
#[derive(Debug, Default, Deserialize)]
pub struct ExamplesSpec {
    #[serde(default)]
    pub functions: Vec<ExampleTitle>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExampleTitle {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A loose prose document associated with a page by its file stem.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProseFragment {
    pub id: String,
    /// YAML frontmatter, if any
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, serde_yaml::Value>,
    pub body: String,
}

/// One assembled documentation page/section.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub short_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub params: Vec<ResolvedParameter>,
    pub examples: Vec<ExampleSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prose: Option<ProseFragment>,
    pub preamble: bool,
}

/// Output of one pipeline run.
#[derive(Debug, Default, Serialize)]
pub struct Assembly {
    pub preamble: Vec<DocumentationRecord>,
    pub records: Vec<DocumentationRecord>,
}
