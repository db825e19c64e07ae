//! Type-doc tree model — the JSON emitted by the TypeScript doc extractor.
//!
//! Only the fields the assembler reads are modelled; everything else in the
//! extractor output is ignored during deserialization.

use serde::{Deserialize, Deserializer};

/// Numeric kinds of interfaces, type literals and type aliases across
/// extractor versions that no longer emit `kindString`.
const OBJECT_SHAPE_KINDS: [u64; 4] = [256, 65_536, 2_097_152, 4_194_304];

/// A declaration in the type-doc tree.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDocNode {
    /// Type identity, referenced by `reference` types
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// e.g. "Class", "Method", "Interface", "Type alias"
    #[serde(default)]
    pub kind_string: Option<String>,
    #[serde(default)]
    pub kind: Option<u64>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default, rename = "type")]
    pub ty: Option<TypeRef>,
    #[serde(default)]
    pub signatures: Vec<Signature>,
    #[serde(default)]
    pub children: Vec<TypeDocNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    #[serde(default)]
    pub is_optional: bool,
}

/// One callable shape of a declaration.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(default)]
    pub comment: Option<Comment>,
    /// Parameters are declarations themselves (name, flags, type, comment)
    #[serde(default)]
    pub parameters: Vec<TypeDocNode>,
}

/// Doc comment in either the legacy (`shortText`/`text`) or the
/// block (`summary` parts) layout.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub short_text: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub summary: Vec<CommentPart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentPart {
    #[serde(default)]
    pub text: String,
}

impl TypeDocNode {
    /// Whether the members of this declaration document as sub-parameters.
    pub fn is_object_shape(&self) -> bool {
        match self.kind_string.as_deref() {
            Some(kind) => matches!(kind, "Interface" | "Type literal" | "Type alias"),
            None => self.kind.is_some_and(|k| OBJECT_SHAPE_KINDS.contains(&k)),
        }
    }
}

impl Comment {
    /// One-paragraph summary.
    pub fn summary_text(&self) -> String {
        match self.short_text.as_deref() {
            Some(short) if !short.trim().is_empty() => short.trim().to_string(),
            _ => self
                .summary
                .iter()
                .map(|p| p.text.as_str())
                .collect::<String>()
                .trim()
                .to_string(),
        }
    }

    /// Summary followed by the long text, separated by a blank line.
    pub fn full_text(&self) -> String {
        let summary = self.summary_text();
        let long = self.text.as_deref().map(str::trim).unwrap_or_default();
        match (summary.is_empty(), long.is_empty()) {
            (_, true) => summary,
            (true, false) => long.to_string(),
            (false, false) => format!("{}\n\n{}", summary, long),
        }
    }
}

fn numeric_target<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Ok(Option::<serde_json::Value>::deserialize(d)?.and_then(|v| v.as_u64()))
}

/// A type expression, tagged by its `type` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeRef {
    Intrinsic {
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    Reference {
        name: String,
        /// Local targets are numeric; external symbols carry an object
        #[serde(default, alias = "target", deserialize_with = "numeric_target")]
        id: Option<u64>,
        #[serde(default)]
        type_arguments: Vec<TypeRef>,
    },
    Reflection {
        declaration: Box<TypeDocNode>,
    },
    Union {
        #[serde(default)]
        types: Vec<TypeRef>,
    },
    #[serde(rename_all = "camelCase")]
    Array {
        element_type: Box<TypeRef>,
    },
    Tuple {
        #[serde(default)]
        elements: Vec<TypeRef>,
    },
    Literal {
        #[serde(default)]
        value: serde_json::Value,
    },
    #[serde(other)]
    Unknown,
}

impl TypeRef {
    /// Human-readable type text.
    pub fn display(&self) -> String {
        match self {
            TypeRef::Intrinsic { name } => name.clone(),
            TypeRef::Reference {
                name,
                type_arguments,
                ..
            } => {
                if type_arguments.is_empty() {
                    name.clone()
                } else {
                    let args: Vec<String> = type_arguments.iter().map(TypeRef::display).collect();
                    format!("{}<{}>", name, args.join(", "))
                }
            }
            TypeRef::Array { element_type } => match element_type.as_ref() {
                TypeRef::Union { .. } => format!("({})[]", element_type.display()),
                other => format!("{}[]", other.display()),
            },
            TypeRef::Union { types } => types
                .iter()
                .map(TypeRef::display)
                .collect::<Vec<_>>()
                .join(" | "),
            TypeRef::Tuple { elements } => {
                let parts: Vec<String> = elements.iter().map(TypeRef::display).collect();
                format!("[{}]", parts.join(", "))
            }
            TypeRef::Literal { value } => value.to_string(),
            TypeRef::Reflection { declaration } => {
                if declaration.signatures.is_empty() {
                    "object".to_string()
                } else {
                    "function".to_string()
                }
            }
            TypeRef::Unknown => "unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ty(value: serde_json::Value) -> TypeRef {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn display_reference_with_arguments() {
        let t = ty(json!({
            "type": "reference",
            "name": "Promise",
            "typeArguments": [{ "type": "intrinsic", "name": "void" }]
        }));
        assert_eq!(t.display(), "Promise<void>");
    }

    #[test]
    fn display_array_of_union() {
        let t = ty(json!({
            "type": "array",
            "elementType": {
                "type": "union",
                "types": [
                    { "type": "intrinsic", "name": "string" },
                    { "type": "intrinsic", "name": "number" }
                ]
            }
        }));
        assert_eq!(t.display(), "(string | number)[]");
    }

    #[test]
    fn display_literals() {
        assert_eq!(ty(json!({ "type": "literal", "value": "exact" })).display(), "\"exact\"");
        assert_eq!(ty(json!({ "type": "literal", "value": null })).display(), "null");
    }

    #[test]
    fn unknown_tag_is_tolerated() {
        let t = ty(json!({ "type": "conditional", "checkType": {} }));
        assert_eq!(t.display(), "unknown");
    }

    #[test]
    fn external_target_is_unresolved() {
        let t = ty(json!({
            "type": "reference",
            "name": "RequestInit",
            "target": {
                "sourceFileName": "node_modules/typescript/lib/lib.dom.d.ts",
                "qualifiedName": "RequestInit"
            },
            "package": "typescript"
        }));
        assert!(matches!(t, TypeRef::Reference { id: None, .. }));
        assert_eq!(t.display(), "RequestInit");

        let local = ty(json!({ "type": "reference", "name": "Filter", "target": 40 }));
        assert!(matches!(local, TypeRef::Reference { id: Some(40), .. }));
    }

    #[test]
    fn object_shape_by_kind_string_or_numeric_kind() {
        let node = |value: serde_json::Value| -> TypeDocNode { serde_json::from_value(value).unwrap() };
        assert!(node(json!({ "kindString": "Interface" })).is_object_shape());
        assert!(node(json!({ "kindString": "Type alias" })).is_object_shape());
        assert!(!node(json!({ "kindString": "Enumeration" })).is_object_shape());
        assert!(!node(json!({ "kindString": "Class" })).is_object_shape());
        assert!(node(json!({ "kind": 256 })).is_object_shape());
        assert!(!node(json!({ "kind": 8 })).is_object_shape());
        assert!(!node(json!({ "name": "Untyped" })).is_object_shape());
    }

    #[test]
    fn comment_summary_prefers_short_text() {
        let c: Comment = serde_json::from_value(json!({
            "shortText": "Short.",
            "text": "Longer explanation.\n"
        }))
        .unwrap();
        assert_eq!(c.summary_text(), "Short.");
        assert_eq!(c.full_text(), "Short.\n\nLonger explanation.");
    }

    #[test]
    fn comment_summary_from_parts() {
        let c: Comment = serde_json::from_value(json!({
            "summary": [{ "kind": "text", "text": "Perform a " }, { "kind": "code", "text": "`SELECT`" }]
        }))
        .unwrap();
        assert_eq!(c.summary_text(), "Perform a `SELECT`");
    }
}
