//! Parameter normalization: flatten a resolved signature into render-ready
//! parameters, expanding object-shaped types into sub-parameters.

use super::resolve::{callable, TypeDocIndex};
use crate::model::ResolvedParameter;
use crate::typedoc::{TypeDocNode, TypeRef};
use std::collections::HashSet;

/// Normalize the parameters of the node's first signature.
///
/// A node without a signature yields an empty list.
pub fn normalize(node: &TypeDocNode, index: &TypeDocIndex<'_>) -> Vec<ResolvedParameter> {
    let Some(sig) = callable(node) else {
        return Vec::new();
    };
    let mut expanding = HashSet::new();
    sig.parameters
        .iter()
        .map(|p| normalize_param(p, index, &mut expanding))
        .collect()
}

fn normalize_param(
    param: &TypeDocNode,
    index: &TypeDocIndex<'_>,
    expanding: &mut HashSet<u64>,
) -> ResolvedParameter {
    ResolvedParameter {
        name: param.name.clone(),
        type_text: param.ty.as_ref().map(TypeRef::display).unwrap_or_default(),
        description: param
            .comment
            .as_ref()
            .map(|c| c.full_text())
            .unwrap_or_default(),
        required: !(param.flags.is_optional || param.default_value.is_some()),
        sub_params: param
            .ty
            .as_ref()
            .map(|ty| expand(ty, index, expanding))
            .unwrap_or_default(),
    }
}

/// Member fields of an object-shaped type.
///
/// `expanding` holds the type identities on the current expansion chain; a
/// type met again on its own chain expands to nothing.
fn expand(
    ty: &TypeRef,
    index: &TypeDocIndex<'_>,
    expanding: &mut HashSet<u64>,
) -> Vec<ResolvedParameter> {
    match ty {
        // Inline literals are tree-shaped; only named types can cycle
        TypeRef::Reflection { declaration } => members(declaration, index, expanding),
        TypeRef::Reference { id: Some(id), .. } => {
            // Enumerations and classes have members but no fields
            let Some(target) = index.node_by_id(*id).filter(|t| t.is_object_shape()) else {
                return Vec::new();
            };
            with_identity(*id, expanding, |expanding| {
                if !target.children.is_empty() {
                    members(target, index, expanding)
                } else if let Some(aliased) = target.ty.as_ref() {
                    // Type alias
                    expand(aliased, index, expanding)
                } else {
                    Vec::new()
                }
            })
        }
        TypeRef::Union { types } => types
            .iter()
            .map(|member| expand(member, index, expanding))
            .find(|fields| !fields.is_empty())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn members(
    node: &TypeDocNode,
    index: &TypeDocIndex<'_>,
    expanding: &mut HashSet<u64>,
) -> Vec<ResolvedParameter> {
    node.children
        .iter()
        .map(|child| normalize_param(child, index, expanding))
        .collect()
}

fn with_identity<F>(id: u64, expanding: &mut HashSet<u64>, f: F) -> Vec<ResolvedParameter>
where
    F: FnOnce(&mut HashSet<u64>) -> Vec<ResolvedParameter>,
{
    if !expanding.insert(id) {
        return Vec::new();
    }
    let fields = f(expanding);
    expanding.remove(&id);
    fields
}
