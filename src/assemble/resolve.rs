//! Reference resolution: symbolic `$ref` paths → type-doc nodes.
//!
//! A node's path is the `.`-joined chain of names from the root's children
//! down to it, e.g. `@supabase/supabase-js.SupabaseClient.from`.

use crate::typedoc::{Signature, TypeDocNode, TypeRef};
use std::collections::HashMap;

/// Lookup tables built once over an immutable type-doc tree.
pub struct TypeDocIndex<'a> {
    by_path: HashMap<String, &'a TypeDocNode>,
    by_id: HashMap<u64, &'a TypeDocNode>,
}

impl<'a> TypeDocIndex<'a> {
    pub fn new(root: &'a TypeDocNode) -> Self {
        let mut index = TypeDocIndex {
            by_path: HashMap::new(),
            by_id: HashMap::new(),
        };
        for child in &root.children {
            index.insert(child, child.name.clone());
        }
        index
    }

    fn insert(&mut self, node: &'a TypeDocNode, path: String) {
        // First declaration in document order wins
        self.by_id.entry(node.id).or_insert(node);
        self.by_path.entry(path.clone()).or_insert(node);
        for child in &node.children {
            self.insert(child, format!("{}.{}", path, child.name));
        }
    }

    /// Exact-path lookup.
    pub fn resolve(&self, path: &str) -> Option<&'a TypeDocNode> {
        self.by_path.get(path).copied()
    }

    /// Lookup by type identity, for expanding `reference` types.
    pub fn node_by_id(&self, id: u64) -> Option<&'a TypeDocNode> {
        self.by_id.get(&id).copied()
    }
}

/// The signature a resolved node is documented by.
///
/// Methods and functions carry their own signatures; a property typed as a
/// function carries them on its reflection declaration.
pub fn callable(node: &TypeDocNode) -> Option<&Signature> {
    if let Some(sig) = node.signatures.first() {
        return Some(sig);
    }
    match node.ty.as_ref() {
        Some(TypeRef::Reflection { declaration }) => declaration.signatures.first(),
        _ => None,
    }
}

/// Summary text of the node's callable signature, empty when there is none.
pub fn short_text(node: &TypeDocNode) -> String {
    callable(node)
        .and_then(|sig| sig.comment.as_ref())
        .map(|c| c.summary_text())
        .unwrap_or_default()
}
