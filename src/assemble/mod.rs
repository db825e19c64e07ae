//! Assembly pipeline — join every source into ordered documentation records.
//!
//! Per function-list entry: resolve `$ref` → normalize parameters → merge
//! overrides → join slug, title and prose. Entries are processed in
//! function-list order; preamble pages are collected separately.

pub mod join;
pub mod overrides;
pub mod params;
pub mod resolve;

use crate::error::AssemblyError;
use crate::model::*;
use crate::typedoc::TypeDocNode;
use join::{first_non_empty, Join, Policy};
use resolve::TypeDocIndex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// The loaded, read-only inputs of one run.
#[derive(Debug, Default)]
pub struct Sources {
    pub typedoc: TypeDocNode,
    pub functions: FunctionSpec,
    pub common: CommonLibSpec,
    pub examples: ExamplesSpec,
    /// Prose fragments keyed by id
    pub prose: HashMap<String, ProseFragment>,
}

#[derive(Debug, Default, Clone)]
pub struct AssembleOptions {
    /// Extra preamble page ids that have no function-list entry
    pub preamble_pages: Vec<String>,
    /// Fail on overrides naming parameters the signature lacks
    pub strict_overrides: bool,
}

/// Lookup tables shared by every entry of a run.
struct Joins<'a> {
    slugs: Join<'a, CommonLibEntry>,
    titles: Join<'a, ExampleTitle>,
    prose: Join<'a, ProseFragment>,
}

/// Fail on the first id that appears twice.
pub fn ensure_unique_ids<'a, I>(ids: I, spec: &'static str) -> Result<(), AssemblyError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AssemblyError::DuplicateId {
                id: id.to_string(),
                spec,
            });
        }
    }
    Ok(())
}

/// Run the pipeline over already-loaded sources.
pub fn assemble(sources: &Sources, opts: &AssembleOptions) -> Result<Assembly, AssemblyError> {
    let entries = &sources.functions.functions;
    ensure_unique_ids(entries.iter().map(|e| e.id.as_str()), "function list")?;
    ensure_unique_ids(
        opts.preamble_pages
            .iter()
            .map(String::as_str)
            .chain(entries.iter().map(|e| e.id.as_str())),
        "preamble pages and function list",
    )?;

    let index = TypeDocIndex::new(&sources.typedoc);
    let joins = Joins {
        slugs: Join::new(
            "common library",
            Policy::Required,
            sources.common.functions.iter().map(|e| (e.id.as_str(), e)),
        ),
        titles: Join::new(
            "examples",
            Policy::Optional,
            sources.examples.functions.iter().map(|e| (e.id.as_str(), e)),
        ),
        prose: Join::new(
            "prose",
            Policy::Optional,
            sources.prose.iter().map(|(id, p)| (id.as_str(), p)),
        ),
    };

    let mut preamble = Vec::new();
    for id in &opts.preamble_pages {
        let entry = FunctionSpecEntry {
            id: id.clone(),
            preamble: true,
            ..Default::default()
        };
        preamble.push(build_preamble(&entry, &joins)?);
    }

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.preamble {
            preamble.push(build_preamble(entry, &joins)?);
            continue;
        }
        records.push(build_record(entry, &index, &joins, opts)?);
    }

    debug!(
        preamble = preamble.len(),
        records = records.len(),
        "assembly complete"
    );
    Ok(Assembly { preamble, records })
}

fn build_record(
    entry: &FunctionSpecEntry,
    index: &TypeDocIndex<'_>,
    joins: &Joins<'_>,
    opts: &AssembleOptions,
) -> Result<DocumentationRecord, AssemblyError> {
    let resolved = entry.reference.as_deref().and_then(|path| {
        let node = index.resolve(path);
        if node.is_none() {
            warn!(id = %entry.id, reference = path, "unresolved $ref");
        }
        node
    });

    let base = resolved
        .map(|node| params::normalize(node, index))
        .unwrap_or_default();
    let short_text = resolved.map(resolve::short_text).unwrap_or_default();

    let unmatched = overrides::unmatched(&base, &entry.override_params);
    if !unmatched.is_empty() {
        if opts.strict_overrides {
            return Err(AssemblyError::UnmatchedOverride {
                id: entry.id.clone(),
                names: unmatched.iter().map(|n| n.to_string()).collect(),
            });
        }
        debug!(id = %entry.id, names = ?unmatched, "ignoring unmatched overrides");
    }
    let params = overrides::merge(&base, &entry.override_params);

    let slug = joins
        .slugs
        .lookup(&entry.id)?
        .map(|c| c.slug.clone())
        .unwrap_or_default();

    Ok(DocumentationRecord {
        title: title(entry, joins)?,
        slug,
        short_text,
        params,
        prose: joins.prose.lookup(&entry.id)?.cloned(),
        ..base_record(entry)
    })
}

/// Preamble pages are not part of the cross-library catalog; their slug
/// falls back to the id.
fn build_preamble(
    entry: &FunctionSpecEntry,
    joins: &Joins<'_>,
) -> Result<DocumentationRecord, AssemblyError> {
    let slug = joins
        .slugs
        .get(&entry.id)
        .map(|c| c.slug.clone())
        .unwrap_or_else(|| entry.id.clone());
    let prose = joins.prose.lookup(&entry.id)?.cloned();
    if prose.is_none() {
        warn!(id = %entry.id, "preamble page has no prose");
    }

    Ok(DocumentationRecord {
        title: title(entry, joins)?,
        slug,
        prose,
        preamble: true,
        ..base_record(entry)
    })
}

fn base_record(entry: &FunctionSpecEntry) -> DocumentationRecord {
    DocumentationRecord {
        id: entry.id.clone(),
        description: entry.description.clone(),
        notes: entry.notes.clone(),
        examples: entry.examples.clone(),
        preamble: entry.preamble,
        ..Default::default()
    }
}

/// Examples title → examples id → entry name → entry id.
fn title(entry: &FunctionSpecEntry, joins: &Joins<'_>) -> Result<String, AssemblyError> {
    let example = joins.titles.lookup(&entry.id)?;
    let title = first_non_empty(&[
        example.and_then(|e| e.title.as_deref()),
        example.map(|e| e.id.as_str()),
        entry.name.as_deref(),
        Some(entry.id.as_str()),
    ]);
    Ok(title.unwrap_or_default().to_string())
}
