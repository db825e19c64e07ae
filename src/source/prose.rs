//! Prose fragments — loose `<id>.mdx` / `<id>.md` documents with optional
//! YAML frontmatter, read in parallel and keyed by file stem.

use crate::model::ProseFragment;
use anyhow::{Context, Result};
use rayon::prelude::*;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

static RE_FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\r?\n(?:(.*?)\r?\n)??---[ \t]*(?:\r?\n|\z)").unwrap());

/// Extensions in order of precedence for a shared stem.
const PROSE_EXTENSIONS: &[&str] = &["mdx", "md"];

/// Load every prose fragment in `dir`.
///
/// An unreadable file is logged and skipped; the page renders without prose.
pub fn load_dir(dir: &Path) -> Result<HashMap<String, ProseFragment>> {
    let files = discover(dir)?;
    let loaded: Vec<(String, Option<ProseFragment>)> = files
        .into_par_iter()
        .map(|(id, path)| {
            let fragment = match fs::read_to_string(&path) {
                Ok(content) => Some(parse(&id, &content)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable prose");
                    None
                }
            };
            (id, fragment)
        })
        .collect();

    let prose: HashMap<String, ProseFragment> = loaded
        .into_iter()
        .filter_map(|(id, fragment)| fragment.map(|f| (id, f)))
        .collect();
    debug!(dir = %dir.display(), fragments = prose.len(), "loaded prose");
    Ok(prose)
}

/// List `(id, path)` pairs, one per stem.
fn discover(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let mut by_id: BTreeMap<String, PathBuf> = BTreeMap::new();
    for ext in PROSE_EXTENSIONS {
        let pattern = format!("{}/*.{}", base, ext);
        let paths = glob::glob(&pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file());
        for path in paths {
            if let Some(id) = derive_id(&path) {
                by_id.entry(id).or_insert(path);
            }
        }
    }
    Ok(by_id.into_iter().collect())
}

/// "docs/ref/js/select.mdx" → "select"
fn derive_id(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
}

/// Split optional frontmatter from the body.
pub fn parse(id: &str, content: &str) -> ProseFragment {
    let Some(caps) = RE_FRONTMATTER.captures(content) else {
        return ProseFragment {
            id: id.to_string(),
            meta: BTreeMap::new(),
            body: content.trim().to_string(),
        };
    };

    let body = content[caps[0].len()..].trim().to_string();
    let raw = caps.get(1).map_or("", |m| m.as_str());
    if raw.trim().is_empty() {
        return ProseFragment {
            id: id.to_string(),
            meta: BTreeMap::new(),
            body,
        };
    }
    let meta = match serde_yaml::from_str::<Option<BTreeMap<String, serde_yaml::Value>>>(raw) {
        Ok(meta) => meta.unwrap_or_default(),
        Err(e) => {
            warn!(id, error = %e, "ignoring malformed frontmatter");
            BTreeMap::new()
        }
    };
    ProseFragment {
        id: id.to_string(),
        meta,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_without_frontmatter() {
        let f = parse("select", "\nSome callout.\n");
        assert!(f.meta.is_empty());
        assert_eq!(f.body, "Some callout.");
    }

    #[test]
    fn parse_with_frontmatter() {
        let f = parse("intro", "---\nid: intro\ntitle: Introduction\n---\n\n# Hello\n");
        assert_eq!(
            f.meta.get("title").and_then(|v| v.as_str()),
            Some("Introduction")
        );
        assert_eq!(f.body, "# Hello");
    }

    #[test]
    fn parse_empty_frontmatter() {
        let f = parse("x", "---\n\n---\nBody");
        assert!(f.meta.is_empty());
        assert_eq!(f.body, "Body");
    }

    #[test]
    fn parse_adjacent_fences() {
        let f = parse("x", "---\n---\nBody");
        assert!(f.meta.is_empty());
        assert_eq!(f.body, "Body");

        // A later rule stays in the body
        let f = parse("x", "---\r\n---\r\nIntro\n\n---\n\nMore");
        assert!(f.meta.is_empty());
        assert_eq!(f.body, "Intro\n\n---\n\nMore");
    }

    #[test]
    fn malformed_frontmatter_keeps_body() {
        let f = parse("x", "---\ntitle: [unclosed\n---\nBody");
        assert!(f.meta.is_empty());
        assert_eq!(f.body, "Body");
    }

    #[test]
    fn horizontal_rule_later_is_not_frontmatter() {
        let f = parse("x", "Intro\n---\nMore");
        assert!(f.meta.is_empty());
        assert_eq!(f.body, "Intro\n---\nMore");
    }

    #[test]
    fn load_dir_keys_by_stem() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("select.mdx"), "Select callout").unwrap();
        fs::write(dir.path().join("select.md"), "shadowed").unwrap();
        fs::write(dir.path().join("insert.md"), "Insert callout").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let prose = load_dir(dir.path()).unwrap();
        assert_eq!(prose.len(), 2);
        assert_eq!(prose["select"].body, "Select callout");
        assert_eq!(prose["insert"].body, "Insert callout");
    }

    #[test]
    fn load_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let prose = load_dir(&dir.path().join("nope")).unwrap();
        assert!(prose.is_empty());
    }

    #[test]
    fn output_id_from_path() {
        assert_eq!(derive_id(Path::new("docs/ref/js/select.mdx")).as_deref(), Some("select"));
        assert_eq!(
            derive_id(Path::new("typescript-support.md")).as_deref(),
            Some("typescript-support")
        );
    }
}
