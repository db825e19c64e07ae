//! Loading — parse the input files into typed sources at the boundary.
//!
//! Shape problems surface here as [`LoadError`]s naming the file, before
//! anything reaches the assembler.

pub mod prose;

use crate::assemble::ensure_unique_ids;
use crate::error::LoadError;
use crate::model::{CommonLibSpec, ExamplesSpec, FunctionSpec};
use crate::typedoc::TypeDocNode;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = read(path)?;
    serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the type-doc JSON tree.
pub fn load_typedoc(path: &Path) -> Result<TypeDocNode, LoadError> {
    let content = read(path)?;
    let root: TypeDocNode = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), children = root.children.len(), "loaded type-doc tree");
    Ok(root)
}

/// Load the function list, rejecting duplicate ids.
pub fn load_function_spec(path: &Path) -> Result<FunctionSpec, LoadError> {
    let spec: FunctionSpec = load_yaml(path)?;
    ensure_unique_ids(spec.functions.iter().map(|f| f.id.as_str()), "function list").map_err(
        |source| LoadError::Invalid {
            path: path.to_path_buf(),
            source,
        },
    )?;
    info!(path = %path.display(), functions = spec.functions.len(), "loaded function list");
    Ok(spec)
}

/// Load the cross-library slug catalog.
pub fn load_common_lib(path: &Path) -> Result<CommonLibSpec, LoadError> {
    load_yaml(path)
}

/// Load the examples title catalog.
pub fn load_examples(path: &Path) -> Result<ExamplesSpec, LoadError> {
    load_yaml(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file(content: &str, suffix: &str) -> NamedTempFile {
        let mut f = NamedTempFile::with_suffix(suffix).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn function_spec_fields() {
        let f = file(
            r#"
functions:
  - id: select
    $ref: '@supabase/postgrest-js.PostgrestQueryBuilder.select'
    description: Fetch rows.
    overrideParams:
      - name: head
        type: boolean
    examples:
      - id: getting-your-data
        name: Getting your data
        code: |
          ```js
          const { data } = await supabase.from('cities').select()
          ```
        data:
          sql: create table cities (id int8 primary key);
          tables:
            - name: cities
  - id: release-notes
    preamblePage: true
    isSpotlight: true
"#,
            ".yml",
        );
        let spec = load_function_spec(f.path()).unwrap();
        assert_eq!(spec.functions.len(), 2);
        let select = &spec.functions[0];
        assert_eq!(
            select.reference.as_deref(),
            Some("@supabase/postgrest-js.PostgrestQueryBuilder.select")
        );
        assert_eq!(select.override_params[0].type_text.as_deref(), Some("boolean"));
        let data = select.examples[0].data.as_ref().unwrap();
        assert_eq!(data.tables[0].name, "cities");
        assert!(spec.functions[1].preamble);
    }

    #[test]
    fn duplicate_ids_rejected_at_load() {
        let f = file("functions:\n  - id: select\n  - id: select\n", ".yml");
        let err = load_function_spec(f.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate function id 'select'"));
    }

    #[test]
    fn missing_id_is_a_yaml_error() {
        let f = file("functions:\n  - name: select\n", ".yml");
        assert!(matches!(
            load_function_spec(f.path()),
            Err(LoadError::Yaml { .. })
        ));
    }

    #[test]
    fn common_lib_and_examples() {
        let common = file(
            "functions:\n  - id: select\n    title: Fetch data\n    slug: select\n    product: database\n",
            ".yml",
        );
        let examples = file("functions:\n  - id: select\n    title: 'Fetch data: select()'\n", ".yml");
        assert_eq!(load_common_lib(common.path()).unwrap().functions[0].slug, "select");
        assert_eq!(
            load_examples(examples.path()).unwrap().functions[0].title.as_deref(),
            Some("Fetch data: select()")
        );
    }

    #[test]
    fn typedoc_json() {
        let f = file(
            r#"{"id":0,"name":"root","kind":1,"children":[{"id":1,"name":"SupabaseClient","kindString":"Class"}]}"#,
            ".json",
        );
        let root = load_typedoc(f.path()).unwrap();
        assert_eq!(root.children[0].kind_string.as_deref(), Some("Class"));
    }

    #[test]
    fn unreadable_path_names_file() {
        let err = load_common_lib(Path::new("/nonexistent/common.yml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/common.yml"));
    }
}
