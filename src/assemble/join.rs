//! Id-keyed joins across the independently authored sources.
//!
//! Every source is looked up through the same [`Join`] table; only the
//! policy for a missing id differs (required for slugs, optional for titles
//! and prose).

use crate::error::AssemblyError;
use std::collections::HashMap;

/// What a missing id means for a given source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// A miss aborts assembly for the id.
    Required,
    /// A miss is empty data.
    Optional,
}

/// One source, keyed by function id.
pub struct Join<'a, V> {
    spec: &'static str,
    policy: Policy,
    by_id: HashMap<&'a str, &'a V>,
}

impl<'a, V> Join<'a, V> {
    /// Build a join table. The first item for a repeated id is kept.
    pub fn new<I>(spec: &'static str, policy: Policy, items: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a V)>,
    {
        let mut by_id = HashMap::new();
        for (id, value) in items {
            by_id.entry(id).or_insert(value);
        }
        Join { spec, policy, by_id }
    }

    pub fn lookup(&self, id: &str) -> Result<Option<&'a V>, AssemblyError> {
        match (self.by_id.get(id), self.policy) {
            (Some(value), _) => Ok(Some(*value)),
            (None, Policy::Optional) => Ok(None),
            (None, Policy::Required) => Err(AssemblyError::MissingJoin {
                id: id.to_string(),
                spec: self.spec,
            }),
        }
    }

    /// Lookup that treats a miss as absent regardless of policy.
    pub fn get(&self, id: &str) -> Option<&'a V> {
        self.by_id.get(id).copied()
    }
}

/// First candidate that is present and not blank.
pub fn first_non_empty<'s>(candidates: &[Option<&'s str>]) -> Option<&'s str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs() -> Vec<(String, String)> {
        vec![
            ("select".to_string(), "select".to_string()),
            ("insert".to_string(), "insert".to_string()),
            ("select".to_string(), "select-again".to_string()),
        ]
    }

    #[test]
    fn required_miss_names_the_id() {
        let data = slugs();
        let join = Join::new(
            "common library",
            Policy::Required,
            data.iter().map(|(id, slug)| (id.as_str(), slug)),
        );
        let err = join.lookup("foo").unwrap_err();
        assert_eq!(err.to_string(), "no common library entry for function id 'foo'");
    }

    #[test]
    fn optional_miss_is_none() {
        let data = slugs();
        let join = Join::new("prose", Policy::Optional, data.iter().map(|(id, s)| (id.as_str(), s)));
        assert!(join.lookup("foo").unwrap().is_none());
    }

    #[test]
    fn first_entry_for_repeated_id_wins() {
        let data = slugs();
        let join = Join::new("slugs", Policy::Required, data.iter().map(|(id, s)| (id.as_str(), s)));
        assert_eq!(join.lookup("select").unwrap().unwrap(), "select");
        assert_eq!(join.get("insert").unwrap(), "insert");
    }

    #[test]
    fn first_non_empty_skips_blank() {
        assert_eq!(
            first_non_empty(&[None, Some(" "), Some("Fetch data"), Some("select")]),
            Some("Fetch data")
        );
        assert_eq!(first_non_empty(&[None, Some("")]), None);
    }
}
