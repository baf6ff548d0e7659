//! Relationship model for a Kapitan inventory.
//!
//! A [`Universe`] maps every entity (class or target) to the parents it
//! declares under `classes:`. Resolution walks that lookup table from one or
//! more targets and produces [`Relationships`]: each reachable entity mapped
//! to the set of its direct parents. Ordered containers keep the emitted
//! graph deterministic.
//!
//! Use [`resolve_targets`] for a whole pass, or [`resolver::Resolver`] when
//! roots arrive one at a time.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub mod resolver;

pub use resolver::{resolve, Resolver};

/// Entity name → declared parents, in authored order.
pub type Universe = HashMap<String, Vec<String>>;

/// Entity name → set of direct parents, for every resolved entity.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Relationships(BTreeMap<String, BTreeSet<String>>);

impl Relationships {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.0.contains_key(entity)
    }

    #[must_use]
    pub fn parents(&self, entity: &str) -> Option<&BTreeSet<String>> {
        self.0.get(entity)
    }

    /// Iterate entities with their direct parents, sorted by entity name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate `(entity, parent)` edges in sorted order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(k, v)| v.iter().map(move |p| (k.as_str(), p.as_str())))
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    // Entries are finalized once; a second write for the same entity is ignored.
    pub(crate) fn insert_once(&mut self, entity: &str, parents: BTreeSet<String>) {
        if !self.0.contains_key(entity) {
            self.0.insert(entity.to_string(), parents);
        }
    }
}

impl<K, I> FromIterator<(K, I)> for Relationships
where
    K: Into<String>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, ps)| (k.into(), ps.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

/// Output of one resolution pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Resolution {
    pub relationships: Relationships,
    /// Each cycle runs from the re-entered entity to the entity that closed it.
    pub cycles: Vec<Vec<String>>,
    /// Referenced names with no document in the inventory.
    pub unresolved: BTreeSet<String>,
}

/// Cycles and dangling references found while resolving into an existing mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub cycles: Vec<Vec<String>>,
    pub unresolved: BTreeSet<String>,
}

impl Diagnostics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty() && self.unresolved.is_empty()
    }
}

/// Resolve every name in `targets` against `universe`, sharing one context so
/// entities reachable from several targets are resolved once.
///
/// Targets are processed in sorted order.
#[must_use]
pub fn resolve_targets<'a, I>(universe: &Universe, targets: I) -> Resolution
where
    I: IntoIterator<Item = &'a str>,
{
    let mut roots: Vec<&str> = targets.into_iter().collect();
    roots.sort_unstable();
    roots.dedup();

    let mut resolver = Resolver::new(universe);
    for root in roots {
        resolver.resolve(root);
    }
    resolver.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe(entries: &[(&str, &[&str])]) -> Universe {
        entries
            .iter()
            .map(|(k, ps)| ((*k).to_string(), ps.iter().map(|p| (*p).to_string()).collect()))
            .collect()
    }

    #[test]
    fn resolve_targets_shares_work_across_targets() {
        let u = universe(&[
            ("cluster1", &["app"]),
            ("cluster2", &["app", "db"]),
            ("app", &["base"]),
            ("db", &["base"]),
            ("base", &[]),
            ("orphan", &["base"]),
        ]);
        let res = resolve_targets(&u, ["cluster2", "cluster1"]);
        let expected: Relationships = [
            ("cluster1", vec!["app"]),
            ("cluster2", vec!["app", "db"]),
            ("app", vec!["base"]),
            ("db", vec!["base"]),
            ("base", vec![]),
        ]
        .into_iter()
        .collect();
        assert_eq!(res.relationships, expected);
        assert!(!res.relationships.contains("orphan"));
        assert!(res.cycles.is_empty());
    }

    #[test]
    fn edges_are_sorted_and_counted() {
        let rel: Relationships =
            [("b", vec!["z", "a"]), ("a", vec!["c"]), ("c", vec![])].into_iter().collect();
        let edges: Vec<(&str, &str)> = rel.edges().collect();
        assert_eq!(edges, vec![("a", "c"), ("b", "a"), ("b", "z")]);
        assert_eq!(rel.edge_count(), 3);
        assert_eq!(rel.len(), 3);
    }

    #[test]
    fn relationships_serialize_as_plain_map() {
        let rel: Relationships = [("app", vec!["base"]), ("base", vec![])].into_iter().collect();
        let json = serde_json::to_string(&rel).unwrap();
        assert_eq!(json, r#"{"app":["base"],"base":[]}"#);
    }
}
