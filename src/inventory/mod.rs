//! Loading a Kapitan inventory from disk.
//!
//! An inventory root holds two trees of YAML documents:
//!
//! - `classes/`: reusable fragments, named by their relative path with
//!   separators turned into dots (`classes/component/nginx.yml` is
//!   `component.nginx`);
//! - `targets/`: deployment targets, named by file stem only
//!   (`targets/prod/cluster1.yml` is `cluster1`).
use crate::errors::{KapigraphError, LoadError};
use crate::graph::Universe;
use crate::parser::ClassParser;
use crate::utils::file_walker;
use std::path::{Component, Path};

pub const CLASSES_DIR: &str = "classes";
pub const TARGETS_DIR: &str = "targets";

/// How a document path turns into an entity name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    /// Relative path joined with `.`, extension stripped.
    Dotted,
    /// File stem only.
    BaseName,
}

/// Derive the entity name of the document at `path` under `root`.
#[must_use]
pub fn entity_name(root: &Path, path: &Path, style: NameStyle) -> String {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    match style {
        NameStyle::BaseName => stem,
        NameStyle::Dotted => {
            let rel = path.strip_prefix(root).unwrap_or(path);
            let mut parts: Vec<String> = rel
                .parent()
                .map(|dir| {
                    dir.components()
                        .filter_map(|c| match c {
                            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                            _ => None,
                        })
                        .collect()
                })
                .unwrap_or_default();
            parts.push(stem);
            parts.join(".")
        }
    }
}

/// Decode every YAML document under `dir` into a universe.
///
/// Later documents with the same entity name replace earlier ones; files are
/// visited in sorted order so the winner is deterministic.
///
/// # Errors
/// Returns `LoadError` on the first unreadable directory, unreadable file or
/// malformed document.
pub fn load_universe(dir: &Path, style: NameStyle) -> Result<Universe, LoadError> {
    let parser = ClassParser::new();
    let mut universe = Universe::new();
    for path in file_walker::yaml_files(dir)? {
        let parents = parser.parse_file(&path)?;
        let name = entity_name(dir, &path, style);
        if universe.insert(name.clone(), parents).is_some() {
            log::debug!("'{name}' redefined by {}", path.display());
        }
    }
    Ok(universe)
}

/// Class and target universes of one inventory.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub classes: Universe,
    pub targets: Universe,
}

impl Inventory {
    /// Load `root/classes` and `root/targets`.
    ///
    /// # Errors
    /// Returns `LoadError` if either directory is missing or any document fails to load.
    pub fn load(root: &Path) -> Result<Self, LoadError> {
        let classes = load_universe(&root.join(CLASSES_DIR), NameStyle::Dotted)?;
        let targets = load_universe(&root.join(TARGETS_DIR), NameStyle::BaseName)?;
        log::debug!(
            "Loaded {} classes and {} targets from {}",
            classes.len(),
            targets.len(),
            root.display()
        );
        Ok(Self { classes, targets })
    }

    /// Narrow the targets to the single `target`.
    ///
    /// # Errors
    /// Returns `KapigraphError::TargetNotFound` if no target has that name.
    pub fn select(&mut self, target: &str) -> Result<(), KapigraphError> {
        let parents = self
            .targets
            .remove(target)
            .ok_or_else(|| KapigraphError::TargetNotFound(target.to_string()))?;
        self.targets.clear();
        self.targets.insert(target.to_string(), parents);
        Ok(())
    }

    /// Target names, sorted.
    #[must_use]
    pub fn target_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Classes and targets merged into one lookup table; targets win on collision.
    #[must_use]
    pub fn universe(&self) -> Universe {
        let mut all = self.classes.clone();
        all.extend(self.targets.iter().map(|(k, v)| (k.clone(), v.clone())));
        all
    }
}
