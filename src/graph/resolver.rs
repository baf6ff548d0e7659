use std::collections::{BTreeSet, HashMap};

use crate::graph::{Diagnostics, Relationships, Resolution, Universe};

#[derive(Debug, Clone, Copy)]
enum State {
    Unseen,
    // Position of the entity's frame on the work stack
    InProgress(usize),
    Done,
}

#[derive(Debug)]
struct Frame {
    entity: String,
    parents: BTreeSet<String>,
    // Distinct parents in declared order, not yet visited
    pending: std::vec::IntoIter<String>,
}

/// Resolution context for one pass over a [`Universe`].
///
/// Owns the relationship mapping being built. Traversal runs on an explicit
/// work stack: an entity is in progress while its frame is on the stack and
/// done once its entry has been written, so reference cycles terminate at the
/// first edge back into an in-progress entity.
pub struct Resolver<'a> {
    universe: &'a Universe,
    relationships: Relationships,
    stack: Vec<Frame>,
    on_stack: HashMap<String, usize>,
    cycles: Vec<Vec<String>>,
    unresolved: BTreeSet<String>,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(universe: &'a Universe) -> Self {
        Self::with_relationships(universe, Relationships::default())
    }

    /// Continue from an existing mapping. Entities already present are treated
    /// as resolved and never revisited.
    #[must_use]
    pub fn with_relationships(universe: &'a Universe, relationships: Relationships) -> Self {
        Self {
            universe,
            relationships,
            stack: Vec::new(),
            on_stack: HashMap::new(),
            cycles: Vec::new(),
            unresolved: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Resolve `root` and every entity reachable from it.
    ///
    /// A root without a document still gets an (empty) entry. Resolving a root
    /// that is already done is a no-op.
    pub fn resolve(&mut self, root: &str) {
        if !matches!(self.state(root), State::Unseen) {
            return;
        }
        self.push(root.to_string());

        while let Some(frame) = self.stack.last_mut() {
            if let Some(parent) = frame.pending.next() {
                match self.state(&parent) {
                    State::Done => {}
                    State::InProgress(pos) => self.record_cycle(pos, parent),
                    State::Unseen if !self.universe.contains_key(&parent) => {
                        if let Some(top) = self.stack.last() {
                            log::debug!("'{}' references unknown class '{parent}'", top.entity);
                        }
                        self.unresolved.insert(parent);
                    }
                    State::Unseen => self.push(parent),
                }
            } else if let Some(done) = self.stack.pop() {
                self.on_stack.remove(&done.entity);
                self.relationships.insert_once(&done.entity, done.parents);
            }
        }
    }

    #[must_use]
    pub fn finish(self) -> Resolution {
        Resolution {
            relationships: self.relationships,
            cycles: self.cycles,
            unresolved: self.unresolved,
        }
    }

    fn state(&self, entity: &str) -> State {
        if let Some(&pos) = self.on_stack.get(entity) {
            State::InProgress(pos)
        } else if self.relationships.contains(entity) {
            State::Done
        } else {
            State::Unseen
        }
    }

    fn push(&mut self, entity: String) {
        let declared = self.universe.get(&entity).map(Vec::as_slice).unwrap_or_default();
        let mut parents = BTreeSet::new();
        let mut pending = Vec::with_capacity(declared.len());
        for p in declared {
            if parents.insert(p.clone()) {
                pending.push(p.clone());
            }
        }
        self.on_stack.insert(entity.clone(), self.stack.len());
        self.stack.push(Frame { entity, parents, pending: pending.into_iter() });
    }

    fn record_cycle(&mut self, pos: usize, closing: String) {
        let cycle: Vec<String> = self.stack[pos..].iter().map(|f| f.entity.clone()).collect();
        log::warn!("Class cycle detected: {} -> {closing}", cycle.join(" -> "));
        self.cycles.push(cycle);
    }
}

/// Resolve one `root` into an existing mapping.
///
/// Keys already in `relationships` are memoized: they are neither recursed
/// into nor overwritten. Returns the cycles and unknown names met on this call.
pub fn resolve(
    universe: &Universe,
    relationships: &mut Relationships,
    root: &str,
) -> Diagnostics {
    let mut resolver = Resolver::with_relationships(universe, std::mem::take(relationships));
    resolver.resolve(root);
    let Resolution { relationships: resolved, cycles, unresolved } = resolver.finish();
    *relationships = resolved;
    Diagnostics { cycles, unresolved }
}
