/*!
A scoped map from boolean terms to engine atoms.

Entries are kept in order of insertion, and a scope records the number of entries when opened.
So, popping a scope truncates the entries and removes the truncated entries from the index.

Only constants, applications of uninterpreted functions, and interpreted atoms are entered, as these are the terms which have no boolean structure for the engine to see.
*/

use rustc_hash::FxHashMap;

use super::Scoped;
use crate::structures::{atom::Atom, term::TermId};

/// The map, with scopes.
#[derive(Default)]
pub struct AtomMap {
    entries: Vec<(TermId, Atom)>,
    index: FxHashMap<TermId, Atom>,
    checkpoints: Vec<usize>,
}

impl AtomMap {
    /// Enters a term, returning false without change if the term is already entered.
    pub fn insert(&mut self, term: TermId, atom: Atom) -> bool {
        if self.index.contains_key(&term) {
            return false;
        }
        self.entries.push((term, atom));
        self.index.insert(term, atom);
        true
    }

    pub fn to_atom(&self, term: TermId) -> Option<Atom> {
        self.index.get(&term).copied()
    }

    /// Entries, in order of insertion.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, Atom)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Scoped for AtomMap {
    fn push_scope(&mut self) {
        self.checkpoints.push(self.entries.len());
    }

    fn pop_scopes(&mut self, count: usize) {
        let count = std::cmp::min(count, self.checkpoints.len());
        if count == 0 {
            return;
        }
        let new_depth = self.checkpoints.len() - count;
        let restore = self.checkpoints[new_depth];
        self.checkpoints.truncate(new_depth);

        for (term, _) in self.entries.drain(restore..) {
            self.index.remove(&term);
        }
    }

    fn scope_depth(&self) -> usize {
        self.checkpoints.len()
    }
}
