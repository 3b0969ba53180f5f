/*!
A map from assumption terms to the engine literals which stand for them, built fresh for each query.

The map is injective, and so may be [inverted](DependencyMap::invert) to read an unsatisfiable core over engine literals as a core over assumption terms.
*/

use rustc_hash::FxHashMap;

use crate::structures::{literal::CLiteral, term::TermId};

/// Assumption terms to literals, in order of insertion.
#[derive(Default)]
pub struct DependencyMap {
    entries: Vec<(TermId, CLiteral)>,
    index: FxHashMap<TermId, usize>,
}

impl DependencyMap {
    /// Enters a term, returning false without change if the term is already entered.
    pub fn insert(&mut self, term: TermId, literal: CLiteral) -> bool {
        if self.index.contains_key(&term) {
            return false;
        }
        self.index.insert(term, self.entries.len());
        self.entries.push((term, literal));
        true
    }

    pub fn get(&self, term: TermId) -> Option<CLiteral> {
        self.index.get(&term).map(|index| self.entries[*index].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, CLiteral)> + '_ {
        self.entries.iter().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// The inverse map, from literals to assumption terms.
    pub fn invert(&self) -> FxHashMap<CLiteral, TermId> {
        self.entries.iter().map(|(t, l)| (*l, *t)).collect()
    }
}
