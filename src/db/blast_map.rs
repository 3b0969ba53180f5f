/*!
A scoped map from bit-vector constants to the boolean constants of their bits.

The map is owned by the [preprocessing pipeline](crate::preprocessing), written by the [bit-blaster](crate::preprocessing::bit_blast), and read when building models and consequences.
Bits are ordered from least to most significant.
*/

use rustc_hash::FxHashMap;

use super::Scoped;
use crate::structures::term::{DeclId, TermId};

/// The bits of a bit-vector constant.
#[derive(Clone, Debug)]
pub struct BitGroup {
    /// The bit-vector constant.
    pub decl: DeclId,

    /// Boolean constants, least significant first.
    pub bits: Vec<TermId>,

    /// Declarations of the bits, in the same order.
    pub bit_decls: Vec<DeclId>,
}

/// The map, with scopes.
#[derive(Default)]
pub struct BlastMap {
    groups: Vec<BitGroup>,
    index: FxHashMap<DeclId, usize>,
    checkpoints: Vec<usize>,
    bit_count: u64,
}

impl BlastMap {
    /// Records the bits of a constant, replacing nothing if the constant is already present.
    pub fn insert(&mut self, group: BitGroup) {
        if self.index.contains_key(&group.decl) {
            return;
        }
        self.bit_count += group.bits.len() as u64;
        self.index.insert(group.decl, self.groups.len());
        self.groups.push(group);
    }

    pub fn get(&self, decl: DeclId) -> Option<&BitGroup> {
        self.index.get(&decl).map(|index| &self.groups[*index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BitGroup> + '_ {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The total count of bits in the map.
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Removes every group after the first `len`, within the innermost scope.
    pub fn truncate(&mut self, len: usize) {
        let floor = self.checkpoints.last().copied().unwrap_or(0);
        let len = std::cmp::max(len, floor);
        if len >= self.groups.len() {
            return;
        }
        for group in self.groups.drain(len..) {
            self.bit_count -= group.bits.len() as u64;
            self.index.remove(&group.decl);
        }
    }
}

impl Scoped for BlastMap {
    fn push_scope(&mut self) {
        self.checkpoints.push(self.groups.len());
    }

    fn pop_scopes(&mut self, count: usize) {
        let count = std::cmp::min(count, self.checkpoints.len());
        if count == 0 {
            return;
        }
        let new_depth = self.checkpoints.len() - count;
        let restore = self.checkpoints[new_depth];
        self.checkpoints.truncate(new_depth);

        for group in self.groups.drain(restore..) {
            self.bit_count -= group.bits.len() as u64;
            self.index.remove(&group.decl);
        }
    }

    fn scope_depth(&self) -> usize {
        self.checkpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::{Sort, TermManager};

    fn group(tm: &mut TermManager, name: &str, width: u32) -> BitGroup {
        let bv = tm.declare_const(name, Sort::BitVec(width)).unwrap();
        let bits: Vec<TermId> = (0..width)
            .map(|_| tm.mk_fresh_const(name, Sort::Bool))
            .collect();
        BitGroup {
            decl: tm.as_const(bv).unwrap(),
            bit_decls: bits.iter().map(|b| tm.as_const(*b).unwrap()).collect(),
            bits,
        }
    }

    #[test]
    fn scoped_groups() {
        let mut tm = TermManager::new();
        let a = group(&mut tm, "a", 4);
        let b = group(&mut tm, "b", 2);
        let (a_decl, b_decl) = (a.decl, b.decl);

        let mut map = BlastMap::default();
        map.insert(a);
        map.push_scope();
        map.insert(b);
        assert_eq!(map.bit_count(), 6);

        map.pop_scopes(1);
        assert!(map.get(b_decl).is_none());
        assert_eq!(map.get(a_decl).map(|g| g.bits.len()), Some(4));
        assert_eq!(map.bit_count(), 4);
    }

    #[test]
    fn truncate_to_snapshot() {
        let mut tm = TermManager::new();
        let a = group(&mut tm, "a", 3);
        let b = group(&mut tm, "b", 5);
        let (a_decl, b_decl) = (a.decl, b.decl);

        let mut map = BlastMap::default();
        map.insert(a);
        let snapshot = map.len();
        map.insert(b);

        map.truncate(snapshot);
        assert!(map.get(b_decl).is_none());
        assert!(map.get(a_decl).is_some());
        assert_eq!(map.bit_count(), 3);
    }
}
