/*!
Mutually exclusive literals.

Two literals are mutually exclusive if assigning either (with the consequences of the clauses at level zero) propagates the negation of the other.
Pairwise exclusion is found by assigning each literal in turn and propagating.
Groups are then formed greedily: literals are taken in order of decreasing exclusion count, and each group is grown by literals exclusive with every member.

Only groups of at least two literals are returned, and each literal is in at most one group.
*/

use super::generic::GenericEngine;
use crate::{
    misc::log::targets::{self},
    structures::literal::CLiteral,
};

impl<R: rand::Rng + std::default::Default> GenericEngine<R> {
    pub(super) fn mutex_groups(&mut self, literals: &[CLiteral]) -> Vec<Vec<CLiteral>> {
        if !self.propagate_base() {
            return Vec::default();
        }

        let count = literals.len();
        let mut exclusive = vec![vec![false; count]; count];

        for (i, literal) in literals.iter().enumerate() {
            if self.value(*literal).is_some() {
                continue;
            }

            self.trail.new_level();
            self.assign(*literal, None);
            if self.propagate().is_ok() {
                for (j, other) in literals.iter().enumerate() {
                    if i != j && self.value(*other) == Some(false) {
                        exclusive[i][j] = true;
                        exclusive[j][i] = true;
                    }
                }
            }
            self.backjump(0);
        }

        let degree = |i: usize| exclusive[i].iter().filter(|x| **x).count();
        let mut order = (0..count).collect::<Vec<_>>();
        order.sort_by_key(|i| std::cmp::Reverse(degree(*i)));

        let mut used = vec![false; count];
        let mut groups = Vec::default();

        for &i in &order {
            if used[i] || degree(i) == 0 {
                continue;
            }
            let mut group = vec![i];
            for &j in &order {
                if !used[j] && j != i && group.iter().all(|g| exclusive[*g][j]) {
                    group.push(j);
                }
            }
            if group.len() > 1 {
                for member in &group {
                    used[*member] = true;
                }
                groups.push(group.into_iter().map(|m| literals[m]).collect::<Vec<_>>());
            }
        }

        self.reset_trail();

        log::trace!(target: targets::MUTEX, "{} mutex groups over {count} literals", groups.len());
        groups
    }
}

