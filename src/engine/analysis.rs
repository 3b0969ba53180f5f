/*!
Conflict analysis.

# Overview

A conflict clause is resolved against the reasons of literals valued at the current level, in reverse order of assignment, until a single literal of the current level remains.
The result is the first unique implication point clause, which asserts the negation of the remaining literal after a backjump to the second highest level of the clause.

Analysis of a failed assumption instead resolves back to the assumptions responsible for the failure, giving an unsatisfiable core.
*/

use super::generic::{ClauseKey, GenericEngine};
use crate::{
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
};

/// Activity above which all activities are rescaled.
const ACTIVITY_LIMIT: f64 = 1e100;

/// Decay of activity, applied by growth of the increment.
const ACTIVITY_DECAY: f64 = 0.95;

impl<R: rand::Rng + std::default::Default> GenericEngine<R> {
    pub(super) fn bump_activity(&mut self, atom: Atom) {
        let atom = atom as usize;
        self.activity[atom] += self.activity_increment;
        if self.activity[atom] > ACTIVITY_LIMIT {
            for activity in self.activity.iter_mut() {
                *activity /= ACTIVITY_LIMIT;
            }
            self.activity_increment /= ACTIVITY_LIMIT;
        }
    }

    pub(super) fn decay_activity(&mut self) {
        self.activity_increment /= ACTIVITY_DECAY;
    }

    /// Analyses a conflict, returning the learnt clause and the level to backjump to.
    ///
    /// The asserting literal of the clause is first, and a literal of the backjump level (if any) is second.
    pub(super) fn analyze(&mut self, conflict: ClauseKey) -> (CClause, u32) {
        let current_level = self.trail.level();

        let mut learnt: CClause = Vec::default();
        let mut path = 0;
        let mut pivot: Option<CLiteral> = None;
        let mut index = self.trail.len();
        let mut key = conflict;

        loop {
            for position in 0..self.clauses[key].literals.len() {
                let literal = self.clauses[key].literals[position];
                if pivot.is_some_and(|p| p.atom() == literal.atom()) {
                    continue;
                }
                let atom = literal.atom() as usize;
                if self.seen[atom] || self.levels[atom] == 0 {
                    continue;
                }
                self.seen[atom] = true;
                self.bump_activity(literal.atom());
                match self.levels[atom] == current_level {
                    true => path += 1,
                    false => learnt.push(literal),
                }
            }

            loop {
                index -= 1;
                if self.seen[self.trail.literals[index].atom() as usize] {
                    break;
                }
            }

            let literal = self.trail.literals[index];
            self.seen[literal.atom() as usize] = false;
            pivot = Some(literal);
            path -= 1;

            if path == 0 {
                break;
            }

            match self.reasons[literal.atom() as usize] {
                Some(reason) => key = reason,
                None => panic!("! Analysis reached a decision with {path} literals outstanding"),
            }
        }

        for literal in &learnt {
            self.seen[literal.atom() as usize] = false;
        }

        let asserting = match pivot {
            Some(literal) => literal.negate(),
            None => panic!("! Analysis without a conflict at the current level"),
        };
        learnt.insert(0, asserting);

        let backjump_level = match learnt.len() {
            1 => 0,
            _ => {
                let mut max_position = 1;
                for position in 2..learnt.len() {
                    if self.levels[learnt[position].atom() as usize]
                        > self.levels[learnt[max_position].atom() as usize]
                    {
                        max_position = position;
                    }
                }
                learnt.swap(1, max_position);
                self.levels[learnt[1].atom() as usize]
            }
        };

        log::trace!(target: targets::ANALYSIS, "Learnt {} with backjump to {backjump_level}", learnt.as_dimacs(true));

        (learnt, backjump_level)
    }

    /// Sets the core to the assumptions responsible for the given assumption being false.
    ///
    /// Every literal in the core is an assumption, as given.
    pub(super) fn analyze_final(&mut self, failed: CLiteral) {
        self.core.clear();
        self.core.push(failed);

        let failed_atom = failed.atom() as usize;
        if self.levels[failed_atom] == 0 {
            return;
        }
        self.seen[failed_atom] = true;

        let start = self.trail.start_of(0);
        for index in (start..self.trail.len()).rev() {
            let literal = self.trail.literals[index];
            let atom = literal.atom() as usize;
            if !self.seen[atom] {
                continue;
            }
            match self.reasons[atom] {
                None => self.core.push(literal),
                Some(key) => {
                    for position in 0..self.clauses[key].literals.len() {
                        let other = self.clauses[key].literals[position].atom() as usize;
                        if other != atom && self.levels[other] > 0 {
                            self.seen[other] = true;
                        }
                    }
                }
            }
            self.seen[atom] = false;
        }
        self.seen[failed_atom] = false;

        log::trace!(target: targets::ANALYSIS, "Core {}", self.core.as_dimacs(false));
    }
}
