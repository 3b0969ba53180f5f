/*!
Boolean constraint propagation, with two watched literals.

# Overview
Each clause of two or more literals watches its first two literals.
When a watched literal becomes false, the clause looks for some other literal which is not false to watch instead.
If there is no such literal, the clause is either unit, and the other watched literal is assigned, or in conflict with the valuation.

# Complications

The watch list of the literal being propagated is taken from the engine for the duration of the inspection, and restored after.
This avoids a mutable borrow of the watch lists conflicting with pushes to the watch lists of other literals.
The taken list is never pushed to during the inspection, as a replacement watch is never false, and the literal of the taken list is false.
*/

use super::generic::{value_of, ClauseKey, GenericEngine};
use crate::{
    misc::log::targets::{self},
    structures::literal::Literal,
};

impl<R: rand::Rng + std::default::Default> GenericEngine<R> {
    /// Propagates every literal on the trail not yet propagated.
    ///
    /// Returns the key of a clause in conflict with the valuation, if one is found.
    pub(super) fn propagate(&mut self) -> Result<(), ClauseKey> {
        while !self.trail.exhausted() {
            let literal = self.trail.literals[self.trail.q_head];
            self.trail.q_head += 1;
            self.counters.propagations += 1;

            let false_literal = literal.negate();
            let mut list = std::mem::take(&mut self.watches[false_literal.index()]);

            let mut conflict = None;
            let mut i = 0;
            let mut j = 0;

            while i < list.len() {
                let key = list[i];
                i += 1;

                let clause = &mut self.clauses[key].literals;
                if clause[0] == false_literal {
                    clause.swap(0, 1);
                }

                let other = clause[0];
                if value_of(&self.values, other) == Some(true) {
                    list[j] = key;
                    j += 1;
                    continue;
                }

                let mut replaced = false;
                for k in 2..clause.len() {
                    if value_of(&self.values, clause[k]) != Some(false) {
                        clause.swap(1, k);
                        self.watches[clause[1].index()].push(key);
                        replaced = true;
                        break;
                    }
                }
                if replaced {
                    continue;
                }

                list[j] = key;
                j += 1;

                match value_of(&self.values, other) {
                    None => self.assign(other, Some(key)),

                    _ => {
                        log::trace!(target: targets::PROPAGATION, "Conflict on clause {key}");
                        conflict = Some(key);
                        while i < list.len() {
                            list[j] = list[i];
                            j += 1;
                            i += 1;
                        }
                    }
                }
            }

            list.truncate(j);
            self.watches[false_literal.index()] = list;

            if let Some(key) = conflict {
                self.trail.q_head = self.trail.literals.len();
                return Err(key);
            }
        }

        Ok(())
    }
}
