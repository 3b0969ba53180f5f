/*!
Consequences of assumptions, by probing.

Given assumptions and atoms, the engine first finds a model under the assumptions.
Each atom valued by the model is a candidate for a fixed consequence, with the value of the model.
A candidate is probed by a search under the assumptions together with the negation of the candidate:
- If unsatisfiable, the candidate is a consequence, and the premises are the assumptions of the core (other than the negated candidate).
- If satisfiable, the model refutes the candidate, and any other candidate which the model values differently.

A consequence is returned as a clause with the fixed literal first, followed by the premises.
*/

use rustc_hash::FxHashSet;

use super::generic::GenericEngine;
use crate::{
    misc::log::targets::{self},
    reports::Report,
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
};

impl<R: rand::Rng + std::default::Default> GenericEngine<R> {
    pub(super) fn find_consequences(
        &mut self,
        assumptions: &[CLiteral],
        atoms: &[Atom],
    ) -> (Report, Vec<CClause>) {
        let report = self.search_minimizing(assumptions);
        if report != Report::Satisfiable {
            return (report, Vec::default());
        }

        let base_model = self.model.clone();

        let mut candidates: Vec<CLiteral> = Vec::default();
        let mut included: FxHashSet<Atom> = FxHashSet::default();
        for atom in atoms {
            if let Some(value) = base_model.get(*atom as usize).copied().flatten() {
                if included.insert(*atom) {
                    candidates.push(CLiteral::new(*atom, value));
                }
            }
        }

        let mut refuted: FxHashSet<Atom> = FxHashSet::default();
        let mut consequences = Vec::default();

        for candidate in candidates.iter().copied() {
            if refuted.contains(&candidate.atom()) {
                continue;
            }

            let mut probe = assumptions.to_vec();
            let negation = candidate.negate();
            probe.push(negation);

            match self.search(&probe) {
                Report::Unsatisfiable => {
                    if !self.core.contains(&negation) {
                        log::info!(target: targets::CONSEQUENCES, "Assumptions inconsistent while probing {candidate}");
                        continue;
                    }
                    let mut consequence = vec![candidate];
                    consequence.extend(self.core.iter().filter(|l| **l != negation));
                    log::trace!(target: targets::CONSEQUENCES, "Consequence {}", consequence.as_dimacs(false));
                    consequences.push(consequence);
                }

                Report::Satisfiable => {
                    for other in &candidates {
                        if self.model[other.atom() as usize] != Some(other.polarity()) {
                            refuted.insert(other.atom());
                        }
                    }
                }

                Report::Unknown => {
                    self.model = base_model;
                    self.model_current = true;
                    return (Report::Unknown, consequences);
                }
            }
        }

        self.model = base_model;
        self.model_current = true;
        (Report::Satisfiable, consequences)
    }
}
