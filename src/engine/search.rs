/*!
The search procedure of the engine.

# Overview

A search begins from an empty valuation: unit clauses are assigned and propagated at level zero.
Then, in a loop:
- Propagate.
  On a conflict at level zero the clauses are unsatisfiable.
  On a conflict at some higher level a clause is learnt, the search backjumps, and the learnt clause asserts a literal.
- Otherwise, if some assumption has not been assigned, assign the assumption at a fresh level.
  An assumption which is already false leads to analysis of the failure, and an unsatisfiable core.
- Otherwise decide on some atom, or, if every atom has a value, the valuation is a model.

Each assumption occupies a level of its own, and so assumptions are always the first levels of the trail.

# Restarts

If enabled, restarts follow the luby sequence, scaled by [luby_u](crate::config::EngineConfig::luby_u).
A restart backjumps to level zero, and so assumptions are re-assigned after a restart.
*/

use super::{generic::GenericEngine, limit::ResourceLimit};
use crate::{
    misc::log::targets::{self},
    reports::Report,
    structures::literal::CLiteral,
};

impl<R: rand::Rng + std::default::Default> GenericEngine<R> {
    /// Searches for a model of the clauses in which every assumption is true.
    ///
    /// On an unsatisfiable result the core is set, and is empty if the clauses are unsatisfiable without assumptions.
    pub(super) fn search(&mut self, assumptions: &[CLiteral]) -> Report {
        self.model_current = false;
        self.core.clear();

        if !self.propagate_base() {
            log::trace!(target: targets::ENGINE, "Unsatisfiable at level zero");
            return Report::Unsatisfiable;
        }

        let limit = ResourceLimit::new(&self.config, self.counters.conflicts);

        loop {
            match self.propagate() {
                Err(key) => {
                    self.counters.conflicts += 1;
                    self.counters.fresh_conflicts += 1;

                    if self.trail.level() == 0 {
                        return Report::Unsatisfiable;
                    }

                    if let Some(reason) = limit.exceeded(self.counters.conflicts) {
                        self.reason_unknown = reason.to_string();
                        self.backjump(0);
                        return Report::Unknown;
                    }

                    let (learnt, level) = self.analyze(key);
                    self.backjump(level);
                    let asserting = learnt[0];
                    let learnt_key = self.insert_clause(learnt, true);
                    self.counters.learnt += 1;
                    self.assign(asserting, Some(learnt_key));
                    self.decay_activity();

                    if self.config.restart.value
                        && self.counters.fresh_conflicts
                            >= self.counters.luby.scaled(self.config.luby_u.value)
                    {
                        self.backjump(0);
                        self.counters.restarts += 1;
                        self.counters.fresh_conflicts = 0;
                        self.counters.luby.next();
                    }
                }

                Ok(()) => {
                    let level = self.trail.level() as usize;
                    if let Some(&assumption) = assumptions.get(level) {
                        match self.value(assumption) {
                            Some(true) => self.trail.new_level(),

                            Some(false) => {
                                self.analyze_final(assumption);
                                self.backjump(0);
                                return Report::Unsatisfiable;
                            }

                            None => {
                                self.trail.new_level();
                                self.assign(assumption, None);
                            }
                        }
                        continue;
                    }

                    if let Some(reason) = limit.exceeded(self.counters.conflicts) {
                        self.reason_unknown = reason.to_string();
                        self.backjump(0);
                        return Report::Unknown;
                    }

                    match self.choose_decision() {
                        Some(decision) => {
                            self.counters.decisions += 1;
                            self.trail.new_level();
                            self.assign(decision, None);
                        }

                        None => {
                            self.model.clone_from(&self.values);
                            self.model_current = true;
                            return Report::Satisfiable;
                        }
                    }
                }
            }
        }
    }

    /// A search, with the core minimized by deletion if configured.
    pub(super) fn search_minimizing(&mut self, assumptions: &[CLiteral]) -> Report {
        let report = self.search(assumptions);
        if report != Report::Unsatisfiable
            || !self.config.minimize_core.value
            || self.core.len() < 2
        {
            return report;
        }

        let mut core = self.core.clone();
        let mut index = 0;
        while index < core.len() {
            let mut trial = core.clone();
            trial.remove(index);
            match self.search(&trial) {
                Report::Unsatisfiable => core.clone_from(&self.core),
                _ => index += 1,
            }
        }

        log::trace!(target: targets::ENGINE, "Minimized core to {} literals", core.len());
        self.core = core;
        self.model_current = false;
        Report::Unsatisfiable
    }
}
