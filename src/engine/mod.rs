/*!
The satisfiability engine behind a context.

The context interacts with an engine only through the [SatEngine] trait, and so any engine with scoped clauses, assumptions, and cores may stand behind a context.

The default engine is [GenericEngine], a conflict-driven clause-learning engine with:
- Two watched literals for [propagation](bcp).
- First unique implication point [learning](analysis), with activity bumping.
- [Decisions](decision) by activity, with phase saving and optional randomness.
- Assumptions as the first levels of a [search](search), with cores from failed assumptions.
- Scoped clauses: each clause is tagged with the scope depth at which it was stored (or learnt), and is removed when that scope is popped.

Randomness is drawn from a source fixed by the [Engine] alias.
*/

pub mod analysis;
pub mod bcp;
pub mod consequences;
pub mod counters;
pub mod decision;
pub mod generic;
pub mod limit;
pub mod mutexes;
pub mod search;
pub mod trail;
pub mod wcnf;

pub use generic::GenericEngine;

use rand::SeedableRng;

use crate::{
    config::EngineConfig,
    db::Scoped,
    generic::minimal_pcg::MinimalPCG32,
    misc::log::targets::{self},
    reports::{Report, Statistics},
    structures::{atom::Atom, clause::CClause, literal::CLiteral},
};

/// The default engine, with randomness from [MinimalPCG32].
pub type Engine = GenericEngine<MinimalPCG32>;

/// The interface of an engine to a context.
pub trait SatEngine: Scoped {
    /// An engine built from configuration.
    fn from_config(config: &EngineConfig) -> Self
    where
        Self: Sized;

    /// A fresh atom.
    fn fresh_atom(&mut self) -> Atom;

    /// A count of atoms.
    fn atom_count(&self) -> usize;

    /// A literal which is true in every valuation.
    fn top(&self) -> CLiteral;

    /// Adds a clause at the current scope depth.
    fn add_clause(&mut self, clause: CClause);

    /// Checks satisfiability under assumptions.
    ///
    /// If weights are given, one for each assumption, heavier assumptions are preferred.
    fn check(
        &mut self,
        assumptions: &[CLiteral],
        weights: Option<&[f64]>,
        max_weight: f64,
    ) -> Report;

    /// Assumptions of the last unsatisfiable check, as given.
    fn core(&self) -> &[CLiteral];

    /// Whether the last check found a model, and the model remains valid.
    fn model_is_current(&self) -> bool;

    /// The value of an atom in the current model.
    fn model_value(&self, atom: Atom) -> Option<bool>;

    /// Fixed consequences of the assumptions among the atoms.
    ///
    /// Each consequence is a clause with the fixed literal first, followed by the assumptions it follows from.
    fn consequences(&mut self, assumptions: &[CLiteral], atoms: &[Atom]) -> (Report, Vec<CClause>);

    /// Groups of mutually exclusive literals.
    fn find_mutexes(&mut self, literals: &[CLiteral]) -> Vec<Vec<CLiteral>>;

    /// Why the last check was unknown.
    fn reason_unknown(&self) -> &str;

    fn update_config(&mut self, config: &EngineConfig);

    fn collect_statistics(&self, stats: &mut Statistics);

    /// Writes the clauses as weighted CNF, with the assumptions as soft units.
    fn display_wcnf(
        &self,
        out: &mut dyn std::io::Write,
        assumptions: &[CLiteral],
        weights: &[u32],
    ) -> std::io::Result<()>;

    /// Clears any assignments above level zero.
    fn pop_to_base_level(&mut self);
}

impl<R: rand::Rng + std::default::Default + SeedableRng> SatEngine for GenericEngine<R> {
    fn from_config(config: &EngineConfig) -> Self {
        GenericEngine::from_config(config)
    }

    fn fresh_atom(&mut self) -> Atom {
        GenericEngine::fresh_atom(self)
    }

    fn atom_count(&self) -> usize {
        GenericEngine::atom_count(self)
    }

    fn top(&self) -> CLiteral {
        GenericEngine::top(self)
    }

    fn add_clause(&mut self, clause: CClause) {
        self.model_current = false;
        self.store_clause(clause);
    }

    fn check(
        &mut self,
        assumptions: &[CLiteral],
        weights: Option<&[f64]>,
        max_weight: f64,
    ) -> Report {
        self.counters.checks += 1;
        self.reason_unknown.clear();

        let ordered = match weights {
            Some(weights) => {
                log::info!(target: targets::ENGINE, "Weighted check with max weight {max_weight}");
                let mut order = (0..assumptions.len()).collect::<Vec<_>>();
                order.sort_by(|a, b| weights[*b].total_cmp(&weights[*a]));
                order.into_iter().map(|i| assumptions[i]).collect::<Vec<_>>()
            }
            None => assumptions.to_vec(),
        };

        let report = self.search_minimizing(&ordered);
        log::info!(target: targets::ENGINE, "Check: {report}");
        report
    }

    fn core(&self) -> &[CLiteral] {
        &self.core
    }

    fn model_is_current(&self) -> bool {
        self.model_current
    }

    fn model_value(&self, atom: Atom) -> Option<bool> {
        GenericEngine::model_value(self, atom)
    }

    fn consequences(&mut self, assumptions: &[CLiteral], atoms: &[Atom]) -> (Report, Vec<CClause>) {
        self.counters.checks += 1;
        self.reason_unknown.clear();
        self.find_consequences(assumptions, atoms)
    }

    fn find_mutexes(&mut self, literals: &[CLiteral]) -> Vec<Vec<CLiteral>> {
        self.mutex_groups(literals)
    }

    fn reason_unknown(&self) -> &str {
        &self.reason_unknown
    }

    fn update_config(&mut self, config: &EngineConfig) {
        self.config = config.clone();
        self.config.elim_vars.value = false;
    }

    fn collect_statistics(&self, stats: &mut Statistics) {
        self.counters.collect(stats);
        stats.update("sat atoms", self.atom_count() as u64);
        stats.update("sat clauses", self.clauses.len() as u64);
    }

    fn display_wcnf(
        &self,
        out: &mut dyn std::io::Write,
        assumptions: &[CLiteral],
        weights: &[u32],
    ) -> std::io::Result<()> {
        self.write_wcnf(out, assumptions, weights)
    }

    fn pop_to_base_level(&mut self) {
        self.backjump(0);
    }
}
