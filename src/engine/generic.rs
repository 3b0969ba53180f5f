//! The structure of the default engine, and methods for building it.

use rand::SeedableRng;

use super::{counters::Counters, trail::Trail};
use crate::{
    config::EngineConfig,
    db::Scoped,
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
};

/// Keys of clauses, as indices to the clause store.
pub type ClauseKey = usize;

/// A clause as stored by the engine.
pub struct StoredClause {
    pub literals: CClause,

    /// Whether the clause was learnt, rather than added.
    pub learnt: bool,

    /// The scope depth of the engine when the clause was stored.
    pub scope: usize,
}

/// A CDCL engine, generic over a source of randomness.
pub struct GenericEngine<R: rand::Rng + std::default::Default> {
    pub config: EngineConfig,

    pub counters: Counters,

    pub(super) clauses: Vec<StoredClause>,

    /// Clause keys, indexed by the (dense) index of the watched literal.
    pub(super) watches: Vec<Vec<ClauseKey>>,

    /// The current valuation, indexed by atom.
    pub(super) values: Vec<Option<bool>>,

    /// The level at which each atom was valued.
    pub(super) levels: Vec<u32>,

    /// The clause which forced the value of each atom, if any.
    pub(super) reasons: Vec<Option<ClauseKey>>,

    /// The last value of each atom.
    pub(super) phases: Vec<bool>,

    pub(super) activity: Vec<f64>,
    pub(super) activity_increment: f64,

    pub(super) seen: Vec<bool>,

    pub(super) trail: Trail,

    pub(super) scope_depth: usize,

    /// The valuation of the last satisfiable query.
    pub(super) model: Vec<Option<bool>>,
    pub(super) model_current: bool,

    pub(super) core: Vec<CLiteral>,

    pub(super) reason_unknown: String,

    pub(super) rng: R,

    pub(super) top: Atom,
}

/// The value of a literal, given a valuation.
pub(super) fn value_of(values: &[Option<bool>], literal: CLiteral) -> Option<bool> {
    values[literal.atom() as usize].map(|value| value == literal.polarity())
}

impl<R: rand::Rng + std::default::Default + SeedableRng> GenericEngine<R> {
    /// An engine with a single atom, fixed true.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut config = config.clone();
        config.elim_vars.value = false;

        let rng = R::seed_from_u64(config.seed.value);

        let mut engine = GenericEngine {
            config,
            counters: Counters::default(),
            clauses: Vec::default(),
            watches: vec![Vec::default(), Vec::default()],
            values: vec![None],
            levels: vec![0],
            reasons: vec![None],
            phases: vec![false],
            activity: vec![0.0],
            activity_increment: 1.0,
            seen: vec![false],
            trail: Trail::default(),
            scope_depth: 0,
            model: Vec::default(),
            model_current: false,
            core: Vec::default(),
            reason_unknown: String::default(),
            rng,
            top: 0,
        };

        engine.top = engine.fresh_atom();
        engine.store_clause(vec![CLiteral::new(engine.top, true)]);
        engine
    }
}

impl<R: rand::Rng + std::default::Default> GenericEngine<R> {
    pub fn fresh_atom(&mut self) -> Atom {
        let atom = self.values.len() as Atom;
        let phase = self.rng.random_bool(self.config.polarity_lean.value);

        self.values.push(None);
        self.levels.push(0);
        self.reasons.push(None);
        self.phases.push(phase);
        self.activity.push(0.0);
        self.seen.push(false);
        self.watches.push(Vec::default());
        self.watches.push(Vec::default());

        atom
    }

    /// A count of atoms, excluding the placeholder at zero.
    pub fn atom_count(&self) -> usize {
        self.values.len() - 1
    }

    pub fn top(&self) -> CLiteral {
        CLiteral::new(self.top, true)
    }

    /// Stores a clause, after sorting and removing duplicate literals.
    /// Tautologies are dropped.
    ///
    /// All assignments are cleared, as a stored clause may conflict with the valuation.
    pub fn store_clause(&mut self, mut clause: CClause) -> Option<ClauseKey> {
        self.reset_trail();

        clause.sort_unstable();
        clause.dedup();
        if clause.windows(2).any(|w| w[0].atom() == w[1].atom()) {
            log::trace!(target: targets::ENGINE, "Dropped tautology {}", clause.as_dimacs(true));
            return None;
        }

        for literal in &clause {
            debug_assert!((literal.atom() as usize) < self.values.len());
        }

        Some(self.insert_clause(clause, false))
    }

    /// Inserts a clause as given, watching the first two literals.
    pub(super) fn insert_clause(&mut self, clause: CClause, learnt: bool) -> ClauseKey {
        let key = self.clauses.len();
        if clause.len() > 1 {
            self.watches[clause[0].index()].push(key);
            self.watches[clause[1].index()].push(key);
        }
        self.clauses.push(StoredClause {
            literals: clause,
            learnt,
            scope: self.scope_depth,
        });
        key
    }

    /// Rebuilds every watch list from the first two literals of each clause.
    pub(super) fn rebuild_watches(&mut self) {
        for list in self.watches.iter_mut() {
            list.clear();
        }
        for (key, clause) in self.clauses.iter().enumerate() {
            if clause.literals.len() > 1 {
                self.watches[clause.literals[0].index()].push(key);
                self.watches[clause.literals[1].index()].push(key);
            }
        }
    }

    pub(super) fn value(&self, literal: CLiteral) -> Option<bool> {
        value_of(&self.values, literal)
    }

    pub(super) fn assign(&mut self, literal: CLiteral, reason: Option<ClauseKey>) {
        let atom = literal.atom() as usize;
        self.values[atom] = Some(literal.polarity());
        self.levels[atom] = self.trail.level();
        self.reasons[atom] = reason;
        self.trail.store(literal);
    }

    /// Removes all assignments above the given level, saving phases.
    pub(super) fn backjump(&mut self, level: u32) {
        if self.trail.level() <= level {
            return;
        }
        let start = self.trail.start_of(level);
        for literal in self.trail.literals.drain(start..) {
            let atom = literal.atom() as usize;
            self.phases[atom] = literal.polarity();
            self.values[atom] = None;
            self.reasons[atom] = None;
        }
        self.trail.level_indices.truncate(level as usize);
        self.trail.q_head = std::cmp::min(self.trail.q_head, self.trail.literals.len());
    }

    /// Removes all assignments, including those at level zero.
    pub(super) fn reset_trail(&mut self) {
        self.backjump(0);
        for literal in self.trail.literals.drain(..) {
            let atom = literal.atom() as usize;
            self.values[atom] = None;
            self.reasons[atom] = None;
        }
        self.trail.q_head = 0;
    }

    /// Assigns all unit clauses and propagates, at level zero.
    ///
    /// Returns false if the clauses are found to be unsatisfiable.
    pub(super) fn propagate_base(&mut self) -> bool {
        self.reset_trail();

        for key in 0..self.clauses.len() {
            let literal = match self.clauses[key].literals.as_slice() {
                [] => return false,
                [literal] => *literal,
                _ => continue,
            };
            match self.value(literal) {
                Some(true) => {}
                Some(false) => return false,
                None => self.assign(literal, Some(key)),
            }
        }

        self.propagate().is_ok()
    }

    /// The literals in the valuation of the last satisfiable query.
    pub fn model_value(&self, atom: Atom) -> Option<bool> {
        match self.model_current {
            true => self.model.get(atom as usize).copied().flatten(),
            false => None,
        }
    }
}

impl<R: rand::Rng + std::default::Default> Scoped for GenericEngine<R> {
    fn push_scope(&mut self) {
        self.scope_depth += 1;
        log::trace!(target: targets::ENGINE, "Push to depth {}", self.scope_depth);
    }

    /// Removes every clause stored (or learnt) in a closed scope.
    ///
    /// A clause learnt within a scope may depend on clauses of the scope, and so is removed with the scope.
    fn pop_scopes(&mut self, count: usize) {
        let count = std::cmp::min(count, self.scope_depth);
        if count == 0 {
            return;
        }
        self.scope_depth -= count;
        self.reset_trail();
        self.model_current = false;

        let depth = self.scope_depth;
        self.clauses.retain(|clause| clause.scope <= depth);
        self.rebuild_watches();

        log::trace!(target: targets::ENGINE, "Pop to depth {depth}, {} clauses remain", self.clauses.len());
    }

    fn scope_depth(&self) -> usize {
        self.scope_depth
    }
}
