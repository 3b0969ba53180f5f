/*!
The context --- to which formulas are asserted, and within which queries take place.

Strictly, a [GenericContext] and a [Context].

The generic context is generic over the [engine](crate::engine) behind the context, and a [Context] uses the default [Engine].

A context owns:
- The [term manager](TermManager) through which terms are built.
- The asserted formulas, and the standing assumptions (guards of [guarded assertions](GenericContext::assert_guarded)), both scoped.
- A frontier, marking the prefix of formulas already lowered to the engine.
- The [atom map](AtomMap), the [preprocessor](Preprocessor) (and so the bit-blast map), and the engine, each pushed and popped with the scopes of the context.
- Per-query state: the [dependency map](DependencyMap) from assumptions to literals, the unsatisfiable core, and a cached model.

Behaviour of a context is spread over the [procedures](crate::procedures).

# Example
```rust
# use otter_inc::context::Context;
# use otter_inc::config::Config;
# use otter_inc::reports::Report;
# use otter_inc::structures::{model::Value, term::Sort};
let mut the_context = Context::from_config(Config::default());

let x = the_context.terms_mut().declare_const("x", Sort::Bool).unwrap();
let y = the_context.terms_mut().declare_const("y", Sort::Bool).unwrap();
let not_x = the_context.terms_mut().mk_not(x).unwrap();
let y_or_not_x = the_context.terms_mut().mk_or(&[y, not_x]).unwrap();

the_context.assert_term(x).unwrap();
the_context.assert_term(y_or_not_x).unwrap();
assert_eq!(the_context.check(&[]), Report::Satisfiable);

let model = the_context.model().cloned().unwrap();
assert_eq!(model.value_of_name(the_context.terms(), "y"), Some(&Value::Bool(true)));
```
*/

use rustc_hash::FxHashMap;

use crate::{
    config::Config,
    db::{atom_map::AtomMap, dependency::DependencyMap},
    engine::{Engine, SatEngine},
    misc::log::targets::{self},
    preprocessing::{model_converter::ModelConverter, Preprocessor},
    reports::Statistics,
    structures::{
        literal::CLiteral,
        model::Model,
        term::{TermId, TermManager},
    },
    types::err::{ErrorKind, StateError},
};

/// The reason given for an unknown result, before any reason is known.
pub const NO_REASON: &str = "no reason given";

/// Lengths of the scoped sequences of a context when a scope was opened.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Checkpoint {
    pub formulas: usize,
    pub assumptions: usize,
    pub frontier: usize,
}

/// The model of the last satisfiable query, built on first request.
pub(crate) enum ModelCache {
    /// A model is available from the engine, though has not been built.
    Pending,

    /// No model is available.
    Absent,

    Present(Model),
}

/// A context, generic over the engine.
pub struct GenericContext<E: SatEngine> {
    /// The configuration of the context.
    pub config: Config,

    pub(crate) tm: TermManager,

    pub(crate) engine: E,

    pub(crate) preprocessor: Preprocessor,

    /// Asserted formulas, in order of assertion.
    pub(crate) formulas: Vec<TermId>,

    /// Standing assumptions, in order of assertion.
    pub(crate) assumptions: Vec<TermId>,

    /// The count of formulas lowered to the engine.
    pub(crate) frontier: usize,

    /// One checkpoint for each open scope.
    pub(crate) checkpoints: Vec<Checkpoint>,

    pub(crate) atom_map: AtomMap,

    /// Assumption terms to literals, for the most recent query only.
    pub(crate) dep2asm: DependencyMap,

    /// Assumption terms to the proxy constants which stand for them.
    ///
    /// A proxy is defined in the engine while its atom is in the atom map.
    pub(crate) proxies: FxHashMap<TermId, TermId>,

    /// Literals of the assumptions of the most recent query, in the order of the query.
    pub(crate) assumption_literals: Vec<CLiteral>,

    /// Weights of the assumption literals, if the most recent query was weighted.
    pub(crate) weights: Vec<f64>,

    pub(crate) core: Vec<TermId>,

    pub(crate) model: ModelCache,

    /// Steps for models accumulated over every lowering, e.g. removal of dependency proxies.
    pub(crate) model_converter: ModelConverter,

    pub(crate) reason_unknown: String,
}

/// A context with the default engine.
pub type Context = GenericContext<Engine>;

impl<E: SatEngine> GenericContext<E> {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        let engine = E::from_config(&config.engine);
        Self::with_engine(config, engine)
    }

    /// Creates a context around an engine.
    pub fn with_engine(config: Config, engine: E) -> Self {
        GenericContext {
            preprocessor: Preprocessor::new(&config),
            config,
            tm: TermManager::default(),
            engine,
            formulas: Vec::default(),
            assumptions: Vec::default(),
            frontier: 0,
            checkpoints: Vec::default(),
            atom_map: AtomMap::default(),
            dep2asm: DependencyMap::default(),
            proxies: FxHashMap::default(),
            assumption_literals: Vec::default(),
            weights: Vec::default(),
            core: Vec::default(),
            model: ModelCache::Absent,
            model_converter: ModelConverter::default(),
            reason_unknown: NO_REASON.to_string(),
        }
    }

    /// The term manager of the context.
    pub fn terms(&self) -> &TermManager {
        &self.tm
    }

    /// The term manager of the context, to build terms.
    pub fn terms_mut(&mut self) -> &mut TermManager {
        &mut self.tm
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn num_assertions(&self) -> usize {
        self.formulas.len()
    }

    /// The asserted formula at `index`, in order of assertion.
    pub fn assertion(&self, index: usize) -> Option<TermId> {
        self.formulas.get(index).copied()
    }

    pub fn num_assumptions(&self) -> usize {
        self.assumptions.len()
    }

    /// The standing assumption at `index`, in order of assertion.
    pub fn assumption(&self, index: usize) -> Option<TermId> {
        self.assumptions.get(index).copied()
    }

    /// The count of formulas lowered to the engine.
    pub fn frontier(&self) -> usize {
        self.frontier
    }

    /// The reason for the most recent unknown result.
    pub fn reason_unknown(&self) -> &str {
        &self.reason_unknown
    }

    pub fn set_reason_unknown(&mut self, reason: &str) {
        self.reason_unknown = reason.to_string();
    }

    /// Replaces the configuration, and refreshes the engine and the preprocessor.
    ///
    /// Variable elimination in the engine remains disabled regardless of the configuration.
    pub fn update_config(&mut self, config: Config) -> Result<(), ErrorKind> {
        self.preprocessor.update_config(&config)?;
        self.engine.update_config(&config.engine);
        self.config = config;
        self.config.engine.elim_vars.value = false;
        Ok(())
    }

    /// Statistics of the engine, the preprocessor, and the context.
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics::default();
        self.engine.collect_statistics(&mut stats);
        self.preprocessor.collect_statistics(&mut stats);
        stats.update("formulas", self.formulas.len() as u64);
        stats.update("assumptions", self.assumptions.len() as u64);
        stats.update("mapped atoms", self.atom_map.len() as u64);
        stats
    }

    /// A fresh context, with the formulas and standing assumptions of this context translated to a fresh term manager.
    ///
    /// Nothing is lowered in the fresh context, and translation is only possible at scope depth zero.
    pub fn translate(&self, config: Config) -> Result<Self, ErrorKind> {
        let depth = self.scope_depth();
        if depth > 0 {
            log::error!(target: targets::SCOPE, "Translation requested at depth {depth}");
            return Err(StateError::NonBaseLevel(depth).into());
        }

        let mut fresh = Self::from_config(config);
        let mut cache = FxHashMap::default();
        for formula in &self.formulas {
            let translated = self.tm.translate(*formula, &mut fresh.tm, &mut cache);
            fresh.formulas.push(translated);
        }
        for assumption in &self.assumptions {
            let translated = self.tm.translate(*assumption, &mut fresh.tm, &mut cache);
            fresh.assumptions.push(translated);
        }
        fresh.reason_unknown.clone_from(&self.reason_unknown);
        Ok(fresh)
    }
}
