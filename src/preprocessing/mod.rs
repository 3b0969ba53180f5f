/*!
The preprocessing pipeline, from goals over terms to goals over boolean atoms.

# Overview

The pipeline is a fixed sequence of [tactics](tactic::Tactic):

1. [Cardinality elimination](card), from `at-most`/`at-least` to bit-vector sums.
2. [Simplification](simplify), with sums of monomials, cheap if-then-else pulling, flattening, elimination of conjunctions and `distinct`.
3. [Sharing](sharing) of binary bit-vector applications.
4. [Bit-blasting](bit_blast), with a persistent [BlastMap].
5. A second simplification, with the same flags.

Each application of the pipeline must leave exactly one goal.

# State

A [Preprocessor] is either ready, with a pipeline of stages, or tainted.
A failed stage taints the preprocessor, which discards the stages, and the next [prepare](Preprocessor::prepare) builds them anew.
The preprocessor begins tainted, and so the first preparation builds the pipeline.

The blast map outlives the stages, as the bits of a constant already lowered are constrained by clauses of the engine.
A failed application instead rolls the blast map back to its state before the application, and as a failure happens before any clause is added, no bit discarded by the rollback is known to the engine.

Before each application the blast map is pushed to the scope depth of the caller, while pops of the caller are forwarded as they happen (see the [Scoped] implementation).
*/

pub mod bit_blast;
pub mod card;
pub mod model_converter;
pub mod sharing;
pub mod simplify;
pub mod tactic;

use bit_blast::BitBlaster;
use card::CardToBv;
use model_converter::ModelConverter;
use sharing::MaxBvSharing;
use simplify::Simplifier;
use tactic::{Tactic, TacticContext};

use crate::{
    config::{Config, SimplifyConfig},
    db::{blast_map::BlastMap, Scoped},
    misc::log::targets::{self},
    reports::Statistics,
    structures::{goal::Goal, term::TermManager},
    types::err::{ConfigError, PreprocessingError},
};

/// The result of an application of the pipeline.
pub struct Prepared {
    /// The single remaining goal.
    pub goal: Goal,

    /// Steps added by the stages of the application.
    pub model_converter: ModelConverter,
}

/// The stages of a ready pipeline.
pub struct Pipeline {
    stages: Vec<Box<dyn Tactic>>,
}

enum State {
    Ready(Pipeline),
    Tainted,
}

pub struct Preprocessor {
    simplify: SimplifyConfig,
    max_bits: u64,
    state: State,
    blast_map: BlastMap,

    /// A count of pipelines built.
    builds: u64,
}

impl Preprocessor {
    /// A tainted preprocessor, as flags are only validated when the pipeline is built.
    pub fn new(config: &Config) -> Self {
        Preprocessor {
            simplify: config.simplify(),
            max_bits: config.blast_max_bits.value,
            state: State::Tainted,
            blast_map: BlastMap::default(),
            builds: 0,
        }
    }

    fn stages(&self) -> Result<Vec<Box<dyn Tactic>>, ConfigError> {
        let mut stages: Vec<Box<dyn Tactic>> = Vec::with_capacity(5);
        stages.push(Box::new(CardToBv::default()));
        stages.push(Box::new(Simplifier::new(self.simplify)?));
        stages.push(Box::new(MaxBvSharing::default()));
        stages.push(Box::new(BitBlaster::new(self.max_bits)));
        stages.push(Box::new(Simplifier::new(self.simplify)?));
        Ok(stages)
    }

    pub fn is_tainted(&self) -> bool {
        matches!(self.state, State::Tainted)
    }

    /// Discards the stages of the pipeline.
    pub fn taint(&mut self) {
        if !self.is_tainted() {
            log::info!(target: targets::PREPROCESSING, "Pipeline tainted");
        }
        self.state = State::Tainted;
    }

    /// Readies the pipeline for an application at the given scope depth.
    ///
    /// A tainted pipeline is rebuilt, and the blast map is pushed to `depth`.
    pub fn prepare(&mut self, depth: usize) -> Result<(), PreprocessingError> {
        if self.is_tainted() {
            let stages = self.stages()?;
            self.builds += 1;
            log::trace!(target: targets::PREPROCESSING, "Pipeline built");
            self.state = State::Ready(Pipeline { stages });
        }

        while self.blast_map.scope_depth() < depth {
            self.blast_map.push_scope();
        }

        match &mut self.state {
            State::Ready(pipeline) => {
                for stage in pipeline.stages.iter_mut() {
                    stage.reset();
                }
                Ok(())
            }

            State::Tainted => panic!("! Pipeline tainted after preparation"),
        }
    }

    /// Applies the pipeline to a goal.
    ///
    /// A failed stage taints the pipeline, and any bits recorded by the application are discarded.
    pub fn apply(
        &mut self,
        tm: &mut TermManager,
        goal: Goal,
        depth: usize,
    ) -> Result<Prepared, PreprocessingError> {
        self.prepare(depth)?;
        let snapshot = self.blast_map.len();

        let result = match &mut self.state {
            State::Ready(pipeline) => pipeline.run(tm, &mut self.blast_map, goal),
            State::Tainted => panic!("! Pipeline tainted after preparation"),
        };

        if let Err(e) = &result {
            if let PreprocessingError::Tactic { tactic, error } = e {
                log::warn!(target: targets::PREPROCESSING, "{tactic} failed: {error}");
                self.taint();
            }
            self.blast_map.truncate(snapshot);
        }
        result
    }

    /// The bits of each bit-vector constant lowered so far.
    pub fn blast_map(&self) -> &BlastMap {
        &self.blast_map
    }

    /// Updates limits, replacing the stages of a ready pipeline while keeping the blast map.
    pub fn update_config(&mut self, config: &Config) -> Result<(), ConfigError> {
        let simplify = config.simplify();
        simplify.validate()?;
        self.simplify = simplify;
        self.max_bits = config.blast_max_bits.value;

        let stages = self.stages()?;
        if let State::Ready(pipeline) = &mut self.state {
            pipeline.stages = stages;
        }
        Ok(())
    }

    pub fn collect_statistics(&self, stats: &mut Statistics) {
        stats.update("preprocessing builds", self.builds);
        if let State::Ready(pipeline) = &self.state {
            for stage in &pipeline.stages {
                stage.collect_statistics(stats);
            }
        }
        stats.update("bit-blast constants", self.blast_map.len() as u64);
    }
}

impl Pipeline {
    fn run(
        &mut self,
        tm: &mut TermManager,
        blast_map: &mut BlastMap,
        goal: Goal,
    ) -> Result<Prepared, PreprocessingError> {
        let mut model_converter = ModelConverter::default();
        let mut goals = vec![goal];

        for stage in self.stages.iter_mut() {
            let mut results = Vec::with_capacity(goals.len());
            for goal in goals {
                let mut ctx = TacticContext {
                    tm: &mut *tm,
                    blast_map: &mut *blast_map,
                    model_converter: &mut model_converter,
                };
                match stage.apply(goal, &mut ctx) {
                    Ok(subgoals) => results.extend(subgoals),
                    Err(error) => {
                        return Err(PreprocessingError::Tactic {
                            tactic: stage.name(),
                            error,
                        })
                    }
                }
            }
            goals = results;
        }

        if goals.len() != 1 {
            log::warn!(target: targets::PREPROCESSING, "Pipeline left {} goals", goals.len());
            return Err(PreprocessingError::SubgoalCount(goals.len()));
        }

        match goals.pop() {
            Some(goal) => Ok(Prepared {
                goal,
                model_converter,
            }),
            None => Err(PreprocessingError::SubgoalCount(0)),
        }
    }
}

impl Scoped for Preprocessor {
    fn push_scope(&mut self) {
        self.blast_map.push_scope();
    }

    fn pop_scopes(&mut self, count: usize) {
        self.blast_map.pop_scopes(count);
    }

    fn scope_depth(&self) -> usize {
        self.blast_map.scope_depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{goal::Dependency, term::Sort};

    #[test]
    fn reduces_to_boolean_atoms() {
        let mut tm = TermManager::new();
        let b = tm.declare_const("b", Sort::BitVec(4)).unwrap();
        let five = tm.mk_numeral_u64(5, 4).unwrap();
        let eq = tm.mk_eq(b, five).unwrap();

        let mut goal = Goal::new(true, false);
        goal.assert(&mut tm, eq, Dependency::default());

        let mut preprocessor = Preprocessor::new(&Config::default());
        assert!(preprocessor.is_tainted());
        let prepared = preprocessor.apply(&mut tm, goal, 0).unwrap();

        // four literals, one for each bit
        assert_eq!(prepared.goal.len(), 4);
        for (formula, _) in prepared.goal.iter() {
            let atom = tm.negated(formula).unwrap_or(formula);
            assert!(tm.is_uninterpreted(atom));
        }
        assert_eq!(preprocessor.blast_map().bit_count(), 4);
    }

    fn numeral_goal(tm: &mut TermManager, name: &str, value: u64, width: u32) -> Goal {
        let b = tm.declare_const(name, Sort::BitVec(width)).unwrap();
        let numeral = tm.mk_numeral_u64(value, width).unwrap();
        let eq = tm.mk_eq(b, numeral).unwrap();
        let mut goal = Goal::new(true, false);
        goal.assert(tm, eq, Dependency::default());
        goal
    }

    #[test]
    fn failure_taints() {
        let mut config = Config::default();
        config.blast_max_bits.value = 2;

        let mut tm = TermManager::new();
        let goal = numeral_goal(&mut tm, "b", 5, 4);

        let mut preprocessor = Preprocessor::new(&config);
        let result = preprocessor.apply(&mut tm, goal, 0);
        assert!(matches!(
            result,
            Err(PreprocessingError::Tactic {
                tactic: "bit_blast",
                ..
            })
        ));
        assert!(preprocessor.is_tainted());
        assert!(preprocessor.blast_map().is_empty());
    }

    #[test]
    fn failure_keeps_earlier_bits() {
        let mut config = Config::default();
        config.blast_max_bits.value = 8;

        let mut tm = TermManager::new();
        let small = numeral_goal(&mut tm, "b", 5, 4);
        let large = numeral_goal(&mut tm, "c", 1, 8);
        let b = tm.find_decl("b").unwrap();

        let mut preprocessor = Preprocessor::new(&config);
        preprocessor.apply(&mut tm, small, 0).unwrap();
        let bits = preprocessor.blast_map().get(b).unwrap().bits.clone();

        assert!(preprocessor.apply(&mut tm, large, 1).is_err());
        assert!(preprocessor.is_tainted());
        assert_eq!(preprocessor.blast_map().len(), 1);
        assert_eq!(preprocessor.blast_map().bit_count(), 4);

        let again = numeral_goal(&mut tm, "b", 6, 4);
        preprocessor.apply(&mut tm, again, 1).unwrap();
        assert_eq!(preprocessor.builds, 2);
        assert_eq!(preprocessor.blast_map().get(b).unwrap().bits, bits);
    }

    #[test]
    fn blast_map_follows_depth() {
        let mut preprocessor = Preprocessor::new(&Config::default());
        preprocessor.prepare(3).unwrap();
        assert_eq!(preprocessor.scope_depth(), 3);
        preprocessor.pop_scopes(2);
        assert_eq!(preprocessor.scope_depth(), 1);
        preprocessor.taint();
        assert_eq!(preprocessor.scope_depth(), 1);
    }
}
