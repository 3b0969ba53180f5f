//! The interface of a stage of the preprocessing pipeline.

use super::model_converter::ModelConverter;
use crate::{
    db::blast_map::BlastMap,
    reports::Statistics,
    structures::{
        goal::Goal,
        term::{TermId, TermManager},
    },
    types::err::TacticError,
};

/// What a tactic may read and write, other than its goal.
pub struct TacticContext<'a> {
    pub tm: &'a mut TermManager,

    /// The bit-blast map of the pipeline.
    pub blast_map: &'a mut BlastMap,

    /// Steps for models of the resulting goals, appended to by tactics which remove declarations.
    pub model_converter: &'a mut ModelConverter,
}

/// A transformation of goals.
pub trait Tactic {
    /// A name for the tactic, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Transforms a goal to some (equisatisfiable, with respect to the goal) goals.
    fn apply(&mut self, goal: Goal, ctx: &mut TacticContext) -> Result<Vec<Goal>, TacticError>;

    /// Clears any state kept between applications.
    fn reset(&mut self) {}

    fn collect_statistics(&self, _stats: &mut Statistics) {}
}

/// Rewrites each formula of a goal with `rewrite`, keeping dependencies.
pub(super) fn rewrite_goal(
    goal: Goal,
    tm: &mut TermManager,
    mut rewrite: impl FnMut(&mut TermManager, TermId) -> Result<TermId, TacticError>,
) -> Result<Goal, TacticError> {
    let mut result = goal.derive();
    for (formula, dependency) in goal.iter() {
        let rewritten = rewrite(tm, formula)?;
        result.assert(tm, rewritten, dependency.clone());
    }
    Ok(result)
}
