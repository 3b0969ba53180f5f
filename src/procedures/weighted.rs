/*!
A weighted CNF dump of the context.

Each soft term is guarded by a fresh selector `s`, and `(=> s soft)` is asserted as a formula of the context.
The formulas are lowered, the selectors are lowered as assumptions, and the engine writes every clause as hard and each selector as a soft unit with the weight of its term.

Weights are written as integers, and so must be non-negative whole numbers no greater than [u32::MAX].

Note, the guarded formulas remain in the context after the dump, though without the selectors as assumptions they have no effect on later queries.
*/

use crate::{
    context::GenericContext,
    engine::SatEngine,
    misc::log::targets::{self},
    structures::term::{Sort, TermId},
    types::err::{ErrorKind, WeightError},
};

impl<E: SatEngine> GenericContext<E> {
    /// Writes the lowered formulas, with a soft unit for each soft term, as weighted CNF.
    pub fn display_weighted(
        &mut self,
        out: &mut dyn std::io::Write,
        soft: &[TermId],
        weights: &[f64],
    ) -> Result<(), ErrorKind> {
        if soft.len() != weights.len() {
            return Err(WeightError::LengthMismatch {
                terms: soft.len(),
                weights: weights.len(),
            }
            .into());
        }
        for weight in weights {
            if !weight.is_finite() || *weight < 0.0 || *weight > u32::MAX as f64 {
                return Err(WeightError::NotRepresentable(*weight).into());
            }
            if weight.fract() != 0.0 {
                return Err(WeightError::NotIntegral(*weight).into());
            }
        }

        let mut selectors = Vec::with_capacity(soft.len());
        for term in soft {
            let selector = self.tm.mk_fresh_const("s", Sort::Bool);
            let guarded = self.tm.mk_implies(selector, *term)?;
            self.formulas.push(guarded);
            selectors.push(selector);
        }

        self.engine.pop_to_base_level();
        self.internalize_formulas()?;
        self.internalize_assumptions(&selectors, Some(weights))?;

        let weights = self.weights.iter().map(|w| *w as u32).collect::<Vec<_>>();
        log::info!(target: targets::ENGINE, "Weighted CNF with {} soft units", weights.len());
        self.engine
            .display_wcnf(out, &self.assumption_literals, &weights)?;
        Ok(())
    }
}
