/*!
Assertion, and satisfiability queries.

# Assertion

An [assertion](GenericContext::assert_term) stores a formula and nothing more, as formulas are lowered lazily by the next query (or push).
A [guarded assertion](GenericContext::assert_guarded) stores `guard => formula`, and adds the guard to the standing assumptions, so the guard may appear in cores.

# Queries

A query:
1. Clears the core and the cached model, and returns the engine to level zero.
2. Lowers any formulas beyond the frontier, and then the assumptions of the query together with the standing assumptions.
   If either fails the query is unknown, with the failure as the reason.
3. Calls the engine with the assumption literals.

After a satisfiable query a model is available on request.
After an unsatisfiable query the literals of the engine core are read back to assumption terms through the dependency map.
After an unknown query the reason of the engine is copied to the context.

# Weighted queries

A [weighted query](GenericContext::check_weighted) pairs each assumption of the query with a weight, and the engine prefers heavier assumptions.
Standing assumptions take the greatest weight of the query.
Core minimization is disabled by a weighted query, and remains disabled.
*/

use crate::{
    context::{GenericContext, ModelCache},
    engine::SatEngine,
    misc::log::targets::{self},
    reports::Report,
    structures::{literal::Literal, term::TermId},
    types::err::{ErrorKind, TermError, WeightError},
};

impl<E: SatEngine> GenericContext<E> {
    /// Asserts a boolean formula.
    pub fn assert_term(&mut self, formula: TermId) -> Result<(), ErrorKind> {
        if !self.tm.is_bool(formula) {
            return Err(TermError::ExpectedBool(formula).into());
        }
        self.formulas.push(formula);
        Ok(())
    }

    /// Asserts `guard => formula`, with `guard` added to the standing assumptions.
    pub fn assert_guarded(&mut self, formula: TermId, guard: TermId) -> Result<(), ErrorKind> {
        let implication = self.tm.mk_implies(guard, formula)?;
        self.assumptions.push(guard);
        self.formulas.push(implication);
        Ok(())
    }

    /// Checks satisfiability of the formulas together with the assumptions and standing assumptions.
    pub fn check(&mut self, assumptions: &[TermId]) -> Report {
        self.check_assumptions(assumptions, None, 0.0)
    }

    /// Checks satisfiability as [check](GenericContext::check), with a weight for each assumption.
    ///
    /// Weights must be non-negative and finite, and `max_weight` is passed to the engine.
    pub fn check_weighted(
        &mut self,
        assumptions: &[TermId],
        weights: &[f64],
        max_weight: f64,
    ) -> Result<Report, ErrorKind> {
        if assumptions.len() != weights.len() {
            return Err(WeightError::LengthMismatch {
                terms: assumptions.len(),
                weights: weights.len(),
            }
            .into());
        }
        if let Some(weight) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(WeightError::NotRepresentable(*weight).into());
        }

        if self.config.engine.minimize_core.value {
            log::info!(target: targets::CORE, "Core minimization disabled by a weighted check");
            self.config.engine.minimize_core.value = false;
            self.engine.update_config(&self.config.engine);
        }

        Ok(self.check_assumptions(assumptions, Some(weights), max_weight))
    }

    fn check_assumptions(
        &mut self,
        assumptions: &[TermId],
        weights: Option<&[f64]>,
        max_weight: f64,
    ) -> Report {
        self.model = ModelCache::Absent;
        self.core.clear();
        self.engine.pop_to_base_level();

        let lowered = self
            .internalize_formulas()
            .and_then(|_| self.internalize_assumptions(assumptions, weights));
        if let Err(e) = lowered {
            log::warn!(target: targets::INTERNALIZE, "Query abandoned: {e}");
            self.reason_unknown = e.to_string();
            return Report::Unknown;
        }

        let literals = std::mem::take(&mut self.assumption_literals);
        let report = match weights {
            Some(_) => self
                .engine
                .check(&literals, Some(self.weights.as_slice()), max_weight),
            None => self.engine.check(&literals, None, max_weight),
        };
        self.assumption_literals = literals;

        match report {
            Report::Satisfiable => {
                self.model = ModelCache::Pending;
                if weights.is_none() && !assumptions.is_empty() {
                    self.check_assumption_values();
                }
            }

            Report::Unsatisfiable => self.extract_core(),

            Report::Unknown => {
                self.reason_unknown = self.engine.reason_unknown().to_string();
            }
        }

        log::info!(target: targets::CORE, "Query over {} assumptions: {report}", self.assumption_literals.len());
        report
    }

    /// Panics if some assumption literal is not true in the model of the engine.
    fn check_assumption_values(&self) {
        for (term, literal) in self.dep2asm.iter() {
            let value = self.engine.model_value(literal.atom());
            if value != Some(literal.polarity()) {
                log::error!(target: targets::CORE, "Assumption {} has value {value:?}", self.tm.display(term));
                panic!("! Assumption {} not satisfied by the model", self.tm.display(term));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, context::Context, structures::term::Sort};

    #[test]
    fn non_boolean_assertion() {
        let mut ctx = Context::from_config(Config::default());
        let b = ctx.terms_mut().declare_const("b", Sort::BitVec(2)).unwrap();
        assert_eq!(
            ctx.assert_term(b),
            Err(ErrorKind::Term(TermError::ExpectedBool(b)))
        );
        assert_eq!(ctx.num_assertions(), 0);
    }

    #[test]
    fn weights_are_validated() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();

        assert!(matches!(
            ctx.check_weighted(&[p], &[], 1.0),
            Err(ErrorKind::Weight(WeightError::LengthMismatch { .. }))
        ));
        assert!(matches!(
            ctx.check_weighted(&[p], &[-1.0], 1.0),
            Err(ErrorKind::Weight(WeightError::NotRepresentable(_)))
        ));
        assert_eq!(ctx.check_weighted(&[p], &[2.0], 2.0), Ok(Report::Satisfiable));
    }

    #[test]
    fn weighted_check_disables_minimization() {
        let mut config = Config::default();
        config.engine.minimize_core.value = true;
        let mut ctx = Context::from_config(config);
        let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();

        let _ = ctx.check_weighted(&[p], &[1.0], 1.0);
        assert!(!ctx.config.engine.minimize_core.value);
    }
}
