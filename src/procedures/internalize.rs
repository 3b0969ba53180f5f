/*!
Lowering of formulas and assumptions to the engine.

# Formulas

Formulas are lowered lazily, and only those beyond the frontier.
The formulas beyond the frontier are gathered as a goal without dependencies, passed through the [preprocessing](crate::preprocessing) pipeline, and [translated](crate::procedures::goal2sat) to clauses.
On success the frontier is advanced to cover every formula, and on failure the frontier is unchanged, so the same formulas are retried by the next query.

# Assumptions

Assumptions are lowered for each query.
The assumptions of the query, and then the standing assumptions, are gathered as a goal in which each assumption depends on itself.
After preprocessing and translation the [dependency map](crate::db::dependency) holds a literal for each assumption which survived preprocessing, and the literals of the query are read from the map in the order of the goal.
Any weights are kept in step with the literals.
*/

use crate::{
    context::GenericContext,
    engine::SatEngine,
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        goal::{Dependency, Goal},
        term::{Sort, TermId},
    },
    types::err::InternalizeError,
};

/// How a variable of a consequence query is represented in the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VarShape {
    /// A boolean constant, with an atom.
    Atom(Atom),

    /// A bit-vector constant, with an atom for each bit, least significant first.
    Bits(Vec<Atom>),

    /// A constant with no representation in the engine.
    Unconstrained,
}

impl<E: SatEngine> GenericContext<E> {
    /// Lowers every formula beyond the frontier.
    pub fn internalize_formulas(&mut self) -> Result<(), InternalizeError> {
        if self.frontier == self.formulas.len() {
            return Ok(());
        }

        let count = self.formulas.len();
        let mut goal = Goal::new(true, false);
        for formula in &self.formulas[self.frontier..] {
            goal.assert(&mut self.tm, *formula, Dependency::default());
        }

        log::trace!(target: targets::INTERNALIZE, "Lowering formulas {}..{count}", self.frontier);

        let depth = self.scope_depth();
        let prepared = self.preprocessor.apply(&mut self.tm, goal, depth)?;
        self.internalize_goal(prepared)?;

        self.frontier = count;
        Ok(())
    }

    /// Lowers the assumptions of a query together with the standing assumptions.
    ///
    /// The dependency map, assumption literals, and weights of any previous query are discarded.
    pub(crate) fn internalize_assumptions(
        &mut self,
        assumptions: &[TermId],
        weights: Option<&[f64]>,
    ) -> Result<(), InternalizeError> {
        self.dep2asm.clear();
        self.assumption_literals.clear();
        self.weights.clear();

        if assumptions.is_empty() && self.assumptions.is_empty() {
            return Ok(());
        }

        let mut goal = Goal::new(true, true);
        for assumption in assumptions.iter().chain(self.assumptions.iter()) {
            goal.assert(&mut self.tm, *assumption, Dependency::leaf(*assumption));
        }

        let depth = self.scope_depth();
        let prepared = self.preprocessor.apply(&mut self.tm, goal, depth)?;
        self.internalize_goal(prepared)?;

        self.extract_assumptions(assumptions, weights);
        Ok(())
    }

    /// Reads the literals of the query from the dependency map.
    ///
    /// Assumptions dropped by preprocessing are skipped, together with their weights.
    /// Standing assumptions take the greatest weight of the query.
    fn extract_assumptions(&mut self, assumptions: &[TermId], weights: Option<&[f64]>) {
        let standing_weight = weights
            .and_then(|ws| ws.iter().copied().reduce(f64::max))
            .unwrap_or(1.0);

        let mut seen = rustc_hash::FxHashSet::default();
        let ordered = assumptions
            .iter()
            .enumerate()
            .map(|(index, term)| (*term, weights.map(|ws| ws[index])))
            .chain(
                self.assumptions
                    .iter()
                    .map(|term| (*term, weights.map(|_| standing_weight))),
            )
            .collect::<Vec<_>>();

        for (term, weight) in ordered {
            if !seen.insert(term) {
                continue;
            }
            match self.dep2asm.get(term) {
                Some(literal) => {
                    self.assumption_literals.push(literal);
                    if let Some(weight) = weight {
                        self.weights.push(weight);
                    }
                }
                None => {
                    log::trace!(target: targets::INTERNALIZE, "Assumption {} dropped", self.tm.display(term));
                }
            }
        }

        assert_eq!(
            self.assumption_literals.len(),
            self.dep2asm.len(),
            "! Assumption literals differ from the dependency map"
        );
    }

    /// How a variable is represented in the engine.
    pub fn resolve_var(&self, var: TermId) -> VarShape {
        match self.tm.sort(var) {
            Sort::Bool => match self.atom_map.to_atom(var) {
                Some(atom) => VarShape::Atom(atom),
                None => VarShape::Unconstrained,
            },

            Sort::BitVec(_) => {
                let group = self
                    .tm
                    .as_const(var)
                    .and_then(|decl| self.preprocessor.blast_map().get(decl));
                let Some(group) = group else {
                    return VarShape::Unconstrained;
                };

                let atoms = group
                    .bits
                    .iter()
                    .map(|bit| self.atom_map.to_atom(*bit))
                    .collect::<Option<Vec<_>>>();
                match atoms {
                    Some(atoms) => VarShape::Bits(atoms),
                    None => VarShape::Unconstrained,
                }
            }
        }
    }
}
