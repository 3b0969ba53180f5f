/*!
Translation of a prepared goal to clauses of the engine.

# Atoms and definitions

Each boolean term without boolean structure (a constant, or an application of an uninterpreted function) is an atom, mapped to an engine atom through the [atom map](crate::db::atom_map).
Each term with boolean structure is given an engine atom, together with clauses defining the atom as the structure over the literals of the arguments (a Tseitin translation).
Definitions are entered to the atom map too, and so are made once for each scope in which they are needed.

A formula is added as a clause: a disjunction as the clause of the literals of its arguments, and any other formula as a unit clause.

# Dependencies

A formula with dependencies is added as a clause guarded by a literal for each dependency.
If a dependency is the only dependency of a formula, occurs in no other formula, and the formula is a literal (a constant or a negated constant), the literal of the formula stands for the dependency and no clause is added.
Otherwise, a proxy constant stands for the dependency, and the proxy is filtered from models by the context.

A proxy is made once for each assumption term and kept by the context.
While the atom of a proxy is mapped, the clauses guarded by the proxy are in the engine, and so a later query with the same assumption reuses the literal and adds no clause.
A pop which removes the atom removes the clauses too, and the proxy is defined anew when next needed.
A dependency which shares a formula with some other dependency is given a proxy for the single query, as the formulas guarded by its proxy do not define the dependency alone.

# Interpreted atoms

A goal which still contains atoms with theory content after preprocessing (bit-vector equalities or comparisons, cardinality constraints, `distinct`) is rejected.
*/

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    context::GenericContext,
    engine::SatEngine,
    misc::log::targets::{self},
    preprocessing::{model_converter::ConverterStep, Prepared},
    structures::{
        clause::CClause,
        goal::Goal,
        literal::{CLiteral, Literal},
        term::{DeclId, Op, Sort, TermId},
    },
    types::err::InternalizeError,
};

impl<E: SatEngine> GenericContext<E> {
    /// Adds a prepared goal to the engine, and its model converter to the converter of the context.
    pub(crate) fn internalize_goal(&mut self, prepared: Prepared) -> Result<(), InternalizeError> {
        let Prepared {
            goal,
            model_converter,
        } = prepared;

        let interpreted = self.interpreted_atoms(&goal);
        if !interpreted.is_empty() {
            let atoms = interpreted
                .iter()
                .map(|atom| self.tm.display(*atom).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            log::warn!(target: targets::INTERNALIZE, "Interpreted atoms: {atoms}");
            return Err(InternalizeError::InterpretedAtoms(atoms));
        }

        let converter = std::mem::take(&mut self.model_converter);
        self.model_converter = converter.then(model_converter);

        self.goal2sat(&goal);
        Ok(())
    }

    /// Terms of the goal with theory content.
    fn interpreted_atoms(&self, goal: &Goal) -> Vec<TermId> {
        let mut interpreted = Vec::default();
        let mut seen = FxHashSet::default();
        let mut todo = goal.iter().map(|(formula, _)| formula).collect::<Vec<_>>();

        while let Some(term) = todo.pop() {
            if !seen.insert(term) {
                continue;
            }
            let args = self.tm.args(term);
            match self.tm.op(term) {
                Op::Not | Op::And | Op::Or | Op::Implies | Op::Xor => todo.extend_from_slice(args),

                Op::Eq | Op::Ite if self.tm.is_bool(args[args.len() - 1]) => {
                    todo.extend_from_slice(args)
                }

                Op::Eq | Op::Distinct | Op::BvUle | Op::BvUlt | Op::AtMost(_) | Op::AtLeast(_) => {
                    interpreted.push(term)
                }

                _ => {}
            }
        }

        interpreted
    }

    fn goal2sat(&mut self, goal: &Goal) {
        let mut occurrences: FxHashMap<TermId, usize> = FxHashMap::default();
        for (_, dependency) in goal.iter() {
            for leaf in dependency.leaves() {
                *occurrences.entry(*leaf).or_default() += 1;
            }
        }

        let shared: FxHashSet<TermId> = goal
            .iter()
            .filter(|(_, dependency)| dependency.leaves().len() > 1)
            .flat_map(|(_, dependency)| dependency.leaves().iter().copied())
            .collect();

        let mut used: FxHashSet<CLiteral> = self.dep2asm.iter().map(|(_, l)| l).collect();
        let mut defined = FxHashSet::default();
        let mut fresh = Vec::default();

        for (formula, dependency) in goal.iter() {
            if dependency.is_empty() {
                self.add_formula(formula, Vec::default());
                continue;
            }

            if let [leaf] = dependency.leaves() {
                if defined.contains(leaf) {
                    continue;
                }
                if occurrences.get(leaf) == Some(&1) && self.is_literal(formula) {
                    let literal = self.literal_of(formula);
                    if used.insert(literal) {
                        self.dep2asm.insert(*leaf, literal);
                        continue;
                    }
                }
            }

            let mut guards = Vec::with_capacity(dependency.leaves().len());
            for leaf in dependency.leaves() {
                let literal = match self.dep2asm.get(*leaf) {
                    Some(literal) => literal,
                    None => {
                        let (literal, reused) =
                            self.proxy_literal(*leaf, !shared.contains(leaf), &mut fresh);
                        if reused {
                            defined.insert(*leaf);
                        }
                        used.insert(literal);
                        self.dep2asm.insert(*leaf, literal);
                        literal
                    }
                };
                guards.push(literal.negate());
            }

            if let [leaf] = dependency.leaves() {
                if defined.contains(leaf) {
                    continue;
                }
            }
            self.add_formula(formula, guards);
        }

        if !defined.is_empty() {
            log::trace!(target: targets::INTERNALIZE, "{} dependency proxies reused", defined.len());
        }
        if !fresh.is_empty() {
            log::trace!(target: targets::INTERNALIZE, "{} dependency proxies", fresh.len());
            self.model_converter.push(ConverterStep::Filter(fresh));
        }
    }

    /// The literal of the proxy for an assumption term, and whether the proxy is already defined in the engine.
    ///
    /// A proxy which may not be reused is made for the call only.
    /// The declarations of new proxies are added to `fresh`.
    fn proxy_literal(
        &mut self,
        leaf: TermId,
        reusable: bool,
        fresh: &mut Vec<DeclId>,
    ) -> (CLiteral, bool) {
        let kept = match reusable {
            true => self.proxies.get(&leaf).copied(),
            false => None,
        };

        let proxy = match kept {
            Some(proxy) => {
                if let Some(atom) = self.atom_map.to_atom(proxy) {
                    return (CLiteral::new(atom, true), true);
                }
                proxy
            }

            None => {
                let proxy = self.tm.mk_fresh_const("dep", Sort::Bool);
                fresh.extend(self.tm.as_const(proxy));
                if reusable {
                    self.proxies.insert(leaf, proxy);
                }
                proxy
            }
        };

        (self.literal_of(proxy), false)
    }

    /// Whether a formula is a constant, or a negated constant.
    fn is_literal(&self, formula: TermId) -> bool {
        let atom = self.tm.negated(formula).unwrap_or(formula);
        matches!(self.tm.op(atom), Op::Const(_))
    }

    /// Adds a formula to the engine as a clause, extending the given clause.
    fn add_formula(&mut self, formula: TermId, mut clause: CClause) {
        match self.tm.op(formula) {
            Op::Or => {
                for arg in self.tm.args(formula).to_vec() {
                    let literal = self.literal_of(arg);
                    clause.push(literal);
                }
            }
            _ => {
                let literal = self.literal_of(formula);
                clause.push(literal);
            }
        }
        self.engine.add_clause(clause);
    }

    /// The literal of a boolean term, with any atom or definition made as needed.
    pub(crate) fn literal_of(&mut self, term: TermId) -> CLiteral {
        match self.tm.op(term) {
            Op::True => return self.engine.top(),
            Op::False => return self.engine.top().negate(),
            Op::Not => {
                let inner = self.tm.args(term)[0];
                return self.literal_of(inner).negate();
            }
            _ => {}
        }

        if let Some(atom) = self.atom_map.to_atom(term) {
            return CLiteral::new(atom, true);
        }

        let op = self.tm.op(term).clone();
        let args = self.tm.args(term).to_vec();
        let structured = match op {
            Op::And | Op::Or | Op::Implies | Op::Xor => true,
            Op::Eq | Op::Ite => self.tm.is_bool(args[args.len() - 1]),
            _ => false,
        };

        let literals = match structured {
            true => args
                .iter()
                .map(|arg| self.literal_of(*arg))
                .collect::<Vec<_>>(),
            false => Vec::default(),
        };

        let atom = self.engine.fresh_atom();
        self.atom_map.insert(term, atom);
        let v = CLiteral::new(atom, true);

        if structured {
            for clause in definition(&op, v, &literals) {
                self.engine.add_clause(clause);
            }
        }

        v
    }
}

/// Clauses defining `v` as the operator over the literals.
fn definition(op: &Op, v: CLiteral, literals: &[CLiteral]) -> Vec<CClause> {
    let not_v = v.negate();
    match op {
        Op::And => {
            let mut clauses = literals
                .iter()
                .map(|l| vec![not_v, *l])
                .collect::<Vec<_>>();
            let mut long = vec![v];
            long.extend(literals.iter().map(|l| l.negate()));
            clauses.push(long);
            clauses
        }

        Op::Or => {
            let mut clauses = literals
                .iter()
                .map(|l| vec![v, l.negate()])
                .collect::<Vec<_>>();
            let mut long = vec![not_v];
            long.extend(literals.iter().copied());
            clauses.push(long);
            clauses
        }

        Op::Implies => {
            let (a, b) = (literals[0], literals[1]);
            vec![vec![not_v, a.negate(), b], vec![v, a], vec![v, b.negate()]]
        }

        Op::Xor => {
            let (a, b) = (literals[0], literals[1]);
            vec![
                vec![not_v, a, b],
                vec![not_v, a.negate(), b.negate()],
                vec![v, a.negate(), b],
                vec![v, a, b.negate()],
            ]
        }

        Op::Eq => {
            let (a, b) = (literals[0], literals[1]);
            vec![
                vec![not_v, a.negate(), b],
                vec![not_v, a, b.negate()],
                vec![v, a, b],
                vec![v, a.negate(), b.negate()],
            ]
        }

        Op::Ite => {
            let (c, t, e) = (literals[0], literals[1], literals[2]);
            vec![
                vec![not_v, c.negate(), t],
                vec![not_v, c, e],
                vec![v, c.negate(), t.negate()],
                vec![v, c, e.negate()],
            ]
        }

        _ => Vec::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, context::Context, reports::Report};

    #[test]
    fn definitions_are_shared() {
        let mut ctx = Context::from_config(Config::default());
        let x = ctx.terms_mut().declare_const("x", Sort::Bool).unwrap();
        let y = ctx.terms_mut().declare_const("y", Sort::Bool).unwrap();
        let and = ctx.terms_mut().mk_and(&[x, y]).unwrap();
        let not_and = ctx.terms_mut().mk_not(and).unwrap();

        let a = ctx.literal_of(and);
        let b = ctx.literal_of(not_and);
        assert_eq!(a, b.negate());
        assert_eq!(ctx.atom_map.len(), 3);
    }

    #[test]
    fn proxies_are_reused() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();
        let q = ctx.terms_mut().declare_const("q", Sort::Bool).unwrap();
        let p_or_q = ctx.terms_mut().mk_or(&[p, q]).unwrap();

        assert_eq!(ctx.check(&[p_or_q]), Report::Satisfiable);
        let atoms = ctx.atom_map.len();
        let steps = ctx.model_converter.len();
        let engine_atoms = ctx.engine.atom_count();
        let clauses = ctx.statistics().get("sat clauses");

        for _ in 0..50 {
            assert_eq!(ctx.check(&[p_or_q]), Report::Satisfiable);
        }
        assert_eq!(ctx.proxies.len(), 1);
        assert_eq!(ctx.atom_map.len(), atoms);
        assert_eq!(ctx.model_converter.len(), steps);
        assert_eq!(ctx.engine.atom_count(), engine_atoms);
        assert_eq!(ctx.statistics().get("sat clauses"), clauses);
    }

    #[test]
    fn popped_proxies_are_defined_again() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();
        let q = ctx.terms_mut().declare_const("q", Sort::Bool).unwrap();
        let p_or_q = ctx.terms_mut().mk_or(&[p, q]).unwrap();
        let neither = ctx.terms_mut().mk_not(p_or_q).unwrap();

        ctx.push();
        assert_eq!(ctx.check(&[p_or_q]), Report::Satisfiable);
        let steps = ctx.model_converter.len();
        ctx.pop(1);

        ctx.assert_term(neither).unwrap();
        assert_eq!(ctx.check(&[p_or_q]), Report::Unsatisfiable);
        assert_eq!(ctx.unsat_core(), &[p_or_q]);
        assert_eq!(ctx.proxies.len(), 1);
        assert_eq!(ctx.model_converter.len(), steps);
    }

    #[test]
    fn truth_is_top() {
        let mut ctx = Context::from_config(Config::default());
        let t = ctx.terms().mk_true();
        let f = ctx.terms().mk_false();
        assert_eq!(ctx.literal_of(t), ctx.engine.top());
        assert_eq!(ctx.literal_of(f), ctx.engine.top().negate());
    }
}
