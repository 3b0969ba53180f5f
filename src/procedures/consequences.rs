/*!
Fixed consequences of assumptions, over terms.

Assumptions are lowered as for a [query](crate::procedures::check), and each variable of interest is [resolved](GenericContext::resolve_var) to atoms of the engine.
The engine then gives a clause for each atom fixed by the assumptions, with the fixed literal first and the premises (assumption literals) after.

A variable is a consequence only if each of its atoms is fixed:
- A boolean variable `x` is fixed to `x` or `(not x)`.
- A bit-vector variable `b` is fixed to `(= b n)`, with bit `i` of the numeral `n` set when the literal of bit `i` is positive.

The premises of every atom of a variable are read back to assumption terms through the inverse of the dependency map, and the consequence is `(=> p v)` for the conjunction `p` of the premises and the value `v`, or just `v` without premises.
Variables with no atom, or with some atom not fixed, are skipped without note.
*/

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;

use crate::{
    context::{GenericContext, ModelCache},
    engine::SatEngine,
    misc::log::targets::{self},
    procedures::internalize::VarShape,
    reports::Report,
    structures::{
        atom::Atom,
        clause::CClause,
        literal::{CLiteral, Literal},
        term::{Op, TermId},
    },
};

impl<E: SatEngine> GenericContext<E> {
    /// Consequences of the formulas and the assumptions among the variables, as implications over terms.
    pub fn consequences(
        &mut self,
        assumptions: &[TermId],
        vars: &[TermId],
    ) -> (Report, Vec<TermId>) {
        self.model = ModelCache::Absent;
        self.core.clear();
        self.engine.pop_to_base_level();

        let lowered = self
            .internalize_formulas()
            .and_then(|_| self.internalize_assumptions(assumptions, None));
        if let Err(e) = lowered {
            log::warn!(target: targets::CONSEQUENCES, "Consequences abandoned: {e}");
            self.reason_unknown = e.to_string();
            return (Report::Unknown, Vec::default());
        }

        let shapes = vars
            .iter()
            .map(|var| (*var, self.resolve_var(*var)))
            .collect::<Vec<_>>();

        let mut atoms: Vec<Atom> = Vec::default();
        for (_, shape) in &shapes {
            match shape {
                VarShape::Atom(atom) => atoms.push(*atom),
                VarShape::Bits(bits) => atoms.extend_from_slice(bits),
                VarShape::Unconstrained => {}
            }
        }

        let literals = std::mem::take(&mut self.assumption_literals);
        let (report, clauses) = self.engine.consequences(&literals, &atoms);
        self.assumption_literals = literals;

        match report {
            Report::Satisfiable => self.model = ModelCache::Pending,

            Report::Unsatisfiable => {
                self.extract_core();
                return (report, Vec::default());
            }

            Report::Unknown => {
                self.reason_unknown = self.engine.reason_unknown().to_string();
                return (report, Vec::default());
            }
        }

        let fixed: FxHashMap<Atom, CClause> = clauses
            .into_iter()
            .filter_map(|clause| Some((clause.first()?.atom(), clause)))
            .collect();
        let asm2dep = self.dep2asm.invert();

        let mut consequences = Vec::default();
        for (var, shape) in shapes {
            let atoms = match shape {
                VarShape::Atom(atom) => vec![atom],
                VarShape::Bits(bits) => bits,
                VarShape::Unconstrained => continue,
            };
            let Some(clauses) = atoms
                .iter()
                .map(|atom| fixed.get(atom))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };

            let value = self.fixed_value(var, &clauses);

            let mut premises: Vec<TermId> = Vec::default();
            for literal in clauses.iter().flat_map(|clause| clause.iter().skip(1)) {
                match asm2dep.get(literal) {
                    Some(term) if !premises.contains(term) => premises.push(*term),
                    Some(_) => {}
                    None => {
                        log::error!(target: targets::CONSEQUENCES, "Premise {literal} has no assumption");
                        panic!("! Premise {literal} has no assumption");
                    }
                }
            }

            let consequence = match premises.len() {
                0 => value,
                1 => self.tm.mk(Op::Implies, vec![premises[0], value]),
                _ => {
                    let conjunction = self.tm.mk(Op::And, premises);
                    self.tm.mk(Op::Implies, vec![conjunction, value])
                }
            };
            log::trace!(target: targets::CONSEQUENCES, "{}", self.tm.display(consequence));
            consequences.push(consequence);
        }

        (Report::Satisfiable, consequences)
    }

    /// The value a variable is fixed to, from clauses with the fixed literal of each atom first.
    fn fixed_value(&mut self, var: TermId, clauses: &[&CClause]) -> TermId {
        let heads = clauses
            .iter()
            .filter_map(|clause| clause.first().copied())
            .collect::<Vec<CLiteral>>();

        match self.tm.sort(var).width() {
            None => match heads.first().map(|l| l.polarity()) {
                Some(false) => self.tm.mk(Op::Not, vec![var]),
                _ => var,
            },

            Some(width) => {
                let mut value = BigUint::zero();
                for (position, head) in heads.iter().enumerate() {
                    if head.polarity() {
                        value |= BigUint::one() << position;
                    }
                }
                let numeral = self.tm.mk_numeral_unchecked(&value, width);
                self.tm.mk(Op::Eq, vec![var, numeral])
            }
        }
    }
}
