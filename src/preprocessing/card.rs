/*!
Elimination of cardinality constraints, by bit-vector arithmetic.

A constraint over `n` boolean terms is rewritten to a comparison of a bound with the sum of `ite(x, 1, 0)` over the terms, at a width sufficient to represent `n`.

Trivial constraints are decided outright:
- `at-most k` with `k ≥ n` is `true`, and `at-most 0` is the conjunction of negations.
- `at-least 0` is `true`, `at-least k` with `k > n` is `false`, and `at-least n` is the conjunction.
*/

use num_bigint::BigUint;
use rustc_hash::FxHashMap;

use super::tactic::{rewrite_goal, Tactic, TacticContext};
use crate::{
    misc::log::targets::{self},
    reports::Statistics,
    structures::{
        goal::Goal,
        term::{Op, TermId, TermManager},
    },
    types::err::TacticError,
};

#[derive(Default)]
pub struct CardToBv {
    cache: FxHashMap<TermId, TermId>,
    converted: u64,
}

impl CardToBv {
    fn rewrite(&mut self, tm: &mut TermManager, term: TermId) -> TermId {
        if let Some(rewritten) = self.cache.get(&term) {
            return *rewritten;
        }

        let original_args = tm.args(term).to_vec();
        let args = original_args
            .iter()
            .map(|arg| self.rewrite(tm, *arg))
            .collect::<Vec<_>>();

        let rewritten = match tm.op(term).clone() {
            Op::AtMost(k) => self.encode(tm, k, &args, true),
            Op::AtLeast(k) => self.encode(tm, k, &args, false),
            op if args != original_args => tm.mk(op, args),
            _ => term,
        };

        self.cache.insert(term, rewritten);
        rewritten
    }

    fn encode(&mut self, tm: &mut TermManager, k: u32, args: &[TermId], at_most: bool) -> TermId {
        let n = args.len() as u64;
        let k = k as u64;

        match at_most {
            true if k >= n => return tm.mk_true(),
            true if k == 0 => {
                let negations = args.iter().map(|a| tm.fold_not(*a)).collect();
                return tm.fold_and(negations);
            }
            false if k == 0 => return tm.mk_true(),
            false if k > n => return tm.mk_false(),
            false if k == n => return tm.fold_and(args.to_vec()),
            _ => {}
        }

        self.converted += 1;

        let width = u64::BITS - n.leading_zeros();
        let one = tm.mk_numeral_unchecked(&BigUint::from(1_u32), width);
        let zero = tm.mk_numeral_unchecked(&BigUint::from(0_u32), width);
        let bound = tm.mk_numeral_unchecked(&BigUint::from(k), width);

        let summands = args
            .iter()
            .map(|arg| tm.fold_ite(*arg, one, zero))
            .collect::<Vec<_>>();
        let sum = tm.mk(Op::BvAdd, summands);

        log::trace!(target: targets::PREPROCESSING, "Cardinality over {n} terms at width {width}");

        match at_most {
            true => tm.mk(Op::BvUle, vec![sum, bound]),
            false => tm.mk(Op::BvUle, vec![bound, sum]),
        }
    }
}

impl Tactic for CardToBv {
    fn name(&self) -> &'static str {
        "card2bv"
    }

    fn apply(&mut self, goal: Goal, ctx: &mut TacticContext) -> Result<Vec<Goal>, TacticError> {
        let goal = rewrite_goal(goal, ctx.tm, |tm, formula| Ok(self.rewrite(tm, formula)))?;
        Ok(vec![goal])
    }

    fn reset(&mut self) {
        self.cache.clear();
    }

    fn collect_statistics(&self, stats: &mut Statistics) {
        stats.update("card2bv constraints", self.converted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::Sort;

    #[test]
    fn encodes_to_comparison() {
        let mut tm = TermManager::new();
        let xs: Vec<TermId> = (0..3)
            .map(|i| tm.declare_const(&format!("x{i}"), Sort::Bool).unwrap())
            .collect();
        let at_most = tm.mk_at_most(1, &xs).unwrap();

        let mut card = CardToBv::default();
        let rewritten = card.rewrite(&mut tm, at_most);
        assert_eq!(tm.op(rewritten), &Op::BvUle);
        assert_eq!(tm.sort(tm.args(rewritten)[0]), Sort::BitVec(2));
    }

    #[test]
    fn trivial_bounds() {
        let mut tm = TermManager::new();
        let xs: Vec<TermId> = (0..2)
            .map(|i| tm.declare_const(&format!("x{i}"), Sort::Bool).unwrap())
            .collect();
        let mut card = CardToBv::default();

        let loose = tm.mk_at_most(2, &xs).unwrap();
        assert_eq!(card.rewrite(&mut tm, loose), tm.mk_true());

        let impossible = tm.mk_at_least(3, &xs).unwrap();
        assert_eq!(card.rewrite(&mut tm, impossible), tm.mk_false());

        let all = tm.mk_at_least(2, &xs).unwrap();
        let conjunction = card.rewrite(&mut tm, all);
        assert_eq!(tm.op(conjunction), &Op::And);
    }
}
