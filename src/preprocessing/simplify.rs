/*!
A bottom-up rewriter of terms.

Each subterm is simplified once per application, with results cached by term, and each simplification counts as a step.
An application which takes more than [max_steps](SimplifyConfig::max_steps) steps fails with [TacticError::StepLimit].

Rewrites are governed by a [SimplifyConfig]:
- Boolean structure is folded throughout, and with `flat` nested conjunctions, disjunctions and associative bit-vector operators are flattened.
- With `local_ctx`, the literal arguments of a conjunction (disjunction) are taken to be true (false) when simplifying the other arguments.
- With `elim_and`, conjunctions are written as negated disjunctions.
- With `som`, bit-vector sums are normalised to a sum of monomials, each a product with a numeral coefficient, ordered by term.
  Products of a numeral and a sum are distributed.
- With `pull_cheap_ite`, a predicate over an if-then-else with numeral branches and a numeral is pulled into the if-then-else, where it folds.
- With `push_ite_bv`, a binary bit-vector operation over an if-then-else with numeral branches and a numeral is pushed into the branches.
- With `hoist_mul`, a factor common to each product of a sum is hoisted out of the sum.
- With `blast_distinct`, `distinct` is expanded to pairwise disequalities.
*/

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;

use super::tactic::{rewrite_goal, Tactic, TacticContext};
use crate::{
    config::SimplifyConfig,
    misc::log::targets::{self},
    reports::Statistics,
    structures::{
        goal::Goal,
        term::{Op, TermId, TermManager},
    },
    types::err::{ConfigError, TacticError},
};

pub struct Simplifier {
    config: SimplifyConfig,
    cache: FxHashMap<TermId, TermId>,
    steps: usize,
    total_steps: u64,
}

impl Simplifier {
    /// A simplifier with the given flags, if the flags are compatible.
    pub fn new(config: SimplifyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Simplifier {
            config,
            cache: FxHashMap::default(),
            steps: 0,
            total_steps: 0,
        })
    }

    pub fn config(&self) -> &SimplifyConfig {
        &self.config
    }

    /// Simplifies a term, and each of its subterms.
    pub fn simplify(&mut self, tm: &mut TermManager, term: TermId) -> Result<TermId, TacticError> {
        if let Some(done) = self.cache.get(&term) {
            return Ok(*done);
        }

        self.steps += 1;
        if self.steps > self.config.max_steps {
            log::info!(target: targets::PREPROCESSING, "Simplifier exceeded {} steps", self.config.max_steps);
            return Err(TacticError::StepLimit(self.config.max_steps));
        }

        let original = tm.args(term).to_vec();
        let mut args = Vec::with_capacity(original.len());
        for arg in &original {
            args.push(self.simplify(tm, *arg)?);
        }

        let op = tm.op(term).clone();
        let result = match op {
            Op::True | Op::False | Op::Const(_) | Op::Numeral(..) => term,

            Op::App(_) | Op::AtMost(_) | Op::AtLeast(_) => match args == original {
                true => term,
                false => tm.mk(op, args),
            },

            Op::Not => tm.fold_not(args[0]),

            Op::And => self.reduce_and(tm, args)?,

            Op::Or => self.reduce_or(tm, args)?,

            Op::Implies => {
                let premise = tm.fold_not(args[0]);
                self.reduce_or(tm, vec![premise, args[1]])?
            }

            Op::Xor => tm.fold_xor(args[0], args[1]),

            Op::Eq => self.reduce_eq(tm, args[0], args[1]),

            Op::Distinct => self.reduce_distinct(tm, args)?,

            Op::Ite => tm.fold_ite(args[0], args[1], args[2]),

            Op::BvNot => reduce_bv_not(tm, args[0]),

            Op::BvAnd | Op::BvOr | Op::BvXor | Op::BvAdd | Op::BvMul => {
                let width = width_of(tm, term);
                let pushed = match self.config.push_ite_bv {
                    true => self.push_ite(tm, &op, &args, width),
                    false => None,
                };
                match pushed {
                    Some(pushed) => pushed,
                    None => self.reduce_bv(tm, op, args, width),
                }
            }

            Op::BvUle | Op::BvUlt => self.reduce_compare(tm, op, args[0], args[1]),
        };

        self.cache.insert(term, result);
        Ok(result)
    }

    /// The arguments, with any argument of the same operator replaced by its arguments.
    fn flatten(&self, tm: &mut TermManager, op: &Op, args: Vec<TermId>) -> Vec<TermId> {
        if !self.config.flat {
            return args;
        }
        let mut flat = Vec::with_capacity(args.len());
        for arg in args {
            if tm.op(arg) == op {
                flat.extend_from_slice(tm.args(arg));
            } else if self.config.elim_and && *op == Op::And && is_eliminated_and(tm, arg) {
                let disjunction = tm.args(arg)[0];
                for disjunct in tm.args(disjunction).to_vec() {
                    flat.push(tm.fold_not(disjunct));
                }
            } else {
                flat.push(arg);
            }
        }
        flat
    }

    fn reduce_and(&mut self, tm: &mut TermManager, args: Vec<TermId>) -> Result<TermId, TacticError> {
        let args = self.flatten(tm, &Op::And, args);
        let args = self.contextual(tm, args, true)?;
        let conjunction = tm.fold_and(args);

        if self.config.elim_and && tm.op(conjunction) == &Op::And {
            let negations = tm
                .args(conjunction)
                .to_vec()
                .into_iter()
                .map(|conjunct| tm.fold_not(conjunct))
                .collect::<Vec<_>>();
            let disjunction = tm.mk(Op::Or, negations);
            return Ok(tm.mk(Op::Not, vec![disjunction]));
        }
        Ok(conjunction)
    }

    fn reduce_or(&mut self, tm: &mut TermManager, args: Vec<TermId>) -> Result<TermId, TacticError> {
        let args = self.flatten(tm, &Op::Or, args);
        let args = self.contextual(tm, args, false)?;
        Ok(tm.fold_or(args))
    }

    /// Simplifies the non-literal arguments of a junction under the literal arguments.
    fn contextual(
        &mut self,
        tm: &mut TermManager,
        args: Vec<TermId>,
        conjunctive: bool,
    ) -> Result<Vec<TermId>, TacticError> {
        if !self.config.local_ctx || args.len() < 2 {
            return Ok(args);
        }

        let mut facts = FxHashMap::default();
        for arg in &args {
            let Some((atom, polarity)) = as_literal(tm, *arg) else {
                continue;
            };
            let value = polarity == conjunctive;
            if facts.insert(atom, value) == Some(!value) {
                // complementary literals, and the junction folds
                return Ok(args);
            }
        }
        if facts.is_empty() {
            return Ok(args);
        }

        let mut result = Vec::with_capacity(args.len());
        for arg in args {
            if as_literal(tm, arg).is_some() {
                result.push(arg);
                continue;
            }
            let mut budget = self.config.local_ctx_limit;
            let mut memo = FxHashMap::default();
            match substitute(tm, arg, &facts, &mut budget, &mut memo) {
                Some(substituted) if substituted != arg => {
                    result.push(self.simplify(tm, substituted)?);
                }
                Some(_) => result.push(arg),
                None => {
                    log::trace!(target: targets::PREPROCESSING, "Local context limit reached");
                    result.push(arg);
                }
            }
        }
        Ok(result)
    }

    fn reduce_eq(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> TermId {
        if tm.is_bool(a) {
            return tm.fold_iff(a, b);
        }
        if a == b {
            return tm.mk_true();
        }
        if let (Some((x, _)), Some((y, _))) = (tm.as_numeral(a), tm.as_numeral(b)) {
            let equal = x == y;
            return tm.mk_bool(equal);
        }
        if self.config.pull_cheap_ite {
            if let Some(pulled) = pull_ite(tm, &Op::Eq, a, b) {
                return pulled;
            }
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        tm.mk(Op::Eq, vec![a, b])
    }

    fn reduce_distinct(
        &mut self,
        tm: &mut TermManager,
        args: Vec<TermId>,
    ) -> Result<TermId, TacticError> {
        let mut sorted = args.clone();
        sorted.sort();
        sorted.dedup();
        if sorted.len() < args.len() {
            return Ok(tm.mk_false());
        }

        if !self.config.blast_distinct {
            return Ok(tm.mk(Op::Distinct, args));
        }

        let mut disequalities = Vec::default();
        for (index, a) in args.iter().enumerate() {
            for b in &args[index + 1..] {
                let equality = self.reduce_eq(tm, *a, *b);
                disequalities.push(tm.fold_not(equality));
            }
        }
        self.reduce_and(tm, disequalities)
    }

    fn reduce_compare(&mut self, tm: &mut TermManager, op: Op, a: TermId, b: TermId) -> TermId {
        if let (Some((x, _)), Some((y, _))) = (tm.as_numeral(a), tm.as_numeral(b)) {
            let holds = compare(&op, x, y);
            return tm.mk_bool(holds);
        }
        if a == b {
            return tm.mk_bool(op == Op::BvUle);
        }
        if self.config.pull_cheap_ite {
            if let Some(pulled) = pull_ite(tm, &op, a, b) {
                return pulled;
            }
        }

        let mask = mask(width_of(tm, a));
        match op {
            Op::BvUle if is_numeral(tm, a, &BigUint::zero()) || is_numeral(tm, b, &mask) => {
                tm.mk_true()
            }
            Op::BvUlt if is_numeral(tm, b, &BigUint::zero()) || is_numeral(tm, a, &mask) => {
                tm.mk_false()
            }
            _ => tm.mk(op, vec![a, b]),
        }
    }

    fn reduce_bv(&mut self, tm: &mut TermManager, op: Op, args: Vec<TermId>, width: u32) -> TermId {
        match op {
            Op::BvAdd => self.reduce_add(tm, args, width),
            Op::BvMul => self.reduce_mul(tm, args, width),
            _ => self.reduce_bitwise(tm, op, args, width),
        }
    }

    fn reduce_bitwise(&mut self, tm: &mut TermManager, op: Op, args: Vec<TermId>, width: u32) -> TermId {
        let args = self.flatten(tm, &op, args);
        let mask = mask(width);

        let mut constant: Option<BigUint> = None;
        let mut rest = Vec::with_capacity(args.len());
        for arg in args {
            match tm.as_numeral(arg) {
                Some((value, _)) => {
                    let value = value.clone();
                    constant = Some(match constant.take() {
                        None => value,
                        Some(c) => match op {
                            Op::BvAnd => c & value,
                            Op::BvOr => c | value,
                            _ => c ^ value,
                        },
                    });
                }
                None => rest.push(arg),
            }
        }

        rest.sort();
        if op == Op::BvXor {
            let mut kept: Vec<TermId> = Vec::with_capacity(rest.len());
            for arg in rest {
                if kept.last() == Some(&arg) {
                    kept.pop();
                } else {
                    kept.push(arg);
                }
            }
            rest = kept;
        } else {
            rest.dedup();
        }

        let (dominant, neutral) = match op {
            Op::BvAnd => (Some(BigUint::zero()), mask),
            Op::BvOr => (Some(mask), BigUint::zero()),
            _ => (None, BigUint::zero()),
        };

        if let Some(c) = &constant {
            if Some(c) == dominant.as_ref() {
                return tm.mk_numeral_unchecked(c, width);
            }
            if *c == neutral {
                constant = None;
            }
        }

        let mut parts = Vec::with_capacity(rest.len() + 1);
        if let Some(c) = constant {
            parts.push(tm.mk_numeral_unchecked(&c, width));
        }
        parts.extend(rest);

        match parts.len() {
            0 => tm.mk_numeral_unchecked(&neutral, width),
            1 => parts[0],
            _ => tm.mk(op, parts),
        }
    }

    fn reduce_add(&mut self, tm: &mut TermManager, args: Vec<TermId>, width: u32) -> TermId {
        let args = self.flatten(tm, &Op::BvAdd, args);
        let modulus = BigUint::one() << width;

        let mut constant = BigUint::zero();
        let mut parts = Vec::with_capacity(args.len());

        if self.config.som {
            let mut coefficients: BTreeMap<TermId, BigUint> = BTreeMap::default();
            for arg in args {
                match monomial(tm, arg) {
                    (c, None) => constant += c,
                    (c, Some(m)) => *coefficients.entry(m).or_default() += c,
                }
            }

            for (m, c) in coefficients {
                let c = c % &modulus;
                if c.is_zero() {
                    continue;
                }
                if c.is_one() {
                    parts.push(m);
                    continue;
                }
                let mut factors = vec![tm.mk_numeral_unchecked(&c, width)];
                match tm.op(m) {
                    Op::BvMul => factors.extend_from_slice(tm.args(m)),
                    _ => factors.push(m),
                }
                parts.push(tm.mk(Op::BvMul, factors));
            }
        } else {
            for arg in args {
                match tm.as_numeral(arg) {
                    Some((value, _)) => constant += value,
                    None => parts.push(arg),
                }
            }
            parts.sort();

            if self.config.hoist_mul && constant.is_zero() {
                if let Some(hoisted) = self.hoist(tm, &parts, width) {
                    return hoisted;
                }
            }
        }

        let constant = constant % &modulus;
        if !constant.is_zero() {
            parts.insert(0, tm.mk_numeral_unchecked(&constant, width));
        }

        match parts.len() {
            0 => tm.mk_numeral_unchecked(&BigUint::zero(), width),
            1 => parts[0],
            _ => tm.mk(Op::BvAdd, parts),
        }
    }

    fn reduce_mul(&mut self, tm: &mut TermManager, args: Vec<TermId>, width: u32) -> TermId {
        let args = self.flatten(tm, &Op::BvMul, args);
        let modulus = BigUint::one() << width;

        let mut constant = BigUint::one();
        let mut rest = Vec::with_capacity(args.len());
        for arg in args {
            match tm.as_numeral(arg) {
                Some((value, _)) => constant = (constant * value) % &modulus,
                None => rest.push(arg),
            }
        }

        if constant.is_zero() || rest.is_empty() {
            return tm.mk_numeral_unchecked(&constant, width);
        }
        rest.sort();

        if self.config.som && rest.len() == 1 && !constant.is_one() && tm.op(rest[0]) == &Op::BvAdd {
            let coefficient = tm.mk_numeral_unchecked(&constant, width);
            let summands = tm
                .args(rest[0])
                .to_vec()
                .into_iter()
                .map(|summand| self.reduce_mul(tm, vec![coefficient, summand], width))
                .collect();
            return self.reduce_add(tm, summands, width);
        }

        let mut factors = Vec::with_capacity(rest.len() + 1);
        if !constant.is_one() {
            factors.push(tm.mk_numeral_unchecked(&constant, width));
        }
        factors.extend(rest);

        match factors.len() {
            1 => factors[0],
            _ => tm.mk(Op::BvMul, factors),
        }
    }

    /// `f·a + f·b` as `f·(a + b)`, if every summand is a product with the factor `f`.
    fn hoist(&mut self, tm: &mut TermManager, summands: &[TermId], width: u32) -> Option<TermId> {
        if summands.len() < 2 || summands.iter().any(|s| tm.op(*s) != &Op::BvMul) {
            return None;
        }

        let factor = tm
            .args(summands[0])
            .iter()
            .copied()
            .find(|f| {
                tm.as_numeral(*f).is_none()
                    && summands[1..].iter().all(|s| tm.args(*s).contains(f))
            })?;

        let remainders = summands
            .iter()
            .map(|summand| {
                let mut rest = tm.args(*summand).to_vec();
                if let Some(position) = rest.iter().position(|a| *a == factor) {
                    rest.remove(position);
                }
                match rest.len() {
                    1 => rest[0],
                    _ => tm.mk(Op::BvMul, rest),
                }
            })
            .collect();

        let sum = self.reduce_add(tm, remainders, width);
        Some(self.reduce_mul(tm, vec![factor, sum], width))
    }

    /// `op(ite(c, n1, n2), n)` as `ite(c, op(n1, n), op(n2, n))`, for numerals.
    fn push_ite(&mut self, tm: &mut TermManager, op: &Op, args: &[TermId], width: u32) -> Option<TermId> {
        if args.len() != 2 {
            return None;
        }
        let (ite, other, ite_first) = match (tm.op(args[0]), tm.op(args[1])) {
            (Op::Ite, _) => (args[0], args[1], true),
            (_, Op::Ite) => (args[1], args[0], false),
            _ => return None,
        };
        tm.as_numeral(other)?;
        let ite_args = tm.args(ite).to_vec();
        tm.as_numeral(ite_args[1])?;
        tm.as_numeral(ite_args[2])?;

        let order = |branch: TermId| match ite_first {
            true => vec![branch, other],
            false => vec![other, branch],
        };
        let then = self.reduce_bv(tm, op.clone(), order(ite_args[1]), width);
        let otherwise = self.reduce_bv(tm, op.clone(), order(ite_args[2]), width);
        Some(tm.fold_ite(ite_args[0], then, otherwise))
    }
}

impl Tactic for Simplifier {
    fn name(&self) -> &'static str {
        "simplify"
    }

    fn apply(&mut self, goal: Goal, ctx: &mut TacticContext) -> Result<Vec<Goal>, TacticError> {
        self.steps = 0;
        let goal = rewrite_goal(goal, ctx.tm, |tm, formula| self.simplify(tm, formula))?;
        self.total_steps += self.steps as u64;
        Ok(vec![goal])
    }

    fn reset(&mut self) {
        self.cache.clear();
    }

    fn collect_statistics(&self, stats: &mut Statistics) {
        stats.update("simplifier steps", self.total_steps);
    }
}

fn width_of(tm: &TermManager, term: TermId) -> u32 {
    tm.sort(term).width().unwrap_or_default()
}

fn mask(width: u32) -> BigUint {
    (BigUint::one() << width) - BigUint::one()
}

fn is_numeral(tm: &TermManager, term: TermId, value: &BigUint) -> bool {
    matches!(tm.as_numeral(term), Some((v, _)) if v == value)
}

fn compare(op: &Op, x: &BigUint, y: &BigUint) -> bool {
    match op {
        Op::BvUle => x <= y,
        Op::BvUlt => x < y,
        _ => x == y,
    }
}

/// The result of elim_and, a negated disjunction.
fn is_eliminated_and(tm: &TermManager, term: TermId) -> bool {
    match tm.negated(term) {
        Some(inner) => tm.op(inner) == &Op::Or,
        None => false,
    }
}

/// The atom and polarity of a literal, where an atom is an uninterpreted boolean.
fn as_literal(tm: &TermManager, term: TermId) -> Option<(TermId, bool)> {
    let (atom, polarity) = match tm.negated(term) {
        Some(inner) => (inner, false),
        None => (term, true),
    };
    match tm.is_bool(atom) && tm.is_uninterpreted(atom) {
        true => Some((atom, polarity)),
        false => None,
    }
}

/// Replaces the atoms of `facts` with their values, or `None` if more than `budget` nodes would be visited.
fn substitute(
    tm: &mut TermManager,
    term: TermId,
    facts: &FxHashMap<TermId, bool>,
    budget: &mut usize,
    memo: &mut FxHashMap<TermId, TermId>,
) -> Option<TermId> {
    if let Some(done) = memo.get(&term) {
        return Some(*done);
    }
    if *budget == 0 {
        return None;
    }
    *budget -= 1;

    let result = match facts.get(&term) {
        Some(value) => tm.mk_bool(*value),
        None => {
            let args = tm.args(term).to_vec();
            let mut changed = false;
            let mut replaced = Vec::with_capacity(args.len());
            for arg in args {
                let substituted = substitute(tm, arg, facts, budget, memo)?;
                changed |= substituted != arg;
                replaced.push(substituted);
            }
            match changed {
                true => {
                    let op = tm.op(term).clone();
                    tm.mk(op, replaced)
                }
                false => term,
            }
        }
    };

    memo.insert(term, result);
    Some(result)
}

/// The coefficient and the remaining product of a summand, with `None` for a numeral.
fn monomial(tm: &mut TermManager, term: TermId) -> (BigUint, Option<TermId>) {
    if let Some((value, _)) = tm.as_numeral(term) {
        return (value.clone(), None);
    }
    if tm.op(term) == &Op::BvMul {
        let args = tm.args(term).to_vec();
        if let Some((c, _)) = tm.as_numeral(args[0]) {
            let c = c.clone();
            let rest = match args.len() {
                2 => args[1],
                _ => tm.mk(Op::BvMul, args[1..].to_vec()),
            };
            return (c, Some(rest));
        }
    }
    (BigUint::one(), Some(term))
}

/// `op(ite(c, n1, n2), n)` as `ite(c, op(n1, n), op(n2, n))`, for a predicate and numerals.
fn pull_ite(tm: &mut TermManager, op: &Op, a: TermId, b: TermId) -> Option<TermId> {
    let (ite, other, ite_left) = match (tm.op(a), tm.op(b)) {
        (Op::Ite, _) => (a, b, true),
        (_, Op::Ite) => (b, a, false),
        _ => return None,
    };
    let value = tm.as_numeral(other)?.0.clone();
    let ite_args = tm.args(ite).to_vec();
    let then = tm.as_numeral(ite_args[1])?.0.clone();
    let otherwise = tm.as_numeral(ite_args[2])?.0.clone();

    let holds = |branch: &BigUint| match ite_left {
        true => compare(op, branch, &value),
        false => compare(op, &value, branch),
    };
    let (t, e) = (tm.mk_bool(holds(&then)), tm.mk_bool(holds(&otherwise)));
    Some(tm.fold_ite(ite_args[0], t, e))
}

fn reduce_bv_not(tm: &mut TermManager, a: TermId) -> TermId {
    if let Some((value, width)) = tm.as_numeral(a) {
        let complement = mask(width) ^ value;
        return tm.mk_numeral_unchecked(&complement, width);
    }
    match tm.op(a) {
        Op::BvNot => tm.args(a)[0],
        _ => tm.mk(Op::BvNot, vec![a]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::Sort;

    fn pipeline() -> Simplifier {
        Simplifier::new(SimplifyConfig::pipeline(100_000, 1_000)).unwrap()
    }

    #[test]
    fn rejects_incompatible_flags() {
        let mut config = SimplifyConfig::pipeline(10, 10);
        config.hoist_mul = true;
        assert!(Simplifier::new(config).is_err());
    }

    #[test]
    fn sum_of_monomials() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::BitVec(4)).unwrap();
        let fifteen = tm.mk_numeral_u64(15, 4).unwrap();
        let two = tm.mk_numeral_u64(2, 4).unwrap();
        let mut simplifier = pipeline();

        let doubled = tm.mk_bv_add(&[x, x]).unwrap();
        let expected = tm.mk(Op::BvMul, vec![two, x]);
        assert_eq!(simplifier.simplify(&mut tm, doubled).unwrap(), expected);

        let product = tm.mk_bv_mul(&[fifteen, x]).unwrap();
        let cancelled = tm.mk_bv_add(&[x, product]).unwrap();
        let zero = tm.mk_numeral_u64(0, 4).unwrap();
        assert_eq!(simplifier.simplify(&mut tm, cancelled).unwrap(), zero);
    }

    #[test]
    fn distributes_numerals() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::BitVec(8)).unwrap();
        let y = tm.declare_const("y", Sort::BitVec(8)).unwrap();
        let three = tm.mk_numeral_u64(3, 8).unwrap();
        let sum = tm.mk_bv_add(&[x, y]).unwrap();
        let product = tm.mk_bv_mul(&[three, sum]).unwrap();

        let mut simplifier = pipeline();
        let result = simplifier.simplify(&mut tm, product).unwrap();
        assert_eq!(tm.op(result), &Op::BvAdd);
        assert!(tm.args(result).iter().all(|s| tm.op(*s) == &Op::BvMul));
    }

    #[test]
    fn local_context() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let y = tm.declare_const("y", Sort::Bool).unwrap();
        let not_x = tm.mk_not(x).unwrap();
        let clause = tm.mk_or(&[not_x, y]).unwrap();
        let formula = tm.mk_and(&[x, clause]).unwrap();

        let mut config = SimplifyConfig::default();
        config.local_ctx = true;
        let mut simplifier = Simplifier::new(config).unwrap();

        let result = simplifier.simplify(&mut tm, formula).unwrap();
        let expected = tm.mk_and(&[x, y]).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn eliminates_conjunctions() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let y = tm.declare_const("y", Sort::Bool).unwrap();
        let formula = tm.mk_and(&[x, y]).unwrap();

        let result = pipeline().simplify(&mut tm, formula).unwrap();
        let inner = tm.negated(result).unwrap();
        assert_eq!(tm.op(inner), &Op::Or);
    }

    #[test]
    fn pulls_cheap_ite() {
        let mut tm = TermManager::new();
        let c = tm.declare_const("c", Sort::Bool).unwrap();
        let one = tm.mk_numeral_u64(1, 4).unwrap();
        let two = tm.mk_numeral_u64(2, 4).unwrap();
        let ite = tm.mk_ite(c, one, two).unwrap();
        let formula = tm.mk_eq(ite, one).unwrap();

        assert_eq!(pipeline().simplify(&mut tm, formula).unwrap(), c);
    }

    #[test]
    fn blasts_distinct() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::BitVec(2)).unwrap();
        let y = tm.declare_const("y", Sort::BitVec(2)).unwrap();
        let formula = tm.mk_distinct(&[x, y]).unwrap();

        let result = pipeline().simplify(&mut tm, formula).unwrap();
        let inner = tm.negated(result).unwrap();
        assert_eq!(tm.op(inner), &Op::Eq);

        let repeated = tm.mk_distinct(&[x, y, x]).unwrap();
        assert_eq!(pipeline().simplify(&mut tm, repeated).unwrap(), tm.mk_false());
    }

    #[test]
    fn comparisons_fold() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::BitVec(3)).unwrap();
        let zero = tm.mk_numeral_u64(0, 3).unwrap();
        let seven = tm.mk_numeral_u64(7, 3).unwrap();
        let mut simplifier = pipeline();

        let below_max = tm.mk_bv_ule(x, seven).unwrap();
        assert_eq!(simplifier.simplify(&mut tm, below_max).unwrap(), tm.mk_true());

        let below_zero = tm.mk_bv_ult(x, zero).unwrap();
        assert_eq!(simplifier.simplify(&mut tm, below_zero).unwrap(), tm.mk_false());

        let numerals = tm.mk_bv_ult(zero, seven).unwrap();
        assert_eq!(simplifier.simplify(&mut tm, numerals).unwrap(), tm.mk_true());
    }

    #[test]
    fn step_limit() {
        let mut tm = TermManager::new();
        let xs: Vec<TermId> = (0..4)
            .map(|i| tm.declare_const(&format!("x{i}"), Sort::Bool).unwrap())
            .collect();
        let formula = tm.mk_or(&xs).unwrap();

        let mut simplifier = Simplifier::new(SimplifyConfig::pipeline(2, 10)).unwrap();
        assert_eq!(
            simplifier.simplify(&mut tm, formula),
            Err(TacticError::StepLimit(2))
        );
    }
}
