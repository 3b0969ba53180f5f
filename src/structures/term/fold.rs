//! Constructors which fold constants and trivial structure, for use by tactics.
//!
//! These assume well-sorted arguments.

use rustc_hash::FxHashSet;

use super::{Op, TermId, TermManager};

impl TermManager {
    /// The argument of a negation.
    pub(crate) fn negated(&self, id: TermId) -> Option<TermId> {
        match self.op(id) {
            Op::Not => Some(self.args(id)[0]),
            _ => None,
        }
    }

    pub(crate) fn fold_not(&mut self, a: TermId) -> TermId {
        match self.op(a) {
            Op::True => self.mk_false(),
            Op::False => self.mk_true(),
            Op::Not => self.args(a)[0],
            _ => self.mk(Op::Not, vec![a]),
        }
    }

    /// A conjunction (`dominant` false) or disjunction (`dominant` true) without neutral elements, duplicates, or complementary pairs.
    fn fold_junction(&mut self, op: Op, dominant: bool, args: Vec<TermId>) -> TermId {
        let dominant_term = self.mk_bool(dominant);
        let neutral_term = self.mk_bool(!dominant);

        let mut seen = FxHashSet::default();
        let mut kept = Vec::with_capacity(args.len());
        for arg in args {
            if arg == dominant_term {
                return dominant_term;
            }
            if arg == neutral_term || !seen.insert(arg) {
                continue;
            }
            kept.push(arg);
        }

        for arg in &kept {
            if let Some(inner) = self.negated(*arg) {
                if seen.contains(&inner) {
                    return dominant_term;
                }
            }
        }

        match kept.len() {
            0 => neutral_term,
            1 => kept[0],
            _ => self.mk(op, kept),
        }
    }

    pub(crate) fn fold_and(&mut self, args: Vec<TermId>) -> TermId {
        self.fold_junction(Op::And, false, args)
    }

    pub(crate) fn fold_or(&mut self, args: Vec<TermId>) -> TermId {
        self.fold_junction(Op::Or, true, args)
    }

    /// Bi-implication of two boolean terms.
    pub(crate) fn fold_iff(&mut self, a: TermId, b: TermId) -> TermId {
        if a == b {
            return self.mk_true();
        }
        if self.negated(a) == Some(b) || self.negated(b) == Some(a) {
            return self.mk_false();
        }
        match (self.op(a), self.op(b)) {
            (Op::True, _) => b,
            (_, Op::True) => a,
            (Op::False, _) => self.fold_not(b),
            (_, Op::False) => self.fold_not(a),
            _ => {
                let (a, b) = if a < b { (a, b) } else { (b, a) };
                self.mk(Op::Eq, vec![a, b])
            }
        }
    }

    /// Exclusive disjunction of two boolean terms.
    pub(crate) fn fold_xor(&mut self, a: TermId, b: TermId) -> TermId {
        if a == b {
            return self.mk_false();
        }
        if self.negated(a) == Some(b) || self.negated(b) == Some(a) {
            return self.mk_true();
        }
        match (self.op(a), self.op(b)) {
            (Op::False, _) => b,
            (_, Op::False) => a,
            (Op::True, _) => self.fold_not(b),
            (_, Op::True) => self.fold_not(a),
            _ => {
                let (a, b) = if a < b { (a, b) } else { (b, a) };
                self.mk(Op::Xor, vec![a, b])
            }
        }
    }

    /// If-then-else, of any sort.
    pub(crate) fn fold_ite(&mut self, c: TermId, t: TermId, e: TermId) -> TermId {
        match self.op(c) {
            Op::True => return t,
            Op::False => return e,
            _ => {}
        }
        if t == e {
            return t;
        }
        if let Some(inner) = self.negated(c) {
            return self.fold_ite(inner, e, t);
        }
        if !self.is_bool(t) {
            return self.mk(Op::Ite, vec![c, t, e]);
        }

        match (self.op(t), self.op(e)) {
            (Op::True, Op::False) => c,
            (Op::False, Op::True) => self.fold_not(c),
            (Op::True, _) => self.fold_or(vec![c, e]),
            (Op::False, _) => {
                let not_c = self.fold_not(c);
                self.fold_and(vec![not_c, e])
            }
            (_, Op::True) => {
                let not_c = self.fold_not(c);
                self.fold_or(vec![not_c, t])
            }
            (_, Op::False) => self.fold_and(vec![c, t]),
            _ => self.mk(Op::Ite, vec![c, t, e]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::Sort;

    #[test]
    fn junctions() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let y = tm.declare_const("y", Sort::Bool).unwrap();
        let not_x = tm.fold_not(x);
        let t = tm.mk_true();
        let f = tm.mk_false();

        assert_eq!(tm.fold_and(vec![x, t, x]), x);
        assert_eq!(tm.fold_and(vec![x, not_x, y]), f);
        assert_eq!(tm.fold_or(vec![x, not_x]), t);
        assert_eq!(tm.fold_or(vec![]), f);
        assert_eq!(tm.fold_not(not_x), x);
    }

    #[test]
    fn ite() {
        let mut tm = TermManager::new();
        let c = tm.declare_const("c", Sort::Bool).unwrap();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let t = tm.mk_true();
        let f = tm.mk_false();

        assert_eq!(tm.fold_ite(c, t, f), c);
        assert_eq!(tm.fold_ite(t, x, c), x);
        let and = tm.fold_ite(c, x, f);
        assert_eq!(tm.op(and), &Op::And);
    }

    #[test]
    fn iff_and_xor() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let t = tm.mk_true();
        let f = tm.mk_false();
        let not_x = tm.fold_not(x);

        assert_eq!(tm.fold_iff(x, t), x);
        assert_eq!(tm.fold_iff(x, f), not_x);
        assert_eq!(tm.fold_xor(x, t), not_x);
        assert_eq!(tm.fold_xor(x, not_x), t);
        assert_eq!(tm.fold_iff(x, x), t);
    }
}
