use num_bigint::BigUint;
use num_traits::One;
use rustc_hash::FxHashMap;

use super::{Decl, DeclId, Op, Sort, Term, TermId};
use crate::types::err::TermError;

/// A store of hash-consed terms and their declarations.
pub struct TermManager {
    terms: Vec<Term>,
    table: FxHashMap<(Op, Vec<TermId>), TermId>,
    decls: Vec<Decl>,
    names: FxHashMap<String, DeclId>,
    fresh_count: u32,
    true_term: TermId,
    false_term: TermId,
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TermManager {
    pub fn new() -> Self {
        let mut manager = TermManager {
            terms: Vec::default(),
            table: FxHashMap::default(),
            decls: Vec::default(),
            names: FxHashMap::default(),
            fresh_count: 0,
            true_term: TermId(0),
            false_term: TermId(0),
        };
        manager.true_term = manager.mk(Op::True, Vec::default());
        manager.false_term = manager.mk(Op::False, Vec::default());
        manager
    }

    /// A count of terms in the manager.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term(&self, id: TermId) -> &Term {
        &self.terms[id.index()]
    }

    pub fn op(&self, id: TermId) -> &Op {
        &self.terms[id.index()].op
    }

    pub fn args(&self, id: TermId) -> &[TermId] {
        &self.terms[id.index()].args
    }

    pub fn sort(&self, id: TermId) -> Sort {
        self.terms[id.index()].sort
    }

    pub fn is_bool(&self, id: TermId) -> bool {
        self.sort(id).is_bool()
    }

    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    /// The declaration with the given name, if any.
    pub fn find_decl(&self, name: &str) -> Option<DeclId> {
        self.names.get(name).copied()
    }

    /// The declaration of a constant term.
    pub fn as_const(&self, id: TermId) -> Option<DeclId> {
        match self.op(id) {
            Op::Const(decl) => Some(*decl),
            _ => None,
        }
    }

    pub fn mk_true(&self) -> TermId {
        self.true_term
    }

    pub fn mk_false(&self) -> TermId {
        self.false_term
    }

    pub fn mk_bool(&self, value: bool) -> TermId {
        match value {
            true => self.true_term,
            false => self.false_term,
        }
    }

    /// Makes (or finds) a term without checking sorts.
    ///
    /// The sort of the term is inferred from the operator and the first argument(s).
    pub(crate) fn mk(&mut self, op: Op, args: Vec<TermId>) -> TermId {
        let key = (op, args);
        if let Some(id) = self.table.get(&key) {
            return *id;
        }
        let (op, args) = key;

        let sort = match &op {
            Op::True
            | Op::False
            | Op::Not
            | Op::And
            | Op::Or
            | Op::Implies
            | Op::Xor
            | Op::Eq
            | Op::Distinct
            | Op::AtMost(_)
            | Op::AtLeast(_)
            | Op::BvUle
            | Op::BvUlt => Sort::Bool,

            Op::Const(decl) | Op::App(decl) => self.decls[decl.index()].range,

            Op::Ite => self.sort(args[1]),

            Op::Numeral(_, width) => Sort::BitVec(*width),

            Op::BvNot | Op::BvAnd | Op::BvOr | Op::BvXor | Op::BvAdd | Op::BvMul => {
                self.sort(args[0])
            }
        };

        let id = TermId(self.terms.len() as u32);
        self.terms.push(Term {
            op: op.clone(),
            args: args.clone(),
            sort,
        });
        self.table.insert((op, args), id);
        id
    }

    /// The term with the given operator and arguments, if it has been made.
    pub(crate) fn find(&self, op: &Op, args: &[TermId]) -> Option<TermId> {
        self.table.get(&(op.clone(), args.to_vec())).copied()
    }

    fn add_decl(&mut self, name: String, domain: Vec<Sort>, range: Sort, fresh: bool) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.names.insert(name.clone(), id);
        self.decls.push(Decl {
            name,
            domain,
            range,
            fresh,
        });
        id
    }

    fn check_sort(sort: Sort) -> Result<(), TermError> {
        match sort {
            Sort::BitVec(0) => Err(TermError::ZeroWidth),
            _ => Ok(()),
        }
    }

    /// Declares a function, or returns the existing declaration of the same name and signature.
    pub fn declare_fun(
        &mut self,
        name: &str,
        domain: &[Sort],
        range: Sort,
    ) -> Result<DeclId, TermError> {
        Self::check_sort(range)?;
        for sort in domain {
            Self::check_sort(*sort)?;
        }

        if let Some(existing) = self.find_decl(name) {
            let decl = self.decl(existing);
            if decl.domain == domain && decl.range == range {
                return Ok(existing);
            }
            return Err(TermError::NameClash(name.to_string()));
        }

        Ok(self.add_decl(name.to_string(), domain.to_vec(), range, false))
    }

    /// Declares a constant, and returns the constant as a term.
    pub fn declare_const(&mut self, name: &str, sort: Sort) -> Result<TermId, TermError> {
        let decl = self.declare_fun(name, &[], sort)?;
        Ok(self.mk(Op::Const(decl), Vec::default()))
    }

    /// A constant of the given sort, with a name of the form `prefix!n` distinct from all other names.
    pub fn mk_fresh_const(&mut self, prefix: &str, sort: Sort) -> TermId {
        let name = loop {
            let candidate = format!("{prefix}!{}", self.fresh_count);
            self.fresh_count += 1;
            if !self.names.contains_key(&candidate) {
                break candidate;
            }
        };
        let decl = self.add_decl(name, Vec::default(), sort, true);
        self.mk(Op::Const(decl), Vec::default())
    }

    /// Applies a declaration to arguments.
    /// With no arguments, the constant of the declaration.
    pub fn mk_app(&mut self, decl: DeclId, args: &[TermId]) -> Result<TermId, TermError> {
        let domain = &self.decls[decl.index()].domain;
        if domain.len() != args.len() {
            return Err(TermError::Arity {
                expected: domain.len(),
                found: args.len(),
            });
        }
        for (expected, arg) in domain.iter().zip(args) {
            let found = self.sort(*arg);
            if *expected != found {
                return Err(TermError::SortMismatch {
                    expected: *expected,
                    found,
                });
            }
        }
        match args.is_empty() {
            true => Ok(self.mk(Op::Const(decl), Vec::default())),
            false => Ok(self.mk(Op::App(decl), args.to_vec())),
        }
    }

    fn expect_bool(&self, id: TermId) -> Result<(), TermError> {
        match self.is_bool(id) {
            true => Ok(()),
            false => Err(TermError::ExpectedBool(id)),
        }
    }

    fn expect_bv(&self, id: TermId) -> Result<u32, TermError> {
        self.sort(id).width().ok_or(TermError::ExpectedBitVec(id))
    }

    fn expect_same(&self, args: &[TermId]) -> Result<Sort, TermError> {
        let Some(first) = args.first() else {
            return Err(TermError::Arity {
                expected: 1,
                found: 0,
            });
        };
        let expected = self.sort(*first);
        for arg in args {
            let found = self.sort(*arg);
            if found != expected {
                return Err(TermError::SortMismatch { expected, found });
            }
        }
        Ok(expected)
    }

    pub fn mk_not(&mut self, a: TermId) -> Result<TermId, TermError> {
        self.expect_bool(a)?;
        Ok(self.mk(Op::Not, vec![a]))
    }

    /// A conjunction, with the empty conjunction `true` and a singleton conjunction the term itself.
    pub fn mk_and(&mut self, args: &[TermId]) -> Result<TermId, TermError> {
        for arg in args {
            self.expect_bool(*arg)?;
        }
        match args {
            [] => Ok(self.true_term),
            [arg] => Ok(*arg),
            _ => Ok(self.mk(Op::And, args.to_vec())),
        }
    }

    /// A disjunction, with the empty disjunction `false` and a singleton disjunction the term itself.
    pub fn mk_or(&mut self, args: &[TermId]) -> Result<TermId, TermError> {
        for arg in args {
            self.expect_bool(*arg)?;
        }
        match args {
            [] => Ok(self.false_term),
            [arg] => Ok(*arg),
            _ => Ok(self.mk(Op::Or, args.to_vec())),
        }
    }

    pub fn mk_implies(&mut self, a: TermId, b: TermId) -> Result<TermId, TermError> {
        self.expect_bool(a)?;
        self.expect_bool(b)?;
        Ok(self.mk(Op::Implies, vec![a, b]))
    }

    pub fn mk_xor(&mut self, a: TermId, b: TermId) -> Result<TermId, TermError> {
        self.expect_bool(a)?;
        self.expect_bool(b)?;
        Ok(self.mk(Op::Xor, vec![a, b]))
    }

    /// Equality of two terms of the same sort, read as a bi-implication on booleans.
    pub fn mk_eq(&mut self, a: TermId, b: TermId) -> Result<TermId, TermError> {
        self.expect_same(&[a, b])?;
        Ok(self.mk(Op::Eq, vec![a, b]))
    }

    pub fn mk_distinct(&mut self, args: &[TermId]) -> Result<TermId, TermError> {
        self.expect_same(args)?;
        match args.len() {
            1 => Ok(self.true_term),
            _ => Ok(self.mk(Op::Distinct, args.to_vec())),
        }
    }

    pub fn mk_ite(&mut self, c: TermId, t: TermId, e: TermId) -> Result<TermId, TermError> {
        self.expect_bool(c)?;
        self.expect_same(&[t, e])?;
        Ok(self.mk(Op::Ite, vec![c, t, e]))
    }

    pub fn mk_at_most(&mut self, k: u32, args: &[TermId]) -> Result<TermId, TermError> {
        for arg in args {
            self.expect_bool(*arg)?;
        }
        Ok(self.mk(Op::AtMost(k), args.to_vec()))
    }

    pub fn mk_at_least(&mut self, k: u32, args: &[TermId]) -> Result<TermId, TermError> {
        for arg in args {
            self.expect_bool(*arg)?;
        }
        Ok(self.mk(Op::AtLeast(k), args.to_vec()))
    }

    /// A numeral of the given width, with the value reduced modulo two to the width.
    pub fn mk_numeral(&mut self, value: &BigUint, width: u32) -> Result<TermId, TermError> {
        Self::check_sort(Sort::BitVec(width))?;
        Ok(self.mk_numeral_unchecked(value, width))
    }

    pub fn mk_numeral_u64(&mut self, value: u64, width: u32) -> Result<TermId, TermError> {
        self.mk_numeral(&BigUint::from(value), width)
    }

    pub(crate) fn mk_numeral_unchecked(&mut self, value: &BigUint, width: u32) -> TermId {
        let modulus = BigUint::one() << width;
        let reduced = value % &modulus;
        self.mk(Op::Numeral(reduced, width), Vec::default())
    }

    /// The value and width of a numeral term.
    pub fn as_numeral(&self, id: TermId) -> Option<(&BigUint, u32)> {
        match self.op(id) {
            Op::Numeral(value, width) => Some((value, *width)),
            _ => None,
        }
    }

    pub fn mk_bv_not(&mut self, a: TermId) -> Result<TermId, TermError> {
        self.expect_bv(a)?;
        Ok(self.mk(Op::BvNot, vec![a]))
    }

    fn mk_bv_nary(&mut self, op: Op, args: &[TermId]) -> Result<TermId, TermError> {
        if args.len() < 2 {
            return Err(TermError::Arity {
                expected: 2,
                found: args.len(),
            });
        }
        self.expect_bv(args[0])?;
        self.expect_same(args)?;
        Ok(self.mk(op, args.to_vec()))
    }

    pub fn mk_bv_and(&mut self, args: &[TermId]) -> Result<TermId, TermError> {
        self.mk_bv_nary(Op::BvAnd, args)
    }

    pub fn mk_bv_or(&mut self, args: &[TermId]) -> Result<TermId, TermError> {
        self.mk_bv_nary(Op::BvOr, args)
    }

    pub fn mk_bv_xor(&mut self, args: &[TermId]) -> Result<TermId, TermError> {
        self.mk_bv_nary(Op::BvXor, args)
    }

    pub fn mk_bv_add(&mut self, args: &[TermId]) -> Result<TermId, TermError> {
        self.mk_bv_nary(Op::BvAdd, args)
    }

    pub fn mk_bv_mul(&mut self, args: &[TermId]) -> Result<TermId, TermError> {
        self.mk_bv_nary(Op::BvMul, args)
    }

    pub fn mk_bv_ule(&mut self, a: TermId, b: TermId) -> Result<TermId, TermError> {
        self.expect_bv(a)?;
        self.expect_same(&[a, b])?;
        Ok(self.mk(Op::BvUle, vec![a, b]))
    }

    pub fn mk_bv_ult(&mut self, a: TermId, b: TermId) -> Result<TermId, TermError> {
        self.expect_bv(a)?;
        self.expect_same(&[a, b])?;
        Ok(self.mk(Op::BvUlt, vec![a, b]))
    }

    /// Whether the term is a constant or an application of an uninterpreted function.
    pub fn is_uninterpreted(&self, id: TermId) -> bool {
        matches!(self.op(id), Op::Const(_) | Op::App(_))
    }

    fn import_decl(&mut self, decl: &Decl) -> DeclId {
        match self.find_decl(&decl.name) {
            Some(existing) if *self.decl(existing) == *decl => existing,
            _ => self.add_decl(
                decl.name.clone(),
                decl.domain.clone(),
                decl.range,
                decl.fresh,
            ),
        }
    }

    /// Translates a term of this manager to an equivalent term of `target`.
    ///
    /// Declarations are matched by name and signature, and declared in `target` if absent.
    /// The cache may be shared between calls with the same target.
    pub fn translate(
        &self,
        id: TermId,
        target: &mut TermManager,
        cache: &mut FxHashMap<TermId, TermId>,
    ) -> TermId {
        if let Some(translated) = cache.get(&id) {
            return *translated;
        }

        let term = self.term(id);
        let args = term
            .args
            .iter()
            .map(|arg| self.translate(*arg, target, cache))
            .collect::<Vec<_>>();

        let op = match &term.op {
            Op::Const(decl) => Op::Const(target.import_decl(self.decl(*decl))),
            Op::App(decl) => Op::App(target.import_decl(self.decl(*decl))),
            other => other.clone(),
        };

        let translated = target.mk(op, args);
        cache.insert(id, translated);
        translated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_consing() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let y = tm.declare_const("y", Sort::Bool).unwrap();
        let a = tm.mk_and(&[x, y]).unwrap();
        let b = tm.mk_and(&[x, y]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, tm.mk_and(&[y, x]).unwrap());
        assert_eq!(tm.declare_const("x", Sort::Bool), Ok(x));
    }

    #[test]
    fn sort_checks() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let b = tm.declare_const("b", Sort::BitVec(4)).unwrap();
        let c = tm.declare_const("c", Sort::BitVec(3)).unwrap();

        assert_eq!(tm.mk_not(b), Err(TermError::ExpectedBool(b)));
        assert!(tm.mk_bv_add(&[b, c]).is_err());
        assert!(tm.mk_eq(x, b).is_err());
        assert_eq!(tm.mk_numeral_u64(1, 0), Err(TermError::ZeroWidth));
        assert_eq!(
            tm.declare_const("x", Sort::BitVec(2)),
            Err(TermError::NameClash("x".to_string()))
        );
    }

    #[test]
    fn numerals_reduce() {
        let mut tm = TermManager::new();
        let a = tm.mk_numeral_u64(21, 4).unwrap();
        let b = tm.mk_numeral_u64(5, 4).unwrap();
        assert_eq!(a, b);
        assert_eq!(tm.as_numeral(a), Some((&BigUint::from(5_u32), 4)));
    }

    #[test]
    fn fresh_names_are_distinct() {
        let mut tm = TermManager::new();
        let _ = tm.declare_const("s!0", Sort::Bool).unwrap();
        let fresh = tm.mk_fresh_const("s", Sort::Bool);
        let decl = tm.as_const(fresh).unwrap();
        assert_eq!(tm.decl(decl).name, "s!1");
        assert!(tm.decl(decl).fresh);
    }

    #[test]
    fn translation() {
        let mut source = TermManager::new();
        let x = source.declare_const("x", Sort::BitVec(8)).unwrap();
        let one = source.mk_numeral_u64(1, 8).unwrap();
        let sum = source.mk_bv_add(&[x, one]).unwrap();
        let le = source.mk_bv_ule(x, sum).unwrap();

        let mut target = TermManager::new();
        let _ = target.declare_const("y", Sort::Bool).unwrap();
        let mut cache = FxHashMap::default();
        let translated = source.translate(le, &mut target, &mut cache);

        assert_eq!(
            format!("{}", source.display(le)),
            format!("{}", target.display(translated))
        );
        assert!(target.find_decl("x").is_some());
    }
}
