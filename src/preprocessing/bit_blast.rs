/*!
Reduction of bit-vector terms to boolean terms.

Each bit-vector constant is replaced by fresh boolean constants, one for each bit, recorded in the [BlastMap] of the pipeline.
Constants already in the map, from an earlier application, keep their bits.

Operations are expanded over bits, least significant first:
- Bitwise operations bit by bit.
- Addition by a ripple-carry adder, and multiplication by shifted addition.
- Equality as a conjunction of bi-implications, and unsigned comparison by a chain from the least significant bit.

Terms built from an uninterpreted function with a bit-vector range can't be expanded, and any predicate over such a term is left intact.

A limit on the total count of bits in the map guards against runaway growth, and exceeding the limit fails with [TacticError::BitLimit].
*/

use rustc_hash::FxHashMap;

use super::tactic::{rewrite_goal, Tactic, TacticContext};
use crate::{
    db::blast_map::{BitGroup, BlastMap},
    misc::log::targets::{self},
    reports::Statistics,
    structures::{
        goal::Goal,
        term::{DeclId, Op, Sort, TermId, TermManager},
    },
    types::err::TacticError,
};

type Bits = Vec<TermId>;

pub struct BitBlaster {
    max_bits: u64,
    bool_cache: FxHashMap<TermId, TermId>,
    bv_cache: FxHashMap<TermId, Option<Bits>>,
    blasted: u64,
}

impl BitBlaster {
    pub fn new(max_bits: u64) -> Self {
        BitBlaster {
            max_bits,
            bool_cache: FxHashMap::default(),
            bv_cache: FxHashMap::default(),
            blasted: 0,
        }
    }

    /// The boolean term equivalent to a boolean term, with bit-vector subterms expanded.
    pub fn blast_bool(
        &mut self,
        tm: &mut TermManager,
        map: &mut BlastMap,
        term: TermId,
    ) -> Result<TermId, TacticError> {
        if let Some(done) = self.bool_cache.get(&term) {
            return Ok(*done);
        }

        let args = tm.args(term).to_vec();
        let op = tm.op(term).clone();

        let blasted = match op {
            Op::Eq if !tm.is_bool(args[0]) => {
                match (self.blast_bv(tm, map, args[0])?, self.blast_bv(tm, map, args[1])?) {
                    (Some(a), Some(b)) => equal(tm, &a, &b),
                    _ => term,
                }
            }

            Op::Distinct if !tm.is_bool(args[0]) => {
                let mut blasted = Vec::with_capacity(args.len());
                for arg in &args {
                    blasted.push(self.blast_bv(tm, map, *arg)?);
                }
                match blasted.into_iter().collect::<Option<Vec<_>>>() {
                    Some(bits) => {
                        let mut disequalities = Vec::default();
                        for (index, a) in bits.iter().enumerate() {
                            for b in &bits[index + 1..] {
                                let equality = equal(tm, a, b);
                                disequalities.push(tm.fold_not(equality));
                            }
                        }
                        tm.fold_and(disequalities)
                    }
                    None => term,
                }
            }

            Op::BvUle | Op::BvUlt => {
                match (self.blast_bv(tm, map, args[0])?, self.blast_bv(tm, map, args[1])?) {
                    (Some(a), Some(b)) => less_than(tm, &a, &b, op == Op::BvUle),
                    _ => term,
                }
            }

            Op::True | Op::False | Op::Const(_) | Op::App(_) => term,

            _ => {
                let mut blasted = Vec::with_capacity(args.len());
                for arg in &args {
                    blasted.push(self.blast_bool(tm, map, *arg)?);
                }
                match blasted == args {
                    true => term,
                    false => tm.mk(op, blasted),
                }
            }
        };

        self.bool_cache.insert(term, blasted);
        Ok(blasted)
    }

    /// The bits of a bit-vector term, or `None` if the term can't be expanded.
    fn blast_bv(
        &mut self,
        tm: &mut TermManager,
        map: &mut BlastMap,
        term: TermId,
    ) -> Result<Option<Bits>, TacticError> {
        if let Some(done) = self.bv_cache.get(&term) {
            return Ok(done.clone());
        }

        let args = tm.args(term).to_vec();
        let width = tm.sort(term).width().unwrap_or_default() as usize;

        let bits = match tm.op(term).clone() {
            Op::Const(decl) => Some(self.const_bits(tm, map, decl, width)?),

            Op::App(_) => None,

            Op::Numeral(value, _) => Some(
                (0..width)
                    .map(|position| tm.mk_bool(value.bit(position as u64)))
                    .collect(),
            ),

            Op::Ite => {
                let condition = self.blast_bool(tm, map, args[0])?;
                match (self.blast_bv(tm, map, args[1])?, self.blast_bv(tm, map, args[2])?) {
                    (Some(then), Some(otherwise)) => Some(
                        then.iter()
                            .zip(otherwise.iter())
                            .map(|(t, e)| tm.fold_ite(condition, *t, *e))
                            .collect(),
                    ),
                    _ => None,
                }
            }

            op => {
                let mut operands = Vec::with_capacity(args.len());
                for arg in &args {
                    match self.blast_bv(tm, map, *arg)? {
                        Some(bits) => operands.push(bits),
                        None => {
                            self.bv_cache.insert(term, None);
                            return Ok(None);
                        }
                    }
                }

                match op {
                    Op::BvNot => Some(operands[0].iter().map(|b| tm.fold_not(*b)).collect()),
                    Op::BvAdd => Some(fold_operands(tm, operands, add)),
                    Op::BvMul => Some(fold_operands(tm, operands, multiply)),
                    Op::BvAnd => Some(fold_operands(tm, operands, |tm, a, b| {
                        bitwise(tm, a, b, |tm, x, y| tm.fold_and(vec![x, y]))
                    })),
                    Op::BvOr => Some(fold_operands(tm, operands, |tm, a, b| {
                        bitwise(tm, a, b, |tm, x, y| tm.fold_or(vec![x, y]))
                    })),
                    Op::BvXor => Some(fold_operands(tm, operands, |tm, a, b| {
                        bitwise(tm, a, b, TermManager::fold_xor)
                    })),
                    _ => None,
                }
            }
        };

        self.bv_cache.insert(term, bits.clone());
        Ok(bits)
    }

    /// The bits of a constant, fresh unless already in the map.
    fn const_bits(
        &mut self,
        tm: &mut TermManager,
        map: &mut BlastMap,
        decl: DeclId,
        width: usize,
    ) -> Result<Bits, TacticError> {
        if let Some(group) = map.get(decl) {
            return Ok(group.bits.clone());
        }

        if map.bit_count() + width as u64 > self.max_bits {
            log::info!(target: targets::PREPROCESSING, "Bit limit of {} exceeded", self.max_bits);
            return Err(TacticError::BitLimit(self.max_bits));
        }

        let name = tm.decl(decl).name.clone();
        let bits: Bits = (0..width)
            .map(|_| tm.mk_fresh_const(&name, Sort::Bool))
            .collect();
        let bit_decls = bits.iter().filter_map(|bit| tm.as_const(*bit)).collect();

        log::trace!(target: targets::PREPROCESSING, "Blasted {name} to {width} bits");
        self.blasted += width as u64;
        map.insert(BitGroup {
            decl,
            bits: bits.clone(),
            bit_decls,
        });
        Ok(bits)
    }
}

fn fold_operands(
    tm: &mut TermManager,
    operands: Vec<Bits>,
    mut combine: impl FnMut(&mut TermManager, &[TermId], &[TermId]) -> Bits,
) -> Bits {
    let mut operands = operands.into_iter();
    let mut accumulated = operands.next().unwrap_or_default();
    for operand in operands {
        accumulated = combine(tm, &accumulated, &operand);
    }
    accumulated
}

fn bitwise(
    tm: &mut TermManager,
    a: &[TermId],
    b: &[TermId],
    mut f: impl FnMut(&mut TermManager, TermId, TermId) -> TermId,
) -> Bits {
    a.iter().zip(b.iter()).map(|(x, y)| f(tm, *x, *y)).collect()
}

/// A ripple-carry adder, with the final carry discarded.
fn add(tm: &mut TermManager, a: &[TermId], b: &[TermId]) -> Bits {
    let mut carry = tm.mk_false();
    let mut sum = Vec::with_capacity(a.len());
    for (x, y) in a.iter().zip(b.iter()) {
        let half = tm.fold_xor(*x, *y);
        sum.push(tm.fold_xor(half, carry));

        let both = tm.fold_and(vec![*x, *y]);
        let propagated = tm.fold_and(vec![half, carry]);
        carry = tm.fold_or(vec![both, propagated]);
    }
    sum
}

/// Multiplication by addition of shifted partial products.
fn multiply(tm: &mut TermManager, a: &[TermId], b: &[TermId]) -> Bits {
    let width = a.len();
    let mut product = vec![tm.mk_false(); width];
    for (shift, y) in b.iter().enumerate() {
        let mut partial = vec![tm.mk_false(); shift];
        for x in &a[..width - shift] {
            partial.push(tm.fold_and(vec![*x, *y]));
        }
        product = add(tm, &product, &partial);
    }
    product
}

fn equal(tm: &mut TermManager, a: &[TermId], b: &[TermId]) -> TermId {
    let equalities = bitwise(tm, a, b, TermManager::fold_iff);
    tm.fold_and(equalities)
}

/// `a < b`, or `a ≤ b` if `or_equal`, from the least significant bit up.
fn less_than(tm: &mut TermManager, a: &[TermId], b: &[TermId], or_equal: bool) -> TermId {
    let mut result = tm.mk_bool(or_equal);
    for (x, y) in a.iter().zip(b.iter()) {
        let not_x = tm.fold_not(*x);
        let strictly = tm.fold_and(vec![not_x, *y]);
        let same = tm.fold_iff(*x, *y);
        let carried = tm.fold_and(vec![same, result]);
        result = tm.fold_or(vec![strictly, carried]);
    }
    result
}

impl Tactic for BitBlaster {
    fn name(&self) -> &'static str {
        "bit_blast"
    }

    fn apply(&mut self, goal: Goal, ctx: &mut TacticContext) -> Result<Vec<Goal>, TacticError> {
        let map = &mut *ctx.blast_map;
        let goal = rewrite_goal(goal, ctx.tm, |tm, formula| self.blast_bool(tm, map, formula))?;
        Ok(vec![goal])
    }

    fn reset(&mut self) {
        self.bool_cache.clear();
        self.bv_cache.clear();
    }

    fn collect_statistics(&self, stats: &mut Statistics) {
        stats.update("bit-blaster bits", self.blasted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::Scoped,
        structures::model::{Model, Value},
    };

    fn bits_model(tm: &TermManager, map: &BlastMap, name: &str, value: u64) -> Model {
        let mut model = Model::default();
        let decl = tm.find_decl(name).unwrap();
        for (position, bit) in map.get(decl).unwrap().bit_decls.iter().enumerate() {
            model.register(*bit, Value::Bool((value >> position) & 1 == 1));
        }
        model
    }

    #[test]
    fn blasts_constants_once() {
        let mut tm = TermManager::new();
        let mut map = BlastMap::default();
        map.push_scope();
        let x = tm.declare_const("x", Sort::BitVec(4)).unwrap();
        let five = tm.mk_numeral_u64(5, 4).unwrap();
        let eq = tm.mk_eq(x, five).unwrap();
        let le = tm.mk_bv_ule(x, five).unwrap();

        let mut blaster = BitBlaster::new(1 << 10);
        blaster.blast_bool(&mut tm, &mut map, eq).unwrap();
        blaster.blast_bool(&mut tm, &mut map, le).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.bit_count(), 4);
    }

    #[test]
    fn arithmetic_evaluates() {
        let mut tm = TermManager::new();
        let mut map = BlastMap::default();
        let x = tm.declare_const("x", Sort::BitVec(4)).unwrap();
        let three = tm.mk_numeral_u64(3, 4).unwrap();
        let sum = tm.mk_bv_add(&[x, three]).unwrap();
        let product = tm.mk_bv_mul(&[sum, three]).unwrap();
        let expected = tm.mk_numeral_u64(((6 + 3) * 3) % 16, 4).unwrap();
        let formula = tm.mk_eq(product, expected).unwrap();
        let below = tm.mk_bv_ult(x, sum).unwrap();

        let mut blaster = BitBlaster::new(1 << 10);
        let blasted = blaster.blast_bool(&mut tm, &mut map, formula).unwrap();
        let blasted_below = blaster.blast_bool(&mut tm, &mut map, below).unwrap();

        let model = bits_model(&tm, &map, "x", 6);
        assert_eq!(model.eval_bool(&tm, blasted, false), Some(true));
        assert_eq!(model.eval_bool(&tm, blasted_below, false), Some(true));

        let model = bits_model(&tm, &map, "x", 7);
        assert_eq!(model.eval_bool(&tm, blasted, false), Some(false));
    }

    #[test]
    fn bit_limit() {
        let mut tm = TermManager::new();
        let mut map = BlastMap::default();
        let x = tm.declare_const("x", Sort::BitVec(8)).unwrap();
        let y = tm.declare_const("y", Sort::BitVec(8)).unwrap();
        let eq = tm.mk_eq(x, y).unwrap();

        let mut blaster = BitBlaster::new(12);
        assert_eq!(
            blaster.blast_bool(&mut tm, &mut map, eq),
            Err(TacticError::BitLimit(12))
        );
    }

    #[test]
    fn uninterpreted_terms_are_kept() {
        let mut tm = TermManager::new();
        let mut map = BlastMap::default();
        let f = tm.declare_fun("f", &[Sort::Bool], Sort::BitVec(2)).unwrap();
        let p = tm.declare_const("p", Sort::Bool).unwrap();
        let app = tm.mk_app(f, &[p]).unwrap();
        let one = tm.mk_numeral_u64(1, 2).unwrap();
        let eq = tm.mk_eq(app, one).unwrap();

        let mut blaster = BitBlaster::new(1 << 10);
        assert_eq!(blaster.blast_bool(&mut tm, &mut map, eq).unwrap(), eq);
    }
}
