/*!
Models, as assignments of values to declarations.

Models are built by the context from the valuation of the engine, and passed through a [model converter](crate::preprocessing::model_converter) to recover values of declarations removed by preprocessing.

[Evaluation](Model::eval) is three-valued: a term whose value depends on an unassigned constant (without completion) or on an application of an uninterpreted function evaluates to `None`.
*/

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;

use crate::structures::term::{DeclId, Op, Sort, TermId, TermManager};

/// Values of terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    BitVec { value: BigUint, width: u32 },
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bv(&self) -> Option<(&BigUint, u32)> {
        match self {
            Value::BitVec { value, width } => Some((value, *width)),
            _ => None,
        }
    }

    /// The default value of a sort.
    pub fn default_of(sort: Sort) -> Self {
        match sort {
            Sort::Bool => Value::Bool(false),
            Sort::BitVec(width) => Value::BitVec {
                value: BigUint::zero(),
                width,
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::BitVec { value, width } => write!(f, "(_ bv{value} {width})"),
        }
    }
}

/// An assignment of values to declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    values: BTreeMap<DeclId, Value>,
}

impl Model {
    /// Assigns a value to a declaration, replacing any previous value.
    pub fn register(&mut self, decl: DeclId, value: Value) {
        self.values.insert(decl, value);
    }

    pub fn value(&self, decl: DeclId) -> Option<&Value> {
        self.values.get(&decl)
    }

    pub fn remove(&mut self, decl: DeclId) -> Option<Value> {
        self.values.remove(&decl)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Value)> + '_ {
        self.values.iter().map(|(d, v)| (*d, v))
    }

    /// The value of a constant term, by name.
    pub fn value_of_name(&self, tm: &TermManager, name: &str) -> Option<&Value> {
        self.value(tm.find_decl(name)?)
    }

    /// Evaluates a term.
    ///
    /// With `completion`, unassigned constants take the default value of their sort.
    pub fn eval(&self, tm: &TermManager, term: TermId, completion: bool) -> Option<Value> {
        let mut cache = FxHashMap::default();
        self.eval_cached(tm, term, completion, &mut cache)
    }

    /// Evaluates a boolean term.
    pub fn eval_bool(&self, tm: &TermManager, term: TermId, completion: bool) -> Option<bool> {
        self.eval(tm, term, completion)?.as_bool()
    }

    fn eval_cached(
        &self,
        tm: &TermManager,
        term: TermId,
        completion: bool,
        cache: &mut FxHashMap<TermId, Option<Value>>,
    ) -> Option<Value> {
        if let Some(value) = cache.get(&term) {
            return value.clone();
        }

        let args = tm.args(term);
        let eval_arg = |index: usize, cache: &mut FxHashMap<TermId, Option<Value>>| {
            self.eval_cached(tm, args[index], completion, cache)
        };

        let value = match tm.op(term) {
            Op::True => Some(Value::Bool(true)),
            Op::False => Some(Value::Bool(false)),

            Op::Const(decl) => match self.values.get(decl) {
                Some(value) => Some(value.clone()),
                None if completion => Some(Value::default_of(tm.sort(term))),
                None => None,
            },

            Op::App(_) => None,

            Op::Numeral(value, width) => Some(Value::BitVec {
                value: value.clone(),
                width: *width,
            }),

            Op::Not => eval_arg(0, cache)
                .and_then(|v| v.as_bool())
                .map(|b| Value::Bool(!b)),

            Op::And | Op::Or => {
                let dominant = matches!(tm.op(term), Op::Or);
                let mut unknown = false;
                let mut result = Some(Value::Bool(!dominant));
                for index in 0..args.len() {
                    match eval_arg(index, cache).and_then(|v| v.as_bool()) {
                        Some(b) if b == dominant => {
                            result = Some(Value::Bool(dominant));
                            unknown = false;
                            break;
                        }
                        Some(_) => {}
                        None => unknown = true,
                    }
                }
                match unknown {
                    true => None,
                    false => result,
                }
            }

            Op::Implies => {
                let a = eval_arg(0, cache).and_then(|v| v.as_bool());
                let b = eval_arg(1, cache).and_then(|v| v.as_bool());
                match (a, b) {
                    (Some(false), _) | (_, Some(true)) => Some(Value::Bool(true)),
                    (Some(true), Some(false)) => Some(Value::Bool(false)),
                    _ => None,
                }
            }

            Op::Xor => {
                let a = eval_arg(0, cache)?.as_bool()?;
                let b = eval_arg(1, cache)?.as_bool()?;
                Some(Value::Bool(a != b))
            }

            Op::Eq => {
                let a = eval_arg(0, cache)?;
                let b = eval_arg(1, cache)?;
                Some(Value::Bool(a == b))
            }

            Op::Distinct => {
                let mut values = Vec::with_capacity(args.len());
                for index in 0..args.len() {
                    values.push(eval_arg(index, cache)?);
                }
                let distinct = values
                    .iter()
                    .enumerate()
                    .all(|(i, a)| values[i + 1..].iter().all(|b| a != b));
                Some(Value::Bool(distinct))
            }

            Op::Ite => match eval_arg(0, cache).and_then(|v| v.as_bool()) {
                Some(true) => eval_arg(1, cache),
                Some(false) => eval_arg(2, cache),
                None => {
                    let t = eval_arg(1, cache)?;
                    let e = eval_arg(2, cache)?;
                    match t == e {
                        true => Some(t),
                        false => None,
                    }
                }
            },

            Op::AtMost(k) | Op::AtLeast(k) => {
                let k = *k as usize;
                let at_most = matches!(tm.op(term), Op::AtMost(_));
                let mut trues = 0;
                let mut unknowns = 0;
                for index in 0..args.len() {
                    match eval_arg(index, cache).and_then(|v| v.as_bool()) {
                        Some(true) => trues += 1,
                        Some(false) => {}
                        None => unknowns += 1,
                    }
                }
                match at_most {
                    true if trues > k => Some(Value::Bool(false)),
                    true if trues + unknowns <= k => Some(Value::Bool(true)),
                    false if trues >= k => Some(Value::Bool(true)),
                    false if trues + unknowns < k => Some(Value::Bool(false)),
                    _ => None,
                }
            }

            Op::BvNot => {
                let (value, width) = eval_arg(0, cache)?.as_bv().map(|(v, w)| (v.clone(), w))?;
                let mask = (BigUint::one() << width) - BigUint::one();
                Some(Value::BitVec {
                    value: value ^ mask,
                    width,
                })
            }

            Op::BvAnd | Op::BvOr | Op::BvXor | Op::BvAdd | Op::BvMul => {
                let op = tm.op(term).clone();
                let width = tm.sort(term).width()?;
                let modulus = BigUint::one() << width;
                let mut acc: Option<BigUint> = None;
                for index in 0..args.len() {
                    let value = eval_arg(index, cache)?.as_bv()?.0.clone();
                    acc = Some(match acc {
                        None => value,
                        Some(acc) => match op {
                            Op::BvAnd => acc & value,
                            Op::BvOr => acc | value,
                            Op::BvXor => acc ^ value,
                            Op::BvAdd => (acc + value) % &modulus,
                            _ => (acc * value) % &modulus,
                        },
                    });
                }
                acc.map(|value| Value::BitVec { value, width })
            }

            Op::BvUle | Op::BvUlt => {
                let a = eval_arg(0, cache)?.as_bv()?.0.clone();
                let b = eval_arg(1, cache)?.as_bv()?.0.clone();
                match tm.op(term) {
                    Op::BvUle => Some(Value::Bool(a <= b)),
                    _ => Some(Value::Bool(a < b)),
                }
            }
        };

        cache.insert(term, value.clone());
        value
    }
}
