/*!
Terms over booleans and fixed-width bit-vectors.

Terms are hash-consed in a [TermManager], and so structurally equal terms share a [TermId].
Identifiers are only meaningful with respect to the manager which issued them, and [translation](TermManager::translate) is required to move a term between managers.

The vocabulary is:
- Boolean structure: `true`, `false`, `not`, `and`, `or`, `=>`, `xor`, `ite`, `=`, `distinct`.
- Cardinality constraints: `at-most k` and `at-least k` over boolean terms.
- Bit-vectors: numerals, `bvnot`, `bvand`, `bvor`, `bvxor`, `bvadd`, `bvmul`, `bvule`, `bvult`.
- Declarations: constants (of any sort) and uninterpreted functions, applied to arguments.

Constructors on the manager check sorts and return a [TermError](crate::types::err::TermError) on misuse.
*/

mod display;
mod fold;
mod manager;

pub use display::TermDisplay;
pub use manager::TermManager;

use num_bigint::BigUint;

/// An identifier of a term, issued by a [TermManager].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(u32);

impl TermId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An identifier of a declaration, issued by a [TermManager].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(u32);

impl DeclId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Sorts of terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sort {
    Bool,

    /// Bit-vectors of the given (positive) width.
    BitVec(u32),
}

impl Sort {
    pub fn is_bool(&self) -> bool {
        matches!(self, Sort::Bool)
    }

    /// The width of a bit-vector sort.
    pub fn width(&self) -> Option<u32> {
        match self {
            Sort::Bool => None,
            Sort::BitVec(width) => Some(*width),
        }
    }
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::BitVec(width) => write!(f, "(_ BitVec {width})"),
        }
    }
}

/// Operators of terms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    True,
    False,

    /// A declared constant.
    Const(DeclId),

    /// An application of a declared function to at least one argument.
    App(DeclId),

    Not,
    And,
    Or,
    Implies,
    Xor,
    Ite,
    Eq,
    Distinct,

    /// At most `k` of the arguments are true.
    AtMost(u32),

    /// At least `k` of the arguments are true.
    AtLeast(u32),

    /// A bit-vector numeral, with value reduced modulo two to the width.
    Numeral(BigUint, u32),

    BvNot,
    BvAnd,
    BvOr,
    BvXor,
    BvAdd,
    BvMul,
    BvUle,
    BvUlt,
}

/// A term, as an operator applied to arguments.
#[derive(Clone, Debug)]
pub struct Term {
    pub op: Op,
    pub args: Vec<TermId>,
    pub sort: Sort,
}

/// A declaration of a constant or function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    pub name: String,
    pub domain: Vec<Sort>,
    pub range: Sort,

    /// Whether the declaration was introduced by the library, rather than by a user.
    pub fresh: bool,
}
