//! Error types used in the library.
//!
//! - Some of these are internally expected --- e.g. a tactic error taints the preprocessing pipeline, and the query which triggered it returns an unknown report.
//! - Some are external --- e.g. a request to translate a context with open scopes, or to display weights which are not integers.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::structures::term::{Sort, TermId};

#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    Config(ConfigError),
    Internalize(InternalizeError),
    Io(std::io::ErrorKind),
    Preprocessing(PreprocessingError),
    State(StateError),
    Term(TermError),
    Weight(WeightError),
}

/// Errors in building configurations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// A value outside the bounds of the named option.
    OutOfBounds(&'static str),

    /// Incompatible simplifier flags.
    IncompatibleFlags(&'static str, &'static str),

    /// A simplifier flag which requires another flag.
    MissingFlag(&'static str, &'static str),
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds(name) => write!(f, "value out of bounds for {name}"),
            Self::IncompatibleFlags(a, b) => write!(f, "{a} is incompatible with {b}"),
            Self::MissingFlag(a, b) => write!(f, "{a} requires {b}"),
        }
    }
}

/// Reasons a batch of formulas or assumptions failed to reach the engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InternalizeError {
    /// The preprocessing pipeline failed.
    Preprocessing(PreprocessingError),

    /// Atoms with theory content remained after preprocessing, listed as text.
    InterpretedAtoms(String),
}

impl From<InternalizeError> for ErrorKind {
    fn from(e: InternalizeError) -> Self {
        ErrorKind::Internalize(e)
    }
}

impl From<PreprocessingError> for InternalizeError {
    fn from(e: PreprocessingError) -> Self {
        InternalizeError::Preprocessing(e)
    }
}

impl std::fmt::Display for InternalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preprocessing(e) => write!(f, "{e}"),
            Self::InterpretedAtoms(atoms) => {
                write!(f, "interpreted atoms sent to SAT solver {atoms}")
            }
        }
    }
}

impl From<std::io::Error> for ErrorKind {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e.kind())
    }
}

/// Errors from the preprocessing pipeline.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PreprocessingError {
    /// A tactic failed.
    /// The pipeline is discarded.
    Tactic {
        tactic: &'static str,
        error: TacticError,
    },

    /// The pipeline produced some number of subgoals other than one.
    SubgoalCount(usize),

    /// The pipeline could not be built from the configuration.
    Config(ConfigError),
}

impl From<PreprocessingError> for ErrorKind {
    fn from(e: PreprocessingError) -> Self {
        ErrorKind::Preprocessing(e)
    }
}

impl From<ConfigError> for PreprocessingError {
    fn from(e: ConfigError) -> Self {
        PreprocessingError::Config(e)
    }
}

impl std::fmt::Display for PreprocessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tactic { tactic, error } => write!(f, "{tactic}: {error}"),
            Self::SubgoalCount(count) => write!(f, "expected a single goal, found {count}"),
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

/// Failures of an individual tactic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TacticError {
    /// The rewrite step limit was exceeded.
    StepLimit(usize),

    /// Bit-blasting would exceed the bit limit.
    BitLimit(u64),
}

impl std::fmt::Display for TacticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepLimit(limit) => write!(f, "exceeded {limit} rewrite steps"),
            Self::BitLimit(limit) => write!(f, "exceeded {limit} blasted bits"),
        }
    }
}

/// Errors related to the state of a context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateError {
    /// The operation requires the context to be at scope depth zero, though it is at the given depth.
    NonBaseLevel(usize),
}

impl From<StateError> for ErrorKind {
    fn from(e: StateError) -> Self {
        ErrorKind::State(e)
    }
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonBaseLevel(_) => write!(f, "Cannot translate sat solver at non-base level"),
        }
    }
}

/// Errors in building terms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TermError {
    /// A boolean term was required.
    ExpectedBool(TermId),

    /// A bit-vector term was required.
    ExpectedBitVec(TermId),

    /// Arguments of differing sorts where a common sort was required.
    SortMismatch { expected: Sort, found: Sort },

    /// Bit-vectors must have a positive width.
    ZeroWidth,

    /// The wrong number of arguments was given.
    Arity { expected: usize, found: usize },

    /// A name is already declared, with a different signature.
    NameClash(String),
}

impl From<TermError> for ErrorKind {
    fn from(e: TermError) -> Self {
        ErrorKind::Term(e)
    }
}

/// Errors with weights given to a weighted query or display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeightError {
    /// The count of weights differs from the count of terms.
    LengthMismatch { terms: usize, weights: usize },

    /// A weight which is not a non-negative finite number.
    NotRepresentable(f64),

    /// A weight with a fractional part, or one too large to write.
    NotIntegral(f64),
}

impl From<WeightError> for ErrorKind {
    fn from(e: WeightError) -> Self {
        ErrorKind::Weight(e)
    }
}

impl std::fmt::Display for WeightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch { terms, weights } => {
                write!(f, "{terms} terms were given with {weights} weights")
            }
            Self::NotRepresentable(w) => write!(f, "weight {w} is not a non-negative number"),
            Self::NotIntegral(_) => write!(f, "Cannot display weights that are not integers"),
        }
    }
}
