/*!
Reports for the context.
*/

mod statistics;
pub use statistics::Statistics;

/// High-level reports regarding a query.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Report {
    /// The formulas of the context are satisfiable, together with the assumptions of the query.
    Satisfiable,

    /// The formulas of the context are unsatisfiable, together with the assumptions of the query.
    Unsatisfiable,

    /// Satisfiability is unknown, for some reason.
    Unknown,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
