//! Flags of the [simplifier](crate::preprocessing::simplify).

use crate::types::err::ConfigError;

/// Flags of the simplifier.
///
/// The flags used by the preprocessing pipeline are fixed by [SimplifyConfig::pipeline], with only the limits taken from the [config](super::Config).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimplifyConfig {
    /// Normalise bit-vector sums and products to a sum of monomials.
    pub som: bool,

    /// Pull if-then-else terms with constant branches out of predicates, when the branches then fold.
    pub pull_cheap_ite: bool,

    /// Push bit-vector operations into if-then-else terms with constant branches.
    pub push_ite_bv: bool,

    /// Simplify the children of a conjunction (disjunction) under the literals of the conjunction (disjunction).
    pub local_ctx: bool,

    /// Flatten nested associative operators.
    pub flat: bool,

    /// Hoist a common factor out of a sum of products.
    pub hoist_mul: bool,

    /// Rewrite conjunctions as negated disjunctions.
    pub elim_and: bool,

    /// Expand `distinct` to pairwise disequalities.
    pub blast_distinct: bool,

    /// The number of rewrite steps permitted in a single application.
    pub max_steps: usize,

    /// The number of nodes visited by a single local context rewrite.
    pub local_ctx_limit: usize,
}

impl SimplifyConfig {
    /// The flags used by the preprocessing pipeline.
    ///
    /// Sums of monomials are required, and so pushing if-then-else terms and hoisting multiplication are disabled.
    pub fn pipeline(max_steps: usize, local_ctx_limit: usize) -> Self {
        SimplifyConfig {
            som: true,
            pull_cheap_ite: true,
            push_ite_bv: false,
            local_ctx: true,
            flat: true,
            hoist_mul: false,
            elim_and: true,
            blast_distinct: true,
            max_steps,
            local_ctx_limit,
        }
    }

    /// Checks the flags are compatible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.som && self.hoist_mul {
            return Err(ConfigError::IncompatibleFlags("som", "hoist_mul"));
        }
        if self.som && self.push_ite_bv {
            return Err(ConfigError::IncompatibleFlags("som", "push_ite_bv"));
        }
        if self.som && !self.flat {
            return Err(ConfigError::MissingFlag("som", "flat"));
        }
        Ok(())
    }
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        SimplifyConfig {
            som: false,
            pull_cheap_ite: false,
            push_ite_bv: false,
            local_ctx: false,
            flat: true,
            hoist_mul: false,
            elim_and: false,
            blast_distinct: false,
            max_steps: usize::MAX,
            local_ctx_limit: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_flags_validate() {
        assert!(SimplifyConfig::pipeline(1000, 1000).validate().is_ok());
    }

    #[test]
    fn som_conflicts() {
        let mut config = SimplifyConfig::pipeline(1000, 1000);
        config.hoist_mul = true;
        assert_eq!(
            config.validate(),
            Err(ConfigError::IncompatibleFlags("som", "hoist_mul"))
        );

        let mut config = SimplifyConfig::pipeline(1000, 1000);
        config.push_ite_bv = true;
        assert!(config.validate().is_err());

        let mut config = SimplifyConfig::pipeline(1000, 1000);
        config.flat = false;
        assert_eq!(config.validate(), Err(ConfigError::MissingFlag("som", "flat")));
    }
}
