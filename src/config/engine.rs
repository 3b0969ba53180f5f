//! Configuration of the [engine](crate::engine).

use super::ConfigOption;
use crate::generic::luby::LubyRepresentation;

/// Representation of the probability of choosing `true`.
pub type PolarityLean = f64;

/// Representation of the probability of making a random decision.
pub type RandomDecisionBias = f64;

/// Configuration of the engine.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Variable elimination.
    /// Always disabled, as atoms of the front-end must survive between queries.
    pub elim_vars: ConfigOption<bool>,

    /// Minimize unsatisfiable cores by deletion.
    pub minimize_core: ConfigOption<bool>,

    /// Default to the last set value of an atom when deciding on the atom.
    pub phase_saving: ConfigOption<bool>,

    /// The probability of assigning positive polarity to an atom when freely deciding.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of deciding on a random atom, rather than one of highest activity.
    pub random_decision_bias: ConfigOption<RandomDecisionBias>,

    /// Permit restarts.
    pub restart: ConfigOption<bool>,

    /// The `u` value to multiply the luby sequence by when determining whether to perform a restart.
    pub luby_u: ConfigOption<LubyRepresentation>,

    /// The number of conflicts permitted in a single query.
    pub conflict_limit: ConfigOption<usize>,

    /// The time limit for a single query, with zero read as no limit.
    pub time_limit: ConfigOption<std::time::Duration>,

    /// Seed of the source of randomness.
    pub seed: ConfigOption<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            elim_vars: ConfigOption {
                name: "elim_vars",
                min: false,
                max: false,
                value: false,
            },

            minimize_core: ConfigOption {
                name: "minimize_core",
                min: false,
                max: true,
                value: false,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                value: true,
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            restart: ConfigOption {
                name: "restart",
                min: false,
                max: true,
                value: true,
            },

            luby_u: ConfigOption {
                name: "luby",
                min: 1,
                max: LubyRepresentation::MAX,
                value: 128,
            },

            conflict_limit: ConfigOption {
                name: "conflict_limit",
                min: 0,
                max: usize::MAX,
                value: usize::MAX,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: std::time::Duration::from_secs(0),
                max: std::time::Duration::MAX,
                value: std::time::Duration::from_secs(0),
            },

            seed: ConfigOption {
                name: "seed",
                min: 0,
                max: u64::MAX,
                value: 0,
            },
        }
    }
}
