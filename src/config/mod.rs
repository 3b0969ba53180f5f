/*!
Configuration of a context.

All configuration for a context is contained within [Config].
The engine and the preprocessing pipeline clone the parts of the configuration relevant to them, and are refreshed on [update_config](crate::context::GenericContext::update_config).
*/

mod config_option;
pub use config_option::ConfigOption;

pub mod engine;
pub use engine::{EngineConfig, PolarityLean, RandomDecisionBias};

pub mod simplify;
pub use simplify::SimplifyConfig;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Configuration of the engine.
    pub engine: EngineConfig,

    /// The number of rewrite steps permitted to the simplifier in a single application.
    pub simplify_max_steps: ConfigOption<usize>,

    /// The number of nodes visited by the simplifier when rewriting under a local context.
    pub local_ctx_limit: ConfigOption<usize>,

    /// The total number of bits the bit-blaster may introduce.
    pub blast_max_bits: ConfigOption<u64>,
}

impl Default for Config {
    /// The default context is (roughly) configured to provide quick, deterministic, results on a library of tests.
    fn default() -> Self {
        Config {
            engine: EngineConfig::default(),

            simplify_max_steps: ConfigOption {
                name: "simplify_max_steps",
                min: 1,
                max: usize::MAX,
                value: 1_000_000,
            },

            local_ctx_limit: ConfigOption {
                name: "local_ctx_limit",
                min: 0,
                max: usize::MAX,
                value: 10_000,
            },

            blast_max_bits: ConfigOption {
                name: "blast_max_bits",
                min: 0,
                max: u64::MAX,
                value: 1 << 24,
            },
        }
    }
}

impl Config {
    /// The simplifier flags used by the pipeline, with limits from the configuration.
    pub fn simplify(&self) -> SimplifyConfig {
        SimplifyConfig::pipeline(self.simplify_max_steps.value, self.local_ctx_limit.value)
    }
}
