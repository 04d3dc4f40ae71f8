// Error taxonomy for the simulation engine
//
// Two fatal categories exist: configuration errors rejected at construction,
// and contract violations (bad actions, mismatched batch shapes) rejected
// before a tick runs. There are no retryable errors inside a tick.

use thiserror::Error;

/// Errors surfaced synchronously by the engine. The engine refuses to run a
/// step rather than producing a partially-valid result.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid construction parameters (instance/thread/agent counts, board
    /// capacity, opponent policy count)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Action batch with the wrong leading dimension
    #[error("action batch for agent slot {slot} has length {got}, expected {expected}")]
    ActionBatchLength { slot: usize, got: usize, expected: usize },

    /// Discrete action value outside the action space
    #[error("invalid action value {value} for instance {env}, agent slot {slot}")]
    InvalidAction { value: u8, env: usize, slot: usize },

    /// Agent slot index outside `[0, agents_per_env)`
    #[error("agent slot {slot} out of range (agents per instance: {agents})")]
    SlotOutOfRange { slot: usize, agents: usize },

    /// Instance index outside `[0, num_envs)`
    #[error("instance index {env} out of range (instances: {envs})")]
    EnvOutOfRange { env: usize, envs: usize },

    /// Snapshot that does not fit the configured board or agent count
    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}
