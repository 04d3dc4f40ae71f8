// Vectorized multi-threaded multi-agent snake environment for
// reinforcement learning. The facade in `env` is the entry point; a training
// loop constructs a `SnakeEnv`, drives it with `reset`/`step`, and reads the
// primary agent's observation batch, rewards, and done flags.

pub mod buffer;
pub mod config;
pub mod debug_logger;
pub mod env;
pub mod error;
pub mod game;
pub mod obs;
pub mod policy;
pub mod pool;
pub mod render;
pub mod types;

pub use config::Config;
pub use env::{SnakeEnv, StepResult, PRIMARY_SLOT};
pub use error::EngineError;
pub use policy::Policy;
