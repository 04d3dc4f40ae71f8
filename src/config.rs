// Configuration module for reading Gym.toml
// All tunable engine parameters live here; the engine itself never reads
// files or environment variables.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::EngineError;

/// Upper bound on agents per instance; spawn placement and the observation
/// channel split assume a small fixed seat count.
pub const MAX_AGENTS_PER_ENV: usize = 8;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub engine: EngineConfig,
    pub board: BoardConfig,
    pub rules: RulesConfig,
    pub rewards: RewardConfig,
    pub render: RenderConfig,
    pub debug: DebugConfig,
}

/// Vectorization parameters: how many instances run, across how many threads,
/// with how many agent seats each
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    pub num_threads: usize,
    pub num_envs: usize,
    /// Primary agent plus opponents; every instance hosts this many seats
    pub agents_per_env: usize,
}

/// Board geometry and initial layout
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    /// Food cells the regeneration policy keeps on the board
    pub food_count: usize,
    /// Segments each snake spawns with, stacked on its spawn cell
    pub starting_length: usize,
    /// Optional base seed; instance i derives its RNG from `seed + i`.
    /// `None` seeds every instance from the OS.
    pub seed: Option<u64>,
}

/// Game rules constants
#[derive(Debug, Deserialize, Clone)]
pub struct RulesConfig {
    pub max_health: u32,
    pub health_loss_per_turn: u32,
    /// Episode ends after this many turns; 0 disables the cap
    pub max_turns: u32,
    /// Whether the primary agent dying ends the episode even while
    /// opponents are still playing out
    pub end_on_primary_death: bool,
}

/// Reward shaping and terminal reward constants for the primary agent
#[derive(Debug, Deserialize, Clone)]
pub struct RewardConfig {
    /// Shaping bonus on any tick the primary agent eats
    pub eat_reward: f32,
    /// Terminal reward when the episode ends with the primary alive past
    /// `min_turns_for_win`
    pub win_reward: f32,
    /// Terminal reward when the episode ends with the primary dead
    pub lose_reward: f32,
    /// Surviving a shorter episode earns a zero terminal reward
    pub min_turns_for_win: u32,
}

/// Visualization pacing
#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    /// Pause after each rendered frame so a human can follow the game
    pub pause_ms: u64,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&contents)?)
    }

    /// Loads default configuration from Gym.toml in the project root
    pub fn load_default() -> Result<Self, EngineError> {
        Self::from_file("Gym.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Gym.toml
    pub fn default_hardcoded() -> Self {
        Config {
            engine: EngineConfig {
                num_threads: 4,
                num_envs: 16,
                agents_per_env: 1,
            },
            board: BoardConfig {
                width: 11,
                height: 11,
                food_count: 4,
                starting_length: 3,
                seed: None,
            },
            rules: RulesConfig {
                max_health: 100,
                health_loss_per_turn: 1,
                max_turns: 0,
                end_on_primary_death: true,
            },
            rewards: RewardConfig {
                eat_reward: 0.1,
                win_reward: 1.0,
                lose_reward: -1.0,
                min_turns_for_win: 100,
            },
            render: RenderConfig { pause_ms: 100 },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_gym_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Gym.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Validates construction parameters. Called by the environment facade
    /// before any simulation state is allocated.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.engine.num_threads == 0 {
            return Err(EngineError::Config("num_threads must be at least 1".to_string()));
        }
        if self.engine.num_envs == 0 {
            return Err(EngineError::Config("num_envs must be at least 1".to_string()));
        }
        if self.engine.agents_per_env == 0 || self.engine.agents_per_env > MAX_AGENTS_PER_ENV {
            return Err(EngineError::Config(format!(
                "agents_per_env must be in 1..={}, got {}",
                MAX_AGENTS_PER_ENV, self.engine.agents_per_env
            )));
        }
        if self.board.width < 3 || self.board.height < 3 {
            return Err(EngineError::Config(format!(
                "board must be at least 3x3, got {}x{}",
                self.board.width, self.board.height
            )));
        }
        if self.board.starting_length == 0 {
            return Err(EngineError::Config("starting_length must be at least 1".to_string()));
        }
        // Spawn placement needs free cells for every snake and food item,
        // with room left over for the first moves.
        let cells = (self.board.width * self.board.height) as usize;
        if self.engine.agents_per_env + self.board.food_count + 1 > cells {
            return Err(EngineError::Config(format!(
                "{} agents and {} food do not fit a {}x{} board",
                self.engine.agents_per_env, self.board.food_count, self.board.width, self.board.height
            )));
        }
        if self.rules.max_health == 0 {
            return Err(EngineError::Config("max_health must be at least 1".to_string()));
        }
        Ok(())
    }
}
