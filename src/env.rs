// Environment facade: the externally visible control surface composing the
// instance pool, tick scheduler, and buffer manager.
//
// A training loop drives it with reset()/step() and reads the primary
// agent's observation batch, rewards, and done flags. Opponent seats are
// filled by Policy collaborators queried with their own observation batches
// before every tick.

use std::time::Duration;

use log::info;

use crate::buffer::{BufferManager, InfoRecord, InstanceView};
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::EngineError;
use crate::game::{GameInstance, GameSnapshot};
use crate::obs::{self, ObsBatch, NUM_LAYERS};
use crate::policy::Policy;
use crate::pool::TickScheduler;
use crate::render::render_instance;
use crate::types::{Direction, NUM_ACTIONS};

/// Agent slot whose observations and rewards feed the training loop
pub const PRIMARY_SLOT: usize = 0;

/// Terminal episode statistics, reported once on the tick an episode ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeStats {
    /// Terminal reward component (shaping rewards excluded)
    pub reward: f32,
    /// Episode length in turns
    pub length: u32,
}

/// Per-instance metadata returned by `step`
#[derive(Debug, Clone, Copy, Default)]
pub struct StepMetadata {
    /// Present only on the tick the instance's episode ended
    pub episode: Option<EpisodeStats>,
}

/// Everything `step` returns: the primary observation batch plus
/// per-instance rewards, done flags, and metadata
#[derive(Debug)]
pub struct StepResult<'a> {
    pub observations: ObsBatch<'a>,
    pub rewards: Vec<f32>,
    pub dones: Vec<bool>,
    pub metadata: Vec<StepMetadata>,
}

/// Multi-threaded multi-agent snake environment
pub struct SnakeEnv {
    config: Config,
    scheduler: TickScheduler,
    instances: Vec<GameInstance>,
    buffers: BufferManager,
    opponents: Vec<Box<dyn Policy>>,
    /// Latched done flags; a finished instance stays done (and frozen) until
    /// the next reset
    terminated: Vec<bool>,
    debug: DebugLogger,
}

impl std::fmt::Debug for SnakeEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnakeEnv")
            .field("num_envs", &self.config.engine.num_envs)
            .field("agents_per_env", &self.config.engine.agents_per_env)
            .finish_non_exhaustive()
    }
}

impl SnakeEnv {
    /// Builds the engine: validates the configuration, creates the worker
    /// pool, instances, and buffers, and encodes the initial observations.
    /// Requires exactly `agents_per_env - 1` opponent policies.
    pub fn new(config: Config, opponents: Vec<Box<dyn Policy>>) -> Result<Self, EngineError> {
        config.validate()?;
        let expected_opponents = config.engine.agents_per_env - 1;
        if opponents.len() != expected_opponents {
            return Err(EngineError::Config(format!(
                "{} agents per instance require {} opponent policies, got {}",
                config.engine.agents_per_env,
                expected_opponents,
                opponents.len()
            )));
        }

        let scheduler = TickScheduler::new(config.engine.num_threads)?;
        let instances = (0..config.engine.num_envs)
            .map(|i| GameInstance::new(&config.board, &config.rules, config.engine.agents_per_env, i))
            .collect();
        let buffers = BufferManager::new(
            config.engine.num_envs,
            config.engine.agents_per_env,
            config.board.width,
            config.board.height,
        );
        let debug = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
        let terminated = vec![false; config.engine.num_envs];

        let mut env = SnakeEnv { config, scheduler, instances, buffers, opponents, terminated, debug };
        env.sync_buffers();
        info!(
            "Engine ready: {} instances x {} agents on {} threads, {}x{}x{} observations",
            env.config.engine.num_envs,
            env.config.engine.agents_per_env,
            env.scheduler.num_threads(),
            env.config.board.height,
            env.config.board.width,
            NUM_LAYERS,
        );
        Ok(env)
    }

    /// Re-initializes every instance to a fresh layout and returns the
    /// primary agent's observation batch
    pub fn reset(&mut self) -> ObsBatch<'_> {
        self.terminated.fill(false);
        self.buffers.zero_observations();
        let agents = self.config.engine.agents_per_env;
        let views = self.buffers.split_instances();
        self.scheduler.run(&mut self.instances, views, |_, instance, mut view| {
            instance.reset();
            write_state(instance, &mut view, agents);
        });
        self.primary_observations()
    }

    /// Advances every instance by one tick.
    ///
    /// `actions` holds the primary agent's action per instance. Opponent
    /// actions are collected from their policies first; every action source
    /// is validated before any tick runs, so a failed call leaves the
    /// simulation state untouched.
    pub fn step(&mut self, actions: &[u8]) -> Result<StepResult<'_>, EngineError> {
        let num_envs = self.buffers.num_envs();
        validate_action_batch(actions, num_envs, PRIMARY_SLOT)?;
        self.buffers.write_actions(PRIMARY_SLOT, actions)?;

        for i in 0..self.opponents.len() {
            let slot = i + 1;
            let batch = {
                let observations = self.buffers.obs_batch(slot)?;
                self.opponents[i].predict(&observations, true)
            };
            validate_action_batch(&batch, num_envs, slot)?;
            self.buffers.write_actions(slot, &batch)?;
        }

        self.buffers.zero_observations();
        let agents = self.config.engine.agents_per_env;
        let views = self.buffers.split_instances();
        self.scheduler.run(&mut self.instances, views, |_, instance, mut view| {
            if !instance.is_over() {
                for slot in 0..agents {
                    let direction = match Direction::from_index(view.actions[slot]) {
                        Some(d) => d,
                        // Range-checked above; a stray value here is a bug
                        None => unreachable!("action values are validated before the tick"),
                    };
                    instance.set_action(slot, direction);
                }
                instance.step();
            }
            write_state(instance, &mut view, agents);
        });

        let rewards_cfg = self.config.rewards.clone();
        let mut rewards = vec![0.0f32; num_envs];
        let mut dones = vec![false; num_envs];
        let mut metadata = vec![StepMetadata::default(); num_envs];
        for (env, record) in self.buffers.info().iter().enumerate() {
            if self.terminated[env] {
                // Frozen instance: done stays latched, nothing new happened
                dones[env] = true;
                continue;
            }
            if record.ate {
                rewards[env] += rewards_cfg.eat_reward;
            }
            if record.over {
                dones[env] = true;
                self.terminated[env] = true;
                let terminal = if record.alive {
                    if record.turn > rewards_cfg.min_turns_for_win {
                        rewards_cfg.win_reward
                    } else {
                        0.0
                    }
                } else {
                    rewards_cfg.lose_reward
                };
                rewards[env] += terminal;
                metadata[env].episode = Some(EpisodeStats { reward: terminal, length: record.turn });
            }
        }

        if self.debug.enabled() {
            self.debug
                .log_step(0, &self.buffers.info()[0], &self.instances[0].snapshot());
        }

        Ok(StepResult {
            observations: self.primary_observations(),
            rewards,
            dones,
            metadata,
        })
    }

    /// Produces a human-viewable snapshot of the first instance, pacing the
    /// caller by the configured pause. Not part of the training hot path.
    pub fn render(&self) -> String {
        let frame = render_instance(&self.instances[0]);
        println!("{}", frame);
        std::thread::sleep(Duration::from_millis(self.config.render.pause_ms));
        frame
    }

    /// Releases all engine resources: worker threads, buffers, instances.
    /// Consuming the environment makes a second call impossible.
    pub fn close(self) {
        info!(
            "Closing engine ({} instances, {} threads)",
            self.config.engine.num_envs,
            self.scheduler.num_threads()
        );
    }

    /// Restores a scripted layout into one instance and re-encodes its
    /// observations and info record. Used by fixtures, replays, and tests.
    pub fn load_snapshot(&mut self, env: usize, snapshot: &GameSnapshot) -> Result<(), EngineError> {
        if env >= self.instances.len() {
            return Err(EngineError::EnvOutOfRange { env, envs: self.instances.len() });
        }
        self.instances[env].restore(snapshot)?;
        self.terminated[env] = snapshot.over;

        let agents = self.config.engine.agents_per_env;
        let mut view = self
            .buffers
            .split_instances()
            .into_iter()
            .nth(env)
            .expect("instance index checked above");
        write_state(&self.instances[env], &mut view, agents);
        Ok(())
    }

    /// Zero-copy observation batch for any agent slot
    pub fn observations(&self, slot: usize) -> Result<ObsBatch<'_>, EngineError> {
        self.buffers.obs_batch(slot)
    }

    /// Info records from the most recent tick, one per instance
    pub fn info(&self) -> &[InfoRecord] {
        self.buffers.info()
    }

    /// Read access to one instance's game state
    pub fn instance(&self, env: usize) -> &GameInstance {
        &self.instances[env]
    }

    pub fn num_envs(&self) -> usize {
        self.instances.len()
    }

    pub fn num_agents(&self) -> usize {
        self.config.engine.agents_per_env
    }

    /// Observation shape per instance as (height, width, layers)
    pub fn obs_shape(&self) -> (u32, u32, usize) {
        (self.config.board.height, self.config.board.width, NUM_LAYERS)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes observations and info for the current state without advancing
    /// or resetting anything
    fn sync_buffers(&mut self) {
        self.buffers.zero_observations();
        let agents = self.config.engine.agents_per_env;
        let views = self.buffers.split_instances();
        self.scheduler.run(&mut self.instances, views, |_, instance, mut view| {
            write_state(instance, &mut view, agents);
        });
    }

    fn primary_observations(&self) -> ObsBatch<'_> {
        self.buffers
            .obs_batch(PRIMARY_SLOT)
            .expect("primary slot always exists")
    }
}

/// Encodes every agent's observation of `instance` and fills its info record
fn write_state(instance: &GameInstance, view: &mut InstanceView<'_>, num_agents: usize) {
    for slot in 0..num_agents {
        obs::encode(instance, slot, &mut view.obs[slot][..]);
    }
    let primary = instance.snake(PRIMARY_SLOT);
    *view.info = InfoRecord {
        health: primary.health(),
        length: primary.length() as u32,
        turn: instance.turn(),
        alive: primary.alive(),
        ate: primary.ate(),
        over: instance.is_over(),
    };
}

fn validate_action_batch(batch: &[u8], expected: usize, slot: usize) -> Result<(), EngineError> {
    if batch.len() != expected {
        return Err(EngineError::ActionBatchLength { slot, got: batch.len(), expected });
    }
    for (env, &value) in batch.iter().enumerate() {
        if value >= NUM_ACTIONS {
            return Err(EngineError::InvalidAction { value, env, slot });
        }
    }
    Ok(())
}
