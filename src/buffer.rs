// Buffer manager: owns the observation, action, and info memory regions for
// the whole instance pool.
//
// All three regions are allocated once at construction and reused for every
// reset/step. Layout is agent-major: each agent slot has one contiguous
// `num_envs * obs_size` observation block and one `num_envs` action block,
// so the controller can view a whole batch per slot without copying.
// `split_instances` carves the regions into per-instance views whose
// disjointness is what makes the parallel tick safe.

use serde::Serialize;

use crate::error::EngineError;
use crate::obs::ObsBatch;

/// Per-instance summary emitted after each tick, describing the primary agent
/// and the episode state. Overwritten every tick.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct InfoRecord {
    pub health: u32,
    pub length: u32,
    pub turn: u32,
    pub alive: bool,
    pub ate: bool,
    pub over: bool,
}

/// Exclusive view of everything one instance touches during a tick: one
/// observation chunk per agent slot, the instance's info record, and a copy
/// of its action bytes (read-only input, copied out so the shared action
/// region is never aliased across workers).
pub struct InstanceView<'a> {
    pub obs: Vec<&'a mut [u8]>,
    pub info: &'a mut InfoRecord,
    pub actions: Vec<u8>,
}

/// Owns the shared memory regions for observations, actions, and info records
pub struct BufferManager {
    /// One observation block per agent slot, `num_envs * obs_size` each
    obs: Vec<Vec<u8>>,
    /// One action block per agent slot, `num_envs` each
    actions: Vec<Vec<u8>>,
    info: Vec<InfoRecord>,
    num_envs: usize,
    obs_size: usize,
    width: u32,
    height: u32,
}

impl BufferManager {
    pub fn new(num_envs: usize, num_agents: usize, width: u32, height: u32) -> Self {
        let obs_size = crate::obs::obs_size(width, height);
        BufferManager {
            obs: (0..num_agents).map(|_| vec![0u8; num_envs * obs_size]).collect(),
            actions: (0..num_agents).map(|_| vec![0u8; num_envs]).collect(),
            info: vec![InfoRecord::default(); num_envs],
            num_envs,
            obs_size,
            width,
            height,
        }
    }

    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    pub fn num_agents(&self) -> usize {
        self.obs.len()
    }

    /// Zero-copy observation batch for one agent slot
    pub fn obs_batch(&self, slot: usize) -> Result<ObsBatch<'_>, EngineError> {
        let buf = self.obs.get(slot).ok_or(EngineError::SlotOutOfRange {
            slot,
            agents: self.obs.len(),
        })?;
        Ok(ObsBatch::new(buf, self.num_envs, self.width, self.height))
    }

    /// Copies a validated action batch into one agent slot's action region
    pub fn write_actions(&mut self, slot: usize, batch: &[u8]) -> Result<(), EngineError> {
        if batch.len() != self.num_envs {
            return Err(EngineError::ActionBatchLength {
                slot,
                got: batch.len(),
                expected: self.num_envs,
            });
        }
        let buf = self.actions.get_mut(slot).ok_or(EngineError::SlotOutOfRange {
            slot,
            agents: self.obs.len(),
        })?;
        buf.copy_from_slice(batch);
        Ok(())
    }

    /// Info records for the whole pool, one per instance
    pub fn info(&self) -> &[InfoRecord] {
        &self.info
    }

    /// Clears every observation block before a reset/step re-encodes them
    pub fn zero_observations(&mut self) {
        for buf in &mut self.obs {
            buf.fill(0);
        }
    }

    /// Splits the buffers into `num_envs` mutually disjoint views, one per
    /// instance, for the duration of a tick. Ownership of each region hands
    /// back to the controller when the views are dropped at the step barrier.
    pub fn split_instances(&mut self) -> Vec<InstanceView<'_>> {
        let num_agents = self.obs.len();
        let obs_size = self.obs_size;
        let actions = &self.actions;

        let mut views: Vec<InstanceView<'_>> = self
            .info
            .iter_mut()
            .enumerate()
            .map(|(env, info)| InstanceView {
                obs: Vec::with_capacity(num_agents),
                info,
                actions: actions.iter().map(|slot| slot[env]).collect(),
            })
            .collect();

        for slot_buf in &mut self.obs {
            for (view, chunk) in views.iter_mut().zip(slot_buf.chunks_exact_mut(obs_size)) {
                view.obs.push(chunk);
            }
        }
        views
    }
}
