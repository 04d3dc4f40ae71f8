// Tick scheduler: fans one tick (or reset) of every instance out across a
// fixed pool of worker threads and blocks the caller until all finish.
//
// The pool is built once at engine construction and reused for every call;
// no threads are spawned per step. Instances are partitioned into contiguous
// groups of roughly num_envs / num_threads, each ticked sequentially by one
// worker. Safety needs no locks: every closure invocation owns one instance
// and that instance's disjoint buffer views.

use rayon::prelude::*;

use crate::buffer::InstanceView;
use crate::error::EngineError;
use crate::game::GameInstance;

pub struct TickScheduler {
    pool: rayon::ThreadPool,
    num_threads: usize,
}

impl TickScheduler {
    pub fn new(num_threads: usize) -> Result<Self, EngineError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("snake-worker-{}", i))
            .build()
            .map_err(|e| EngineError::Config(format!("failed to build thread pool: {}", e)))?;
        Ok(TickScheduler { pool, num_threads })
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Runs `work` once per instance, in parallel, and returns only after
    /// every invocation has completed (the step/reset barrier).
    pub fn run<F>(&self, instances: &mut [GameInstance], views: Vec<InstanceView<'_>>, work: F)
    where
        F: Fn(usize, &mut GameInstance, InstanceView<'_>) + Sync + Send,
    {
        debug_assert_eq!(instances.len(), views.len());
        let chunk = instances.len().div_ceil(self.num_threads).max(1);
        self.pool.install(|| {
            instances
                .par_iter_mut()
                .zip(views.into_par_iter())
                .enumerate()
                .with_min_len(chunk)
                .for_each(|(env, (instance, view))| work(env, instance, view));
        });
    }
}
