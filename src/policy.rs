// Opponent policy contract and scripted baseline policies.
//
// Anything that maps an observation batch to an action batch can sit in an
// opponent seat: a scripted heuristic, a learned model, or a remote service.
// The facade validates the returned batch before any tick runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::obs::{ObsBatch, LAYER_FOOD, LAYER_OWN_HEAD};
use crate::types::{Coord, Direction};

/// Batched observation-to-action mapping for one opponent seat.
///
/// `predict` must return one action value in `0..NUM_ACTIONS` per instance
/// (matching the batch's leading dimension). When `deterministic` is set the
/// policy must return the same actions for the same observations.
pub trait Policy: Send {
    fn predict(&mut self, obs: &ObsBatch<'_>, deterministic: bool) -> Vec<u8>;
}

/// Uniform random policy; useful as a weak opponent and in tests
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        RandomPolicy { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Policy for RandomPolicy {
    fn predict(&mut self, obs: &ObsBatch<'_>, deterministic: bool) -> Vec<u8> {
        if deterministic {
            // No preference among actions; pick a fixed one
            return vec![Direction::Up.index(); obs.num_envs()];
        }
        (0..obs.num_envs()).map(|_| self.rng.random_range(0..4)).collect()
    }
}

/// Greedy scripted policy: walks toward the nearest food cell it can see,
/// reading only its own observation channels. Deterministic by construction.
pub struct HungryPolicy;

impl HungryPolicy {
    fn head_position(obs: &ObsBatch<'_>, env: usize) -> Option<Coord> {
        let (height, width, _) = obs.shape();
        for y in 0..height {
            for x in 0..width {
                if obs.at(env, x, y, LAYER_OWN_HEAD) > 0 {
                    return Some(Coord::new(x as i32, y as i32));
                }
            }
        }
        None
    }

    fn nearest_food(obs: &ObsBatch<'_>, env: usize, head: &Coord) -> Option<Coord> {
        let (height, width, _) = obs.shape();
        let mut best: Option<(i32, Coord)> = None;
        for y in 0..height {
            for x in 0..width {
                if obs.at(env, x, y, LAYER_FOOD) > 0 {
                    let food = Coord::new(x as i32, y as i32);
                    let dist = head.manhattan_distance(&food);
                    if best.map_or(true, |(d, _)| dist < d) {
                        best = Some((dist, food));
                    }
                }
            }
        }
        best.map(|(_, food)| food)
    }
}

impl Policy for HungryPolicy {
    fn predict(&mut self, obs: &ObsBatch<'_>, _deterministic: bool) -> Vec<u8> {
        (0..obs.num_envs())
            .map(|env| {
                let Some(head) = Self::head_position(obs, env) else {
                    // Dead or absent snake; the action is ignored anyway
                    return Direction::Up.index();
                };
                let Some(food) = Self::nearest_food(obs, env, &head) else {
                    return Direction::Up.index();
                };
                Direction::all()
                    .iter()
                    .min_by_key(|dir| dir.apply(&head).manhattan_distance(&food))
                    .map(|dir| dir.index())
                    .unwrap_or(Direction::Up.index())
            })
            .collect()
    }
}
