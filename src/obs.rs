// Observation encoder: renders one instance's state into a fixed-size
// multi-channel byte image from a requesting agent's perspective.
//
// Channel scheme (fixed; absolute board coordinates, no rotation or
// centering — agent-relative only in the own/opponent split):
//
//   layer 0: own head, value = current health {1..=max_health}
//   layer 1: own body segments {0,1}
//   layer 2: opponent heads, value = that snake's health {1..=max_health}
//   layer 3: opponent body segments {0,1}
//   layer 4: food {0,1}
//   layer 5: board mask, 1 on every in-board cell (zeros past the edge of
//            the slice encode the wall)
//
// Memory layout is row-major (y, x, layer). Dead snakes are not rendered;
// a dead requesting agent sees empty own channels.

use crate::game::GameInstance;

/// Number of channels in the observation tensor
pub const NUM_LAYERS: usize = 6;

pub const LAYER_OWN_HEAD: usize = 0;
pub const LAYER_OWN_BODY: usize = 1;
pub const LAYER_OPP_HEADS: usize = 2;
pub const LAYER_OPP_BODIES: usize = 3;
pub const LAYER_FOOD: usize = 4;
pub const LAYER_BOARD: usize = 5;

/// Bytes in one agent's observation of one instance
pub fn obs_size(width: u32, height: u32) -> usize {
    width as usize * height as usize * NUM_LAYERS
}

/// Encodes the instance state as seen from `slot` into `out`, which must be
/// exactly `obs_size` bytes. Deterministic, no side effects; the slice is
/// zero-filled before anything is written.
pub fn encode(game: &GameInstance, slot: usize, out: &mut [u8]) {
    let width = game.board().width() as usize;
    debug_assert_eq!(out.len(), obs_size(game.board().width(), game.board().height()));

    out.fill(0);
    let write = |out: &mut [u8], x: i32, y: i32, layer: usize, value: u8| {
        out[(y as usize * width + x as usize) * NUM_LAYERS + layer] = value;
    };

    for (i, snake) in game.snakes().iter().enumerate() {
        if !snake.alive() {
            continue;
        }
        let (head_layer, body_layer) = if i == slot {
            (LAYER_OWN_HEAD, LAYER_OWN_BODY)
        } else {
            (LAYER_OPP_HEADS, LAYER_OPP_BODIES)
        };
        for segment in snake.body().iter().skip(1) {
            write(out, segment.x, segment.y, body_layer, 1);
        }
        let head = snake.head();
        let health = snake.health().min(u8::MAX as u32) as u8;
        write(out, head.x, head.y, head_layer, health.max(1));
    }

    for food in game.food() {
        write(out, food.x, food.y, LAYER_FOOD, 1);
    }

    for y in 0..game.board().height() as i32 {
        for x in 0..game.board().width() as i32 {
            write(out, x, y, LAYER_BOARD, 1);
        }
    }
}

/// Read-only, shape-checked view over one agent slot's observation batch
/// (`num_envs × height × width × NUM_LAYERS` bytes). This is the zero-copy
/// view handed to the controller and to opponent policies.
#[derive(Debug, Clone, Copy)]
pub struct ObsBatch<'a> {
    data: &'a [u8],
    num_envs: usize,
    width: u32,
    height: u32,
}

impl<'a> ObsBatch<'a> {
    pub(crate) fn new(data: &'a [u8], num_envs: usize, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), num_envs * obs_size(width, height));
        ObsBatch { data, num_envs, width, height }
    }

    /// Leading dimension of the batch
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    /// Observation shape per instance as (height, width, layers)
    pub fn shape(&self) -> (u32, u32, usize) {
        (self.height, self.width, NUM_LAYERS)
    }

    /// Raw bytes of the whole batch
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Raw bytes of one instance's observation.
    ///
    /// Panics if `env` is outside the batch's leading dimension.
    pub fn env(&self, env: usize) -> &'a [u8] {
        assert!(
            env < self.num_envs,
            "instance index {} out of range (batch holds {})",
            env,
            self.num_envs
        );
        let size = obs_size(self.width, self.height);
        &self.data[env * size..(env + 1) * size]
    }

    /// Single channel value at a board coordinate.
    ///
    /// Panics if `env` is outside the batch's leading dimension.
    pub fn at(&self, env: usize, x: u32, y: u32, layer: usize) -> u8 {
        let idx = (y as usize * self.width as usize + x as usize) * NUM_LAYERS + layer;
        self.env(env)[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::{GameInstance, GameSnapshot, SnakeSnapshot};
    use crate::types::Coord;

    fn two_snake_game() -> GameInstance {
        let mut config = Config::default_hardcoded();
        config.board.seed = Some(21);
        config.board.food_count = 0;
        let mut game = GameInstance::new(&config.board, &config.rules, 2, 0);
        game.restore(&GameSnapshot {
            turn: 0,
            over: false,
            snakes: vec![
                SnakeSnapshot {
                    body: vec![Coord::new(2, 2), Coord::new(1, 2), Coord::new(0, 2)],
                    health: 80,
                    alive: true,
                },
                SnakeSnapshot {
                    body: vec![Coord::new(8, 8), Coord::new(8, 7), Coord::new(8, 6)],
                    health: 100,
                    alive: true,
                },
            ],
            food: vec![Coord::new(5, 5)],
        })
        .unwrap();
        game
    }

    #[test]
    fn test_channel_separation_is_agent_relative() {
        let game = two_snake_game();
        let size = obs_size(11, 11);
        let mut obs0 = vec![0u8; size];
        let mut obs1 = vec![0u8; size];
        encode(&game, 0, &mut obs0);
        encode(&game, 1, &mut obs1);

        let view0 = ObsBatch::new(&obs0, 1, 11, 11);
        let view1 = ObsBatch::new(&obs1, 1, 11, 11);

        // Slot 0's head carries its health in the own-head channel
        assert_eq!(view0.at(0, 2, 2, LAYER_OWN_HEAD), 80);
        assert_eq!(view0.at(0, 2, 2, LAYER_OPP_HEADS), 0);
        // The same snake is an opponent from slot 1's perspective
        assert_eq!(view1.at(0, 2, 2, LAYER_OPP_HEADS), 80);
        assert_eq!(view1.at(0, 2, 2, LAYER_OWN_HEAD), 0);

        assert_eq!(view0.at(0, 1, 2, LAYER_OWN_BODY), 1);
        assert_eq!(view1.at(0, 1, 2, LAYER_OPP_BODIES), 1);
        assert_eq!(view0.at(0, 8, 7, LAYER_OPP_BODIES), 1);
    }

    #[test]
    fn test_food_and_board_layers() {
        let game = two_snake_game();
        let mut obs = vec![0u8; obs_size(11, 11)];
        encode(&game, 0, &mut obs);
        let view = ObsBatch::new(&obs, 1, 11, 11);
        assert_eq!(view.at(0, 5, 5, LAYER_FOOD), 1);
        assert_eq!(view.at(0, 4, 5, LAYER_FOOD), 0);
        for &(x, y) in &[(0, 0), (10, 10), (5, 0), (0, 5)] {
            assert_eq!(view.at(0, x, y, LAYER_BOARD), 1);
        }
    }

    #[test]
    fn test_encode_zero_fills_stale_data() {
        let game = two_snake_game();
        let mut obs = vec![0xFFu8; obs_size(11, 11)];
        encode(&game, 0, &mut obs);
        let view = ObsBatch::new(&obs, 1, 11, 11);
        // An empty cell must read zero in every snake/food layer
        for layer in [LAYER_OWN_HEAD, LAYER_OWN_BODY, LAYER_OPP_HEADS, LAYER_OPP_BODIES, LAYER_FOOD] {
            assert_eq!(view.at(0, 6, 3, layer), 0);
        }
    }

    #[test]
    fn test_dead_snakes_are_not_rendered() {
        let mut game = two_snake_game();
        let mut snap = game.snapshot();
        snap.snakes[1].alive = false;
        game.restore(&snap).unwrap();

        let mut obs = vec![0u8; obs_size(11, 11)];
        encode(&game, 0, &mut obs);
        let view = ObsBatch::new(&obs, 1, 11, 11);
        assert_eq!(view.at(0, 8, 8, LAYER_OPP_HEADS), 0);
        assert_eq!(view.at(0, 8, 7, LAYER_OPP_BODIES), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_env_index_past_batch_end_panics() {
        let bytes = vec![0u8; obs_size(5, 5)];
        let view = ObsBatch::new(&bytes, 1, 5, 5);
        view.env(1);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let game = two_snake_game();
        let mut a = vec![0u8; obs_size(11, 11)];
        let mut b = vec![0u8; obs_size(11, 11)];
        encode(&game, 0, &mut a);
        encode(&game, 0, &mut b);
        assert_eq!(a, b);
    }
}
