// Game instance: one board, its snakes and food, and the one-tick rule
// resolution (movement, collisions, eating, starvation, episode end).
//
// All collisions within a tick are resolved simultaneously against the board
// as it stood before any snake moved, so the outcome never depends on the
// order agents are processed in.

use std::collections::{HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{BoardConfig, RulesConfig};
use crate::error::EngineError;
use crate::types::{Coord, Direction};

/// Occupancy tag for a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Food,
    /// Body segment (or head) of the snake in this agent slot
    Snake(u8),
}

/// Fixed-size 2D occupancy grid
#[derive(Debug, Clone)]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Board {
    fn new(width: u32, height: u32) -> Self {
        Board {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.width as i32 && coord.y >= 0 && coord.y < self.height as i32
    }

    /// Occupancy at an in-bounds coordinate
    pub fn at(&self, coord: &Coord) -> Cell {
        self.cells[self.index(coord)]
    }

    /// Number of non-empty cells; used by the occupancy invariant checks
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    fn set(&mut self, coord: &Coord, cell: Cell) {
        let i = self.index(coord);
        self.cells[i] = cell;
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    fn index(&self, coord: &Coord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }
}

/// One agent's snake within an instance
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Coord>,
    health: u32,
    alive: bool,
    ate: bool,
}

impl Snake {
    fn spawn(at: Coord, length: usize, health: u32) -> Self {
        // Segments start stacked on the spawn cell and unfold as the snake
        // moves, so a fresh snake occupies exactly one cell.
        let mut body = VecDeque::with_capacity(2 * length);
        for _ in 0..length {
            body.push_back(at);
        }
        Snake { body, health, alive: true, ate: false }
    }

    /// Head coordinate; the body is never empty
    pub fn head(&self) -> Coord {
        self.body[0]
    }

    /// Body segments, head first
    pub fn body(&self) -> &VecDeque<Coord> {
        &self.body
    }

    /// Segment count, including stacked pending-growth segments
    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    /// Whether this snake ate food during the most recent tick
    pub fn ate(&self) -> bool {
        self.ate
    }
}

/// Serializable state of one snake, used by snapshots and the debug log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeSnapshot {
    pub body: Vec<Coord>,
    pub health: u32,
    pub alive: bool,
}

/// Complete serializable state of one instance. Snapshots restore scripted
/// layouts for tests and replays, and feed the JSONL debug log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: u32,
    pub over: bool,
    pub snakes: Vec<SnakeSnapshot>,
    pub food: Vec<Coord>,
}

/// One independent, self-contained simulated game
pub struct GameInstance {
    board: Board,
    snakes: Vec<Snake>,
    food: HashSet<Coord>,
    actions: Vec<Direction>,
    turn: u32,
    over: bool,
    rules: RulesConfig,
    food_count: usize,
    starting_length: usize,
    rng: StdRng,
}

/// Random placement attempts before falling back to a board scan
const PLACEMENT_ATTEMPTS: u32 = 1000;

/// Random food respawn attempts per tick; on a crowded board the shortfall
/// carries over to the next tick
const RESPAWN_ATTEMPTS: u32 = 100;

impl GameInstance {
    /// Creates an instance with a fresh random layout. `index` is the
    /// instance's position in the pool and diversifies the derived seed.
    pub fn new(board: &BoardConfig, rules: &RulesConfig, num_agents: usize, index: usize) -> Self {
        let rng = match board.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_os_rng(),
        };
        let mut instance = GameInstance {
            board: Board::new(board.width, board.height),
            snakes: Vec::with_capacity(num_agents),
            food: HashSet::with_capacity(2 * board.food_count),
            actions: vec![Direction::Up; num_agents],
            turn: 0,
            over: false,
            rules: rules.clone(),
            food_count: board.food_count,
            starting_length: board.starting_length,
            rng,
        };
        let agents = num_agents;
        instance.reset_with_agents(agents);
        instance
    }

    /// Re-rolls the instance to a fresh initial layout
    pub fn reset(&mut self) {
        let agents = self.actions.len();
        self.reset_with_agents(agents);
    }

    fn reset_with_agents(&mut self, num_agents: usize) {
        self.board.clear();
        self.food.clear();
        self.snakes.clear();
        self.turn = 0;
        self.over = false;
        self.actions.fill(Direction::Up);

        for slot in 0..num_agents {
            let at = self.free_cell();
            self.board.set(&at, Cell::Snake(slot as u8));
            self.snakes.push(Snake::spawn(at, self.starting_length, self.rules.max_health));
        }
        for _ in 0..self.food_count {
            let at = self.free_cell();
            self.board.set(&at, Cell::Food);
            self.food.insert(at);
        }
    }

    /// Sets the pending action for one agent slot, applied on the next tick
    pub fn set_action(&mut self, slot: usize, direction: Direction) {
        self.actions[slot] = direction;
    }

    /// Advances the game by one turn. A finished instance is frozen: the call
    /// is a no-op until the next `reset()`.
    pub fn step(&mut self) {
        if self.over {
            return;
        }
        self.turn += 1;
        let k = self.snakes.len();

        for snake in &mut self.snakes {
            snake.ate = false;
        }

        // Proposed head positions for every living snake
        let mut next_heads: Vec<Option<Coord>> = vec![None; k];
        for i in 0..k {
            if self.snakes[i].alive {
                next_heads[i] = Some(self.actions[i].apply(&self.snakes[i].head()));
            }
        }

        // Simultaneous collision resolution against the pre-move board.
        // A shared destination cell kills every head moving into it; there is
        // no length or slot-index priority.
        let mut killed = vec![false; k];
        for i in 0..k {
            let Some(next) = next_heads[i] else { continue };
            if !self.board.in_bounds(&next) {
                killed[i] = true;
                continue;
            }
            if matches!(self.board.at(&next), Cell::Snake(_)) {
                killed[i] = true;
                continue;
            }
            for j in 0..k {
                if j != i && next_heads[j] == Some(next) {
                    killed[i] = true;
                    break;
                }
            }
        }

        // Survivors move; a head landing on food grows and refills health
        let mut eaten: Vec<Coord> = Vec::new();
        for i in 0..k {
            let Some(next) = next_heads[i] else { continue };
            if killed[i] {
                continue;
            }
            let snake = &mut self.snakes[i];
            snake.body.push_front(next);
            if self.food.contains(&next) {
                snake.health = self.rules.max_health;
                snake.ate = true;
                eaten.push(next);
            } else {
                snake.body.pop_back();
            }
        }
        for coord in &eaten {
            self.food.remove(coord);
        }

        for i in 0..k {
            if killed[i] {
                self.snakes[i].alive = false;
            }
        }

        // Health decrement and starvation for survivors that did not eat
        for snake in &mut self.snakes {
            if snake.alive && !snake.ate {
                snake.health = snake.health.saturating_sub(self.rules.health_loss_per_turn);
                if snake.health == 0 {
                    snake.alive = false;
                }
            }
        }

        self.rebuild_board();

        // Food regeneration keeps the configured count on the board when
        // space allows
        while self.food.len() < self.food_count {
            match self.free_cell_bounded(RESPAWN_ATTEMPTS) {
                Some(at) => {
                    self.board.set(&at, Cell::Food);
                    self.food.insert(at);
                }
                None => break,
            }
        }

        let alive = self.snakes.iter().filter(|s| s.alive).count();
        let last_standing = if k > 1 { alive <= 1 } else { alive == 0 };
        let primary_dead = self.rules.end_on_primary_death && !self.snakes[0].alive;
        let turn_capped = self.rules.max_turns > 0 && self.turn >= self.rules.max_turns;
        self.over = last_standing || primary_dead || turn_capped;
    }

    /// Rewrites the occupancy grid from current snake and food state.
    /// Dead snakes leave the board.
    fn rebuild_board(&mut self) {
        self.board.clear();
        for (slot, snake) in self.snakes.iter().enumerate() {
            if !snake.alive {
                continue;
            }
            for segment in &snake.body {
                self.board.set(segment, Cell::Snake(slot as u8));
            }
        }
        for coord in &self.food {
            self.board.set(coord, Cell::Food);
        }
    }

    /// Random empty cell; falls back to scanning the board so reset always
    /// terminates (validation guarantees a free cell exists)
    fn free_cell(&mut self) -> Coord {
        if let Some(coord) = self.free_cell_bounded(PLACEMENT_ATTEMPTS) {
            return coord;
        }
        for y in 0..self.board.height as i32 {
            for x in 0..self.board.width as i32 {
                let coord = Coord::new(x, y);
                if self.board.at(&coord) == Cell::Empty {
                    return coord;
                }
            }
        }
        unreachable!("config validation guarantees at least one free cell");
    }

    fn free_cell_bounded(&mut self, attempts: u32) -> Option<Coord> {
        for _ in 0..attempts {
            let coord = Coord::new(
                self.rng.random_range(0..self.board.width as i32),
                self.rng.random_range(0..self.board.height as i32),
            );
            if self.board.at(&coord) == Cell::Empty {
                return Some(coord);
            }
        }
        None
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn num_agents(&self) -> usize {
        self.snakes.len()
    }

    pub fn snake(&self, slot: usize) -> &Snake {
        &self.snakes[slot]
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn food(&self) -> &HashSet<Coord> {
        &self.food
    }

    /// Captures the full instance state for logging or later restore
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            turn: self.turn,
            over: self.over,
            snakes: self
                .snakes
                .iter()
                .map(|s| SnakeSnapshot {
                    body: s.body.iter().copied().collect(),
                    health: s.health,
                    alive: s.alive,
                })
                .collect(),
            food: self.food.iter().copied().collect(),
        }
    }

    /// Restores a scripted layout. The snapshot must match the instance's
    /// agent count, fit the board, and keep distinct snakes and food on
    /// distinct cells.
    pub fn restore(&mut self, snapshot: &GameSnapshot) -> Result<(), EngineError> {
        if snapshot.snakes.len() != self.snakes.len() {
            return Err(EngineError::Snapshot(format!(
                "snapshot has {} snakes, instance has {} agent slots",
                snapshot.snakes.len(),
                self.snakes.len()
            )));
        }
        let mut taken: HashSet<Coord> = HashSet::new();
        for (slot, snake) in snapshot.snakes.iter().enumerate() {
            if snake.body.is_empty() {
                return Err(EngineError::Snapshot(format!("snake {} has an empty body", slot)));
            }
            if snake.alive && snake.health == 0 {
                return Err(EngineError::Snapshot(format!("snake {} is alive at zero health", slot)));
            }
            let mut own: HashSet<Coord> = HashSet::new();
            for segment in &snake.body {
                if !self.board.in_bounds(segment) {
                    return Err(EngineError::Snapshot(format!(
                        "snake {} segment ({}, {}) is off the board",
                        slot, segment.x, segment.y
                    )));
                }
                // Stacked segments within one snake are legal pending growth
                if snake.alive && own.insert(*segment) && !taken.insert(*segment) {
                    return Err(EngineError::Snapshot(format!(
                        "cell ({}, {}) is occupied twice",
                        segment.x, segment.y
                    )));
                }
            }
        }
        for coord in &snapshot.food {
            if !self.board.in_bounds(coord) {
                return Err(EngineError::Snapshot(format!(
                    "food at ({}, {}) is off the board",
                    coord.x, coord.y
                )));
            }
            if !taken.insert(*coord) {
                return Err(EngineError::Snapshot(format!(
                    "cell ({}, {}) is occupied twice",
                    coord.x, coord.y
                )));
            }
        }

        self.turn = snapshot.turn;
        self.over = snapshot.over;
        self.food = snapshot.food.iter().copied().collect();
        for (snake, snap) in self.snakes.iter_mut().zip(&snapshot.snakes) {
            snake.body = snap.body.iter().copied().collect();
            snake.health = snap.health;
            snake.alive = snap.alive;
            snake.ate = false;
        }
        self.actions.fill(Direction::Up);
        self.rebuild_board();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_instance(num_agents: usize) -> GameInstance {
        let mut config = Config::default_hardcoded();
        config.board.seed = Some(7);
        config.board.food_count = 0;
        GameInstance::new(&config.board, &config.rules, num_agents, 0)
    }

    fn snake(body: &[(i32, i32)], health: u32) -> SnakeSnapshot {
        SnakeSnapshot {
            body: body.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            health,
            alive: true,
        }
    }

    fn layout(snakes: Vec<SnakeSnapshot>, food: &[(i32, i32)]) -> GameSnapshot {
        GameSnapshot {
            turn: 0,
            over: false,
            snakes,
            food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        }
    }

    #[test]
    fn test_reset_state() {
        let game = test_instance(2);
        assert_eq!(game.turn(), 0);
        assert!(!game.is_over());
        for snake in game.snakes() {
            assert!(snake.alive());
            assert_eq!(snake.health(), 100);
            assert_eq!(snake.length(), 3);
        }
    }

    #[test]
    fn test_spawned_snakes_are_stacked() {
        let game = test_instance(2);
        // Each fresh snake occupies exactly one cell
        assert_eq!(game.board().occupied_cells(), 2);
    }

    #[test]
    fn test_wall_collision_kills() {
        let mut game = test_instance(1);
        game.restore(&layout(vec![snake(&[(0, 5), (1, 5), (2, 5)], 100)], &[]))
            .unwrap();
        game.set_action(0, Direction::Left);
        game.step();
        assert!(!game.snake(0).alive());
        assert!(game.is_over());
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_neck_reversal_is_self_collision() {
        let mut game = test_instance(1);
        game.restore(&layout(vec![snake(&[(5, 5), (4, 5), (3, 5)], 100)], &[]))
            .unwrap();
        game.set_action(0, Direction::Left);
        game.step();
        assert!(!game.snake(0).alive(), "moving onto the neck must be fatal");
    }

    #[test]
    fn test_moving_onto_departing_tail_is_fatal() {
        // Collisions are checked against pre-move positions, so a cell a
        // tail is about to vacate still kills.
        let mut game = test_instance(1);
        game.restore(&layout(
            vec![snake(&[(5, 5), (5, 4), (4, 4), (4, 5)], 100)],
            &[],
        ))
        .unwrap();
        game.set_action(0, Direction::Left);
        game.step();
        assert!(!game.snake(0).alive());
    }

    #[test]
    fn test_head_to_head_same_cell_both_die() {
        let mut game = test_instance(2);
        game.restore(&layout(
            vec![
                snake(&[(4, 5), (3, 5), (2, 5)], 100),
                // Longer snake gets no priority
                snake(&[(6, 5), (7, 5), (8, 5), (8, 6)], 100),
            ],
            &[],
        ))
        .unwrap();
        game.set_action(0, Direction::Right);
        game.set_action(1, Direction::Left);
        game.step();
        assert!(!game.snake(0).alive());
        assert!(!game.snake(1).alive());
        assert!(game.is_over());
    }

    #[test]
    fn test_head_swap_both_die() {
        // Heads passing through each other hit the other's pre-move head cell
        let mut game = test_instance(2);
        game.restore(&layout(
            vec![
                snake(&[(4, 5), (3, 5), (2, 5)], 100),
                snake(&[(5, 5), (6, 5), (7, 5)], 100),
            ],
            &[],
        ))
        .unwrap();
        game.set_action(0, Direction::Right);
        game.set_action(1, Direction::Left);
        game.step();
        assert!(!game.snake(0).alive());
        assert!(!game.snake(1).alive());
    }

    #[test]
    fn test_body_collision_kills_only_the_mover() {
        let mut game = test_instance(2);
        game.restore(&layout(
            vec![
                snake(&[(4, 5), (3, 5), (2, 5)], 100),
                snake(&[(5, 6), (5, 5), (5, 4)], 100),
            ],
            &[],
        ))
        .unwrap();
        game.set_action(0, Direction::Right); // into snake 1's middle
        game.set_action(1, Direction::Up);
        game.step();
        assert!(!game.snake(0).alive());
        assert!(game.snake(1).alive());
    }

    #[test]
    fn test_eating_grows_and_restores_health() {
        let mut game = test_instance(1);
        game.restore(&layout(vec![snake(&[(4, 5), (3, 5), (2, 5)], 37)], &[(5, 5)]))
            .unwrap();
        game.set_action(0, Direction::Right);
        game.step();
        let snake = game.snake(0);
        assert!(snake.alive());
        assert!(snake.ate());
        assert_eq!(snake.length(), 4);
        assert_eq!(snake.health(), 100);
        assert!(game.food().is_empty() || !game.food().contains(&Coord::new(5, 5)));

        // The flag clears on the next non-eating tick
        game.set_action(0, Direction::Right);
        game.step();
        assert!(!game.snake(0).ate());
        assert_eq!(game.snake(0).length(), 4);
        assert_eq!(game.snake(0).health(), 99);
    }

    #[test]
    fn test_food_regenerates_to_target_count() {
        let mut config = Config::default_hardcoded();
        config.board.seed = Some(11);
        config.board.food_count = 3;
        let mut game = GameInstance::new(&config.board, &config.rules, 1, 0);
        assert_eq!(game.food().len(), 3);

        // Walk the snake onto a food cell; regeneration tops the board back up
        let food = *game.food().iter().next().unwrap();
        let start = Coord::new(food.x, if food.y > 0 { food.y - 1 } else { food.y + 1 });
        game.restore(&layout(
            vec![snake(&[(start.x, start.y), (start.x, start.y), (start.x, start.y)], 100)],
            &[(food.x, food.y)],
        ))
        .unwrap();
        game.set_action(0, if food.y > start.y { Direction::Up } else { Direction::Down });
        game.step();
        assert!(game.snake(0).ate());
        assert!(!game.food().contains(&food), "eaten food cell is cleared");
        assert_eq!(game.food().len(), 3, "regeneration restores the target count");
    }

    #[test]
    fn test_starvation() {
        let mut game = test_instance(1);
        game.restore(&layout(vec![snake(&[(5, 5), (4, 5), (3, 5)], 1)], &[]))
            .unwrap();
        game.set_action(0, Direction::Right);
        game.step();
        assert!(!game.snake(0).alive(), "health hit zero without food");
        assert_eq!(game.snake(0).health(), 0);
        assert!(game.is_over());
    }

    #[test]
    fn test_turn_cap_ends_episode() {
        let mut config = Config::default_hardcoded();
        config.board.seed = Some(3);
        config.board.food_count = 0;
        config.rules.max_turns = 2;
        let mut game = GameInstance::new(&config.board, &config.rules, 1, 0);
        game.restore(&layout(vec![snake(&[(1, 5), (1, 5), (1, 5)], 100)], &[]))
            .unwrap();
        game.set_action(0, Direction::Right);
        game.step();
        assert!(!game.is_over());
        game.step();
        assert!(game.is_over());
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn test_finished_instance_is_frozen() {
        let mut game = test_instance(1);
        game.restore(&layout(vec![snake(&[(0, 0), (0, 1), (0, 2)], 100)], &[]))
            .unwrap();
        game.set_action(0, Direction::Down);
        game.step();
        assert!(game.is_over());
        assert_eq!(game.turn(), 1);
        game.step();
        game.step();
        assert!(game.is_over());
        assert_eq!(game.turn(), 1, "frozen instance must not advance");
    }

    #[test]
    fn test_last_snake_standing_multi_agent() {
        let mut config = Config::default_hardcoded();
        config.board.seed = Some(5);
        config.board.food_count = 0;
        config.rules.end_on_primary_death = false;
        let mut game = GameInstance::new(&config.board, &config.rules, 2, 0);
        game.restore(&layout(
            vec![
                snake(&[(0, 0), (0, 1), (0, 2)], 100),
                snake(&[(5, 5), (4, 5), (3, 5)], 100),
            ],
            &[],
        ))
        .unwrap();
        game.set_action(0, Direction::Down); // off the board
        game.set_action(1, Direction::Right);
        game.step();
        assert!(!game.snake(0).alive());
        assert!(game.snake(1).alive());
        assert!(game.is_over(), "one snake left means last-snake-standing");
    }

    #[test]
    fn test_occupancy_invariant_over_random_play() {
        let mut config = Config::default_hardcoded();
        config.board.seed = Some(99);
        config.board.food_count = 4;
        let mut game = GameInstance::new(&config.board, &config.rules, 3, 0);
        let mut rng_dir = 0u8;
        for _ in 0..40 {
            for slot in 0..3 {
                rng_dir = rng_dir.wrapping_mul(31).wrapping_add(17);
                game.set_action(slot, Direction::from_index(rng_dir % 4).unwrap());
            }
            game.step();
            let mut expected: HashSet<Coord> = HashSet::new();
            for snake in game.snakes().iter().filter(|s| s.alive()) {
                expected.extend(snake.body().iter().copied());
            }
            let expected = expected.len() + game.food().len();
            assert_eq!(game.board().occupied_cells(), expected);
            if game.is_over() {
                break;
            }
        }
    }

    #[test]
    fn test_restore_rejects_bad_geometry() {
        let mut game = test_instance(1);
        // Off-board segment
        assert!(game
            .restore(&layout(vec![snake(&[(20, 5), (19, 5), (18, 5)], 100)], &[]))
            .is_err());
        // Food on a snake
        assert!(game
            .restore(&layout(vec![snake(&[(5, 5), (4, 5), (3, 5)], 100)], &[(5, 5)]))
            .is_err());
        // Wrong agent count
        assert!(game
            .restore(&layout(
                vec![
                    snake(&[(5, 5), (4, 5)], 100),
                    snake(&[(8, 8), (8, 7)], 100),
                ],
                &[],
            ))
            .is_err());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut game = test_instance(2);
        let snap = game.snapshot();
        game.restore(&snap).unwrap();
        let again = game.snapshot();
        assert_eq!(snap.turn, again.turn);
        assert_eq!(snap.over, again.over);
        assert_eq!(snap.snakes.len(), again.snakes.len());
        for (a, b) in snap.snakes.iter().zip(&again.snakes) {
            assert_eq!(a.body, b.body);
            assert_eq!(a.health, b.health);
            assert_eq!(a.alive, b.alive);
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let mut config = Config::default_hardcoded();
        config.board.seed = Some(1234);
        config.board.food_count = 3;
        let a = GameInstance::new(&config.board, &config.rules, 2, 0);
        let b = GameInstance::new(&config.board, &config.rules, 2, 0);
        assert_eq!(a.snake(0).head(), b.snake(0).head());
        assert_eq!(a.snake(1).head(), b.snake(1).head());
        let food_a: HashSet<Coord> = a.food().iter().copied().collect();
        let food_b: HashSet<Coord> = b.food().iter().copied().collect();
        assert_eq!(food_a, food_b);

        // A different pool index diversifies the layout
        let c = GameInstance::new(&config.board, &config.rules, 2, 1);
        let food_c: HashSet<Coord> = c.food().iter().copied().collect();
        assert!(
            a.snake(0).head() != c.snake(0).head() || food_a != food_c,
            "instances at different pool positions should not share layouts"
        );
    }
}
