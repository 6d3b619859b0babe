//! The game loop state: tick ordering, scoring, food respawn and the
//! terminal-state machine.

use crate::config::{ConfigError, GameConfig};
use crate::food;
use crate::grid::{Cell, Grid};
use crate::snake::{Direction, Snake};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Session phase. Pausing and menus live in the driver; the core only
/// distinguishes a running game from a finished one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Discrete notifications for the audio/particle side of a front end.
/// Fire-and-forget: the driver drains them after each tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameEvent {
    FoodConsumed(Cell),
    GameEnded,
}

/// Copy-out view of everything a renderer needs for one frame. Produced at
/// the end of a tick; the core never hands out references into its own
/// mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Body cells, head first.
    pub body: Vec<Cell>,
    pub heading: Direction,
    pub food: Cell,
    pub score: u32,
    pub elapsed: f32,
    pub game_over: bool,
}

/// One game of snake: owns the snake, the food cell, the score and the
/// phase, and advances them one fixed step per `tick`.
pub struct GameSession {
    grid: Grid,
    snake: Snake,
    food: Cell,
    score: u32,
    elapsed: f32,
    phase: Phase,
    initial_len: usize,
    rng: StdRng,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Like [`GameSession::new`] with a caller-supplied RNG, so food
    /// placement can be made deterministic.
    pub fn with_rng(config: &GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.unit_size, config.width, config.height);
        let initial_len = config.initial_snake_length as usize;
        let snake = Self::spawn_snake(initial_len);
        let food = food::place(snake.body(), grid.cells_wide(), grid.cells_high(), &mut rng);
        Ok(GameSession {
            grid,
            snake,
            food,
            score: 0,
            elapsed: 0.0,
            phase: Phase::Playing,
            initial_len,
            rng,
        })
    }

    // Head in the top-left area, body trailing left along row 0.
    fn spawn_snake(initial_len: usize) -> Snake {
        Snake::new(Cell::new(initial_len as i32 - 1, 0), initial_len, Direction::Right)
    }

    /// Request a heading change for the next step. Reversals are ignored by
    /// the snake; calls after game over are ignored here. The last accepted
    /// call before a tick is the heading that tick moves in.
    pub fn set_heading(&mut self, direction: Direction) {
        if self.phase == Phase::Playing {
            self.snake.set_heading(direction);
        }
    }

    /// Advance the game by one step, `dt` seconds after the previous one.
    ///
    /// The food check runs before the wall/self collision check: growth
    /// only adjusts the target length, so it cannot change this tick's
    /// self-collision outcome, and the respawned food must avoid the body
    /// as it stands after the step.
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::GameOver {
            return events;
        }

        self.elapsed += dt;
        self.snake.step();

        if self.snake.head_equals(self.food) {
            self.score += 1;
            self.snake.grow();
            events.push(GameEvent::FoodConsumed(self.food));
            debug!(score = self.score, "food consumed");
            self.food = food::place(
                self.snake.body(),
                self.grid.cells_wide(),
                self.grid.cells_high(),
                &mut self.rng,
            );
        }

        if self.snake.collides_with_walls(self.grid.cells_wide(), self.grid.cells_high())
            || self.snake.collides_with_self()
        {
            self.phase = Phase::GameOver;
            events.push(GameEvent::GameEnded);
            info!(score = self.score, elapsed = self.elapsed, "game over");
        }

        events
    }

    /// Reset to a fresh game: initial body, Right heading, new food, zeroed
    /// score and clock.
    pub fn restart(&mut self) {
        self.snake = Self::spawn_snake(self.initial_len);
        self.food = food::place(
            self.snake.body(),
            self.grid.cells_wide(),
            self.grid.cells_high(),
            &mut self.rng,
        );
        self.score = 0;
        self.elapsed = 0.0;
        self.phase = Phase::Playing;
        info!("session restarted");
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.snake.body().to_vec(),
            heading: self.snake.heading(),
            food: self.food,
            score: self.score,
            elapsed: self.elapsed,
            game_over: self.phase == Phase::GameOver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 10x10 cells.
    fn config() -> GameConfig {
        GameConfig {
            unit_size: 20,
            width: 200,
            height: 200,
            initial_snake_length: 3,
            tick_rate: 60,
        }
    }

    fn session() -> GameSession {
        GameSession::with_rng(&config(), StdRng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn spawns_three_segments_heading_right_on_row_zero() {
        let snap = session().snapshot();
        assert_eq!(snap.body, vec![Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)]);
        assert_eq!(snap.heading, Direction::Right);
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
    }

    #[test]
    fn initial_food_avoids_the_body() {
        let snap = session().snapshot();
        assert!(!snap.body.contains(&snap.food));
    }

    #[test]
    fn one_quiet_tick_moves_the_head_one_cell_right() {
        let mut s = session();
        s.food = Cell::new(9, 9); // out of the snake's path
        let events = s.tick(0.016);
        assert!(events.is_empty());
        let snap = s.snapshot();
        assert_eq!(snap.body.len(), 3);
        assert_eq!(snap.body[0], Cell::new(3, 0));
        assert!(!snap.game_over);
        assert!(snap.elapsed > 0.0);
    }

    #[test]
    fn eating_scores_immediately_and_grows_on_the_following_tick() {
        let mut s = session();
        s.food = Cell::new(3, 0); // directly ahead of the head
        let events = s.tick(0.016);
        assert_eq!(events, vec![GameEvent::FoodConsumed(Cell::new(3, 0))]);
        assert_eq!(s.score(), 1);
        // Growth is target-length only on the eating tick.
        assert_eq!(s.snapshot().body.len(), 3);

        s.food = Cell::new(9, 9);
        s.tick(0.016);
        assert_eq!(s.snapshot().body.len(), 4);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn respawned_food_avoids_the_stepped_body() {
        let mut s = session();
        s.food = Cell::new(3, 0);
        s.tick(0.016);
        let snap = s.snapshot();
        assert!(!snap.body.contains(&snap.food));
        assert!(snap.food.x >= 0 && snap.food.x < 10);
        assert!(snap.food.y >= 0 && snap.food.y < 10);
    }

    #[test]
    fn last_heading_before_a_tick_wins() {
        let mut s = session();
        s.food = Cell::new(9, 9);
        s.set_heading(Direction::Down);
        s.set_heading(Direction::Right);
        s.tick(0.016);
        // Both calls were accepted; the tick moves in the last one.
        assert_eq!(s.snapshot().body[0], Cell::new(3, 0));
    }

    #[test]
    fn driving_into_the_wall_ends_the_game() {
        let mut s = session();
        s.food = Cell::new(9, 9);
        s.set_heading(Direction::Up); // head goes to (2, -1)
        let events = s.tick(0.016);
        assert_eq!(events, vec![GameEvent::GameEnded]);
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(s.snapshot().game_over);
    }

    #[test]
    fn ticks_after_game_over_are_no_ops() {
        let mut s = session();
        s.food = Cell::new(9, 9);
        s.set_heading(Direction::Up);
        s.tick(0.016);
        let frozen = s.snapshot();
        assert!(s.tick(0.016).is_empty());
        assert_eq!(s.snapshot(), frozen);
    }

    #[test]
    fn heading_changes_after_game_over_are_ignored() {
        let mut s = session();
        s.food = Cell::new(9, 9);
        s.set_heading(Direction::Up);
        s.tick(0.016);
        s.set_heading(Direction::Down);
        assert_eq!(s.snapshot().heading, Direction::Up);
    }

    #[test]
    fn self_collision_ends_the_game() {
        let mut s = session();
        s.food = Cell::new(9, 9);
        s.snake = Snake::new(Cell::new(4, 4), 5, Direction::Right);
        s.set_heading(Direction::Down);
        s.tick(0.016);
        s.set_heading(Direction::Left);
        s.tick(0.016);
        s.set_heading(Direction::Up);
        let events = s.tick(0.016);
        assert_eq!(events, vec![GameEvent::GameEnded]);
        assert_eq!(s.phase(), Phase::GameOver);
    }

    #[test]
    fn restart_resets_everything_and_resumes_play() {
        let mut s = session();
        s.food = Cell::new(3, 0);
        s.tick(0.016); // eat
        s.set_heading(Direction::Up);
        s.tick(0.016); // head leaves the grid at (3, -1)
        assert_eq!(s.phase(), Phase::GameOver);

        s.restart();
        let snap = s.snapshot();
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.elapsed, 0.0);
        assert_eq!(snap.heading, Direction::Right);
        assert_eq!(snap.body, vec![Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)]);
        assert!(!snap.body.contains(&snap.food));
    }

    #[test]
    fn elapsed_accumulates_supplied_deltas() {
        let mut s = session();
        s.food = Cell::new(9, 9);
        s.tick(0.25);
        s.set_heading(Direction::Down);
        s.tick(0.25);
        assert!((s.snapshot().elapsed - 0.5).abs() < 1e-6);
    }
}
