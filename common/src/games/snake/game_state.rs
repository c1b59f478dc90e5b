use std::collections::HashSet;

use crate::log;
use crate::games::SessionRng;
use super::board::Board;
use super::food::Food;
use super::renderer::{GameSnapshot, Renderer};
use super::scheduler::TickScheduler;
use super::settings::{ConfigError, SnakeConfig};
use super::entity::Snake;
use super::types::{Direction, GameStatus, InputEvent, Point, StepOutcome};

const START_DIRECTION: Direction = Direction::Up;

/// One single-player game: the snake, its food, the score and the
/// stopped / playing / finished state machine.
///
/// The game never reads a clock. Whoever owns the scheduler's tick source
/// calls [`SnakeGame::step`] once per tick.
pub struct SnakeGame<R: Renderer, S: TickScheduler> {
    config: SnakeConfig,
    board: Board,
    snake: Snake,
    food: Food,
    score: u32,
    status: GameStatus,
    rng: SessionRng,
    renderer: R,
    scheduler: S,
}

impl<R: Renderer, S: TickScheduler> SnakeGame<R, S> {
    /// Builds a game and performs the initial reset.
    ///
    /// An invalid config is rejected with every violation; in that case
    /// nothing is rendered and no timer is started.
    pub fn new(
        config: SnakeConfig,
        renderer: R,
        scheduler: S,
        rng: SessionRng,
    ) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let board = Board::from_config(&config);
        let center = board.center();

        let mut game = Self {
            config,
            board,
            snake: Snake::new(center, START_DIRECTION),
            food: Food::new(center),
            score: 0,
            status: GameStatus::Stopped,
            rng,
            renderer,
            scheduler,
        };
        game.reset();
        Ok(game)
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            body: self.snake.body().iter().copied().collect(),
            food: self.food.coordinates(),
            score: self.score,
            status: self.status,
        }
    }

    /// Back to a fresh stopped game. Legal from any state.
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.status = GameStatus::Stopped;
        self.score = 0;
        self.snake = Snake::new(self.board.center(), START_DIRECTION);

        let exclude: HashSet<Point> = self.snake.body().iter().copied().collect();
        // a fresh board holds a single segment, so there is always room
        if let Some(point) = self.board.random_free_point(&mut self.rng, &exclude) {
            self.food.set_coordinates(point);
        }

        log!(
            "Game reset: {}x{} board, food at ({}, {})",
            self.board.cols,
            self.board.rows,
            self.food.coordinates().x,
            self.food.coordinates().y
        );

        self.renderer.status_changed(self.status, self.score);
        self.render();
    }

    pub fn play(&mut self) {
        if self.status != GameStatus::Stopped {
            return;
        }

        self.status = GameStatus::Playing;
        self.scheduler.start(self.config.tick_interval());
        log!("Game started, tick every {:?}", self.config.tick_interval());
        self.renderer.status_changed(self.status, self.score);
    }

    /// Cancels the tick timer. A finished game stays finished.
    pub fn stop(&mut self) {
        self.scheduler.cancel();
        if self.status != GameStatus::Playing {
            return;
        }

        self.status = GameStatus::Stopped;
        log!("Game stopped at score {}", self.score);
        self.renderer.status_changed(self.status, self.score);
    }

    pub fn finish(&mut self) {
        self.scheduler.cancel();
        self.status = GameStatus::Finished;
        log!("Game finished with score {}", self.score);
        self.renderer.status_changed(self.status, self.score);
    }

    pub fn toggle_play(&mut self) {
        match self.status {
            GameStatus::Playing => self.stop(),
            GameStatus::Stopped => self.play(),
            GameStatus::Finished => {}
        }
    }

    /// Queues a turn for the next tick. Only accepted while playing, and
    /// never as a reversal of the last step taken; the last accepted request
    /// before a tick wins.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing || !self.snake.can_set_direction(direction) {
            return false;
        }
        self.snake.set_direction(direction);
        true
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::DirectionRequested(direction) => {
                self.request_direction(direction);
            }
            InputEvent::PlayToggleRequested => self.toggle_play(),
            InputEvent::ResetRequested => self.reset(),
        }
    }

    /// Advances the game by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.status != GameStatus::Playing {
            return StepOutcome::Ignored;
        }

        let next_head = self.snake.next_step_head_point(&self.board);

        if self.snake.is_on_point(next_head) {
            log!("Self collision at ({}, {})", next_head.x, next_head.y);
            self.finish();
            return StepOutcome::Collided;
        }

        let mut outcome = StepOutcome::Moved;

        if self.food.is_on_point(next_head) {
            self.snake.grow_up();
            self.score += 1;
            log!(
                "Food eaten at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );

            outcome = StepOutcome::Ate;
            match self.place_food() {
                Some(_) if self.snake.len() <= self.config.win_food_count() as usize => {}
                _ => {
                    log!("Win with length {}", self.snake.len());
                    self.finish();
                    outcome = StepOutcome::Won;
                }
            }
        }

        self.snake.make_step(&self.board);
        self.render();
        outcome
    }

    /// Moves the food to a free cell, keeping clear of the body and of the
    /// cell the head is about to enter. `None` means the board is full.
    fn place_food(&mut self) -> Option<Point> {
        let mut exclude: HashSet<Point> = self.snake.body().iter().copied().collect();
        exclude.insert(self.food.coordinates());

        let point = self.board.random_free_point(&mut self.rng, &exclude)?;
        self.food.set_coordinates(point);
        Some(point)
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.renderer.render(&snapshot);
    }
}
