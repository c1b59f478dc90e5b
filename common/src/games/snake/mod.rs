mod board;
mod entity;
mod food;
mod game_state;
mod renderer;
mod scheduler;
mod session;
mod settings;
mod types;

pub use board::Board;
pub use food::Food;
pub use game_state::SnakeGame;
pub use renderer::{GameSnapshot, RecordingRenderer, Renderer};
pub use scheduler::{IntervalScheduler, ManualScheduler, TickScheduler};
pub use session::{run_session, SessionSummary};
pub use settings::{
    ConfigError, SnakeConfig, SnakeConfigOverrides, ValidationReport, COLS_COUNT_RANGE,
    ROWS_COUNT_RANGE, SPEED_RANGE, WIN_FOOD_COUNT_RANGE,
};
pub use entity::Snake;
pub use types::{Direction, GameStatus, InputEvent, Point, StepOutcome};
