pub mod config;
pub mod games;
pub mod logger;

pub use games::snake::{
    Direction, GameSnapshot, GameStatus, InputEvent, SnakeConfig, SnakeConfigOverrides, SnakeGame,
};
pub use games::SessionRng;
