use super::types::{GameStatus, Point};

/// Everything a front-end needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Head first.
    pub body: Vec<Point>,
    pub food: Point,
    pub score: u32,
    pub status: GameStatus,
}

pub trait Renderer {
    /// Full redraw. Called after every reset and after every tick that moved
    /// the snake; drawing the same snapshot twice must give the same picture.
    fn render(&mut self, snapshot: &GameSnapshot);

    /// Control affordances such as a play/stop label.
    fn status_changed(&mut self, _status: GameStatus, _score: u32) {}
}

/// Keeps every frame and status change; handy for driving a game in tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<GameSnapshot>,
    pub statuses: Vec<GameStatus>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&GameSnapshot> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.frames.push(snapshot.clone());
    }

    fn status_changed(&mut self, status: GameStatus, _score: u32) {
        self.statuses.push(status);
    }
}
