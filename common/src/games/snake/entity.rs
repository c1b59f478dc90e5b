use std::collections::VecDeque;

use super::board::Board;
use super::types::{Direction, Point};

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
    last_step_direction: Direction,
}

// never empty, so no `is_empty`
#[allow(clippy::len_without_is_empty)]
impl Snake {
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start_pos]),
            direction,
            last_step_direction: direction,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    /// Head first.
    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn last_step_direction(&self) -> Direction {
        self.last_step_direction
    }

    /// Where the head lands on the next step. Does not mutate.
    pub fn next_step_head_point(&self, board: &Board) -> Point {
        board.step(self.head(), self.direction)
    }

    pub fn make_step(&mut self, board: &Board) {
        let next_head = self.next_step_head_point(board);
        self.last_step_direction = self.direction;
        self.body.push_front(next_head);
        self.body.pop_back();
    }

    /// Appends a copy of the tail; it separates from the tail on later steps.
    pub fn grow_up(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }

    pub fn is_on_point(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Only an immediate reversal of the last committed step is refused.
    pub fn can_set_direction(&self, direction: Direction) -> bool {
        !direction.is_opposite(&self.last_step_direction)
    }
}
