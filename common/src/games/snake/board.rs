use std::collections::HashSet;

use crate::games::SessionRng;
use super::settings::SnakeConfig;
use super::types::{Direction, Point};

/// Rejection-sampling attempts before falling back to scanning the grid.
const MAX_SAMPLING_ATTEMPTS: usize = 256;

/// Toroidal grid: stepping off one edge reappears on the opposite edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub cols: usize,
    pub rows: usize,
}

impl Board {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub fn from_config(config: &SnakeConfig) -> Self {
        Self::new(config.cols_count() as usize, config.rows_count() as usize)
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    pub fn center(&self) -> Point {
        Point::new(self.cols / 2, self.rows / 2)
    }

    pub fn wrapping_inc(value: usize, max: usize) -> usize {
        if value + 1 >= max {
            0
        } else {
            value + 1
        }
    }

    pub fn wrapping_dec(value: usize, max: usize) -> usize {
        if value == 0 {
            max - 1
        } else {
            value - 1
        }
    }

    /// The neighbouring cell of `point` in `direction`. `Up` decreases `y`.
    pub fn step(&self, point: Point, direction: Direction) -> Point {
        match direction {
            Direction::Up => Point::new(point.x, Self::wrapping_dec(point.y, self.rows)),
            Direction::Down => Point::new(point.x, Self::wrapping_inc(point.y, self.rows)),
            Direction::Left => Point::new(Self::wrapping_dec(point.x, self.cols), point.y),
            Direction::Right => Point::new(Self::wrapping_inc(point.x, self.cols), point.y),
        }
    }

    /// Uniformly random cell that is not in `exclude`.
    ///
    /// Draws from the whole grid and rejects occupied cells. A valid config
    /// keeps the grid at 100 cells or more while the snake never exceeds
    /// `win_food_count + 1 <= 51` cells, so at most about half the board is
    /// excluded and sampling ends after a couple of draws on average. The
    /// attempt cap only matters for boards built outside those ranges; past it
    /// the free cells are enumerated and one is picked uniformly. `None` means
    /// the board is full.
    pub fn random_free_point(&self, rng: &mut SessionRng, exclude: &HashSet<Point>) -> Option<Point> {
        if self.cell_count() == 0 {
            return None;
        }

        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let point = Point::new(
                rng.random_range(0..self.cols),
                rng.random_range(0..self.rows),
            );
            if !exclude.contains(&point) {
                return Some(point);
            }
        }

        let free: Vec<Point> = (0..self.rows)
            .flat_map(|y| (0..self.cols).map(move |x| Point::new(x, y)))
            .filter(|point| !exclude.contains(point))
            .collect();

        if free.is_empty() {
            None
        } else {
            Some(free[rng.random_range(0..free.len())])
        }
    }
}
