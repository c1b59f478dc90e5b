use super::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    coordinates: Point,
}

impl Food {
    pub fn new(coordinates: Point) -> Self {
        Self { coordinates }
    }

    pub fn set_coordinates(&mut self, coordinates: Point) {
        self.coordinates = coordinates;
    }

    pub fn coordinates(&self) -> Point {
        self.coordinates
    }

    pub fn is_on_point(&self, point: Point) -> bool {
        self.coordinates == point
    }
}
