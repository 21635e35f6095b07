//! Edge-relative coordinates.
//!
//! Shapes anchored to a world edge are authored once in a local `(t, s)`
//! frame: `t` runs along the edge, `s` is the distance from the edge into the
//! map. [`EdgeFrame`] maps them onto any of the four edges.

use crate::geometry::Point;

/// A side of the square world. North is `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    North,
    East,
    South,
    West,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::North, Edge::East, Edge::South, Edge::West];

    #[must_use]
    pub fn from_index(index: usize) -> Edge {
        Self::ALL[index % 4]
    }

    /// Unit vector pointing from this edge into the map.
    #[must_use]
    pub fn inward(self) -> Point {
        match self {
            Edge::North => Point::new(0.0, 1.0),
            Edge::South => Point::new(0.0, -1.0),
            Edge::West => Point::new(1.0, 0.0),
            Edge::East => Point::new(-1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeFrame {
    pub edge: Edge,
    pub world_size: f64,
}

impl EdgeFrame {
    #[must_use]
    pub fn new(edge: Edge, world_size: f64) -> Self {
        Self { edge, world_size }
    }

    #[must_use]
    pub fn to_world(&self, t: f64, s: f64) -> Point {
        let w = self.world_size;
        match self.edge {
            Edge::North => Point::new(t, s),
            Edge::South => Point::new(t, w - s),
            Edge::West => Point::new(s, t),
            Edge::East => Point::new(w - s, t),
        }
    }

    /// Inverse of [`EdgeFrame::to_world`], returning `(t, s)`.
    #[must_use]
    pub fn to_local(&self, p: Point) -> (f64, f64) {
        let w = self.world_size;
        match self.edge {
            Edge::North => (p.x, p.y),
            Edge::South => (p.x, w - p.y),
            Edge::West => (p.y, p.x),
            Edge::East => (p.y, w - p.x),
        }
    }

    /// Projects a point onto the edge itself (`s = 0`).
    #[must_use]
    pub fn onto_edge(&self, p: Point) -> Point {
        let (t, _) = self.to_local(p);
        self.to_world(t, 0.0)
    }

    #[must_use]
    pub fn inward(&self) -> Point {
        self.edge.inward()
    }
}
