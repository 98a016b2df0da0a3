use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One cell over in `dir`. The result may lie outside the grid.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn neighbours(self) -> impl Iterator<Item = GridPos> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }
}

/// Facing of a player token. Row 0 is the top of the map, so North is -y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise cycle order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn turned_left(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    pub fn turned_right(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "North ↑",
            Direction::East => "East →",
            Direction::South => "South ↓",
            Direction::West => "West ←",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_follows_facing() {
        let p = GridPos::new(3, 3);
        assert_eq!(p.step(Direction::North), GridPos::new(3, 2));
        assert_eq!(p.step(Direction::East), GridPos::new(4, 3));
        assert_eq!(p.step(Direction::South), GridPos::new(3, 4));
        assert_eq!(p.step(Direction::West), GridPos::new(2, 3));
    }

    #[test]
    fn left_then_right_restores_facing() {
        for d in Direction::ALL {
            assert_eq!(d.turned_left().turned_right(), d);
            assert_eq!(d.turned_right().turned_left(), d);
        }
    }

    #[test]
    fn four_turns_make_a_full_circle() {
        let mut d = Direction::West;
        for _ in 0..4 {
            d = d.turned_right();
        }
        assert_eq!(d, Direction::West);
        assert_eq!(Direction::North.turned_left(), Direction::West);
    }

    #[test]
    fn neighbours_are_orthogonal() {
        let n: Vec<_> = GridPos::new(0, 0).neighbours().collect();
        assert_eq!(n.len(), 4);
        assert!(n.contains(&GridPos::new(-1, 0)));
        assert!(n.contains(&GridPos::new(0, 1)));
    }
}
