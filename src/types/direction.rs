//! Face directions of model elements.

use serde::{Deserialize, Serialize};

/// The six face directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All six directions in order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_lowercase() {
        let dir: Direction = serde_json::from_str("\"west\"").unwrap();
        assert_eq!(dir, Direction::West);
        assert!(serde_json::from_str::<Direction>("\"West\"").is_err());
    }
}
