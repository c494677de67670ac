//! Rectangular no-fly zones.

use crate::position::Position;

/// An axis-aligned rectangle of the grid that drones may never occupy.
///
/// Bounds are inclusive on both corners. The `kind` tag is carried
/// through from configuration (e.g. `"airport"`, `"restricted"`) and is
/// informational only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NoFlyZone {
    top_left: Position,
    bottom_right: Position,
    kind: String,
}

impl NoFlyZone {
    /// Create a zone spanning the two corners.
    ///
    /// Corners given in the wrong order are normalized, so the zone
    /// always covers the rectangle between them.
    pub fn new(a: Position, b: Position, kind: impl Into<String>) -> Self {
        Self {
            top_left: Position::new(a.row.min(b.row), a.col.min(b.col)),
            bottom_right: Position::new(a.row.max(b.row), a.col.max(b.col)),
            kind: kind.into(),
        }
    }

    /// Upper-left (minimum row, minimum column) corner.
    pub fn top_left(&self) -> Position {
        self.top_left
    }

    /// Lower-right (maximum row, maximum column) corner.
    pub fn bottom_right(&self) -> Position {
        self.bottom_right
    }

    /// Type tag from configuration.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Whether `p` lies inside the zone, bounds included.
    pub fn contains(&self, p: Position) -> bool {
        (self.top_left.row..=self.bottom_right.row).contains(&p.row)
            && (self.top_left.col..=self.bottom_right.col).contains(&p.col)
    }

    /// Number of cells covered, ignoring any grid. Saturates at
    /// `u64::MAX`.
    pub fn area(&self) -> u64 {
        let h = u64::from(self.top_left.row.abs_diff(self.bottom_right.row)) + 1;
        let w = u64::from(self.top_left.col.abs_diff(self.bottom_right.col)) + 1;
        h.saturating_mul(w)
    }

    /// The zone intersected with a `rows x cols` grid, as inclusive
    /// `(top_left, bottom_right)` corners. `None` when the zone lies
    /// entirely off the grid.
    pub fn clip(&self, rows: u32, cols: u32) -> Option<(Position, Position)> {
        let max_row = rows as i64 - 1;
        let max_col = cols as i64 - 1;
        let r0 = i64::from(self.top_left.row).max(0);
        let c0 = i64::from(self.top_left.col).max(0);
        let r1 = i64::from(self.bottom_right.row).min(max_row);
        let c1 = i64::from(self.bottom_right.col).min(max_col);
        if r0 > r1 || c0 > c1 {
            return None;
        }
        Some((
            Position::new(r0 as i32, c0 as i32),
            Position::new(r1 as i32, c1 as i32),
        ))
    }

    /// The four cells diagonally adjacent to the zone's corners, in the
    /// order top-left, top-right, bottom-left, bottom-right.
    pub fn outer_corners(&self) -> [Position; 4] {
        let (tl, br) = (self.top_left, self.bottom_right);
        [
            tl.offset(-1, -1),
            Position::new(tl.row, br.col).offset(-1, 1),
            Position::new(br.row, tl.col).offset(1, -1),
            br.offset(1, 1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> NoFlyZone {
        NoFlyZone::new(Position::new(0, 2), Position::new(4, 2), "wall")
    }

    #[test]
    fn contains_is_inclusive() {
        let z = wall();
        assert!(z.contains(Position::new(0, 2)));
        assert!(z.contains(Position::new(4, 2)));
        assert!(!z.contains(Position::new(5, 2)));
        assert!(!z.contains(Position::new(2, 1)));
    }

    #[test]
    fn corners_are_normalized() {
        let z = NoFlyZone::new(Position::new(4, 6), Position::new(1, 3), "x");
        assert_eq!(z.top_left(), Position::new(1, 3));
        assert_eq!(z.bottom_right(), Position::new(4, 6));
        assert_eq!(z.area(), 16);
        assert_eq!(z.kind(), "x");
    }

    #[test]
    fn clip_to_grid() {
        let z = NoFlyZone::new(Position::new(-3, 8), Position::new(2, 20), "edge");
        assert_eq!(
            z.clip(10, 10),
            Some((Position::new(0, 8), Position::new(2, 9)))
        );
        let off = NoFlyZone::new(Position::new(20, 20), Position::new(25, 25), "off");
        assert_eq!(off.clip(10, 10), None);
    }

    #[test]
    fn outer_corners_surround_the_rectangle() {
        let z = NoFlyZone::new(Position::new(2, 2), Position::new(3, 4), "box");
        for corner in z.outer_corners() {
            assert!(!z.contains(corner));
        }
        assert_eq!(z.outer_corners()[0], Position::new(1, 1));
        assert_eq!(z.outer_corners()[3], Position::new(4, 5));
    }

    #[test]
    fn extreme_zone_saturates() {
        let z = NoFlyZone::new(
            Position::new(i32::MIN, i32::MIN),
            Position::new(i32::MAX, i32::MAX),
            "everything",
        );
        assert_eq!(z.area(), u64::MAX);
        assert_eq!(z.outer_corners()[0], Position::new(i32::MIN, i32::MIN));
        assert_eq!(z.outer_corners()[3], Position::new(i32::MAX, i32::MAX));
        assert_eq!(z.clip(3, 3), Some((Position::new(0, 0), Position::new(2, 2))));
    }
}
