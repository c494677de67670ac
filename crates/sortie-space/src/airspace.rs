//! The mission grid: bounds, no-fly-zone occupancy and targets.

use indexmap::IndexSet;
use smallvec::SmallVec;
use sortie_core::{NoFlyZone, Position};

use crate::error::SpaceError;

/// Up to four neighbouring cells, stored inline.
pub type Neighbours = SmallVec<[Position; 4]>;

/// Read-only summary of an [`Airspace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AirspaceStats {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Number of registered no-fly zones.
    pub zone_count: usize,
    /// Number of grid cells covered by at least one zone.
    pub blocked_cells: usize,
    /// Number of targets still uncollected.
    pub target_count: usize,
}

/// A bounded 2D grid with no-fly zones and a shared target set.
///
/// Cell `(row, col)` is valid when `0 <= row < rows`, `0 <= col < cols`
/// and no zone covers it. Zone coverage is kept in a dense row-major
/// mask updated on each [`add_nfz`](Airspace::add_nfz), so validity
/// queries cost O(1) regardless of how many zones exist.
///
/// Targets live in an insertion-ordered set: iteration order is stable
/// and each target can be removed exactly once.
#[derive(Clone, Debug)]
pub struct Airspace {
    rows: u32,
    cols: u32,
    blocked: Vec<bool>,
    blocked_count: usize,
    zones: Vec<NoFlyZone>,
    targets: IndexSet<Position>,
}

impl Airspace {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create an empty `rows x cols` airspace.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortie_core::{NoFlyZone, Position};
    /// use sortie_space::Airspace;
    ///
    /// let mut space = Airspace::new(5, 5).unwrap();
    /// space.add_nfz(NoFlyZone::new(Position::new(1, 1), Position::new(2, 2), "tower"));
    /// assert!(space.is_valid(Position::new(0, 0)));
    /// assert!(!space.is_valid(Position::new(2, 1)));
    /// assert!(!space.is_valid(Position::new(-1, 0)));
    /// ```
    pub fn new(rows: u32, cols: u32) -> Result<Self, SpaceError> {
        let cells = Self::check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            blocked: vec![false; cells],
            blocked_count: 0,
            zones: Vec::new(),
            targets: IndexSet::new(),
        })
    }

    /// Check that a `rows x cols` airspace can be built, returning its
    /// cell count. Allocates nothing.
    pub fn check_dimensions(rows: u32, cols: u32) -> Result<usize, SpaceError> {
        if rows == 0 || cols == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if rows > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "rows",
                value: rows,
                max: Self::MAX_DIM,
            });
        }
        if cols > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "cols",
                value: cols,
                max: Self::MAX_DIM,
            });
        }
        (rows as usize)
            .checked_mul(cols as usize)
            .ok_or(SpaceError::CellCountOverflow { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    fn index(&self, p: Position) -> Option<usize> {
        if p.row < 0 || p.col < 0 || p.row as u32 >= self.rows || p.col as u32 >= self.cols {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Whether `p` lies on the grid, regardless of zones.
    pub fn in_bounds(&self, p: Position) -> bool {
        self.index(p).is_some()
    }

    /// Whether a drone may occupy `p`: on the grid and outside every zone.
    pub fn is_valid(&self, p: Position) -> bool {
        self.index(p).is_some_and(|i| !self.blocked[i])
    }

    /// Register a no-fly zone and mark its cells in the occupancy mask.
    ///
    /// The zone is clipped to the grid first, so parts hanging off the
    /// edge are ignored. Returns the number of cells that became newly
    /// blocked (overlap with earlier zones is not counted twice).
    pub fn add_nfz(&mut self, zone: NoFlyZone) -> usize {
        let mut newly = 0;
        if let Some((tl, br)) = zone.clip(self.rows, self.cols) {
            let cols = self.cols as usize;
            for r in tl.row..=br.row {
                let base = r as usize * cols;
                for c in tl.col..=br.col {
                    let cell = &mut self.blocked[base + c as usize];
                    if !*cell {
                        *cell = true;
                        newly += 1;
                    }
                }
            }
        }
        self.blocked_count += newly;
        self.zones.push(zone);
        newly
    }

    /// Registered zones, in insertion order.
    pub fn zones(&self) -> &[NoFlyZone] {
        &self.zones
    }

    /// Place a target. Returns `false` if one was already at `p`.
    pub fn add_target(&mut self, p: Position) -> bool {
        self.targets.insert(p)
    }

    /// Whether an uncollected target sits at `p`.
    pub fn has_target(&self, p: Position) -> bool {
        self.targets.contains(&p)
    }

    /// Remove the target at `p`, returning whether one was present.
    ///
    /// Removing an absent target is a no-op returning `false`.
    pub fn remove_target(&mut self, p: Position) -> bool {
        self.targets.shift_remove(&p)
    }

    /// Uncollected targets, in placement order.
    pub fn targets(&self) -> impl Iterator<Item = Position> + '_ {
        self.targets.iter().copied()
    }

    /// Number of uncollected targets.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// In-bounds 4-neighbours of `p`, in [`Direction::PROBE_ORDER`](sortie_core::Direction::PROBE_ORDER).
    pub fn neighbours(&self, p: Position) -> Neighbours {
        p.neighbours()
            .into_iter()
            .filter(|&n| self.in_bounds(n))
            .collect()
    }

    /// Neighbours of `p` that satisfy [`is_valid`](Airspace::is_valid).
    pub fn valid_neighbours(&self, p: Position) -> Neighbours {
        p.neighbours()
            .into_iter()
            .filter(|&n| self.is_valid(n))
            .collect()
    }

    /// Zones standing between `from` and `to`.
    ///
    /// A zone counts when its on-grid part covers either endpoint, lies
    /// across the straight segment between the cell centres, or covers
    /// a cell of the row-first L-shaped path that the greedy step
    /// primitive would follow. Cost is one rectangle test per zone, however
    /// far off the grid `to` lies.
    pub fn zones_between(&self, from: Position, to: Position) -> Vec<&NoFlyZone> {
        self.zones
            .iter()
            .filter(|z| {
                z.clip(self.rows, self.cols).is_some_and(|(tl, br)| {
                    l_path_hits(from, to, tl, br) || segment_hits(from, to, tl, br)
                })
            })
            .collect()
    }

    /// Summary counts for reporting.
    pub fn stats(&self) -> AirspaceStats {
        AirspaceStats {
            rows: self.rows,
            cols: self.cols,
            zone_count: self.zones.len(),
            blocked_cells: self.blocked_count,
            target_count: self.targets.len(),
        }
    }
}

/// Whether the row-first L path from `from` to `to` (down the column of
/// `from`, then along the row of `to`) touches the rectangle `tl..=br`.
fn l_path_hits(from: Position, to: Position, tl: Position, br: Position) -> bool {
    let spans = |a: i32, b: i32, lo: i32, hi: i32| a.min(b) <= hi && a.max(b) >= lo;
    let leg_one = (tl.col..=br.col).contains(&from.col) && spans(from.row, to.row, tl.row, br.row);
    let leg_two = (tl.row..=br.row).contains(&to.row) && spans(from.col, to.col, tl.col, br.col);
    leg_one || leg_two
}

/// Whether the segment between the centres of `from` and `to` crosses the
/// cells `tl..=br`, each cell taken as a unit square around its centre.
fn segment_hits(from: Position, to: Position, tl: Position, br: Position) -> bool {
    let (mut t_enter, mut t_exit) = (0.0_f64, 1.0_f64);
    let axes = [
        (from.row, to.row, tl.row, br.row),
        (from.col, to.col, tl.col, br.col),
    ];
    for (a, b, lo, hi) in axes {
        let start = f64::from(a);
        let delta = f64::from(b) - start;
        let (lo, hi) = (f64::from(lo) - 0.5, f64::from(hi) + 0.5);
        if delta == 0.0 {
            if start < lo || start > hi {
                return false;
            }
            continue;
        }
        let (t0, t1) = ((lo - start) / delta, (hi - start) / delta);
        t_enter = t_enter.max(t0.min(t1));
        t_exit = t_exit.min(t0.max(t1));
        if t_enter > t_exit {
            return false;
        }
    }
    true
}
