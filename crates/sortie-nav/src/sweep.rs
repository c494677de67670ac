//! Boustrophedon coverage sweep with local obstacle avoidance.
//!
//! The sweep runs across each row, drops one row at the grid edge and
//! reverses. A blocked cell mid-row triggers a small detour: down one
//! row, along, and back up to the row the detour started on.

use sortie_core::{Direction, Position};
use sortie_space::Airspace;
use tracing::debug;

use crate::drone::Drone;
use crate::navigator::Navigator;

/// Horizontal heading of the current pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SweepDirection {
    /// Increasing column.
    #[default]
    Right,
    /// Decreasing column.
    Left,
}

impl SweepDirection {
    /// Grid direction of a lateral step.
    pub fn heading(self) -> Direction {
        match self {
            SweepDirection::Right => Direction::East,
            SweepDirection::Left => Direction::West,
        }
    }

    /// The opposite heading.
    pub fn flip(self) -> Self {
        match self {
            SweepDirection::Right => SweepDirection::Left,
            SweepDirection::Left => SweepDirection::Right,
        }
    }
}

/// Detour sub-state. `anchor_row` is the row the detour left and will
/// return to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Avoidance {
    /// Plain sweeping.
    #[default]
    Clear,
    /// Below the obstacle, trying to get past it laterally.
    Forward {
        /// Row the detour started on.
        anchor_row: i32,
    },
    /// Past the obstacle, climbing back to the anchor row.
    Ascending {
        /// Row the detour started on.
        anchor_row: i32,
    },
}

/// Tuning knobs for [`CoverageSweep`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    /// Calls after which the sweep returns `None` for good. Default: 1000.
    pub attempt_cap: u32,
    /// Rows searched below a dead end for a cell to resume on. Default: 5.
    pub row_lookahead: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            attempt_cap: 1000,
            row_lookahead: 5,
        }
    }
}

/// Lawnmower traversal of the whole grid.
///
/// Every returned cell passes [`Airspace::is_valid`]. The attempt
/// counter increases on every call, including calls after the sweep
/// has finished, and once it exceeds
/// [`attempt_cap`](SweepConfig::attempt_cap) the sweep returns `None`
/// forever.
#[derive(Clone, Debug)]
pub struct CoverageSweep {
    config: SweepConfig,
    direction: SweepDirection,
    avoidance: Avoidance,
    attempts: u32,
}

impl CoverageSweep {
    /// A sweep starting rightwards with no detour in progress.
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            direction: SweepDirection::Right,
            avoidance: Avoidance::Clear,
            attempts: 0,
        }
    }

    /// Calls made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Heading of the current pass.
    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    /// Detour state.
    pub fn avoidance(&self) -> Avoidance {
        self.avoidance
    }

    /// Next cell of the sweep from `current`, or `None` when the sweep is
    /// complete or the attempt cap is exceeded.
    pub fn next_position(&mut self, current: Position, airspace: &Airspace) -> Option<Position> {
        self.attempts = self.attempts.saturating_add(1);
        if self.attempts > self.config.attempt_cap {
            return None;
        }

        // Ascending may fall back to Forward, and Forward may abandon to
        // Clear; Clear always returns. At most three passes.
        loop {
            match self.avoidance {
                Avoidance::Forward { anchor_row } => {
                    // Heading is not flipped on entry to the detour.
                    let lateral = current.step(self.direction.heading());
                    if airspace.is_valid(lateral) {
                        self.avoidance = Avoidance::Ascending { anchor_row };
                        return Some(lateral);
                    }
                    let down = current.step(Direction::South);
                    if airspace.is_valid(down) {
                        return Some(down);
                    }
                    debug!(%current, anchor_row, "detour abandoned");
                    self.avoidance = Avoidance::Clear;
                    self.direction = self.direction.flip();
                }
                Avoidance::Ascending { anchor_row } => {
                    if current.row <= anchor_row {
                        self.avoidance = Avoidance::Clear;
                        continue;
                    }
                    let up = current.step(Direction::North);
                    if airspace.is_valid(up) {
                        if up.row <= anchor_row {
                            debug!(%up, "detour complete");
                            self.avoidance = Avoidance::Clear;
                        }
                        return Some(up);
                    }
                    self.avoidance = Avoidance::Forward { anchor_row };
                }
                Avoidance::Clear => return self.sweep_step(current, airspace),
            }
        }
    }

    fn sweep_step(&mut self, current: Position, airspace: &Airspace) -> Option<Position> {
        let lateral = current.step(self.direction.heading());
        if airspace.is_valid(lateral) {
            return Some(lateral);
        }

        let down = current.step(Direction::South);
        if airspace.in_bounds(lateral) {
            // Blocked mid-row.
            if airspace.is_valid(down) {
                debug!(%current, blocked = %lateral, "starting detour");
                self.avoidance = Avoidance::Forward {
                    anchor_row: current.row,
                };
                return Some(down);
            }
            self.direction = self.direction.flip();
            return self.search_below(current, airspace);
        }

        // Row edge.
        self.direction = self.direction.flip();
        if !airspace.in_bounds(down) {
            debug!(%current, "sweep complete");
            return None;
        }
        if airspace.is_valid(down) {
            return Some(down);
        }
        self.search_below(current, airspace)
    }

    /// First valid cell in the rows below `current`, nearest row first.
    /// Within a row: the same column, then outward along the current
    /// heading, then outward against it.
    fn search_below(&self, current: Position, airspace: &Airspace) -> Option<Position> {
        let (_, dc) = self.direction.heading().offset_2d();
        let (_, back) = self.direction.heading().reverse().offset_2d();
        let cols = i32::try_from(airspace.cols()).unwrap_or(i32::MAX);
        (1..=i64::from(self.config.row_lookahead))
            .map_while(|dr| i32::try_from(i64::from(current.row) + dr).ok())
            .take_while(|&row| airspace.in_bounds(Position::new(row, 0)))
            .find_map(|row| {
                let along = (1..cols).map(|k| current.col + k * dc);
                let against = (1..cols).map(|k| current.col + k * back);
                std::iter::once(current.col)
                    .chain(along)
                    .chain(against)
                    .map(|col| Position::new(row, col))
                    .find(|&p| airspace.is_valid(p))
            })
    }
}

impl Default for CoverageSweep {
    fn default() -> Self {
        Self::new(SweepConfig::default())
    }
}

impl Navigator for CoverageSweep {
    fn name(&self) -> &str {
        "coverage_sweep"
    }

    fn next_position(&mut self, drone: &mut Drone, airspace: &Airspace) -> Option<Position> {
        CoverageSweep::next_position(self, drone.position(), airspace)
    }
}
