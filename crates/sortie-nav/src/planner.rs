//! Bypass route planning around no-fly zones.
//!
//! When the greedy waypoint step runs into a zone, the router asks the
//! [`BypassPlanner`] for a complete detour to the waypoint. Strategies
//! are heuristic, tried cheapest first; the first one producing a route
//! whose every cell is valid and whose last cell is the waypoint wins.
//! None of them is a shortest-path search.

use std::collections::HashSet;
use std::fmt;

use sortie_core::{NoFlyZone, Position};
use sortie_space::Airspace;

/// A bypass planning heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Repeatedly take the valid, unvisited neighbour closest to the goal.
    Greedy,
    /// Detour via a corner just outside the largest blocking zone.
    Perimeter,
    /// Detour via the grid edge aligned with the goal; shortest of four.
    Edge,
    /// Approach the goal from an alternate point on or past its axes.
    OppositeSide,
}

impl Strategy {
    /// All strategies, in the order the planner tries them.
    pub const ALL: [Strategy; 4] = [
        Strategy::Greedy,
        Strategy::Perimeter,
        Strategy::Edge,
        Strategy::OppositeSide,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Greedy => "greedy",
            Strategy::Perimeter => "perimeter",
            Strategy::Edge => "edge",
            Strategy::OppositeSide => "opposite_side",
        })
    }
}

/// Builds complete detours from a drone's cell to its waypoint.
///
/// Routes exclude the start cell and end exactly on the goal. Each leg
/// is made of unit steps, and every search is capped so planning always
/// terminates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BypassPlanner {
    greedy_step_cap: usize,
    direct_step_cap: usize,
}

impl BypassPlanner {
    /// A planner whose greedy search gives up after `greedy_step_cap`
    /// steps and whose straight legs give up after `direct_step_cap`.
    pub fn new(greedy_step_cap: usize, direct_step_cap: usize) -> Self {
        Self {
            greedy_step_cap,
            direct_step_cap,
        }
    }

    /// Try each [`Strategy`] in order and return the first valid route.
    pub fn plan(
        &self,
        from: Position,
        to: Position,
        airspace: &Airspace,
    ) -> Option<(Strategy, Vec<Position>)> {
        Strategy::ALL.into_iter().find_map(|strategy| {
            self.route_with(strategy, from, to, airspace)
                .filter(|route| route_is_valid(route, to, airspace))
                .map(|route| (strategy, route))
        })
    }

    /// Run a single strategy.
    pub fn route_with(
        &self,
        strategy: Strategy,
        from: Position,
        to: Position,
        airspace: &Airspace,
    ) -> Option<Vec<Position>> {
        match strategy {
            Strategy::Greedy => self.greedy_route(from, to, airspace),
            Strategy::Perimeter => self.perimeter_route(from, to, airspace),
            Strategy::Edge => self.edge_route(from, to, airspace),
            Strategy::OppositeSide => self.opposite_side_route(from, to, airspace),
        }
    }

    /// Straight leg: close the row gap, then the column gap, one valid
    /// cell at a time.
    ///
    /// Fails on the first invalid cell or once the step cap is spent.
    /// `from == to` yields an empty route.
    pub fn direct_route(
        &self,
        from: Position,
        to: Position,
        airspace: &Airspace,
    ) -> Option<Vec<Position>> {
        let mut route = Vec::new();
        let mut cur = from;
        while cur != to {
            if route.len() >= self.direct_step_cap {
                return None;
            }
            let next = cur.step_toward(to);
            if !airspace.is_valid(next) {
                return None;
            }
            route.push(next);
            cur = next;
        }
        Some(route)
    }

    /// Hill-climb on Manhattan distance over valid cells not yet visited
    /// by this attempt. Ties go to the earlier neighbour in probe order.
    pub fn greedy_route(
        &self,
        from: Position,
        to: Position,
        airspace: &Airspace,
    ) -> Option<Vec<Position>> {
        let mut visited = HashSet::from([from]);
        let mut route = Vec::new();
        let mut cur = from;
        while cur != to {
            if route.len() >= self.greedy_step_cap {
                return None;
            }
            let best = airspace
                .valid_neighbours(cur)
                .into_iter()
                .filter(|n| !visited.contains(n))
                .reduce(|best, n| {
                    if n.manhattan(to) < best.manhattan(to) {
                        n
                    } else {
                        best
                    }
                })?;
            visited.insert(best);
            route.push(best);
            cur = best;
        }
        Some(route)
    }

    /// Detour via a cell diagonally outside a corner of the largest zone
    /// standing between `from` and `to`.
    ///
    /// Corners on the side facing `from` are tried first.
    pub fn perimeter_route(
        &self,
        from: Position,
        to: Position,
        airspace: &Airspace,
    ) -> Option<Vec<Position>> {
        let zone = airspace
            .zones_between(from, to)
            .into_iter()
            .reduce(|big, z| if z.area() > big.area() { z } else { big })?;
        corner_preference(zone, from)
            .into_iter()
            .filter(|&corner| airspace.is_valid(corner))
            .find_map(|corner| self.two_leg_route(from, corner, to, airspace))
    }

    /// Detour via the top, bottom, left or right grid edge, aligned with
    /// the goal's column or row. Keeps the shortest that works.
    pub fn edge_route(
        &self,
        from: Position,
        to: Position,
        airspace: &Airspace,
    ) -> Option<Vec<Position>> {
        let last_row = airspace.rows() as i32 - 1;
        let last_col = airspace.cols() as i32 - 1;
        let vias = [
            Position::new(0, to.col),
            Position::new(last_row, to.col),
            Position::new(to.row, 0),
            Position::new(to.row, last_col),
        ];
        vias.into_iter()
            .filter_map(|via| self.two_leg_route(from, via, to, airspace))
            .reduce(|best, r| if r.len() < best.len() { r } else { best })
    }

    /// Approach the goal from the corner of the bounding box opposite
    /// `from`'s row or column, or from two cells beyond the goal along
    /// the direction of travel.
    pub fn opposite_side_route(
        &self,
        from: Position,
        to: Position,
        airspace: &Airspace,
    ) -> Option<Vec<Position>> {
        let (dr, dc) = from.heading_to(to);
        let approaches = [
            Position::new(to.row, from.col),
            Position::new(from.row, to.col),
            to.offset(2 * dr, 0),
            to.offset(0, 2 * dc),
        ];
        approaches
            .into_iter()
            .filter(|&p| airspace.is_valid(p))
            .find_map(|p| self.two_leg_route(from, p, to, airspace))
    }

    fn two_leg_route(
        &self,
        from: Position,
        via: Position,
        to: Position,
        airspace: &Airspace,
    ) -> Option<Vec<Position>> {
        let mut route = self.direct_route(from, via, airspace)?;
        route.extend(self.direct_route(via, to, airspace)?);
        (!route.is_empty()).then_some(route)
    }
}

/// Outer corners of `zone`, those on the side facing `from` first.
fn corner_preference(zone: &NoFlyZone, from: Position) -> [Position; 4] {
    let [tl, tr, bl, br] = zone.outer_corners();
    if from.row < zone.top_left().row {
        [tl, tr, bl, br]
    } else if from.row > zone.bottom_right().row {
        [bl, br, tl, tr]
    } else if from.col < zone.top_left().col {
        [tl, bl, tr, br]
    } else {
        [tr, br, tl, bl]
    }
}

/// A usable bypass: non-empty, ends on `to`, and every cell is valid.
pub fn route_is_valid(route: &[Position], to: Position, airspace: &Airspace) -> bool {
    route.last() == Some(&to) && route.iter().all(|&p| airspace.is_valid(p))
}
