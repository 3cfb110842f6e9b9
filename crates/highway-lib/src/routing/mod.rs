//! Route planning along the highway.
//!
//! This module provides:
//! - [`RouteRequest`] - Start and goal markers of a query
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//! - [`NeighborCursor`] and [`find_path`] - The lazy-neighbour search engine
//!
//! A route is a sequence of stations where each hop is no longer than the
//! largest vehicle autonomy at the station it leaves from. Routes minimise the
//! number of hops first, then the running minimum of intermediate markers,
//! then prefer the smaller predecessor marker.
//!
//! # Example
//!
//! ```
//! use highway_lib::{plan_route, RouteRequest, Station, StationIndex, VehiclePool};
//!
//! let mut index = StationIndex::new();
//! for (marker, autonomy) in [(0, 5), (5, 5), (10, 0)] {
//!     let pool = VehiclePool::with_vehicles(512, &[autonomy]).unwrap();
//!     index.insert(Station::new(marker, pool)).unwrap();
//! }
//! let plan = plan_route(&index, &RouteRequest::new(0, 10)).unwrap();
//! assert_eq!(plan.steps, vec![0, 5, 10]);
//! ```

mod cursor;
mod search;

pub use cursor::NeighborCursor;
pub use search::{find_path, SearchState};

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::index::{Marker, StationIndex};

/// Direction of travel along the highway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards larger markers.
    Ascending,
    /// Towards smaller markers.
    Descending,
}

impl Direction {
    /// Direction of travel from `start` to `goal`.
    pub fn between(start: Marker, goal: Marker) -> Self {
        if start < goal {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }
}

/// How a route was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Start and goal coincide.
    Trivial,
    /// The goal is within one hop of the start.
    Direct,
    /// Found by the multi-hop search.
    Searched,
}

/// High-level route planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: Marker,
    pub goal: Marker,
}

impl RouteRequest {
    pub fn new(start: Marker, goal: Marker) -> Self {
        Self { start, goal }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub start: Marker,
    pub goal: Marker,
    pub direction: Direction,
    pub kind: RouteKind,
    pub steps: Vec<Marker>,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

impl fmt::Display for RoutePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, marker) in self.steps.iter().enumerate() {
            if position > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{marker}")?;
        }
        Ok(())
    }
}

/// Plan a route between the request's markers.
///
/// Identical start and goal markers always yield a one-station route, even
/// when no station sits at that marker. Otherwise both endpoints must exist.
pub fn plan_route(index: &StationIndex, request: &RouteRequest) -> Result<RoutePlan> {
    let RouteRequest { start, goal } = *request;
    let direction = Direction::between(start, goal);
    let plan = |kind, steps| RoutePlan {
        start,
        goal,
        direction,
        kind,
        steps,
    };

    if start == goal {
        return Ok(plan(RouteKind::Trivial, vec![start]));
    }

    let (Some(source), Some(target)) = (index.find(start), index.find(goal)) else {
        debug!(start, goal, "route endpoint missing");
        return Err(Error::RouteNotFound { start, goal });
    };

    if start.abs_diff(goal) <= index.max_autonomy(source) {
        return Ok(plan(RouteKind::Direct, vec![start, goal]));
    }

    let steps =
        find_path(index, source, target, direction).ok_or(Error::RouteNotFound { start, goal })?;
    Ok(plan(RouteKind::Searched, steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::VehiclePool;
    use crate::index::Station;

    fn highway<const N: usize>(stations: [(Marker, Vec<u64>); N]) -> StationIndex {
        let mut index = StationIndex::new();
        for (marker, vehicles) in stations {
            let pool = VehiclePool::with_vehicles(8, &vehicles).expect("fits");
            index.insert(Station::new(marker, pool)).expect("unique");
        }
        index
    }

    #[test]
    fn same_marker_is_trivial_even_without_station() {
        let index = StationIndex::new();
        let plan = plan_route(&index, &RouteRequest::new(42, 42)).expect("trivial");
        assert_eq!(plan.kind, RouteKind::Trivial);
        assert_eq!(plan.steps, vec![42]);
        assert_eq!(plan.hop_count(), 0);
    }

    #[test]
    fn reachable_goal_is_direct() {
        let index = highway([(0, vec![3, 12]), (10, vec![])]);
        let plan = plan_route(&index, &RouteRequest::new(0, 10)).expect("direct");
        assert_eq!(plan.kind, RouteKind::Direct);
        assert_eq!(plan.to_string(), "0 10");
    }

    #[test]
    fn direct_hop_works_backwards() {
        let index = highway([(0, vec![]), (10, vec![10])]);
        let plan = plan_route(&index, &RouteRequest::new(10, 0)).expect("direct");
        assert_eq!(plan.direction, Direction::Descending);
        assert_eq!(plan.steps, vec![10, 0]);
    }

    #[test]
    fn missing_endpoint_has_no_route() {
        let index = highway([(0, vec![100])]);
        let error = plan_route(&index, &RouteRequest::new(0, 50)).expect_err("goal missing");
        assert!(matches!(error, Error::RouteNotFound { start: 0, goal: 50 }));
    }

    #[test]
    fn multi_hop_route_is_searched() {
        let index = highway([(0, vec![5]), (5, vec![5]), (10, vec![])]);
        let plan = plan_route(&index, &RouteRequest::new(0, 10)).expect("route");
        assert_eq!(plan.kind, RouteKind::Searched);
        assert_eq!(plan.hop_count(), 2);
    }

    #[test]
    fn direction_between_markers() {
        assert_eq!(Direction::between(1, 2), Direction::Ascending);
        assert_eq!(Direction::between(2, 1), Direction::Descending);
    }
}
