//! Lazy neighbour enumeration over the station index.
//!
//! No adjacency list exists. Reachable stations are discovered by walking the
//! index in marker order from a watermark: the farthest station discovered so
//! far in the direction of travel. The watermark only moves forward, so every
//! station is handed out at most once per query.

use tracing::trace;

use crate::index::{StationId, StationIndex};

use super::Direction;

/// Watermark-driven walker yielding stations within reach of the current one.
#[derive(Debug, Clone, Copy)]
pub struct NeighborCursor {
    direction: Direction,
    frontier: StationId,
}

impl NeighborCursor {
    /// Start a cursor at the query's source station.
    pub fn new(direction: Direction, origin: StationId) -> Self {
        Self {
            direction,
            frontier: origin,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Farthest station handed out so far.
    pub fn frontier(&self) -> StationId {
        self.frontier
    }

    /// Next station past the watermark that `from` can reach in one hop.
    ///
    /// Returns `None` once the next station is out of range or the index is
    /// exhausted; the watermark is left where it was in that case.
    pub fn next_within(&mut self, index: &StationIndex, from: StationId) -> Option<StationId> {
        let candidate = match self.direction {
            Direction::Ascending => index.successor(self.frontier),
            Direction::Descending => index.predecessor(self.frontier),
        }?;

        let span = index.marker(candidate).abs_diff(index.marker(from));
        if span > index.max_autonomy(from) {
            return None;
        }

        trace!(
            from = index.marker(from),
            to = index.marker(candidate),
            "neighbour discovered"
        );
        self.frontier = candidate;
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::VehiclePool;
    use crate::index::{Marker, Station};

    fn highway(stations: &[(Marker, u64)]) -> StationIndex {
        let mut index = StationIndex::new();
        for &(marker, autonomy) in stations {
            let pool = VehiclePool::with_vehicles(4, &[autonomy]).expect("fits");
            index.insert(Station::new(marker, pool)).expect("unique");
        }
        index
    }

    fn drain(cursor: &mut NeighborCursor, index: &StationIndex, from: Marker) -> Vec<Marker> {
        let from = index.find(from).expect("present");
        std::iter::from_fn(|| cursor.next_within(index, from))
            .map(|id| index.marker(id))
            .collect()
    }

    #[test]
    fn ascending_walk_stops_at_range() {
        let index = highway(&[(0, 10), (4, 0), (10, 0), (11, 0)]);
        let origin = index.find(0).expect("present");
        let mut cursor = NeighborCursor::new(Direction::Ascending, origin);
        assert_eq!(drain(&mut cursor, &index, 0), vec![4, 10]);
        assert_eq!(index.marker(cursor.frontier()), 10);
    }

    #[test]
    fn descending_walk_uses_predecessors() {
        let index = highway(&[(0, 0), (5, 0), (9, 0), (12, 7)]);
        let origin = index.find(12).expect("present");
        let mut cursor = NeighborCursor::new(Direction::Descending, origin);
        assert_eq!(drain(&mut cursor, &index, 12), vec![9, 5]);
    }

    #[test]
    fn watermark_is_never_rewalked() {
        let index = highway(&[(0, 5), (3, 20), (5, 0), (20, 0)]);
        let origin = index.find(0).expect("present");
        let mut cursor = NeighborCursor::new(Direction::Ascending, origin);
        assert_eq!(drain(&mut cursor, &index, 0), vec![3, 5]);
        // 3 reaches 5 as well, but 5 was already handed out.
        assert_eq!(drain(&mut cursor, &index, 3), vec![20]);
        assert_eq!(drain(&mut cursor, &index, 3), Vec::<Marker>::new());
    }
}
