//! Hop-minimal route search.
//!
//! A Dijkstra-style relaxation ordered by `(hops, cost, marker)`, where cost is
//! the running minimum of intermediate markers. Neighbours come from a
//! [`NeighborCursor`] instead of an edge list. All per-query bookkeeping lives
//! in a [`SearchState`] that is built for the query and dropped with it, so the
//! station index never carries search leftovers between queries.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::heap::MinHeap;
use crate::index::{Marker, StationId, StationIndex};

use super::cursor::NeighborCursor;
use super::Direction;

const UNREACHED_HOPS: u32 = u32::MAX;
const UNREACHED_COST: Marker = Marker::MAX;

/// Best known way of reaching one station during a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Label {
    visited: bool,
    hops: u32,
    cost: Marker,
    previous: Option<StationId>,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            visited: false,
            hops: UNREACHED_HOPS,
            cost: UNREACHED_COST,
            previous: None,
        }
    }
}

/// Per-query labels for every arena slot of the index.
#[derive(Debug, Clone)]
pub struct SearchState {
    labels: Vec<Label>,
}

impl SearchState {
    /// Fresh state with every station unreached and unvisited.
    pub fn new(index: &StationIndex) -> Self {
        Self {
            labels: vec![Label::default(); index.slot_count()],
        }
    }

    /// Hop count of the best path found to `id`, if any.
    pub fn hops(&self, id: StationId) -> Option<u32> {
        let hops = self.labels[id.index()].hops;
        (hops != UNREACHED_HOPS).then_some(hops)
    }

    pub fn is_visited(&self, id: StationId) -> bool {
        self.labels[id.index()].visited
    }

    /// Heap priority: hops, then cost, then marker.
    fn priority(&self, index: &StationIndex, id: StationId) -> (u32, Marker, Marker) {
        let label = &self.labels[id.index()];
        (label.hops, label.cost, index.marker(id))
    }

    fn label(&self, id: StationId) -> &Label {
        &self.labels[id.index()]
    }

    fn label_mut(&mut self, id: StationId) -> &mut Label {
        &mut self.labels[id.index()]
    }
}

/// Search for a multi-hop route from `source` to `target`.
///
/// Returns the markers along the route, source first, or `None` once the
/// frontier is exhausted without popping the target.
pub fn find_path(
    index: &StationIndex,
    source: StationId,
    target: StationId,
    direction: Direction,
) -> Option<Vec<Marker>> {
    PathSearch::new(index, source, target, direction).run()
}

struct PathSearch<'a> {
    index: &'a StationIndex,
    source: StationId,
    target: StationId,
    state: SearchState,
    heap: MinHeap<StationId>,
    cursor: NeighborCursor,
    found: bool,
}

impl<'a> PathSearch<'a> {
    fn new(
        index: &'a StationIndex,
        source: StationId,
        target: StationId,
        direction: Direction,
    ) -> Self {
        let mut state = SearchState::new(index);
        let origin = state.label_mut(source);
        origin.hops = 0;
        origin.cost = 0;

        Self {
            index,
            source,
            target,
            state,
            heap: MinHeap::new(),
            cursor: NeighborCursor::new(direction, source),
            found: false,
        }
    }

    fn run(mut self) -> Option<Vec<Marker>> {
        self.expand(self.source, true);

        let mut pops = 0usize;
        while !self.found {
            let (index, state) = (self.index, &self.state);
            let Some(current) = self.heap.pop(|id| state.priority(index, id)) else {
                break;
            };
            pops += 1;
            self.expand(current, false);
        }

        debug!(
            source = self.index.marker(self.source),
            target = self.index.marker(self.target),
            direction = ?self.cursor.direction(),
            found = self.found,
            pops,
            heap_capacity = self.heap.capacity(),
            "route search finished"
        );

        self.found.then(|| self.reconstruct())
    }

    /// Mark `current` processed and relax every station newly within its reach.
    fn expand(&mut self, current: StationId, from_source: bool) {
        if current == self.target {
            self.found = true;
        }
        self.state.label_mut(current).visited = true;
        if self.found {
            return;
        }

        while let Some(next) = self.cursor.next_within(self.index, current) {
            if !self.state.is_visited(next) {
                self.relax(current, next, from_source);
            }
        }
    }

    fn relax(&mut self, from: StationId, to: StationId, from_source: bool) {
        let origin = *self.state.label(from);
        let hops = origin.hops.saturating_add(1);
        let marker = self.index.marker(to);

        let cost = if from_source {
            marker
        } else if to == self.target {
            origin.cost
        } else {
            origin.cost.min(marker)
        };

        let accept = from_source || {
            let existing = self.state.label(to);
            match hops.cmp(&existing.hops) {
                Ordering::Less => true,
                Ordering::Equal => {
                    cost < existing.cost
                        || (cost == existing.cost
                            && existing.previous.is_some_and(|previous| {
                                self.index.marker(from) < self.index.marker(previous)
                            }))
                }
                Ordering::Greater => false,
            }
        };
        if !accept {
            return;
        }

        let label = self.state.label_mut(to);
        label.hops = hops;
        label.cost = cost;
        label.previous = Some(from);
        trace!(
            station = marker,
            via = self.index.marker(from),
            hops,
            cost,
            "label improved"
        );

        let (index, state) = (self.index, &self.state);
        self.heap.push(to, |id| state.priority(index, id));
    }

    fn reconstruct(&self) -> Vec<Marker> {
        let mut steps = Vec::new();
        let mut current = Some(self.target);
        while let Some(id) = current {
            steps.push(self.index.marker(id));
            if id == self.source {
                break;
            }
            current = self.state.label(id).previous;
        }
        steps.reverse();
        steps
    }
}
