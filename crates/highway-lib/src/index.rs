//! Ordered station registry.
//!
//! Stations are kept in an AVL tree keyed by their marker. Nodes live in a
//! `Vec` arena and refer to each other through [`StationId`] handles, so
//! rotations are plain handle reassignments. Parent links are handles as well
//! and are only used to walk upwards when looking for in-order neighbours.
//!
//! Removing a station with two children moves its in-order successor's payload
//! into the removed slot and frees the successor's node instead. Handles held
//! across a removal may therefore point at a different station afterwards.

use std::cmp::Ordering;
use std::iter;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fleet::{Autonomy, VehiclePool};

/// Position of a station along the highway.
pub type Marker = i64;

/// Handle to a node slot in a [`StationIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(u32);

impl StationId {
    /// Slot position inside the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A service station and the vehicles parked there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Station {
    marker: Marker,
    pool: VehiclePool,
}

impl Station {
    pub fn new(marker: Marker, pool: VehiclePool) -> Self {
        Self { marker, pool }
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    pub fn pool(&self) -> &VehiclePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut VehiclePool {
        &mut self.pool
    }

    /// Farthest one-hop reach from this station.
    pub fn max_autonomy(&self) -> Autonomy {
        self.pool.max_autonomy()
    }
}

/// Tree neighbourhood of one node, expressed in markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeLinks {
    pub marker: Marker,
    pub parent: Option<Marker>,
    pub left: Option<Marker>,
    pub right: Option<Marker>,
    pub height: u32,
}

#[derive(Debug, Clone, Default)]
struct Node {
    station: Station,
    parent: Option<StationId>,
    left: Option<StationId>,
    right: Option<StationId>,
    height: u32,
    // false once the slot has been released to the free list
    alive: bool,
}

impl Node {
    fn new(station: Station) -> Self {
        Self {
            station,
            parent: None,
            left: None,
            right: None,
            height: 1,
            alive: true,
        }
    }
}

/// Self-balancing ordered map from marker to [`Station`].
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    nodes: Vec<Node>,
    free: Vec<StationId>,
    root: Option<StationId>,
    len: usize,
}

impl StationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stations in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<StationId> {
        self.root
    }

    /// Number of arena slots, live or free. Every live handle indexes below it.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> u32 {
        self.height_of(self.root)
    }

    /// Locate the station at `marker`.
    pub fn find(&self, marker: Marker) -> Option<StationId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match marker.cmp(&node.station.marker) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    pub fn get(&self, marker: Marker) -> Option<&Station> {
        self.find(marker).map(|id| &self.node(id).station)
    }

    pub fn get_mut(&mut self, marker: Marker) -> Option<&mut Station> {
        let id = self.find(marker)?;
        Some(&mut self.node_mut(id).station)
    }

    /// Station behind a handle, or `None` if the slot is not live.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.nodes
            .get(id.index())
            .filter(|node| node.alive)
            .map(|node| &node.station)
    }

    /// Insert a new station.
    ///
    /// A station already present at the same marker is left untouched and the
    /// call fails with [`Error::DuplicateStation`].
    pub fn insert(&mut self, station: Station) -> Result<StationId> {
        let marker = station.marker;
        if self.find(marker).is_some() {
            return Err(Error::DuplicateStation { marker });
        }

        let id = self.allocate(station);
        let root = self.insert_at(self.root, id);
        self.node_mut(root).parent = None;
        self.root = Some(root);
        self.len += 1;

        debug!(marker, height = self.height(), "station inserted");
        Ok(id)
    }

    /// Remove the station at `marker`, returning it with its vehicle pool.
    pub fn remove(&mut self, marker: Marker) -> Result<Station> {
        let mut removed = None;
        let root = self.remove_at(self.root, marker, &mut removed);
        if let Some(root) = root {
            self.node_mut(root).parent = None;
        }
        self.root = root;

        let station = removed.ok_or(Error::StationNotFound { marker })?;
        self.len -= 1;

        debug!(marker, height = self.height(), "station removed");
        Ok(station)
    }

    /// Station with the smallest marker.
    pub fn first(&self) -> Option<StationId> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Station with the largest marker.
    pub fn last(&self) -> Option<StationId> {
        self.root.map(|root| self.rightmost(root))
    }

    /// In-order successor: the station with the next larger marker.
    pub fn successor(&self, id: StationId) -> Option<StationId> {
        let node = self.nodes.get(id.index()).filter(|node| node.alive)?;
        if let Some(right) = node.right {
            return Some(self.leftmost(right));
        }

        let mut child = id;
        let mut parent = node.parent;
        while let Some(ancestor) = parent {
            if self.node(ancestor).right != Some(child) {
                break;
            }
            child = ancestor;
            parent = self.node(ancestor).parent;
        }
        parent
    }

    /// In-order predecessor: the station with the next smaller marker.
    pub fn predecessor(&self, id: StationId) -> Option<StationId> {
        let node = self.nodes.get(id.index()).filter(|node| node.alive)?;
        if let Some(left) = node.left {
            return Some(self.rightmost(left));
        }

        let mut child = id;
        let mut parent = node.parent;
        while let Some(ancestor) = parent {
            if self.node(ancestor).left != Some(child) {
                break;
            }
            child = ancestor;
            parent = self.node(ancestor).parent;
        }
        parent
    }

    /// Handles in ascending marker order.
    pub fn ids(&self) -> impl Iterator<Item = StationId> + '_ {
        iter::successors(self.first(), move |&id| self.successor(id))
    }

    /// Stations in ascending marker order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> + '_ {
        self.ids().map(move |id| &self.node(id).station)
    }

    /// Parent, children and height of a live node.
    pub fn links(&self, id: StationId) -> Option<NodeLinks> {
        let node = self.nodes.get(id.index()).filter(|node| node.alive)?;
        Some(NodeLinks {
            marker: node.station.marker,
            parent: node.parent.map(|p| self.marker(p)),
            left: node.left.map(|l| self.marker(l)),
            right: node.right.map(|r| self.marker(r)),
            height: node.height,
        })
    }

    /// Check ordering, balance, stored heights and parent back-links.
    pub fn audit(&self) -> Result<()> {
        let Some(root) = self.root else {
            return if self.len == 0 {
                Ok(())
            } else {
                Err(Error::IndexInvariant {
                    marker: 0,
                    detail: format!("empty tree reports {} stations", self.len),
                })
            };
        };

        let mut count = 0;
        self.audit_at(root, None, None, None, &mut count)?;
        if count != self.len {
            return Err(Error::IndexInvariant {
                marker: self.marker(root),
                detail: format!("tree holds {count} stations but reports {}", self.len),
            });
        }
        Ok(())
    }

    pub(crate) fn marker(&self, id: StationId) -> Marker {
        self.node(id).station.marker
    }

    pub(crate) fn max_autonomy(&self, id: StationId) -> Autonomy {
        self.node(id).station.max_autonomy()
    }

    fn node(&self, id: StationId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: StationId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    fn allocate(&mut self, station: Station) -> StationId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = Node::new(station);
            return id;
        }
        let id = StationId(self.nodes.len() as u32);
        self.nodes.push(Node::new(station));
        id
    }

    fn release(&mut self, id: StationId) -> Station {
        let node = std::mem::take(self.node_mut(id));
        self.free.push(id);
        node.station
    }

    fn height_of(&self, id: Option<StationId>) -> u32 {
        id.map_or(0, |id| self.node(id).height)
    }

    fn balance(&self, id: StationId) -> i64 {
        let node = self.node(id);
        i64::from(self.height_of(node.left)) - i64::from(self.height_of(node.right))
    }

    fn update_height(&mut self, id: StationId) {
        let node = self.node(id);
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.node_mut(id).height = height;
    }

    fn attach_left(&mut self, parent: StationId, child: Option<StationId>) {
        self.node_mut(parent).left = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(parent);
        }
    }

    fn attach_right(&mut self, parent: StationId, child: Option<StationId>) {
        self.node_mut(parent).right = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(parent);
        }
    }

    fn leftmost(&self, mut id: StationId) -> StationId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: StationId) -> StationId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    fn rotate_right(&mut self, y: StationId) -> StationId {
        let Some(x) = self.node(y).left else {
            return y;
        };
        let inner = self.node(x).right;
        let parent = self.node(y).parent;

        self.attach_left(y, inner);
        self.attach_right(x, Some(y));
        self.node_mut(x).parent = parent;

        self.update_height(y);
        self.update_height(x);
        x
    }

    fn rotate_left(&mut self, x: StationId) -> StationId {
        let Some(y) = self.node(x).right else {
            return x;
        };
        let inner = self.node(y).left;
        let parent = self.node(x).parent;

        self.attach_right(x, inner);
        self.attach_left(y, Some(x));
        self.node_mut(y).parent = parent;

        self.update_height(x);
        self.update_height(y);
        y
    }

    fn insert_at(&mut self, subtree: Option<StationId>, new: StationId) -> StationId {
        let Some(id) = subtree else {
            self.node_mut(new).parent = None;
            return new;
        };

        let marker = self.marker(new);
        if marker < self.marker(id) {
            let left = self.insert_at(self.node(id).left, new);
            self.attach_left(id, Some(left));
        } else {
            let right = self.insert_at(self.node(id).right, new);
            self.attach_right(id, Some(right));
        }

        self.update_height(id);
        let balance = self.balance(id);
        let node = self.node(id);
        match (node.left, node.right) {
            (Some(left), _) if balance > 1 => {
                if marker > self.marker(left) {
                    let rotated = self.rotate_left(left);
                    self.attach_left(id, Some(rotated));
                }
                self.rotate_right(id)
            }
            (_, Some(right)) if balance < -1 => {
                if marker < self.marker(right) {
                    let rotated = self.rotate_right(right);
                    self.attach_right(id, Some(rotated));
                }
                self.rotate_left(id)
            }
            _ => id,
        }
    }

    fn remove_at(
        &mut self,
        subtree: Option<StationId>,
        marker: Marker,
        removed: &mut Option<Station>,
    ) -> Option<StationId> {
        let id = subtree?;
        match marker.cmp(&self.marker(id)) {
            Ordering::Less => {
                let left = self.remove_at(self.node(id).left, marker, removed);
                self.attach_left(id, left);
            }
            Ordering::Greater => {
                let right = self.remove_at(self.node(id).right, marker, removed);
                self.attach_right(id, right);
            }
            Ordering::Equal => match (self.node(id).left, self.node(id).right) {
                (Some(_), Some(right)) => {
                    let (rest, successor) = self.take_min(right);
                    let station = std::mem::replace(&mut self.node_mut(id).station, successor);
                    *removed = Some(station);
                    self.attach_right(id, rest);
                }
                (child, None) | (None, child) => {
                    *removed = Some(self.release(id));
                    return child;
                }
            },
        }
        Some(self.rebalance(id))
    }

    /// Unlink the leftmost node of `id`'s subtree and hand back its payload.
    fn take_min(&mut self, id: StationId) -> (Option<StationId>, Station) {
        match self.node(id).left {
            None => {
                let right = self.node(id).right;
                (right, self.release(id))
            }
            Some(left) => {
                let (rest, station) = self.take_min(left);
                self.attach_left(id, rest);
                (Some(self.rebalance(id)), station)
            }
        }
    }

    fn rebalance(&mut self, id: StationId) -> StationId {
        self.update_height(id);
        let balance = self.balance(id);
        let node = self.node(id);
        match (node.left, node.right) {
            (Some(left), _) if balance > 1 => {
                if self.balance(left) < 0 {
                    let rotated = self.rotate_left(left);
                    self.attach_left(id, Some(rotated));
                }
                self.rotate_right(id)
            }
            (_, Some(right)) if balance < -1 => {
                if self.balance(right) > 0 {
                    let rotated = self.rotate_right(right);
                    self.attach_right(id, Some(rotated));
                }
                self.rotate_left(id)
            }
            _ => id,
        }
    }

    fn audit_at(
        &self,
        id: StationId,
        parent: Option<StationId>,
        lower: Option<Marker>,
        upper: Option<Marker>,
        count: &mut usize,
    ) -> Result<u32> {
        let node = self.node(id);
        let marker = node.station.marker;
        let violation = |detail: String| Error::IndexInvariant { marker, detail };

        if !node.alive {
            return Err(violation("reachable node is vacant".to_string()));
        }
        if node.parent != parent {
            return Err(violation(format!(
                "parent link {:?} does not match {:?}",
                node.parent.map(|p| self.marker(p)),
                parent.map(|p| self.marker(p))
            )));
        }
        if lower.is_some_and(|bound| marker <= bound)
            || upper.is_some_and(|bound| marker >= bound)
        {
            return Err(violation(format!("marker outside ({lower:?}, {upper:?})")));
        }
        *count += 1;

        let left = match node.left {
            Some(left) => self.audit_at(left, Some(id), lower, Some(marker), count)?,
            None => 0,
        };
        let right = match node.right {
            Some(right) => self.audit_at(right, Some(id), Some(marker), upper, count)?,
            None => 0,
        };

        if left.abs_diff(right) > 1 {
            return Err(violation(format!(
                "unbalanced subtrees: left height {left}, right height {right}"
            )));
        }
        let height = 1 + left.max(right);
        if node.height != height {
            return Err(violation(format!(
                "stored height {} but subtree height is {height}",
                node.height
            )));
        }
        Ok(height)
    }
}
