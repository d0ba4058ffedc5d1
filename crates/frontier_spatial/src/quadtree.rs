//! A capacity-bounded point quadtree.
//!
//! Each node holds up to `capacity` keyed points before lazily subdividing
//! into four quadrants. A point lives in exactly one node: the shallowest node
//! whose region contains it with residual capacity, or one of its
//! subdivisions. Removal never merges sibling nodes back — the tree only
//! grows, which is acceptable for per-tick rebuild or short-lived indices.

use std::collections::HashMap;
use std::hash::Hash;

use glam::Vec2;

use crate::aabb::Aabb;

/// Default point capacity per node before subdivision.
pub const DEFAULT_NODE_CAPACITY: usize = 16;

/// Nodes at or below this half extent absorb overflow instead of subdividing,
/// so coincident points (e.g. entities spawned at the same position) cannot
/// recurse without bound.
const MIN_NODE_EXTENT: f32 = 1e-3;

/// A point quadtree storing `(position, payload)` pairs keyed by id.
#[derive(Debug)]
pub struct QuadTree<K, T> {
    region: Aabb,
    capacity: usize,
    points: HashMap<K, (Vec2, T)>,
    /// NW, NE, SW, SE quadrants once subdivided.
    children: Option<Box<[QuadTree<K, T>; 4]>>,
}

impl<K: Copy + Eq + Hash, T> QuadTree<K, T> {
    /// Creates an empty tree covering `region` with the default node capacity.
    #[must_use]
    pub fn new(region: Aabb) -> Self {
        Self::with_capacity(region, DEFAULT_NODE_CAPACITY)
    }

    /// Creates an empty tree covering `region` with the given node capacity.
    #[must_use]
    pub fn with_capacity(region: Aabb, capacity: usize) -> Self {
        Self {
            region,
            capacity: capacity.max(1),
            points: HashMap::new(),
            children: None,
        }
    }

    /// The region covered by this node.
    #[must_use]
    pub fn region(&self) -> Aabb {
        self.region
    }

    /// Total number of points stored in this node and its subdivisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children
                .as_ref()
                .map_or(0, |c| c.iter().map(QuadTree::len).sum())
    }

    /// Returns `true` if the tree holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a keyed point.
    ///
    /// Returns `false` if the position lies outside this node's region;
    /// otherwise the point lands in the first node with residual capacity
    /// along its containment path, subdividing on overflow.
    pub fn insert(&mut self, position: Vec2, key: K, payload: T) -> bool {
        if !self.region.contains(position) {
            return false;
        }
        if self.children.is_none()
            && (self.points.len() < self.capacity || self.region.half_extent <= MIN_NODE_EXTENT)
        {
            self.points.insert(key, (position, payload));
            return true;
        }
        if self.children.is_none() {
            self.subdivide();
        }
        // Quadrant regions share closed edges; the first containing child
        // takes the point, so it is stored exactly once.
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.region.contains(position) {
                    return child.insert(position, key, payload);
                }
            }
        }
        false
    }

    /// Looks up a point by key along the same recursive path as insertion.
    #[must_use]
    pub fn get(&self, key: K) -> Option<(Vec2, &T)> {
        if let Some((position, payload)) = self.points.get(&key) {
            return Some((*position, payload));
        }
        self.children
            .as_ref()?
            .iter()
            .find_map(|child| child.get(key))
    }

    /// Removes a point by key. Returns whether it was present. Sibling nodes
    /// are never merged back.
    pub fn remove(&mut self, key: K) -> bool {
        if self.points.remove(&key).is_some() {
            return true;
        }
        match self.children.as_mut() {
            Some(children) => children.iter_mut().any(|child| child.remove(key)),
            None => false,
        }
    }

    /// Returns every stored point whose position lies inside `area`.
    ///
    /// Recurses into a child whenever the child's region intersects the query
    /// region — pruning by anything less (e.g. centroid distance) would drop
    /// points near node boundaries.
    #[must_use]
    pub fn query(&self, area: &Aabb) -> Vec<(K, Vec2, &T)> {
        let mut hits = Vec::new();
        self.query_into(area, &mut hits);
        hits
    }

    fn query_into<'a>(&'a self, area: &Aabb, hits: &mut Vec<(K, Vec2, &'a T)>) {
        if !self.region.intersects(area) {
            return;
        }
        for (key, (position, payload)) in &self.points {
            if area.contains(*position) {
                hits.push((*key, *position, payload));
            }
        }
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.query_into(area, hits);
            }
        }
    }

    fn subdivide(&mut self) {
        let quarter = self.region.half_extent / 2.0;
        let c = self.region.center;
        let quadrant = |dx: f32, dy: f32| {
            QuadTree::with_capacity(
                Aabb::new(Vec2::new(c.x + dx, c.y + dy), quarter),
                self.capacity,
            )
        };
        self.children = Some(Box::new([
            quadrant(-quarter, quarter),  // NW
            quadrant(quarter, quarter),   // NE
            quadrant(-quarter, -quarter), // SW
            quadrant(quarter, -quarter),  // SE
        ]));
    }
}
