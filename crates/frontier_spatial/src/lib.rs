//! # frontier_spatial
//!
//! Spatial indexing for the simulation: axis-aligned bounding squares and a
//! capacity-bounded point quadtree. Sensing queries the quadtree for nearby
//! entities; presentation-side callers use the same structure for visibility
//! culling.

pub mod aabb;
pub mod quadtree;

pub use aabb::Aabb;
pub use quadtree::QuadTree;
