//! Geometric analyses over antenna positions.
//!
//! Contains:
//! - Segment-segment intersection between two frequency classes
//! - Interference cells derived from aligned same-frequency pairs
//!
//! Both work on vertex positions and edges only and never touch traversal state.

pub mod interference;
pub mod intersection;
pub mod types;

pub use interference::interference_points;
pub use intersection::{IntersectionReport, find_intersections};
pub use types::{GridBounds, GridPos};
