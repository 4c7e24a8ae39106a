//! Antenna graph core.
//!
//! Antennas are vertices; every pair of antennas sharing a frequency may be
//! joined by an undirected edge. This module provides:
//! - Vertex and edge storage with coordinate lookup
//! - Depth-first and breadth-first traversal
//! - Exhaustive simple-path enumeration between two antennas
//!
//! ## Module Organization
//!
//! - `store`: Vertex arena, adjacency lists, lookup
//! - `traversal`: DFS and BFS with per-visit callbacks
//! - `paths`: Backtracking path enumeration
//! - `error`: Failure taxonomy for mutation and traversal

pub mod error;
pub mod paths;
pub mod store;
pub mod traversal;

pub use error::GraphError;
pub use paths::{PathBlocked, PathSearch};
pub use store::{Frequency, Graph, Vertex, VertexId};
pub use traversal::VisitEvent;
