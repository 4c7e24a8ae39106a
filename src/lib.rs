//! Antenna maps as graphs.
//!
//! Antennas on a rectangular grid are vertices; antennas sharing a frequency
//! are connected. On top of that graph the crate provides:
//! - DFS/BFS traversal and exhaustive simple-path enumeration (`graph`)
//! - Segment intersections between frequencies and interference cells (`geometry`)
//! - Binary/text map loading and text rendering (`map`)
//! - Settings file handling (`config`) and printable query results (`report`)

pub mod config;
pub mod geometry;
pub mod graph;
pub mod map;
pub mod report;
