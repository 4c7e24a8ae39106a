//! Error type for graph mutation and traversal failures.

use super::store::{Frequency, VertexId};

/// Failures reported by the graph store and traversal engine.
///
/// Path enumeration preconditions are not represented here: a missing endpoint
/// or a frequency mismatch is a legitimate query outcome and is reported through
/// [`super::paths::PathBlocked`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The host could not reserve memory for a vertex or an adjacency entry.
    Allocation,
    /// A handle that does not refer to a live vertex of this graph.
    InvalidVertex(VertexId),
    /// An edge was requested between antennas of different frequencies.
    FrequencyMismatch { from: Frequency, to: Frequency },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::Allocation => write!(f, "Out of memory while growing the graph"),
            GraphError::InvalidVertex(id) => write!(f, "Vertex {} does not exist in this graph", id),
            GraphError::FrequencyMismatch { from, to } => write!(f, "Cannot connect antennas of different frequencies ({} and {})", from, to),
        }
    }
}

impl std::error::Error for GraphError {}
