//! Vertex arena and adjacency storage for the antenna graph.
//!
//! Antennas are stored in insertion order inside a single `Vec`, addressed by
//! [`VertexId`]. Each vertex keeps its own adjacency list of ids in the order
//! edges were added. Edges are undirected and only ever join antennas that
//! share a frequency, so every frequency class ends up as its own component.

use log::{debug, trace, warn};
use serde::Serialize;
use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};

use super::error::GraphError;

/// Symbolic frequency class of an antenna (the map glyph it was loaded from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Frequency(pub char);

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable handle to a vertex inside one [`Graph`].
///
/// Handles are plain arena indices: they stay valid for the lifetime of the
/// graph that issued them and mean nothing to any other graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VertexId(usize);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One antenna: frequency, grid position and incident edges.
#[derive(Debug)]
pub struct Vertex {
    frequency: Frequency,
    x: i32,
    y: i32,
    /// Transient traversal marker, cleared by [`Graph::reset_visited`].
    visited: Cell<bool>,
    edges: Vec<VertexId>,
}

impl Vertex {
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Neighbours in the order their edges were added.
    pub fn neighbors(&self) -> &[VertexId] {
        &self.edges
    }

    pub fn is_visited(&self) -> bool {
        self.visited.get()
    }

    pub(super) fn set_visited(&self, visited: bool) {
        self.visited.set(visited);
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({},{})", self.frequency, self.x, self.y)
    }
}

/// Sole owner of every antenna and every edge.
///
/// Dropping the graph releases all vertices and adjacency lists at once.
#[derive(Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    /// First antenna inserted at each occupied cell.
    cells: HashMap<(i32, i32), VertexId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `capacity` vertices.
    ///
    /// # Returns
    ///
    /// `Err(GraphError::Allocation)` if the reservation cannot be satisfied.
    pub fn with_capacity(capacity: usize) -> Result<Self, GraphError> {
        let mut vertices = Vec::new();
        vertices.try_reserve(capacity).map_err(|_| GraphError::Allocation)?;
        let mut cells = HashMap::new();
        cells.try_reserve(capacity).map_err(|_| GraphError::Allocation)?;
        Ok(Self { vertices, cells })
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum::<usize>() / 2
    }

    /// Insert an antenna and return its handle.
    ///
    /// Vertices are never deduplicated by coordinate. A second antenna on an
    /// occupied cell is accepted; [`Graph::find_vertex`] will keep returning the
    /// first one and [`Graph::find_vertices_at`] returns both.
    pub fn add_vertex(&mut self, frequency: Frequency, x: i32, y: i32) -> Result<VertexId, GraphError> {
        let occupied = self.cells.contains_key(&(x, y));
        if occupied {
            warn!("Antenna {} placed on occupied cell ({}, {})", frequency, x, y);
        } else {
            self.cells.try_reserve(1).map_err(|_| GraphError::Allocation)?;
        }
        self.vertices.try_reserve(1).map_err(|_| GraphError::Allocation)?;

        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            frequency,
            x,
            y,
            visited: Cell::new(false),
            edges: Vec::new(),
        });
        if !occupied {
            self.cells.insert((x, y), id);
        }
        trace!("Added antenna {} {}({},{})", id, frequency, x, y);
        Ok(id)
    }

    /// Connect two antennas of the same frequency.
    ///
    /// Re-adding an existing edge (in either direction) is a no-op, and so is
    /// connecting a vertex to itself. Nothing is mutated when an error is
    /// returned.
    ///
    /// # Returns
    ///
    /// * `Err(GraphError::InvalidVertex)` if either handle is not in this graph
    /// * `Err(GraphError::FrequencyMismatch)` if the frequencies differ
    /// * `Err(GraphError::Allocation)` if an adjacency list cannot grow
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), GraphError> {
        let from = self.vertex_checked(u)?.frequency;
        let to = self.vertex_checked(v)?.frequency;
        if from != to {
            debug!("Rejected edge {} -> {}: frequency {} != {}", u, v, from, to);
            return Err(GraphError::FrequencyMismatch { from, to });
        }
        if u == v || self.has_edge(u, v) {
            return Ok(());
        }

        // Reserve both sides first so a failure leaves the adjacency untouched.
        self.vertices[u.0].edges.try_reserve(1).map_err(|_| GraphError::Allocation)?;
        self.vertices[v.0].edges.try_reserve(1).map_err(|_| GraphError::Allocation)?;
        self.vertices[u.0].edges.push(v);
        self.vertices[v.0].edges.push(u);
        Ok(())
    }

    /// True if `u` and `v` are directly connected.
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.vertex(u).is_some_and(|vertex| vertex.edges.contains(&v))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    pub(crate) fn vertex_checked(&self, id: VertexId) -> Result<&Vertex, GraphError> {
        self.vertices.get(id.0).ok_or(GraphError::InvalidVertex(id))
    }

    /// First antenna at `(x, y)` in insertion order.
    pub fn find_vertex(&self, x: i32, y: i32) -> Option<VertexId> {
        self.cells.get(&(x, y)).copied()
    }

    /// Every antenna at `(x, y)`, in insertion order.
    pub fn find_vertices_at(&self, x: i32, y: i32) -> Vec<VertexId> {
        if !self.cells.contains_key(&(x, y)) {
            return Vec::new();
        }
        self.vertices()
            .filter(|(_, v)| v.x == x && v.y == y)
            .map(|(id, _)| id)
            .collect()
    }

    /// All vertices with their handles, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices.iter().enumerate().map(|(i, v)| (VertexId(i), v))
    }

    /// Handles of every antenna tuned to `frequency`, in insertion order.
    pub fn ids_with_frequency(&self, frequency: Frequency) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices().filter(move |(_, v)| v.frequency == frequency).map(|(id, _)| id)
    }

    /// Distinct frequency classes present in the graph.
    pub fn frequencies(&self) -> BTreeSet<Frequency> {
        self.vertices.iter().map(|v| v.frequency).collect()
    }

    /// Clear the visited marker on every vertex.
    pub fn reset_visited(&self) {
        for v in &self.vertices {
            v.visited.set(false);
        }
    }

    /// Drop every vertex and edge, leaving an empty graph.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(points: &[(char, i32, i32)]) -> (Graph, Vec<VertexId>) {
        let mut graph = Graph::new();
        let ids = points
            .iter()
            .map(|&(f, x, y)| graph.add_vertex(Frequency(f), x, y).unwrap())
            .collect();
        (graph, ids)
    }

    #[test]
    fn new_graph_is_empty() {
        let graph = Graph::with_capacity(16).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_edge_is_symmetric() {
        let (mut graph, ids) = graph_with(&[('A', 0, 0), ('A', 3, 4)]);
        graph.add_edge(ids[0], ids[1]).unwrap();

        assert_eq!(graph.vertex(ids[0]).unwrap().neighbors(), &[ids[1]]);
        assert_eq!(graph.vertex(ids[1]).unwrap().neighbors(), &[ids[0]]);
        assert!(graph.has_edge(ids[1], ids[0]));
    }

    #[test]
    fn add_edge_twice_is_idempotent() {
        let (mut graph, ids) = graph_with(&[('A', 0, 0), ('A', 3, 4)]);
        graph.add_edge(ids[0], ids[1]).unwrap();
        graph.add_edge(ids[0], ids[1]).unwrap();
        graph.add_edge(ids[1], ids[0]).unwrap();

        assert_eq!(graph.vertex(ids[0]).unwrap().neighbors().len(), 1);
        assert_eq!(graph.vertex(ids[1]).unwrap().neighbors().len(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn frequency_mismatch_leaves_adjacency_untouched() {
        let (mut graph, ids) = graph_with(&[('A', 0, 0), ('0', 1, 1)]);
        let err = graph.add_edge(ids[0], ids[1]).unwrap_err();

        assert_eq!(
            err,
            GraphError::FrequencyMismatch {
                from: Frequency('A'),
                to: Frequency('0')
            }
        );
        assert!(graph.vertex(ids[0]).unwrap().neighbors().is_empty());
        assert!(graph.vertex(ids[1]).unwrap().neighbors().is_empty());
    }

    #[test]
    fn unknown_handle_is_rejected() {
        let (mut graph, ids) = graph_with(&[('A', 0, 0)]);
        let ghost = VertexId(7);
        assert_eq!(graph.add_edge(ids[0], ghost), Err(GraphError::InvalidVertex(ghost)));
        assert_eq!(graph.add_edge(ghost, ids[0]), Err(GraphError::InvalidVertex(ghost)));
        assert!(graph.vertex(ids[0]).unwrap().neighbors().is_empty());
    }

    #[test]
    fn self_edge_is_ignored() {
        let (mut graph, ids) = graph_with(&[('A', 0, 0)]);
        graph.add_edge(ids[0], ids[0]).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn find_vertex_returns_first_of_duplicates() {
        let (graph, ids) = graph_with(&[('A', 2, 2), ('B', 5, 1), ('C', 2, 2)]);

        assert_eq!(graph.find_vertex(2, 2), Some(ids[0]));
        assert_eq!(graph.find_vertices_at(2, 2), vec![ids[0], ids[2]]);
        assert_eq!(graph.find_vertex(5, 1), Some(ids[1]));
        assert_eq!(graph.find_vertex(9, 9), None);
        assert!(graph.find_vertices_at(9, 9).is_empty());
    }

    #[test]
    fn reset_visited_clears_every_marker() {
        let (graph, ids) = graph_with(&[('A', 0, 0), ('B', 1, 0)]);
        for (_, v) in graph.vertices() {
            v.set_visited(true);
        }
        graph.reset_visited();
        assert!(ids.iter().all(|&id| !graph.vertex(id).unwrap().is_visited()));
    }

    #[test]
    fn frequency_queries() {
        let (graph, ids) = graph_with(&[('A', 0, 0), ('0', 1, 0), ('A', 2, 0)]);
        let a: Vec<_> = graph.ids_with_frequency(Frequency('A')).collect();
        assert_eq!(a, vec![ids[0], ids[2]]);
        assert_eq!(graph.frequencies().into_iter().collect::<Vec<_>>(), vec![Frequency('0'), Frequency('A')]);
    }

    #[test]
    fn clear_releases_everything() {
        let (mut graph, ids) = graph_with(&[('A', 0, 0), ('A', 1, 0)]);
        graph.add_edge(ids[0], ids[1]).unwrap();
        graph.clear();
        assert!(graph.is_empty());
        assert!(graph.vertex(ids[0]).is_none());
        assert_eq!(graph.find_vertex(0, 0), None);

        let again = graph.add_vertex(Frequency('B'), 0, 0).unwrap();
        assert_eq!(graph.find_vertex(0, 0), Some(again));
    }

    #[test]
    fn position_lookup_stays_indexed_on_large_grids() {
        let mut graph = Graph::with_capacity(200 * 200).unwrap();
        for y in 0..200 {
            for x in 0..200 {
                graph.add_vertex(Frequency('A'), x, y).unwrap();
            }
        }
        let id = graph.find_vertex(123, 45).unwrap();
        assert_eq!(graph.vertex(id).unwrap().position(), (123, 45));
        assert_eq!(graph.find_vertices_at(123, 45), vec![id]);
        assert_eq!(graph.find_vertex(200, 0), None);
    }
}
