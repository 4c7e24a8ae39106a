//! Exhaustive simple-path enumeration between two antennas.
//!
//! Backtracking depth-first search that carries the current path explicitly.
//! A vertex is marked while it sits on the path and unmarked when its branch
//! is abandoned, so sibling branches may reuse it. The descent runs on a heap
//! frame stack, so path length is not bounded by the call stack. The number
//! of paths on a dense clique grows factorially; no cap is applied here.

use log::debug;
use serde::Serialize;

use super::store::{Frequency, Graph, VertexId};

/// Why a path query could not produce any path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum PathBlocked {
    MissingOrigin,
    MissingDestination,
    MissingBoth,
    IncompatibleFrequency { origin: Frequency, destination: Frequency },
}

impl std::fmt::Display for PathBlocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathBlocked::MissingOrigin => write!(f, "Origin antenna does not exist on the map"),
            PathBlocked::MissingDestination => write!(f, "Destination antenna does not exist on the map"),
            PathBlocked::MissingBoth => write!(f, "Neither antenna exists on the map"),
            PathBlocked::IncompatibleFrequency { origin, destination } => {
                write!(f, "Antennas have different frequencies ({} and {})", origin, destination)
            }
        }
    }
}

/// Every simple path found by one query, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathSearch {
    pub paths: Vec<Vec<VertexId>>,
    /// Set when a precondition failed; `paths` is then empty.
    pub blocked: Option<PathBlocked>,
}

impl PathSearch {
    pub fn count(&self) -> usize {
        self.paths.len()
    }
}

/// The working path of one enumeration, with a neighbour cursor per frame.
///
/// Entering a vertex marks it visited and pushes a frame; leaving pops the
/// frame and clears the mark. Dropping the walk leaves every remaining frame,
/// so no marker survives the search on any exit.
struct PathWalk<'g> {
    graph: &'g Graph,
    path: Vec<VertexId>,
    cursors: Vec<usize>,
}

impl<'g> PathWalk<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            path: Vec::new(),
            cursors: Vec::new(),
        }
    }

    fn enter(&mut self, id: VertexId) {
        if let Some(vertex) = self.graph.vertex(id) {
            vertex.set_visited(true);
        }
        self.path.push(id);
        self.cursors.push(0);
    }

    fn leave(&mut self) {
        self.cursors.pop();
        if let Some(vertex) = self.path.pop().and_then(|id| self.graph.vertex(id)) {
            vertex.set_visited(false);
        }
    }

    /// Next unvisited neighbour of the top frame, advancing its cursor past it.
    fn next_branch(&mut self) -> Option<VertexId> {
        let (&current, cursor) = self.path.last().zip(self.cursors.last_mut())?;
        let neighbors = self.graph.vertex(current).map(|v| v.neighbors()).unwrap_or_default();
        while let Some(&next) = neighbors.get(*cursor) {
            *cursor += 1;
            if self.graph.vertex(next).is_some_and(|n| !n.is_visited()) {
                return Some(next);
            }
        }
        None
    }
}

impl Drop for PathWalk<'_> {
    fn drop(&mut self) {
        while !self.path.is_empty() {
            self.leave();
        }
    }
}

impl Graph {
    /// Enumerate every simple path from `origin` to `destination`.
    ///
    /// Endpoints are optional so a failed coordinate lookup can be passed
    /// straight through; a handle that is not part of this graph counts as
    /// missing. `on_path` receives each path in origin-to-destination order.
    /// When both endpoints are the same antenna the single one-vertex path is
    /// reported.
    ///
    /// # Returns
    ///
    /// The number of paths found, or the reason no search was possible.
    pub fn enumerate_paths_with<F>(&self, origin: Option<VertexId>, destination: Option<VertexId>, mut on_path: F) -> Result<usize, PathBlocked>
    where
        F: FnMut(&[VertexId]),
    {
        let origin = origin.and_then(|id| self.vertex(id).map(|v| (id, v)));
        let destination = destination.and_then(|id| self.vertex(id).map(|v| (id, v)));

        let ((origin_id, origin_vertex), (destination_id, destination_vertex)) = match (origin, destination) {
            (None, None) => return Err(PathBlocked::MissingBoth),
            (None, Some(_)) => return Err(PathBlocked::MissingOrigin),
            (Some(_), None) => return Err(PathBlocked::MissingDestination),
            (Some(o), Some(d)) => (o, d),
        };
        if origin_vertex.frequency() != destination_vertex.frequency() {
            return Err(PathBlocked::IncompatibleFrequency {
                origin: origin_vertex.frequency(),
                destination: destination_vertex.frequency(),
            });
        }

        self.reset_visited();
        let mut found = 0;
        let mut walk = PathWalk::new(self);
        walk.enter(origin_id);
        while let Some(&current) = walk.path.last() {
            if current == destination_id {
                found += 1;
                on_path(&walk.path);
                walk.leave();
                continue;
            }
            match walk.next_branch() {
                Some(next) => walk.enter(next),
                None => walk.leave(),
            }
        }
        debug!("Found {} path(s) between {} and {}", found, origin_vertex, destination_vertex);
        Ok(found)
    }

    /// Collect every simple path from `origin` to `destination`.
    pub fn all_paths(&self, origin: Option<VertexId>, destination: Option<VertexId>) -> PathSearch {
        let mut paths = Vec::new();
        match self.enumerate_paths_with(origin, destination, |path| paths.push(path.to_vec())) {
            Ok(_) => PathSearch { paths, blocked: None },
            Err(blocked) => PathSearch {
                paths: Vec::new(),
                blocked: Some(blocked),
            },
        }
    }
}
