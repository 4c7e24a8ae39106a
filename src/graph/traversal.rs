//! Depth-first and breadth-first traversal over the antenna graph.
//!
//! Both searches reset every visited marker on entry, only ever walk the
//! component reachable from the start antenna, and report one [`VisitEvent`]
//! per vertex in visit order. Because edges never cross frequency classes, a
//! traversal never leaves the start antenna's frequency.

use log::trace;
use serde::Serialize;
use std::collections::VecDeque;

use super::error::GraphError;
use super::store::{Frequency, Graph, Vertex, VertexId};

/// A vertex being reached by a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitEvent {
    pub id: VertexId,
    pub frequency: Frequency,
    pub x: i32,
    pub y: i32,
}

impl VisitEvent {
    fn new(id: VertexId, vertex: &Vertex) -> Self {
        Self {
            id,
            frequency: vertex.frequency(),
            x: vertex.x(),
            y: vertex.y(),
        }
    }
}

impl std::fmt::Display for VisitEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({},{})", self.frequency, self.x, self.y)
    }
}

impl Graph {
    /// Depth-first search from `start`, calling `on_visit` as each vertex is first reached.
    ///
    /// Neighbours are explored in adjacency order. The explicit stack yields the
    /// same pre-order as the recursive formulation without bounding the
    /// component size by the call stack.
    ///
    /// # Returns
    ///
    /// The number of vertices visited, or `GraphError::InvalidVertex` if
    /// `start` is not part of this graph.
    pub fn depth_first_with<F>(&self, start: VertexId, mut on_visit: F) -> Result<usize, GraphError>
    where
        F: FnMut(VisitEvent),
    {
        self.vertex_checked(start)?;
        self.reset_visited();

        let mut visited = 0;
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let vertex = self.vertex_checked(id)?;
            if vertex.is_visited() {
                continue;
            }
            vertex.set_visited(true);
            trace!("DFS visiting {} {}", id, vertex);
            on_visit(VisitEvent::new(id, vertex));
            visited += 1;

            // Reverse push so the first neighbour is explored first.
            for &next in vertex.neighbors().iter().rev() {
                if !self.vertex_checked(next)?.is_visited() {
                    stack.push(next);
                }
            }
        }
        Ok(visited)
    }

    /// Breadth-first search from `start`, calling `on_visit` as each vertex is dequeued.
    ///
    /// Vertices are marked when enqueued, so nothing is queued twice.
    pub fn breadth_first_with<F>(&self, start: VertexId, mut on_visit: F) -> Result<usize, GraphError>
    where
        F: FnMut(VisitEvent),
    {
        let first = self.vertex_checked(start)?;
        self.reset_visited();

        let mut visited = 0;
        let mut queue = VecDeque::new();
        first.set_visited(true);
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            let vertex = self.vertex_checked(id)?;
            trace!("BFS visiting {} {}", id, vertex);
            on_visit(VisitEvent::new(id, vertex));
            visited += 1;

            for &next in vertex.neighbors() {
                let neighbor = self.vertex_checked(next)?;
                if !neighbor.is_visited() {
                    neighbor.set_visited(true);
                    queue.push_back(next);
                }
            }
        }
        Ok(visited)
    }

    /// Depth-first visit order from `start`.
    pub fn depth_first(&self, start: VertexId) -> Result<Vec<VisitEvent>, GraphError> {
        let mut events = Vec::new();
        self.depth_first_with(start, |event| events.push(event))?;
        Ok(events)
    }

    /// Breadth-first visit order from `start`.
    pub fn breadth_first(&self, start: VertexId) -> Result<Vec<VisitEvent>, GraphError> {
        let mut events = Vec::new();
        self.breadth_first_with(start, |event| events.push(event))?;
        Ok(events)
    }
}
