//! Query results as printable text or JSON.
//!
//! Each command produces a [`QueryReport`]. The CLI prints it either with
//! [`QueryReport::to_text`] or through `serde_json`.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;

use crate::geometry::{GridBounds, GridPos, IntersectionReport, interference_points};
use crate::graph::{Frequency, Graph, PathBlocked, PathSearch, VertexId, VisitEvent};
use crate::map::{render_adjacency, render_grid};

/// One antenna as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AntennaView {
    pub frequency: Frequency,
    pub x: i32,
    pub y: i32,
}

impl AntennaView {
    fn of(graph: &Graph, id: VertexId) -> Option<Self> {
        graph.vertex(id).map(|v| Self {
            frequency: v.frequency(),
            x: v.x(),
            y: v.y(),
        })
    }
}

impl std::fmt::Display for AntennaView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({},{})", self.frequency, self.x, self.y)
    }
}

/// Which traversal produced a visit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    DepthFirst,
    BreadthFirst,
}

/// Segment endpoints of one crossing, by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossingView {
    pub segment_a: [AntennaView; 2],
    pub segment_b: [AntennaView; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntersectionView {
    pub position: GridPos,
    pub crossings: Vec<CrossingView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryReport {
    Map {
        rows: i32,
        cols: i32,
        antennas: Vec<AntennaView>,
        interference: Vec<GridPos>,
        #[serde(skip)]
        adjacency: String,
        grid: Vec<String>,
    },
    Traversal {
        order: TraversalOrder,
        start: GridPos,
        /// `None` when no antenna sits at `start`.
        visits: Option<Vec<VisitEvent>>,
    },
    Paths {
        origin: GridPos,
        destination: GridPos,
        count: usize,
        paths: Vec<Vec<AntennaView>>,
        blocked: Option<PathBlocked>,
    },
    Intersections {
        frequency_a: Frequency,
        frequency_b: Frequency,
        count: usize,
        points: Vec<IntersectionView>,
    },
    Interference {
        points: Vec<GridPos>,
    },
}

impl QueryReport {
    pub fn map(graph: &Graph, bounds: GridBounds) -> Self {
        let interference = interference_points(graph, bounds);
        QueryReport::Map {
            rows: bounds.rows,
            cols: bounds.cols,
            antennas: graph.vertices().filter_map(|(id, _)| AntennaView::of(graph, id)).collect(),
            interference: interference.iter().copied().collect(),
            adjacency: render_adjacency(graph),
            grid: render_grid(graph, bounds, &interference),
        }
    }

    pub fn traversal(order: TraversalOrder, start: GridPos, visits: Option<Vec<VisitEvent>>) -> Self {
        QueryReport::Traversal { order, start, visits }
    }

    pub fn paths(graph: &Graph, origin: GridPos, destination: GridPos, search: &PathSearch) -> Self {
        QueryReport::Paths {
            origin,
            destination,
            count: search.count(),
            paths: search
                .paths
                .iter()
                .map(|path| path.iter().filter_map(|&id| AntennaView::of(graph, id)).collect())
                .collect(),
            blocked: search.blocked,
        }
    }

    pub fn intersections(graph: &Graph, report: &IntersectionReport) -> Self {
        let view = |(a, b): (VertexId, VertexId)| -> Option<[AntennaView; 2]> { Some([AntennaView::of(graph, a)?, AntennaView::of(graph, b)?]) };
        QueryReport::Intersections {
            frequency_a: report.frequency_a,
            frequency_b: report.frequency_b,
            count: report.count(),
            points: report
                .points
                .iter()
                .map(|point| IntersectionView {
                    position: point.position,
                    crossings: point
                        .crossings
                        .iter()
                        .filter_map(|c| {
                            Some(CrossingView {
                                segment_a: view(c.segment_a)?,
                                segment_b: view(c.segment_b)?,
                            })
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn interference(points: &BTreeSet<GridPos>) -> Self {
        QueryReport::Interference {
            points: points.iter().copied().collect(),
        }
    }

    /// Human-readable rendering.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        match self {
            QueryReport::Map { adjacency, grid, .. } => {
                out.push_str("=== Graph ===\n");
                out.push_str(adjacency);
                out.push_str("\n=== Map ===\n");
                for line in grid {
                    let _ = writeln!(out, "{}", line);
                }
            }
            QueryReport::Traversal { order, start, visits } => {
                let title = match order {
                    TraversalOrder::DepthFirst => "Depth-first search",
                    TraversalOrder::BreadthFirst => "Breadth-first search",
                };
                let _ = writeln!(out, "=== {} from {} ===", title, start);
                match visits {
                    Some(visits) => {
                        for visit in visits {
                            let _ = writeln!(out, "Visiting: {}", visit);
                        }
                    }
                    None => {
                        let _ = writeln!(out, "No antenna at {}", start);
                    }
                }
            }
            QueryReport::Paths {
                origin,
                destination,
                count,
                paths,
                blocked,
            } => {
                if let Some(reason) = blocked {
                    let _ = writeln!(out, "No paths between {} and {}:", origin, destination);
                    let _ = writeln!(out, "- {}", reason);
                    return out;
                }
                let _ = writeln!(out, "=== Paths between {} and {} ===", origin, destination);
                for (i, path) in paths.iter().enumerate() {
                    let steps: Vec<String> = path.iter().map(|a| a.to_string()).collect();
                    let _ = writeln!(out, "Path {}: {}", i + 1, steps.join(" "));
                }
                if *count == 0 {
                    out.push_str("No path found between the antennas\n");
                } else {
                    let _ = writeln!(out, "Total paths found: {}", count);
                }
            }
            QueryReport::Intersections {
                frequency_a,
                frequency_b,
                points,
                ..
            } => {
                let _ = writeln!(out, "=== Intersections between frequencies {} and {} ===", frequency_a, frequency_b);
                if points.is_empty() {
                    let _ = writeln!(out, "No intersection found between frequencies {} and {}", frequency_a, frequency_b);
                }
                for point in points {
                    if let Some(first) = point.crossings.first() {
                        let _ = writeln!(
                            out,
                            "Line {}-{} with {}-{} at {}",
                            first.segment_a[0], first.segment_a[1], first.segment_b[0], first.segment_b[1], point.position
                        );
                    }
                }
            }
            QueryReport::Interference { points } => {
                let _ = writeln!(out, "=== Interference points ({}) ===", points.len());
                for point in points {
                    let _ = writeln!(out, "{}", point);
                }
            }
        }
        out
    }
}
