//! Crossing points between the edge segments of two frequency classes.
//!
//! Every edge of the graph is read as a straight segment between its two
//! antennas. Each segment of class A is tested against each segment of class B
//! and the distinct crossing cells are collected.
//!
//! Arithmetic is exact: the intersection parameters are kept as `i128`
//! fractions, wide enough for any pair of `i32` segments, and the crossing point is narrowed to the grid by truncation
//! toward zero, so `(1.5, 0.5)` lands on `(1, 0)`.

use log::debug;
use serde::Serialize;
use std::collections::HashMap;

use super::types::GridPos;
use crate::graph::{Frequency, Graph, VertexId};

/// An undirected segment named by its endpoints, lower handle first.
pub type Segment = (VertexId, VertexId);

/// One pair of segments that produced an intersection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Crossing {
    pub segment_a: Segment,
    pub segment_b: Segment,
}

/// A distinct intersection cell with every segment pair that lands on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Intersection {
    pub position: GridPos,
    pub crossings: Vec<Crossing>,
}

/// Result of one intersection query, points in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntersectionReport {
    pub frequency_a: Frequency,
    pub frequency_b: Frequency,
    pub points: Vec<Intersection>,
}

impl IntersectionReport {
    /// Number of distinct intersection points.
    pub fn count(&self) -> usize {
        self.points.len()
    }
}

/// Intersection of segment `p1`-`p2` with segment `p3`-`p4`.
///
/// Parallel and coincident segments never intersect. A crossing only counts
/// when it lies on both finite segments, endpoints included.
///
/// # Returns
///
/// The crossing cell, truncated toward zero, or `None`.
pub fn segment_intersection(p1: GridPos, p2: GridPos, p3: GridPos, p4: GridPos) -> Option<GridPos> {
    let (x1, y1) = (i128::from(p1.x), i128::from(p1.y));
    let (x2, y2) = (i128::from(p2.x), i128::from(p2.y));
    let (x3, y3) = (i128::from(p3.x), i128::from(p3.y));
    let (x4, y4) = (i128::from(p4.x), i128::from(p4.y));

    let denom = (y4 - y3) * (x2 - x1) - (x4 - x3) * (y2 - y1);
    if denom == 0 {
        return None;
    }
    let ua = (x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3);
    let ub = (x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3);

    // ua/denom and ub/denom must both fall in [0, 1].
    let (denom, ua, ub) = if denom < 0 { (-denom, -ua, -ub) } else { (denom, ua, ub) };
    if !(0..=denom).contains(&ua) || !(0..=denom).contains(&ub) {
        return None;
    }

    // Integer division truncates toward zero and denom is positive here.
    let x = (x1 * denom + ua * (x2 - x1)) / denom;
    let y = (y1 * denom + ua * (y2 - y1)) / denom;
    Some(GridPos::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}

/// Every edge among antennas of `frequency` as an ordered-endpoint segment.
fn segments_of(graph: &Graph, frequency: Frequency) -> Vec<Segment> {
    graph
        .ids_with_frequency(frequency)
        .flat_map(move |id| {
            graph
                .vertex(id)
                .map(|v| v.neighbors())
                .unwrap_or_default()
                .iter()
                .filter(move |&&n| id < n)
                .map(move |&n| (id, n))
        })
        .collect()
}

fn position_of(graph: &Graph, id: VertexId) -> Option<GridPos> {
    graph.vertex(id).map(|v| GridPos::from(v.position()))
}

/// Find the distinct points where an A-segment crosses a B-segment.
///
/// When `frequency_a == frequency_b` each unordered pair of distinct segments
/// is tested once; segments of one clique that share an antenna meet at it.
pub fn find_intersections(graph: &Graph, frequency_a: Frequency, frequency_b: Frequency) -> IntersectionReport {
    let segments_a = segments_of(graph, frequency_a);
    let segments_b = segments_of(graph, frequency_b);
    let same_class = frequency_a == frequency_b;

    let mut points: Vec<Intersection> = Vec::new();
    let mut index: HashMap<GridPos, usize> = HashMap::new();

    for (i, &segment_a) in segments_a.iter().enumerate() {
        let (Some(p1), Some(p2)) = (position_of(graph, segment_a.0), position_of(graph, segment_a.1)) else {
            continue;
        };
        let start = if same_class { i + 1 } else { 0 };
        for &segment_b in &segments_b[start.min(segments_b.len())..] {
            let (Some(p3), Some(p4)) = (position_of(graph, segment_b.0), position_of(graph, segment_b.1)) else {
                continue;
            };
            let Some(position) = segment_intersection(p1, p2, p3, p4) else {
                continue;
            };

            let crossing = Crossing { segment_a, segment_b };
            match index.get(&position) {
                Some(&slot) => points[slot].crossings.push(crossing),
                None => {
                    debug!(
                        "Line {}{}-{}{} crosses {}{}-{}{} at {}",
                        frequency_a, p1, frequency_a, p2, frequency_b, p3, frequency_b, p4, position
                    );
                    index.insert(position, points.len());
                    points.push(Intersection {
                        position,
                        crossings: vec![crossing],
                    });
                }
            }
        }
    }

    IntersectionReport {
        frequency_a,
        frequency_b,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> GridPos {
        GridPos::new(x, y)
    }

    fn graph_with_segments(segments: &[(char, (i32, i32), (i32, i32))]) -> Graph {
        let mut graph = Graph::new();
        for &(f, (x1, y1), (x2, y2)) in segments {
            let a = graph.add_vertex(Frequency(f), x1, y1).unwrap();
            let b = graph.add_vertex(Frequency(f), x2, y2).unwrap();
            graph.add_edge(a, b).unwrap();
        }
        graph
    }

    #[test]
    fn diagonals_cross_in_the_middle() {
        assert_eq!(segment_intersection(p(0, 0), p(4, 4), p(0, 4), p(4, 0)), Some(p(2, 2)));

        let graph = graph_with_segments(&[('A', (0, 0), (4, 4)), ('0', (0, 4), (4, 0))]);
        let report = find_intersections(&graph, Frequency('A'), Frequency('0'));
        assert_eq!(report.count(), 1);
        assert_eq!(report.points[0].position, p(2, 2));
        assert_eq!(report.points[0].crossings.len(), 1);
    }

    #[test]
    fn parallel_segments_never_intersect() {
        assert_eq!(segment_intersection(p(0, 0), p(4, 0), p(0, 1), p(4, 1)), None);

        let graph = graph_with_segments(&[('A', (0, 0), (4, 0)), ('B', (0, 1), (4, 1))]);
        assert_eq!(find_intersections(&graph, Frequency('A'), Frequency('B')).count(), 0);
        assert_eq!(find_intersections(&graph, Frequency('B'), Frequency('A')).count(), 0);
    }

    #[test]
    fn coincident_segments_are_not_reported() {
        assert_eq!(segment_intersection(p(0, 0), p(4, 0), p(2, 0), p(6, 0)), None);
    }

    #[test]
    fn crossing_outside_the_segments_is_excluded() {
        // The supporting lines meet at (5,5), beyond both segments.
        assert_eq!(segment_intersection(p(0, 0), p(2, 2), p(10, 0), p(8, 2)), None);
        // Inside one segment but past the end of the other.
        assert_eq!(segment_intersection(p(0, 0), p(10, 10), p(5, 0), p(5, 3)), None);
    }

    #[test]
    fn shared_endpoint_counts_as_intersection() {
        assert_eq!(segment_intersection(p(0, 0), p(4, 4), p(4, 4), p(8, 0)), Some(p(4, 4)));
    }

    #[test]
    fn fractional_crossing_is_truncated() {
        // Exact crossing at (1.5, 0.5).
        assert_eq!(segment_intersection(p(0, 0), p(3, 1), p(0, 1), p(3, 0)), Some(p(1, 0)));
        // Exact crossing at (-0.5, 0.5): truncation goes toward zero, not down.
        assert_eq!(segment_intersection(p(-1, 0), p(0, 1), p(-1, 1), p(0, 0)), Some(p(0, 0)));
    }

    #[test]
    fn extreme_corner_diagonals_do_not_overflow() {
        let (min, max) = (i32::MIN, i32::MAX);
        // Lines y = x and x + y = -1 meet at (-0.5, -0.5).
        assert_eq!(segment_intersection(p(min, min), p(max, max), p(min, max), p(max, min)), Some(p(0, 0)));
        assert_eq!(segment_intersection(p(min, 0), p(max, 0), p(0, min), p(0, max)), Some(p(0, 0)));
        assert_eq!(segment_intersection(p(min, min), p(max, min), p(min, max), p(max, max)), None);

        let graph = graph_with_segments(&[('A', (min, min), (max, max)), ('0', (min, max), (max, min))]);
        let report = find_intersections(&graph, Frequency('A'), Frequency('0'));
        assert_eq!(report.count(), 1);
        assert_eq!(report.points[0].position, p(0, 0));
    }

    #[test]
    fn repeated_points_are_reported_once() {
        // Two A segments and one B segment all meeting at (2,2).
        let graph = graph_with_segments(&[('A', (0, 0), (4, 4)), ('A', (2, 0), (2, 4)), ('B', (0, 4), (4, 0))]);
        let report = find_intersections(&graph, Frequency('A'), Frequency('B'));
        assert_eq!(report.count(), 1);
        assert_eq!(report.points[0].position, p(2, 2));
        assert_eq!(report.points[0].crossings.len(), 2);
    }

    #[test]
    fn same_class_query_tests_each_pair_once() {
        let graph = graph_with_segments(&[('A', (0, 0), (4, 4)), ('A', (0, 4), (4, 0))]);
        let report = find_intersections(&graph, Frequency('A'), Frequency('A'));
        assert_eq!(report.count(), 1);
        assert_eq!(report.points[0].crossings.len(), 1);
    }

    #[test]
    fn unknown_frequency_has_no_segments() {
        let graph = graph_with_segments(&[('A', (0, 0), (4, 4))]);
        assert_eq!(find_intersections(&graph, Frequency('A'), Frequency('Z')).count(), 0);
    }
}
