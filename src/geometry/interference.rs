//! Interference cells implied by aligned same-frequency antenna pairs.
//!
//! Two antennas of one frequency at offset `(dx, dy)` are aligned when the
//! offset is axis-parallel, diagonal, or has a 2:1 or 3:1 ratio. An aligned
//! pair projects interference one offset beyond each antenna, away from the
//! other. Projected cells that fall outside the grid or onto an antenna are
//! discarded.

use log::trace;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::types::{GridBounds, GridPos};
use crate::graph::{Frequency, Graph};

/// True if the offset `(dx, dy)` puts two antennas in forced alignment.
pub fn is_aligned(dx: i64, dy: i64) -> bool {
    let (ax, ay) = (dx.unsigned_abs(), dy.unsigned_abs());
    dx == 0 || dy == 0 || ax == ay || ax == 2 * ay || 2 * ax == ay || ax == 3 * ay || 3 * ax == ay
}

/// Offset from `u` to `v`, in `i64`.
fn offset(u: GridPos, v: GridPos) -> (i64, i64) {
    (i64::from(v.x) - i64::from(u.x), i64::from(v.y) - i64::from(u.y))
}

/// The cells an aligned pair `u`, `v` projects onto inside `bounds`: `u - d` and `v + d` with `d = v - u`.
pub fn projected_cells(u: GridPos, v: GridPos, bounds: GridBounds) -> impl Iterator<Item = GridPos> {
    let (dx, dy) = offset(u, v);
    [
        (i64::from(u.x) - dx, i64::from(u.y) - dy),
        (i64::from(v.x) + dx, i64::from(v.y) + dy),
    ]
    .into_iter()
    .filter_map(move |(x, y)| bounds.cell_at(x, y))
}

/// Every interference cell on a grid of `bounds`.
///
/// Evaluated over every ordered pair of distinct same-frequency antennas.
/// The result is sorted by `(x, y)` and holds no antenna positions.
pub fn interference_points(graph: &Graph, bounds: GridBounds) -> BTreeSet<GridPos> {
    let occupied: HashSet<GridPos> = graph.vertices().map(|(_, v)| GridPos::from(v.position())).collect();

    let mut classes: BTreeMap<Frequency, Vec<GridPos>> = BTreeMap::new();
    for (_, v) in graph.vertices() {
        classes.entry(v.frequency()).or_default().push(GridPos::from(v.position()));
    }

    let mut points = BTreeSet::new();
    for (frequency, members) in &classes {
        for (i, &u) in members.iter().enumerate() {
            for (j, &v) in members.iter().enumerate() {
                let (dx, dy) = offset(u, v);
                if i == j || !is_aligned(dx, dy) {
                    continue;
                }
                for cell in projected_cells(u, v, bounds) {
                    if !occupied.contains(&cell) && points.insert(cell) {
                        trace!("Interference at {} from {}{} and {}{}", cell, frequency, u, frequency, v);
                    }
                }
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(points: &[(char, i32, i32)]) -> Graph {
        let mut graph = Graph::new();
        for &(f, x, y) in points {
            graph.add_vertex(Frequency(f), x, y).unwrap();
        }
        graph
    }

    #[test]
    fn alignment_ratios() {
        assert!(is_aligned(0, 5));
        assert!(is_aligned(-4, 0));
        assert!(is_aligned(2, -2));
        assert!(is_aligned(4, 2));
        assert!(is_aligned(-1, 2));
        assert!(is_aligned(6, -2));
        assert!(is_aligned(1, 3));
        assert!(!is_aligned(3, 2));
        assert!(!is_aligned(1, 4));
        assert!(!is_aligned(5, -3));
    }

    #[test]
    fn diagonal_pair_projects_both_ways() {
        let graph = graph_of(&[('A', 4, 5), ('A', 6, 7)]);
        let points = interference_points(&graph, GridBounds::new(12, 12));
        assert_eq!(points.into_iter().collect::<Vec<_>>(), vec![GridPos::new(2, 3), GridPos::new(8, 9)]);
    }

    #[test]
    fn out_of_bounds_cells_are_clipped() {
        let graph = graph_of(&[('A', 1, 1), ('A', 3, 3)]);
        let points = interference_points(&graph, GridBounds::new(5, 5));
        // (-1,-1) is off the grid and (5,5) is past the far edge.
        assert!(points.is_empty());
    }

    #[test]
    fn extreme_coordinates_project_off_grid() {
        let graph = graph_of(&[('A', i32::MIN, 0), ('A', i32::MAX, 0), ('B', i32::MIN, i32::MIN), ('B', i32::MAX, i32::MAX)]);
        assert!(interference_points(&graph, GridBounds::new(10, 10)).is_empty());
    }

    #[test]
    fn projected_cells_are_clipped_after_widening() {
        // One projection passes i32::MAX, the other lands far below zero.
        let u = GridPos::new(i32::MAX, 0);
        let v = GridPos::new(1, 0);
        assert_eq!(projected_cells(u, v, GridBounds::new(1, 10)).count(), 0);

        let near = projected_cells(GridPos::new(4, 2), GridPos::new(5, 2), GridBounds::new(3, 10)).collect::<Vec<_>>();
        assert_eq!(near, vec![GridPos::new(3, 2), GridPos::new(6, 2)]);
    }

    #[test]
    fn occupied_cells_are_skipped() {
        // The forward projection of the A pair lands on the B antenna.
        let graph = graph_of(&[('A', 2, 0), ('A', 4, 0), ('B', 6, 0)]);
        let points = interference_points(&graph, GridBounds::new(1, 10));
        assert_eq!(points.into_iter().collect::<Vec<_>>(), vec![GridPos::new(0, 0)]);
    }

    #[test]
    fn unaligned_and_cross_frequency_pairs_are_ignored() {
        let graph = graph_of(&[('A', 0, 0), ('A', 3, 2), ('B', 5, 5)]);
        assert!(interference_points(&graph, GridBounds::new(20, 20)).is_empty());
    }

    #[test]
    fn collinear_triple_marks_every_projection() {
        let graph = graph_of(&[('0', 3, 3), ('0', 3, 4), ('0', 3, 6)]);
        let points: Vec<_> = interference_points(&graph, GridBounds::new(12, 12)).into_iter().collect();
        // Pairs (3,3)-(3,4): (3,2),(3,5); (3,4)-(3,6): (3,2),(3,8); (3,3)-(3,6): (3,0),(3,9).
        let expected: Vec<_> = [(3, 0), (3, 2), (3, 5), (3, 8), (3, 9)].iter().map(|&(x, y)| GridPos::new(x, y)).collect();
        assert_eq!(points, expected);
    }
}
