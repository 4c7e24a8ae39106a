//! Text rendering of the antenna grid and the graph's adjacency.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::geometry::{GridBounds, GridPos};
use crate::graph::Graph;

/// Glyph for a cell without an antenna.
pub const EMPTY_GLYPH: char = '.';
/// Glyph for an interference cell.
pub const INTERFERENCE_GLYPH: char = '#';

/// Render the grid row by row: antenna glyphs, `#` for interference, `.` otherwise.
///
/// Antennas always win over interference markers. Anything outside `bounds`
/// is not drawn.
pub fn render_grid(graph: &Graph, bounds: GridBounds, interference: &BTreeSet<GridPos>) -> Vec<String> {
    let rows = bounds.rows.max(0) as usize;
    let cols = bounds.cols.max(0) as usize;
    let mut cells = vec![vec![EMPTY_GLYPH; cols]; rows];

    for &pos in interference {
        if bounds.contains(pos) {
            cells[pos.y as usize][pos.x as usize] = INTERFERENCE_GLYPH;
        }
    }
    for (_, v) in graph.vertices() {
        if bounds.contains(GridPos::from(v.position())) {
            cells[v.y() as usize][v.x() as usize] = v.frequency().0;
        }
    }

    cells.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// List every antenna with its connections, in insertion order.
pub fn render_adjacency(graph: &Graph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Graph ({} antennas):", graph.len());
    for (_, v) in graph.vertices() {
        let _ = write!(out, "Antenna {} ({},{}) -> ", v.frequency(), v.x(), v.y());
        if v.neighbors().is_empty() {
            out.push_str("no connections");
        } else {
            let neighbors: Vec<String> = v
                .neighbors()
                .iter()
                .filter_map(|&id| graph.vertex(id))
                .map(|n| n.to_string())
                .collect();
            out.push_str(&neighbors.join("  "));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Frequency;

    #[test]
    fn grid_shows_antennas_over_interference() {
        let mut graph = Graph::new();
        graph.add_vertex(Frequency('A'), 1, 0).unwrap();
        graph.add_vertex(Frequency('b'), 2, 1).unwrap();
        let interference = BTreeSet::from([GridPos::new(0, 0), GridPos::new(1, 0), GridPos::new(9, 9)]);

        let lines = render_grid(&graph, GridBounds::new(2, 3), &interference);
        assert_eq!(lines, vec!["#A.".to_string(), "..b".to_string()]);
    }

    #[test]
    fn adjacency_lists_neighbors_or_none() {
        let mut graph = Graph::new();
        let a = graph.add_vertex(Frequency('A'), 6, 5).unwrap();
        let b = graph.add_vertex(Frequency('A'), 8, 8).unwrap();
        let c = graph.add_vertex(Frequency('A'), 7, 10).unwrap();
        graph.add_vertex(Frequency('0'), 1, 1).unwrap();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, c).unwrap();

        let text = render_adjacency(&graph);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Graph (4 antennas):");
        assert_eq!(lines[1], "Antenna A (6,5) -> A(8,8)  A(7,10)");
        assert_eq!(lines[2], "Antenna A (8,8) -> A(6,5)");
        assert_eq!(lines[4], "Antenna 0 (1,1) -> no connections");
    }
}
