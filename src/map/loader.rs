//! Antenna map loading, validation and graph construction.
//!
//! Two on-disk layouts are understood:
//! - Binary: two little-endian `i32` (rows, cols) followed by `rows * cols`
//!   cell bytes in row-major order
//! - Text: a `rows cols` header line followed by one line per row
//!
//! `.` marks an empty cell. Any other cell becomes an antenna at
//! `(column, row)` whose frequency is the cell character. Once every antenna
//! is inserted, each unordered pair of same-frequency antennas is connected.

use anyhow::Context;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::geometry::GridBounds;
use crate::graph::{Frequency, Graph, GraphError, VertexId};

/// Largest accepted row or column count.
pub const MAX_GRID_DIM: i32 = 1024;

/// Cell byte that holds no antenna.
pub const BLANK_CELL: u8 = b'.';

/// Map shipped with the tool, written out when no map file exists yet.
const DEFAULT_MAP: [&str; 12] = [
    "............",
    "............",
    "............",
    ".......0....",
    "....0.......",
    "......A.....",
    ".........0..",
    ".....0......",
    "........A...",
    "............",
    ".......A....",
    "............",
];

/// On-disk map layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapFormat {
    Binary,
    Text,
}

impl MapFormat {
    /// `.txt` files are text maps; everything else is read as binary.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => MapFormat::Text,
            _ => MapFormat::Binary,
        }
    }
}

/// Error type for map loading failures.
#[derive(Debug)]
pub enum MapLoadError {
    FileReadError(String),
    FileWriteError(String),
    ParseError(String),
    ValidationError(String),
    Graph(GraphError),
}

impl std::fmt::Display for MapLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapLoadError::FileReadError(msg) => write!(f, "Failed to read map file: {}", msg),
            MapLoadError::FileWriteError(msg) => write!(f, "Failed to write map file: {}", msg),
            MapLoadError::ParseError(msg) => write!(f, "Failed to parse map: {}", msg),
            MapLoadError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            MapLoadError::Graph(err) => write!(f, "Failed to build antenna graph: {}", err),
        }
    }
}

impl std::error::Error for MapLoadError {}

impl From<GraphError> for MapLoadError {
    fn from(err: GraphError) -> Self {
        MapLoadError::Graph(err)
    }
}

/// Raw cell grid as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapGrid {
    pub rows: i32,
    pub cols: i32,
    /// Row-major cell bytes, `rows * cols` long.
    pub cells: Vec<u8>,
}

impl MapGrid {
    /// The built-in 12x12 demonstration map.
    pub fn default_map() -> Self {
        Self {
            rows: DEFAULT_MAP.len() as i32,
            cols: DEFAULT_MAP[0].len() as i32,
            cells: DEFAULT_MAP.iter().flat_map(|row| row.bytes()).collect(),
        }
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.rows, self.cols)
    }

    /// Antennas as `(frequency, x, y)` triples in row-major order.
    pub fn antennas(&self) -> impl Iterator<Item = (Frequency, i32, i32)> + '_ {
        let cols = self.cols.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != BLANK_CELL)
            .map(move |(i, &cell)| (Frequency(cell as char), (i % cols) as i32, (i / cols) as i32))
    }

    /// Serialize into the binary layout.
    pub fn to_binary(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.cells.len());
        out.extend_from_slice(&self.rows.to_le_bytes());
        out.extend_from_slice(&self.cols.to_le_bytes());
        out.extend_from_slice(&self.cells);
        out
    }

    /// Serialize into the text layout.
    pub fn to_text(&self) -> String {
        let mut out = format!("{} {}\n", self.rows, self.cols);
        for row in self.cells.chunks(self.cols.max(1) as usize) {
            out.push_str(&String::from_utf8_lossy(row));
            out.push('\n');
        }
        out
    }
}

/// A loaded map: the antenna graph plus the grid it lives on.
#[derive(Debug)]
pub struct AntennaMap {
    pub graph: Graph,
    pub bounds: GridBounds,
}

fn validate_dimensions(rows: i32, cols: i32) -> Result<(), MapLoadError> {
    if rows <= 0 || cols <= 0 {
        return Err(MapLoadError::ValidationError(format!("Map dimensions {}x{} must be positive", rows, cols)));
    }
    if rows > MAX_GRID_DIM || cols > MAX_GRID_DIM {
        return Err(MapLoadError::ValidationError(format!(
            "Map dimensions {}x{} exceed maximum of {}x{}",
            rows, cols, MAX_GRID_DIM, MAX_GRID_DIM
        )));
    }
    Ok(())
}

fn validate_cells(cells: &[u8], cols: i32) -> Result<(), MapLoadError> {
    if let Some(i) = cells.iter().position(|c| !c.is_ascii_graphic()) {
        let cols = cols as usize;
        return Err(MapLoadError::ValidationError(format!(
            "Cell ({}, {}) holds byte 0x{:02x}, expected '.' or a printable antenna glyph",
            i % cols,
            i / cols,
            cells[i]
        )));
    }
    Ok(())
}

/// Parse the binary layout.
pub fn parse_binary(data: &[u8]) -> Result<MapGrid, MapLoadError> {
    if data.len() < 8 {
        return Err(MapLoadError::ParseError(format!("Header needs 8 bytes, file has {}", data.len())));
    }
    let rows = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let cols = i32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    validate_dimensions(rows, cols)?;

    let expected = rows as usize * cols as usize;
    let body = &data[8..];
    if body.len() < expected {
        return Err(MapLoadError::ParseError(format!(
            "Map data truncated: expected {} cells for {}x{}, found {}",
            expected,
            rows,
            cols,
            body.len()
        )));
    }
    if body.len() > expected {
        warn!("Ignoring {} trailing bytes after map data", body.len() - expected);
    }

    let cells = body[..expected].to_vec();
    validate_cells(&cells, cols)?;
    Ok(MapGrid { rows, cols, cells })
}

/// Parse the text layout.
pub fn parse_text(data: &str) -> Result<MapGrid, MapLoadError> {
    let mut lines = data.lines().map(|l| l.trim_end_matches('\r'));

    let header = lines.next().ok_or_else(|| MapLoadError::ParseError("Empty map file".to_string()))?;
    let mut dims = header.split_whitespace().map(|s| s.parse::<i32>());
    let (rows, cols) = match (dims.next(), dims.next(), dims.next()) {
        (Some(Ok(rows)), Some(Ok(cols)), None) => (rows, cols),
        _ => return Err(MapLoadError::ParseError(format!("Expected 'rows cols' header, found '{}'", header))),
    };
    validate_dimensions(rows, cols)?;

    let mut cells = Vec::with_capacity(rows as usize * cols as usize);
    for y in 0..rows {
        let line = lines
            .next()
            .ok_or_else(|| MapLoadError::ParseError(format!("Map has {} rows, expected {}", y, rows)))?;
        if line.len() != cols as usize {
            return Err(MapLoadError::ValidationError(format!("Row {} has {} cells, expected {}", y, line.len(), cols)));
        }
        cells.extend_from_slice(line.as_bytes());
    }
    if lines.any(|l| !l.trim().is_empty()) {
        warn!("Ignoring content after the last map row");
    }

    validate_cells(&cells, cols)?;
    Ok(MapGrid { rows, cols, cells })
}

/// Build the antenna graph for a grid.
///
/// Antennas are inserted in row-major order, then every unordered pair of
/// same-frequency antennas is connected once, in insertion order.
pub fn build_graph(grid: &MapGrid) -> Result<Graph, GraphError> {
    let antennas: Vec<_> = grid.antennas().collect();
    let mut graph = Graph::with_capacity(antennas.len())?;
    let ids = antennas
        .iter()
        .map(|&(frequency, x, y)| graph.add_vertex(frequency, x, y))
        .collect::<Result<Vec<VertexId>, _>>()?;

    for (i, &(frequency, _, _)) in antennas.iter().enumerate() {
        for (j, &(other, _, _)) in antennas.iter().enumerate().skip(i + 1) {
            if frequency == other {
                graph.add_edge(ids[i], ids[j])?;
            }
        }
    }
    debug!("Built graph with {} antennas and {} connections", graph.len(), graph.edge_count());
    Ok(graph)
}

/// Write `grid` to `path` in the given layout, creating parent directories.
pub fn write_map(path: &Path, grid: &MapGrid, format: MapFormat) -> Result<(), MapLoadError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| parent.display().to_string())
            .map_err(|e| MapLoadError::FileWriteError(format!("{:#}", e)))?;
    }
    let bytes = match format {
        MapFormat::Binary => grid.to_binary(),
        MapFormat::Text => grid.to_text().into_bytes(),
    };
    fs::write(path, bytes)
        .with_context(|| path.display().to_string())
        .map_err(|e| MapLoadError::FileWriteError(format!("{:#}", e)))
}

/// Read and parse a map file into a raw grid.
pub fn read_grid(path: &Path, format: MapFormat) -> Result<MapGrid, MapLoadError> {
    let data = fs::read(path)
        .with_context(|| path.display().to_string())
        .map_err(|e| MapLoadError::FileReadError(format!("{:#}", e)))?;

    match format {
        MapFormat::Binary => parse_binary(&data),
        MapFormat::Text => {
            let text = String::from_utf8(data).map_err(|e| MapLoadError::ParseError(format!("Text map is not valid UTF-8: {}", e)))?;
            parse_text(&text)
        }
    }
}

/// Load a map file and build its antenna graph.
///
/// # Parameters
///
/// * `path` - Map file location
/// * `format` - Layout override; derived from the extension when `None`
/// * `create_default` - Write the built-in map first if `path` does not exist
pub fn load_map(path: &Path, format: Option<MapFormat>, create_default: bool) -> Result<AntennaMap, MapLoadError> {
    let format = format.unwrap_or_else(|| MapFormat::from_path(path));

    if !path.exists() && create_default {
        warn!("Map file {} not found, writing the default map", path.display());
        write_map(path, &MapGrid::default_map(), format)?;
    }

    let grid = read_grid(path, format)?;
    let graph = build_graph(&grid)?;
    info!(
        "Loaded {}x{} map from {} with {} antennas on {} frequencies",
        grid.rows,
        grid.cols,
        path.display(),
        graph.len(),
        graph.frequencies().len()
    );

    Ok(AntennaMap {
        graph,
        bounds: grid.bounds(),
    })
}
