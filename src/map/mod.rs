//! Map file handling and text rendering.
//!
//! - `loader`: Binary and text map formats, default map, graph construction
//! - `render`: Character grid and adjacency listing

pub mod loader;
pub mod render;

pub use loader::{AntennaMap, MapFormat, MapLoadError, load_map};
pub use render::{render_adjacency, render_grid};
