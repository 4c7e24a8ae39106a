use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{LevelFilter, debug, info};
use std::path::PathBuf;

use antenna_grid::config::Settings;
use antenna_grid::geometry::{GridPos, find_intersections, interference_points};
use antenna_grid::graph::{Frequency, Graph};
use antenna_grid::map::{AntennaMap, load_map};
use antenna_grid::report::{QueryReport, TraversalOrder};

/// Antenna map analysis: traversal, paths, intersections and interference.
#[derive(Parser)]
#[command(name = "antenna-grid")]
#[command(version)]
#[command(about = "Analyze antenna maps as same-frequency graphs")]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Settings file (defaults to ./antenna-grid.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map file, overriding the settings file
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the adjacency listing and the rendered map
    Show,
    /// Depth-first search from the antenna at (X, Y)
    Dfs { x: i32, y: i32 },
    /// Breadth-first search from the antenna at (X, Y)
    Bfs { x: i32, y: i32 },
    /// Every simple path between two antennas
    Paths { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Crossing points between the lines of two frequencies
    Intersections { frequency_a: char, frequency_b: char },
    /// Cells affected by interference
    Interference,
    /// Run every query configured in the settings file
    Demo,
}

fn init_logging(verbose: u8) {
    let crate_level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter(Some("antenna_grid"), crate_level)
        .parse_default_env()
        .init();
}

fn traversal(graph: &Graph, order: TraversalOrder, start: GridPos) -> Result<QueryReport> {
    let visits = match graph.find_vertex(start.x, start.y) {
        Some(id) => Some(match order {
            TraversalOrder::DepthFirst => graph.depth_first(id),
            TraversalOrder::BreadthFirst => graph.breadth_first(id),
        }?),
        None => None,
    };
    Ok(QueryReport::traversal(order, start, visits))
}

fn paths(graph: &Graph, origin: GridPos, destination: GridPos) -> QueryReport {
    let search = graph.all_paths(graph.find_vertex(origin.x, origin.y), graph.find_vertex(destination.x, destination.y));
    QueryReport::paths(graph, origin, destination, &search)
}

fn intersections(graph: &Graph, a: char, b: char) -> QueryReport {
    QueryReport::intersections(graph, &find_intersections(graph, Frequency(a), Frequency(b)))
}

fn run(command: Commands, map: &AntennaMap, settings: &Settings) -> Result<Vec<QueryReport>> {
    let graph = &map.graph;
    let reports = match command {
        Commands::Show => vec![QueryReport::map(graph, map.bounds)],
        Commands::Dfs { x, y } => vec![traversal(graph, TraversalOrder::DepthFirst, GridPos::new(x, y))?],
        Commands::Bfs { x, y } => vec![traversal(graph, TraversalOrder::BreadthFirst, GridPos::new(x, y))?],
        Commands::Paths { x1, y1, x2, y2 } => vec![paths(graph, GridPos::new(x1, y1), GridPos::new(x2, y2))],
        Commands::Intersections { frequency_a, frequency_b } => vec![intersections(graph, frequency_a, frequency_b)],
        Commands::Interference => vec![QueryReport::interference(&interference_points(graph, map.bounds))],
        Commands::Demo => {
            let demo = &settings.demo;
            let [a, b] = demo.intersection_frequencies;
            vec![
                QueryReport::map(graph, map.bounds),
                traversal(graph, TraversalOrder::DepthFirst, GridPos::new(demo.dfs_start[0], demo.dfs_start[1]))?,
                traversal(graph, TraversalOrder::BreadthFirst, GridPos::new(demo.bfs_start[0], demo.bfs_start[1]))?,
                paths(
                    graph,
                    GridPos::new(demo.path_origin[0], demo.path_origin[1]),
                    GridPos::new(demo.path_destination[0], demo.path_destination[1]),
                ),
                intersections(graph, a, b),
            ]
        }
    };
    Ok(reports)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings::resolve(cli.config.as_deref()).map_err(anyhow::Error::msg)?;
    if let Some(map) = cli.map {
        settings.map = map;
    }
    debug!("Using settings {:?}", settings);

    let map = load_map(&settings.map, settings.format, settings.create_default_map).with_context(|| format!("Could not load map {}", settings.map.display()))?;
    info!("Map ready: {} antennas", map.graph.len());

    let reports = run(cli.command, &map, &settings)?;
    if cli.json {
        let json = if reports.len() == 1 {
            serde_json::to_string_pretty(&reports[0])
        } else {
            serde_json::to_string_pretty(&reports)
        }
        .context("Failed to serialize results")?;
        println!("{}", json);
    } else {
        let sections: Vec<String> = reports.iter().map(QueryReport::to_text).collect();
        print!("{}", sections.join("\n"));
    }
    Ok(())
}
