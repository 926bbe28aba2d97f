//! CLI binary for townroute: load a road file and query towns, roads, and routes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use townroute_core::config::TownrouteConfig;
use townroute_core::loader::LoadReport;
use townroute_nav::manager::RouteManager;

#[derive(Parser)]
#[command(name = "townroute", about = "Shortest routes over a road network")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Road file with `townA;townB;distance;roadName` lines
    /// (defaults to [data] file in .townroute/config.toml)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all towns, sorted
    Towns,

    /// List all road names, sorted
    Roads,

    /// Show the road from one town to another
    Road {
        /// Starting town
        from: String,
        /// Destination town
        to: String,
    },

    /// Find the shortest route between two towns
    Path {
        /// Starting town
        from: String,
        /// Destination town
        to: String,

        /// Print the route as JSON
        #[arg(long)]
        json: bool,
    },

    /// Shortest distance from a town to every reachable town
    Distances {
        /// Starting town
        from: String,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show road network statistics
    Info,

    /// Report malformed lines in the road file
    Check,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn resolve_data_file(cli_file: Option<PathBuf>, config: &TownrouteConfig) -> Result<PathBuf> {
    match cli_file.or_else(|| config.data.file.clone()) {
        Some(path) => Ok(path),
        None => anyhow::bail!(
            "No road file given. Pass --file or set [data] file in .townroute/config.toml."
        ),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = TownrouteConfig::load(&project_root)?;
    let data_file = resolve_data_file(cli.file, &config)?;

    tracing::debug!("using road file {}", data_file.display());

    let load = || load_manager(&data_file, &config);
    match cli.command {
        Commands::Towns => cmd_towns(&load()?.0),
        Commands::Roads => cmd_roads(&load()?.0),
        Commands::Road { from, to } => cmd_road(&load()?.0, &from, &to),
        Commands::Path { from, to, json } => cmd_path(&load()?.0, &from, &to, json),
        Commands::Distances { from, json } => cmd_distances(&load()?.0, &from, json),
        Commands::Info => {
            let (manager, report) = load()?;
            cmd_info(&manager, &data_file, &report)
        }
        Commands::Check => cmd_check(&data_file, &config),
    }
}

fn load_manager(data_file: &Path, config: &TownrouteConfig) -> Result<(RouteManager, LoadReport)> {
    let mut manager = RouteManager::new();
    let report = manager.populate_from_file(data_file, &config.loader)?;
    Ok((manager, report))
}

fn require_town(manager: &RouteManager, name: &str) -> Result<()> {
    if !manager.contains_town(name) {
        anyhow::bail!("Unknown town: {}", name);
    }
    Ok(())
}

fn cmd_towns(manager: &RouteManager) -> Result<()> {
    for town in manager.all_towns() {
        println!("{}", town);
    }
    Ok(())
}

fn cmd_roads(manager: &RouteManager) -> Result<()> {
    for road in manager.all_roads() {
        println!("{}", road);
    }
    Ok(())
}

fn cmd_road(manager: &RouteManager, from: &str, to: &str) -> Result<()> {
    require_town(manager, from)?;
    require_town(manager, to)?;

    match manager.get_road(from, to) {
        Some(road) => println!("{}", road),
        None => eprintln!("No road from {} to {}.", from, to),
    }
    Ok(())
}

fn cmd_path(manager: &RouteManager, from: &str, to: &str, json: bool) -> Result<()> {
    require_town(manager, from)?;
    require_town(manager, to)?;

    let route = manager.route(from, to);
    if json {
        println!("{}", serde_json::to_string_pretty(&route)?);
        return Ok(());
    }

    if route.is_empty() {
        eprintln!("No route from {} to {}.", from, to);
        return Ok(());
    }
    for line in route.lines() {
        println!("{}", line);
    }
    println!("Total: {} mi", route.total_distance);
    Ok(())
}

fn cmd_distances(manager: &RouteManager, from: &str, json: bool) -> Result<()> {
    require_town(manager, from)?;

    let table = manager.distances_from(from);
    if json {
        let rows: Vec<serde_json::Value> = table
            .iter()
            .map(|(town, miles)| serde_json::json!({ "town": town, "miles": miles }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for (town, miles) in &table {
        println!("{:>6} mi  {}", miles, town);
    }
    let unreachable = manager.all_towns().len() - table.len();
    if unreachable > 0 {
        eprintln!("{} town(s) unreachable from {}.", unreachable, from);
    }
    Ok(())
}

fn cmd_info(manager: &RouteManager, data_file: &Path, report: &LoadReport) -> Result<()> {
    let graph = manager.graph();
    println!("Road file: {}", data_file.display());
    println!("Towns: {}", graph.vertex_count());
    println!("Roads: {}", graph.edge_count());
    println!("Distinct roads: {}", graph.edge_set().len());
    println!("Road names: {}", manager.all_roads().len());
    println!("Skipped lines: {}", report.skipped.len());

    let dead_ends: Vec<String> = graph
        .vertex_set()
        .filter(|l| graph.neighbors(l).is_empty())
        .map(|l| l.name().to_string())
        .collect();
    if !dead_ends.is_empty() {
        println!("\nNo outgoing roads: {}", dead_ends.join(", "));
    }
    Ok(())
}

fn cmd_check(data_file: &Path, config: &TownrouteConfig) -> Result<()> {
    // Always collect every bad line, even when the configured loader is strict.
    let mut loader_config = config.loader.clone();
    loader_config.strict = false;
    let report = townroute_core::loader::load_file(data_file, &loader_config)?;

    for skipped in &report.skipped {
        println!("WARN: line {}: {}", skipped.line, skipped.reason);
    }

    if report.skipped.is_empty() {
        eprintln!("Road file is valid. No malformed lines found.");
        eprintln!("  {} record(s)", report.records.len());
    } else {
        eprintln!(
            "\nFound {} malformed line(s) out of {}.",
            report.skipped.len(),
            report.skipped.len() + report.records.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_path_command() {
        let cli = Cli::try_parse_from(["townroute", "--file", "roads.txt", "path", "A", "C", "--json"])
            .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("roads.txt")));
        assert!(matches!(
            cli.command,
            Commands::Path { ref from, ref to, json: true } if from == "A" && to == "C"
        ));
    }

    #[test]
    fn test_resolve_data_file_prefers_flag() {
        let mut config = TownrouteConfig::default();
        config.data.file = Some(PathBuf::from("/data/default.txt"));

        let path = resolve_data_file(Some(PathBuf::from("cli.txt")), &config).unwrap();
        assert_eq!(path, PathBuf::from("cli.txt"));
        let path = resolve_data_file(None, &config).unwrap();
        assert_eq!(path, PathBuf::from("/data/default.txt"));
    }

    #[test]
    fn test_resolve_data_file_missing() {
        assert!(resolve_data_file(None, &TownrouteConfig::default()).is_err());
    }
}
