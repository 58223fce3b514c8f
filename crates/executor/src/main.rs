pub mod config;
pub mod csv_loader;
pub mod error;
pub mod searcher;
pub mod types;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bf_core::{DirectedGraph, SpfaSolver};
use common::types::RateEdge;
use csv_loader::CsvLoader;
use error::Error;
use searcher::{CycleSearcher, explore_paths};
use types::{DataSource, RateTable, demo_edges};

#[derive(Parser)]
#[command(
    name = "executor",
    about = "Negative-cycle search and simple-path enumeration over a rate graph"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    source: Option<SourceCommand>,
}

#[derive(Subcommand)]
enum SourceCommand {
    /// Run on the built-in three-node graph
    Demo,
    /// Read `from,to,rate` rows from a CSV file
    Csv { path: PathBuf },
}

impl From<SourceCommand> for DataSource {
    fn from(command: SourceCommand) -> Self {
        match command {
            SourceCommand::Demo => DataSource::Demo,
            SourceCommand::Csv { path } => DataSource::Csv(path),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    let source = cli.source.map(DataSource::from).unwrap_or(DataSource::Demo);
    let rate_edges = load_edges(&source)?;

    let rates = RateTable::from_edges(&rate_edges);
    let graph = Arc::new(DirectedGraph::from_edges(
        rate_edges.into_iter().map(|(from, to, _)| (from, to)),
    ));
    log_graph(&graph);

    let searcher = CycleSearcher::new(
        graph.clone(),
        rates,
        config.search.clone(),
        SpfaSolver::new(config.search.heuristic),
    );
    if let Err(e) = searcher.search() {
        error!(error = %e, "Cycle search failed.");
    }

    let paths = explore_paths(graph, &config.paths).await?;
    info!(
        count = paths.len(),
        from = %config.paths.from,
        to = %config.paths.to,
        cutoff = config.paths.cutoff,
        "Path exploration finished."
    );

    Ok(())
}

/// Logs the graph's adjacency layout.
fn log_graph(graph: &DirectedGraph<String>) {
    info!(
        vertices = graph.node_count(),
        edges = graph.edge_count(),
        "Graph built."
    );
    info!("{:#?}", graph);
}

fn load_edges(source: &DataSource) -> Result<Vec<RateEdge<String>>, Error> {
    match source {
        DataSource::Demo => {
            info!("Using the built-in demo graph.");
            Ok(demo_edges())
        }
        DataSource::Csv(path) => CsvLoader::new(path).load(),
    }
}
