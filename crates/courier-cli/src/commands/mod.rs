// Handlers for the CLI subcommands. main.rs parses arguments and dispatches
// to these modules.

pub mod plan;
pub mod route;
pub mod zones;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use courier_lib::{Dataset, DatasetPaths, PathAlgorithm};

/// Dataset location options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Directory holding locais.csv, mapa.csv and pedidos.csv.
    #[arg(long, global = true, default_value = ".")]
    pub data_dir: PathBuf,
    /// Override the locations table.
    #[arg(long, global = true)]
    pub locations: Option<PathBuf>,
    /// Override the roads table.
    #[arg(long, global = true)]
    pub edges: Option<PathBuf>,
    /// Override the orders table.
    #[arg(long, global = true)]
    pub orders: Option<PathBuf>,
}

impl DatasetArgs {
    pub fn paths(&self) -> DatasetPaths {
        let defaults = DatasetPaths::in_dir(&self.data_dir);
        DatasetPaths {
            locations: self.locations.clone().unwrap_or(defaults.locations),
            edges: self.edges.clone().unwrap_or(defaults.edges),
            orders: self.orders.clone().unwrap_or(defaults.orders),
        }
    }

    pub fn load(&self) -> Result<Dataset> {
        let paths = self.paths();
        Dataset::load(&paths)
            .with_context(|| format!("failed to load dataset from {}", self.data_dir.display()))
    }
}

/// Shortest-path algorithm choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    #[default]
    AStar,
    Dijkstra,
}

impl From<AlgorithmArg> for PathAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::AStar => PathAlgorithm::AStar,
            AlgorithmArg::Dijkstra => PathAlgorithm::Dijkstra,
        }
    }
}
