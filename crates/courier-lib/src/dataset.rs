//! CSV dataset loading.
//!
//! A dataset is three tables: locations (`name,x,y`), roads
//! (`origin,destination,weight`) and pending orders (`destination`). The
//! Portuguese headers used by the Sabor Express exports (`Nome`, `Origem`,
//! `Destino`, `Peso`, `Local_Entrega`) are accepted as aliases.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{build_graph, EdgeRecord, RoadGraph};
use crate::registry::{Location, LocationRegistry};
use crate::zones::Order;

/// Default table file names inside a dataset directory.
pub const LOCATIONS_FILE: &str = "locais.csv";
pub const EDGES_FILE: &str = "mapa.csv";
pub const ORDERS_FILE: &str = "pedidos.csv";

#[derive(Debug, Deserialize)]
struct LocationRecord {
    #[serde(alias = "Nome", alias = "id")]
    name: String,
    x: f64,
    y: f64,
}

/// Locations of the three dataset tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub locations: PathBuf,
    pub edges: PathBuf,
    pub orders: PathBuf,
}

impl DatasetPaths {
    /// Resolve the default table names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            locations: dir.join(LOCATIONS_FILE),
            edges: dir.join(EDGES_FILE),
            orders: dir.join(ORDERS_FILE),
        }
    }
}

/// Fully loaded and validated dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub registry: LocationRegistry,
    pub graph: RoadGraph,
    pub orders: Vec<Order>,
}

impl Dataset {
    /// Load all three tables and build the road graph.
    ///
    /// Order destinations are not checked here; the zone partitioner reports
    /// unknown destinations when the plan is built.
    pub fn load(paths: &DatasetPaths) -> Result<Self> {
        let registry = load_locations(open_table(&paths.locations)?)
            .map_err(|err| err.with_path(&paths.locations))?;
        let edges =
            load_edges(open_table(&paths.edges)?).map_err(|err| err.with_path(&paths.edges))?;
        let graph = build_graph(&registry, &edges)?;
        let orders =
            load_orders(open_table(&paths.orders)?).map_err(|err| err.with_path(&paths.orders))?;

        info!(
            locations = registry.len(),
            roads = graph.edge_count(),
            orders = orders.len(),
            "loaded dataset"
        );
        Ok(Self {
            registry,
            graph,
            orders,
        })
    }
}

fn open_table(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(Error::DatasetFileNotFound {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), "opening dataset table");
    Ok(File::open(path)?)
}

fn read_records<T, R>(reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Parse the location table into a registry.
pub fn load_locations<R: Read>(reader: R) -> Result<LocationRegistry> {
    let records: Vec<LocationRecord> = read_records(reader)?;
    LocationRegistry::from_locations(
        records
            .into_iter()
            .map(|record| Location::new(record.name, record.x, record.y)),
    )
}

/// Parse the road table. Endpoints are validated by [`build_graph`].
pub fn load_edges<R: Read>(reader: R) -> Result<Vec<EdgeRecord>> {
    read_records(reader)
}

/// Parse the order table. Columns other than the destination are ignored.
pub fn load_orders<R: Read>(reader: R) -> Result<Vec<Order>> {
    read_records(reader)
}
