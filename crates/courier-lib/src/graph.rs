use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::registry::{LocationId, LocationRegistry};

/// Raw road segment as read from the edge table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdgeRecord {
    #[serde(alias = "Origem")]
    pub origin: LocationId,
    #[serde(alias = "Destino")]
    pub destination: LocationId,
    #[serde(alias = "Peso")]
    pub weight: f64,
}

impl EdgeRecord {
    pub fn new(
        origin: impl Into<LocationId>,
        destination: impl Into<LocationId>,
        weight: f64,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            weight,
        }
    }
}

/// Undirected weighted road network.
///
/// Neighbour maps are ordered by identifier so every search expands
/// successors in the same order from run to run.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    adjacency: HashMap<LocationId, BTreeMap<LocationId, f64>>,
}

static NO_NEIGHBOURS: BTreeMap<LocationId, f64> = BTreeMap::new();

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node without any edges.
    pub fn add_node(&mut self, node: impl Into<LocationId>) {
        self.adjacency.entry(node.into()).or_default();
    }

    /// Insert a two-way road between `u` and `v`.
    ///
    /// Parallel edges collapse to the cheaper weight.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidEdgeWeight {
                origin: u.to_string(),
                destination: v.to_string(),
                weight,
            });
        }

        if u == v {
            debug!(node = u, "ignoring self loop");
            self.add_node(u);
            return Ok(());
        }

        self.insert_directed(u, v, weight);
        self.insert_directed(v, u, weight);
        Ok(())
    }

    fn insert_directed(&mut self, from: &str, to: &str, weight: f64) {
        let neighbours = self.adjacency.entry(from.to_string()).or_default();
        neighbours
            .entry(to.to_string())
            .and_modify(|existing| {
                if weight < *existing {
                    *existing = weight;
                }
            })
            .or_insert(weight);
    }

    /// Return the neighbours of `node` with their edge weights.
    ///
    /// Unknown and isolated nodes yield an empty map.
    pub fn neighbours(&self, node: &str) -> &BTreeMap<LocationId, f64> {
        self.adjacency.get(node).unwrap_or(&NO_NEIGHBOURS)
    }

    pub fn edge_weight(&self, u: &str, v: &str) -> Option<f64> {
        self.adjacency.get(u).and_then(|n| n.get(v)).copied()
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> impl Iterator<Item = &LocationId> {
        self.adjacency.keys()
    }
}

/// Build the road graph from the edge table.
///
/// Every registry location becomes a node, so locations without roads are
/// present but isolated. Edges naming unknown locations are rejected.
pub fn build_graph(registry: &LocationRegistry, edges: &[EdgeRecord]) -> Result<RoadGraph> {
    let mut graph = RoadGraph::new();
    for location in registry.iter() {
        graph.add_node(location.id.clone());
    }

    for edge in edges {
        let context = format!("edge {} -> {}", edge.origin, edge.destination);
        registry.require(&edge.origin, context.clone())?;
        registry.require(&edge.destination, context)?;
        graph.add_edge(&edge.origin, &edge.destination, edge.weight)?;
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built road graph"
    );
    Ok(graph)
}
