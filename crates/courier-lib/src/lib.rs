//! Courier route planning library entry points.
//!
//! This crate exposes helpers to load delivery datasets, build the road graph,
//! run shortest-path searches, split orders into courier zones and chain the
//! per-stop paths into one route per courier. Higher-level consumers (the CLI)
//! should only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod planner;
pub mod registry;
pub mod route;
pub mod zones;

pub use dataset::{load_edges, load_locations, load_orders, Dataset, DatasetPaths};
pub use error::{Error, Result};
pub use graph::{build_graph, EdgeRecord, RoadGraph};
pub use output::{CourierSummary, PathSummary, PlanSummary, ZoneSummary, ZonesSummary};
pub use path::{
    find_path_a_star, find_path_dijkstra, search_a_star, search_dijkstra, select_pathfinder,
    AStarPathfinder, DijkstraPathfinder, Path, PathAlgorithm, Pathfinder, SearchOptions,
    SearchOutcome,
};
pub use planner::{plan_deliveries, CourierPlan, DeliveryPlan, PlannerConfig, DEFAULT_DEPOT};
pub use registry::{Location, LocationId, LocationRegistry, Position};
pub use route::{build_route, CourierRoute, RouteSegment, SegmentWarning, WarningReason};
pub use zones::{partition_orders, Order, PartitionOptions, Zone};
