//! End-to-end delivery planning.
//!
//! Splits the pending orders into one zone per courier and builds a
//! depot-to-depot route for each zone.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::graph::RoadGraph;
use crate::path::{select_pathfinder, PathAlgorithm, SearchOptions};
use crate::registry::{LocationId, LocationRegistry};
use crate::route::{build_route, CourierRoute};
use crate::zones::{partition_orders, Order, PartitionOptions, Zone};

/// Default depot used when none is configured.
pub const DEFAULT_DEPOT: &str = "SaborExpress_Base";

/// Planner configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Location every courier starts from and returns to.
    pub depot: LocationId,
    /// Zone partitioning settings; `clusters` is the number of couriers.
    pub partition: PartitionOptions,
    /// Shortest-path algorithm used for every leg.
    pub algorithm: PathAlgorithm,
    /// Per-leg search limits.
    pub search: SearchOptions,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            depot: DEFAULT_DEPOT.to_string(),
            partition: PartitionOptions::default(),
            algorithm: PathAlgorithm::default(),
            search: SearchOptions::default(),
        }
    }
}

impl PlannerConfig {
    pub fn new(depot: impl Into<LocationId>, couriers: usize) -> Self {
        Self {
            depot: depot.into(),
            partition: PartitionOptions::with_clusters(couriers),
            ..Self::default()
        }
    }

    pub fn couriers(&self) -> usize {
        self.partition.clusters
    }
}

/// Zone and route assigned to one courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierPlan {
    /// 1-based courier number.
    pub courier: usize,
    pub zone: Zone,
    pub route: CourierRoute,
}

/// Result of [`plan_deliveries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryPlan {
    pub depot: LocationId,
    pub algorithm: PathAlgorithm,
    pub requested_couriers: usize,
    pub couriers: Vec<CourierPlan>,
}

impl DeliveryPlan {
    /// Combined distance travelled by every courier.
    pub fn total_cost(&self) -> f64 {
        self.couriers.iter().map(|c| c.route.total_cost).sum()
    }

    /// Number of legs that could not be routed.
    pub fn warning_count(&self) -> usize {
        self.couriers.iter().map(|c| c.route.warnings.len()).sum()
    }

    pub fn order_count(&self) -> usize {
        self.couriers.iter().map(|c| c.zone.orders.len()).sum()
    }
}

/// Partition `orders` into zones and route each zone from the depot.
///
/// Fails when the depot or any order destination is missing from the
/// registry. Unreachable stops do not fail the plan; they are reported as
/// warnings on the affected courier route.
pub fn plan_deliveries(
    registry: &LocationRegistry,
    graph: &RoadGraph,
    orders: &[Order],
    config: &PlannerConfig,
) -> Result<DeliveryPlan> {
    registry.require(&config.depot, "depot configuration")?;

    info!(
        orders = orders.len(),
        couriers = config.couriers(),
        "partitioning orders into delivery zones"
    );
    let zones = partition_orders(orders, registry, &config.partition)?;

    let pathfinder = select_pathfinder(config.algorithm, graph, registry, config.search);
    let couriers = zones
        .into_iter()
        .enumerate()
        .map(|(index, zone)| {
            let route = build_route(&zone.orders, &config.depot, pathfinder.as_ref());
            debug!(
                courier = index + 1,
                stops = route.stops.len(),
                cost = route.total_cost,
                warnings = route.warnings.len(),
                "built courier route"
            );
            CourierPlan {
                courier: index + 1,
                zone,
                route,
            }
        })
        .collect::<Vec<_>>();

    let plan = DeliveryPlan {
        depot: config.depot.clone(),
        algorithm: config.algorithm,
        requested_couriers: config.couriers(),
        couriers,
    };
    info!(
        routes = plan.couriers.len(),
        total_cost = plan.total_cost(),
        warnings = plan.warning_count(),
        "delivery plan ready"
    );
    Ok(plan)
}
