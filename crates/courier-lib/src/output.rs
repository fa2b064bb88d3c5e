use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::path::{Path, PathAlgorithm};
use crate::planner::DeliveryPlan;
use crate::registry::{LocationId, Position};
use crate::zones::Zone;

/// Serialisable view of one courier's zone and route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourierSummary {
    pub courier: usize,
    pub destinations: Vec<LocationId>,
    pub stops: Vec<LocationId>,
    pub total_distance: f64,
    pub hops: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Structured representation of a delivery plan that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanSummary {
    pub depot: LocationId,
    pub algorithm: PathAlgorithm,
    pub requested_couriers: usize,
    pub total_distance: f64,
    pub couriers: Vec<CourierSummary>,
}

impl PlanSummary {
    pub fn from_plan(plan: &DeliveryPlan) -> Self {
        let couriers = plan
            .couriers
            .iter()
            .map(|courier| CourierSummary {
                courier: courier.courier,
                destinations: courier.zone.destinations().map(str::to_string).collect(),
                stops: courier.route.stops.clone(),
                total_distance: courier.route.total_cost,
                hops: courier.route.hop_count(),
                warnings: courier
                    .route
                    .warnings
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect();

        Self {
            depot: plan.depot.clone(),
            algorithm: plan.algorithm,
            requested_couriers: plan.requested_couriers,
            total_distance: plan.total_cost(),
            couriers,
        }
    }

    /// Human-readable listing: zones first, then one route block per courier.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Delivery zones ({} planned, {} couriers requested, depot: {}):",
            self.couriers.len(),
            self.requested_couriers,
            self.depot
        );
        if self.couriers.is_empty() {
            let _ = writeln!(buffer, "  (no pending orders)");
        }
        for courier in &self.couriers {
            let _ = writeln!(
                buffer,
                "  Zone {}: {}",
                courier.courier,
                courier.destinations.join(", ")
            );
        }

        for courier in &self.couriers {
            let _ = writeln!(buffer);
            let _ = writeln!(
                buffer,
                "Courier {} route (algorithm: {}):",
                courier.courier, self.algorithm
            );
            let _ = writeln!(buffer, "  Total distance: {:.2}", courier.total_distance);
            let _ = writeln!(buffer, "  Stops: {}", courier.stops.join(" -> "));
            for warning in &courier.warnings {
                let _ = writeln!(buffer, "  [WARN] {warning}");
            }
        }

        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "Combined distance: {:.2}", self.total_distance);
        buffer
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serialisable view of one zone without a route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ZoneSummary {
    pub zone: usize,
    pub destinations: Vec<LocationId>,
    pub centroid: Position,
}

/// Serialisable view of a partition.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ZonesSummary {
    pub requested: usize,
    pub zones: Vec<ZoneSummary>,
}

impl ZonesSummary {
    pub fn from_zones(requested: usize, zones: &[Zone]) -> Self {
        Self {
            requested,
            zones: zones
                .iter()
                .map(|zone| ZoneSummary {
                    zone: zone.index + 1,
                    destinations: zone.destinations().map(str::to_string).collect(),
                    centroid: zone.centroid,
                })
                .collect(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Delivery zones ({} planned, {} requested):",
            self.zones.len(),
            self.requested
        );
        for zone in &self.zones {
            let _ = writeln!(
                buffer,
                "  Zone {} @ ({:.2}, {:.2}): {}",
                zone.zone,
                zone.centroid.x,
                zone.centroid.y,
                zone.destinations.join(", ")
            );
        }
        buffer
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of a single shortest-path query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub algorithm: PathAlgorithm,
    pub start: LocationId,
    pub goal: LocationId,
    pub cost: f64,
    pub hops: usize,
    pub nodes: Vec<LocationId>,
}

impl PathSummary {
    pub fn from_path(algorithm: PathAlgorithm, path: &Path) -> Self {
        Self {
            algorithm,
            start: path.nodes.first().cloned().unwrap_or_default(),
            goal: path.nodes.last().cloned().unwrap_or_default(),
            cost: path.cost,
            hops: path.hop_count(),
            nodes: path.nodes.clone(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Path: {} -> {} ({} hops, algorithm: {})",
            self.start, self.goal, self.hops, self.algorithm
        );
        let _ = writeln!(buffer, "Distance: {:.2}", self.cost);
        let _ = writeln!(buffer, "{}", self.nodes.join(" -> "));
        buffer
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
