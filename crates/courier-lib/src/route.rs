//! Multi-stop route construction.
//!
//! A courier leaves the depot, visits its orders in the order they were
//! supplied and returns to the depot. Each leg is an independent shortest-path
//! query; the legs are concatenated into a single stop sequence. Legs that
//! cannot be routed are skipped and reported, leaving the courier at the last
//! stop it actually reached. A leg abandoned at the search expansion cap is
//! reported separately from a leg with no path.

use serde::Serialize;
use tracing::{debug, warn};

use crate::path::{Pathfinder, SearchOutcome};
use crate::registry::LocationId;
use crate::zones::Order;

/// One successfully routed leg of a courier route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    pub from: LocationId,
    pub to: LocationId,
    pub cost: f64,
    pub hops: usize,
}

/// Why a leg was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningReason {
    /// No path exists between the two locations.
    Unreachable,
    /// The search gave up at its expansion cap.
    SearchLimit,
}

/// A leg that could not be routed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentWarning {
    pub from: LocationId,
    pub to: LocationId,
    pub reason: WarningReason,
}

impl std::fmt::Display for SegmentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            WarningReason::Unreachable => {
                write!(f, "no route found from {} to {}", self.from, self.to)
            }
            WarningReason::SearchLimit => write!(
                f,
                "search limit reached before a route from {} to {} was found",
                self.from, self.to
            ),
        }
    }
}

/// Depot-to-depot route for a single courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierRoute {
    pub depot: LocationId,
    pub stops: Vec<LocationId>,
    pub total_cost: f64,
    pub segments: Vec<RouteSegment>,
    pub warnings: Vec<SegmentWarning>,
}

impl CourierRoute {
    fn start_at(depot: &str) -> Self {
        Self {
            depot: depot.to_string(),
            stops: vec![depot.to_string()],
            total_cost: 0.0,
            segments: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Whether every leg was routed.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of edges travelled across all legs.
    pub fn hop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    fn current(&self) -> &str {
        self.stops
            .last()
            .map(String::as_str)
            .unwrap_or(self.depot.as_str())
    }

    /// Route the next leg, moving the courier to `goal` when a path exists.
    fn extend_to(&mut self, goal: &str, pathfinder: &dyn Pathfinder) {
        let from = self.current().to_string();
        let reason = match pathfinder.search(&from, goal) {
            SearchOutcome::Found(path) => {
                debug!(from = %from, to = goal, cost = path.cost, "routed leg");
                self.total_cost += path.cost;
                self.segments.push(RouteSegment {
                    from,
                    to: goal.to_string(),
                    cost: path.cost,
                    hops: path.hop_count(),
                });
                self.stops.extend(path.nodes.into_iter().skip(1));
                return;
            }
            SearchOutcome::Unreachable => WarningReason::Unreachable,
            SearchOutcome::LimitReached => WarningReason::SearchLimit,
        };
        warn!(from = %from, to = goal, ?reason, "leg could not be routed; skipping stop");
        self.warnings.push(SegmentWarning {
            from,
            to: goal.to_string(),
            reason,
        });
    }
}

/// Chain shortest paths from `depot` through `orders` (in the supplied order)
/// and back to `depot`.
///
/// Unreachable legs are recorded in [`CourierRoute::warnings`] and skipped; the
/// next leg starts from the last stop that was reached.
pub fn build_route(orders: &[Order], depot: &str, pathfinder: &dyn Pathfinder) -> CourierRoute {
    let mut route = CourierRoute::start_at(depot);
    for order in orders {
        route.extend_to(&order.destination, pathfinder);
    }
    route.extend_to(depot, pathfinder);
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{Path, PathAlgorithm};

    /// Pathfinder that walks straight to the goal unless the goal is blocked.
    struct Teleport {
        blocked: &'static str,
        capped: &'static str,
    }

    impl Pathfinder for Teleport {
        fn algorithm(&self) -> PathAlgorithm {
            PathAlgorithm::Dijkstra
        }

        fn search(&self, start: &str, goal: &str) -> SearchOutcome {
            if goal == self.blocked {
                return SearchOutcome::Unreachable;
            }
            if goal == self.capped {
                return SearchOutcome::LimitReached;
            }
            if start == goal {
                return SearchOutcome::Found(Path {
                    nodes: vec![start.to_string()],
                    cost: 0.0,
                });
            }
            SearchOutcome::Found(Path {
                nodes: vec![start.to_string(), goal.to_string()],
                cost: 1.0,
            })
        }
    }

    #[test]
    fn empty_zone_stays_at_depot() {
        let pathfinder = Teleport {
            blocked: "",
            capped: "",
        };
        let route = build_route(&[], "Depot", &pathfinder);
        assert_eq!(route.stops, vec!["Depot"]);
        assert_eq!(route.total_cost, 0.0);
        assert_eq!(route.segments.len(), 1);
        assert!(route.is_complete());
    }

    #[test]
    fn blocked_stop_is_skipped_and_reported() {
        let pathfinder = Teleport {
            blocked: "B",
            capped: "",
        };
        let orders = [Order::new("A"), Order::new("B"), Order::new("C")];
        let route = build_route(&orders, "Depot", &pathfinder);

        assert_eq!(route.stops, vec!["Depot", "A", "C", "Depot"]);
        assert_eq!(route.total_cost, 3.0);
        assert_eq!(
            route.warnings,
            vec![SegmentWarning {
                from: "A".to_string(),
                to: "B".to_string(),
                reason: WarningReason::Unreachable,
            }]
        );
        assert_eq!(route.warnings[0].to_string(), "no route found from A to B");
    }

    #[test]
    fn capped_leg_is_not_reported_as_unreachable() {
        let pathfinder = Teleport {
            blocked: "",
            capped: "B",
        };
        let orders = [Order::new("A"), Order::new("B")];
        let route = build_route(&orders, "Depot", &pathfinder);

        assert_eq!(route.stops, vec!["Depot", "A", "Depot"]);
        assert_eq!(route.warnings.len(), 1);
        assert_eq!(route.warnings[0].reason, WarningReason::SearchLimit);
        assert_eq!(
            route.warnings[0].to_string(),
            "search limit reached before a route from A to B was found"
        );
    }

    #[test]
    fn order_at_depot_collapses_junction() {
        let pathfinder = Teleport {
            blocked: "",
            capped: "",
        };
        let orders = [Order::new("Depot"), Order::new("A")];
        let route = build_route(&orders, "Depot", &pathfinder);
        assert_eq!(route.stops, vec!["Depot", "A", "Depot"]);
        assert_eq!(route.hop_count(), 2);
    }
}
