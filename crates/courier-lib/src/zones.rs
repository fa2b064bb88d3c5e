//! Partitioning of delivery orders into courier zones.
//!
//! Orders are grouped by the coordinates of their destination using k-means:
//! k-means++ seeding, Lloyd relocation until the centroids settle, repeated
//! from several seedings keeping the lowest-inertia result. All randomness
//! comes from a [`StdRng`] seeded by [`PartitionOptions::seed`], so identical
//! input always yields identical zones.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::registry::{LocationId, LocationRegistry, Position};

/// A pending delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    #[serde(alias = "Local_Entrega")]
    pub destination: LocationId,
}

impl Order {
    pub fn new(destination: impl Into<LocationId>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

/// Orders assigned to a single courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    /// Position of the zone in the partition output, starting at zero.
    pub index: usize,
    /// Orders in the order they were supplied.
    pub orders: Vec<Order>,
    /// Mean position of the zone's destinations.
    pub centroid: Position,
}

impl Zone {
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.orders.iter().map(|order| order.destination.as_str())
    }
}

/// Tuning knobs for [`partition_orders`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionOptions {
    /// Number of zones (couriers) requested.
    pub clusters: usize,
    /// Seed for k-means++ initialisation.
    pub seed: u64,
    /// Independent k-means runs; the lowest-inertia run wins.
    pub restarts: usize,
    /// Relocation rounds per run.
    pub max_iterations: usize,
    /// Convergence threshold relative to the mean coordinate variance.
    pub tolerance: f64,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            clusters: 3,
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

impl PartitionOptions {
    pub fn with_clusters(clusters: usize) -> Self {
        Self {
            clusters,
            ..Self::default()
        }
    }
}

/// Split `orders` into at most `options.clusters` geographic zones.
///
/// Every destination must be present in `registry`; the first unknown one is
/// reported as [`Error::UnknownLocation`] and no zones are produced. When fewer
/// distinct destination positions than requested clusters exist, the cluster
/// count is reduced to the number of distinct positions. Empty zones are never
/// returned.
pub fn partition_orders(
    orders: &[Order],
    registry: &LocationRegistry,
    options: &PartitionOptions,
) -> Result<Vec<Zone>> {
    if options.clusters == 0 {
        return Err(Error::InvalidClusterCount {
            requested: options.clusters,
        });
    }

    let points = orders
        .iter()
        .enumerate()
        .map(|(index, order)| {
            registry
                .require(&order.destination, format!("order #{}", index + 1))
                .map(|location| location.position)
        })
        .collect::<Result<Vec<_>>>()?;

    if points.is_empty() {
        return Ok(Vec::new());
    }

    let distinct = count_distinct(&points);
    let k = if distinct < options.clusters {
        warn!(
            requested = options.clusters,
            distinct, "fewer distinct destinations than couriers; reducing zone count"
        );
        distinct
    } else {
        options.clusters
    };

    let threshold = options.tolerance * mean_variance(&points);
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut best: Option<Clustering> = None;

    for restart in 0..options.restarts.max(1) {
        let seeds = kmeans_plus_plus(&points, k, &mut rng);
        let clustering = lloyd(&points, seeds, options.max_iterations, threshold);
        debug!(
            restart,
            inertia = clustering.inertia,
            iterations = clustering.iterations,
            "k-means run finished"
        );
        if best
            .as_ref()
            .map_or(true, |current| clustering.inertia < current.inertia)
        {
            best = Some(clustering);
        }
    }

    let Some(best) = best else {
        return Ok(Vec::new());
    };

    let mut grouped: Vec<Vec<Order>> = vec![Vec::new(); k];
    for (order, &label) in orders.iter().zip(&best.labels) {
        grouped[label].push(order.clone());
    }

    let zones = grouped
        .into_iter()
        .zip(best.centroids)
        .filter(|(members, _)| !members.is_empty())
        .enumerate()
        .map(|(index, (orders, centroid))| Zone {
            index,
            orders,
            centroid,
        })
        .collect::<Vec<_>>();

    debug!(
        zones = zones.len(),
        inertia = best.inertia,
        "partitioned orders"
    );
    Ok(zones)
}

#[derive(Debug, Clone)]
struct Clustering {
    labels: Vec<usize>,
    centroids: Vec<Position>,
    inertia: f64,
    iterations: usize,
}

fn count_distinct(points: &[Position]) -> usize {
    points
        .iter()
        .map(|p| (p.x.to_bits(), p.y.to_bits()))
        .collect::<HashSet<_>>()
        .len()
}

fn mean_variance(points: &[Position]) -> f64 {
    let n = points.len() as f64;
    let mean = centroid_of(points.iter());
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| {
        (sx + (p.x - mean.x).powi(2), sy + (p.y - mean.y).powi(2))
    });
    (sx / n + sy / n) / 2.0
}

fn centroid_of<'a>(points: impl Iterator<Item = &'a Position>) -> Position {
    let (count, sx, sy) = points.fold((0usize, 0.0, 0.0), |(count, sx, sy), p| {
        (count + 1, sx + p.x, sy + p.y)
    });
    if count == 0 {
        return Position::new(0.0, 0.0);
    }
    Position::new(sx / count as f64, sy / count as f64)
}

fn nearest(point: &Position, centroids: &[Position]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = point.squared_distance_to(centroid);
        // strict comparison keeps the lowest index on ties
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best
}

/// Pick `k` initial centroids, each subsequent one sampled with probability
/// proportional to its squared distance from the closest centroid so far.
fn kmeans_plus_plus(points: &[Position], k: usize, rng: &mut StdRng) -> Vec<Position> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())]);

    let mut closest: Vec<f64> = points
        .iter()
        .map(|p| p.squared_distance_to(&centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = closest.iter().sum();
        if total <= 0.0 {
            break;
        }

        let target = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        let mut chosen = None;
        for (index, weight) in closest.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            chosen = Some(index);
            if cumulative >= target {
                break;
            }
        }

        let Some(chosen) = chosen else {
            break;
        };
        let centroid = points[chosen];
        centroids.push(centroid);
        for (slot, point) in closest.iter_mut().zip(points) {
            *slot = slot.min(point.squared_distance_to(&centroid));
        }
    }

    centroids
}

fn lloyd(
    points: &[Position],
    mut centroids: Vec<Position>,
    max_iterations: usize,
    threshold: f64,
) -> Clustering {
    let mut iterations = 0;
    while iterations < max_iterations {
        iterations += 1;
        let assignment: Vec<(usize, f64)> =
            points.iter().map(|p| nearest(p, &centroids)).collect();
        let updated = recompute_centroids(points, &assignment, &centroids);
        let shift: f64 = centroids
            .iter()
            .zip(&updated)
            .map(|(old, new)| old.squared_distance_to(new))
            .sum();
        centroids = updated;
        if shift <= threshold {
            break;
        }
    }

    let labels: Vec<usize> = points
        .iter()
        .map(|point| nearest(point, &centroids).0)
        .collect();

    // the iteration cap can stop short of a fixed point; report member means
    let centroids: Vec<Position> = centroids
        .iter()
        .enumerate()
        .map(|(label, previous)| {
            let members = points
                .iter()
                .zip(&labels)
                .filter(|(_, assigned)| **assigned == label)
                .map(|(point, _)| point);
            let mut members = members.peekable();
            if members.peek().is_none() {
                *previous
            } else {
                centroid_of(members)
            }
        })
        .collect();

    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(point, &label)| point.squared_distance_to(&centroids[label]))
        .sum();

    Clustering {
        labels,
        centroids,
        inertia,
        iterations,
    }
}

/// Move each centroid to the mean of its members. A centroid that lost all
/// of its members is moved onto the point lying farthest from its own centroid.
fn recompute_centroids(
    points: &[Position],
    assignment: &[(usize, f64)],
    previous: &[Position],
) -> Vec<Position> {
    let k = previous.len();
    let mut members: Vec<Vec<&Position>> = vec![Vec::new(); k];
    for (point, (label, _)) in points.iter().zip(assignment) {
        members[*label].push(point);
    }

    let mut by_distance: Vec<usize> = (0..points.len()).collect();
    by_distance.sort_by(|&a, &b| {
        assignment[b]
            .1
            .total_cmp(&assignment[a].1)
            .then_with(|| a.cmp(&b))
    });
    let mut relocations = by_distance.into_iter();

    members
        .iter()
        .enumerate()
        .map(|(label, cluster)| {
            if cluster.is_empty() {
                relocations
                    .next()
                    .map(|index| points[index])
                    .unwrap_or(previous[label])
            } else {
                centroid_of(cluster.iter().copied())
            }
        })
        .collect()
}
