mod common;

use std::collections::{BTreeSet, HashMap};

use courier_lib::{
    partition_orders, Error, Location, LocationRegistry, Order, PartitionOptions, Zone,
};

use common::{assert_close, sabor_express};

fn destination_sets(zones: &[Zone]) -> BTreeSet<BTreeSet<String>> {
    zones
        .iter()
        .map(|zone| zone.destinations().map(str::to_string).collect())
        .collect()
}

fn grid_registry() -> LocationRegistry {
    let mut locations = Vec::new();
    for (cx, cy, prefix) in [(0.0, 0.0, "SW"), (50.0, 0.0, "SE"), (25.0, 40.0, "N")] {
        for i in 0..5 {
            let dx = (i % 3) as f64;
            let dy = (i / 3) as f64;
            locations.push(Location::new(format!("{prefix}{i}"), cx + dx, cy + dy));
        }
    }
    LocationRegistry::from_locations(locations).unwrap()
}

#[test]
fn zones_cover_every_order_exactly_once() {
    let registry = grid_registry();
    let orders: Vec<Order> = registry
        .iter()
        .map(|location| Order::new(location.id.clone()))
        .collect();

    let zones = partition_orders(&orders, &registry, &PartitionOptions::with_clusters(3)).unwrap();

    assert_eq!(zones.len(), 3);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for zone in &zones {
        assert!(!zone.orders.is_empty());
        for destination in zone.destinations() {
            *counts.entry(destination).or_default() += 1;
        }
    }
    assert_eq!(counts.len(), orders.len());
    assert!(counts.values().all(|&count| count == 1));
}

#[test]
fn well_separated_groups_are_recovered() {
    let registry = grid_registry();
    let mut orders: Vec<Order> = registry
        .iter()
        .map(|location| Order::new(location.id.clone()))
        .collect();
    orders.sort_by(|a, b| a.destination.cmp(&b.destination));

    let zones = partition_orders(&orders, &registry, &PartitionOptions::with_clusters(3)).unwrap();

    for zone in &zones {
        let prefixes: BTreeSet<String> = zone
            .destinations()
            .map(|d| d.trim_end_matches(char::is_numeric).to_string())
            .collect();
        assert_eq!(prefixes.len(), 1, "zone mixes groups: {prefixes:?}");
    }
}

#[test]
fn partition_is_deterministic_for_a_seed() {
    let dataset = sabor_express();
    let options = PartitionOptions {
        clusters: 3,
        seed: 7,
        ..PartitionOptions::default()
    };

    let first = partition_orders(&dataset.orders, &dataset.registry, &options).unwrap();
    let second = partition_orders(&dataset.orders, &dataset.registry, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn orders_keep_supplied_order_within_zone() {
    let dataset = sabor_express();
    let zones = partition_orders(
        &dataset.orders,
        &dataset.registry,
        &PartitionOptions::with_clusters(3),
    )
    .unwrap();

    let north = zones
        .iter()
        .find(|zone| zone.destinations().any(|d| d == "Norte_1"))
        .expect("north zone");
    let destinations: Vec<&str> = north.destinations().collect();
    assert_eq!(destinations, vec!["Norte_2", "Norte_3", "Norte_1"]);

    let expected: BTreeSet<BTreeSet<String>> = [
        vec!["Norte_1", "Norte_2", "Norte_3"],
        vec!["Leste_1", "Leste_2", "Leste_3"],
        vec!["Sul_1", "Sul_2"],
    ]
    .into_iter()
    .map(|group| group.into_iter().map(str::to_string).collect())
    .collect();
    assert_eq!(destination_sets(&zones), expected);
}

#[test]
fn zone_indices_are_consecutive() {
    let dataset = sabor_express();
    let zones = partition_orders(
        &dataset.orders,
        &dataset.registry,
        &PartitionOptions::with_clusters(3),
    )
    .unwrap();
    let indices: Vec<usize> = zones.iter().map(|zone| zone.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn unknown_destination_fails_before_clustering() {
    let dataset = sabor_express();
    let mut orders = dataset.orders.clone();
    orders.push(Order::new("Atlantis"));

    let result = partition_orders(&orders, &dataset.registry, &PartitionOptions::default());
    match result {
        Err(Error::UnknownLocation { id, context }) => {
            assert_eq!(id, "Atlantis");
            assert_eq!(context, format!("order #{}", orders.len()));
        }
        other => panic!("expected data-integrity error, got {other:?}"),
    }
}

#[test]
fn fewer_distinct_destinations_than_couriers_yields_fewer_zones() {
    let dataset = sabor_express();
    let orders = vec![
        Order::new("Norte_1"),
        Order::new("Norte_1"),
        Order::new("Leste_1"),
    ];

    let zones = partition_orders(
        &orders,
        &dataset.registry,
        &PartitionOptions::with_clusters(5),
    )
    .unwrap();

    assert_eq!(zones.len(), 2);
    let total: usize = zones.iter().map(|zone| zone.orders.len()).sum();
    assert_eq!(total, 3);
    let duplicated = zones
        .iter()
        .find(|zone| zone.destinations().any(|d| d == "Norte_1"))
        .unwrap();
    assert_eq!(duplicated.orders.len(), 2);
}

#[test]
fn no_orders_yields_no_zones() {
    let dataset = sabor_express();
    let zones = partition_orders(&[], &dataset.registry, &PartitionOptions::default()).unwrap();
    assert!(zones.is_empty());
}

#[test]
fn single_cluster_centroid_is_mean_position() {
    let dataset = sabor_express();
    let orders = vec![Order::new("Sul_1"), Order::new("Sul_2")];
    let zones = partition_orders(
        &orders,
        &dataset.registry,
        &PartitionOptions::with_clusters(1),
    )
    .unwrap();

    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].centroid.x, -4.5);
    assert_eq!(zones[0].centroid.y, -4.5);
}

#[test]
fn centroids_are_member_means_when_iterations_run_out() {
    let registry = grid_registry();
    let orders: Vec<Order> = registry
        .iter()
        .map(|location| Order::new(location.id.clone()))
        .collect();

    for seed in 0..50 {
        let options = PartitionOptions {
            clusters: 3,
            seed,
            restarts: 1,
            max_iterations: 1,
            ..PartitionOptions::default()
        };
        let zones = partition_orders(&orders, &registry, &options).unwrap();
        for zone in &zones {
            let count = zone.orders.len() as f64;
            let (sx, sy) = zone
                .destinations()
                .map(|id| registry.position(id).unwrap())
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            assert_close(zone.centroid.x, sx / count);
            assert_close(zone.centroid.y, sy / count);
        }
    }
}
