//! Common test utilities and fixture helpers.
//!
//! Provides the small synthetic maps used across integration tests and the
//! path to the on-disk Sabor Express fixture.

use std::path::PathBuf;

use courier_lib::{
    build_graph, Dataset, DatasetPaths, EdgeRecord, Location, LocationRegistry, RoadGraph,
};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the Sabor Express fixture dataset.
#[allow(dead_code)]
pub fn sabor_express() -> Dataset {
    let paths = DatasetPaths::in_dir(&fixtures_dir().join("sabor_express"));
    Dataset::load(&paths).expect("load sabor_express fixture")
}

/// Unit square A(0,0) B(0,1) C(1,1) D(1,0).
#[allow(dead_code)]
pub fn square_registry() -> LocationRegistry {
    LocationRegistry::from_locations([
        Location::new("A", 0.0, 0.0),
        Location::new("B", 0.0, 1.0),
        Location::new("C", 1.0, 1.0),
        Location::new("D", 1.0, 0.0),
    ])
    .expect("square registry")
}

/// Every pair of square corners connected by its Euclidean distance,
/// optionally leaving out some pairs.
#[allow(dead_code)]
pub fn square_graph(registry: &LocationRegistry, without: &[(&str, &str)]) -> RoadGraph {
    let ids = ["A", "B", "C", "D"];
    let mut edges = Vec::new();
    for (i, u) in ids.iter().enumerate() {
        for v in &ids[i + 1..] {
            let skipped = without
                .iter()
                .any(|(a, b)| (a == u && b == v) || (a == v && b == u));
            if skipped {
                continue;
            }
            let weight = registry.distance_between(u, v).expect("registered corners");
            edges.push(EdgeRecord::new(*u, *v, weight));
        }
    }
    build_graph(registry, &edges).expect("square graph")
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
