mod common;

use std::fs;

use courier_lib::{Dataset, DatasetPaths, Error, Order};
use tempfile::TempDir;

use common::fixtures_dir;

fn write_dataset(locations: &str, edges: &str, orders: &str) -> (TempDir, DatasetPaths) {
    let dir = TempDir::new().expect("create temp dir");
    let paths = DatasetPaths::in_dir(dir.path());
    fs::write(&paths.locations, locations).unwrap();
    fs::write(&paths.edges, edges).unwrap();
    fs::write(&paths.orders, orders).unwrap();
    (dir, paths)
}

#[test]
fn loads_fixture_tables() {
    let paths = DatasetPaths::in_dir(&fixtures_dir().join("sabor_express"));
    let dataset = Dataset::load(&paths).unwrap();

    assert_eq!(dataset.orders.len(), 8);
    assert_eq!(dataset.orders[0], Order::new("Norte_2"));
    assert!(dataset.registry.contains("SaborExpress_Base"));
}

#[test]
fn english_headers_are_supported() {
    let (_dir, paths) = write_dataset(
        "name,x,y\nDepot,0,0\nShop,3,4\n",
        "origin,destination,weight\nDepot,Shop,5\n",
        "destination\nShop\n",
    );
    let dataset = Dataset::load(&paths).unwrap();

    assert_eq!(dataset.graph.edge_weight("Shop", "Depot"), Some(5.0));
    assert_eq!(dataset.orders, vec![Order::new("Shop")]);
}

#[test]
fn edge_referencing_unknown_location_fails() {
    let (_dir, paths) = write_dataset(
        "name,x,y\nDepot,0,0\n",
        "origin,destination,weight\nDepot,Ghost,1\n",
        "destination\n",
    );
    let err = Dataset::load(&paths).unwrap_err();
    assert!(matches!(err, Error::UnknownLocation { ref id, .. } if id == "Ghost"));
}

#[test]
fn malformed_weight_reports_file() {
    let (_dir, paths) = write_dataset(
        "name,x,y\nDepot,0,0\nShop,1,0\n",
        "origin,destination,weight\nDepot,Shop,far\n",
        "destination\nShop\n",
    );
    let err = Dataset::load(&paths).unwrap_err();
    match err {
        Error::Csv { path, .. } => assert_eq!(path, paths.edges),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn orders_with_unknown_destinations_still_load() {
    let (_dir, paths) = write_dataset(
        "name,x,y\nDepot,0,0\n",
        "origin,destination,weight\n",
        "destination\nGhost\n",
    );
    let dataset = Dataset::load(&paths).unwrap();
    assert_eq!(dataset.orders, vec![Order::new("Ghost")]);
}
