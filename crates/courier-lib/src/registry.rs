use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// Identifier for a location (depot, delivery address or road junction).
pub type LocationId = String;

/// Planar coordinates for a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.squared_distance_to(other).sqrt()
    }

    /// Squared Euclidean distance, used by the clustering objective.
    pub fn squared_distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A named point on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: LocationId,
    pub position: Position,
}

impl Location {
    pub fn new(id: impl Into<LocationId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Position::new(x, y),
        }
    }
}

/// In-memory lookup from location identifier to coordinates.
///
/// Loaded once and then shared read-only by the graph builder, the
/// pathfinder heuristic and the zone partitioner.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: HashMap<LocationId, Location>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a sequence of locations, rejecting duplicates.
    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Result<Self> {
        let mut registry = Self::new();
        for location in locations {
            registry.insert(location)?;
        }
        Ok(registry)
    }

    /// Add a location. Identifiers must be unique and coordinates finite.
    pub fn insert(&mut self, location: Location) -> Result<()> {
        if !location.position.is_finite() {
            return Err(Error::InvalidCoordinates { id: location.id });
        }
        if self.locations.contains_key(&location.id) {
            return Err(Error::DuplicateLocation { id: location.id });
        }
        self.locations.insert(location.id.clone(), location);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        self.locations.get(id).map(|location| location.position)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locations.contains_key(id)
    }

    /// Lookup a location, reporting a data-integrity error when it is absent.
    ///
    /// `context` names the record that referenced the identifier so the error
    /// is diagnosable (e.g. `"order #3"` or `"edge A -> B"`).
    pub fn require(&self, id: &str, context: impl Into<String>) -> Result<&Location> {
        self.locations.get(id).ok_or_else(|| Error::UnknownLocation {
            id: id.to_string(),
            context: context.into(),
        })
    }

    /// Straight-line distance between two registered locations.
    pub fn distance_between(&self, a: &str, b: &str) -> Option<f64> {
        let from = self.position(a)?;
        let to = self.position(b)?;
        Some(from.distance_to(&to))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_identifiers() {
        let mut registry = LocationRegistry::new();
        registry.insert(Location::new("A", 0.0, 0.0)).unwrap();
        let err = registry.insert(Location::new("A", 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, Error::DuplicateLocation { ref id } if id == "A"));
        assert_eq!(registry.position("A"), Some(Position::new(0.0, 0.0)));
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let mut registry = LocationRegistry::new();
        let err = registry
            .insert(Location::new("A", f64::NAN, 0.0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinates { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn require_names_missing_identifier_and_context() {
        let registry = LocationRegistry::new();
        let err = registry.require("Nowhere", "order #1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown location 'Nowhere' referenced by order #1"
        );
        assert!(err.is_data_integrity());
    }

    #[test]
    fn distance_between_is_euclidean() {
        let registry = LocationRegistry::from_locations([
            Location::new("A", 0.0, 0.0),
            Location::new("B", 3.0, 4.0),
        ])
        .unwrap();
        assert_eq!(registry.distance_between("A", "B"), Some(5.0));
        assert_eq!(registry.distance_between("A", "C"), None);
    }
}
