use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::{trace, warn};

use crate::graph::RoadGraph;
use crate::registry::{LocationId, LocationRegistry};

/// Supported shortest-path algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    /// Dijkstra's algorithm (no heuristic).
    Dijkstra,
    /// A* search guided by straight-line distance.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PathAlgorithm::Dijkstra => "dijkstra",
            PathAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// Limits applied to a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Give up after expanding this many nodes. `None` searches exhaustively.
    pub max_expansions: Option<usize>,
}

/// Least-cost path between two locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub nodes: Vec<LocationId>,
    pub cost: f64,
}

impl Path {
    fn single(node: &str) -> Self {
        Self {
            nodes: vec![node.to_string()],
            cost: 0.0,
        }
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// How a single search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Least-cost path to the goal.
    Found(Path),
    /// The frontier emptied without reaching the goal.
    Unreachable,
    /// The expansion cap was hit before the goal was settled. The goal may
    /// still be reachable.
    LimitReached,
}

impl SearchOutcome {
    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Unreachable | SearchOutcome::LimitReached => None,
        }
    }
}

/// Run A* from `start` to `goal`.
///
/// The heuristic is the straight-line distance to `goal`, which only yields
/// optimal paths when no edge weight is shorter than the straight-line distance
/// between its endpoints. Locations without coordinates fall back to a zero
/// estimate. Returns `None` when `goal` is unreachable or the expansion limit
/// is hit; use [`search_a_star`] to tell the two apart.
pub fn find_path_a_star(
    graph: &RoadGraph,
    registry: &LocationRegistry,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> Option<Path> {
    search_a_star(graph, registry, start, goal, options).into_path()
}

/// A* search reporting why no path was returned.
pub fn search_a_star(
    graph: &RoadGraph,
    registry: &LocationRegistry,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> SearchOutcome {
    if start == goal {
        return SearchOutcome::Found(Path::single(start));
    }

    let goal_position = registry.position(goal);
    let heuristic = |node: &str| -> f64 {
        match (goal_position, registry.position(node)) {
            (Some(target), Some(current)) => current.distance_to(&target),
            _ => 0.0,
        }
    };

    search(graph, start, goal, options, heuristic)
}

/// Run Dijkstra's algorithm from `start` to `goal`.
pub fn find_path_dijkstra(
    graph: &RoadGraph,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> Option<Path> {
    search_dijkstra(graph, start, goal, options).into_path()
}

/// Dijkstra search reporting why no path was returned.
pub fn search_dijkstra(
    graph: &RoadGraph,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> SearchOutcome {
    if start == goal {
        return SearchOutcome::Found(Path::single(start));
    }
    search(graph, start, goal, options, |_| 0.0)
}

fn search<H>(
    graph: &RoadGraph,
    start: &str,
    goal: &str,
    options: &SearchOptions,
    heuristic: H,
) -> SearchOutcome
where
    H: Fn(&str) -> f64,
{
    let mut g_score: HashMap<LocationId, f64> = HashMap::new();
    let mut parents: HashMap<LocationId, LocationId> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut expansions = 0usize;

    g_score.insert(start.to_string(), 0.0);
    queue.push(SearchEntry::new(start.to_string(), 0.0, heuristic(start)));

    while let Some(entry) = queue.pop() {
        let best = g_score.get(&entry.node).copied().unwrap_or(f64::INFINITY);
        if entry.cost.0 > best {
            continue;
        }

        if entry.node == goal {
            return SearchOutcome::Found(Path {
                nodes: reconstruct_path(&parents, start, goal),
                cost: entry.cost.0,
            });
        }

        if let Some(limit) = options.max_expansions {
            if expansions >= limit {
                warn!(start, goal, limit, "search expansion limit reached");
                return SearchOutcome::LimitReached;
            }
        }
        expansions += 1;

        for (next, weight) in graph.neighbours(&entry.node) {
            let tentative_g = entry.cost.0 + weight;
            if tentative_g < *g_score.get(next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next.clone(), tentative_g);
                parents.insert(next.clone(), entry.node.clone());
                queue.push(SearchEntry::new(
                    next.clone(),
                    tentative_g,
                    heuristic(next.as_str()),
                ));
            }
        }
    }

    trace!(start, goal, expansions, "frontier exhausted");
    SearchOutcome::Unreachable
}

fn reconstruct_path(
    parents: &HashMap<LocationId, LocationId>,
    start: &str,
    goal: &str,
) -> Vec<LocationId> {
    let mut path = vec![goal.to_string()];
    let mut current: &str = goal;
    while current != start {
        let Some(parent) = parents.get(current) else {
            break;
        };
        path.push(parent.clone());
        current = parent.as_str();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct SearchEntry {
    node: LocationId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl SearchEntry {
    fn new(node: LocationId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for SearchEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap pops the lowest estimate first. Ties
        // prefer the deeper entry, then the smaller identifier.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for SearchEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Strategy for computing shortest paths.
///
/// Implementations hold no state between calls, so a single instance can be
/// shared by every route being built.
pub trait Pathfinder: Send + Sync {
    /// The algorithm identifier for this pathfinder.
    fn algorithm(&self) -> PathAlgorithm;

    /// Search from `start` to `goal`.
    fn search(&self, start: &str, goal: &str) -> SearchOutcome;

    /// Returns `Some(path)` if a path was found, `None` otherwise.
    fn find_path(&self, start: &str, goal: &str) -> Option<Path> {
        self.search(start, goal).into_path()
    }
}

/// A* pathfinder over a road graph and its location registry.
#[derive(Debug, Clone, Copy)]
pub struct AStarPathfinder<'a> {
    graph: &'a RoadGraph,
    registry: &'a LocationRegistry,
    options: SearchOptions,
}

impl<'a> AStarPathfinder<'a> {
    pub fn new(graph: &'a RoadGraph, registry: &'a LocationRegistry) -> Self {
        Self::with_options(graph, registry, SearchOptions::default())
    }

    pub fn with_options(
        graph: &'a RoadGraph,
        registry: &'a LocationRegistry,
        options: SearchOptions,
    ) -> Self {
        Self {
            graph,
            registry,
            options,
        }
    }
}

impl Pathfinder for AStarPathfinder<'_> {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::AStar
    }

    fn search(&self, start: &str, goal: &str) -> SearchOutcome {
        search_a_star(self.graph, self.registry, start, goal, &self.options)
    }
}

/// Dijkstra pathfinder; ignores coordinates entirely.
#[derive(Debug, Clone, Copy)]
pub struct DijkstraPathfinder<'a> {
    graph: &'a RoadGraph,
    options: SearchOptions,
}

impl<'a> DijkstraPathfinder<'a> {
    pub fn new(graph: &'a RoadGraph) -> Self {
        Self::with_options(graph, SearchOptions::default())
    }

    pub fn with_options(graph: &'a RoadGraph, options: SearchOptions) -> Self {
        Self { graph, options }
    }
}

impl Pathfinder for DijkstraPathfinder<'_> {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Dijkstra
    }

    fn search(&self, start: &str, goal: &str) -> SearchOutcome {
        search_dijkstra(self.graph, start, goal, &self.options)
    }
}

/// Select the pathfinder implementation for an algorithm.
pub fn select_pathfinder<'a>(
    algorithm: PathAlgorithm,
    graph: &'a RoadGraph,
    registry: &'a LocationRegistry,
    options: SearchOptions,
) -> Box<dyn Pathfinder + 'a> {
    match algorithm {
        PathAlgorithm::AStar => Box::new(AStarPathfinder::with_options(graph, registry, options)),
        PathAlgorithm::Dijkstra => Box::new(DijkstraPathfinder::with_options(graph, options)),
    }
}
