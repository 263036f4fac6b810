use log::{info, trace};

use crate::{
    Coordinate, Error, SafetyZone, ScorerConfig, ZoneIndex,
    model::{RouteGraph, RouteNodeId},
    routing::{
        SafeRoute,
        cache::{RouteCache, RouteKey},
        dijkstra::{dijkstra_path, dijkstra_path_weights},
    },
};

/// Finds the cheapest start-end path through a complete graph of safety zones.
///
/// A scorer holds only configuration and an optional cache. Every call builds
/// its own [`RouteGraph`] and drops it on return, so a scorer can be shared
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct RouteScorer {
    config: ScorerConfig,
    cache: Option<RouteCache>,
}

impl RouteScorer {
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the configuration is invalid.
    pub fn new(config: ScorerConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            cache: None,
        })
    }

    /// Memoizes results in a cache that is cleared once it holds `capacity` entries
    #[must_use]
    pub fn with_cache(mut self, capacity: usize) -> Self {
        info!("Route cache enabled with capacity {capacity}");
        self.cache = Some(RouteCache::new(capacity));
        self
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&RouteCache> {
        self.cache.as_ref()
    }

    /// Builds the weighted graph for one call
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the zone count exceeds the configured limit.
    pub fn build_graph(
        &self,
        start: Coordinate,
        end: Coordinate,
        zones: &[SafetyZone],
    ) -> Result<RouteGraph, Error> {
        RouteGraph::build(start, end, zones, &self.config)
    }

    /// Computes the minimum-cost route from `start` to `end`.
    ///
    /// Returns `Ok(None)` when no route connects the two points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the zone count exceeds the configured limit.
    pub fn compute_safest_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        zones: &[SafetyZone],
    ) -> Result<Option<SafeRoute>, Error> {
        let Some(cache) = &self.cache else {
            return self.compute_uncached(start, end, zones);
        };

        let key = RouteKey::new(start, end, zones);
        if let Some(route) = cache.get(&key) {
            trace!("Route cache hit for {start} -> {end}");
            return Ok(route);
        }

        let route = self.compute_uncached(start, end, zones)?;
        cache.insert(key, route.clone());
        Ok(route)
    }

    /// Like [`compute_safest_route`](Self::compute_safest_route), but treats a
    /// missing route as an error
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRouteFound`] when start and end are not connected.
    pub fn require_safest_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        zones: &[SafetyZone],
    ) -> Result<SafeRoute, Error> {
        let route = self.compute_safest_route(start, end, zones)?;
        route.ok_or(Error::NoRouteFound)
    }

    /// Minimum total weight of a start-end route forced through one zone.
    ///
    /// Returns `Ok(None)` if `zone` is not a valid index into `zones`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the zone count exceeds the configured limit.
    pub fn cost_via(
        &self,
        start: Coordinate,
        end: Coordinate,
        zones: &[SafetyZone],
        zone: ZoneIndex,
    ) -> Result<Option<f64>, Error> {
        let graph = self.build_graph(start, end, zones)?;
        let (Some(start_idx), Some(end_idx), Some(zone_idx)) = (
            graph.node_index(RouteNodeId::Start),
            graph.node_index(RouteNodeId::End),
            graph.node_index(RouteNodeId::Zone(zone)),
        ) else {
            return Ok(None);
        };

        let from_start = dijkstra_path_weights(&graph, start_idx);
        let from_end = dijkstra_path_weights(&graph, end_idx);

        let to_zone = from_start.get(&zone_idx);
        let from_zone = from_end.get(&zone_idx);
        Ok(to_zone.zip(from_zone).map(|(to, from)| to + from))
    }

    fn compute_uncached(
        &self,
        start: Coordinate,
        end: Coordinate,
        zones: &[SafetyZone],
    ) -> Result<Option<SafeRoute>, Error> {
        let graph = self.build_graph(start, end, zones)?;
        Ok(shortest_route(&graph))
    }
}

/// Cheapest route between the start and end nodes of an already built graph.
///
/// Returns `None` if either node is missing.
pub fn shortest_route(graph: &RouteGraph) -> Option<SafeRoute> {
    let start = graph.node_index(RouteNodeId::Start)?;
    let end = graph.node_index(RouteNodeId::End)?;
    let path = dijkstra_path(graph, start, end)?;

    let mut distance_km = 0.0;
    for hop in path.nodes.windows(2) {
        if let Some(edge) = graph.graph.find_edge(hop[0], hop[1]) {
            distance_km += graph.graph[edge].distance_km;
        }
    }

    let nodes = path.nodes.iter().map(|&idx| graph.graph[idx].clone());

    Some(SafeRoute {
        nodes: nodes.collect(),
        total_weight: path.cost,
        distance_km,
    })
}

/// Like [`shortest_route`], but treats a missing route as an error
///
/// # Errors
///
/// Returns [`Error::NoRouteFound`] if the graph lacks a start or end node.
pub fn require_shortest_route(graph: &RouteGraph) -> Result<SafeRoute, Error> {
    shortest_route(graph).ok_or(Error::NoRouteFound)
}

/// Computes the safest route with the default configuration
///
/// # Errors
///
/// Never fails with the default configuration, the `Result` mirrors
/// [`RouteScorer::compute_safest_route`].
pub fn compute_safest_route(
    start: Coordinate,
    end: Coordinate,
    zones: &[SafetyZone],
) -> Result<Option<SafeRoute>, Error> {
    RouteScorer::default().compute_safest_route(start, end, zones)
}
