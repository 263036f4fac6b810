//! Per-call routing graph over start, end and safety zones

use std::{fmt, str::FromStr};

use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, warn};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::{Coordinate, Error, SafetyLevel, SafetyZone, ScorerConfig, ZoneIndex};

/// Identifier of a routing node, rendered as `start`, `end` or `safety_{index}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteNodeId {
    Start,
    End,
    /// Zone at this position of the input sequence
    Zone(ZoneIndex),
}

impl fmt::Display for RouteNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteNodeId::Start => f.write_str("start"),
            RouteNodeId::End => f.write_str("end"),
            RouteNodeId::Zone(index) => write!(f, "safety_{index}"),
        }
    }
}

impl FromStr for RouteNodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(RouteNodeId::Start),
            "end" => Ok(RouteNodeId::End),
            _ => match s.strip_prefix("safety_").map(str::parse::<ZoneIndex>) {
                Some(Ok(index)) => Ok(RouteNodeId::Zone(index)),
                _ => Err(Error::InvalidInput(format!("unknown node id '{s}'"))),
            },
        }
    }
}

/// Graph vertex
#[derive(Debug, Clone, PartialEq)]
pub struct RouteNode {
    pub id: RouteNodeId,
    pub coordinate: Coordinate,
    /// `None` for start and end
    pub safety_level: Option<SafetyLevel>,
    pub name: Option<String>,
}

impl RouteNode {
    pub fn start(coordinate: Coordinate) -> Self {
        Self {
            id: RouteNodeId::Start,
            coordinate,
            safety_level: None,
            name: None,
        }
    }

    pub fn end(coordinate: Coordinate) -> Self {
        Self {
            id: RouteNodeId::End,
            coordinate,
            safety_level: None,
            name: None,
        }
    }

    pub fn zone(index: ZoneIndex, zone: &SafetyZone) -> Self {
        Self {
            id: RouteNodeId::Zone(index),
            coordinate: zone.coordinate,
            safety_level: Some(zone.safety_level),
            name: Some(zone.name.clone()),
        }
    }

    /// Penalty this node adds to each of its edges
    pub fn penalty(&self, config: &ScorerConfig) -> f64 {
        self.safety_level.map_or(0.0, |level| level.penalty(config))
    }
}

/// Graph edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEdge {
    /// Distance plus danger penalty, used by the search
    pub weight: f64,
    /// Geodesic length in kilometers
    pub distance_km: f64,
}

/// Complete undirected graph built for a single routing call
#[derive(Debug, Clone)]
pub struct RouteGraph {
    pub graph: UnGraph<RouteNode, RouteEdge>,
    index: HashMap<RouteNodeId, NodeIndex>,
}

impl RouteGraph {
    /// Builds the graph for one call.
    ///
    /// Node indices follow input order: start, end, then zones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the zone count exceeds `config.max_zones`.
    pub fn build(
        start: Coordinate,
        end: Coordinate,
        zones: &[SafetyZone],
        config: &ScorerConfig,
    ) -> Result<Self, Error> {
        if let Some(max_zones) = config.max_zones
            && zones.len() > max_zones
        {
            return Err(Error::InvalidInput(format!(
                "{} safety zones given, at most {max_zones} are allowed",
                zones.len()
            )));
        }

        let mut nodes = Vec::with_capacity(zones.len() + 2);
        nodes.push(RouteNode::start(start));
        nodes.push(RouteNode::end(end));
        for (index, zone) in zones.iter().enumerate() {
            nodes.push(RouteNode::zone(index, zone));
        }

        Self::from_nodes(nodes, config)
    }

    /// Builds a complete graph over arbitrary nodes.
    ///
    /// Start or end may be missing, in which case every search reports no route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if two nodes share an id.
    pub fn from_nodes(nodes: Vec<RouteNode>, config: &ScorerConfig) -> Result<Self, Error> {
        let node_count = nodes.len();
        if node_count > config.large_graph_warning {
            warn!(
                "Building a complete graph over {node_count} nodes ({} edges). \
                Edge construction grows quadratically with the number of safety zones.",
                complete_edge_count(node_count)
            );
        }

        let mut graph = UnGraph::with_capacity(node_count, complete_edge_count(node_count));
        let mut index = HashMap::with_capacity(node_count);

        for node in nodes {
            let id = node.id;
            let node_idx = graph.add_node(node);
            if index.insert(id, node_idx).is_some() {
                return Err(Error::InvalidInput(format!("duplicate node id '{id}'")));
            }
        }

        let indices: Vec<NodeIndex> = graph.node_indices().collect();
        for (u, v) in indices.iter().copied().tuple_combinations() {
            let edge = edge_between(&graph[u], &graph[v], config);
            graph.add_edge(u, v, edge);
        }

        debug!(
            "Route graph built with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, index })
    }

    pub fn node_index(&self, id: RouteNodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub fn node(&self, id: RouteNodeId) -> Option<&RouteNode> {
        self.node_index(id).map(|idx| &self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn edge(&self, a: RouteNodeId, b: RouteNodeId) -> Option<&RouteEdge> {
        let (a, b) = (self.node_index(a)?, self.node_index(b)?);
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge)
    }

    /// Total weight of an explicit node sequence, `None` if any hop is missing
    pub fn path_weight(&self, path: &[RouteNodeId]) -> Option<f64> {
        if path.is_empty() {
            return None;
        }
        let hops = path.iter().tuple_windows();
        let weights = hops.map(|(&a, &b)| self.edge(a, b).map(|e| e.weight));
        weights.sum()
    }
}

fn edge_between(u: &RouteNode, v: &RouteNode, config: &ScorerConfig) -> RouteEdge {
    let distance_km = u.coordinate.distance_km(&v.coordinate);
    let danger_penalty = u.penalty(config) + v.penalty(config);

    RouteEdge {
        weight: distance_km + danger_penalty,
        distance_km,
    }
}

fn complete_edge_count(node_count: usize) -> usize {
    node_count * node_count.saturating_sub(1) / 2
}
