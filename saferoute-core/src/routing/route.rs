use crate::{
    Coordinate,
    model::{RouteNode, RouteNodeId},
};

/// Result of a successful routing call
#[derive(Debug, Clone, PartialEq)]
pub struct SafeRoute {
    pub(crate) nodes: Vec<RouteNode>,
    pub(crate) total_weight: f64,
    pub(crate) distance_km: f64,
}

impl SafeRoute {
    /// Visited nodes from start to end inclusive
    pub fn nodes(&self) -> &[RouteNode] {
        &self.nodes
    }

    pub fn ids(&self) -> Vec<RouteNodeId> {
        self.nodes.iter().map(|node| node.id).collect()
    }

    /// Node identifiers as consumed by rendering layers, e.g. `["start", "safety_1", "end"]`
    pub fn id_strings(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.id.to_string()).collect()
    }

    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.nodes.iter().map(|node| node.coordinate).collect()
    }

    pub fn contains(&self, id: RouteNodeId) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    /// Sum of edge weights (distance plus danger penalties)
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Geographic length in kilometers, without penalties
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn penalty(&self) -> f64 {
        self.total_weight - self.distance_km
    }

    pub fn into_nodes(self) -> Vec<RouteNode> {
        self.nodes
    }
}
