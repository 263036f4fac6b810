pub use crate::DANGER_PENALTY;

// Re-export key components
pub use crate::config::ScorerConfig;
pub use crate::error::Error;
pub use crate::model::{
    Coordinate, RouteEdge, RouteGraph, RouteNode, RouteNodeId, SafetyLevel, SafetyZone,
};
pub use crate::routing::{RouteCache, RouteScorer, SafeRoute, compute_safest_route};

pub use crate::ZoneIndex;
