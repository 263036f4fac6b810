//! Safety-aware route scoring.
//!
//! Given a start point, an end point and a list of labeled safety zones, the
//! crate builds a complete graph over all of them, weights every edge with its
//! geodesic length plus a penalty for each dangerous endpoint, and returns the
//! cheapest start-end path.

pub mod config;
mod error;
pub mod model;
pub mod prelude;
pub mod routing;

pub use config::ScorerConfig;
pub use error::Error;
pub use model::{Coordinate, SafetyLevel, SafetyZone};
pub use routing::{RouteScorer, SafeRoute, compute_safest_route};

/// Position of a zone in the caller's input sequence
pub type ZoneIndex = usize;

/// Default penalty added to an edge for each dangerous endpoint
pub const DANGER_PENALTY: f64 = 2.0;
