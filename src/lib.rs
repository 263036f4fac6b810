//! Consumer-facing contract for the safety-aware route scorer.
//!
//! Rendering layers talk to the scorer with plain JSON: a start and end as
//! `[lat, lng]` pairs and a list of safety points with `lat`, `lng`, `name`,
//! `safety_level` and `radius` fields. This crate validates that input into
//! [`saferoute_core`] types and converts results back, one request at a time
//! or in parallel batches.

pub mod batch;
pub mod contract;
mod error;

pub use batch::calculate_safe_routes;
pub use contract::{
    SafeRouteRequest, SafeRouteResponse, SafetyPoint, calculate_safe_route, route_geojson,
    route_json, route_request,
};
pub use error::Error;
pub use saferoute_core;
