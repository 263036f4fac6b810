//! Route search over the per-call safety graph

mod cache;
pub mod dijkstra;
mod route;
mod scorer;
mod to_geojson;

pub use cache::RouteCache;
pub use route::SafeRoute;
pub use scorer::{RouteScorer, compute_safest_route, require_shortest_route, shortest_route};
