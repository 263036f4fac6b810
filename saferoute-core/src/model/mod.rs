//! Data model for safety-aware routing
//!
//! Input types (coordinates and safety zones) and the complete weighted graph
//! built from them for a single routing call.

pub mod coordinate;
pub mod graph;
pub mod zone;

pub use coordinate::Coordinate;
pub use graph::{RouteEdge, RouteGraph, RouteNode, RouteNodeId};
pub use zone::{SafetyLevel, SafetyZone};
