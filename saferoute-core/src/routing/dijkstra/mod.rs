mod regular_dijkstra;
mod state;
mod traced_dijkstra;

use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::model::RouteGraph;

pub use regular_dijkstra::dijkstra_path_weights;
pub use traced_dijkstra::{ShortestPath, dijkstra_path};

/// Neighbors of `node` with edge weights, in ascending node index
fn sorted_neighbors(graph: &RouteGraph, node: NodeIndex) -> Vec<(NodeIndex, f64)> {
    let mut neighbors: Vec<(NodeIndex, f64)> = graph
        .graph
        .edges(node)
        .map(|edge| {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (next, edge.weight().weight)
        })
        .collect();
    neighbors.sort_unstable_by_key(|&(next, _)| next);
    neighbors
}
