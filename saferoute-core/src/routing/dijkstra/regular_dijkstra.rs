use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use super::{sorted_neighbors, state::State};
use crate::model::RouteGraph;

/// Dijkstra's algorithm over the route graph
/// Returns a map of node indices to the minimum cumulative weight from `start`
pub fn dijkstra_path_weights(graph: &RouteGraph, start: NodeIndex) -> HashMap<NodeIndex, f64> {
    let node_count = graph.node_count();
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(node_count);
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::with_capacity(node_count);

    if graph.graph.node_weight(start).is_none() {
        return distances;
    }

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if settled.contains(node.index()) {
            continue;
        }
        settled.insert(node.index());

        for (next, weight) in sorted_neighbors(graph, node) {
            if settled.contains(next.index()) {
                continue;
            }
            let next_cost = cost + weight;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, SafetyLevel, SafetyZone, ScorerConfig, model::RouteNodeId};

    #[test]
    fn reaches_every_node_of_complete_graph() {
        let zones = vec![
            SafetyZone::new(
                "Connaught Place",
                Coordinate::new(28.6280, 77.2137).unwrap(),
                SafetyLevel::Danger,
            ),
            SafetyZone::new(
                "Lotus Temple",
                Coordinate::new(28.5535, 77.2588).unwrap(),
                SafetyLevel::Safe,
            ),
        ];
        let graph = RouteGraph::build(
            Coordinate::new(28.6139, 77.2090).unwrap(),
            Coordinate::new(28.6129, 77.2295).unwrap(),
            &zones,
            &ScorerConfig::default(),
        )
        .unwrap();
        let start = graph.node_index(RouteNodeId::Start).unwrap();

        let weights = dijkstra_path_weights(&graph, start);
        assert_eq!(weights.len(), 4);
        assert_eq!(weights[&start], 0.0);

        for id in [RouteNodeId::End, RouteNodeId::Zone(0), RouteNodeId::Zone(1)] {
            let idx = graph.node_index(id).unwrap();
            let direct = graph.edge(RouteNodeId::Start, id).unwrap().weight;
            assert!(weights[&idx] <= direct + 1e-12);
        }
    }

    #[test]
    fn unknown_source_reaches_nothing() {
        let graph = RouteGraph::from_nodes(Vec::new(), &ScorerConfig::default()).unwrap();
        assert!(dijkstra_path_weights(&graph, NodeIndex::new(0)).is_empty());
    }
}
