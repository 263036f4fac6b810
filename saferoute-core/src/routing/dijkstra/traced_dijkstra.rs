use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use super::{sorted_neighbors, state::State};
use crate::model::RouteGraph;

/// Cheapest path between two nodes
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub cost: f64,
    /// Node indices from source to target inclusive
    pub nodes: Vec<NodeIndex>,
}

/// Dijkstra's algorithm with predecessor tracking, stopping once `target` is settled.
///
/// Predecessors are only replaced on a strictly lower cost, so equal-cost
/// alternatives keep the path discovered first. With the heap breaking cost
/// ties by node index and neighbors relaxed in ascending index, the result is
/// reproducible for identical input.
pub fn dijkstra_path(
    graph: &RouteGraph,
    start: NodeIndex,
    target: NodeIndex,
) -> Option<ShortestPath> {
    let node_count = graph.node_count();
    if graph.graph.node_weight(start).is_none() || graph.graph.node_weight(target).is_none() {
        return None;
    }

    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(node_count);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(node_count);
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::with_capacity(node_count);

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

        if node == target {
            break;
        }

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
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    if !settled.contains(target.index()) {
        return None;
    }
    let cost = *distances.get(&target)?;

    // Follow predecessors backward from target to start
    let mut nodes = vec![target];
    let mut current = target;
    while current != start {
        current = *predecessors.get(&current)?;
        nodes.push(current);
    }
    nodes.reverse();

    Some(ShortestPath { cost, nodes })
}
