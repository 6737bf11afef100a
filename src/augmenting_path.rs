use crate::graph::{CapacitatedGraph, SINK, SOURCE};
use num_traits::{Float, NumAssign};
use std::collections::VecDeque;

/// Outcome of a shortest-path search in a residual graph.
///
/// `Exhausted` means the graph is well-formed but the sink is unreachable,
/// which terminates the augmenting drivers normally. `InvalidGraph` means
/// "s" or "t" is missing entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSearch {
    Found(Vec<String>),
    Exhausted,
    InvalidGraph,
}

/// Breadth-first search for a shortest s-t path by edge count.
///
/// Each vertex's incident edges are scanned in insertion order and the
/// first-discovered predecessor is kept. Observing an edge into "t"
/// records the current vertex as the sink's predecessor and abandons the
/// rest of that vertex's edge scan.
pub fn shortest_augmenting_path<Flow, N>(residual: &CapacitatedGraph<Flow, N>) -> PathSearch {
    let (Some(source), Some(sink)) = (residual.vertex_by_name(SOURCE), residual.vertex_by_name(SINK)) else {
        return PathSearch::InvalidGraph;
    };

    let n = residual.num_vertices();
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut discovered = vec![false; n];
    discovered[source] = true;

    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        for edge_id in residual.incident_edges(v) {
            let edge = residual.edge(edge_id);
            if edge.from != v {
                continue;
            }
            if edge.to == sink {
                if !discovered[sink] {
                    discovered[sink] = true;
                    predecessor[sink] = Some(v);
                }
                break;
            }
            if !discovered[edge.to] {
                discovered[edge.to] = true;
                predecessor[edge.to] = Some(v);
                queue.push_back(edge.to);
            }
        }
    }

    if !discovered[sink] {
        return PathSearch::Exhausted;
    }

    let mut names = vec![residual.vertex(sink).name().to_string()];
    let mut v = sink;
    while let Some(prev) = predecessor[v] {
        names.push(residual.vertex(prev).name().to_string());
        v = prev;
    }
    names.reverse();
    PathSearch::Found(names)
}

/// Minimum residual capacity along `path`, scanning every parallel edge of
/// each step.
pub fn bottleneck<Flow, N>(residual: &CapacitatedGraph<Flow, N>, path: &[String]) -> Flow
where
    Flow: Float,
{
    let mut bottleneck = Flow::infinity();
    for pair in path.windows(2) {
        let from = residual.vertex_by_name(&pair[0]).expect("path vertex missing from residual graph");
        let to = residual.vertex_by_name(&pair[1]).expect("path vertex missing from residual graph");
        for edge_id in residual.incident_edges(from) {
            let edge = residual.edge(edge_id);
            if edge.from == from && edge.to == to {
                bottleneck = bottleneck.min(edge.capacity);
            }
        }
    }
    bottleneck
}

/// Push `bottleneck` units along `path` in the flow graph: raise the first
/// forward edge with enough spare capacity, or cancel flow on the first
/// reverse edge when no forward edge can take it.
pub fn apply_augmentation<Flow, N>(flow_graph: &mut CapacitatedGraph<Flow, N>, path: &[String], bottleneck: Flow)
where
    Flow: Float + NumAssign,
{
    for pair in path.windows(2) {
        let from = flow_graph.vertex_by_name(&pair[0]).expect("path vertex missing from flow graph");
        let to = flow_graph.vertex_by_name(&pair[1]).expect("path vertex missing from flow graph");

        let forward = flow_graph.incident_edges(from).find(|&id| {
            let edge = flow_graph.edge(id);
            edge.from == from && edge.to == to && edge.capacity - edge.flow >= bottleneck
        });
        if let Some(id) = forward {
            flow_graph.edge_mut(id).flow += bottleneck;
            continue;
        }

        let backward = flow_graph
            .incident_edges(to)
            .find(|&id| {
                let edge = flow_graph.edge(id);
                edge.from == to && edge.to == from && edge.flow >= bottleneck
            })
            .expect("augmenting path step has no usable edge in the flow graph");
        flow_graph.edge_mut(backward).flow -= bottleneck;
    }
}
