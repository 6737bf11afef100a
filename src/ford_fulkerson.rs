use crate::augmenting_path::{apply_augmentation, bottleneck, shortest_augmenting_path, PathSearch};
use crate::graph::CapacitatedGraph;
use crate::residual::{positive_subgraph, residual_graph};
use num_traits::{Float, NumAssign};
use std::fmt::Debug;
use tracing::{debug, trace};

#[derive(Default)]
pub struct FordFulkerson;

impl FordFulkerson {
    /// Maximum s-t flow by repeated shortest augmenting paths. Works on a
    /// private zero-flow copy of `graph`.
    ///
    /// With irrational capacities the augmenting-path method is not
    /// guaranteed to terminate; no iteration cap is imposed.
    pub fn solve<Flow, N>(&mut self, graph: &CapacitatedGraph<Flow, N>) -> Flow
    where
        Flow: Float + NumAssign + Debug,
        N: Clone,
    {
        let mut flow_graph = graph.with_zero_flow();
        let max_flow = augment_to_exhaustion(&mut flow_graph);
        debug!(max_flow = ?max_flow, "ford-fulkerson finished");
        max_flow
    }
}

/// Augment along shortest residual paths until none remains, mutating
/// `flow_graph` in place. Returns the total flow pushed.
pub(crate) fn augment_to_exhaustion<Flow, N>(flow_graph: &mut CapacitatedGraph<Flow, N>) -> Flow
where
    Flow: Float + NumAssign + Debug,
    N: Clone,
{
    let mut max_flow = Flow::zero();
    loop {
        let residual = residual_graph(flow_graph);
        let admissible = positive_subgraph(&residual);
        let path = match shortest_augmenting_path(&admissible) {
            PathSearch::Found(path) => path,
            PathSearch::Exhausted | PathSearch::InvalidGraph => break,
        };
        let delta = bottleneck(&admissible, &path);
        trace!(delta = ?delta, hops = path.len() - 1, "augmenting");
        max_flow += delta;
        apply_augmentation(flow_graph, &path, delta);
    }
    max_flow
}
