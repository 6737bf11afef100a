use crate::augmenting_path::{apply_augmentation, bottleneck, shortest_augmenting_path, PathSearch};
use crate::graph::{CapacitatedGraph, SOURCE};
use crate::residual::{limited_subgraph, residual_graph};
use num_traits::{Float, NumAssign};
use std::fmt::Debug;
use tracing::debug;

#[derive(Default)]
pub struct CapacityScaling;

impl CapacityScaling {
    /// Maximum s-t flow by augmenting paths restricted to residual
    /// capacity at least Δ, halving Δ each phase. Δ starts at the largest
    /// power of two with 2Δ below the maximum capacity incident to "s",
    /// bounding the work to O(E) augmentations over O(log maxCap) phases.
    pub fn solve<Flow, N>(&mut self, graph: &CapacitatedGraph<Flow, N>) -> Flow
    where
        Flow: Float + NumAssign + Debug,
        N: Clone,
    {
        let Some(source) = graph.vertex_by_name(SOURCE) else {
            return Flow::zero();
        };
        let max_cap_out_s = graph
            .incident_edges(source)
            .map(|id| graph.edge(id).capacity)
            .fold(Flow::zero(), Flow::max);

        let two = Flow::one() + Flow::one();
        let mut delta = initial_delta(max_cap_out_s);
        let mut flow_graph = graph.with_zero_flow();
        let mut max_flow = Flow::zero();

        while delta >= Flow::one() {
            debug!(delta = ?delta, "capacity scaling phase");
            loop {
                let residual = residual_graph(&flow_graph);
                let limited = limited_subgraph(&residual, delta);
                let path = match shortest_augmenting_path(&limited) {
                    PathSearch::Found(path) => path,
                    PathSearch::Exhausted | PathSearch::InvalidGraph => break,
                };
                let amount = bottleneck(&limited, &path);
                max_flow += amount;
                apply_augmentation(&mut flow_graph, &path, amount);
            }
            // integer division, discarding remainder; 1 / 2 ends the loop
            delta = (delta / two).floor();
        }

        debug!(max_flow = ?max_flow, "capacity scaling finished");
        max_flow
    }
}

/// Largest power of two Δ with 2Δ still below `max_cap_out_s`.
pub(crate) fn initial_delta<Flow>(max_cap_out_s: Flow) -> Flow
where
    Flow: Float,
{
    let mut delta = Flow::one();
    while delta + delta < max_cap_out_s {
        delta = delta + delta;
    }
    delta
}
