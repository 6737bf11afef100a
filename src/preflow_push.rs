use crate::graph::{CapacitatedGraph, SINK, SOURCE};
use num_traits::{Float, NumAssign};
use std::collections::BinaryHeap;
use std::fmt::Debug;
use tracing::debug;

/// Highest-label push-relabel. Mutates the flow graph it is given in
/// place; the per-vertex excess/height/adjacency state lives in side
/// tables indexed by vertex id.
#[derive(Default)]
pub struct PreflowPush<Flow> {
    excesses: Vec<Flow>,
    heights: Vec<usize>,
    adjacency: Vec<Vec<usize>>,
    cursors: Vec<usize>,
    active: Vec<bool>,
    // (height at activation, vertex); heights of queued vertices cannot
    // change, so entries never go stale
    heap: BinaryHeap<(usize, usize)>,
    relabel_count: usize,
}

impl<Flow> PreflowPush<Flow>
where
    Flow: Float + NumAssign + Debug,
{
    /// Maximum s-t flow. On return `graph` carries the final flow
    /// assignment; the value is the sum of flow on edges incident to "s".
    pub fn solve<N>(&mut self, graph: &mut CapacitatedGraph<Flow, N>) -> Flow {
        let (source, sink) = match (graph.vertex_by_name(SOURCE), graph.vertex_by_name(SINK)) {
            (Some(source), Some(sink)) if source != sink => (source, sink),
            _ => return Flow::zero(),
        };

        self.pre_process(graph, source);

        while let Some((_, v)) = self.heap.pop() {
            self.active[v] = false;
            // the source and sink hold whatever excess reaches them
            if v == source || v == sink {
                continue;
            }

            if self.adjacency[v].is_empty() {
                self.rebuild_adjacency(graph, v);
            }

            if self.cursors[v] == self.adjacency[v].len() {
                self.relabel(graph, v);
                if self.excesses[v] > Flow::zero() {
                    self.activate(v);
                }
            } else {
                self.push(graph, v, source, sink);
            }
        }

        debug!(relabels = self.relabel_count, "preflow push finished");
        let mut max_flow = Flow::zero();
        for edge_id in graph.incident_edges(source) {
            max_flow += graph.edge(edge_id).flow;
        }
        max_flow
    }

    /// Saturate every edge touching the source, derive the initial
    /// excesses, and queue every vertex that starts with a surplus.
    fn pre_process<N>(&mut self, graph: &mut CapacitatedGraph<Flow, N>, source: usize) {
        let n = graph.num_vertices();
        self.excesses = vec![Flow::zero(); n];
        self.heights = vec![0; n];
        self.heights[source] = n;
        self.adjacency = vec![Vec::new(); n];
        self.cursors = vec![0; n];
        self.active = vec![false; n];
        self.heap.clear();
        self.relabel_count = 0;

        for edge_id in 0..graph.num_edges() {
            let edge = graph.edge_mut(edge_id);
            edge.flow = if edge.from == source || edge.to == source { edge.capacity } else { Flow::zero() };
        }
        for edge in graph.edges() {
            self.excesses[edge.from] -= edge.flow;
            self.excesses[edge.to] += edge.flow;
        }
        for v in 0..n {
            if self.excesses[v] > Flow::zero() {
                self.activate(v);
            }
        }
    }

    /// Neighbors of `v` one level below it with room on the connecting
    /// edge: forward edges with spare capacity, backward edges with flow
    /// to cancel. One entry per admissible edge, in incidence order.
    fn rebuild_adjacency<N>(&mut self, graph: &CapacitatedGraph<Flow, N>, v: usize) {
        self.adjacency[v].clear();
        self.cursors[v] = 0;
        for edge_id in graph.incident_edges(v) {
            let edge = graph.edge(edge_id);
            let w = graph.opposite(v, edge_id).expect("incident edge of v");
            if self.heights[v] != self.heights[w] + 1 {
                continue;
            }
            let admissible = if edge.from == v { edge.flow < edge.capacity } else { edge.flow > Flow::zero() };
            if admissible {
                self.adjacency[v].push(w);
            }
        }
    }

    // height rises by exactly one per relabel, never jumping to
    // 1 + min(residual neighbor heights)
    fn relabel<N>(&mut self, graph: &CapacitatedGraph<Flow, N>, v: usize) {
        self.relabel_count += 1;
        self.heights[v] += 1;
        self.rebuild_adjacency(graph, v);

        // v's new height can invalidate neighbors that listed v as admissible
        for edge_id in graph.incident_edges(v) {
            let w = graph.opposite(v, edge_id).expect("incident edge of v");
            if w != v && self.adjacency[w].contains(&v) {
                self.rebuild_adjacency(graph, w);
            }
        }
    }

    fn push<N>(&mut self, graph: &mut CapacitatedGraph<Flow, N>, v: usize, source: usize, sink: usize) {
        let w = self.adjacency[v][self.cursors[v]];
        let edge_id = graph.edge_between(v, w).expect("adjacent vertex without a connecting edge");
        let edge = graph.edge(edge_id);
        let excess = self.excesses[v];

        let forward = edge.from == v;
        let (amount, saturating) = if forward {
            let spare = edge.capacity - edge.flow;
            if excess < spare { (excess, false) } else { (spare, true) }
        } else {
            let room = edge.flow;
            if excess < room { (excess, false) } else { (room, true) }
        };

        if forward {
            graph.edge_mut(edge_id).flow += amount;
        } else {
            graph.edge_mut(edge_id).flow -= amount;
        }
        self.excesses[v] -= amount;
        self.excesses[w] += amount;

        if self.excesses[v] > Flow::zero() {
            self.activate(v);
        }
        if self.excesses[w] > Flow::zero() && w != source && w != sink {
            self.activate(w);
        }
        if saturating {
            self.cursors[v] += 1;
        }
    }

    fn activate(&mut self, v: usize) {
        if !self.active[v] {
            self.active[v] = true;
            self.heap.push((self.heights[v], v));
        }
    }
}
