use num_traits::Float;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Name of the vertex every algorithm treats as the flow source.
pub const SOURCE: &str = "s";
/// Name of the vertex every algorithm treats as the flow sink.
pub const SINK: &str = "t";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate vertex name `{0}`")]
    DuplicateVertex(String),
    #[error("edge endpoint {0} is not a vertex of this graph")]
    UnknownEndpoint(usize),
    #[error("edge capacity must be non-negative")]
    NegativeCapacity,
    #[error("vertex {vertex} is not an endpoint of edge {edge}")]
    NotAnEndpoint { vertex: usize, edge: usize },
}

#[derive(Debug, Clone)]
pub struct Vertex<N = ()> {
    name: String,
    payload: N,
    incident: Vec<usize>,
}

impl<N> Vertex<N> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &N {
        &self.payload
    }

    pub fn is_source(&self) -> bool {
        self.name == SOURCE
    }

    pub fn is_sink(&self) -> bool {
        self.name == SINK
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub capacity: Flow,
    pub flow: Flow,
    pub label: Option<String>,
}

/// Directed capacitated graph keyed by vertex name.
///
/// Vertices and edges live in arenas addressed by stable `usize` ids;
/// incidence lists hold edge ids in insertion order.
#[derive(Debug, Clone)]
pub struct CapacitatedGraph<Flow, N = ()> {
    vertices: Vec<Vertex<N>>,
    edges: Vec<Edge<Flow>>,
    index: FxHashMap<String, usize>,
}

impl<Flow, N> Default for CapacitatedGraph<Flow, N> {
    fn default() -> Self {
        Self { vertices: Vec::new(), edges: Vec::new(), index: FxHashMap::default() }
    }
}

impl<Flow, N> CapacitatedGraph<Flow, N> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn insert_vertex(&mut self, payload: N, name: impl Into<String>) -> Result<usize, GraphError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(GraphError::DuplicateVertex(name));
        }
        let id = self.vertices.len();
        self.index.insert(name.clone(), id);
        self.vertices.push(Vertex { name, payload, incident: Vec::new() });
        Ok(id)
    }

    pub fn vertex_by_name(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn vertex(&self, v: usize) -> &Vertex<N> {
        &self.vertices[v]
    }

    pub fn edge(&self, e: usize) -> &Edge<Flow> {
        &self.edges[e]
    }

    pub(crate) fn edge_mut(&mut self, e: usize) -> &mut Edge<Flow> {
        &mut self.edges[e]
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<N>> {
        self.vertices.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<Flow>> {
        self.edges.iter()
    }

    /// Ids of all edges with `v` as either endpoint, in insertion order.
    pub fn incident_edges(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.vertices[v].incident.iter().copied()
    }

    /// First edge in `u`'s incidence order connecting `u` and `v`, in either
    /// orientation. Parallel edges exist; callers scanning for a bottleneck
    /// must consider every match themselves.
    pub fn edge_between(&self, u: usize, v: usize) -> Option<usize> {
        self.vertices[u].incident.iter().copied().find(|&id| {
            let edge = &self.edges[id];
            (edge.from == u && edge.to == v) || (edge.from == v && edge.to == u)
        })
    }

    /// The endpoint of `e` that is not `v`.
    pub fn opposite(&self, v: usize, e: usize) -> Result<usize, GraphError> {
        let edge = &self.edges[e];
        if edge.from == v {
            Ok(edge.to)
        } else if edge.to == v {
            Ok(edge.from)
        } else {
            Err(GraphError::NotAnEndpoint { vertex: v, edge: e })
        }
    }

    /// Same vertex set (names, payloads, ids), no edges. Derivation helper
    /// for the residual builder and the subgraph filters.
    pub(crate) fn vertex_skeleton(&self) -> Self
    where
        N: Clone,
    {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex { name: v.name.clone(), payload: v.payload.clone(), incident: Vec::new() })
                .collect(),
            edges: Vec::new(),
            index: self.index.clone(),
        }
    }
}

impl<Flow, N> CapacitatedGraph<Flow, N>
where
    Flow: Float,
{
    pub fn insert_edge(&mut self, from: usize, to: usize, capacity: Flow, label: Option<String>) -> Result<usize, GraphError> {
        if from >= self.vertices.len() {
            return Err(GraphError::UnknownEndpoint(from));
        }
        if to >= self.vertices.len() {
            return Err(GraphError::UnknownEndpoint(to));
        }
        if capacity < Flow::zero() {
            return Err(GraphError::NegativeCapacity);
        }
        Ok(self.push_edge(from, to, capacity, label))
    }

    // no validation; derivation code inserts between endpoints it copied itself
    pub(crate) fn push_edge(&mut self, from: usize, to: usize, capacity: Flow, label: Option<String>) -> usize {
        let id = self.edges.len();
        self.edges.push(Edge { from, to, capacity, flow: Flow::zero(), label });
        self.vertices[from].incident.push(id);
        self.vertices[to].incident.push(id);
        id
    }

    /// Copy with identical topology and every edge's flow reset to zero.
    pub fn with_zero_flow(&self) -> Self
    where
        N: Clone,
    {
        let mut copy = self.clone();
        for edge in &mut copy.edges {
            edge.flow = Flow::zero();
        }
        copy
    }

    /// Net outflow of `v`: flow on edges leaving `v` minus flow on edges
    /// entering it. Zero for every conserving vertex.
    pub fn net_flow(&self, v: usize) -> Flow {
        self.edges.iter().fold(Flow::zero(), |sum, edge| {
            if edge.from == v {
                sum + edge.flow
            } else if edge.to == v {
                sum - edge.flow
            } else {
                sum
            }
        })
    }
}
