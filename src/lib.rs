pub mod augmenting_path;
pub mod capacity_scaling;
pub mod ford_fulkerson;
pub mod graph;
pub mod preflow_push;
pub mod residual;
