use maximum_flow::augmenting_path::{shortest_augmenting_path, PathSearch};
use maximum_flow::capacity_scaling::CapacityScaling;
use maximum_flow::ford_fulkerson::FordFulkerson;
use maximum_flow::graph::CapacitatedGraph;
use maximum_flow::preflow_push::PreflowPush;
use maximum_flow::residual::{positive_subgraph, residual_graph};
use rstest::rstest;

const EPS: f64 = 1e-9;

fn build(vertices: &[&str], edges: &[(&str, &str, f64)]) -> CapacitatedGraph<f64> {
    let mut graph = CapacitatedGraph::new();
    for name in vertices {
        graph.insert_vertex((), *name).unwrap();
    }
    for (from, to, capacity) in edges {
        let u = graph.vertex_by_name(from).unwrap();
        let v = graph.vertex_by_name(to).unwrap();
        graph.insert_edge(u, v, *capacity, None).unwrap();
    }
    graph
}

fn diamond() -> CapacitatedGraph<f64> {
    build(
        &["s", "a", "b", "t"],
        &[
            ("s", "a", 10.0),
            ("s", "b", 10.0),
            ("a", "t", 10.0),
            ("b", "t", 10.0),
            ("a", "b", 5.0),
        ],
    )
}

fn single_bottleneck() -> CapacitatedGraph<f64> {
    build(
        &["s", "a", "b", "t"],
        &[("s", "a", 10.0), ("a", "b", 5.0), ("b", "t", 10.0)],
    )
}

fn disconnected_sink() -> CapacitatedGraph<f64> {
    build(&["s", "a", "t"], &[("s", "a", 10.0)])
}

fn parallel_edges() -> CapacitatedGraph<f64> {
    build(
        &["s", "a", "t"],
        &[("s", "a", 3.0), ("s", "a", 4.0), ("a", "t", 10.0)],
    )
}

fn clrs_network() -> CapacitatedGraph<f64> {
    build(
        &["s", "v1", "v2", "v3", "v4", "t"],
        &[
            ("s", "v1", 16.0),
            ("s", "v2", 13.0),
            ("v1", "v3", 12.0),
            ("v2", "v1", 4.0),
            ("v2", "v4", 14.0),
            ("v3", "v2", 9.0),
            ("v3", "t", 20.0),
            ("v4", "v3", 7.0),
            ("v4", "t", 4.0),
        ],
    )
}

fn fractional() -> CapacitatedGraph<f64> {
    build(&["s", "a", "t"], &[("s", "a", 2.5), ("a", "t", 1.25)])
}

#[rstest]
#[case::diamond(diamond(), 20.0)]
#[case::single_bottleneck(single_bottleneck(), 5.0)]
#[case::disconnected_sink(disconnected_sink(), 0.0)]
#[case::parallel_edges(parallel_edges(), 7.0)]
#[case::clrs_network(clrs_network(), 23.0)]
#[case::fractional(fractional(), 1.25)]
fn all_three_algorithms_agree(#[case] graph: CapacitatedGraph<f64>, #[case] expected: f64) {
    let ford_fulkerson = FordFulkerson::default().solve(&graph);
    let scaling = CapacityScaling::default().solve(&graph);
    let mut preflow_graph = graph.clone();
    let preflow = PreflowPush::default().solve(&mut preflow_graph);

    assert!((ford_fulkerson - expected).abs() < EPS, "ford-fulkerson: {ford_fulkerson}");
    assert!((scaling - expected).abs() < EPS, "capacity scaling: {scaling}");
    assert!((preflow - expected).abs() < EPS, "preflow push: {preflow}");
}

#[rstest]
#[case::diamond(diamond())]
#[case::single_bottleneck(single_bottleneck())]
#[case::parallel_edges(parallel_edges())]
#[case::clrs_network(clrs_network())]
fn preflow_push_flow_conserves_at_every_inner_vertex(#[case] mut graph: CapacitatedGraph<f64>) {
    PreflowPush::default().solve(&mut graph);
    let s = graph.vertex_by_name("s").unwrap();
    let t = graph.vertex_by_name("t").unwrap();
    for v in 0..graph.num_vertices() {
        if v != s && v != t {
            assert!(graph.net_flow(v).abs() < EPS, "vertex {} unbalanced", graph.vertex(v).name());
        }
    }
}

#[rstest]
#[case::diamond(diamond())]
#[case::parallel_edges(parallel_edges())]
#[case::clrs_network(clrs_network())]
fn preflow_push_flow_stays_within_capacity(#[case] mut graph: CapacitatedGraph<f64>) {
    PreflowPush::default().solve(&mut graph);
    for edge in graph.edges() {
        assert!(edge.flow >= -EPS, "negative flow on {} -> {}", edge.from, edge.to);
        assert!(edge.flow <= edge.capacity + EPS, "overfull edge {} -> {}", edge.from, edge.to);
    }
}

#[rstest]
#[case::diamond(diamond())]
#[case::single_bottleneck(single_bottleneck())]
#[case::clrs_network(clrs_network())]
fn final_assignment_admits_no_augmenting_path(#[case] mut graph: CapacitatedGraph<f64>) {
    PreflowPush::default().solve(&mut graph);
    let residual = positive_subgraph(&residual_graph(&graph));
    assert_eq!(shortest_augmenting_path(&residual), PathSearch::Exhausted);
}

#[test]
fn preflow_push_matches_net_outflow_of_the_source() {
    let mut graph = clrs_network();
    let value = PreflowPush::default().solve(&mut graph);
    let s = graph.vertex_by_name("s").unwrap();
    assert!((graph.net_flow(s) - value).abs() < EPS);
}

#[test]
fn graphs_missing_an_endpoint_yield_zero_flow() {
    let no_sink = build(&["s", "a"], &[("s", "a", 4.0)]);
    assert_eq!(FordFulkerson::default().solve(&no_sink), 0.0);
    assert_eq!(CapacityScaling::default().solve(&no_sink), 0.0);

    let no_source = build(&["a", "t"], &[("a", "t", 4.0)]);
    assert_eq!(FordFulkerson::default().solve(&no_source), 0.0);
    assert_eq!(CapacityScaling::default().solve(&no_source), 0.0);
    let mut no_source = no_source;
    assert_eq!(PreflowPush::default().solve(&mut no_source), 0.0);
}
