use crate::network::graph::Graph;
use crate::parsers::edge_list::EdgeKind;

/// Builds a graph from literal edge, source and target lists.
pub(crate) fn build_graph(
    edges: &[(&str, EdgeKind, &str, f64)],
    sources: &[&str],
    targets: &[(&str, Option<f64>)],
) -> Graph {
    let mut graph = Graph::new();
    for &(from, kind, to, weight) in edges {
        let from = graph.ensure_vertex(from).unwrap();
        let to = graph.ensure_vertex(to).unwrap();
        match kind {
            EdgeKind::Directed => graph.add_directed_edge(from, to, weight),
            EdgeKind::Undirected => graph.add_undirected_edge(from, to, weight),
        };
    }
    for &name in sources {
        let idx = graph.ensure_vertex(name).unwrap();
        graph.mark_source(idx);
    }
    for &(name, weight) in targets {
        let idx = graph.ensure_vertex(name).unwrap();
        graph.mark_target(idx, weight);
    }
    graph
}
