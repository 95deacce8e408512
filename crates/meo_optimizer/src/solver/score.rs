use crate::network::edge::EdgeIdx;
use crate::network::graph::Graph;

/// Sum of weights of currently satisfied paths.
pub fn global_score(graph: &Graph) -> f64 {
    graph
        .paths()
        .iter()
        .map(|path| path.weight(graph.edges()))
        .sum()
}

/// Upper bound with every path satisfied at once; generally unattainable.
pub fn max_global_score(graph: &Graph) -> f64 {
    graph.paths().iter().map(|path| path.max_weight()).sum()
}

pub fn satisfied_count(graph: &Graph) -> usize {
    graph
        .paths()
        .iter()
        .filter(|path| path.is_satisfied(graph.edges()))
        .count()
}

/// Change in global score if `edge` were flipped. Computed from the edge's
/// association set alone: each associated path is re-tested with the flip
/// applied hypothetically, everything else untouched.
pub fn flip_delta(graph: &Graph, edge: EdgeIdx) -> f64 {
    graph
        .edge(edge)
        .associations()
        .iter()
        .map(|association| {
            let path = graph.path(association.path);
            path.weight_if_flipped(graph.edges(), edge) - path.weight(graph.edges())
        })
        .sum()
}
