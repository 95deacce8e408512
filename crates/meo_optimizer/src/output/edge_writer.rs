use std::io::{self, Write};

use crate::network::edge::{Edge, Orientation};
use crate::network::graph::Graph;
use crate::network::vertex::VertexIdx;

/// Writes every edge lying on at least one satisfied path, directed edges
/// first, each group in insertion order. The `Oriented` column is true for
/// originally-directed edges and for undirected edges that now carry an
/// orientation.
pub fn write_edges<W: Write>(graph: &Graph, mut out: W) -> io::Result<()> {
    writeln!(out, "Source\tType\tTarget\tOriented\tWeight")?;
    for &idx in graph.directed_edges().iter().chain(graph.undirected_edges()) {
        let edge = graph.edge(idx);
        if !on_satisfied_path(graph, edge) {
            continue;
        }
        let (source, target) = oriented_endpoints(edge);
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            graph.vertex(source).name(),
            if edge.is_directed() { "pd" } else { "pp" },
            graph.vertex(target).name(),
            edge.orientation().is_oriented(),
            edge.weight(),
        )?;
    }
    Ok(())
}

fn on_satisfied_path(graph: &Graph, edge: &Edge) -> bool {
    edge.associations()
        .iter()
        .any(|association| graph.path(association.path).is_satisfied(graph.edges()))
}

fn oriented_endpoints(edge: &Edge) -> (VertexIdx, VertexIdx) {
    let (a, b) = edge.endpoints();
    match edge.orientation() {
        Orientation::Backward | Orientation::FixedBackward => (b, a),
        _ => (a, b),
    }
}
