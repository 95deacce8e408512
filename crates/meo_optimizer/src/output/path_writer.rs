use std::io::{self, Write};

use crate::network::graph::Graph;
use crate::network::path::PathIdx;
use crate::output::ranking::PathRanking;

/// Writes every enumerated path with its satisfaction state, ordered by
/// `ranking`. The sort is stable, so equal keys keep enumeration order.
pub fn write_paths<W: Write>(graph: &Graph, ranking: PathRanking, mut out: W) -> io::Result<()> {
    let mut order: Vec<PathIdx> = (0..graph.paths().len()).map(PathIdx::new).collect();
    order.sort_by(|&a, &b| ranking.compare(graph.path(a), graph.path(b)));

    writeln!(out, "Path\tIs satisfied?\tPath weight")?;
    for idx in order {
        let path = graph.path(idx);
        let names = path
            .vertices()
            .iter()
            .map(|&v| graph.vertex(v).name())
            .collect::<Vec<_>>()
            .join(":");
        writeln!(
            out,
            "{}\t{}\t{}",
            names,
            path.is_satisfied(graph.edges()),
            path.max_weight(),
        )?;
    }
    Ok(())
}
