use fxhash::FxHashSet;
use jiff::SignedDuration;
use serde::Serialize;

use crate::network::edge::EdgeIdx;
use crate::network::graph::Graph;
use crate::solver::score::{global_score, max_global_score, satisfied_count};
use crate::solver::solver_params::SolverParams;

/// Summary of an orientation run, loggable and JSON-serializable.
#[derive(Debug, Serialize)]
pub struct RunStatistics {
    pub algorithm: &'static str,
    pub vertices: usize,
    pub directed_edges: usize,
    pub undirected_edges: usize,
    pub paths: usize,
    pub conflict_edges: usize,
    pub conflict_paths: usize,
    pub satisfied_paths: usize,
    pub global_score: f64,
    pub max_global_score: f64,
    pub restarts: usize,
    pub elapsed: SignedDuration,
}

impl RunStatistics {
    pub(crate) fn collect(
        graph: &Graph,
        params: &SolverParams,
        conflict_edges: &[EdgeIdx],
        elapsed: SignedDuration,
    ) -> RunStatistics {
        let conflict_set: FxHashSet<EdgeIdx> = conflict_edges.iter().copied().collect();
        let conflict_paths = graph
            .paths()
            .iter()
            .filter(|path| path.edges().iter().any(|edge| conflict_set.contains(edge)))
            .count();

        RunStatistics {
            algorithm: params.algorithm.name(),
            vertices: graph.vertices().len(),
            directed_edges: graph.directed_edges().len(),
            undirected_edges: graph.undirected_edges().len(),
            paths: graph.paths().len(),
            conflict_edges: conflict_edges.len(),
            conflict_paths,
            satisfied_paths: satisfied_count(graph),
            global_score: global_score(graph),
            max_global_score: max_global_score(graph),
            restarts: params.restarts,
            elapsed,
        }
    }
}
