use tracing::debug;

use crate::network::edge::{Edge, EdgeIdx};
use crate::network::graph::Graph;
use crate::solver::score::{flip_delta, global_score};

#[derive(Debug, Clone, Copy)]
pub struct LocalSearchRun {
    pub iterations: usize,
    pub score: f64,
}

/// Steepest-ascent edge flip over the conflict set.
///
/// Each iteration flips the conflict edge with the largest strictly
/// positive flip delta; ties go to the first edge in conflict order. The
/// global score strictly increases per flip, so the loop is finite.
pub struct LocalSearch<'a> {
    conflicts: &'a [EdgeIdx],
}

impl<'a> LocalSearch<'a> {
    pub fn new(conflicts: &'a [EdgeIdx]) -> Self {
        LocalSearch { conflicts }
    }

    pub fn run(&self, graph: &mut Graph) -> LocalSearchRun {
        let mut iterations = 0;
        loop {
            let mut best_delta = 0.0;
            let mut best_edge: Option<EdgeIdx> = None;
            for &edge in self.conflicts {
                let delta = flip_delta(graph, edge);
                if delta > best_delta {
                    best_delta = delta;
                    best_edge = Some(edge);
                }
            }
            let Some(edge) = best_edge else { break };
            match graph.edge_mut(edge) {
                Edge::Undirected(e) => e.flip(),
                Edge::Directed(_) => unreachable!("conflict list holds a directed edge"),
            }
            iterations += 1;
            debug!("Flip edge {} (d={:+})", edge, best_delta);
        }
        graph.graph_state_changed();
        LocalSearchRun {
            iterations,
            score: global_score(graph),
        }
    }
}
