use jiff::SignedDuration;
use rand::Rng;
use tracing::{debug, info};

use crate::network::edge::{Direction, Edge, EdgeIdx, Orientation};
use crate::network::graph::Graph;
use crate::solver::conflicts::find_conflicts;
use crate::solver::local_search::{LocalSearch, LocalSearchRun};
use crate::solver::random::randomize;
use crate::solver::score::{global_score, max_global_score, satisfied_count};
use crate::solver::solver_params::SolverParams;
use crate::solver::statistics::RunStatistics;

/// The orientation engine: owns the conflict-edge list and drives the
/// algorithms over a [`Graph`]. Everything except [`analyze`] requires
/// that [`analyze`] ran first; calling out of order is a bug and panics.
///
/// [`analyze`]: OrientationSolver::analyze
pub struct OrientationSolver {
    params: SolverParams,
    conflict_edges: Vec<EdgeIdx>,
    analyzed: bool,
}

impl OrientationSolver {
    pub fn new(params: SolverParams) -> Self {
        OrientationSolver {
            params,
            conflict_edges: Vec::new(),
            analyzed: false,
        }
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Enumerates paths and splits the undirected edges into fixed,
    /// conflict and unused.
    pub fn analyze(&mut self, graph: &mut Graph) {
        graph.find_paths_above(self.params.max_path_length, self.params.weight_threshold);
        self.conflict_edges = find_conflicts(graph);
        self.analyzed = true;
        info!(
            paths = graph.paths().len(),
            conflict_edges = self.conflict_edges.len(),
            max_score = max_global_score(graph),
            "Analysis complete"
        );
    }

    fn assert_analyzed(&self) {
        assert!(self.analyzed, "conflict analysis has not run");
    }

    pub fn conflict_edges(&self) -> &[EdgeIdx] {
        self.assert_analyzed();
        &self.conflict_edges
    }

    /// Snapshot of the conflict-edge orientation vector, in conflict order.
    pub fn save_orientations(&self, graph: &Graph) -> Vec<Orientation> {
        self.assert_analyzed();
        self.conflict_edges
            .iter()
            .map(|&edge| graph.edge(edge).orientation())
            .collect()
    }

    /// Restores a snapshot taken by [`save_orientations`](Self::save_orientations).
    pub fn load_orientations(&self, graph: &mut Graph, saved: &[Orientation]) {
        self.assert_analyzed();
        assert_eq!(
            saved.len(),
            self.conflict_edges.len(),
            "orientation vector length mismatch"
        );
        for (&idx, &orientation) in self.conflict_edges.iter().zip(saved) {
            match graph.edge_mut(idx) {
                Edge::Undirected(edge) => edge.restore_orientation(orientation),
                Edge::Directed(_) => unreachable!("conflict list holds a directed edge"),
            }
        }
        graph.graph_state_changed();
    }

    pub fn randomize<R: Rng>(&self, graph: &mut Graph, rng: &mut R) {
        self.assert_analyzed();
        randomize(graph, &self.conflict_edges, rng);
    }

    pub fn run_local_search(&self, graph: &mut Graph) -> LocalSearchRun {
        self.assert_analyzed();
        LocalSearch::new(&self.conflict_edges).run(graph)
    }

    /// Random restarts: randomize, optionally local-search, keep the best
    /// configuration seen and restore it at the end.
    pub fn run_random<R: Rng>(&self, graph: &mut Graph, rng: &mut R) -> f64 {
        self.assert_analyzed();
        let mut best_score = f64::NEG_INFINITY;
        let mut best: Option<Vec<Orientation>> = None;
        for restart in 0..self.params.restarts.max(1) {
            self.randomize(graph, rng);
            if self.params.local_search {
                self.run_local_search(graph);
            }
            let score = global_score(graph);
            debug!("Restart {}: score {}", restart, score);
            if score > best_score {
                best_score = score;
                best = Some(self.save_orientations(graph));
            }
        }
        if let Some(best) = best {
            self.load_orientations(graph, &best);
        }
        best_score
    }

    /// Applies an external solver assignment, one direction per conflict
    /// edge in conflict order.
    pub fn apply_solution(&self, graph: &mut Graph, directions: &[Direction]) {
        self.assert_analyzed();
        assert_eq!(
            directions.len(),
            self.conflict_edges.len(),
            "solution length mismatch"
        );
        for (&idx, &direction) in self.conflict_edges.iter().zip(directions) {
            match graph.edge_mut(idx) {
                Edge::Undirected(edge) => edge.set_orientation(direction),
                Edge::Directed(_) => unreachable!("conflict list holds a directed edge"),
            }
        }
        graph.graph_state_changed();
    }

    pub fn statistics(&self, graph: &Graph, elapsed: SignedDuration) -> RunStatistics {
        self.assert_analyzed();
        RunStatistics::collect(graph, &self.params, &self.conflict_edges, elapsed)
    }
}

/// Convenience wrapper for logging a final score line.
pub fn report_scores(graph: &Graph) {
    info!(
        global_score = global_score(graph),
        max_global_score = max_global_score(graph),
        satisfied_paths = satisfied_count(graph),
        total_paths = graph.paths().len(),
        "Scoring complete"
    );
}
