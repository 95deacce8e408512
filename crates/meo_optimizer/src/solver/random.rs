use rand::Rng;
use tracing::debug;

use crate::network::edge::{Direction, Edge, EdgeIdx};
use crate::network::graph::Graph;

/// Orients every conflict edge by an independent fair coin from `rng`.
pub fn randomize<R: Rng>(graph: &mut Graph, conflicts: &[EdgeIdx], rng: &mut R) {
    for &idx in conflicts {
        let direction = if rng.random_bool(0.5) {
            Direction::Forward
        } else {
            Direction::Backward
        };
        match graph.edge_mut(idx) {
            Edge::Undirected(edge) => edge.set_orientation(direction),
            Edge::Directed(_) => unreachable!("conflict list holds a directed edge"),
        }
    }
    graph.graph_state_changed();
    debug!("Randomized {} conflict edges", conflicts.len());
}
