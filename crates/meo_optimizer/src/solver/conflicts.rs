use tracing::info;

use crate::network::edge::{Direction, Edge, EdgeIdx};
use crate::network::graph::Graph;

enum Classification {
    Unused,
    Agreed(Direction),
    Conflict,
}

fn classify(edge: &Edge) -> Classification {
    let mut wanted: Option<Direction> = None;
    for association in edge.associations() {
        match wanted {
            None => wanted = Some(association.desired),
            Some(direction) if direction == association.desired => {}
            Some(_) => return Classification::Conflict,
        }
    }
    match wanted {
        None => Classification::Unused,
        Some(direction) => Classification::Agreed(direction),
    }
}

/// Fixes every undirected edge whose associated paths agree on a single
/// direction and returns the edges wanted both ways. The returned order is
/// the undirected-list order and stays stable for the whole run; solution
/// vectors and CSP variable ids index into it.
pub fn find_conflicts(graph: &mut Graph) -> Vec<EdgeIdx> {
    let mut conflicts = Vec::new();
    let mut fixed = 0usize;
    let undirected: Vec<EdgeIdx> = graph.undirected_edges().to_vec();
    for idx in undirected {
        match classify(graph.edge(idx)) {
            Classification::Unused => {}
            Classification::Agreed(direction) => {
                match graph.edge_mut(idx) {
                    Edge::Undirected(edge) => edge.fix(direction),
                    Edge::Directed(_) => unreachable!("undirected list holds a directed edge"),
                }
                fixed += 1;
            }
            Classification::Conflict => conflicts.push(idx),
        }
    }
    graph.graph_state_changed();
    info!(
        "Conflict analysis: {} edges fixed, {} conflict edges",
        fixed,
        conflicts.len()
    );
    conflicts
}
