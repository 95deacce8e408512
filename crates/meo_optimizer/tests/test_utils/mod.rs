use rand::RngCore;

use meo_optimizer::network::edge::Direction;
use meo_optimizer::network::graph::Graph;
use meo_optimizer::parsers::edge_list::EdgeKind;

/// Builds a graph from literal edge, source and target lists.
pub fn build_graph(
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

/// One undirected edge between X and Y wanted both ways: a 0.3 path needs X→Y, a 0.5
/// path needs Y→X, and two direct-only paths (0.3 and 0.5) are always
/// satisfied.
pub fn single_conflict_graph() -> Graph {
    build_graph(
        &[
            ("s1", EdgeKind::Directed, "X", 0.3),
            ("X", EdgeKind::Undirected, "Y", 1.0),
            ("Y", EdgeKind::Directed, "t1", 1.0),
            ("s2", EdgeKind::Directed, "Y", 0.5),
            ("X", EdgeKind::Directed, "t2", 1.0),
        ],
        &["s1", "s2"],
        &[("t1", None), ("t2", None)],
    )
}

/// A four-cycle of undirected edges where every edge is wanted both ways,
/// giving four conflict edges and eight enumerated paths.
pub fn ring_conflict_graph() -> Graph {
    build_graph(
        &[
            ("A", EdgeKind::Undirected, "B", 0.9),
            ("B", EdgeKind::Undirected, "C", 0.8),
            ("C", EdgeKind::Undirected, "D", 0.7),
            ("D", EdgeKind::Undirected, "A", 0.6),
        ],
        &["A", "C"],
        &[("B", None), ("D", None)],
    )
}

/// Scripts the coin flips of the random initializer so a test dictates
/// the exact direction each conflict edge receives, in conflict order.
/// The script wraps around when more flips are drawn than were given.
pub struct ScriptedCoinRng {
    directions: Vec<Direction>,
    index: usize,
}

impl ScriptedCoinRng {
    pub fn new(directions: Vec<Direction>) -> Self {
        ScriptedCoinRng {
            directions,
            index: 0,
        }
    }
}

impl RngCore for ScriptedCoinRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        // a fair coin reads one u64 and compares its high bits against
        // the midpoint: all-zero lands forward, all-one lands backward
        let direction = self.directions[self.index % self.directions.len()];
        self.index = (self.index + 1) % self.directions.len();
        match direction {
            Direction::Forward => 0,
            Direction::Backward => u64::MAX,
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}
