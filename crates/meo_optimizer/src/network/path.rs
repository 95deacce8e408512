use smallvec::SmallVec;

use crate::arena_index;
use crate::network::edge::{Direction, Edge, EdgeIdx};
use crate::network::vertex::VertexIdx;

arena_index!(PathIdx => Path);

/// min/avg/max summary of a per-edge or per-vertex quantity.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Stats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Stats {
    pub fn over(values: impl IntoIterator<Item = f64>) -> Stats {
        // -inf sentinel; the summarized quantities are non-negative
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        for value in values {
            min = min.min(value);
            max = max.max(value);
            sum += value;
            count += 1;
        }
        assert!(count > 0, "stats over an empty sequence");
        Stats {
            min,
            avg: sum / count as f64,
            max,
        }
    }

    fn zero() -> Stats {
        Stats {
            min: 0.0,
            avg: 0.0,
            max: 0.0,
        }
    }
}

/// A simple source→target path, snapshotted from the enumeration stack.
///
/// `max_weight` and the edge-weight/vertex-degree summaries are cached at
/// construction and never change; the edge-use summary depends on the
/// current orientations and is refreshed through
/// [`Graph::graph_state_changed`](crate::network::graph::Graph::graph_state_changed).
pub struct Path {
    vertices: SmallVec<[VertexIdx; 8]>,
    edges: SmallVec<[EdgeIdx; 8]>,
    directions: SmallVec<[Direction; 8]>,
    max_weight: f64,
    edge_weights: Stats,
    vertex_degrees: Stats,
    edge_use: Stats,
}

impl Path {
    pub(crate) fn new(
        vertices: SmallVec<[VertexIdx; 8]>,
        edges: SmallVec<[EdgeIdx; 8]>,
        directions: SmallVec<[Direction; 8]>,
        max_weight: f64,
        edge_weights: Stats,
        vertex_degrees: Stats,
    ) -> Self {
        Path {
            vertices,
            edges,
            directions,
            max_weight,
            edge_weights,
            vertex_degrees,
            edge_use: Stats::zero(),
        }
    }

    pub fn vertices(&self) -> &[VertexIdx] {
        &self.vertices
    }

    pub fn edges(&self) -> &[EdgeIdx] {
        &self.edges
    }

    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn terminus(&self) -> VertexIdx {
        self.vertices[self.vertices.len() - 1]
    }

    /// Weight this path contributes when every edge cooperates.
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn edge_weights(&self) -> Stats {
        self.edge_weights
    }

    pub fn vertex_degrees(&self) -> Stats {
        self.vertex_degrees
    }

    pub fn edge_use(&self) -> Stats {
        self.edge_use
    }

    /// Whether every edge is unoriented or oriented the way this path
    /// travels it.
    pub fn is_satisfied(&self, edges: &[Edge]) -> bool {
        self.edges
            .iter()
            .zip(&self.directions)
            .all(|(&edge, &desired)| edges[edge].admits(desired))
    }

    /// `max_weight` when satisfied, zero otherwise.
    pub fn weight(&self, edges: &[Edge]) -> f64 {
        if self.is_satisfied(edges) {
            self.max_weight
        } else {
            0.0
        }
    }

    /// Path weight with `flipped` hypothetically reversed.
    pub fn weight_if_flipped(&self, edges: &[Edge], flipped: EdgeIdx) -> f64 {
        let satisfied = self.edges.iter().zip(&self.directions).all(|(&edge, &desired)| {
            let orientation = if edge == flipped {
                edges[edge].orientation().reversed()
            } else {
                edges[edge].orientation()
            };
            orientation.admits(desired)
        });
        if satisfied { self.max_weight } else { 0.0 }
    }

    pub(crate) fn refresh_edge_use(&mut self, use_counts: &[usize]) {
        self.edge_use = Stats::over(self.edges.iter().map(|&edge| use_counts[edge.get()] as f64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_over() {
        let stats = Stats::over([0.2, 0.8, 0.5]);
        assert_eq!(stats.min, 0.2);
        assert_eq!(stats.max, 0.8);
        assert!((stats.avg - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_stats_over_single_value() {
        let stats = Stats::over([0.7]);
        assert_eq!(stats.min, 0.7);
        assert_eq!(stats.avg, 0.7);
        assert_eq!(stats.max, 0.7);
    }

    #[test]
    #[should_panic(expected = "stats over an empty sequence")]
    fn test_stats_over_empty() {
        Stats::over([]);
    }
}
