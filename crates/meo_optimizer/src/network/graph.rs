use std::cell::RefCell;

use fixedbitset::FixedBitSet;
use fxhash::FxHashMap;
use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::error::MeoError;
use crate::network::edge::{DirectedEdge, Direction, Edge, EdgeIdx, UndirectedEdge};
use crate::network::path::{Path, PathIdx, Stats};
use crate::network::vertex::{Vertex, VertexIdx};

/// Paths whose best-case weight does not exceed this are dropped at emit.
pub const WEIGHT_THRESHOLD: f64 = 0.0;

/// Which incident edges count towards a vertex degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegreeFilter {
    All,
    OrientedOnly,
    UndirectedOnly,
}

/// Vertex/edge registry and path enumerator.
///
/// The graph owns every vertex, edge and path; cross-references between
/// them are index newtypes into the arenas here. Degree queries are
/// memoized until the next orientation change.
#[derive(Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    vertex_names: FxHashMap<String, VertexIdx>,
    edges: Vec<Edge>,
    directed_edges: Vec<EdgeIdx>,
    undirected_edges: Vec<EdgeIdx>,
    sources: Vec<VertexIdx>,
    targets: Vec<VertexIdx>,
    paths: Vec<Path>,
    degree_cache: RefCell<FxHashMap<(VertexIdx, DegreeFilter), usize>>,
}

struct PathCandidate {
    vertices: SmallVec<[VertexIdx; 8]>,
    edges: SmallVec<[EdgeIdx; 8]>,
    directions: SmallVec<[Direction; 8]>,
    max_weight: f64,
    edge_weights: Stats,
    vertex_degrees: Stats,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Looks up or registers a vertex by name. Names are unique and `_`
    /// is reserved.
    pub fn ensure_vertex(&mut self, name: &str) -> Result<VertexIdx, MeoError> {
        if let Some(&idx) = self.vertex_names.get(name) {
            return Ok(idx);
        }
        if name.contains('_') {
            return Err(MeoError::ReservedName {
                name: name.to_owned(),
            });
        }
        let idx = VertexIdx::new(self.vertices.len());
        self.vertices.push(Vertex::new(name.to_owned()));
        self.vertex_names.insert(name.to_owned(), idx);
        Ok(idx)
    }

    pub fn vertex_by_name(&self, name: &str) -> Option<VertexIdx> {
        self.vertex_names.get(name).copied()
    }

    pub fn vertex(&self, idx: VertexIdx) -> &Vertex {
        &self.vertices[idx]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn add_directed_edge(&mut self, from: VertexIdx, to: VertexIdx, weight: f64) -> EdgeIdx {
        let idx = EdgeIdx::new(self.edges.len());
        self.edges.push(Edge::Directed(DirectedEdge::new(from, to, weight)));
        self.vertices[from].push_out_edge(idx);
        self.directed_edges.push(idx);
        idx
    }

    pub fn add_undirected_edge(&mut self, a: VertexIdx, b: VertexIdx, weight: f64) -> EdgeIdx {
        let idx = EdgeIdx::new(self.edges.len());
        self.edges.push(Edge::Undirected(UndirectedEdge::new(a, b, weight)));
        self.vertices[a].push_undirected_edge(idx);
        if b != a {
            self.vertices[b].push_undirected_edge(idx);
        }
        self.undirected_edges.push(idx);
        idx
    }

    pub fn mark_source(&mut self, idx: VertexIdx) {
        if !self.vertices[idx].is_source() {
            self.vertices[idx].mark_source();
            self.sources.push(idx);
        }
    }

    pub fn mark_target(&mut self, idx: VertexIdx, target_weight: Option<f64>) {
        if let Some(weight) = target_weight {
            self.vertices[idx].set_target_weight(weight);
        }
        if !self.vertices[idx].is_target() {
            self.vertices[idx].mark_target();
            self.targets.push(idx);
        }
    }

    pub fn set_node_weight(&mut self, idx: VertexIdx, weight: f64) {
        self.vertices[idx].set_weight(weight);
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx]
    }

    pub fn edge_mut(&mut self, idx: EdgeIdx) -> &mut Edge {
        &mut self.edges[idx]
    }

    pub fn directed_edges(&self) -> &[EdgeIdx] {
        &self.directed_edges
    }

    pub fn undirected_edges(&self) -> &[EdgeIdx] {
        &self.undirected_edges
    }

    pub fn sources(&self) -> &[VertexIdx] {
        &self.sources
    }

    pub fn targets(&self) -> &[VertexIdx] {
        &self.targets
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn path(&self, idx: PathIdx) -> &Path {
        &self.paths[idx]
    }

    /// Degree of `v` under `filter`, memoized until the next orientation
    /// change.
    pub fn degree(&self, v: VertexIdx, filter: DegreeFilter) -> usize {
        if let Some(&degree) = self.degree_cache.borrow().get(&(v, filter)) {
            return degree;
        }
        let degree = self
            .edges
            .iter()
            .filter(|edge| {
                let (a, b) = edge.endpoints();
                if a != v && b != v {
                    return false;
                }
                match filter {
                    DegreeFilter::All => true,
                    DegreeFilter::OrientedOnly => edge.orientation().is_oriented(),
                    DegreeFilter::UndirectedOnly => !edge.is_directed(),
                }
            })
            .count();
        self.degree_cache.borrow_mut().insert((v, filter), degree);
        degree
    }

    /// Single entry point for cache invalidation. Must be called after
    /// every bulk orientation mutation: random init, local-search
    /// termination, solution scoring, orientation restore.
    pub fn graph_state_changed(&mut self) {
        self.degree_cache.borrow_mut().clear();
        let use_counts: Vec<usize> = self.edges.iter().map(Edge::use_count).collect();
        for path in &mut self.paths {
            path.refresh_edge_use(&use_counts);
        }
    }

    fn clear_paths(&mut self) {
        for edge in &mut self.edges {
            edge.clear_path_associations();
        }
        self.paths.clear();
    }

    /// Enumerates every simple source→target path of length 1..=`max_length`
    /// and registers each with the edges it crosses. Any previous path set
    /// is discarded first.
    pub fn find_paths(&mut self, max_length: usize) {
        self.find_paths_above(max_length, WEIGHT_THRESHOLD)
    }

    pub fn find_paths_above(&mut self, max_length: usize, weight_threshold: f64) {
        self.clear_paths();

        let mut candidates: Vec<PathCandidate> = Vec::new();
        let mut visited = FixedBitSet::with_capacity(self.vertices.len());
        let mut trail: Vec<(EdgeIdx, Direction, VertexIdx)> = Vec::with_capacity(max_length);

        for i in 0..self.sources.len() {
            let source = self.sources[i];
            visited.clear();
            visited.insert(source.get());
            self.descend(
                source,
                source,
                max_length,
                &mut visited,
                &mut trail,
                weight_threshold,
                &mut candidates,
            );
        }

        debug!(
            "Enumerated {} paths (max length {})",
            candidates.len(),
            max_length
        );

        for candidate in candidates {
            let path_idx = PathIdx::new(self.paths.len());
            for (&edge, &desired) in candidate.edges.iter().zip(&candidate.directions) {
                self.edges[edge].register_path(path_idx, desired);
            }
            self.paths.push(Path::new(
                candidate.vertices,
                candidate.edges,
                candidate.directions,
                candidate.max_weight,
                candidate.edge_weights,
                candidate.vertex_degrees,
            ));
        }

        self.graph_state_changed();
    }

    fn descend(
        &self,
        source: VertexIdx,
        v: VertexIdx,
        remaining: usize,
        visited: &mut FixedBitSet,
        trail: &mut Vec<(EdgeIdx, Direction, VertexIdx)>,
        weight_threshold: f64,
        out: &mut Vec<PathCandidate>,
    ) {
        if remaining == 0 {
            return;
        }
        let vertex = &self.vertices[v];
        for &edge_idx in vertex.out_edges().iter().chain(vertex.undirected_edges()) {
            let edge = &self.edges[edge_idx];
            let Some((next, direction)) = edge.traversal_from(v) else {
                continue;
            };
            if visited.contains(next.get()) {
                continue;
            }
            trail.push((edge_idx, direction, next));
            if self.vertices[next].is_target() {
                self.emit(source, trail, weight_threshold, out);
            }
            // a target may still sit mid-path; only revisits are forbidden
            visited.insert(next.get());
            self.descend(
                source,
                next,
                remaining - 1,
                visited,
                trail,
                weight_threshold,
                out,
            );
            visited.set(next.get(), false);
            trail.pop();
        }
    }

    fn emit(
        &self,
        source: VertexIdx,
        trail: &[(EdgeIdx, Direction, VertexIdx)],
        weight_threshold: f64,
        out: &mut Vec<PathCandidate>,
    ) {
        // a fixed edge pointing against the walk can never satisfy this path
        for &(edge_idx, direction, _) in trail {
            let orientation = self.edges[edge_idx].orientation();
            if orientation.is_fixed() && orientation.direction() != Some(direction) {
                return;
            }
        }

        let mut vertices: SmallVec<[VertexIdx; 8]> = smallvec![source];
        vertices.extend(trail.iter().map(|&(_, _, v)| v));
        let edges: SmallVec<[EdgeIdx; 8]> = trail.iter().map(|&(e, _, _)| e).collect();
        let directions: SmallVec<[Direction; 8]> = trail.iter().map(|&(_, d, _)| d).collect();

        let terminus = vertices[vertices.len() - 1];
        let mut max_weight = self.vertices[terminus].target_weight();
        for &v in &vertices {
            max_weight *= self.vertices[v].weight();
        }
        for &e in &edges {
            max_weight *= self.edges[e].weight();
        }
        if max_weight <= weight_threshold {
            return;
        }

        let edge_weights = Stats::over(edges.iter().map(|&e| self.edges[e].weight()));
        let vertex_degrees = Stats::over(
            vertices
                .iter()
                .map(|&v| self.degree(v, DegreeFilter::All) as f64),
        );

        out.push(PathCandidate {
            vertices,
            edges,
            directions,
            max_weight,
            edge_weights,
            vertex_degrees,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::edge_list::EdgeKind;
    use crate::test_utils::build_graph;

    #[test]
    fn test_underscore_is_reserved() {
        let mut graph = Graph::new();
        let err = graph.ensure_vertex("BAD_NAME").unwrap_err();
        assert!(matches!(err, MeoError::ReservedName { .. }));
    }

    #[test]
    fn test_ensure_vertex_is_idempotent() {
        let mut graph = Graph::new();
        let a = graph.ensure_vertex("A").unwrap();
        let b = graph.ensure_vertex("B").unwrap();
        assert_ne!(a, b);
        assert_eq!(graph.ensure_vertex("A").unwrap(), a);
        assert_eq!(graph.vertices().len(), 2);
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let edges = [
            ("A", EdgeKind::Undirected, "B", 0.9),
            ("A", EdgeKind::Undirected, "C", 0.8),
            ("B", EdgeKind::Undirected, "D", 0.7),
            ("C", EdgeKind::Undirected, "D", 0.6),
        ];
        let mut first = build_graph(&edges, &["A"], &[("D", None)]);
        first.find_paths(3);
        let mut second = build_graph(&edges, &["A"], &[("D", None)]);
        second.find_paths(3);

        assert_eq!(first.paths().len(), second.paths().len());
        for (p, q) in first.paths().iter().zip(second.paths()) {
            assert_eq!(p.vertices(), q.vertices());
            assert_eq!(p.edges(), q.edges());
        }
    }

    #[test]
    fn test_degree_cache_resets_on_state_change() {
        let mut graph = build_graph(
            &[
                ("A", EdgeKind::Undirected, "B", 0.9),
                ("B", EdgeKind::Directed, "C", 0.8),
            ],
            &["A"],
            &[("C", None)],
        );
        let b = graph.vertex_by_name("B").unwrap();
        assert_eq!(graph.degree(b, DegreeFilter::All), 2);
        assert_eq!(graph.degree(b, DegreeFilter::OrientedOnly), 1);
        assert_eq!(graph.degree(b, DegreeFilter::UndirectedOnly), 1);

        graph.find_paths(3);
        // nothing fixes A-B yet; orient it and invalidate
        let ab = graph.undirected_edges()[0];
        match graph.edge_mut(ab) {
            Edge::Undirected(edge) => edge.set_orientation(Direction::Forward),
            Edge::Directed(_) => unreachable!(),
        }
        graph.graph_state_changed();
        assert_eq!(graph.degree(b, DegreeFilter::OrientedOnly), 2);
    }

    #[test]
    fn test_self_loop_is_never_traversed() {
        let mut graph = build_graph(
            &[
                ("A", EdgeKind::Undirected, "A", 0.9),
                ("A", EdgeKind::Undirected, "B", 0.8),
            ],
            &["A"],
            &[("B", None)],
        );
        graph.find_paths(5);
        assert_eq!(graph.paths().len(), 1);
        assert_eq!(graph.paths()[0].len(), 1);
    }
}
