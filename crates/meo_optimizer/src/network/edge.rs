use std::fmt::Display;

use crate::arena_index;
use crate::network::path::PathIdx;
use crate::network::vertex::VertexIdx;

arena_index!(EdgeIdx => Edge);

/// Direction of travel along an edge, relative to its stored endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// Orientation state of an undirected edge. `Forward` means a→b for stored
/// endpoints (a, b). The fixed states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Unoriented,
    Forward,
    Backward,
    FixedForward,
    FixedBackward,
}

impl Orientation {
    pub fn of(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Orientation::Forward,
            Direction::Backward => Orientation::Backward,
        }
    }

    pub fn fixed(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Orientation::FixedForward,
            Direction::Backward => Orientation::FixedBackward,
        }
    }

    pub fn is_fixed(self) -> bool {
        matches!(self, Orientation::FixedForward | Orientation::FixedBackward)
    }

    pub fn is_oriented(self) -> bool {
        !matches!(self, Orientation::Unoriented)
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Orientation::Unoriented => None,
            Orientation::Forward | Orientation::FixedForward => Some(Direction::Forward),
            Orientation::Backward | Orientation::FixedBackward => Some(Direction::Backward),
        }
    }

    /// Whether a path wanting to traverse in `desired` can currently pass.
    pub fn admits(self, desired: Direction) -> bool {
        match self.direction() {
            None => true,
            Some(direction) => direction == desired,
        }
    }

    /// The orientation with its direction inverted; unoriented stays put.
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Unoriented => Orientation::Unoriented,
            Orientation::Forward => Orientation::Backward,
            Orientation::Backward => Orientation::Forward,
            Orientation::FixedForward => Orientation::FixedBackward,
            Orientation::FixedBackward => Orientation::FixedForward,
        }
    }
}

/// One path crossing an edge, with the direction that path needs.
#[derive(Debug, Clone, Copy)]
pub struct PathAssociation {
    pub path: PathIdx,
    pub desired: Direction,
}

#[derive(Debug)]
pub struct DirectedEdge {
    from: VertexIdx,
    to: VertexIdx,
    weight: f64,
    paths: Vec<PathAssociation>,
}

impl DirectedEdge {
    pub(crate) fn new(from: VertexIdx, to: VertexIdx, weight: f64) -> Self {
        DirectedEdge {
            from,
            to,
            weight,
            paths: Vec::new(),
        }
    }

    pub fn source(&self) -> VertexIdx {
        self.from
    }

    pub fn target(&self) -> VertexIdx {
        self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

#[derive(Debug)]
pub struct UndirectedEdge {
    a: VertexIdx,
    b: VertexIdx,
    weight: f64,
    orientation: Orientation,
    paths: Vec<PathAssociation>,
}

impl UndirectedEdge {
    pub(crate) fn new(a: VertexIdx, b: VertexIdx, weight: f64) -> Self {
        UndirectedEdge {
            a,
            b,
            weight,
            orientation: Orientation::Unoriented,
            paths: Vec::new(),
        }
    }

    pub fn endpoints(&self) -> (VertexIdx, VertexIdx) {
        (self.a, self.b)
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, direction: Direction) {
        assert!(
            !self.orientation.is_fixed(),
            "orientation change on a fixed edge"
        );
        self.orientation = Orientation::of(direction);
    }

    pub fn fix(&mut self, direction: Direction) {
        assert!(!self.orientation.is_fixed(), "edge fixed twice");
        self.orientation = Orientation::fixed(direction);
    }

    pub fn flip(&mut self) {
        match self.orientation {
            Orientation::Forward => self.orientation = Orientation::Backward,
            Orientation::Backward => self.orientation = Orientation::Forward,
            other => panic!("flip of a {other:?} edge"),
        }
    }

    pub(crate) fn restore_orientation(&mut self, orientation: Orientation) {
        assert!(
            !self.orientation.is_fixed() && !orientation.is_fixed(),
            "orientation restore on a fixed edge"
        );
        self.orientation = orientation;
    }
}

/// An edge of the network. Only the undirected variant ever mutates, and
/// only through the orientation methods above; engine code pattern-matches
/// to reach them.
#[derive(Debug)]
pub enum Edge {
    Directed(DirectedEdge),
    Undirected(UndirectedEdge),
}

impl Edge {
    pub fn endpoints(&self) -> (VertexIdx, VertexIdx) {
        match self {
            Edge::Directed(edge) => (edge.source(), edge.target()),
            Edge::Undirected(edge) => edge.endpoints(),
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Edge::Directed(edge) => edge.weight(),
            Edge::Undirected(edge) => edge.weight(),
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, Edge::Directed(_))
    }

    /// A directed edge reads as fixed-forward so that orientation queries
    /// need not care about the variant.
    pub fn orientation(&self) -> Orientation {
        match self {
            Edge::Directed(_) => Orientation::FixedForward,
            Edge::Undirected(edge) => edge.orientation(),
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.orientation().is_fixed()
    }

    pub fn admits(&self, desired: Direction) -> bool {
        self.orientation().admits(desired)
    }

    pub fn associations(&self) -> &[PathAssociation] {
        match self {
            Edge::Directed(edge) => &edge.paths,
            Edge::Undirected(edge) => &edge.paths,
        }
    }

    pub(crate) fn register_path(&mut self, path: PathIdx, desired: Direction) {
        let association = PathAssociation { path, desired };
        match self {
            Edge::Directed(edge) => edge.paths.push(association),
            Edge::Undirected(edge) => edge.paths.push(association),
        }
    }

    pub(crate) fn clear_path_associations(&mut self) {
        match self {
            Edge::Directed(edge) => edge.paths.clear(),
            Edge::Undirected(edge) => edge.paths.clear(),
        }
    }

    /// Number of associated paths that can use this edge as currently
    /// oriented.
    pub fn use_count(&self) -> usize {
        let orientation = self.orientation();
        self.associations()
            .iter()
            .filter(|association| orientation.admits(association.desired))
            .count()
    }

    /// Where this edge leads when entered at `v`, with the direction of
    /// travel; `None` when the edge cannot be left from `v`. Orientation
    /// state does not restrict traversal here, only the edge kind does.
    pub fn traversal_from(&self, v: VertexIdx) -> Option<(VertexIdx, Direction)> {
        match self {
            Edge::Directed(edge) => {
                (v == edge.source()).then(|| (edge.target(), Direction::Forward))
            }
            Edge::Undirected(edge) => {
                let (a, b) = edge.endpoints();
                if v == a {
                    Some((b, Direction::Forward))
                } else if v == b {
                    Some((a, Direction::Backward))
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_admits() {
        assert!(Orientation::Unoriented.admits(Direction::Forward));
        assert!(Orientation::Unoriented.admits(Direction::Backward));
        assert!(Orientation::Forward.admits(Direction::Forward));
        assert!(!Orientation::Forward.admits(Direction::Backward));
        assert!(Orientation::FixedBackward.admits(Direction::Backward));
        assert!(!Orientation::FixedBackward.admits(Direction::Forward));
    }

    #[test]
    fn test_flip_toggles_direction() {
        let mut edge = UndirectedEdge::new(VertexIdx::new(0), VertexIdx::new(1), 0.5);
        edge.set_orientation(Direction::Forward);
        edge.flip();
        assert_eq!(edge.orientation(), Orientation::Backward);
        edge.flip();
        assert_eq!(edge.orientation(), Orientation::Forward);
    }

    #[test]
    #[should_panic(expected = "orientation change on a fixed edge")]
    fn test_fixed_edge_rejects_set() {
        let mut edge = UndirectedEdge::new(VertexIdx::new(0), VertexIdx::new(1), 0.5);
        edge.fix(Direction::Forward);
        edge.set_orientation(Direction::Backward);
    }

    #[test]
    #[should_panic(expected = "flip of a Unoriented edge")]
    fn test_unoriented_edge_rejects_flip() {
        let mut edge = UndirectedEdge::new(VertexIdx::new(0), VertexIdx::new(1), 0.5);
        edge.flip();
    }

    #[test]
    fn test_directed_edge_traversal() {
        let edge = Edge::Directed(DirectedEdge::new(VertexIdx::new(3), VertexIdx::new(7), 1.0));
        assert_eq!(
            edge.traversal_from(VertexIdx::new(3)),
            Some((VertexIdx::new(7), Direction::Forward))
        );
        assert_eq!(edge.traversal_from(VertexIdx::new(7)), None);
    }

    #[test]
    fn test_undirected_edge_traversal_both_ways() {
        let edge = Edge::Undirected(UndirectedEdge::new(VertexIdx::new(3), VertexIdx::new(7), 1.0));
        assert_eq!(
            edge.traversal_from(VertexIdx::new(3)),
            Some((VertexIdx::new(7), Direction::Forward))
        );
        assert_eq!(
            edge.traversal_from(VertexIdx::new(7)),
            Some((VertexIdx::new(3), Direction::Backward))
        );
        assert_eq!(edge.traversal_from(VertexIdx::new(5)), None);
    }
}
