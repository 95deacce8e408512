use std::cmp::Ordering;

use crate::network::path::Path;

/// Sort key for the path output writer. All orderings are descending on
/// the keyed statistic, ties fall back to path weight. The keyed values
/// are weights in (0, 1] or counts, so NaN never appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathRanking {
    #[default]
    PathWeight,
    MaxEdgeWeight,
    AvgEdgeWeight,
    MinEdgeWeight,
    MaxEdgeUse,
    AvgEdgeUse,
    MinEdgeUse,
    MaxVertexDegree,
    AvgVertexDegree,
    MinVertexDegree,
}

impl PathRanking {
    /// Parses the `path.output.sort` property value.
    pub fn parse(value: &str) -> Option<PathRanking> {
        Some(match value {
            "pathWeight" => PathRanking::PathWeight,
            "maxEdgeWeight" => PathRanking::MaxEdgeWeight,
            "avgEdgeWeight" => PathRanking::AvgEdgeWeight,
            "minEdgeWeight" => PathRanking::MinEdgeWeight,
            "maxEdgeUse" => PathRanking::MaxEdgeUse,
            "avgEdgeUse" => PathRanking::AvgEdgeUse,
            "minEdgeUse" => PathRanking::MinEdgeUse,
            "maxVertexDegree" => PathRanking::MaxVertexDegree,
            "avgVertexDegree" => PathRanking::AvgVertexDegree,
            "minVertexDegree" => PathRanking::MinVertexDegree,
            _ => return None,
        })
    }

    fn key(&self, path: &Path) -> f64 {
        match self {
            PathRanking::PathWeight => path.max_weight(),
            PathRanking::MaxEdgeWeight => path.edge_weights().max,
            PathRanking::AvgEdgeWeight => path.edge_weights().avg,
            PathRanking::MinEdgeWeight => path.edge_weights().min,
            PathRanking::MaxEdgeUse => path.edge_use().max,
            PathRanking::AvgEdgeUse => path.edge_use().avg,
            PathRanking::MinEdgeUse => path.edge_use().min,
            PathRanking::MaxVertexDegree => path.vertex_degrees().max,
            PathRanking::AvgVertexDegree => path.vertex_degrees().avg,
            PathRanking::MinVertexDegree => path.vertex_degrees().min,
        }
    }

    pub fn compare(&self, a: &Path, b: &Path) -> Ordering {
        self.key(b)
            .total_cmp(&self.key(a))
            .then_with(|| b.max_weight().total_cmp(&a.max_weight()))
    }
}
