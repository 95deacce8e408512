use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::MeoError;
use crate::network::graph::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Undirected,
    Directed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub from: String,
    pub kind: EdgeKind,
    pub to: String,
    pub weight: f64,
}

/// Parses the edge list format, one edge per line:
/// `name1 (pp) name2 = weight` for an undirected edge,
/// `name1 (pd) name2 = weight` for a directed edge name1→name2.
pub fn parse(text: &str) -> Result<Vec<EdgeRecord>, MeoError> {
    let mut records = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let record = parse_line(line).map_err(|reason| MeoError::Parse {
            line: i + 1,
            reason,
        })?;
        records.push(record);
    }
    Ok(records)
}

fn parse_line(line: &str) -> Result<EdgeRecord, String> {
    let (edge_part, weight_part) = line
        .split_once('=')
        .ok_or_else(|| format!("missing `= weight` in `{line}`"))?;
    let weight_token = weight_part.trim();
    let weight: f64 = weight_token
        .parse()
        .map_err(|_| format!("invalid weight `{weight_token}`"))?;
    if !(weight > 0.0 && weight <= 1.0) {
        return Err(format!("edge weight {weight} outside (0, 1]"));
    }

    let mut tokens = edge_part.split_whitespace();
    let (Some(from), Some(kind), Some(to), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(format!("expected `name1 (pp|pd) name2 = weight`, got `{line}`"));
    };
    let kind = match kind {
        "(pp)" => EdgeKind::Undirected,
        "(pd)" => EdgeKind::Directed,
        other => return Err(format!("unknown edge type `{other}`")),
    };
    for name in [from, to] {
        if name.contains('_') {
            return Err(format!("reserved character '_' in vertex name `{name}`"));
        }
    }
    Ok(EdgeRecord {
        from: from.to_owned(),
        kind,
        to: to.to_owned(),
        weight,
    })
}

/// Reads an edge file into the graph, auto-registering unknown vertices
/// with node weight 1.
pub fn load<P: AsRef<Path>>(graph: &mut Graph, path: P) -> Result<(), MeoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MeoError::Io {
        path: path.to_owned(),
        source,
    })?;
    let records = parse(&text)?;
    for record in &records {
        let from = graph.ensure_vertex(&record.from)?;
        let to = graph.ensure_vertex(&record.to)?;
        match record.kind {
            EdgeKind::Directed => graph.add_directed_edge(from, to, record.weight),
            EdgeKind::Undirected => graph.add_undirected_edge(from, to, record.weight),
        };
    }
    debug!("Loaded {} edges from {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
YDR001C (pp) YPL149W = 0.77

YPL149W (pd) YBR217W = 0.323
YBR217W (pp) YDR001C = 1.0
";

    #[test]
    fn test_parse() {
        let records = parse(SAMPLE).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            EdgeRecord {
                from: "YDR001C".to_owned(),
                kind: EdgeKind::Undirected,
                to: "YPL149W".to_owned(),
                weight: 0.77,
            }
        );
        assert_eq!(records[1].kind, EdgeKind::Directed);
        assert_eq!(records[2].weight, 1.0);
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let err = parse("A (px) B = 0.5").unwrap_err();
        assert!(err.to_string().contains("unknown edge type `(px)`"));
    }

    #[test]
    fn test_parse_rejects_out_of_range_weight() {
        assert!(parse("A (pp) B = 0.0").is_err());
        assert!(parse("A (pp) B = 1.5").is_err());
        assert!(parse("A (pp) B = nope").is_err());
    }

    #[test]
    fn test_parse_rejects_reserved_names() {
        let err = parse("A_1 (pp) B = 0.5").unwrap_err();
        assert!(err.to_string().contains("A_1"));
    }

    #[test]
    fn test_parse_reports_line_numbers() {
        let err = parse("A (pp) B = 0.5\nbroken").unwrap_err();
        assert!(err.to_string().starts_with("line 2:"));
    }
}
