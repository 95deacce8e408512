use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::MeoError;
use crate::network::graph::Graph;

#[derive(Debug, Clone, PartialEq)]
pub struct TargetRecord {
    pub name: String,
    pub weight: Option<f64>,
}

/// Parses a sources file: one vertex name per line.
pub fn parse_sources(text: &str) -> Result<Vec<String>, MeoError> {
    let mut names = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(name), None) = (tokens.next(), tokens.next()) else {
            return Err(MeoError::Parse {
                line: i + 1,
                reason: format!("expected a single vertex name, got `{line}`"),
            });
        };
        check_name(name, i + 1)?;
        names.push(name.to_owned());
    }
    Ok(names)
}

/// Parses a targets file: one vertex name per line, optionally followed by
/// a target weight in [0, 1].
pub fn parse_targets(text: &str) -> Result<Vec<TargetRecord>, MeoError> {
    let mut records = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(name), weight_token, None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(MeoError::Parse {
                line: i + 1,
                reason: format!("expected `name [weight]`, got `{line}`"),
            });
        };
        check_name(name, i + 1)?;
        let weight = match weight_token {
            None => None,
            Some(token) => {
                let weight: f64 = token.parse().map_err(|_| MeoError::Parse {
                    line: i + 1,
                    reason: format!("invalid target weight `{token}`"),
                })?;
                if !(0.0..=1.0).contains(&weight) {
                    return Err(MeoError::Parse {
                        line: i + 1,
                        reason: format!("target weight {weight} outside [0, 1]"),
                    });
                }
                Some(weight)
            }
        };
        records.push(TargetRecord {
            name: name.to_owned(),
            weight,
        });
    }
    Ok(records)
}

fn check_name(name: &str, line: usize) -> Result<(), MeoError> {
    if name.contains('_') {
        return Err(MeoError::Parse {
            line,
            reason: format!("reserved character '_' in vertex name `{name}`"),
        });
    }
    Ok(())
}

/// Flags every listed vertex as a source, registering unknown names.
pub fn load_sources<P: AsRef<Path>>(graph: &mut Graph, path: P) -> Result<(), MeoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MeoError::Io {
        path: path.to_owned(),
        source,
    })?;
    let names = parse_sources(&text)?;
    for name in &names {
        let idx = graph.ensure_vertex(name)?;
        graph.mark_source(idx);
    }
    debug!("Loaded {} sources from {}", names.len(), path.display());
    Ok(())
}

/// Flags every listed vertex as a target, registering unknown names.
pub fn load_targets<P: AsRef<Path>>(graph: &mut Graph, path: P) -> Result<(), MeoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MeoError::Io {
        path: path.to_owned(),
        source,
    })?;
    let records = parse_targets(&text)?;
    for record in &records {
        let idx = graph.ensure_vertex(&record.name)?;
        graph.mark_target(idx, record.weight);
    }
    debug!("Loaded {} targets from {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources() {
        let names = parse_sources("A\n\nB\n  C  \n").unwrap();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_sources_rejects_extra_tokens() {
        assert!(parse_sources("A B").is_err());
    }

    #[test]
    fn test_parse_targets_with_optional_weight() {
        let records = parse_targets("A\nB\t0.25\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].weight, None);
        assert_eq!(records[1].weight, Some(0.25));
    }

    #[test]
    fn test_parse_targets_rejects_bad_weight() {
        assert!(parse_targets("A\t2.0").is_err());
        assert!(parse_targets("A\tx").is_err());
    }

    #[test]
    fn test_reserved_name_is_rejected_with_line() {
        let err = parse_sources("A\nB_2").unwrap_err();
        assert!(err.to_string().starts_with("line 2:"));
    }
}
