use std::fs;
use std::path::Path;

use crate::error::MeoError;
use crate::network::edge::Direction;

/// Reads the external solver's assignment: a single line of `expected`
/// whitespace-separated 0/1 tokens, 1 meaning forward.
pub fn read_solution<P: AsRef<Path>>(path: P, expected: usize) -> Result<Vec<Direction>, MeoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MeoError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_solution(&text, expected)
}

pub fn parse_solution(text: &str, expected: usize) -> Result<Vec<Direction>, MeoError> {
    let line = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
    let mut directions = Vec::with_capacity(expected);
    for token in line.split_whitespace() {
        match token {
            "1" => directions.push(Direction::Forward),
            "0" => directions.push(Direction::Backward),
            other => {
                return Err(MeoError::Solution {
                    reason: format!("unexpected token `{other}`"),
                });
            }
        }
    }
    if directions.len() != expected {
        return Err(MeoError::Solution {
            reason: format!(
                "expected {expected} assignments, found {}",
                directions.len()
            ),
        });
    }
    Ok(directions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solution() {
        let directions = parse_solution("1 0 1\n", 3).unwrap();
        assert_eq!(
            directions,
            vec![Direction::Forward, Direction::Backward, Direction::Forward]
        );
    }

    #[test]
    fn test_parse_solution_skips_leading_blank_lines() {
        let directions = parse_solution("\n\n0 1\n", 2).unwrap();
        assert_eq!(directions, vec![Direction::Backward, Direction::Forward]);
    }

    #[test]
    fn test_parse_solution_rejects_bad_token() {
        let err = parse_solution("1 2 0", 3).unwrap_err();
        assert!(err.to_string().contains("unexpected token `2`"));
    }

    #[test]
    fn test_parse_solution_rejects_wrong_length() {
        let err = parse_solution("1 0", 3).unwrap_err();
        assert!(err.to_string().contains("expected 3 assignments"));
    }

    #[test]
    fn test_parse_solution_rejects_empty_file() {
        assert!(parse_solution("", 1).is_err());
    }
}
