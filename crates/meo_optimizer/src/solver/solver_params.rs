use crate::network::graph::WEIGHT_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Random,
    MaxCsp,
}

impl Algorithm {
    /// Parses the `alg` property value.
    pub fn parse(value: &str) -> Option<Algorithm> {
        match value {
            "Random" => Some(Algorithm::Random),
            "MAXCSP" => Some(Algorithm::MaxCsp),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Random => "Random",
            Algorithm::MaxCsp => "MAXCSP",
        }
    }
}

/// The two halves of a MAXCSP run: emit the instance for the external
/// solver, or ingest its solution and score it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CspPhase {
    Generate,
    Score,
}

impl CspPhase {
    /// Parses the `csp.phase` property value.
    pub fn parse(value: &str) -> Option<CspPhase> {
        match value {
            "Gen" => Some(CspPhase::Generate),
            "Score" => Some(CspPhase::Score),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SolverParams {
    pub algorithm: Algorithm,
    pub local_search: bool,
    pub restarts: usize,
    pub max_path_length: usize,
    pub weight_threshold: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            algorithm: Algorithm::Random,
            local_search: false,
            restarts: 10,
            max_path_length: 5,
            weight_threshold: WEIGHT_THRESHOLD,
        }
    }
}
