use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use fxhash::FxHashMap;
use tracing::warn;

use meo_optimizer::error::MeoError;
use meo_optimizer::output::ranking::PathRanking;
use meo_optimizer::solver::solver_params::{Algorithm, CspPhase};

const KNOWN_KEYS: &[&str] = &[
    "edges.file",
    "sources.file",
    "targets.file",
    "edge.output.file",
    "path.output.file",
    "summary.output.file",
    "max.path.length",
    "local.search",
    "alg",
    "rand.restarts",
    "rand.seed",
    "csp.phase",
    "csp.gen.file",
    "csp.sol.file",
    "path.output.sort",
];

/// Typed view of the `key=value` properties file driving a run. Bad values
/// for known keys are fatal; unknown keys only warn.
#[derive(Debug)]
pub struct Properties {
    pub edges_file: PathBuf,
    pub sources_file: PathBuf,
    pub targets_file: PathBuf,
    pub edge_output_file: Option<PathBuf>,
    pub path_output_file: Option<PathBuf>,
    pub summary_output_file: Option<PathBuf>,
    pub max_path_length: usize,
    pub local_search: bool,
    pub algorithm: Algorithm,
    pub rand_restarts: usize,
    pub rand_seed: Option<u64>,
    pub csp_phase: Option<CspPhase>,
    pub csp_gen_file: Option<PathBuf>,
    pub csp_sol_file: Option<PathBuf>,
    pub path_ranking: PathRanking,
}

impl Properties {
    pub fn load(path: &Path) -> Result<Properties, anyhow::Error> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read properties file {}", path.display()))?;
        Properties::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Properties, anyhow::Error> {
        let mut raw: FxHashMap<&str, &str> = FxHashMap::default();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                bail!("properties line {}: expected key=value, got `{line}`", i + 1);
            };
            let key = key.trim();
            if !KNOWN_KEYS.contains(&key) {
                warn!("Ignoring unknown property `{key}`");
                continue;
            }
            raw.insert(key, value.trim());
        }

        let edges_file = required_path(&raw, "edges.file")?;
        let sources_file = required_path(&raw, "sources.file")?;
        let targets_file = required_path(&raw, "targets.file")?;
        let edge_output_file = optional_path(&raw, "edge.output.file");
        let path_output_file = optional_path(&raw, "path.output.file");
        let summary_output_file = optional_path(&raw, "summary.output.file");

        let max_path_length = required(&raw, "max.path.length")?;
        let max_path_length: usize = max_path_length
            .parse()
            .ok()
            .filter(|&length| length >= 1)
            .ok_or_else(|| config_error("max.path.length", max_path_length))?;

        let local_search = match raw.get("local.search").copied() {
            None => false,
            Some("Yes") => true,
            Some("No") => false,
            Some(other) => return Err(config_error("local.search", other).into()),
        };

        let algorithm = match raw.get("alg").copied() {
            None => Algorithm::Random,
            Some(value) => {
                Algorithm::parse(value).ok_or_else(|| config_error("alg", value))?
            }
        };

        let rand_restarts = match raw.get("rand.restarts").copied() {
            None => 10,
            Some(value) => value
                .parse()
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| config_error("rand.restarts", value))?,
        };

        let rand_seed = match raw.get("rand.seed").copied() {
            None => None,
            Some(value) => Some(
                value
                    .parse()
                    .map_err(|_| config_error("rand.seed", value))?,
            ),
        };

        let csp_phase = match raw.get("csp.phase").copied() {
            None => None,
            Some(value) => {
                Some(CspPhase::parse(value).ok_or_else(|| config_error("csp.phase", value))?)
            }
        };

        let csp_gen_file = optional_path(&raw, "csp.gen.file");
        let csp_sol_file = optional_path(&raw, "csp.sol.file");

        let path_ranking = match raw.get("path.output.sort").copied() {
            None => PathRanking::default(),
            Some(value) => PathRanking::parse(value)
                .ok_or_else(|| config_error("path.output.sort", value))?,
        };

        if algorithm == Algorithm::MaxCsp {
            match csp_phase {
                None => bail!("alg=MAXCSP requires csp.phase"),
                Some(CspPhase::Generate) if csp_gen_file.is_none() => {
                    bail!("csp.phase=Gen requires csp.gen.file")
                }
                Some(CspPhase::Score) if csp_sol_file.is_none() => {
                    bail!("csp.phase=Score requires csp.sol.file")
                }
                Some(_) => {}
            }
        }

        Ok(Properties {
            edges_file,
            sources_file,
            targets_file,
            edge_output_file,
            path_output_file,
            summary_output_file,
            max_path_length,
            local_search,
            algorithm,
            rand_restarts,
            rand_seed,
            csp_phase,
            csp_gen_file,
            csp_sol_file,
            path_ranking,
        })
    }
}

fn required<'a>(
    raw: &FxHashMap<&str, &'a str>,
    key: &'static str,
) -> Result<&'a str, anyhow::Error> {
    raw.get(key)
        .copied()
        .with_context(|| format!("missing property `{key}`"))
}

fn required_path(raw: &FxHashMap<&str, &str>, key: &'static str) -> Result<PathBuf, anyhow::Error> {
    required(raw, key).map(PathBuf::from)
}

fn optional_path(raw: &FxHashMap<&str, &str>, key: &str) -> Option<PathBuf> {
    raw.get(key).map(PathBuf::from)
}

fn config_error(key: &'static str, value: &str) -> MeoError {
    MeoError::Config {
        key,
        value: value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
# pathway run
edges.file=net/edges.txt
sources.file=net/sources.txt
targets.file=net/targets.txt
path.output.file=out/paths.txt
max.path.length=4
local.search=Yes
alg=Random
rand.restarts=25
rand.seed=7
";

    #[test]
    fn test_parse() {
        let properties = Properties::parse(SAMPLE).unwrap();

        assert_eq!(properties.edges_file, PathBuf::from("net/edges.txt"));
        assert_eq!(properties.max_path_length, 4);
        assert!(properties.local_search);
        assert_eq!(properties.algorithm, Algorithm::Random);
        assert_eq!(properties.rand_restarts, 25);
        assert_eq!(properties.rand_seed, Some(7));
        assert!(properties.edge_output_file.is_none());
        assert_eq!(properties.path_ranking, PathRanking::PathWeight);
    }

    #[test]
    fn test_defaults() {
        let properties = Properties::parse(
            "edges.file=e\nsources.file=s\ntargets.file=t\nmax.path.length=2\n",
        )
        .unwrap();
        assert!(!properties.local_search);
        assert_eq!(properties.algorithm, Algorithm::Random);
        assert_eq!(properties.rand_restarts, 10);
        assert_eq!(properties.rand_seed, None);
    }

    #[test]
    fn test_bad_known_value_is_fatal() {
        let err = Properties::parse(
            "edges.file=e\nsources.file=s\ntargets.file=t\nmax.path.length=2\nlocal.search=Maybe\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Maybe"));
    }

    #[test]
    fn test_unknown_algorithm_is_fatal() {
        let err = Properties::parse(
            "edges.file=e\nsources.file=s\ntargets.file=t\nmax.path.length=2\nalg=Greedy\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Greedy"));
    }

    #[test]
    fn test_missing_required_key() {
        let err = Properties::parse("sources.file=s\n").unwrap_err();
        assert!(err.to_string().contains("edges.file"));
    }

    #[test]
    fn test_maxcsp_requires_phase_files() {
        let base = "edges.file=e\nsources.file=s\ntargets.file=t\nmax.path.length=2\nalg=MAXCSP\n";
        assert!(Properties::parse(base).is_err());
        assert!(Properties::parse(&format!("{base}csp.phase=Gen\n")).is_err());
        let with_file = format!("{base}csp.phase=Gen\ncsp.gen.file=out.xml\n");
        assert!(Properties::parse(&with_file).is_ok());
        let score = format!("{base}csp.phase=Score\ncsp.sol.file=sol.txt\n");
        assert!(Properties::parse(&score).is_ok());
    }

    #[test]
    fn test_zero_path_length_rejected() {
        let err = Properties::parse(
            "edges.file=e\nsources.file=s\ntargets.file=t\nmax.path.length=0\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("max.path.length"));
    }
}
