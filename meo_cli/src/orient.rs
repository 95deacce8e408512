use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use jiff::Timestamp;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use meo_optimizer::network::graph::Graph;
use meo_optimizer::output::{edge_writer, path_writer};
use meo_optimizer::parsers::{edge_list, vertex_list};
use meo_optimizer::solver::solver::{OrientationSolver, report_scores};
use meo_optimizer::solver::solver_params::{Algorithm, CspPhase, SolverParams};
use meo_optimizer::wcsp::reader::read_solution;
use meo_optimizer::wcsp::writer::WcspWriter;

use crate::properties::Properties;

pub fn run(properties_path: &Path) -> Result<(), anyhow::Error> {
    let started = Timestamp::now();
    let properties = Properties::load(properties_path)?;

    let mut graph = Graph::new();
    edge_list::load(&mut graph, &properties.edges_file)
        .with_context(|| format!("loading edges from {}", properties.edges_file.display()))?;
    vertex_list::load_sources(&mut graph, &properties.sources_file)
        .with_context(|| format!("loading sources from {}", properties.sources_file.display()))?;
    vertex_list::load_targets(&mut graph, &properties.targets_file)
        .with_context(|| format!("loading targets from {}", properties.targets_file.display()))?;
    info!(
        vertices = graph.vertices().len(),
        directed = graph.directed_edges().len(),
        undirected = graph.undirected_edges().len(),
        sources = graph.sources().len(),
        targets = graph.targets().len(),
        "Network loaded"
    );

    let mut solver = OrientationSolver::new(SolverParams {
        algorithm: properties.algorithm,
        local_search: properties.local_search,
        restarts: properties.rand_restarts,
        max_path_length: properties.max_path_length,
        ..SolverParams::default()
    });
    solver.analyze(&mut graph);

    match properties.algorithm {
        Algorithm::Random => {
            let mut rng = match properties.rand_seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            };
            let best = solver.run_random(&mut graph, &mut rng);
            info!("Random orientation finished with score {best}");
        }
        Algorithm::MaxCsp => match properties.csp_phase {
            Some(CspPhase::Generate) => {
                let Some(gen_file) = &properties.csp_gen_file else {
                    unreachable!("csp.gen.file checked during property parsing");
                };
                let file = File::create(gen_file)
                    .with_context(|| format!("cannot create {}", gen_file.display()))?;
                let mut out = BufWriter::new(file);
                WcspWriter::new(&graph, solver.conflict_edges())
                    .write(&mut out)
                    .and_then(|()| out.flush())
                    .with_context(|| format!("writing WCSP instance to {}", gen_file.display()))?;
                info!(
                    "Wrote WCSP instance for {} conflict edges to {}; rerun with csp.phase=Score once solved",
                    solver.conflict_edges().len(),
                    gen_file.display()
                );
                return Ok(());
            }
            Some(CspPhase::Score) => {
                let Some(sol_file) = &properties.csp_sol_file else {
                    unreachable!("csp.sol.file checked during property parsing");
                };
                let directions = read_solution(sol_file, solver.conflict_edges().len())
                    .with_context(|| format!("reading solution from {}", sol_file.display()))?;
                solver.apply_solution(&mut graph, &directions);
                if properties.local_search {
                    let run = solver.run_local_search(&mut graph);
                    info!(
                        "Post-solution local search: {} flips, score {}",
                        run.iterations, run.score
                    );
                }
            }
            None => unreachable!("csp.phase checked during property parsing"),
        },
    }

    report_scores(&graph);

    if let Some(path) = &properties.path_output_file {
        let file =
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        path_writer::write_paths(&graph, properties.path_ranking, &mut out)
            .and_then(|()| out.flush())
            .with_context(|| format!("writing paths to {}", path.display()))?;
        info!("Wrote path output to {}", path.display());
    }

    if let Some(path) = &properties.edge_output_file {
        let file =
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        edge_writer::write_edges(&graph, &mut out)
            .and_then(|()| out.flush())
            .with_context(|| format!("writing edges to {}", path.display()))?;
        info!("Wrote edge output to {}", path.display());
    }

    let statistics = solver.statistics(&graph, Timestamp::now().duration_since(started));
    if let Some(path) = &properties.summary_output_file {
        let file =
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &statistics)
            .with_context(|| format!("writing run summary to {}", path.display()))?;
        out.flush()
            .with_context(|| format!("writing run summary to {}", path.display()))?;
        info!("Wrote run summary to {}", path.display());
    }
    info!(?statistics, "Run complete");

    Ok(())
}
