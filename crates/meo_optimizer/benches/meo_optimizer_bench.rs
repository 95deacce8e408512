use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use meo_optimizer::network::graph::Graph;
use meo_optimizer::solver::solver::OrientationSolver;
use meo_optimizer::solver::solver_params::SolverParams;

/// A ladder of undirected rungs: sources on the left rail, targets on the
/// right, plenty of conflicting ways through.
fn ladder_graph(rungs: usize) -> Graph {
    let mut graph = Graph::new();
    let mut left = Vec::new();
    let mut right = Vec::new();
    for i in 0..rungs {
        left.push(graph.ensure_vertex(&format!("L{i}")).unwrap());
        right.push(graph.ensure_vertex(&format!("R{i}")).unwrap());
    }
    for i in 0..rungs {
        graph.add_undirected_edge(left[i], right[i], 0.9);
        if i + 1 < rungs {
            graph.add_undirected_edge(left[i], left[i + 1], 0.8);
            graph.add_undirected_edge(right[i], right[i + 1], 0.7);
        }
    }
    graph.mark_source(left[0]);
    graph.mark_source(left[rungs / 2]);
    graph.mark_target(right[rungs - 1], None);
    graph.mark_target(right[rungs / 2], None);
    graph
}

fn enumeration_benchmark(c: &mut Criterion) {
    c.bench_function("find_paths ladder-32 depth-5", |b| {
        b.iter(|| {
            let mut graph = ladder_graph(32);
            graph.find_paths(black_box(5));
            graph.paths().len()
        })
    });
}

fn local_search_benchmark(c: &mut Criterion) {
    c.bench_function("random restarts + local search ladder-16", |b| {
        b.iter(|| {
            let mut graph = ladder_graph(16);
            let mut solver = OrientationSolver::new(SolverParams {
                max_path_length: 5,
                local_search: true,
                restarts: 3,
                ..SolverParams::default()
            });
            solver.analyze(&mut graph);
            let mut rng = SmallRng::seed_from_u64(17);
            solver.run_random(&mut graph, black_box(&mut rng))
        })
    });
}

criterion_group!(benches, enumeration_benchmark, local_search_benchmark);
criterion_main!(benches);
