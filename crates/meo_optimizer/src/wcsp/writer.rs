use std::io::{self, Write};

use fxhash::FxHashMap;

use crate::network::edge::{Direction, EdgeIdx};
use crate::network::graph::Graph;
use crate::network::path::Path;

/// Path weights in (0, 1] are quantized to integer costs by this factor.
/// Weights below 1/COST_SCALE collapse to cost 0 and stop steering the
/// solver.
pub const COST_SCALE: f64 = 1000.0;

/// Emits the conflict instance as an XCSP 2.1 weighted CSP.
///
/// One binary variable `E<i>` per conflict edge (0 = backward,
/// 1 = forward). One soft constraint per conflict path whose single
/// zero-cost tuple is the assignment satisfying that path; violating it
/// costs `round(max_weight × COST_SCALE)`.
pub struct WcspWriter<'a> {
    graph: &'a Graph,
    conflicts: &'a [EdgeIdx],
}

impl<'a> WcspWriter<'a> {
    pub fn new(graph: &'a Graph, conflicts: &'a [EdgeIdx]) -> Self {
        WcspWriter { graph, conflicts }
    }

    pub fn write<W: Write>(&self, mut out: W) -> io::Result<()> {
        let variable_of: FxHashMap<EdgeIdx, usize> = self
            .conflicts
            .iter()
            .enumerate()
            .map(|(i, &edge)| (edge, i))
            .collect();

        let mut constraints: Vec<Vec<(usize, u8)>> = Vec::new();
        let mut costs: Vec<u64> = Vec::new();
        for path in self.graph.paths() {
            let scope = conflict_scope(path, &variable_of);
            if scope.is_empty() {
                continue;
            }
            constraints.push(scope);
            costs.push((path.max_weight() * COST_SCALE).round() as u64);
        }

        let max_arity = constraints.iter().map(Vec::len).max().unwrap_or(0);
        let maximal_cost = COST_SCALE as u64 * constraints.len() as u64 + 1;

        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(out, "<instance>")?;
        writeln!(
            out,
            r#"<presentation name="meo" maxConstraintArity="{max_arity}" maximalCost="{maximal_cost}" format="XCSP 2.1" type="WCSP"/>"#
        )?;
        writeln!(out, r#"<domains nbDomains="1">"#)?;
        writeln!(out, r#"<domain name="D0" nbValues="2">0 1</domain>"#)?;
        writeln!(out, "</domains>")?;

        writeln!(out, r#"<variables nbVariables="{}">"#, self.conflicts.len())?;
        for i in 0..self.conflicts.len() {
            writeln!(out, r#"<variable name="E{i}" domain="D0"/>"#)?;
        }
        writeln!(out, "</variables>")?;

        writeln!(out, r#"<relations nbRelations="{}">"#, constraints.len())?;
        for (p, scope) in constraints.iter().enumerate() {
            let tuple = scope
                .iter()
                .map(|&(_, value)| value.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(
                out,
                r#"<relation name="R{p}" arity="{}" nbTuples="1" semantics="soft" defaultCost="{}">0:{tuple}</relation>"#,
                scope.len(),
                costs[p],
            )?;
        }
        writeln!(out, "</relations>")?;

        writeln!(out, r#"<constraints nbConstraints="{}">"#, constraints.len())?;
        for (p, scope) in constraints.iter().enumerate() {
            let vars = scope
                .iter()
                .map(|&(variable, _)| format!("E{variable}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(
                out,
                r#"<constraint name="C{p}" arity="{}" scope="{vars}" reference="R{p}"/>"#,
                scope.len(),
            )?;
        }
        writeln!(out, "</constraints>")?;
        writeln!(out, "</instance>")?;
        Ok(())
    }
}

/// The conflict-edge variables a path constrains, with the value each must
/// take for the path to be satisfied.
fn conflict_scope(path: &Path, variable_of: &FxHashMap<EdgeIdx, usize>) -> Vec<(usize, u8)> {
    path.edges()
        .iter()
        .zip(path.directions())
        .filter_map(|(&edge, &desired)| {
            variable_of.get(&edge).map(|&variable| {
                let value = match desired {
                    Direction::Forward => 1,
                    Direction::Backward => 0,
                };
                (variable, value)
            })
        })
        .collect()
}
