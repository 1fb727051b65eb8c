//! Diagnostic Extractor: on infeasibility, produces the source-side cut
//! and the tight-node/tight-edge witnesses (spec §4.4).

use std::collections::{HashSet, VecDeque};

use crate::builder::ReducedProblem;
use crate::graph::FlowGraph;
use crate::model::{Deficit, DemandBalance, TightEdge};
use crate::EPS;

/// BFS the residual graph from `start`, following any edge with residual
/// `> ε`. Returns the set of reached vertex indices.
fn reachable_from(graph: &FlowGraph, start: usize) -> HashSet<usize> {
    let mut visited = HashSet::new();
    visited.insert(start);
    let mut queue = VecDeque::new();
    queue.push_back(start);
    while let Some(u) = queue.pop_front() {
        for edge in graph.edges(u) {
            if FlowGraph::has_residual(edge) && visited.insert(edge.to) {
                queue.push_back(edge.to);
            }
        }
    }
    visited
}

/// Build the infeasibility certificate for a lower-bound-feasibility
/// shortfall: `maxflow(s*, t*) < B⁺`. Returns the sorted cut-reachable
/// node names alongside the deficit derived from the same BFS.
pub fn extract(problem: &ReducedProblem, flow_achieved: f64) -> (Vec<String>, Deficit) {
    let visited = reachable_from(&problem.graph, problem.s_star);

    let mut cut_reachable: Vec<String> = problem
        .in_idx
        .keys()
        .filter(|name| {
            visited.contains(&problem.in_idx[*name]) || visited.contains(&problem.out_idx[*name])
        })
        .cloned()
        .collect();
    cut_reachable.sort();

    let mut tight_nodes: Vec<String> = problem
        .splits
        .iter()
        .filter(|s| visited.contains(&s.in_vertex) && problem.graph.residual(s.edge) <= EPS)
        .map(|s| s.name.clone())
        .collect();
    tight_nodes.sort();

    let tight_edges: Vec<TightEdge> = problem
        .edges
        .iter()
        .filter(|e| {
            visited.contains(&e.u_out)
                && !visited.contains(&e.v_in)
                && problem.graph.residual(e.edge) <= EPS
        })
        .map(|e| TightEdge {
            from: e.from.clone(),
            to: e.to.clone(),
            flow_needed: e.lo,
        })
        .collect();

    let demand_balance = DemandBalance::from_deficit(problem.b_pos_sum - flow_achieved);

    (
        cut_reachable,
        Deficit {
            demand_balance,
            tight_nodes,
            tight_edges,
        },
    )
}
