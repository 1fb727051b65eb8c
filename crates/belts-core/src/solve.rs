//! Orchestration: run the builder, the feasibility/main max-flow, and
//! either the reconstructor or the diagnostic extractor.

use crate::builder::{self, BuildResult};
use crate::diagnostics;
use crate::dinic;
use crate::error::BeltsError;
use crate::model::{BeltsInput, BeltsOutput, Deficit, DemandBalance, TightEdge};
use crate::reconstruct;

/// Solve a Belts instance end to end.
///
/// A single max-flow from the super-source to the super-sink both decides
/// feasibility and -- because source supply and sink demand are folded
/// into the same balance terms as the edge lower bounds -- doubles as the
/// main flow when it succeeds (see `SPEC_FULL.md` §3.1 for why this
/// implementation picked that composition over building a second residual
/// graph).
pub fn solve(input: &BeltsInput) -> Result<BeltsOutput, BeltsError> {
    let built = builder::build(input)?;

    let mut problem = match built {
        BuildResult::BadBounds(bad) => {
            tracing::warn!(from = %bad.from, to = %bad.to, "edge hi < lo");
            return Ok(BeltsOutput::Infeasible {
                cut_reachable: Vec::new(),
                deficit: Deficit {
                    demand_balance: DemandBalance::Integral(0),
                    tight_nodes: Vec::new(),
                    tight_edges: vec![TightEdge {
                        from: bad.from,
                        to: bad.to,
                        flow_needed: bad.lo,
                    }],
                },
            });
        }
        BuildResult::Built(problem) => problem,
    };

    let achieved = dinic::max_flow(&mut problem.graph, problem.s_star, problem.t_star);

    if achieved + 1e-6 < problem.b_pos_sum {
        tracing::debug!(
            achieved,
            required = problem.b_pos_sum,
            "lower-bound feasibility shortfall"
        );
        let (cut_reachable, deficit) = diagnostics::extract(&problem, achieved);
        return Ok(BeltsOutput::Infeasible {
            cut_reachable,
            deficit,
        });
    }

    let flows = reconstruct::reconstruct_flows(&problem);
    let max_flow_per_min = reconstruct::flow_into_sink(&problem, &flows);
    Ok(BeltsOutput::Ok {
        max_flow_per_min: round2(max_flow_per_min),
        flows: flows
            .into_iter()
            .map(|f| crate::model::EdgeFlow {
                from: f.from,
                to: f.to,
                flow: round2(f.flow),
            })
            .collect(),
    })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeSpec;

    fn edge(from: &str, to: &str, lo: f64, hi: f64) -> EdgeSpec {
        EdgeSpec {
            from: from.to_string(),
            to: to.to_string(),
            lo,
            hi,
        }
    }

    /// Belts A from spec §8.
    #[test]
    fn feasible_seed_scenario() {
        let input = BeltsInput {
            nodes: vec!["s1".into(), "a".into(), "b".into(), "sink".into()],
            edges: vec![
                edge("s1", "a", 50.0, 200.0),
                edge("a", "b", 40.0, 150.0),
                edge("b", "sink", 0.0, 120.0),
            ],
            sources: [("s1".to_string(), 120.0)].into_iter().collect(),
            sink: Some("sink".into()),
            node_caps: [("b".to_string(), 120.0)].into_iter().collect(),
        };

        match solve(&input).unwrap() {
            BeltsOutput::Ok { max_flow_per_min, .. } => {
                assert!((max_flow_per_min - 120.0).abs() < 1e-6);
            }
            other => panic!("expected ok, got {other:?}"),
        }
    }

    /// Belts B from spec §8.
    #[test]
    fn infeasible_seed_scenario() {
        let input = BeltsInput {
            nodes: vec!["s1".into(), "a".into(), "b".into(), "sink".into()],
            edges: vec![
                edge("s1", "a", 50.0, 200.0),
                edge("a", "b", 40.0, 150.0),
                edge("b", "sink", 0.0, 60.0),
            ],
            sources: [("s1".to_string(), 120.0)].into_iter().collect(),
            sink: Some("sink".into()),
            node_caps: [("b".to_string(), 120.0)].into_iter().collect(),
        };

        match solve(&input).unwrap() {
            BeltsOutput::Infeasible {
                cut_reachable,
                deficit,
            } => {
                assert!(cut_reachable.contains(&"s1".to_string()));
                assert!(cut_reachable.contains(&"a".to_string()));
                assert!(cut_reachable.contains(&"b".to_string()));
                assert!(!cut_reachable.contains(&"sink".to_string()));
                assert!(deficit
                    .tight_edges
                    .iter()
                    .any(|e| e.from == "b" && e.to == "sink"));
            }
            other => panic!("expected infeasible, got {other:?}"),
        }
    }

    /// Belts C from spec §8: a lower bound alone exceeds supply.
    #[test]
    fn lower_bound_driven_infeasibility() {
        let input = BeltsInput {
            nodes: vec!["s1".into(), "a".into(), "sink".into()],
            edges: vec![
                edge("s1", "a", 0.0, 100.0),
                edge("a", "sink", 80.0, 100.0),
            ],
            sources: [("s1".to_string(), 50.0)].into_iter().collect(),
            sink: Some("sink".into()),
            node_caps: Default::default(),
        };

        match solve(&input).unwrap() {
            BeltsOutput::Infeasible { .. } => {}
            other => panic!("expected infeasible, got {other:?}"),
        }
    }

    #[test]
    fn bad_edge_bounds_reported_as_infeasible() {
        let input = BeltsInput {
            nodes: vec!["s1".into(), "sink".into()],
            edges: vec![edge("s1", "sink", 100.0, 10.0)],
            sources: [("s1".to_string(), 50.0)].into_iter().collect(),
            sink: Some("sink".into()),
            node_caps: Default::default(),
        };

        match solve(&input).unwrap() {
            BeltsOutput::Infeasible { deficit, .. } => {
                assert_eq!(deficit.tight_edges.len(), 1);
                assert_eq!(deficit.tight_edges[0].from, "s1");
            }
            other => panic!("expected infeasible, got {other:?}"),
        }
    }
}
