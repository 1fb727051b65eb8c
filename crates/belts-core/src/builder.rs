//! Graph Builder: lowers a [`BeltsInput`] to a standard max-flow instance
//! (spec §4.1).
//!
//! Three steps, in order:
//!
//! 1. **Node splitting** -- every node with a node cap, other than a
//!    source or the sink, becomes two internal vertices `in`/`out` joined
//!    by a capacity edge.
//! 2. **Edge mapping** -- each input edge becomes `u_out -> v_in` with
//!    capacity `hi - lo`.
//! 3. **Lower-bound reduction** -- per-vertex balance terms `b(v)` are
//!    accumulated from source supply, sink demand, and edge lower bounds,
//!    then realized as super-source/super-sink edges.

use std::collections::HashMap;

use crate::error::BeltsError;
use crate::graph::{EdgeRef, FlowGraph};
use crate::model::BeltsInput;
use crate::EPS;

/// A split node's `in -> out` capacity edge, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct SplitRef {
    pub name: String,
    pub in_vertex: usize,
    pub out_vertex: usize,
    pub edge: EdgeRef,
}

/// One original edge's mapping into the reduced graph, kept for
/// reconstruction and diagnostics.
#[derive(Debug, Clone)]
pub struct EdgeMapping {
    pub from: String,
    pub to: String,
    pub u_out: usize,
    pub v_in: usize,
    pub lo: f64,
    /// `hi - lo`, the reduced edge's capacity.
    pub reduced_cap: f64,
    pub edge: EdgeRef,
}

/// A fully reduced Belts instance, ready for the feasibility max-flow.
pub struct ReducedProblem {
    pub graph: FlowGraph,
    pub s_star: usize,
    pub t_star: usize,
    pub in_idx: HashMap<String, usize>,
    pub out_idx: HashMap<String, usize>,
    pub splits: Vec<SplitRef>,
    pub edges: Vec<EdgeMapping>,
    /// `B⁺ = Σ max(b(v), 0)`, the feasibility flow target.
    pub b_pos_sum: f64,
    pub total_supply: f64,
    pub sink: String,
}

/// An edge whose `hi < lo`, caught before any graph is built (spec §4.1:
/// "If any edge has `hi + ε < lo`, fail immediately with an infeasibility
/// result naming that edge.").
#[derive(Debug, Clone)]
pub struct BadBoundsEdge {
    pub from: String,
    pub to: String,
    pub lo: f64,
}

/// Either a built [`ReducedProblem`] or the one edge that made the
/// instance trivially infeasible.
pub enum BuildResult {
    Built(ReducedProblem),
    BadBounds(BadBoundsEdge),
}

/// Build the reduced max-flow instance from `input`.
pub fn build(input: &BeltsInput) -> Result<BuildResult, BeltsError> {
    let sink = input.sink.clone().ok_or(BeltsError::MissingSink)?;

    for edge in &input.edges {
        if edge.hi + EPS < edge.lo {
            return Ok(BuildResult::BadBounds(BadBoundsEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
                lo: edge.lo,
            }));
        }
    }

    let known: std::collections::HashSet<&str> =
        input.nodes.iter().map(String::as_str).collect();
    for edge in &input.edges {
        if !known.contains(edge.from.as_str()) || !known.contains(edge.to.as_str()) {
            return Err(BeltsError::UnknownNode {
                from: edge.from.clone(),
                to: edge.to.clone(),
            });
        }
    }

    // --- Node splitting: assign in/out vertex indices -----------------
    let mut in_idx = HashMap::new();
    let mut out_idx = HashMap::new();
    let mut next_vertex = 0usize;
    let mut splits = Vec::new();

    for name in &input.nodes {
        let is_sink = name == &sink;
        let is_source = input.sources.contains_key(name);
        let has_cap = input.node_caps.contains_key(name);

        if has_cap && !is_sink && !is_source {
            let v_in = next_vertex;
            next_vertex += 1;
            let v_out = next_vertex;
            next_vertex += 1;
            in_idx.insert(name.clone(), v_in);
            out_idx.insert(name.clone(), v_out);
            // The split edge itself is added once the graph is allocated,
            // below -- we only reserve vertex indices here.
        } else {
            let v = next_vertex;
            next_vertex += 1;
            in_idx.insert(name.clone(), v);
            out_idx.insert(name.clone(), v);
        }
    }

    let s_star = next_vertex;
    next_vertex += 1;
    let t_star = next_vertex;
    next_vertex += 1;

    let mut graph = FlowGraph::new(next_vertex);

    for name in &input.nodes {
        let v_in = in_idx[name];
        let v_out = out_idx[name];
        if v_in != v_out {
            let cap = input.node_caps.get(name).copied().unwrap_or(0.0);
            let edge = graph.add_edge(v_in, v_out, cap);
            splits.push(SplitRef {
                name: name.clone(),
                in_vertex: v_in,
                out_vertex: v_out,
                edge,
            });
        }
    }

    // --- Edge mapping: u_out -> v_in, capacity hi - lo -----------------
    let mut edges = Vec::with_capacity(input.edges.len());
    let mut sum_out_lo: HashMap<usize, f64> = HashMap::new();
    let mut sum_in_lo: HashMap<usize, f64> = HashMap::new();

    for e in &input.edges {
        let u_out = out_idx[&e.from];
        let v_in = in_idx[&e.to];
        let reduced_cap = e.hi - e.lo;
        let edge = graph.add_edge(u_out, v_in, reduced_cap);
        *sum_out_lo.entry(u_out).or_insert(0.0) += e.lo;
        *sum_in_lo.entry(v_in).or_insert(0.0) += e.lo;
        edges.push(EdgeMapping {
            from: e.from.clone(),
            to: e.to.clone(),
            u_out,
            v_in,
            lo: e.lo,
            reduced_cap,
            edge,
        });
    }

    // --- Lower-bound reduction: balance terms b(v) ---------------------
    let total_supply = input.total_supply();
    let mut b_pos_sum = 0.0;

    for name in &input.nodes {
        let supply = if name == &sink {
            -total_supply
        } else {
            input.sources.get(name).copied().unwrap_or(0.0)
        };
        let v_in = in_idx[name];
        let v_out = out_idx[name];
        let in_lo = sum_in_lo.get(&v_in).copied().unwrap_or(0.0);
        let out_lo = sum_out_lo.get(&v_out).copied().unwrap_or(0.0);
        let b = supply + in_lo - out_lo;

        if b > EPS {
            graph.add_edge(s_star, v_in, b);
            b_pos_sum += b;
        } else if b < -EPS {
            graph.add_edge(v_out, t_star, -b);
        }
    }

    Ok(BuildResult::Built(ReducedProblem {
        graph,
        s_star,
        t_star,
        in_idx,
        out_idx,
        splits,
        edges,
        b_pos_sum,
        total_supply,
        sink,
    }))
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

    #[test]
    fn splits_only_capped_non_source_non_sink_nodes() {
        let input = BeltsInput {
            nodes: vec!["s1".into(), "a".into(), "sink".into()],
            edges: vec![edge("s1", "a", 0.0, 100.0), edge("a", "sink", 0.0, 100.0)],
            sources: [("s1".to_string(), 50.0)].into_iter().collect(),
            sink: Some("sink".into()),
            node_caps: [("a".to_string(), 80.0), ("s1".to_string(), 10.0)]
                .into_iter()
                .collect(),
        };
        let built = match build(&input).unwrap() {
            BuildResult::Built(b) => b,
            BuildResult::BadBounds(_) => panic!("expected a built instance"),
        };
        // "a" is capped and is neither source nor sink -> split.
        assert_ne!(built.in_idx["a"], built.out_idx["a"]);
        // "s1" is a source -> never split even though it has a node cap.
        assert_eq!(built.in_idx["s1"], built.out_idx["s1"]);
        // "sink" is the sink -> never split.
        assert_eq!(built.in_idx["sink"], built.out_idx["sink"]);
    }

    #[test]
    fn bad_bounds_detected_before_graph_build() {
        let input = BeltsInput {
            nodes: vec!["s1".into(), "sink".into()],
            edges: vec![edge("s1", "sink", 100.0, 10.0)],
            sources: [("s1".to_string(), 50.0)].into_iter().collect(),
            sink: Some("sink".into()),
            node_caps: Default::default(),
        };
        match build(&input).unwrap() {
            BuildResult::BadBounds(bad) => {
                assert_eq!(bad.from, "s1");
                assert_eq!(bad.to, "sink");
            }
            BuildResult::Built(_) => panic!("expected bad bounds to be caught"),
        }
    }

    #[test]
    fn missing_sink_is_a_schema_error() {
        let input = BeltsInput {
            nodes: vec!["s1".into()],
            edges: vec![],
            sources: Default::default(),
            sink: None,
            node_caps: Default::default(),
        };
        assert!(matches!(build(&input), Err(BeltsError::MissingSink)));
    }
}
