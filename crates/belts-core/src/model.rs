//! Wire types for the Belts JSON document (spec §6).
//!
//! Mirrors the teacher's `data_loader.rs` idiom of plain `serde`-derived
//! structs with `#[serde(default)]` on optional fields, rather than a
//! hand-rolled parser.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The Belts input document.
#[derive(Debug, Clone, Deserialize)]
pub struct BeltsInput {
    /// All node names that appear in the problem.
    pub nodes: Vec<String>,
    /// The edge list. Multiple edges between the same pair are permitted
    /// and remain distinct.
    pub edges: Vec<EdgeSpec>,
    /// Source node name -> nonnegative supply.
    #[serde(default)]
    pub sources: BTreeMap<String, f64>,
    /// The single sink node name.
    pub sink: Option<String>,
    /// Node name -> throughput cap, for nodes that should be split.
    #[serde(default)]
    pub node_caps: BTreeMap<String, f64>,
}

/// One edge in the input document.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    /// Minimum flow that must pass through this edge. Defaults to 0.
    #[serde(default)]
    pub lo: f64,
    /// Maximum flow this edge can carry. Missing means "unbounded",
    /// represented internally as [`crate::INFINITE_CAPACITY`].
    #[serde(default = "default_hi")]
    pub hi: f64,
}

fn default_hi() -> f64 {
    crate::INFINITE_CAPACITY
}

/// The result of a Belts solve.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BeltsOutput {
    Ok {
        max_flow_per_min: f64,
        flows: Vec<EdgeFlow>,
    },
    Infeasible {
        cut_reachable: Vec<String>,
        deficit: Deficit,
    },
}

/// A single edge's realized flow, for the `"ok"` output (spec §6).
#[derive(Debug, Clone, Serialize)]
pub struct EdgeFlow {
    pub from: String,
    pub to: String,
    pub flow: f64,
}

/// Infeasibility certificate emitted alongside `cut_reachable` (spec §4.4).
#[derive(Debug, Clone, Serialize)]
pub struct Deficit {
    pub demand_balance: DemandBalance,
    pub tight_nodes: Vec<String>,
    pub tight_edges: Vec<TightEdge>,
}

/// The deficit `B⁺ - flow_achieved`, rounded to an integer when within
/// 1e-6 of one so the JSON output reads as `120` rather than `120.0`
/// (spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DemandBalance {
    Integral(i64),
    Fractional(f64),
}

impl DemandBalance {
    pub fn from_deficit(deficit: f64) -> Self {
        let rounded = deficit.round();
        if (rounded - deficit).abs() < 1e-6 {
            DemandBalance::Integral(rounded as i64)
        } else {
            DemandBalance::Fractional(deficit)
        }
    }
}

/// One saturated boundary-crossing edge witnessing the cut.
#[derive(Debug, Clone, Serialize)]
pub struct TightEdge {
    pub from: String,
    pub to: String,
    pub flow_needed: f64,
}

impl BeltsInput {
    /// Total supply across all sources (spec §3: "The total supply is the
    /// sum of source supplies.").
    pub fn total_supply(&self) -> f64 {
        self.sources.values().sum()
    }
}
