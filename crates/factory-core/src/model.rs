//! Wire types for the Factory JSON document (spec §6).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The Factory input document.
#[derive(Debug, Clone, Deserialize)]
pub struct FactoryInput {
    pub machines: BTreeMap<String, MachineSpec>,
    pub recipes: BTreeMap<String, RecipeSpec>,
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleSpec>,
    #[serde(default)]
    pub limits: Limits,
    pub target: Target,
}

/// A machine class: name (the map key) plus base throughput.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineSpec {
    pub crafts_per_min: f64,
}

/// A recipe: which machine class runs it, its nominal duration, and its
/// input/output item bags.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSpec {
    pub machine: String,
    pub time_s: f64,
    #[serde(default)]
    pub r#in: BTreeMap<String, f64>,
    #[serde(default)]
    pub out: BTreeMap<String, f64>,
}

/// A module profile for one machine class: additive speed and
/// productivity bonuses, both on top of a base of 1 (spec §3).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleSpec {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub prod: f64,
}

/// Raw-supply and machine-count caps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Limits {
    #[serde(default)]
    pub raw_supply_per_min: BTreeMap<String, f64>,
    #[serde(default)]
    pub max_machines: BTreeMap<String, f64>,
}

/// The requested production target.
#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    pub item: String,
    pub rate_per_min: f64,
}

/// The result of a Factory solve.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FactoryOutput {
    Ok {
        per_recipe_crafts_per_min: BTreeMap<String, f64>,
        per_machine_counts: BTreeMap<String, u64>,
        raw_consumption_per_min: BTreeMap<String, f64>,
    },
    Infeasible {
        max_feasible_target_per_min: f64,
        bottleneck_hint: Vec<String>,
    },
}
