//! LP Oracle Adapter: builds the steady-state production LP from a
//! [`TranslatedModel`] and submits it to a continuous LP solver (spec
//! §4.5-4.6, §9).
//!
//! Spec §9 models the oracle as an interface with four operations (add
//! variable, add constraint, set objective, solve). `good_lp`'s
//! `Variable`/`Expression`/`constraint!` surface *is* that interface, so
//! the translator below talks to it directly rather than wrapping it
//! behind a second trait of our own -- see `SPEC_FULL.md` §4.1.

use std::collections::BTreeMap;

use good_lp::{constraint, variable, Expression, ProblemVariables, ResolutionError, Solution,
              SolverModel, Variable};

use crate::model::FactoryInput;
use crate::translate::TranslatedModel;

/// Which pass this LP build is for: the primary feasibility/minimization
/// pass with a fixed target rate, or the diagnostic pass with the target
/// rate itself as a free variable to maximize.
#[derive(Debug, Clone, Copy)]
pub enum Pass {
    Primary { target_rate: f64 },
    Diagnostic,
}

/// A solved LP's primal values, read back into the domain's terms.
#[derive(Debug, Clone)]
pub struct Solved {
    pub per_recipe_cpm: BTreeMap<String, f64>,
    pub raw_consumption: BTreeMap<String, f64>,
    /// Continuous machine usage per class, `Σ x_r / eff_r`. The caller
    /// ceilings this to get `per_machine_counts` (spec §4.6: "The ceiling
    /// is the only place integrality enters the problem").
    pub machine_usage: BTreeMap<String, f64>,
    /// `T` in the diagnostic pass; the fixed target rate in the primary
    /// pass (kept for uniform bottleneck-hint computation).
    pub target_value: f64,
}

/// Outcome of submitting a pass's LP to the oracle.
pub enum LpOutcome {
    Optimal(Solved),
    Infeasible,
}

/// Build the LP for `pass` and solve it.
///
/// Never fails outright: spec §7 treats any non-optimal oracle result --
/// infeasible, unbounded, or genuinely unknown -- as `LpOutcome::Infeasible`
/// rather than a process error, so the caller always gets a result to turn
/// into a structured `FactoryOutput`.
pub fn solve_pass(input: &FactoryInput, translated: &TranslatedModel, pass: Pass) -> LpOutcome {
    let mut vars = ProblemVariables::new();

    let mut x: BTreeMap<String, Variable> = BTreeMap::new();
    for (name, _) in &translated.rates {
        x.insert(name.clone(), vars.add(variable().min(0.0)));
    }

    let mut consumption: BTreeMap<String, Variable> = BTreeMap::new();
    for (item, cap) in &input.limits.raw_supply_per_min {
        consumption.insert(item.clone(), vars.add(variable().min(0.0).max(*cap)));
    }

    let target_var = match pass {
        Pass::Primary { .. } => None,
        Pass::Diagnostic => Some(vars.add(variable().min(0.0))),
    };

    let eff = |name: &str| -> f64 {
        translated
            .rates
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.eff_cpm)
            .unwrap_or(0.0)
    };
    let productivity = |name: &str| -> f64 {
        translated
            .rates
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.productivity)
            .unwrap_or(1.0)
    };

    let objective = match pass {
        Pass::Primary { .. } => {
            // minimize total machines: sum_r x_r / eff_r, recipes with
            // eff_r <= 0 contribute nothing (and are pinned below).
            let mut obj = Expression::from_other_affine(0.0);
            for (name, var) in &x {
                let e = eff(name);
                if e > 0.0 {
                    obj += (1.0 / e) * *var;
                }
            }
            obj
        }
        Pass::Diagnostic => Expression::from(target_var.expect("diagnostic pass has target var")),
    };

    let mut problem = match pass {
        Pass::Primary { .. } => vars.minimise(objective).using(good_lp::default_solver),
        Pass::Diagnostic => vars.maximise(objective).using(good_lp::default_solver),
    };

    // Recipes with eff_r <= 0 are pinned to zero regardless of whether
    // their machine class is even declared (spec §3 invariant a).
    for (name, var) in &x {
        if eff(name) <= 0.0 {
            problem.add_constraint(constraint!(*var == 0.0));
        }
    }

    // Per-item balance constraints.
    for item in &translated.items {
        let mut expr = Expression::from_other_affine(0.0);
        for (name, var) in &x {
            let recipe = &input.recipes[name];
            let out_qty = recipe.out.get(item).copied().unwrap_or(0.0);
            let in_qty = recipe.r#in.get(item).copied().unwrap_or(0.0);
            let coeff = out_qty * productivity(name) - in_qty;
            if coeff != 0.0 {
                expr += coeff * *var;
            }
        }

        let is_target = *item == input.target.item;

        if let Some(c) = consumption.get(item) {
            expr += *c;
        }

        let rhs: Expression = if is_target {
            match (pass, target_var) {
                (Pass::Primary { target_rate }, _) => Expression::from_other_affine(target_rate),
                (Pass::Diagnostic, Some(t)) => Expression::from(t),
                (Pass::Diagnostic, None) => unreachable!("diagnostic pass always has a target var"),
            }
        } else {
            Expression::from_other_affine(0.0)
        };

        problem.add_constraint(constraint!(expr == rhs));
    }

    // Machine-usage constraints: Σ x_r / eff_r <= max_machines[M], only
    // for classes with a declared cap (spec §4.5: "absence of a cap means
    // no upper bound").
    for (machine, cap) in &input.limits.max_machines {
        let mut usage = Expression::from_other_affine(0.0);
        for (name, var) in &x {
            if input.recipes[name].machine == *machine {
                let e = eff(name);
                if e > 0.0 {
                    usage += (1.0 / e) * *var;
                }
            }
        }
        problem.add_constraint(constraint!(usage <= *cap));
    }

    let solution = match problem.solve() {
        Ok(s) => s,
        Err(ResolutionError::Infeasible) | Err(ResolutionError::Unbounded) => {
            return LpOutcome::Infeasible;
        }
        Err(other) => {
            tracing::warn!(error = %other, "LP oracle returned an unknown result; treating as infeasible");
            return LpOutcome::Infeasible;
        }
    };

    let per_recipe_cpm: BTreeMap<String, f64> = x
        .iter()
        .map(|(name, var)| (name.clone(), solution.value(*var)))
        .collect();

    let raw_consumption: BTreeMap<String, f64> = consumption
        .iter()
        .map(|(item, var)| (item.clone(), solution.value(*var)))
        .collect();

    let mut machine_usage: BTreeMap<String, f64> = BTreeMap::new();
    for machine in input.machines.keys() {
        let mut usage = 0.0;
        for (name, cpm) in &per_recipe_cpm {
            if input.recipes[name].machine == *machine {
                let e = eff(name);
                if e > 0.0 {
                    usage += cpm / e;
                }
            }
        }
        machine_usage.insert(machine.clone(), usage);
    }

    let target_value = match pass {
        Pass::Primary { target_rate } => target_rate,
        Pass::Diagnostic => solution.value(target_var.expect("diagnostic pass has target var")),
    };

    LpOutcome::Optimal(Solved {
        per_recipe_cpm,
        raw_consumption,
        machine_usage,
        target_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Limits, MachineSpec, RecipeSpec, Target};
    use crate::translate::translate;
    use std::collections::BTreeMap;

    fn single_recipe_input(target_rate: f64) -> FactoryInput {
        let mut machines = BTreeMap::new();
        machines.insert("furnace".to_string(), MachineSpec { crafts_per_min: 60.0 });
        let mut recipes = BTreeMap::new();
        recipes.insert(
            "iron_plate".to_string(),
            RecipeSpec {
                machine: "furnace".to_string(),
                time_s: 1.0,
                r#in: [("iron_ore".to_string(), 1.0)].into_iter().collect(),
                out: [("iron_plate".to_string(), 1.0)].into_iter().collect(),
            },
        );
        FactoryInput {
            machines,
            recipes,
            modules: BTreeMap::new(),
            limits: Limits {
                raw_supply_per_min: [("iron_ore".to_string(), 10_000.0)].into_iter().collect(),
                max_machines: BTreeMap::new(),
            },
            target: Target {
                item: "iron_plate".to_string(),
                rate_per_min: target_rate,
            },
        }
    }

    #[test]
    fn primary_pass_hits_target_exactly() {
        let input = single_recipe_input(120.0);
        let translated = translate(&input);
        match solve_pass(&input, &translated, Pass::Primary { target_rate: 120.0 }) {
            LpOutcome::Optimal(solved) => {
                assert!((solved.per_recipe_cpm["iron_plate"] - 120.0).abs() < 1e-6);
                assert!((solved.raw_consumption["iron_ore"] - 120.0).abs() < 1e-6);
            }
            LpOutcome::Infeasible => panic!("expected an optimal solution"),
        }
    }

    #[test]
    fn recipe_with_unknown_machine_is_pinned_to_zero() {
        let mut input = single_recipe_input(0.0);
        input.recipes.get_mut("iron_plate").unwrap().machine = "nonexistent".to_string();
        let translated = translate(&input);
        match solve_pass(&input, &translated, Pass::Diagnostic) {
            LpOutcome::Optimal(solved) => {
                assert!((solved.per_recipe_cpm["iron_plate"] - 0.0).abs() < 1e-9);
            }
            LpOutcome::Infeasible => panic!("diagnostic pass is always solvable at T=0"),
        }
    }

    #[test]
    fn raw_cap_below_target_makes_primary_pass_infeasible() {
        let mut input = single_recipe_input(120.0);
        input.limits.raw_supply_per_min.insert("iron_ore".to_string(), 10.0);
        let translated = translate(&input);
        match solve_pass(&input, &translated, Pass::Primary { target_rate: 120.0 }) {
            LpOutcome::Infeasible => {}
            LpOutcome::Optimal(_) => panic!("expected infeasible, raw cap is far below target"),
        }
    }
}
