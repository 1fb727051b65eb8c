//! Orchestration: translate the input, run the primary LP pass, and on
//! infeasibility fall back to the diagnostic free-target pass with
//! bottleneck extraction (spec §4.6).

use crate::lp::{self, LpOutcome, Pass, Solved};
use crate::model::{FactoryInput, FactoryOutput};
use crate::translate;

const EPS: f64 = 1e-6;

/// Solve a Factory instance end to end.
///
/// Never fails: an unsatisfiable target is a structured
/// [`FactoryOutput::Infeasible`] result, not a process error (spec §7).
pub fn solve(input: &FactoryInput) -> FactoryOutput {
    let translated = translate::translate(input);

    let primary = lp::solve_pass(
        input,
        &translated,
        Pass::Primary {
            target_rate: input.target.rate_per_min,
        },
    );

    match primary {
        LpOutcome::Optimal(solved) => ok_output(input, &solved),
        LpOutcome::Infeasible => {
            tracing::debug!(
                target = input.target.rate_per_min,
                "primary pass infeasible, running diagnostic pass"
            );
            diagnostic_output(input, &translated)
        }
    }
}

fn ok_output(input: &FactoryInput, solved: &Solved) -> FactoryOutput {
    let per_machine_counts = solved
        .machine_usage
        .iter()
        .filter(|(machine, _)| input.machines.contains_key(*machine))
        .map(|(machine, usage)| (machine.clone(), usage.ceil() as u64))
        .collect();

    FactoryOutput::Ok {
        per_recipe_crafts_per_min: solved.per_recipe_cpm.clone(),
        per_machine_counts,
        raw_consumption_per_min: solved.raw_consumption.clone(),
    }
}

fn diagnostic_output(
    input: &FactoryInput,
    translated: &translate::TranslatedModel,
) -> FactoryOutput {
    match lp::solve_pass(input, translated, Pass::Diagnostic) {
        LpOutcome::Infeasible => FactoryOutput::Infeasible {
            max_feasible_target_per_min: 0.0,
            bottleneck_hint: vec!["unsatisfiable".to_string()],
        },
        LpOutcome::Optimal(solved) => {
            let mut hint = Vec::new();

            for (machine, cap) in &input.limits.max_machines {
                let usage = solved.machine_usage.get(machine).copied().unwrap_or(0.0);
                if (usage - cap).abs() <= EPS {
                    hint.push(format!("{machine} cap"));
                }
            }
            for (item, cap) in &input.limits.raw_supply_per_min {
                let consumed = solved.raw_consumption.get(item).copied().unwrap_or(0.0);
                if (consumed - cap).abs() <= EPS {
                    hint.push(format!("{item} supply"));
                }
            }

            FactoryOutput::Infeasible {
                max_feasible_target_per_min: solved.target_value,
                bottleneck_hint: hint,
            }
        }
    }
}
