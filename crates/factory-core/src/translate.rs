//! Model Translator: derives effective throughput and productivity per
//! recipe, and enumerates the item universe (spec §4.5).

use std::collections::BTreeSet;

use crate::model::FactoryInput;

/// Per-recipe derived quantities.
#[derive(Debug, Clone, Copy)]
pub struct RecipeRates {
    /// `base_cpm(machine) * (1 + speed(machine))` (spec §3 invariant a).
    pub eff_cpm: f64,
    /// `1 + prod(machine)`, multiplying every output (spec §3 invariant b).
    pub productivity: f64,
}

/// The translated model: every recipe's derived rates, plus the full set
/// of item names appearing anywhere in the recipe graph.
pub struct TranslatedModel {
    pub rates: Vec<(String, RecipeRates)>,
    pub items: Vec<String>,
}

/// Translate raw recipe/machine/module data into the rates the LP builder
/// needs.
pub fn translate(input: &FactoryInput) -> TranslatedModel {
    let mut rates = Vec::with_capacity(input.recipes.len());
    let mut items = BTreeSet::new();

    for (name, recipe) in &input.recipes {
        items.extend(recipe.r#in.keys().cloned());
        items.extend(recipe.out.keys().cloned());

        let base_cpm = match input.machines.get(&recipe.machine) {
            Some(m) => m.crafts_per_min,
            None => {
                tracing::warn!(
                    recipe = %name,
                    machine = %recipe.machine,
                    "recipe references a machine class with no declared throughput; \
                     treating its effective rate as 0"
                );
                0.0
            }
        };
        let module = input.modules.get(&recipe.machine).cloned().unwrap_or_default();
        let eff_cpm = base_cpm * (1.0 + module.speed);
        let productivity = 1.0 + module.prod;

        rates.push((name.clone(), RecipeRates { eff_cpm, productivity }));
    }

    items.insert(input.target.item.clone());

    TranslatedModel {
        rates,
        items: items.into_iter().collect(),
    }
}
