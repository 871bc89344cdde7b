//! Macronutrient distribution engine
//!
//! Allocates a calorie target across protein, fat and carbohydrates.
//! Protein is weight-derived per goal, fat is a fixed 25% of calories,
//! and carbohydrates absorb the remainder.

use serde::{Deserialize, Serialize};

use super::energy::EnergyResult;
use super::input::positive;

/// Fat always takes this share of the calorie target
const FAT_CALORIE_SHARE: f64 = 0.25;

/// Energy densities in kcal per gram
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Calorie goal driving the protein ratio and TDEE target selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Loss,
    Maintenance,
    Gain,
}

impl Goal {
    /// Grams of protein per kg of body weight for this goal
    pub fn protein_per_kg(&self) -> f64 {
        match self {
            Goal::Loss => 2.0,
            Goal::Maintenance => 1.6,
            Goal::Gain => 1.8,
        }
    }

    /// The TDEE target field that matches this goal
    pub fn target_from(&self, energy: &EnergyResult) -> i64 {
        match self {
            Goal::Loss => energy.loss,
            Goal::Maintenance => energy.maintenance,
            Goal::Gain => energy.gain,
        }
    }
}

/// One macronutrient's share of the distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroComponent {
    pub g: i64,
    pub kcal: i64,
    pub percent: i64,
}

/// Result of a macro distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroResult {
    pub calories: f64,
    pub protein: MacroComponent,
    pub fat: MacroComponent,
    pub carbs: MacroComponent,
}

impl MacroResult {
    /// True when protein and fat alone exceed the calorie target
    ///
    /// Carbohydrates go negative in that case; the values are reported
    /// as-is so the caller can flag the condition.
    pub fn exceeds_budget(&self) -> bool {
        self.carbs.kcal < 0
    }
}

/// Distribute a calorie target across protein, fat and carbohydrates
///
/// Returns None when weight or the calorie target is missing, zero or
/// negative. Derivation order matters: protein from body weight, fat as a
/// fixed fraction of the target, carbohydrates from what remains.
pub fn compute(weight_kg: f64, goal: Goal, total_calories: f64) -> Option<MacroResult> {
    let weight_kg = positive(weight_kg)?;
    let total_calories = positive(total_calories)?;

    let protein_g = weight_kg * goal.protein_per_kg();
    let protein_kcal = (protein_g * KCAL_PER_G_PROTEIN).round() as i64;

    let fat_kcal = (total_calories * FAT_CALORIE_SHARE).round() as i64;

    // Carbs absorb whatever the rounded protein and fat leave over; this
    // keeps the three components summing exactly to the rounded target.
    let carbs_kcal = total_calories.round() as i64 - protein_kcal - fat_kcal;

    Some(MacroResult {
        calories: total_calories,
        protein: MacroComponent {
            g: protein_g.round() as i64,
            kcal: protein_kcal,
            percent: percent_of(protein_kcal, total_calories),
        },
        fat: MacroComponent {
            g: (fat_kcal as f64 / KCAL_PER_G_FAT).round() as i64,
            kcal: fat_kcal,
            // Fixed share, not recomputed from rounded kcal
            percent: 25,
        },
        carbs: MacroComponent {
            g: (carbs_kcal as f64 / KCAL_PER_G_CARBS).round() as i64,
            kcal: carbs_kcal,
            percent: percent_of(carbs_kcal, total_calories),
        },
    })
}

fn percent_of(kcal: i64, total: f64) -> i64 {
    (kcal as f64 / total * 100.0).round() as i64
}
