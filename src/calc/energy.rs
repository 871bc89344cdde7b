//! Basal metabolic rate and daily energy expenditure engine
//!
//! TMB via the Mifflin-St Jeor formula, TDEE via a fixed activity
//! multiplier table, and the three calorie-goal targets at a fixed
//! 500 kcal deficit/surplus.

use serde::{Deserialize, Serialize};

use super::input::positive;

/// Fixed deficit/surplus applied to TDEE for the loss/gain targets
const GOAL_STEP_KCAL: i64 = 500;

/// Biological sex, as used by Mifflin-St Jeor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Activity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// TDEE multiplier for this tier
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Result of a TMB/TDEE calculation, all values in whole kcal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyResult {
    pub tmb: i64,
    pub tdee: i64,
    pub loss: i64,
    pub maintenance: i64,
    pub gain: i64,
}

/// Compute TMB and TDEE from the full measurement set
///
/// Returns None when any numeric input is missing, zero or negative.
pub fn compute(
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    sex: Sex,
    activity: ActivityLevel,
) -> Option<EnergyResult> {
    let weight_kg = positive(weight_kg)?;
    let height_cm = positive(height_cm)?;
    let age_years = positive(age_years)?;

    // Mifflin-St Jeor
    let tmb = match sex {
        Sex::Male => 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years + 5.0,
        Sex::Female => 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years - 161.0,
    };

    let tdee = (tmb * activity.multiplier()).round() as i64;

    Some(EnergyResult {
        tmb: tmb.round() as i64,
        tdee,
        loss: tdee - GOAL_STEP_KCAL,
        maintenance: tdee,
        gain: tdee + GOAL_STEP_KCAL,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        // weight=80, height=180, age=30, male, moderate
        let result = compute(80.0, 180.0, 30.0, Sex::Male, ActivityLevel::Moderate).unwrap();
        assert_eq!(result.tmb, 1805);
        assert_eq!(result.tdee, 2798);
        assert_eq!(result.loss, 2298);
        assert_eq!(result.maintenance, 2798);
        assert_eq!(result.gain, 3298);
    }

    #[test]
    fn test_sex_offset_is_166() {
        let male = compute(70.0, 170.0, 40.0, Sex::Male, ActivityLevel::Sedentary).unwrap();
        let female = compute(70.0, 170.0, 40.0, Sex::Female, ActivityLevel::Sedentary).unwrap();
        assert_eq!(male.tmb - female.tmb, 166);
    }

    #[test]
    fn test_loss_gain_spread_is_1000() {
        for activity in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ] {
            let result = compute(65.0, 168.0, 27.0, Sex::Female, activity).unwrap();
            assert_eq!(result.loss + 1000, result.gain);
            assert_eq!(result.maintenance, result.tdee);
        }
    }

    #[test]
    fn test_multiplier_table() {
        assert!((ActivityLevel::Sedentary.multiplier() - 1.2).abs() < 1e-9);
        assert!((ActivityLevel::Light.multiplier() - 1.375).abs() < 1e-9);
        assert!((ActivityLevel::Moderate.multiplier() - 1.55).abs() < 1e-9);
        assert!((ActivityLevel::Active.multiplier() - 1.725).abs() < 1e-9);
        assert!((ActivityLevel::VeryActive.multiplier() - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(compute(0.0, 180.0, 30.0, Sex::Male, ActivityLevel::Light).is_none());
        assert!(compute(80.0, -180.0, 30.0, Sex::Male, ActivityLevel::Light).is_none());
        assert!(compute(80.0, 180.0, 0.0, Sex::Male, ActivityLevel::Light).is_none());
    }

    #[test]
    fn test_activity_serializes_camel_case() {
        let json = serde_json::to_string(&ActivityLevel::VeryActive).unwrap();
        assert_eq!(json, "\"veryActive\"");
    }
}
