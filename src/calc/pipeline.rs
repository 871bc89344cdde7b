//! Derivation pipeline
//!
//! Shared input state feeding all three calculators. Any field change
//! re-derives every result from scratch; the computations are pure and
//! cheap, so there is no scheduling. The TDEE result optionally feeds the
//! macro engine as its calorie source.

use super::bmi::{self, BmiResult};
use super::energy::{self, ActivityLevel, EnergyResult, Sex};
use super::input::parse_positive;
use super::macros::{self, Goal, MacroResult};

/// Raw calculator inputs as the forms hold them
///
/// Numeric fields stay as free text until derivation; selections are
/// None while unselected.
#[derive(Debug, Clone, Default)]
pub struct CalculatorInputs {
    pub weight: String,
    pub height: String,
    pub age: String,
    /// Direct calorie target for the macro calculator; when empty the
    /// TDEE result supplies the goal-matched target instead
    pub calories: String,
    pub sex: Option<Sex>,
    pub activity: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

/// Everything derivable from the current inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derived {
    pub bmi: Option<BmiResult>,
    pub energy: Option<EnergyResult>,
    pub macros: Option<MacroResult>,
}

impl CalculatorInputs {
    /// Re-derive all three results from the current inputs
    pub fn derive(&self) -> Derived {
        let weight = parse_positive(&self.weight);
        let height = parse_positive(&self.height);
        let age = parse_positive(&self.age);

        let bmi = match (weight, height) {
            (Some(w), Some(h)) => bmi::compute(w, h),
            _ => None,
        };

        let energy = match (weight, height, age, self.sex, self.activity) {
            (Some(w), Some(h), Some(a), Some(sex), Some(activity)) => {
                energy::compute(w, h, a, sex, activity)
            }
            _ => None,
        };

        let macros = match (weight, self.goal) {
            (Some(w), Some(goal)) => {
                resolve_calories(&self.calories, goal, energy.as_ref())
                    .and_then(|calories| macros::compute(w, goal, calories))
            }
            _ => None,
        };

        Derived { bmi, energy, macros }
    }
}

/// Resolve the macro calculator's calorie target
///
/// A direct entry wins; otherwise the TDEE target matching the goal
/// (loss -> loss, gain -> gain, else maintenance).
pub fn resolve_calories(direct: &str, goal: Goal, energy: Option<&EnergyResult>) -> Option<f64> {
    if let Some(calories) = parse_positive(direct) {
        return Some(calories);
    }
    energy.map(|e| goal.target_from(e) as f64)
}

/// Input state plus its derived results, re-derived on every change
#[derive(Debug, Clone, Default)]
pub struct CalculatorState {
    pub inputs: CalculatorInputs,
    pub derived: Derived,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_weight(&mut self, value: &str) {
        self.inputs.weight = value.to_string();
        self.rederive();
    }

    pub fn set_height(&mut self, value: &str) {
        self.inputs.height = value.to_string();
        self.rederive();
    }

    pub fn set_age(&mut self, value: &str) {
        self.inputs.age = value.to_string();
        self.rederive();
    }

    pub fn set_calories(&mut self, value: &str) {
        self.inputs.calories = value.to_string();
        self.rederive();
    }

    pub fn set_sex(&mut self, sex: Option<Sex>) {
        self.inputs.sex = sex;
        self.rederive();
    }

    pub fn set_activity(&mut self, activity: Option<ActivityLevel>) {
        self.inputs.activity = activity;
        self.rederive();
    }

    pub fn set_goal(&mut self, goal: Option<Goal>) {
        self.inputs.goal = goal;
        self.rederive();
    }

    fn rederive(&mut self) {
        self.derived = self.inputs.derive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_weight_feeds_all_engines() {
        let mut state = CalculatorState::new();
        state.set_weight("80");
        state.set_height("180");
        state.set_age("30");
        state.set_sex(Some(Sex::Male));
        state.set_activity(Some(ActivityLevel::Moderate));
        state.set_goal(Some(Goal::Maintenance));

        let derived = &state.derived;
        assert!((derived.bmi.unwrap().bmi - 24.7).abs() < 1e-9);
        assert_eq!(derived.energy.unwrap().tdee, 2798);
        // No direct calories: the macro engine picked up the TDEE maintenance target
        let macros = derived.macros.unwrap();
        assert!((macros.calories - 2798.0).abs() < 1e-9);
        assert_eq!(macros.protein.g, 128);
    }

    #[test]
    fn test_direct_calories_win_over_tdee() {
        let mut state = CalculatorState::new();
        state.set_weight("80");
        state.set_height("180");
        state.set_age("30");
        state.set_sex(Some(Sex::Male));
        state.set_activity(Some(ActivityLevel::Moderate));
        state.set_goal(Some(Goal::Maintenance));
        state.set_calories("2000");

        assert!((state.derived.macros.unwrap().calories - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_goal_selects_matching_tdee_target() {
        let mut state = CalculatorState::new();
        state.set_weight("80");
        state.set_height("180");
        state.set_age("30");
        state.set_sex(Some(Sex::Male));
        state.set_activity(Some(ActivityLevel::Moderate));

        state.set_goal(Some(Goal::Loss));
        assert!((state.derived.macros.unwrap().calories - 2298.0).abs() < 1e-9);

        state.set_goal(Some(Goal::Gain));
        assert!((state.derived.macros.unwrap().calories - 3298.0).abs() < 1e-9);
    }

    #[test]
    fn test_incomplete_inputs_withhold_results() {
        let mut state = CalculatorState::new();
        state.set_weight("70");
        // Height missing: nothing derivable yet
        assert!(state.derived.bmi.is_none());
        assert!(state.derived.energy.is_none());
        assert!(state.derived.macros.is_none());

        state.set_height("175");
        assert!(state.derived.bmi.is_some());
        // Energy still needs age, sex and activity
        assert!(state.derived.energy.is_none());
    }

    #[test]
    fn test_clearing_a_field_withdraws_dependents() {
        let mut state = CalculatorState::new();
        state.set_weight("70");
        state.set_height("175");
        assert!(state.derived.bmi.is_some());

        state.set_weight("");
        assert!(state.derived.bmi.is_none());
    }

    #[test]
    fn test_rederive_is_idempotent() {
        let mut state = CalculatorState::new();
        state.set_weight("70");
        state.set_height("175");

        let first = state.derived.clone();
        state.set_weight("70");
        assert_eq!(first, state.derived);
    }
}
