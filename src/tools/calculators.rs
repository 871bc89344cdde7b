//! Calculator operations
//!
//! Each operation validates free-text input, runs the matching engine and,
//! when a user is present, records the calculation to history. Recording is
//! best-effort: the computed result is returned immediately and a failed
//! write only shows up in the diagnostic log.

use serde_json::{json, Value};

use crate::calc::energy::{ActivityLevel, EnergyResult, Sex};
use crate::calc::macros::Goal;
use crate::calc::pipeline::resolve_calories;
use crate::calc::{bmi, energy, macros, parse_positive, BmiResult, MacroResult};
use crate::db::Database;
use crate::models::{CalculationEntry, CalculationType};
use crate::session::SessionContext;

/// Write a history entry without blocking the caller
///
/// Inside a tokio runtime the write runs on a blocking task; outside one
/// (unit tests, maintenance binaries) it runs inline. Either way a failure
/// is logged and never propagated.
fn record_best_effort(
    db: &Database,
    user_id: String,
    calculation_type: CalculationType,
    input_data: Value,
    result_data: Value,
) {
    let db = db.clone();
    let write = move || {
        let outcome = db.with_conn(|conn| {
            CalculationEntry::record(conn, &user_id, calculation_type, &input_data, &result_data)
                .map(|_| ())
        });
        if let Err(e) = outcome {
            tracing::warn!(
                "failed to record {} calculation to history: {}",
                calculation_type.as_str(),
                e
            );
        }
    };

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                let _ = tokio::task::spawn_blocking(write).await;
            });
        }
        Err(_) => write(),
    }
}

/// Run the BMI calculator
///
/// Returns None while either field is missing or non-positive.
pub fn run_bmi(
    db: &Database,
    session: &SessionContext,
    weight: &str,
    height: &str,
) -> Option<BmiResult> {
    let weight_kg = parse_positive(weight)?;
    let height_cm = parse_positive(height)?;
    let result = bmi::compute(weight_kg, height_cm)?;

    if let Some(user_id) = &session.user_id {
        record_best_effort(
            db,
            user_id.clone(),
            CalculationType::Bmi,
            json!({ "weight": weight_kg, "height": height_cm }),
            serde_json::to_value(result).unwrap_or(Value::Null),
        );
    }

    Some(result)
}

/// Run the TMB/TDEE calculator
///
/// Returns None until every field is present and positive.
pub fn run_energy(
    db: &Database,
    session: &SessionContext,
    weight: &str,
    height: &str,
    age: &str,
    sex: Option<Sex>,
    activity: Option<ActivityLevel>,
) -> Option<EnergyResult> {
    let weight_kg = parse_positive(weight)?;
    let height_cm = parse_positive(height)?;
    let age_years = parse_positive(age)?;
    let sex = sex?;
    let activity = activity?;

    let result = energy::compute(weight_kg, height_cm, age_years, sex, activity)?;

    if let Some(user_id) = &session.user_id {
        record_best_effort(
            db,
            user_id.clone(),
            CalculationType::Tmb,
            json!({
                "weight": weight_kg,
                "height": height_cm,
                "age": age_years,
                "sex": sex,
                "activity": activity,
            }),
            serde_json::to_value(result).unwrap_or(Value::Null),
        );
    }

    Some(result)
}

/// Run the macro distribution calculator
///
/// The calorie target is the direct entry when present, otherwise the
/// goal-matched field of the supplied TDEE result.
pub fn run_macros(
    db: &Database,
    session: &SessionContext,
    weight: &str,
    goal: Option<Goal>,
    calories: &str,
    energy: Option<&EnergyResult>,
) -> Option<MacroResult> {
    let weight_kg = parse_positive(weight)?;
    let goal = goal?;
    let total_calories = resolve_calories(calories, goal, energy)?;

    let result = macros::compute(weight_kg, goal, total_calories)?;

    if result.exceeds_budget() {
        tracing::warn!(
            "macro split exceeds calorie target: protein and fat alone pass {} kcal",
            total_calories
        );
    }

    if let Some(user_id) = &session.user_id {
        record_best_effort(
            db,
            user_id.clone(),
            CalculationType::Macro,
            json!({ "weight": weight_kg, "goal": goal }),
            serde_json::to_value(result).unwrap_or(Value::Null),
        );
    }

    Some(result)
}
