//! Calculation history operations
//!
//! Display-ready listing and explicit deletion of recorded calculations.
//! Listing is read-only and always scoped to the session's user.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::db::Database;
use crate::models::{CalculationEntry, CalculationType};
use crate::session::SessionContext;

/// A history entry prepared for display
#[derive(Debug, Serialize)]
pub struct HistoryEntryView {
    pub id: i64,
    pub calculation_type: CalculationType,
    /// Localized type label (IMC, TMB/TDEE, Macros)
    pub label: &'static str,
    /// One-line result summary
    pub summary: String,
    /// dd/MM/yyyy HH:mm
    pub created_at: String,
}

/// Response for list_history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntryView>,
    pub total: usize,
}

/// Response for delete_history
#[derive(Debug, Serialize)]
pub struct DeleteHistoryResponse {
    pub success: bool,
    pub deleted_id: i64,
}

/// List the session user's history, newest first
///
/// An anonymous session simply sees an empty list.
pub fn list_history(db: &Database, session: &SessionContext) -> Result<HistoryResponse, String> {
    let Some(user_id) = &session.user_id else {
        return Ok(HistoryResponse { entries: Vec::new(), total: 0 });
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entries = CalculationEntry::list_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to load history: {}", e))?;

    let views: Vec<HistoryEntryView> = entries
        .iter()
        .map(|entry| HistoryEntryView {
            id: entry.id,
            calculation_type: entry.calculation_type,
            label: entry.calculation_type.label(),
            summary: summarize(entry.calculation_type, &entry.result_data),
            created_at: format_timestamp(&entry.created_at),
        })
        .collect();

    let total = views.len();
    Ok(HistoryResponse { entries: views, total })
}

/// Delete a single history entry owned by the session user
///
/// Entries belong exclusively to their owner; a row owned by someone else
/// is indistinguishable from a missing one.
pub fn delete_history(
    db: &Database,
    session: &SessionContext,
    id: i64,
) -> Result<DeleteHistoryResponse, String> {
    let Some(user_id) = &session.user_id else {
        return Err("No authenticated user".to_string());
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = CalculationEntry::delete_for_user(&conn, id, user_id)
        .map_err(|e| format!("Failed to delete history entry: {}", e))?;

    if !deleted {
        return Err(format!("History entry not found with id: {}", id));
    }

    Ok(DeleteHistoryResponse {
        success: true,
        deleted_id: id,
    })
}

/// One-line summary of a recorded result, per calculation type
fn summarize(calculation_type: CalculationType, result: &Value) -> String {
    match calculation_type {
        CalculationType::Bmi => {
            let bmi = result["bmi"].as_f64().unwrap_or(0.0);
            let classification = result["classification"].as_str().unwrap_or("?");
            format!("IMC: {} - {}", bmi, classification)
        }
        CalculationType::Tmb => {
            let tmb = result["tmb"].as_i64().unwrap_or(0);
            let tdee = result["tdee"].as_i64().unwrap_or(0);
            format!("TMB: {} kcal | TDEE: {} kcal", tmb, tdee)
        }
        CalculationType::Macro => {
            let calories = result["calories"].as_f64().unwrap_or(0.0);
            let protein = result["protein"]["g"].as_i64().unwrap_or(0);
            let carbs = result["carbs"]["g"].as_i64().unwrap_or(0);
            let fat = result["fat"]["g"].as_i64().unwrap_or(0);
            format!(
                "{} kcal | P: {}g | C: {}g | G: {}g",
                calories, protein, carbs, fat
            )
        }
    }
}

/// Format a SQLite timestamp for display
fn format_timestamp(created_at: &str) -> String {
    NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}
