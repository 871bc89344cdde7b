//! Calculation history model
//!
//! One row per completed calculator run, owned by a single user.
//! Rows are immutable; they are only inserted and deleted.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::DbResult;

/// Kind of calculator that produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    Bmi,
    Tmb,
    Macro,
}

impl CalculationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationType::Bmi => "bmi",
            CalculationType::Tmb => "tmb",
            CalculationType::Macro => "macro",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bmi" => Some(CalculationType::Bmi),
            "tmb" => Some(CalculationType::Tmb),
            "macro" => Some(CalculationType::Macro),
            _ => None,
        }
    }

    /// Display label used by the history screen
    pub fn label(&self) -> &'static str {
        match self {
            CalculationType::Bmi => "IMC",
            CalculationType::Tmb => "TMB/TDEE",
            CalculationType::Macro => "Macros",
        }
    }
}

/// A recorded calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationEntry {
    pub id: i64,
    pub user_id: String,
    pub calculation_type: CalculationType,
    pub input_data: Value,
    pub result_data: Value,
    pub created_at: String,
}

impl CalculationEntry {
    /// Create a CalculationEntry from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let type_str: String = row.get("calculation_type")?;
        let input_str: String = row.get("input_data")?;
        let result_str: String = row.get("result_data")?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            // The CHECK constraint guarantees a known type
            calculation_type: CalculationType::from_str(&type_str)
                .unwrap_or(CalculationType::Bmi),
            input_data: serde_json::from_str(&input_str).unwrap_or(Value::Null),
            result_data: serde_json::from_str(&result_str).unwrap_or(Value::Null),
            created_at: row.get("created_at")?,
        })
    }

    /// Record a completed calculation for a user
    pub fn record(
        conn: &Connection,
        user_id: &str,
        calculation_type: CalculationType,
        input_data: &Value,
        result_data: &Value,
    ) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO calculation_history (user_id, calculation_type, input_data, result_data)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                user_id,
                calculation_type.as_str(),
                serde_json::to_string(input_data)?,
                serde_json::to_string(result_data)?,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get an entry by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM calculation_history WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's history, newest first
    pub fn list_for_user(conn: &Connection, user_id: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM calculation_history
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )?;

        let entries = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Count a user's history entries
    pub fn count_for_user(conn: &Connection, user_id: &str) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM calculation_history WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Delete a single entry owned by the given user
    ///
    /// The backing store has no row-level security, so ownership is
    /// enforced here: a row belonging to another user counts as not found.
    /// Returns Ok(true) if deleted, Ok(false) if not found or not owned.
    pub fn delete_for_user(conn: &Connection, id: i64, user_id: &str) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM calculation_history WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use serde_json::json;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_record_and_list() {
        let conn = test_conn();

        let entry = CalculationEntry::record(
            &conn,
            "user-1",
            CalculationType::Bmi,
            &json!({"weight": 70.0, "height": 175.0}),
            &json!({"bmi": 22.9, "classification": "Normal"}),
        )
        .unwrap();
        assert!(entry.id > 0);
        assert_eq!(entry.calculation_type, CalculationType::Bmi);
        assert_eq!(entry.result_data["bmi"], json!(22.9));

        let entries = CalculationEntry::list_for_user(&conn, "user-1").unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_list_is_newest_first() {
        let conn = test_conn();
        for i in 0..3 {
            CalculationEntry::record(
                &conn,
                "user-1",
                CalculationType::Tmb,
                &json!({"n": i}),
                &json!({"n": i}),
            )
            .unwrap();
        }

        let entries = CalculationEntry::list_for_user(&conn, "user-1").unwrap();
        // Same created_at second; id breaks the tie
        assert_eq!(entries[0].input_data["n"], json!(2));
        assert_eq!(entries[2].input_data["n"], json!(0));
    }

    #[test]
    fn test_list_filters_by_owner() {
        let conn = test_conn();
        CalculationEntry::record(&conn, "user-1", CalculationType::Bmi, &json!({}), &json!({}))
            .unwrap();
        CalculationEntry::record(&conn, "user-2", CalculationType::Bmi, &json!({}), &json!({}))
            .unwrap();

        assert_eq!(CalculationEntry::list_for_user(&conn, "user-1").unwrap().len(), 1);
        assert_eq!(CalculationEntry::count_for_user(&conn, "user-2").unwrap(), 1);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let conn = test_conn();
        let first = CalculationEntry::record(
            &conn, "user-1", CalculationType::Bmi, &json!({}), &json!({}),
        )
        .unwrap();
        let second = CalculationEntry::record(
            &conn, "user-1", CalculationType::Macro, &json!({}), &json!({}),
        )
        .unwrap();

        assert!(CalculationEntry::delete_for_user(&conn, first.id, "user-1").unwrap());
        assert!(!CalculationEntry::delete_for_user(&conn, first.id, "user-1").unwrap());

        let remaining = CalculationEntry::list_for_user(&conn, "user-1").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
    }

    #[test]
    fn test_delete_requires_ownership() {
        let conn = test_conn();
        let entry = CalculationEntry::record(
            &conn, "user-1", CalculationType::Bmi, &json!({}), &json!({}),
        )
        .unwrap();

        // Another user's id does not touch the row
        assert!(!CalculationEntry::delete_for_user(&conn, entry.id, "user-2").unwrap());
        assert_eq!(CalculationEntry::count_for_user(&conn, "user-1").unwrap(), 1);

        assert!(CalculationEntry::delete_for_user(&conn, entry.id, "user-1").unwrap());
    }
}
