//! Food model
//!
//! Represents a catalog food with nutritional information per serving.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::Nutrition;

/// A catalog food with nutritional information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub weight_volume: Option<String>,
    pub price: Option<f64>,
    pub allergens: Option<String>,
    pub storage: Option<String>,
    pub serving_size: f64,
    pub serving_unit: String,
    pub nutrition: Nutrition,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCreate {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub weight_volume: Option<String>,
    pub price: Option<f64>,
    pub allergens: Option<String>,
    pub storage: Option<String>,
    pub serving_size: f64,
    pub serving_unit: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
}

/// Data for updating a food
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub weight_volume: Option<String>,
    pub price: Option<f64>,
    pub allergens: Option<String>,
    pub storage: Option<String>,
    pub serving_size: Option<f64>,
    pub serving_unit: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
}

impl Food {
    /// Create a Food from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            category: row.get("category")?,
            description: row.get("description")?,
            weight_volume: row.get("weight_volume")?,
            price: row.get("price")?,
            allergens: row.get("allergens")?,
            storage: row.get("storage")?,
            serving_size: row.get("serving_size")?,
            serving_unit: row.get("serving_unit")?,
            nutrition: Nutrition {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fat: row.get("fat")?,
                fiber: row.get("fiber")?,
                sodium: row.get("sodium")?,
            },
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new food into the catalog
    pub fn create(conn: &Connection, data: &FoodCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO foods (
                name, category, description, weight_volume, price, allergens, storage,
                serving_size, serving_unit,
                calories, protein, carbs, fat, fiber, sodium
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                data.name,
                data.category,
                data.description,
                data.weight_volume,
                data.price,
                data.allergens,
                data.storage,
                data.serving_size,
                data.serving_unit,
                data.calories,
                data.protein,
                data.carbs,
                data.fat,
                data.fiber,
                data.sodium,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a food by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM foods WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(food) => Ok(Some(food)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Search foods by name or category
    pub fn search(conn: &Connection, query: &str, limit: i64) -> DbResult<Vec<Self>> {
        let search_pattern = format!("%{}%", query);
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM foods
            WHERE name LIKE ?1 OR category LIKE ?1
            ORDER BY name ASC
            LIMIT ?2
            "#,
        )?;

        let foods = stmt
            .query_map(params![search_pattern, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(foods)
    }

    /// List foods with optional category filtering and sorting
    pub fn list(
        conn: &Connection,
        category: Option<&str>,
        sort_by: &str,
        sort_order: &str,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Self>> {
        let order = if sort_order.eq_ignore_ascii_case("desc") { "DESC" } else { "ASC" };
        let sort_col = match sort_by.to_lowercase().as_str() {
            "created_at" => "created_at",
            "calories" => "calories",
            "price" => "price",
            _ => "name",
        };

        let sql = if category.is_some() {
            format!(
                "SELECT * FROM foods WHERE category = ?1 ORDER BY {} {} LIMIT ?2 OFFSET ?3",
                sort_col, order
            )
        } else {
            format!(
                "SELECT * FROM foods ORDER BY {} {} LIMIT ?1 OFFSET ?2",
                sort_col, order
            )
        };

        let mut stmt = conn.prepare(&sql)?;

        let foods = if let Some(cat) = category {
            stmt.query_map(params![cat, limit, offset], Self::from_row)?
                .collect::<Result<Vec<_>, _>>()?
        } else {
            stmt.query_map(params![limit, offset], Self::from_row)?
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(foods)
    }

    /// Update a food
    pub fn update(conn: &Connection, id: i64, data: &FoodUpdate) -> DbResult<Option<Self>> {
        // Build dynamic UPDATE query
        let mut updates = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        macro_rules! add_update {
            ($field:ident, $col:expr) => {
                if let Some(ref val) = data.$field {
                    updates.push(format!("{} = ?{}", $col, params_vec.len() + 1));
                    params_vec.push(Box::new(val.clone()));
                }
            };
        }

        add_update!(name, "name");
        add_update!(category, "category");
        add_update!(description, "description");
        add_update!(weight_volume, "weight_volume");
        add_update!(price, "price");
        add_update!(allergens, "allergens");
        add_update!(storage, "storage");
        add_update!(serving_size, "serving_size");
        add_update!(serving_unit, "serving_unit");
        add_update!(calories, "calories");
        add_update!(protein, "protein");
        add_update!(carbs, "carbs");
        add_update!(fat, "fat");
        add_update!(fiber, "fiber");
        add_update!(sodium, "sodium");

        if updates.is_empty() {
            return Self::get_by_id(conn, id);
        }

        updates.push("updated_at = datetime('now')".to_string());

        let sql = format!(
            "UPDATE foods SET {} WHERE id = ?{}",
            updates.join(", "),
            params_vec.len() + 1
        );

        params_vec.push(Box::new(id));

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_refs.as_slice())?;

        Self::get_by_id(conn, id)
    }

    /// Count foods (optionally filtered by category)
    pub fn count(conn: &Connection, category: Option<&str>) -> DbResult<i64> {
        let count: i64 = if let Some(cat) = category {
            conn.query_row(
                "SELECT COUNT(*) FROM foods WHERE category = ?1",
                [cat],
                |row| row.get(0),
            )?
        } else {
            conn.query_row("SELECT COUNT(*) FROM foods", [], |row| row.get(0))?
        };
        Ok(count)
    }

    /// Delete a food
    /// Returns Ok(true) if deleted, Ok(false) if not found
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM foods WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Nutrition normalized to 100 g or 100 ml, when the serving unit allows it
    ///
    /// Returns None for count-based or unrecognized units.
    pub fn per_100(&self) -> Option<Nutrition> {
        let base = serving_in_base_units(self.serving_size, &self.serving_unit)?;
        if base <= 0.0 {
            return None;
        }
        Some(self.nutrition.scale(100.0 / base))
    }
}

/// Convert a serving to grams or milliliters, whichever the unit denotes
fn serving_in_base_units(size: f64, unit: &str) -> Option<f64> {
    match unit.trim().to_lowercase().as_str() {
        "g" | "grama" | "gramas" | "gram" | "grams" => Some(size),
        "ml" | "milliliter" | "milliliters" => Some(size),
        "kg" => Some(size * 1000.0),
        "l" | "litro" | "liter" => Some(size * 1000.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample_create(name: &str) -> FoodCreate {
        FoodCreate {
            name: name.to_string(),
            category: Some("Frutas".to_string()),
            description: None,
            weight_volume: None,
            price: Some(4.50),
            allergens: None,
            storage: Some("Refrigerado".to_string()),
            serving_size: 100.0,
            serving_unit: "g".to_string(),
            calories: 52.0,
            protein: 0.3,
            carbs: 14.0,
            fat: 0.2,
            fiber: Some(2.4),
            sodium: Some(1.0),
        }
    }

    #[test]
    fn test_create_and_get() {
        let conn = test_conn();
        let food = Food::create(&conn, &sample_create("Maçã")).unwrap();
        assert!(food.id > 0);

        let fetched = Food::get_by_id(&conn, food.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Maçã");
        assert_eq!(fetched.category.as_deref(), Some("Frutas"));
        assert!((fetched.nutrition.calories - 52.0).abs() < 1e-9);
    }

    #[test]
    fn test_search_by_name_and_category() {
        let conn = test_conn();
        Food::create(&conn, &sample_create("Maçã")).unwrap();
        Food::create(&conn, &sample_create("Banana")).unwrap();

        let by_name = Food::search(&conn, "maç", 10).unwrap();
        assert_eq!(by_name.len(), 1);

        let by_category = Food::search(&conn, "Frutas", 10).unwrap();
        assert_eq!(by_category.len(), 2);
    }

    #[test]
    fn test_update_partial() {
        let conn = test_conn();
        let food = Food::create(&conn, &sample_create("Maçã")).unwrap();

        let update = FoodUpdate {
            price: Some(5.25),
            ..Default::default()
        };
        let updated = Food::update(&conn, food.id, &update).unwrap().unwrap();
        assert_eq!(updated.price, Some(5.25));
        // Untouched fields survive
        assert_eq!(updated.name, "Maçã");
    }

    #[test]
    fn test_delete() {
        let conn = test_conn();
        let food = Food::create(&conn, &sample_create("Maçã")).unwrap();
        assert!(Food::delete(&conn, food.id).unwrap());
        assert!(!Food::delete(&conn, food.id).unwrap());
        assert!(Food::get_by_id(&conn, food.id).unwrap().is_none());
    }

    #[test]
    fn test_per_100_gram_serving() {
        let conn = test_conn();
        let mut data = sample_create("Arroz");
        data.serving_size = 50.0;
        data.calories = 65.0;
        let food = Food::create(&conn, &data).unwrap();

        let per_100 = food.per_100().unwrap();
        assert!((per_100.calories - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_100_count_serving_is_none() {
        let conn = test_conn();
        let mut data = sample_create("Ovo");
        data.serving_unit = "unidade".to_string();
        let food = Food::create(&conn, &data).unwrap();
        assert!(food.per_100().is_none());
    }
}
