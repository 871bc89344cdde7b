//! Food catalog operations
//!
//! CRUD over the foods table. Unlike the calculator flows, validation and
//! persistence failures here surface as user-visible errors and abort the
//! operation with no partial write.

use serde::Serialize;

use crate::db::Database;
use crate::models::{Food, FoodCreate, FoodUpdate, Nutrition};

/// Response for add_food
#[derive(Debug, Serialize)]
pub struct AddFoodResponse {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub created_at: String,
}

/// Summary of a food for list/search results
#[derive(Debug, Serialize)]
pub struct FoodSummary {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub serving_size: f64,
    pub serving_unit: String,
    pub calories: f64,
    pub price: Option<f64>,
}

impl From<&Food> for FoodSummary {
    fn from(food: &Food) -> Self {
        Self {
            id: food.id,
            name: food.name.clone(),
            category: food.category.clone(),
            serving_size: food.serving_size,
            serving_unit: food.serving_unit.clone(),
            calories: food.nutrition.calories,
            price: food.price,
        }
    }
}

/// Full food detail response
#[derive(Debug, Serialize)]
pub struct FoodDetail {
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
    /// Nutrition normalized to 100 g/ml when the serving unit allows it
    pub per_100: Option<Nutrition>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Food> for FoodDetail {
    fn from(food: Food) -> Self {
        let per_100 = food.per_100();
        Self {
            id: food.id,
            name: food.name,
            category: food.category,
            description: food.description,
            weight_volume: food.weight_volume,
            price: food.price,
            allergens: food.allergens,
            storage: food.storage,
            serving_size: food.serving_size,
            serving_unit: food.serving_unit,
            nutrition: food.nutrition,
            per_100,
            created_at: food.created_at,
            updated_at: food.updated_at,
        }
    }
}

/// Response for list_foods
#[derive(Debug, Serialize)]
pub struct ListFoodsResponse {
    pub items: Vec<FoodSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for search_foods
#[derive(Debug, Serialize)]
pub struct SearchFoodsResponse {
    pub items: Vec<FoodSummary>,
    pub total: usize,
}

/// Response for delete_food
#[derive(Debug, Serialize)]
pub struct DeleteFoodResponse {
    pub success: bool,
    pub deleted_id: i64,
}

/// Validate the create payload, reporting the first violated constraint
fn validate_create(data: &FoodCreate) -> Result<(), String> {
    if data.name.trim().is_empty() {
        return Err("Food name cannot be empty".to_string());
    }
    if data.serving_size <= 0.0 {
        return Err("serving_size must be greater than 0".to_string());
    }
    if data.serving_unit.trim().is_empty() {
        return Err("serving_unit cannot be empty".to_string());
    }
    if data.calories < 0.0 {
        return Err("calories cannot be negative".to_string());
    }
    if data.protein < 0.0 {
        return Err("protein cannot be negative".to_string());
    }
    if data.carbs < 0.0 {
        return Err("carbs cannot be negative".to_string());
    }
    if data.fat < 0.0 {
        return Err("fat cannot be negative".to_string());
    }
    if matches!(data.fiber, Some(v) if v < 0.0) {
        return Err("fiber cannot be negative".to_string());
    }
    if matches!(data.sodium, Some(v) if v < 0.0) {
        return Err("sodium cannot be negative".to_string());
    }
    if matches!(data.price, Some(v) if v < 0.0) {
        return Err("price cannot be negative".to_string());
    }
    Ok(())
}

/// Validate the fields present in an update payload
fn validate_update(data: &FoodUpdate) -> Result<(), String> {
    if matches!(data.name.as_deref(), Some(n) if n.trim().is_empty()) {
        return Err("Food name cannot be empty".to_string());
    }
    if matches!(data.serving_size, Some(v) if v <= 0.0) {
        return Err("serving_size must be greater than 0".to_string());
    }
    if matches!(data.serving_unit.as_deref(), Some(u) if u.trim().is_empty()) {
        return Err("serving_unit cannot be empty".to_string());
    }
    for (value, field) in [
        (data.calories, "calories"),
        (data.protein, "protein"),
        (data.carbs, "carbs"),
        (data.fat, "fat"),
        (data.fiber, "fiber"),
        (data.sodium, "sodium"),
        (data.price, "price"),
    ] {
        if matches!(value, Some(v) if v < 0.0) {
            return Err(format!("{} cannot be negative", field));
        }
    }
    Ok(())
}

/// Add a new food to the catalog
pub fn add_food(db: &Database, data: FoodCreate) -> Result<AddFoodResponse, String> {
    validate_create(&data)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let food = Food::create(&conn, &data)
        .map_err(|e| format!("Failed to create food: {}", e))?;

    Ok(AddFoodResponse {
        id: food.id,
        name: food.name,
        category: food.category,
        created_at: food.created_at,
    })
}

/// Get a food by ID
pub fn get_food(db: &Database, id: i64) -> Result<Option<FoodDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let food = Food::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get food: {}", e))?;

    Ok(food.map(FoodDetail::from))
}

/// Search foods by name or category
pub fn search_foods(db: &Database, query: &str, limit: i64) -> Result<SearchFoodsResponse, String> {
    let limit = limit.clamp(1, 100);
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let foods = Food::search(&conn, query, limit)
        .map_err(|e| format!("Search failed: {}", e))?;

    let items: Vec<FoodSummary> = foods.iter().map(FoodSummary::from).collect();
    let total = items.len();

    Ok(SearchFoodsResponse { items, total })
}

/// List foods with filtering and pagination
pub fn list_foods(
    db: &Database,
    category: Option<&str>,
    sort_by: &str,
    sort_order: &str,
    limit: i64,
    offset: i64,
) -> Result<ListFoodsResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let foods = Food::list(&conn, category, sort_by, sort_order, limit, offset)
        .map_err(|e| format!("Failed to list foods: {}", e))?;

    let total = Food::count(&conn, category)
        .map_err(|e| format!("Failed to count foods: {}", e))?;

    let items: Vec<FoodSummary> = foods.iter().map(FoodSummary::from).collect();

    Ok(ListFoodsResponse {
        items,
        total,
        limit,
        offset,
    })
}

/// Update a food
pub fn update_food(db: &Database, id: i64, data: FoodUpdate) -> Result<FoodDetail, String> {
    validate_update(&data)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let updated = Food::update(&conn, id, &data)
        .map_err(|e| format!("Failed to update food: {}", e))?;

    match updated {
        Some(food) => Ok(FoodDetail::from(food)),
        None => Err(format!("Food not found with id: {}", id)),
    }
}

/// Delete a food
pub fn delete_food(db: &Database, id: i64) -> Result<DeleteFoodResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = Food::delete(&conn, id)
        .map_err(|e| format!("Failed to delete food: {}", e))?;

    if !deleted {
        return Err(format!("Food not found with id: {}", id));
    }

    Ok(DeleteFoodResponse {
        success: true,
        deleted_id: id,
    })
}
