//! Shared nutrition data structure
//!
//! Nutritional facts per serving for catalog foods.

use serde::{Deserialize, Serialize};

/// Nutritional information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,          // grams
    pub carbs: f64,            // grams
    pub fat: f64,              // grams
    pub fiber: Option<f64>,    // grams
    pub sodium: Option<f64>,   // milligrams
}

impl Nutrition {
    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
            fiber: self.fiber.map(|v| v * multiplier),
            sodium: self.sodium.map(|v| v * multiplier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        let n = Nutrition {
            calories: 52.0,
            protein: 1.1,
            carbs: 10.0,
            fat: 0.9,
            fiber: Some(3.0),
            sodium: None,
        };
        let doubled = n.scale(2.0);
        assert!((doubled.calories - 104.0).abs() < 1e-9);
        assert!((doubled.protein - 2.2).abs() < 1e-9);
        assert_eq!(doubled.fiber, Some(6.0));
        assert_eq!(doubled.sodium, None);
    }
}
