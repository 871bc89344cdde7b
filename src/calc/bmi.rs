//! Body-mass index engine
//!
//! BMI is weight over height squared, classified into the four bands the
//! application displays.

use serde::{Deserialize, Serialize};

use super::input::positive;

/// BMI classification band
///
/// Serialized with the display labels the application uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiClassification {
    #[serde(rename = "Magreza")]
    Underweight,
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Sobrepeso")]
    Overweight,
    #[serde(rename = "Obesidade")]
    Obese,
}

impl BmiClassification {
    /// Classify a BMI value (half-open bands, lower bound inclusive)
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiClassification::Underweight
        } else if bmi < 25.0 {
            BmiClassification::Normal
        } else if bmi < 30.0 {
            BmiClassification::Overweight
        } else {
            BmiClassification::Obese
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            BmiClassification::Underweight => "Magreza",
            BmiClassification::Normal => "Normal",
            BmiClassification::Overweight => "Sobrepeso",
            BmiClassification::Obese => "Obesidade",
        }
    }

    /// Color tag the UI maps to its theme
    pub fn color_tag(&self) -> &'static str {
        match self {
            BmiClassification::Underweight => "info",
            BmiClassification::Normal => "success",
            BmiClassification::Overweight => "warning",
            BmiClassification::Obese => "destructive",
        }
    }
}

/// Result of a BMI calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal
    pub bmi: f64,
    pub classification: BmiClassification,
    /// Color tag of the classification, carried so persisted results
    /// keep it too
    pub color_tag: &'static str,
}

/// Compute BMI from weight in kg and height in cm
///
/// Returns None when either value is missing, zero or negative.
pub fn compute(weight_kg: f64, height_cm: f64) -> Option<BmiResult> {
    let weight_kg = positive(weight_kg)?;
    let height_m = positive(height_cm)? / 100.0;

    let raw = weight_kg / (height_m * height_m);
    let bmi = (raw * 10.0).round() / 10.0;
    let classification = BmiClassification::from_bmi(bmi);

    Some(BmiResult {
        bmi,
        classification,
        color_tag: classification.color_tag(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        // weight=70, height=175 -> bmi=22.9, "Normal"
        let result = compute(70.0, 175.0).unwrap();
        assert!((result.bmi - 22.9).abs() < 1e-9);
        assert_eq!(result.classification, BmiClassification::Normal);
        assert_eq!(result.classification.label(), "Normal");
        assert_eq!(result.color_tag, "success");
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(BmiClassification::from_bmi(18.4), BmiClassification::Underweight);
        assert_eq!(BmiClassification::from_bmi(18.5), BmiClassification::Normal);
        assert_eq!(BmiClassification::from_bmi(24.9), BmiClassification::Normal);
        assert_eq!(BmiClassification::from_bmi(25.0), BmiClassification::Overweight);
        assert_eq!(BmiClassification::from_bmi(29.9), BmiClassification::Overweight);
        assert_eq!(BmiClassification::from_bmi(30.0), BmiClassification::Obese);
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        // 80 / 1.8^2 = 24.691... -> 24.7
        let result = compute(80.0, 180.0).unwrap();
        assert!((result.bmi - 24.7).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(compute(0.0, 175.0).is_none());
        assert!(compute(70.0, 0.0).is_none());
        assert!(compute(-70.0, 175.0).is_none());
    }

    #[test]
    fn test_is_pure() {
        assert_eq!(compute(70.0, 175.0), compute(70.0, 175.0));
    }

    #[test]
    fn test_classification_serializes_to_label() {
        let json = serde_json::to_string(&BmiClassification::Underweight).unwrap();
        assert_eq!(json, "\"Magreza\"");
    }

    #[test]
    fn test_result_serializes_color_tag() {
        let result = compute(50.0, 175.0).unwrap();
        let value = serde_json::to_value(result).unwrap();
        assert_eq!(value["classification"], "Magreza");
        assert_eq!(value["color_tag"], "info");
    }
}
