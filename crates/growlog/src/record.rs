//! Record types for growth measurements.
//!
//! A [`NutritionRecord`] is one saved measurement: the child's name plus
//! weight and height exactly as the user typed them. The numeric fields are
//! kept as strings so that nothing is lost or reformatted between entry and
//! storage; parsing happens on demand when a body-mass index is needed.

use serde::{Deserialize, Serialize};

use crate::metrics::{self, Category};

/// A single saved growth measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRecord {
    /// Name of the child this measurement belongs to.
    pub name: String,
    /// Weight in kilograms, as entered (e.g. `"12.50"`).
    pub weight_kg: String,
    /// Height in meters, as entered (e.g. `"0.90"`).
    pub height_m: String,
}

impl NutritionRecord {
    /// Create a new record from raw field values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        weight_kg: impl Into<String>,
        height_m: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            weight_kg: weight_kg.into(),
            height_m: height_m.into(),
        }
    }

    /// Weight in kilograms as a number, or NaN if the stored text does
    /// not parse.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight_kg.parse().unwrap_or(f64::NAN)
    }

    /// Height in meters as a number, or NaN if the stored text does
    /// not parse.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height_m.parse().unwrap_or(f64::NAN)
    }

    /// Body-mass index computed from the stored fields, unrounded.
    #[must_use]
    pub fn index(&self) -> f64 {
        metrics::compute_index(self.weight(), self.height())
    }

    /// Weight category for this record, classified from the unrounded index.
    #[must_use]
    pub fn category(&self) -> Category {
        Category::classify(self.index())
    }
}

/// A child known to the application, read from the roster.
///
/// The roster is written by account management elsewhere; only the
/// responsible-name field matters here, and any other fields in the stored
/// objects are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildReference {
    /// Display name of the child (the name the responsible adult registered).
    #[serde(rename = "responsibleName")]
    pub responsible_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_camel_case_keys() {
        let record = NutritionRecord::new("Ana", "12.50", "0.90");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"name\":\"Ana\""));
        assert!(json.contains("\"weightKg\":\"12.50\""));
        assert!(json.contains("\"heightM\":\"0.90\""));
    }

    #[test]
    fn test_record_round_trip() {
        let record = NutritionRecord::new("Bruno", "20.00", "1.00");
        let json = serde_json::to_string(&record).unwrap();
        let back: NutritionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_weight_and_height_parse() {
        let record = NutritionRecord::new("Ana", "12.50", "0.90");
        assert!((record.weight() - 12.5).abs() < f64::EPSILON);
        assert!((record.height() - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unparseable_fields_yield_nan() {
        let record = NutritionRecord::new("Ana", "", "abc");
        assert!(record.weight().is_nan());
        assert!(record.height().is_nan());
        assert!(record.index().is_nan());
    }

    #[test]
    fn test_index_from_fields() {
        let record = NutritionRecord::new("Ana", "12.50", "0.90");
        let expected = 12.5 / (0.9 * 0.9);
        assert!((record.index() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_category_uses_unrounded_index() {
        let record = NutritionRecord::new("Ana", "12.50", "0.90");
        assert_eq!(record.category(), Category::Healthy);
    }

    #[test]
    fn test_child_reference_reads_responsible_name() {
        let json = r#"{"responsibleName":"Carla","email":"c@example.com"}"#;
        let child: ChildReference = serde_json::from_str(json).unwrap();
        assert_eq!(child.responsible_name, "Carla");
    }

    #[test]
    fn test_child_reference_serializes_external_key() {
        let child = ChildReference {
            responsible_name: "Davi".to_string(),
        };
        let json = serde_json::to_string(&child).unwrap();
        assert!(json.contains("\"responsibleName\":\"Davi\""));
    }
}
