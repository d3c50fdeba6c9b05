//! Body-mass index computation and weight classification.
//!
//! Everything here is pure: given a weight in kilograms and a height in
//! meters, compute the index `weight / height²` and map it onto one of four
//! weight categories. The thresholds are fixed and deliberately simple:
//!
//! | Index          | Category     |
//! |----------------|--------------|
//! | `< 14`         | Below weight |
//! | `14..18`       | Healthy      |
//! | `18..20`       | Overweight   |
//! | `>= 20`        | Obesity      |
//!
//! Classification always happens on the unrounded index; rounding to two
//! decimals is a display concern only (see [`round2`] and [`chart_series`]).

use serde::{Deserialize, Serialize};

use crate::record::NutritionRecord;

/// Lower bound of the healthy band. Below this is [`Category::BelowWeight`].
pub const HEALTHY_MIN: f64 = 14.0;

/// Lower bound of the overweight band.
pub const OVERWEIGHT_MIN: f64 = 18.0;

/// Lower bound of the obesity band.
pub const OBESITY_MIN: f64 = 20.0;

/// Compute the body-mass index from weight (kg) and height (m).
///
/// The division is not guarded: a zero height yields infinity and a NaN
/// input propagates. [`Category::classify`] maps both onto
/// [`Category::Obesity`] by fall-through, so degenerate input still
/// produces a stable (if meaningless) classification rather than a panic.
#[must_use]
pub fn compute_index(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Round a value to two decimal places for display.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weight category derived from the body-mass index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Index below 14.
    BelowWeight,
    /// Index in `14..18`.
    Healthy,
    /// Index in `18..20`.
    Overweight,
    /// Index of 20 or more. NaN and infinite indexes also land here.
    Obesity,
}

impl Category {
    /// Classify an unrounded index into its weight category.
    #[must_use]
    pub fn classify(index: f64) -> Self {
        if index < HEALTHY_MIN {
            Self::BelowWeight
        } else if index < OVERWEIGHT_MIN {
            Self::Healthy
        } else if index < OBESITY_MIN {
            Self::Overweight
        } else {
            Self::Obesity
        }
    }

    /// Human-readable label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::BelowWeight => "Below weight",
            Self::Healthy => "Healthy",
            Self::Overweight => "Overweight",
            Self::Obesity => "Obesity",
        }
    }

    /// Severity channel for this category, for styling and prioritization.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::BelowWeight => Severity::Info,
            Self::Healthy => Severity::Good,
            Self::Overweight => Severity::Warning,
            Self::Obesity => Severity::Critical,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How strongly a category should be surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational; below the healthy band.
    Info,
    /// Within the healthy band.
    Good,
    /// Above the healthy band.
    Warning,
    /// Well above the healthy band.
    Critical,
}

impl Severity {
    /// Display color name for this severity.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Info => "blue",
            Self::Good => "green",
            Self::Warning => "orange",
            Self::Critical => "red",
        }
    }
}

/// One point in the index-over-records chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Label for the point: the record's name, or `#N` when the name
    /// is empty.
    pub label: String,
    /// Index value rounded to two decimals.
    pub index: f64,
}

/// Build the chart series for a list of records, in list order.
///
/// Each record contributes one point. Records with an empty name get a
/// positional `#N` label (1-based) so the chart never shows a blank label.
#[must_use]
pub fn chart_series(records: &[NutritionRecord]) -> Vec<ChartPoint> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let label = if record.name.is_empty() {
                format!("#{}", i + 1)
            } else {
                record.name.clone()
            };
            ChartPoint {
                label,
                index: round2(record.index()),
            }
        })
        .collect()
}
