//! BMI validation and classification

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while validating profile input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Invalid number format for weight or height.")]
    InvalidNumberFormat,

    #[error("Height must be greater than 0.")]
    InvalidHeight,

    #[error("Weight must be greater than 0.")]
    InvalidWeight,

    #[error("Invalid profile field: {0}")]
    InvalidField(String),
}

/// A number that may arrive as JSON number or as text (form fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Parse into a finite `f64`.
    pub fn parse(&self) -> Result<f64, ProfileError> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ProfileError::InvalidNumberFormat)?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ProfileError::InvalidNumberFormat)
        }
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        NumericInput::Number(n)
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obesity,
}

impl BmiCategory {
    // Lower bounds are inclusive; 18.5 / 24.9 / 29.9.
    const NORMAL_FROM: f64 = 18.5;
    const OVERWEIGHT_FROM: f64 = 24.9;
    const OBESITY_FROM: f64 = 29.9;

    pub fn classify(bmi: f64) -> Self {
        if bmi < Self::NORMAL_FROM {
            BmiCategory::Underweight
        } else if bmi < Self::OVERWEIGHT_FROM {
            BmiCategory::NormalWeight
        } else if bmi < Self::OBESITY_FROM {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obesity
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI rounded to two decimals together with its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiResult {
    bmi: f64,
    category: BmiCategory,
}

impl BmiResult {
    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn category(&self) -> BmiCategory {
        self.category
    }
}

// Fixed-precision formatting rounds the exact binary value, ties to even.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Validate weight (kg) and height (cm) and compute the BMI.
///
/// Checks run in order: both inputs must parse as finite numbers, height must
/// be strictly positive, then weight must be strictly positive. The category
/// is assigned from the rounded value so the pair is always consistent.
/// Inputs whose ratio overflows are rejected as `InvalidNumberFormat`.
pub fn validate_and_compute_bmi(
    weight: &NumericInput,
    height: &NumericInput,
) -> Result<BmiResult, ProfileError> {
    let weight_kg = weight.parse()?;
    let height_cm = height.parse()?;

    if height_cm <= 0.0 {
        return Err(ProfileError::InvalidHeight);
    }
    if weight_kg <= 0.0 {
        return Err(ProfileError::InvalidWeight);
    }

    let height_m = height_cm / 100.0;
    let raw = weight_kg / height_m.powi(2);
    if !raw.is_finite() {
        return Err(ProfileError::InvalidNumberFormat);
    }
    let bmi = round2(raw);

    Ok(BmiResult {
        bmi,
        category: BmiCategory::classify(bmi),
    })
}
