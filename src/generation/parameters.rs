// ABOUTME: Typed trainer input for program and nutrition plan generation
// ABOUTME: Validated before any provider call so bad input never costs a model request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use serde::{Deserialize, Serialize};
use trainwise_core::constants::limits::{
    MAX_MEALS_PER_DAY, MAX_PROGRAM_WEEKS, MAX_SESSION_MINUTES, MAX_TEXT_LENGTH,
};
use trainwise_core::errors::{AppError, AppResult};

/// Training experience of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Less than a year of structured training
    #[default]
    Beginner,
    /// One to three years
    Intermediate,
    /// Several years of consistent training
    Advanced,
}

impl ExperienceLevel {
    /// Prompt representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Daily activity outside of training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Desk job, little walking
    Sedentary,
    /// Light activity most days
    Light,
    /// Regular exercise three to five days a week
    #[default]
    Moderate,
    /// Hard training most days
    Active,
    /// Physical job plus training
    VeryActive,
}

impl ActivityLevel {
    /// Prompt representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very active",
        }
    }
}

fn default_days_per_week() -> u8 {
    3
}

fn default_session_minutes() -> u16 {
    60
}

fn default_duration_weeks() -> u8 {
    4
}

fn default_meals_per_day() -> u8 {
    3
}

/// Constraints for a workout program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramParameters {
    /// Primary training goal, e.g. "hypertrophy"
    pub goal: String,
    /// Client experience
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    /// Training days per week (1-7)
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u8,
    /// Session length in minutes
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u16,
    /// Program length in weeks
    #[serde(default = "default_duration_weeks")]
    pub duration_weeks: u8,
    /// Available equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Injuries or movement restrictions
    #[serde(default)]
    pub limitations: Vec<String>,
    /// Free-form trainer notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl ProgramParameters {
    /// Check ranges before spending a provider call
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        require_text("goal", &self.goal)?;
        if !(1..=7).contains(&self.days_per_week) {
            return Err(AppError::invalid_input("daysPerWeek must be between 1 and 7"));
        }
        if self.session_minutes < 10 || u32::from(self.session_minutes) > MAX_SESSION_MINUTES {
            return Err(AppError::invalid_input(format!(
                "sessionMinutes must be between 10 and {MAX_SESSION_MINUTES}"
            )));
        }
        if self.duration_weeks == 0 || u32::from(self.duration_weeks) > MAX_PROGRAM_WEEKS {
            return Err(AppError::invalid_input(format!(
                "durationWeeks must be between 1 and {MAX_PROGRAM_WEEKS}"
            )));
        }
        optional_text("notes", self.notes.as_deref())?;
        list_text("equipment", &self.equipment)?;
        list_text("limitations", &self.limitations)
    }
}

/// Constraints for a nutrition plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionParameters {
    /// Nutrition goal, e.g. "fat loss"
    pub goal: String,
    /// Body weight in kilograms
    pub body_weight_kg: f64,
    /// Height in centimetres
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// Age in years
    #[serde(default)]
    pub age: Option<u8>,
    /// Activity outside training
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// e.g. "vegetarian"
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    /// Foods that must not appear
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Meals per day
    #[serde(default = "default_meals_per_day")]
    pub meals_per_day: u8,
}

impl NutritionParameters {
    /// Check ranges before spending a provider call
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        require_text("goal", &self.goal)?;
        if !self.body_weight_kg.is_finite() || !(20.0..=400.0).contains(&self.body_weight_kg) {
            return Err(AppError::invalid_input("bodyWeightKg must be between 20 and 400"));
        }
        if let Some(height) = self.height_cm {
            if !height.is_finite() || !(100.0..=250.0).contains(&height) {
                return Err(AppError::invalid_input("heightCm must be between 100 and 250"));
            }
        }
        if let Some(age) = self.age {
            if !(13..=100).contains(&age) {
                return Err(AppError::invalid_input("age must be between 13 and 100"));
            }
        }
        if self.meals_per_day == 0 || u32::from(self.meals_per_day) > MAX_MEALS_PER_DAY {
            return Err(AppError::invalid_input(format!(
                "mealsPerDay must be between 1 and {MAX_MEALS_PER_DAY}"
            )));
        }
        list_text("dietaryPreferences", &self.dietary_preferences)?;
        list_text("allergies", &self.allergies)
    }
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} is required")));
    }
    optional_text(field, Some(value))
}

fn optional_text(field: &str, value: Option<&str>) -> AppResult<()> {
    match value {
        Some(v) if v.chars().count() > MAX_TEXT_LENGTH => Err(AppError::invalid_input(format!(
            "{field} must be at most {MAX_TEXT_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}

fn list_text(field: &str, values: &[String]) -> AppResult<()> {
    values
        .iter()
        .try_for_each(|v| optional_text(field, Some(v.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainwise_core::errors::ErrorCode;

    #[test]
    fn test_program_defaults_apply() {
        let params: ProgramParameters = serde_json::from_str(r#"{"goal":"strength"}"#).unwrap();
        assert_eq!(params.days_per_week, 3);
        assert_eq!(params.duration_weeks, 4);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_days_per_week_out_of_range() {
        let params: ProgramParameters =
            serde_json::from_str(r#"{"goal":"strength","daysPerWeek":8}"#).unwrap();
        let err = params.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_nutrition_weight_bounds() {
        let params: NutritionParameters =
            serde_json::from_str(r#"{"goal":"fat loss","bodyWeightKg":5}"#).unwrap();
        assert!(params.validate().is_err());
    }
}
