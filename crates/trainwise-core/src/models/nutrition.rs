// ABOUTME: Nutrition plan document model produced by AI generation
// ABOUTME: NutritionPlan and MealSuggestion definitions with range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use serde::{Deserialize, Serialize};

use super::artifact::ArtifactSchemaError;

/// Daily nutrition targets with suggested meals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    /// Daily energy target (kcal)
    #[serde(default)]
    pub daily_calories: f64,
    /// Daily protein target (grams)
    #[serde(default)]
    pub protein_g: f64,
    /// Daily carbohydrate target (grams)
    #[serde(default)]
    pub carbs_g: f64,
    /// Daily fat target (grams)
    #[serde(default)]
    pub fats_g: f64,
    /// Example meals hitting the targets
    #[serde(default)]
    pub meal_suggestions: Vec<MealSuggestion>,
    /// Free-form guidance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A suggested meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSuggestion {
    /// Slot in the day (breakfast, lunch, ...)
    #[serde(default)]
    pub meal: String,
    /// Dish name
    #[serde(default)]
    pub name: String,
    /// Ingredients or preparation summary
    #[serde(default)]
    pub description: String,
    /// Approximate energy (kcal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

impl NutritionPlan {
    /// Check the value ranges every stored plan must satisfy
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactSchemaError::Invalid`] describing the violated rule
    pub fn validate(&self) -> Result<(), ArtifactSchemaError> {
        if !self.daily_calories.is_finite() || self.daily_calories <= 0.0 {
            return Err(ArtifactSchemaError::invalid(
                "daily_calories must be a positive number",
            ));
        }
        for (label, value) in [
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fats_g", self.fats_g),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ArtifactSchemaError::invalid(format!(
                    "{label} must be zero or greater"
                )));
            }
        }
        if self.meal_suggestions.is_empty() {
            return Err(ArtifactSchemaError::invalid(
                "nutrition plan has no meal suggestions",
            ));
        }
        Ok(())
    }

    /// Energy implied by the macro targets (4/4/9 kcal per gram)
    #[must_use]
    pub fn macro_calories(&self) -> f64 {
        self.protein_g.mul_add(4.0, self.carbs_g.mul_add(4.0, self.fats_g * 9.0))
    }
}
