// ABOUTME: Prompt construction for program and nutrition plan generation
// ABOUTME: System prompts are loaded at compile time, user prompts rendered from typed parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! # Generation Prompts
//!
//! System prompts live in markdown files next to this module so coaches can
//! edit wording without touching code. User prompts are rendered from the
//! validated parameter structs.

use std::fmt::Write;

use super::parameters::{NutritionParameters, ProgramParameters};

/// System prompt describing the program JSON shape
pub const PROGRAM_SYSTEM_PROMPT: &str = include_str!("program_system.md");

/// System prompt describing the nutrition plan JSON shape
pub const NUTRITION_SYSTEM_PROMPT: &str = include_str!("nutrition_system.md");

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_owned()
    } else {
        values.join(", ")
    }
}

/// Render the user prompt for a workout program
#[must_use]
pub fn program_user_prompt(client_name: &str, params: &ProgramParameters) -> String {
    let mut prompt = format!(
        "Design a {weeks}-week program for {client_name}.\n\
         Goal: {goal}\n\
         Experience level: {level}\n\
         Training days per week: {days}\n\
         Session length: {minutes} minutes\n\
         Equipment: {equipment}\n\
         Limitations: {limitations}\n",
        weeks = params.duration_weeks,
        goal = params.goal.trim(),
        level = params.experience_level.as_str(),
        days = params.days_per_week,
        minutes = params.session_minutes,
        equipment = list_or_none(&params.equipment),
        limitations = list_or_none(&params.limitations),
    );
    if let Some(notes) = params.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(prompt, "Trainer notes: {}", notes.trim());
    }
    prompt
}

/// Render the user prompt for a nutrition plan
#[must_use]
pub fn nutrition_user_prompt(client_name: &str, params: &NutritionParameters) -> String {
    let mut prompt = format!(
        "Write a daily nutrition plan for {client_name}.\n\
         Goal: {goal}\n\
         Body weight: {weight} kg\n\
         Activity level: {activity}\n\
         Meals per day: {meals}\n\
         Dietary preferences: {prefs}\n\
         Allergies: {allergies}\n",
        goal = params.goal.trim(),
        weight = params.body_weight_kg,
        activity = params.activity_level.as_str(),
        meals = params.meals_per_day,
        prefs = list_or_none(&params.dietary_preferences),
        allergies = list_or_none(&params.allergies),
    );
    if let Some(height) = params.height_cm {
        let _ = writeln!(prompt, "Height: {height} cm");
    }
    if let Some(age) = params.age {
        let _ = writeln!(prompt, "Age: {age}");
    }
    prompt
}
