// ABOUTME: Workout program document model produced by AI generation
// ABOUTME: Program, ProgramWeek, Workout, and Exercise definitions with structural validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use serde::{Deserialize, Deserializer, Serialize};

use super::artifact::ArtifactSchemaError;

/// A multi-week training program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Program title
    #[serde(default)]
    pub name: String,
    /// Training goal the program targets
    #[serde(default)]
    pub goal: String,
    /// Number of weeks the program spans
    #[serde(default)]
    pub duration_weeks: u32,
    /// Week-by-week plan
    #[serde(default)]
    pub weeks: Vec<ProgramWeek>,
}

/// One week of a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramWeek {
    /// 1-based week index
    #[serde(default)]
    pub week_number: u32,
    /// Emphasis for the week (e.g. "hypertrophy", "deload")
    #[serde(default)]
    pub focus: String,
    /// Sessions scheduled this week
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

/// One training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Day label (e.g. "Monday" or "Day 1")
    #[serde(default)]
    pub day: String,
    /// Session title
    #[serde(default)]
    pub name: String,
    /// Exercises in execution order
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// One prescribed exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    #[serde(default)]
    pub name: String,
    /// Working sets
    #[serde(default, deserialize_with = "lenient_count")]
    pub sets: u32,
    /// Rep prescription, kept textual so ranges like "8-12" survive
    #[serde(default, deserialize_with = "string_or_number")]
    pub reps: String,
    /// Rest between sets (e.g. "90s")
    #[serde(default, deserialize_with = "string_or_number")]
    pub rest: String,
    /// Tempo notation (e.g. "3-1-1-0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
    /// Coaching cues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Program {
    /// Check the structural rules every stored program must satisfy
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactSchemaError::Invalid`] naming the first offending element
    pub fn validate(&self) -> Result<(), ArtifactSchemaError> {
        if self.weeks.is_empty() {
            return Err(ArtifactSchemaError::invalid("program has no weeks"));
        }
        for (week_idx, week) in self.weeks.iter().enumerate() {
            let week_label = week_idx + 1;
            if week.workouts.is_empty() {
                return Err(ArtifactSchemaError::invalid(format!(
                    "week {week_label} has no workouts"
                )));
            }
            for (workout_idx, workout) in week.workouts.iter().enumerate() {
                let workout_label = workout_idx + 1;
                if workout.exercises.is_empty() {
                    return Err(ArtifactSchemaError::invalid(format!(
                        "week {week_label} workout {workout_label} has no exercises"
                    )));
                }
                for exercise in &workout.exercises {
                    if exercise.name.trim().is_empty() {
                        return Err(ArtifactSchemaError::invalid(format!(
                            "week {week_label} workout {workout_label} has an unnamed exercise"
                        )));
                    }
                    if exercise.sets == 0 {
                        return Err(ArtifactSchemaError::invalid(format!(
                            "exercise '{}' in week {week_label} has zero sets",
                            exercise.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Total number of sessions across all weeks
    #[must_use]
    pub fn total_workouts(&self) -> usize {
        self.weeks.iter().map(|w| w.workouts.len()).sum()
    }
}

/// Models frequently answer `"reps": 10` instead of `"reps": "10"`
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accepts `3`, `3.0`, `"3"` and `"3 sets"`; a range like `"3-4"` keeps its lower bound
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(n) => {
            if let Some(count) = n.as_u64() {
                return u32::try_from(count).map_err(|_| D::Error::custom("sets is too large"));
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract().abs() < f64::EPSILON && f <= f64::from(u32::MAX) => Ok(f as u32),
                _ => Err(D::Error::custom(format!("sets must be a whole number, got {n}"))),
            }
        }
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            let digits_end = trimmed
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(trimmed.len());
            trimmed[..digits_end]
                .parse::<u32>()
                .map_err(|_| D::Error::custom(format!("sets must be a whole number, got \"{s}\"")))
        }
        other => Err(D::Error::custom(format!("sets must be a whole number, got {other}"))),
    }
}
