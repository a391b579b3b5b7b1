// ABOUTME: Daily readiness scoring from sleep, stress, soreness, and energy check-ins
// ABOUTME: Deterministic deduction tables with fixed recommendation bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! Readiness Scoring Module
//!
//! Converts a trainer-submitted daily check-in into a readiness score in
//! `[0, 100]` and one of four recommendation bands.
//!
//! Scoring starts at 100 and subtracts an independent deduction per factor, then
//! clamps. The deduction amounts come from a [`DeductionTable`]; two presets
//! exist and exactly one is used per calculation.
//!
//! ## Input normalization policy
//!
//! Readiness is a wellness heuristic, so malformed input never fails scoring:
//! - unrecognised enum labels map to the least-penalizing level
//!   (`low` stress, `none` soreness, `high` energy)
//! - negative sleep is treated as zero hours
//! - a non-numeric sleep value (NaN) applies no sleep deduction

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score at or above which readiness is excellent
pub const EXCELLENT_THRESHOLD: u8 = 80;
/// Score at or above which readiness is good
pub const GOOD_THRESHOLD: u8 = 60;
/// Score at or above which readiness is moderate
pub const MODERATE_THRESHOLD: u8 = 40;

const MAX_SCORE: i64 = 100;

/// Self-reported stress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "serde_json::Value")]
pub enum StressLevel {
    /// Low stress
    #[default]
    Low,
    /// Medium stress
    Medium,
    /// High stress
    High,
}

/// Self-reported muscle soreness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "serde_json::Value")]
pub enum MuscleSoreness {
    /// No soreness
    #[default]
    None,
    /// Mild soreness
    Mild,
    /// Moderate soreness
    Moderate,
    /// Severe soreness
    Severe,
}

/// Self-reported energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "serde_json::Value")]
pub enum EnergyLevel {
    /// Low energy
    Low,
    /// Medium energy
    Medium,
    /// High energy
    #[default]
    High,
}

/// Normalized lowercase label, or empty when the value is not a string
fn label_of(value: &serde_json::Value) -> String {
    value
        .as_str()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default()
}

impl StressLevel {
    /// Parse leniently; unknown labels map to [`StressLevel::Low`]
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "medium" | "moderate" => Self::Medium,
            "high" => Self::High,
            _ => Self::Low,
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl From<serde_json::Value> for StressLevel {
    fn from(value: serde_json::Value) -> Self {
        Self::from_str_lossy(&label_of(&value))
    }
}

impl MuscleSoreness {
    /// Parse leniently; unknown labels map to [`MuscleSoreness::None`]
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "mild" => Self::Mild,
            "moderate" => Self::Moderate,
            "severe" => Self::Severe,
            _ => Self::None,
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl From<serde_json::Value> for MuscleSoreness {
    fn from(value: serde_json::Value) -> Self {
        Self::from_str_lossy(&label_of(&value))
    }
}

impl EnergyLevel {
    /// Parse leniently; unknown labels map to [`EnergyLevel::High`]
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" | "moderate" => Self::Medium,
            _ => Self::High,
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl From<serde_json::Value> for EnergyLevel {
    fn from(value: serde_json::Value) -> Self {
        Self::from_str_lossy(&label_of(&value))
    }
}

/// One daily check-in, before scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessInput {
    /// Hours slept the previous night
    #[serde(alias = "sleepHours")]
    pub sleep_hours: f64,
    /// Stress level
    #[serde(default, alias = "stressLevel")]
    pub stress_level: StressLevel,
    /// Muscle soreness
    #[serde(default, alias = "muscleSoreness")]
    pub muscle_soreness: MuscleSoreness,
    /// Energy level
    #[serde(default, alias = "energyLevel")]
    pub energy_level: EnergyLevel,
    /// Day the check-in refers to, as supplied by the caller
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

/// A sleep duration boundary and the deduction applied when crossed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepThreshold {
    /// Boundary in hours
    pub hours: f64,
    /// Points deducted
    pub deduction: u32,
}

/// Deduction amounts per factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionTable {
    /// Short-sleep tiers checked in order; the first whose boundary is above the
    /// sleep duration applies
    pub short_sleep: Vec<SleepThreshold>,
    /// Applied when sleep exceeds the boundary
    pub long_sleep: Option<SleepThreshold>,
    /// Medium stress deduction
    pub stress_medium: u32,
    /// High stress deduction
    pub stress_high: u32,
    /// Mild soreness deduction
    pub soreness_mild: u32,
    /// Moderate soreness deduction
    pub soreness_moderate: u32,
    /// Severe soreness deduction
    pub soreness_severe: u32,
    /// Medium energy deduction
    pub energy_medium: u32,
    /// Low energy deduction
    pub energy_low: u32,
}

impl DeductionTable {
    /// Canonical table used by the server
    #[must_use]
    pub fn standard() -> Self {
        Self {
            short_sleep: vec![
                SleepThreshold { hours: 6.0, deduction: 30 },
                SleepThreshold { hours: 7.0, deduction: 15 },
            ],
            long_sleep: Some(SleepThreshold { hours: 9.0, deduction: 10 }),
            stress_medium: 12,
            stress_high: 25,
            soreness_mild: 7,
            soreness_moderate: 15,
            soreness_severe: 30,
            energy_medium: 10,
            energy_low: 20,
        }
    }

    /// Gentler table from the offline app, selectable by configuration
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            short_sleep: vec![SleepThreshold { hours: 6.0, deduction: 20 }],
            long_sleep: None,
            stress_medium: 10,
            stress_high: 25,
            soreness_mild: 5,
            soreness_moderate: 15,
            soreness_severe: 25,
            energy_medium: 5,
            energy_low: 20,
        }
    }

    fn sleep_deduction(&self, hours: f64) -> u32 {
        if hours.is_nan() {
            return 0;
        }
        let hours = hours.max(0.0);
        if let Some(tier) = self.short_sleep.iter().find(|t| hours < t.hours) {
            return tier.deduction;
        }
        match self.long_sleep {
            Some(long) if hours > long.hours => long.deduction,
            _ => 0,
        }
    }

    const fn stress_deduction(&self, level: StressLevel) -> u32 {
        match level {
            StressLevel::Low => 0,
            StressLevel::Medium => self.stress_medium,
            StressLevel::High => self.stress_high,
        }
    }

    const fn soreness_deduction(&self, level: MuscleSoreness) -> u32 {
        match level {
            MuscleSoreness::None => 0,
            MuscleSoreness::Mild => self.soreness_mild,
            MuscleSoreness::Moderate => self.soreness_moderate,
            MuscleSoreness::Severe => self.soreness_severe,
        }
    }

    const fn energy_deduction(&self, level: EnergyLevel) -> u32 {
        match level {
            EnergyLevel::High => 0,
            EnergyLevel::Medium => self.energy_medium,
            EnergyLevel::Low => self.energy_low,
        }
    }
}

impl Default for DeductionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Named deduction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeductionPreset {
    /// [`DeductionTable::standard`]
    #[default]
    Standard,
    /// [`DeductionTable::lenient`]
    Lenient,
}

/// Raised when a preset name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown readiness table '{0}' (expected 'standard' or 'lenient')")]
pub struct UnknownPresetError(pub String);

impl DeductionPreset {
    /// Build the table for this preset
    #[must_use]
    pub fn table(self) -> DeductionTable {
        match self {
            Self::Standard => DeductionTable::standard(),
            Self::Lenient => DeductionTable::lenient(),
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Lenient => "lenient",
        }
    }
}

impl FromStr for DeductionPreset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "lenient" => Ok(Self::Lenient),
            other => Err(UnknownPresetError(other.to_owned())),
        }
    }
}

impl fmt::Display for DeductionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Table used for every calculation
    pub preset: DeductionPreset,
}

impl ReadinessConfig {
    /// Resolve the configured table
    #[must_use]
    pub fn table(&self) -> DeductionTable {
        self.preset.table()
    }
}

/// Recommendation band, uniquely determined by score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessBand {
    /// Below [`MODERATE_THRESHOLD`]
    Low,
    /// [`MODERATE_THRESHOLD`] to below [`GOOD_THRESHOLD`]
    Moderate,
    /// [`GOOD_THRESHOLD`] to below [`EXCELLENT_THRESHOLD`]
    Good,
    /// [`EXCELLENT_THRESHOLD`] and above
    Excellent,
}

impl ReadinessBand {
    /// Band for a clamped score
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if score >= GOOD_THRESHOLD {
            Self::Good
        } else if score >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Fixed recommendation text for the band
    #[must_use]
    pub const fn recommendation(&self) -> &'static str {
        match self {
            Self::Excellent => {
                "Excellent readiness. Proceed with the planned session at full intensity."
            }
            Self::Good => "Good readiness. Proceed as planned and monitor how you feel.",
            Self::Moderate => "Moderate readiness. Reduce intensity or volume today.",
            Self::Low => "Low readiness. Rest or keep to light activity today.",
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }

    /// Parse a stored label; unknown labels fall back to the band implied by `score`
    #[must_use]
    pub fn parse_or_derive(label: &str, score: u8) -> Self {
        match label {
            "excellent" => Self::Excellent,
            "good" => Self::Good,
            "moderate" => Self::Moderate,
            "low" => Self::Low,
            _ => Self::from_score(score),
        }
    }
}

/// Points removed per factor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessDeductions {
    /// Sleep deduction
    pub sleep: u32,
    /// Stress deduction
    pub stress: u32,
    /// Soreness deduction
    pub soreness: u32,
    /// Energy deduction
    pub energy: u32,
}

impl ReadinessDeductions {
    /// Sum of all factors before clamping
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.sleep + self.stress + self.soreness + self.energy
    }
}

/// Scoring result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessAssessment {
    /// Clamped score in `[0, 100]`
    pub score: u8,
    /// Band derived from `score`
    pub band: ReadinessBand,
    /// Fixed text for `band`
    pub recommendation: &'static str,
    /// Per-factor breakdown
    pub deductions: ReadinessDeductions,
}

/// Readiness calculator
pub struct ReadinessCalculator;

impl ReadinessCalculator {
    /// Score a check-in against a deduction table
    #[must_use]
    pub fn score(input: &ReadinessInput, table: &DeductionTable) -> ReadinessAssessment {
        let deductions = ReadinessDeductions {
            sleep: table.sleep_deduction(input.sleep_hours),
            stress: table.stress_deduction(input.stress_level),
            soreness: table.soreness_deduction(input.muscle_soreness),
            energy: table.energy_deduction(input.energy_level),
        };

        let raw = MAX_SCORE - i64::from(deductions.total());
        let score = u8::try_from(raw.clamp(0, MAX_SCORE)).unwrap_or(0);
        let band = ReadinessBand::from_score(score);

        tracing::trace!(
            score,
            band = band.as_str(),
            total_deduction = deductions.total(),
            "readiness scored"
        );

        ReadinessAssessment {
            score,
            band,
            recommendation: band.recommendation(),
            deductions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        sleep_hours: f64,
        stress_level: StressLevel,
        muscle_soreness: MuscleSoreness,
        energy_level: EnergyLevel,
    ) -> ReadinessInput {
        ReadinessInput {
            sleep_hours,
            stress_level,
            muscle_soreness,
            energy_level,
            date: Utc::now(),
        }
    }

    #[test]
    fn test_rested_client_scores_full() {
        let result = ReadinessCalculator::score(
            &input(8.0, StressLevel::Low, MuscleSoreness::None, EnergyLevel::High),
            &DeductionTable::standard(),
        );
        assert_eq!(result.score, 100);
        assert_eq!(result.band, ReadinessBand::Excellent);
        assert_eq!(result.deductions.total(), 0);
    }

    #[test]
    fn test_worst_case_clamps_to_zero() {
        let worst = input(5.0, StressLevel::High, MuscleSoreness::Severe, EnergyLevel::Low);

        let standard = ReadinessCalculator::score(&worst, &DeductionTable::standard());
        assert_eq!(standard.deductions.total(), 105);
        assert_eq!(standard.score, 0);
        assert_eq!(standard.band, ReadinessBand::Low);

        let lenient = ReadinessCalculator::score(&worst, &DeductionTable::lenient());
        assert_eq!(lenient.deductions.total(), 90);
        assert_eq!(lenient.score, 10);
    }

    #[test]
    fn test_sleep_tiers_standard() {
        let table = DeductionTable::standard();
        assert_eq!(table.sleep_deduction(5.99), 30);
        assert_eq!(table.sleep_deduction(6.0), 15);
        assert_eq!(table.sleep_deduction(6.5), 15);
        assert_eq!(table.sleep_deduction(7.0), 0);
        assert_eq!(table.sleep_deduction(9.0), 0);
        assert_eq!(table.sleep_deduction(9.5), 10);
        assert_eq!(table.sleep_deduction(30.0), 10);
    }

    #[test]
    fn test_sleep_tiers_lenient() {
        let table = DeductionTable::lenient();
        assert_eq!(table.sleep_deduction(5.0), 20);
        assert_eq!(table.sleep_deduction(6.5), 0);
        assert_eq!(table.sleep_deduction(12.0), 0);
    }

    #[test]
    fn test_abnormal_sleep_values() {
        let table = DeductionTable::standard();
        assert_eq!(table.sleep_deduction(-3.0), 30);
        assert_eq!(table.sleep_deduction(f64::NAN), 0);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ReadinessBand::from_score(100), ReadinessBand::Excellent);
        assert_eq!(ReadinessBand::from_score(80), ReadinessBand::Excellent);
        assert_eq!(ReadinessBand::from_score(79), ReadinessBand::Good);
        assert_eq!(ReadinessBand::from_score(60), ReadinessBand::Good);
        assert_eq!(ReadinessBand::from_score(59), ReadinessBand::Moderate);
        assert_eq!(ReadinessBand::from_score(40), ReadinessBand::Moderate);
        assert_eq!(ReadinessBand::from_score(39), ReadinessBand::Low);
        assert_eq!(ReadinessBand::from_score(0), ReadinessBand::Low);
    }

    #[test]
    fn test_unknown_labels_are_least_penalizing() {
        assert_eq!(StressLevel::from_str_lossy("panicked"), StressLevel::Low);
        assert_eq!(MuscleSoreness::from_str_lossy(""), MuscleSoreness::None);
        assert_eq!(EnergyLevel::from_str_lossy("???"), EnergyLevel::High);
        assert_eq!(StressLevel::from_str_lossy("  HIGH "), StressLevel::High);
    }

    #[test]
    fn test_deserialization_normalizes_labels() {
        let parsed: ReadinessInput = serde_json::from_str(
            r#"{"sleepHours":7.5,"stressLevel":"Extreme","muscleSoreness":"Moderate","energyLevel":3}"#,
        )
        .unwrap();

        assert_eq!(parsed.stress_level, StressLevel::Low);
        assert_eq!(parsed.muscle_soreness, MuscleSoreness::Moderate);
        assert_eq!(parsed.energy_level, EnergyLevel::High);
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        let json = serde_json::to_string(&MuscleSoreness::Severe).unwrap();
        assert_eq!(json, "\"severe\"");
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("Lenient".parse::<DeductionPreset>().unwrap(), DeductionPreset::Lenient);
        assert!("average".parse::<DeductionPreset>().is_err());
        assert_eq!(ReadinessConfig::default().table(), DeductionTable::standard());
    }
}
