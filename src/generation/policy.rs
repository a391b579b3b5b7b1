// ABOUTME: Timeout, attempt, and backoff settings for bounded artifact generation
// ABOUTME: Parsed from environment and validated before the server starts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use std::time::Duration;

use trainwise_core::constants::generation::{
    DEFAULT_ATTEMPT_TIMEOUT_SECS, DEFAULT_BACKOFF_SECS, DEFAULT_MAX_ATTEMPTS,
};
use trainwise_core::errors::{AppError, AppResult};

/// Bounds applied to every generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPolicy {
    /// Wall-clock budget for a single provider call
    pub attempt_timeout: Duration,
    /// Provider calls per request, including the first
    pub max_attempts: u32,
    /// Wait after failed attempt `n` is entry `n - 1`; the last entry repeats
    pub backoff_schedule: Vec<Duration>,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(DEFAULT_ATTEMPT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_schedule: DEFAULT_BACKOFF_SECS
                .iter()
                .copied()
                .map(Duration::from_secs)
                .collect(),
        }
    }
}

impl GenerationPolicy {
    /// Delay before the attempt that follows failed attempt `attempt` (1-based)
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        if self.backoff_schedule.is_empty() {
            return Duration::ZERO;
        }
        let index = (attempt.saturating_sub(1) as usize).min(self.backoff_schedule.len() - 1);
        self.backoff_schedule[index]
    }

    /// Longest a request can take when every attempt times out
    #[must_use]
    pub fn worst_case_duration(&self) -> Duration {
        let attempts = self.max_attempts.max(1);
        let calls = self.attempt_timeout.saturating_mul(attempts);
        (1..attempts).fold(calls, |total, n| total.saturating_add(self.backoff_after(n)))
    }

    /// Parse a comma-separated list of whole seconds, e.g. `"2,5,10"`
    ///
    /// # Errors
    ///
    /// Returns a config error if any entry is not a non-negative integer
    pub fn parse_backoff_schedule(raw: &str) -> AppResult<Vec<Duration>> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    AppError::config(format!("Invalid backoff entry '{s}': {e}"))
                })
            })
            .collect()
    }

    /// Reject settings that would make generation impossible
    ///
    /// # Errors
    ///
    /// Returns a config error for zero attempts or a zero timeout
    pub fn validate(&self) -> AppResult<()> {
        if self.max_attempts == 0 {
            return Err(AppError::config("GENERATION_MAX_ATTEMPTS must be at least 1"));
        }
        if self.attempt_timeout.is_zero() {
            return Err(AppError::config("GENERATION_TIMEOUT_SECS must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backoff_indexing() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.backoff_after(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_after(2), Duration::from_secs(5));
        assert_eq!(policy.backoff_after(3), Duration::from_secs(10));
        assert_eq!(policy.backoff_after(7), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_schedule_means_no_wait() {
        let policy = GenerationPolicy {
            backoff_schedule: Vec::new(),
            ..GenerationPolicy::default()
        };
        assert_eq!(policy.backoff_after(1), Duration::ZERO);
    }

    #[test]
    fn test_worst_case_duration() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.worst_case_duration(), Duration::from_secs(120 * 3 + 2 + 5));
    }

    #[test]
    fn test_parse_backoff_schedule() {
        let parsed = GenerationPolicy::parse_backoff_schedule(" 1, 3 ,9").unwrap();
        assert_eq!(
            parsed,
            vec![Duration::from_secs(1), Duration::from_secs(3), Duration::from_secs(9)]
        );
        assert!(GenerationPolicy::parse_backoff_schedule("1,x").is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let policy = GenerationPolicy {
            max_attempts: 0,
            ..GenerationPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
