//! # Capacity Estimator
//!
//! Computes a parse-buffer size sufficient for a raw message without
//! letting attacker-controlled nesting or size force unbounded
//! allocation. The structural scan counts container-open tokens (`{`,
//! `[`) as a cheap proxy for true depth; no parsing is required.
//!
//! The estimate is clamped to a hard ceiling. A message whose true
//! requirement exceeds the ceiling must be dropped with a no-memory
//! outcome rather than truncated or grown past the bound (fail closed:
//! losing an oversized message is preferable to unbounded growth).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The no-memory outcome: the message cannot be parsed inside the
/// ceiling and must be dropped, never truncated.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("message needs {required} bytes to parse, ceiling is {ceiling}")]
pub struct CapacityExceeded {
    /// Unclamped buffer requirement for the message.
    pub required: usize,
    /// The configured hard ceiling.
    pub ceiling: usize,
}

/// Sizing parameters for parse-buffer estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// Bytes reserved per container level.
    pub per_level_overhead: usize,
    /// Flat reservation added to every estimate.
    pub fixed_overhead: usize,
    /// Hard ceiling on any parse buffer.
    pub max_capacity: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            per_level_overhead: 16,
            fixed_overhead: 64,
            max_capacity: 8_192,
        }
    }
}

impl CapacityConfig {
    /// Tight ceiling for fast, deterministic tests.
    pub fn for_testing() -> Self {
        Self {
            per_level_overhead: 16,
            fixed_overhead: 64,
            max_capacity: 512,
        }
    }
}

/// Bounds parse-buffer allocation for raw inbound bytes.
#[derive(Debug, Clone)]
pub struct CapacityEstimator {
    config: CapacityConfig,
}

impl CapacityEstimator {
    /// Create an estimator with the given sizing parameters.
    pub fn new(config: CapacityConfig) -> Self {
        Self { config }
    }

    /// Parse-buffer size for `raw`, clamped to the hard ceiling.
    ///
    /// `capacity = len + per_level_overhead * max(depth, 1) + fixed_overhead`
    /// where `depth` is the container-open token count.
    pub fn estimate(&self, raw: &[u8]) -> usize {
        self.required(raw).min(self.config.max_capacity)
    }

    /// The buffer budget for `raw`, or the no-memory outcome when the
    /// requirement exceeds the ceiling.
    pub fn budget(&self, raw: &[u8]) -> Result<usize, CapacityExceeded> {
        let required = self.required(raw);
        if required > self.config.max_capacity {
            return Err(CapacityExceeded {
                required,
                ceiling: self.config.max_capacity,
            });
        }
        Ok(required)
    }

    /// Whether `raw` can be parsed inside the ceiling.
    pub fn fits(&self, raw: &[u8]) -> bool {
        self.budget(raw).is_ok()
    }

    /// The configured hard ceiling.
    pub fn max_capacity(&self) -> usize {
        self.config.max_capacity
    }

    fn required(&self, raw: &[u8]) -> usize {
        let depth = raw
            .iter()
            .filter(|&&b| b == b'{' || b == b'[')
            .count()
            .max(1);
        raw.len()
            .saturating_add(self.config.per_level_overhead.saturating_mul(depth))
            .saturating_add(self.config.fixed_overhead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> CapacityEstimator {
        CapacityEstimator::new(CapacityConfig::for_testing())
    }

    #[test]
    fn test_flat_message_uses_minimum_depth() {
        let est = estimator();
        // No container tokens at all: depth floor of 1 still applies.
        assert_eq!(est.estimate(b"12345"), 5 + 16 + 64);
    }

    #[test]
    fn test_estimate_grows_with_nesting() {
        let est = estimator();
        let shallow = est.estimate(br#"{"a":1}"#);
        let deep = est.estimate(br#"{"a":[{"b":[1]}]}"#);
        assert!(deep > shallow);
    }

    #[test]
    fn test_estimate_clamps_to_ceiling() {
        let est = estimator();
        let raw = vec![b'['; 1_000];
        assert_eq!(est.estimate(&raw), 512);
        assert!(!est.fits(&raw));
    }

    #[test]
    fn test_nesting_bomb_does_not_fit() {
        // Tiny wire size, absurd depth: the per-level overhead pushes
        // the requirement past the ceiling.
        let est = estimator();
        let raw = vec![b'{'; 64];
        assert!(!est.fits(&raw));
    }

    #[test]
    fn test_ordinary_message_fits() {
        let est = estimator();
        assert!(est.fits(br#"{"type":4,"from":7,"msg":"hi"}"#));
    }

    #[test]
    fn test_budget_reports_requirement_and_ceiling() {
        let est = estimator();
        let raw = vec![b'{'; 64];
        let err = est.budget(&raw).unwrap_err();
        assert_eq!(err.ceiling, 512);
        assert_eq!(err.required, 64 + 16 * 64 + 64);
    }
}
