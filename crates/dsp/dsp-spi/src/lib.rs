//! Adaptive DSP Service Provider Interface
//!
//! Defines the traits, record types and errors shared by the adaptive
//! filter crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// DSP filter errors.
///
/// Numeric input never produces an error; these variants only cover
/// configuration and explicit strict-length checks.
#[derive(Debug, Error)]
pub enum DspError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DspError {
    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        DspError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DspError>;

// ============================================================================
// MAMA / FAMA Records
// ============================================================================

/// One bar of MAMA/FAMA output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MamaFamaResult {
    /// MESA Adaptive Moving Average (price units).
    pub mama: f64,
    /// Following Adaptive Moving Average (price units).
    pub fama: f64,
    /// Cycle phase in degrees.
    pub phase: f64,
    /// Dominant cycle period in bars, always within `[6, 50]`.
    pub period: f64,
}

impl MamaFamaResult {
    /// `mama - fama`; the sign drives crossover detection.
    pub fn spread(&self) -> f64 {
        self.mama - self.fama
    }
}

/// Direction of a MAMA/FAMA crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossoverKind {
    /// MAMA crossed above FAMA.
    Bullish,
    /// MAMA crossed below FAMA.
    Bearish,
}

impl CrossoverKind {
    /// Convert to numeric signal: Bullish = 1, Bearish = -1.
    pub fn to_numeric(&self) -> f64 {
        match self {
            CrossoverKind::Bullish => 1.0,
            CrossoverKind::Bearish => -1.0,
        }
    }
}

/// A crossover between MAMA and FAMA at bar `index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossoverEvent {
    /// Bar index of the bar on which the crossing completed.
    pub index: usize,
    pub kind: CrossoverKind,
    pub mama: f64,
    pub fama: f64,
}

// ============================================================================
// Core Traits
// ============================================================================

/// Single-output streaming filter.
///
/// Implementations must be fed bars in strictly increasing order; skipping
/// or reordering bars corrupts the recursive state.
pub trait StreamingFilter: Send + Sync {
    /// Filter name.
    fn name(&self) -> &str;

    /// Consume one price and return the output for that bar.
    fn push(&mut self, price: f64) -> f64;

    /// Reset internal state. Coefficients are kept.
    fn reset(&mut self);

    /// Output of the most recent bar, if any bar was pushed.
    fn current(&self) -> Option<f64>;

    /// Number of bars consumed since construction or the last reset.
    fn bars_seen(&self) -> usize;

    /// Bars consumed before the output stops being seeded/zero-filled.
    fn min_periods(&self) -> usize;

    /// Batch form: drives a fresh copy of this filter through `push`.
    fn calculate(&self, data: &[f64]) -> Vec<f64>
    where
        Self: Clone + Sized,
    {
        let mut fresh = self.clone();
        fresh.reset();
        data.iter().map(|&price| fresh.push(price)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct RunningSum {
        sum: f64,
        bars: usize,
    }

    impl StreamingFilter for RunningSum {
        fn name(&self) -> &str {
            "RunningSum"
        }

        fn push(&mut self, price: f64) -> f64 {
            self.sum += price;
            self.bars += 1;
            self.sum
        }

        fn reset(&mut self) {
            self.sum = 0.0;
            self.bars = 0;
        }

        fn current(&self) -> Option<f64> {
            (self.bars > 0).then_some(self.sum)
        }

        fn bars_seen(&self) -> usize {
            self.bars
        }

        fn min_periods(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_calculate_uses_fresh_instance() {
        let mut filter = RunningSum { sum: 0.0, bars: 0 };
        filter.push(10.0);

        let out = filter.calculate(&[1.0, 2.0, 3.0]);
        assert_eq!(out, vec![1.0, 3.0, 6.0]);

        // The original instance is untouched.
        assert_eq!(filter.current(), Some(10.0));
        assert_eq!(filter.bars_seen(), 1);
    }

    #[test]
    fn test_crossover_kind_numeric() {
        assert_eq!(CrossoverKind::Bullish.to_numeric(), 1.0);
        assert_eq!(CrossoverKind::Bearish.to_numeric(), -1.0);
    }

    #[test]
    fn test_mama_fama_result_serde() {
        let result = MamaFamaResult { mama: 101.5, fama: 100.25, phase: 12.0, period: 18.5 };
        let json = serde_json::to_string(&result).unwrap();
        let back: MamaFamaResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert!((result.spread() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = DspError::invalid_parameter("period", "must be at least 2");
        assert_eq!(err.to_string(), "Invalid parameter: period - must be at least 2");
    }
}
