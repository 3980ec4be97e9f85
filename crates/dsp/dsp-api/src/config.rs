//! Filter configuration types.

use dsp_spi::{DspError, Result};
use serde::{Deserialize, Serialize};

fn require_min_period(name: &str, period: usize, min: usize) -> Result<()> {
    if period < min {
        return Err(DspError::invalid_parameter(
            name,
            format!("must be at least {}, got {}", min, period),
        ));
    }
    Ok(())
}

// ============================================================================
// Recursive Filters
// ============================================================================

/// Ehlers bandpass resonator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandpassConfig {
    /// Center period of the passband in bars.
    pub period: usize,
    /// Relative bandwidth (default: 0.3).
    pub bandwidth: f64,
}

impl BandpassConfig {
    pub fn new(period: usize, bandwidth: f64) -> Self {
        Self { period, bandwidth }
    }

    pub fn validate(&self) -> Result<()> {
        require_min_period("period", self.period, 3)?;
        if !self.bandwidth.is_finite() || self.bandwidth <= 0.0 {
            return Err(DspError::invalid_parameter(
                "bandwidth",
                format!("must be a positive finite number, got {}", self.bandwidth),
            ));
        }
        Ok(())
    }
}

impl Default for BandpassConfig {
    fn default() -> Self {
        Self { period: 20, bandwidth: 0.3 }
    }
}

/// Two-pole Super Smoother configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperSmootherConfig {
    pub period: usize,
}

impl SuperSmootherConfig {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn validate(&self) -> Result<()> {
        require_min_period("period", self.period, 2)
    }
}

impl Default for SuperSmootherConfig {
    fn default() -> Self {
        Self { period: 10 }
    }
}

/// Roofing filter configuration (high-pass followed by Super Smoother).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoofingConfig {
    /// Half-power period of the high-pass stage (default: 48).
    pub hp_period: usize,
    /// Super Smoother period (default: 10).
    pub lp_period: usize,
}

impl RoofingConfig {
    pub fn new(hp_period: usize, lp_period: usize) -> Self {
        Self { hp_period, lp_period }
    }

    pub fn validate(&self) -> Result<()> {
        // cos(0.707 * 2pi / hp) must stay positive
        require_min_period("hp_period", self.hp_period, 3)?;
        require_min_period("lp_period", self.lp_period, 2)
    }
}

impl Default for RoofingConfig {
    fn default() -> Self {
        Self { hp_period: 48, lp_period: 10 }
    }
}

/// Cyber Cycle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyberCycleConfig {
    pub period: usize,
}

impl CyberCycleConfig {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Smoothing factor: 2 / (period + 1).
    pub fn alpha(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    pub fn validate(&self) -> Result<()> {
        require_min_period("period", self.period, 2)
    }
}

impl Default for CyberCycleConfig {
    fn default() -> Self {
        Self { period: 10 }
    }
}

/// Decycler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecyclerConfig {
    /// High-pass cutoff period (default: 125).
    pub hp_period: usize,
}

impl DecyclerConfig {
    pub fn new(hp_period: usize) -> Self {
        Self { hp_period }
    }

    pub fn validate(&self) -> Result<()> {
        // cos(2pi / hp) must stay positive
        require_min_period("hp_period", self.hp_period, 5)
    }
}

impl Default for DecyclerConfig {
    fn default() -> Self {
        Self { hp_period: 125 }
    }
}

// ============================================================================
// Normalizers
// ============================================================================

/// Fisher Transform configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FisherConfig {
    /// Rolling window length (default: 10).
    pub period: usize,
}

impl FisherConfig {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn validate(&self) -> Result<()> {
        require_min_period("period", self.period, 2)
    }
}

impl Default for FisherConfig {
    fn default() -> Self {
        Self { period: 10 }
    }
}

// ============================================================================
// Adaptive Moving Averages
// ============================================================================

/// MAMA/FAMA configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MamaConfig {
    /// Upper bound of the adaptive alpha (default: 0.5).
    pub fast_limit: f64,
    /// Lower bound of the adaptive alpha (default: 0.05).
    pub slow_limit: f64,
}

impl MamaConfig {
    pub fn new(fast_limit: f64, slow_limit: f64) -> Self {
        Self { fast_limit, slow_limit }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("fast_limit", self.fast_limit), ("slow_limit", self.slow_limit)] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(DspError::invalid_parameter(
                    name,
                    format!("must be in (0, 1], got {}", value),
                ));
            }
        }
        if self.slow_limit > self.fast_limit {
            return Err(DspError::invalid_parameter(
                "slow_limit",
                format!(
                    "must not exceed fast_limit ({} > {})",
                    self.slow_limit, self.fast_limit
                ),
            ));
        }
        Ok(())
    }
}

impl Default for MamaConfig {
    fn default() -> Self {
        Self { fast_limit: 0.5, slow_limit: 0.05 }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Configuration for a full per-series pipeline.
///
/// Every section is optional in serialized form and falls back to its
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Raw prices retained by the pipeline's series buffer.
    pub history: usize,
    pub mama: MamaConfig,
    pub fisher: FisherConfig,
    pub bandpass: BandpassConfig,
    pub super_smoother: SuperSmootherConfig,
    pub roofing: RoofingConfig,
    pub cyber_cycle: CyberCycleConfig,
    pub decycler: DecyclerConfig,
}

impl PipelineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DspError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        tracing::debug!(history = config.history, "loaded pipeline configuration");
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| DspError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.history == 0 {
            return Err(DspError::invalid_parameter("history", "must be at least 1"));
        }
        self.mama.validate()?;
        self.fisher.validate()?;
        self.bandpass.validate()?;
        self.super_smoother.validate()?;
        self.roofing.validate()?;
        self.cyber_cycle.validate()?;
        self.decycler.validate()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history: 256,
            mama: MamaConfig::default(),
            fisher: FisherConfig::default(),
            bandpass: BandpassConfig::default(),
            super_smoother: SuperSmootherConfig::default(),
            roofing: RoofingConfig::default(),
            cyber_cycle: CyberCycleConfig::default(),
            decycler: DecyclerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(BandpassConfig::default(), BandpassConfig::new(20, 0.3));
        assert_eq!(SuperSmootherConfig::default().period, 10);
        assert_eq!(RoofingConfig::default(), RoofingConfig::new(48, 10));
        assert_eq!(CyberCycleConfig::default().period, 10);
        assert_eq!(DecyclerConfig::default().hp_period, 125);
        assert_eq!(FisherConfig::default().period, 10);
        assert_eq!(MamaConfig::default(), MamaConfig::new(0.5, 0.05));
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_cyber_cycle_alpha() {
        let config = CyberCycleConfig::new(9);
        assert!((config.alpha() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_periods_rejected() {
        assert!(SuperSmootherConfig::new(1).validate().is_err());
        assert!(BandpassConfig::new(2, 0.3).validate().is_err());
        assert!(BandpassConfig::new(20, 0.0).validate().is_err());
        assert!(BandpassConfig::new(20, f64::NAN).validate().is_err());
        assert!(RoofingConfig::new(2, 10).validate().is_err());
        assert!(DecyclerConfig::new(4).validate().is_err());
        assert!(FisherConfig::new(0).validate().is_err());
    }

    #[test]
    fn test_mama_limits() {
        assert!(MamaConfig::new(0.5, 0.05).validate().is_ok());
        assert!(MamaConfig::new(0.5, 0.5).validate().is_ok());
        assert!(MamaConfig::new(0.05, 0.5).validate().is_err());
        assert!(MamaConfig::new(0.0, 0.0).validate().is_err());
        assert!(MamaConfig::new(1.5, 0.05).validate().is_err());
    }

    #[test]
    fn test_pipeline_from_partial_json() {
        let json = r#"{ "fisher": { "period": 5 }, "roofing": { "hp_period": 40, "lp_period": 8 } }"#;
        let config = PipelineConfig::from_json_str(json).unwrap();

        assert_eq!(config.fisher.period, 5);
        assert_eq!(config.roofing, RoofingConfig::new(40, 8));
        assert_eq!(config.mama, MamaConfig::default());
        assert_eq!(config.history, 256);
    }

    #[test]
    fn test_pipeline_json_rejects_invalid_section() {
        let json = r#"{ "mama": { "fast_limit": 0.05, "slow_limit": 0.5 } }"#;
        let err = PipelineConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, DspError::InvalidParameter { .. }));

        let err = PipelineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DspError::InvalidConfig(_)));
    }

    #[test]
    fn test_pipeline_json_roundtrip() {
        let config = PipelineConfig::default();
        let json = config.to_json_string().unwrap();
        assert_eq!(PipelineConfig::from_json_str(&json).unwrap(), config);
    }
}
