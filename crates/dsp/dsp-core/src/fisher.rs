//! Fisher Transform normalizer.

use crate::series::SeriesBuffer;
use dsp_api::FisherConfig;
use dsp_spi::{Result, StreamingFilter};

const VALUE_LIMIT: f64 = 0.999;

/// Fisher Transform
///
/// Normalizes price into its position inside the trailing `period` window and
/// maps that position through `0.5 * ln((1 + v) / (1 - v))`, which makes the
/// output approximately Gaussian.
///
/// `v = 2 * ((price - lowest) / (highest - lowest) - 0.5)`, clamped to
/// `[-0.999, 0.999]`, and `0` for a flat window.
///
/// `fisher = 0.5 * ln((1 + v) / (1 - v)) + 0.5 * fisher[1]`
///
/// Bars before the window is full output `0.0`, so the output stays
/// index-aligned with the input.
#[derive(Debug, Clone)]
pub struct FisherTransform {
    config: FisherConfig,
    window: SeriesBuffer,
    fisher: f64,
    trigger: f64,
    bars: usize,
}

impl FisherTransform {
    pub fn new(period: usize) -> Result<Self> {
        Self::with_config(FisherConfig::new(period))
    }

    pub fn with_config(config: FisherConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(period = config.period, "fisher transform configured");
        Ok(Self::from_config(config))
    }

    fn from_config(config: FisherConfig) -> Self {
        Self {
            config,
            window: SeriesBuffer::with_retention(config.period),
            fisher: 0.0,
            trigger: 0.0,
            bars: 0,
        }
    }

    pub fn period(&self) -> usize {
        self.config.period
    }

    /// Previous bar's Fisher value, the usual signal line.
    pub fn trigger(&self) -> f64 {
        self.trigger
    }

    /// True once `period` bars have been seen.
    pub fn is_ready(&self) -> bool {
        self.bars >= self.config.period
    }
}

impl Default for FisherTransform {
    fn default() -> Self {
        Self::from_config(FisherConfig::default())
    }
}

impl StreamingFilter for FisherTransform {
    fn name(&self) -> &str {
        "FisherTransform"
    }

    fn push(&mut self, price: f64) -> f64 {
        self.window.push(price);
        self.bars += 1;
        self.trigger = self.fisher;

        if !self.is_ready() {
            return 0.0;
        }

        let value = match self.window.extremes() {
            Some((highest, lowest)) if highest > lowest => {
                let raw = 2.0 * ((price - lowest) / (highest - lowest) - 0.5);
                raw.clamp(-VALUE_LIMIT, VALUE_LIMIT)
            }
            _ => {
                tracing::trace!(bar = self.bars - 1, "flat fisher window");
                0.0
            }
        };

        self.fisher = 0.5 * ((1.0 + value) / (1.0 - value)).ln() + 0.5 * self.fisher;
        self.fisher
    }

    fn reset(&mut self) {
        *self = Self::from_config(self.config);
    }

    fn current(&self) -> Option<f64> {
        (self.bars > 0).then_some(self.fisher)
    }

    fn bars_seen(&self) -> usize {
        self.bars
    }

    fn min_periods(&self) -> usize {
        self.config.period
    }
}
