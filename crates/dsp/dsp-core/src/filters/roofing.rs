//! Roofing Filter indicator.

use super::{highpass_alpha, unit_interval, SuperSmoother};
use dsp_api::{RoofingConfig, SuperSmootherConfig};
use dsp_spi::{Result, StreamingFilter};

/// Ehlers Roofing Filter
///
/// A high-pass filter followed by a Super Smoother. The high-pass removes
/// the trend component longer than `hp_period`, the smoother removes noise
/// shorter than `lp_period`, leaving the cycle band in between.
///
/// The output oscillates around zero.
#[derive(Debug, Clone)]
pub struct RoofingFilter {
    config: RoofingConfig,
    highpass: HighPass,
    smoother: SuperSmoother,
}

impl RoofingFilter {
    pub fn new(hp_period: usize, lp_period: usize) -> Result<Self> {
        Self::with_config(RoofingConfig::new(hp_period, lp_period))
    }

    pub fn with_config(config: RoofingConfig) -> Result<Self> {
        config.validate()?;
        let highpass = HighPass::new(unit_interval(
            "hp_period",
            highpass_alpha(config.hp_period, 0.707),
        )?);
        let smoother = SuperSmoother::with_config(SuperSmootherConfig::new(config.lp_period))?;
        tracing::debug!(
            hp_period = config.hp_period,
            lp_period = config.lp_period,
            alpha1 = highpass.alpha,
            "roofing filter configured"
        );
        Ok(Self { config, highpass, smoother })
    }

    pub fn config(&self) -> &RoofingConfig {
        &self.config
    }

    /// High-pass output of the most recent bar (input to the smoother).
    pub fn highpass(&self) -> Option<f64> {
        (self.highpass.bars > 0).then_some(self.highpass.out1)
    }
}

impl Default for RoofingFilter {
    fn default() -> Self {
        let config = RoofingConfig::default();
        Self {
            config,
            highpass: HighPass::new(highpass_alpha(config.hp_period, 0.707)),
            smoother: SuperSmoother::default(),
        }
    }
}

impl StreamingFilter for RoofingFilter {
    fn name(&self) -> &str {
        "RoofingFilter"
    }

    fn push(&mut self, price: f64) -> f64 {
        let hp = self.highpass.push(price);
        self.smoother.push(hp)
    }

    fn reset(&mut self) {
        self.highpass.reset();
        self.smoother.reset();
    }

    fn current(&self) -> Option<f64> {
        self.smoother.current()
    }

    fn bars_seen(&self) -> usize {
        self.smoother.bars_seen()
    }

    fn min_periods(&self) -> usize {
        3
    }
}

/// Two-pole high-pass over the second difference of price.
#[derive(Debug, Clone)]
struct HighPass {
    alpha: f64,
    in1: f64,
    in2: f64,
    out1: f64,
    out2: f64,
    bars: usize,
}

impl HighPass {
    fn new(alpha: f64) -> Self {
        Self { alpha, in1: 0.0, in2: 0.0, out1: 0.0, out2: 0.0, bars: 0 }
    }

    fn push(&mut self, price: f64) -> f64 {
        let a = self.alpha;
        let out = if self.bars < 2 {
            0.0
        } else {
            (1.0 - a / 2.0) * (1.0 - a / 2.0) * (price - 2.0 * self.in1 + self.in2)
                + 2.0 * (1.0 - a) * self.out1
                - (1.0 - a) * (1.0 - a) * self.out2
        };

        self.in2 = self.in1;
        self.in1 = price;
        self.out2 = self.out1;
        self.out1 = out;
        self.bars += 1;
        out
    }

    fn reset(&mut self) {
        *self = Self::new(self.alpha);
    }
}
