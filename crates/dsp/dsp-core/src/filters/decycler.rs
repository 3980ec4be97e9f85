//! Ehlers Decycler.

use super::{highpass_alpha, unit_interval};
use dsp_api::DecyclerConfig;
use dsp_spi::{Result, StreamingFilter};

/// Ehlers Decycler
///
/// Removes cycle components shorter than `hp_period` by subtracting a one-pole
/// high-pass from price. What is left is a low-lag trend line.
///
/// `hp = (1 - alpha/2) * (price - price[1]) + (1 - alpha) * hp[1]`
///
/// `decycler = price - hp`
///
/// On the first bar `hp = 0`, so the output equals the price.
#[derive(Debug, Clone)]
pub struct Decycler {
    config: DecyclerConfig,
    alpha: f64,
    prev_price: f64,
    hp: f64,
    out: f64,
    bars: usize,
}

impl Decycler {
    pub fn new(hp_period: usize) -> Result<Self> {
        Self::with_config(DecyclerConfig::new(hp_period))
    }

    pub fn with_config(config: DecyclerConfig) -> Result<Self> {
        config.validate()?;
        let alpha = unit_interval("hp_period", highpass_alpha(config.hp_period, 1.0))?;
        tracing::debug!(hp_period = config.hp_period, alpha, "decycler configured");
        Ok(Self::from_parts(config, alpha))
    }

    fn from_parts(config: DecyclerConfig, alpha: f64) -> Self {
        Self {
            config,
            alpha,
            prev_price: 0.0,
            hp: 0.0,
            out: 0.0,
            bars: 0,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn hp_period(&self) -> usize {
        self.config.hp_period
    }

    /// Cycle component removed on the most recent bar.
    pub fn highpass(&self) -> Option<f64> {
        (self.bars > 0).then_some(self.hp)
    }
}

impl Default for Decycler {
    fn default() -> Self {
        let config = DecyclerConfig::default();
        Self::from_parts(config, highpass_alpha(config.hp_period, 1.0))
    }
}

impl StreamingFilter for Decycler {
    fn name(&self) -> &str {
        "Decycler"
    }

    fn push(&mut self, price: f64) -> f64 {
        if self.bars > 0 {
            let a = self.alpha;
            self.hp = (1.0 - a / 2.0) * (price - self.prev_price) + (1.0 - a) * self.hp;
        }

        self.out = price - self.hp;
        self.prev_price = price;
        self.bars += 1;
        self.out
    }

    fn reset(&mut self) {
        *self = Self::from_parts(self.config, self.alpha);
    }

    fn current(&self) -> Option<f64> {
        (self.bars > 0).then_some(self.out)
    }

    fn bars_seen(&self) -> usize {
        self.bars
    }

    fn min_periods(&self) -> usize {
        1
    }
}
