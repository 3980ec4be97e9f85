//! Ehlers Super Smoother filter.

use dsp_api::SuperSmootherConfig;
use dsp_spi::{Result, StreamingFilter};
use std::f64::consts::PI;

/// Ehlers Super Smoother (2-pole Butterworth filter)
///
/// A 2-pole Butterworth low-pass filter that removes high-frequency noise with
/// less lag than a traditional moving average of similar smoothness.
///
/// The first two outputs are the first two inputs; from the third bar on the
/// output is `c1 * (price + price[1]) / 2 + c2 * out[1] + c3 * out[2]`.
#[derive(Debug, Clone)]
pub struct SuperSmoother {
    config: SuperSmootherConfig,
    c1: f64,
    c2: f64,
    c3: f64,
    prev_input: f64,
    out1: f64,
    out2: f64,
    bars: usize,
}

impl SuperSmoother {
    pub fn new(period: usize) -> Result<Self> {
        Self::with_config(SuperSmootherConfig::new(period))
    }

    pub fn with_config(config: SuperSmootherConfig) -> Result<Self> {
        config.validate()?;
        let (c1, c2, c3) = coefficients(config.period);
        tracing::debug!(period = config.period, c1, c2, c3, "super smoother configured");
        Ok(Self {
            config,
            c1,
            c2,
            c3,
            prev_input: 0.0,
            out1: 0.0,
            out2: 0.0,
            bars: 0,
        })
    }

    pub fn period(&self) -> usize {
        self.config.period
    }

    /// Filter coefficients `(c1, c2, c3)`.
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.c1, self.c2, self.c3)
    }
}

fn coefficients(period: usize) -> (f64, f64, f64) {
    let a1 = (-1.414 * PI / period as f64).exp();
    let b1 = 2.0 * a1 * (1.414 * PI / period as f64).cos();
    let c2 = b1;
    let c3 = -a1 * a1;
    let c1 = 1.0 - c2 - c3;
    (c1, c2, c3)
}

impl Default for SuperSmoother {
    fn default() -> Self {
        let config = SuperSmootherConfig::default();
        let (c1, c2, c3) = coefficients(config.period);
        Self {
            config,
            c1,
            c2,
            c3,
            prev_input: 0.0,
            out1: 0.0,
            out2: 0.0,
            bars: 0,
        }
    }
}

impl StreamingFilter for SuperSmoother {
    fn name(&self) -> &str {
        "SuperSmoother"
    }

    fn push(&mut self, price: f64) -> f64 {
        let out = if self.bars < 2 {
            price
        } else {
            self.c1 * (price + self.prev_input) / 2.0 + self.c2 * self.out1 + self.c3 * self.out2
        };

        self.prev_input = price;
        self.out2 = self.out1;
        self.out1 = out;
        self.bars += 1;
        out
    }

    fn reset(&mut self) {
        self.prev_input = 0.0;
        self.out1 = 0.0;
        self.out2 = 0.0;
        self.bars = 0;
    }

    fn current(&self) -> Option<f64> {
        (self.bars > 0).then_some(self.out1)
    }

    fn bars_seen(&self) -> usize {
        self.bars
    }

    fn min_periods(&self) -> usize {
        3
    }
}
