//! Ehlers Bandpass resonator.

use super::unit_interval;
use dsp_api::BandpassConfig;
use dsp_spi::{Result, StreamingFilter};
use std::f64::consts::PI;

/// Ehlers Bandpass Filter
///
/// Second-order resonator centered on `period`. Its input is the 2-bar price
/// difference, so the output oscillates around zero and isolates cycles near
/// the center period.
///
/// `bp = 0.5 * (1 - alpha) * (price - price[2]) + beta * (1 + alpha) * bp[1] - alpha * bp[2]`
///
/// The first two outputs are zero.
#[derive(Debug, Clone)]
pub struct Bandpass {
    config: BandpassConfig,
    alpha: f64,
    beta: f64,
    in1: f64,
    in2: f64,
    out1: f64,
    out2: f64,
    bars: usize,
}

impl Bandpass {
    pub fn new(period: usize, bandwidth: f64) -> Result<Self> {
        Self::with_config(BandpassConfig::new(period, bandwidth))
    }

    pub fn with_config(config: BandpassConfig) -> Result<Self> {
        config.validate()?;

        let (alpha, beta) = coefficients(&config);
        let alpha = unit_interval("bandwidth", alpha)?;

        tracing::debug!(
            period = config.period,
            bandwidth = config.bandwidth,
            alpha,
            beta,
            "bandpass configured"
        );

        Ok(Self::from_parts(config, alpha, beta))
    }

    fn from_parts(config: BandpassConfig, alpha: f64, beta: f64) -> Self {
        Self {
            config,
            alpha,
            beta,
            in1: 0.0,
            in2: 0.0,
            out1: 0.0,
            out2: 0.0,
            bars: 0,
        }
    }

    pub fn config(&self) -> &BandpassConfig {
        &self.config
    }

    /// Coefficients `(alpha, beta)`.
    pub fn coefficients(&self) -> (f64, f64) {
        (self.alpha, self.beta)
    }
}

fn coefficients(config: &BandpassConfig) -> (f64, f64) {
    let beta = (2.0 * PI / config.period as f64).cos();
    let alpha = (1.0 - beta) / (1.414_f64.powf(2.0 / config.bandwidth) - 1.0);
    (alpha, beta)
}

impl Default for Bandpass {
    fn default() -> Self {
        let config = BandpassConfig::default();
        let (alpha, beta) = coefficients(&config);
        Self::from_parts(config, alpha, beta)
    }
}

impl StreamingFilter for Bandpass {
    fn name(&self) -> &str {
        "Bandpass"
    }

    fn push(&mut self, price: f64) -> f64 {
        let out = if self.bars < 2 {
            0.0
        } else {
            0.5 * (1.0 - self.alpha) * (price - self.in2)
                + self.beta * (1.0 + self.alpha) * self.out1
                - self.alpha * self.out2
        };

        self.in2 = self.in1;
        self.in1 = price;
        self.out2 = self.out1;
        self.out1 = out;
        self.bars += 1;
        out
    }

    fn reset(&mut self) {
        self.in1 = 0.0;
        self.in2 = 0.0;
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
