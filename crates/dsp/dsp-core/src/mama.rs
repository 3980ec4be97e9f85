//! MAMA (MESA Adaptive Moving Average) with FAMA.

use crate::cycle::{AdaptivePeriodDetector, CycleState};
use dsp_api::MamaConfig;
use dsp_spi::{DspError, MamaFamaResult, Result};

/// MAMA - MESA Adaptive Moving Average with FAMA (Following Adaptive MA)
///
/// The smoothing coefficient adapts to the dominant cycle period reported by
/// an [`AdaptivePeriodDetector`]:
///
/// `alpha = max(fast_limit / period, slow_limit)`, never above `fast_limit`
///
/// MAMA is an EMA of price with that alpha, FAMA an EMA of MAMA at half the
/// alpha. Both start at the first price.
#[derive(Debug, Clone)]
pub struct MamaFama {
    config: MamaConfig,
    detector: AdaptivePeriodDetector,
    mama: f64,
    fama: f64,
    alpha: f64,
    bars: usize,
}

impl MamaFama {
    /// Bars needed before period and phase carry meaning.
    pub const MIN_BARS: usize = 6;

    pub fn new(fast_limit: f64, slow_limit: f64) -> Result<Self> {
        Self::with_config(MamaConfig::new(fast_limit, slow_limit))
    }

    pub fn with_config(config: MamaConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            fast_limit = config.fast_limit,
            slow_limit = config.slow_limit,
            "mama/fama configured"
        );
        Ok(Self::from_config(config))
    }

    fn from_config(config: MamaConfig) -> Self {
        Self {
            config,
            detector: AdaptivePeriodDetector::new(),
            mama: 0.0,
            fama: 0.0,
            alpha: config.fast_limit,
            bars: 0,
        }
    }

    pub fn config(&self) -> &MamaConfig {
        &self.config
    }

    /// Smoothing coefficient used on the most recent bar.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn cycle_state(&self) -> &CycleState {
        self.detector.state()
    }

    pub fn bars_seen(&self) -> usize {
        self.bars
    }

    /// Latest result, `None` before the first bar.
    pub fn current(&self) -> Option<MamaFamaResult> {
        (self.bars > 0).then(|| self.result())
    }

    /// Consumes one price and returns the bar's MAMA/FAMA.
    ///
    /// The smoothers are updated as `mama += alpha * (price - mama)`. This is
    /// algebraically `alpha * price + (1 - alpha) * mama[1]`, but the rounding
    /// differs, so values recomputed with the weighted form can disagree in
    /// the last few bits.
    pub fn push(&mut self, price: f64) -> MamaFamaResult {
        let estimate = self.detector.push(price);

        let fast = self.config.fast_limit;
        self.alpha = (fast / estimate.period).max(self.config.slow_limit).min(fast);

        if self.bars == 0 {
            self.mama = price;
            self.fama = price;
        } else {
            // Incremental form keeps a constant input exactly at its fixed point
            self.mama += self.alpha * (price - self.mama);
            self.fama += 0.5 * self.alpha * (self.mama - self.fama);
        }
        self.bars += 1;

        self.result()
    }

    pub fn reset(&mut self) {
        *self = Self::from_config(self.config);
    }

    /// Runs a fresh copy of this engine over `data`, one result per bar.
    pub fn calculate(&self, data: &[f64]) -> Vec<MamaFamaResult> {
        let mut engine = Self::from_config(self.config);
        data.iter().map(|&price| engine.push(price)).collect()
    }

    /// Like [`calculate`](Self::calculate), rejecting input shorter than
    /// [`MIN_BARS`](Self::MIN_BARS).
    pub fn calculate_strict(&self, data: &[f64]) -> Result<Vec<MamaFamaResult>> {
        if data.len() < Self::MIN_BARS {
            return Err(DspError::InsufficientData {
                required: Self::MIN_BARS,
                got: data.len(),
            });
        }
        Ok(self.calculate(data))
    }

    fn result(&self) -> MamaFamaResult {
        let estimate = self.detector.estimate();
        MamaFamaResult {
            mama: self.mama,
            fama: self.fama,
            phase: estimate.phase,
            period: estimate.period,
        }
    }
}

impl Default for MamaFama {
    fn default() -> Self {
        Self::from_config(MamaConfig::default())
    }
}
