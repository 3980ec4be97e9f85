//! Homodyne-discriminator cycle period detector.
//!
//! Estimates the dominant cycle period and phase of a price series one bar at
//! a time. The pipeline is a 4-bar smooth, a Hilbert-style FIR detrender, an
//! in-phase/quadrature split, a 90 degree phase advance and a homodyne
//! discriminator whose angle gives the period.

use crate::series::SeriesBuffer;
use serde::{Deserialize, Serialize};

/// Shortest period the detector reports.
pub const PERIOD_FLOOR: f64 = 6.0;
/// Longest period the detector reports.
pub const PERIOD_CEILING: f64 = 50.0;

/// Bars consumed before the FIR stages run.
const WARMUP_BARS: usize = 4;
/// Deepest FIR tap is 6 bars back.
const FIR_DEPTH: usize = 7;
/// Exponential weight of the newest value in every 0.2/0.8 smoother.
const SMOOTHING: f64 = 0.2;

const KERNEL_OUTER: f64 = 0.0962;
const KERNEL_INNER: f64 = 0.5769;

// ============================================================================
// State
// ============================================================================

/// Period and phase estimate for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleEstimate {
    /// Dominant cycle length in bars, within `[6, 50]`.
    pub period: f64,
    /// In-phase/quadrature angle in degrees.
    pub phase: f64,
}

/// Values the detector carries from one bar to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleState {
    period: f64,
    smooth_period: f64,
    phase: f64,
    prev_i2: f64,
    prev_q2: f64,
    re: f64,
    im: f64,
}

impl CycleState {
    fn seeded() -> Self {
        Self {
            period: PERIOD_FLOOR,
            smooth_period: PERIOD_FLOOR,
            phase: 0.0,
            prev_i2: 0.0,
            prev_q2: 0.0,
            re: 0.0,
            im: 0.0,
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Period run through a further 0.33/0.67 smoother.
    pub fn smooth_period(&self) -> f64 {
        self.smooth_period
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Smoothed in-phase phasor component of the last bar.
    pub fn prev_i2(&self) -> f64 {
        self.prev_i2
    }

    /// Smoothed quadrature phasor component of the last bar.
    pub fn prev_q2(&self) -> f64 {
        self.prev_q2
    }

    /// Smoothed real part of the discriminator.
    pub fn re(&self) -> f64 {
        self.re
    }

    /// Smoothed imaginary part of the discriminator.
    pub fn im(&self) -> f64 {
        self.im
    }
}

impl Default for CycleState {
    fn default() -> Self {
        Self::seeded()
    }
}

// ============================================================================
// Detector
// ============================================================================

/// Adaptive cycle period detector.
///
/// Feed prices in bar order with [`push`](Self::push). The period starts at
/// the 6-bar floor and never leaves `[6, 50]`. Divisions that would produce
/// non-finite values keep the previous period or phase instead, and a
/// discriminator that overflows is cleared back to zero.
#[derive(Debug, Clone)]
pub struct AdaptivePeriodDetector {
    prices: SeriesBuffer,
    smooth: SeriesBuffer,
    detrender: SeriesBuffer,
    i1: SeriesBuffer,
    q1: SeriesBuffer,
    state: CycleState,
    bars: usize,
}

impl AdaptivePeriodDetector {
    pub fn new() -> Self {
        Self {
            prices: SeriesBuffer::with_retention(WARMUP_BARS),
            smooth: SeriesBuffer::with_retention(FIR_DEPTH),
            detrender: SeriesBuffer::with_retention(FIR_DEPTH),
            i1: SeriesBuffer::with_retention(FIR_DEPTH),
            q1: SeriesBuffer::with_retention(FIR_DEPTH),
            state: CycleState::seeded(),
            bars: 0,
        }
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn estimate(&self) -> CycleEstimate {
        CycleEstimate {
            period: self.state.period,
            phase: self.state.phase,
        }
    }

    pub fn bars_seen(&self) -> usize {
        self.bars
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn push(&mut self, price: f64) -> CycleEstimate {
        self.prices.push(price);
        let bar = self.bars;
        self.bars += 1;

        if bar < WARMUP_BARS {
            return self.estimate();
        }

        let p = |offset| self.prices.at_or_latest(offset).unwrap_or(price);
        let smooth = (4.0 * p(0) + 3.0 * p(1) + 2.0 * p(2) + p(3)) / 10.0;
        self.smooth.push(smooth);

        let gain = 0.075 * self.state.period + 0.54;

        let detrender = fir(&self.smooth, gain);
        self.detrender.push(detrender);

        // In-phase is the detrender delayed by 3 bars, quadrature its FIR
        let q1 = fir(&self.detrender, gain);
        let i1 = self.detrender.at_or_latest(3).unwrap_or(detrender);
        self.q1.push(q1);
        self.i1.push(i1);

        let j_i = fir(&self.i1, gain);
        let j_q = fir(&self.q1, gain);

        let state = &mut self.state;
        let i2 = SMOOTHING * (i1 - j_q) + (1.0 - SMOOTHING) * state.prev_i2;
        let q2 = SMOOTHING * (q1 + j_i) + (1.0 - SMOOTHING) * state.prev_q2;

        let re = SMOOTHING * (i2 * state.prev_i2 + q2 * state.prev_q2) + (1.0 - SMOOTHING) * state.re;
        let im = SMOOTHING * (i2 * state.prev_q2 - q2 * state.prev_i2) + (1.0 - SMOOTHING) * state.im;

        if [i2, q2, re, im].iter().all(|v| v.is_finite()) {
            state.re = re;
            state.im = im;
            state.prev_i2 = i2;
            state.prev_q2 = q2;
        } else {
            // Holding a huge phasor would overflow again next bar, so restart
            // the discriminator and keep the period.
            tracing::trace!(bar, "discriminator overflow, restarting from zero");
            state.re = 0.0;
            state.im = 0.0;
            state.prev_i2 = 0.0;
            state.prev_q2 = 0.0;
        }

        let prev_period = state.period;
        let mut period = prev_period;
        if state.re != 0.0 && state.im != 0.0 {
            let candidate = 360.0 / (state.im / state.re).atan().to_degrees();
            if candidate.is_finite() {
                period = candidate;
            } else {
                tracing::trace!(bar, "non-finite period estimate, keeping previous");
            }
        }
        let period = period
            .min(1.5 * prev_period)
            .max(0.67 * prev_period)
            .clamp(PERIOD_FLOOR, PERIOD_CEILING);
        state.period = (SMOOTHING * period + (1.0 - SMOOTHING) * prev_period)
            .clamp(PERIOD_FLOOR, PERIOD_CEILING);
        state.smooth_period = 0.33 * state.period + 0.67 * state.smooth_period;

        if i1 != 0.0 {
            let phase = (q1 / i1).atan().to_degrees();
            if phase.is_finite() {
                state.phase = phase;
            } else {
                tracing::trace!(bar, "non-finite phase, holding previous");
            }
        } else {
            tracing::trace!(bar, "zero in-phase component, holding phase");
        }

        self.estimate()
    }
}

impl Default for AdaptivePeriodDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Hilbert FIR over taps `{0, 2, 4, 6}` bars back, scaled by `gain`.
/// Taps not yet available use the newest value.
fn fir(series: &SeriesBuffer, gain: f64) -> f64 {
    let newest = series.latest().unwrap_or(0.0);
    let tap = |offset| series.at(offset).unwrap_or(newest);
    (KERNEL_OUTER * (tap(0) - tap(6)) + KERNEL_INNER * (tap(2) - tap(4))) * gain
}
