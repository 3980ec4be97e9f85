//! Whole-array entry points.
//!
//! Each function builds a fresh streaming instance and drives it bar by bar,
//! so batch and incremental results are identical. Errors come only from the
//! configuration; any finite or non-finite price sequence is accepted.

use crate::crossover::CrossoverDetector;
use crate::filters::{Bandpass, CyberCycle, Decycler, RoofingFilter, SuperSmoother};
use crate::fisher::FisherTransform;
use crate::mama::MamaFama;
use dsp_spi::{CrossoverEvent, MamaFamaResult, Result, StreamingFilter};

/// MAMA/FAMA over `prices`; empty when fewer than 6 prices are given.
pub fn compute_mama_fama(
    prices: &[f64],
    fast_limit: f64,
    slow_limit: f64,
) -> Result<Vec<MamaFamaResult>> {
    let engine = MamaFama::new(fast_limit, slow_limit)?;
    if prices.len() < MamaFama::MIN_BARS {
        return Ok(Vec::new());
    }
    Ok(engine.calculate(prices))
}

pub fn detect_crossovers(results: &[MamaFamaResult]) -> Vec<CrossoverEvent> {
    CrossoverDetector::detect(results)
}

/// Fisher Transform, zero-filled until the first full window.
pub fn compute_fisher_transform(prices: &[f64], period: usize) -> Result<Vec<f64>> {
    Ok(FisherTransform::new(period)?.calculate(prices))
}

pub fn bandpass_filter(prices: &[f64], period: usize, bandwidth: f64) -> Result<Vec<f64>> {
    Ok(Bandpass::new(period, bandwidth)?.calculate(prices))
}

pub fn super_smoother(prices: &[f64], period: usize) -> Result<Vec<f64>> {
    Ok(SuperSmoother::new(period)?.calculate(prices))
}

pub fn roofing_filter(prices: &[f64], hp_period: usize, lp_period: usize) -> Result<Vec<f64>> {
    Ok(RoofingFilter::new(hp_period, lp_period)?.calculate(prices))
}

pub fn cyber_cycle(prices: &[f64], period: usize) -> Result<Vec<f64>> {
    Ok(CyberCycle::new(period)?.calculate(prices))
}

pub fn decycler(prices: &[f64], hp_period: usize) -> Result<Vec<f64>> {
    Ok(Decycler::new(hp_period)?.calculate(prices))
}
