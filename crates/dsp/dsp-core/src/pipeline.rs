//! Per-series pipelines and multi-series tracking.
//!
//! A [`Pipeline`] owns one instance of every component for a single price
//! series. [`MultiSeriesTracker`] keeps one pipeline per symbol so several
//! series can be followed without sharing state, and [`run_many`] processes
//! independent series in parallel.

use crate::crossover::CrossoverDetector;
use crate::filters::{Bandpass, CyberCycle, Decycler, RoofingFilter, SuperSmoother};
use crate::fisher::FisherTransform;
use crate::mama::MamaFama;
use crate::series::SeriesBuffer;
use dsp_api::PipelineConfig;
use dsp_spi::{CrossoverEvent, MamaFamaResult, Result, StreamingFilter};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

// ============================================================================
// Pipeline
// ============================================================================

/// Every component's output for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub index: usize,
    pub price: f64,
    pub mama: MamaFamaResult,
    pub crossover: Option<CrossoverEvent>,
    pub fisher: f64,
    pub bandpass: f64,
    pub super_smoother: f64,
    pub roofing: f64,
    pub cyber_cycle: f64,
    pub decycler: f64,
}

/// All components for a single tracked series.
///
/// Feed prices in bar order; each component sees every price exactly once.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    history: SeriesBuffer,
    mama: MamaFama,
    crossover: CrossoverDetector,
    fisher: FisherTransform,
    bandpass: Bandpass,
    super_smoother: SuperSmoother,
    roofing: RoofingFilter,
    cyber_cycle: CyberCycle,
    decycler: Decycler,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let pipeline = Self {
            history: SeriesBuffer::with_retention(config.history),
            mama: MamaFama::with_config(config.mama)?,
            crossover: CrossoverDetector::new(),
            fisher: FisherTransform::with_config(config.fisher)?,
            bandpass: Bandpass::with_config(config.bandpass)?,
            super_smoother: SuperSmoother::with_config(config.super_smoother)?,
            roofing: RoofingFilter::with_config(config.roofing)?,
            cyber_cycle: CyberCycle::with_config(config.cyber_cycle)?,
            decycler: Decycler::with_config(config.decycler)?,
            config,
        };
        tracing::debug!(history = pipeline.config.history, "pipeline created");
        Ok(pipeline)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Most recent raw prices, bounded by `config.history`.
    pub fn history(&self) -> &SeriesBuffer {
        &self.history
    }

    pub fn bars_seen(&self) -> usize {
        self.history.total_pushed()
    }

    pub fn mama(&self) -> &MamaFama {
        &self.mama
    }

    pub fn push(&mut self, price: f64) -> PipelineOutput {
        if !price.is_finite() {
            tracing::warn!(bar = self.bars_seen(), price, "non-finite price pushed into pipeline");
        }

        let index = self.bars_seen();
        self.history.push(price);

        let mama = self.mama.push(price);
        let crossover = self.crossover.push(&mama);

        PipelineOutput {
            index,
            price,
            mama,
            crossover,
            fisher: self.fisher.push(price),
            bandpass: self.bandpass.push(price),
            super_smoother: self.super_smoother.push(price),
            roofing: self.roofing.push(price),
            cyber_cycle: self.cyber_cycle.push(price),
            decycler: self.decycler.push(price),
        }
    }

    /// Push every price in order.
    pub fn process(&mut self, prices: &[f64]) -> Vec<PipelineOutput> {
        prices.iter().map(|&price| self.push(price)).collect()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.mama.reset();
        self.crossover.reset();
        self.fisher.reset();
        self.bandpass.reset();
        self.super_smoother.reset();
        self.roofing.reset();
        self.cyber_cycle.reset();
        self.decycler.reset();
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        let config = PipelineConfig::default();
        Self {
            history: SeriesBuffer::with_retention(config.history),
            mama: MamaFama::default(),
            crossover: CrossoverDetector::new(),
            fisher: FisherTransform::default(),
            bandpass: Bandpass::default(),
            super_smoother: SuperSmoother::default(),
            roofing: RoofingFilter::default(),
            cyber_cycle: CyberCycle::default(),
            decycler: Decycler::default(),
            config,
        }
    }
}

// ============================================================================
// Multi-series
// ============================================================================

/// One [`Pipeline`] per symbol, created on first use.
#[derive(Debug, Clone)]
pub struct MultiSeriesTracker {
    template: Pipeline,
    series: HashMap<String, Pipeline>,
}

impl MultiSeriesTracker {
    /// Every symbol gets a pipeline built from `config`.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            template: Pipeline::new(config)?,
            series: HashMap::new(),
        })
    }

    pub fn push(&mut self, symbol: &str, price: f64) -> PipelineOutput {
        let pipeline = match self.series.entry(symbol.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(symbol, "tracking new series");
                entry.insert(self.template.clone())
            }
        };
        pipeline.push(price)
    }

    pub fn get(&self, symbol: &str) -> Option<&Pipeline> {
        self.series.get(symbol)
    }

    /// Stop tracking `symbol`, discarding its state.
    pub fn remove(&mut self, symbol: &str) -> Option<Pipeline> {
        self.series.remove(symbol)
    }

    /// Tracked symbols in sorted order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.series.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl Default for MultiSeriesTracker {
    fn default() -> Self {
        Self {
            template: Pipeline::default(),
            series: HashMap::new(),
        }
    }
}

/// Run a fresh pipeline over each `(symbol, prices)` pair in parallel.
///
/// Output order matches input order.
pub fn run_many(
    config: &PipelineConfig,
    series: &[(&str, &[f64])],
) -> Result<Vec<(String, Vec<PipelineOutput>)>> {
    let template = Pipeline::new(config.clone())?;
    tracing::debug!(series = series.len(), "running pipelines in parallel");

    Ok(series
        .par_iter()
        .map(|(symbol, prices)| {
            let mut pipeline = template.clone();
            (symbol.to_string(), pipeline.process(prices))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(n: usize, period: f64) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + 10.0 * (2.0 * PI * i as f64 / period).sin())
            .collect()
    }

    #[test]
    fn test_pipeline_matches_individual_components() {
        let prices = sine(120, 20.0);
        let outputs = Pipeline::default().process(&prices);

        let mama = MamaFama::default().calculate(&prices);
        let roofing = RoofingFilter::default().calculate(&prices);
        let fisher = FisherTransform::default().calculate(&prices);

        for (i, out) in outputs.iter().enumerate() {
            assert_eq!(out.index, i);
            assert_eq!(out.mama, mama[i]);
            assert_eq!(out.roofing, roofing[i]);
            assert_eq!(out.fisher, fisher[i]);
        }
    }

    #[test]
    fn test_pipeline_crossovers_match_detector() {
        let prices = sine(300, 20.0);
        let outputs = Pipeline::default().process(&prices);

        let from_pipeline: Vec<_> = outputs.iter().filter_map(|o| o.crossover).collect();
        let expected = CrossoverDetector::detect(&MamaFama::default().calculate(&prices));

        assert_eq!(from_pipeline, expected);
        assert!(!expected.is_empty());
    }

    #[test]
    fn test_pipeline_history_bounded() {
        let config = PipelineConfig { history: 8, ..PipelineConfig::default() };
        let mut pipeline = Pipeline::new(config).unwrap();
        pipeline.process(&sine(30, 10.0));

        assert_eq!(pipeline.history().len(), 8);
        assert_eq!(pipeline.bars_seen(), 30);
    }

    #[test]
    fn test_pipeline_reset() {
        let prices = sine(50, 15.0);
        let mut pipeline = Pipeline::default();
        let first = pipeline.process(&prices);
        pipeline.reset();
        let second = pipeline.process(&prices);

        assert_eq!(first, second);
    }

    #[test]
    fn test_pipeline_invalid_config() {
        let config = PipelineConfig { history: 0, ..PipelineConfig::default() };
        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn test_tracker_isolates_symbols() {
        let mut tracker = MultiSeriesTracker::default();
        let a = sine(40, 20.0);
        let b: Vec<f64> = (0..40).map(|i| 50.0 + i as f64).collect();

        let mut last_a = None;
        for (pa, pb) in a.iter().zip(&b) {
            last_a = Some(tracker.push("EURUSD", *pa));
            tracker.push("BTCUSDT", *pb);
        }

        let alone = Pipeline::default().process(&a);
        assert_eq!(last_a, alone.last().copied());
        assert_eq!(tracker.symbols(), vec!["BTCUSDT", "EURUSD"]);

        assert!(tracker.remove("EURUSD").is_some());
        assert_eq!(tracker.len(), 1);
        assert!(tracker.get("EURUSD").is_none());
    }

    #[test]
    fn test_run_many_preserves_order() {
        let a = sine(80, 20.0);
        let b = sine(80, 35.0);
        let series: Vec<(&str, &[f64])> = vec![("A", a.as_slice()), ("B", b.as_slice())];

        let results = run_many(&PipelineConfig::default(), &series).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "A");
        assert_eq!(results[1].0, "B");
        assert_eq!(results[1].1, Pipeline::default().process(&b));
    }
}
