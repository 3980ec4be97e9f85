//! MAMA/FAMA crossover detection.

use dsp_spi::{CrossoverEvent, CrossoverKind, MamaFamaResult};

/// Emits an event on every bar where the sign of `mama - fama` flips.
///
/// Bullish when `prev.mama <= prev.fama && curr.mama > curr.fama`, bearish
/// when `prev.mama >= prev.fama && curr.mama < curr.fama`. Bars where both
/// sides are equal never produce an event. No cooldown is applied.
#[derive(Debug, Clone, Default)]
pub struct CrossoverDetector {
    prev: Option<MamaFamaResult>,
    index: usize,
}

impl CrossoverDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the next bar's result. The first bar never crosses.
    pub fn push(&mut self, curr: &MamaFamaResult) -> Option<CrossoverEvent> {
        let index = self.index;
        self.index += 1;

        let prev = self.prev.replace(*curr)?;
        let kind = if prev.mama <= prev.fama && curr.mama > curr.fama {
            CrossoverKind::Bullish
        } else if prev.mama >= prev.fama && curr.mama < curr.fama {
            CrossoverKind::Bearish
        } else {
            return None;
        };

        Some(CrossoverEvent {
            index,
            kind,
            mama: curr.mama,
            fama: curr.fama,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Bars consumed so far.
    pub fn bars_seen(&self) -> usize {
        self.index
    }

    /// All crossovers in `results`, indexed by position in the slice.
    pub fn detect(results: &[MamaFamaResult]) -> Vec<CrossoverEvent> {
        let mut detector = Self::new();
        results.iter().filter_map(|r| detector.push(r)).collect()
    }
}
