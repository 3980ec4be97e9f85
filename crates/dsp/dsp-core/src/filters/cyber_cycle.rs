//! Ehlers Cyber Cycle indicator.

use dsp_api::CyberCycleConfig;
use dsp_spi::{Result, StreamingFilter};

/// Bars output as zero before the smoothed history is deep enough.
const WARMUP_BARS: usize = 6;

/// Ehlers Cyber Cycle Indicator
///
/// Extracts the cycle component with a 2-pole high-pass recurrence over a
/// 4-bar weighted smooth of price:
///
/// `smooth = (price + 2 * price[1] + 2 * price[2] + price[3]) / 6`
///
/// `cycle = (1 - alpha/2)^2 * (smooth - 2 * smooth[1] + smooth[2])
///        + 2 * (1 - alpha) * cycle[1] - (1 - alpha)^2 * cycle[2]`
///
/// with `alpha = 2 / (period + 1)`. The first six bars output zero.
#[derive(Debug, Clone)]
pub struct CyberCycle {
    config: CyberCycleConfig,
    alpha: f64,
    prices: [f64; 3],
    smooth: [f64; 2],
    cycle: [f64; 2],
    bars: usize,
}

impl CyberCycle {
    pub fn new(period: usize) -> Result<Self> {
        Self::with_config(CyberCycleConfig::new(period))
    }

    pub fn with_config(config: CyberCycleConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(period = config.period, alpha = config.alpha(), "cyber cycle configured");
        Ok(Self::from_config(config))
    }

    fn from_config(config: CyberCycleConfig) -> Self {
        Self {
            config,
            alpha: config.alpha(),
            prices: [0.0; 3],
            smooth: [0.0; 2],
            cycle: [0.0; 2],
            bars: 0,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn period(&self) -> usize {
        self.config.period
    }
}

impl Default for CyberCycle {
    fn default() -> Self {
        Self::from_config(CyberCycleConfig::default())
    }
}

impl StreamingFilter for CyberCycle {
    fn name(&self) -> &str {
        "CyberCycle"
    }

    fn push(&mut self, price: f64) -> f64 {
        let [p1, p2, p3] = self.prices;
        let smooth = if self.bars >= 3 {
            (price + 2.0 * p1 + 2.0 * p2 + p3) / 6.0
        } else {
            0.0
        };

        let [s1, s2] = self.smooth;
        let [c1, c2] = self.cycle;
        let a = self.alpha;
        let cycle = if self.bars < WARMUP_BARS {
            0.0
        } else {
            (1.0 - 0.5 * a) * (1.0 - 0.5 * a) * (smooth - 2.0 * s1 + s2)
                + 2.0 * (1.0 - a) * c1
                - (1.0 - a) * (1.0 - a) * c2
        };

        self.prices = [price, p1, p2];
        self.smooth = [smooth, s1];
        self.cycle = [cycle, c1];
        self.bars += 1;
        cycle
    }

    fn reset(&mut self) {
        *self = Self::from_config(self.config);
    }

    fn current(&self) -> Option<f64> {
        (self.bars > 0).then_some(self.cycle[0])
    }

    fn bars_seen(&self) -> usize {
        self.bars
    }

    fn min_periods(&self) -> usize {
        WARMUP_BARS + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyber_cycle_warmup_is_zero() {
        let cc = CyberCycle::default();
        let data: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64 * 0.7).sin() * 10.0).collect();

        let cycle = cc.calculate(&data);

        for (i, value) in cycle.iter().take(6).enumerate() {
            assert_eq!(*value, 0.0, "cycle[{}] should be zero during warmup", i);
        }
        assert!(cycle[6] != 0.0);
    }

    #[test]
    fn test_cyber_cycle_first_value() {
        let cc = CyberCycle::new(10).unwrap();
        let data: [f64; 7] = [1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0];

        let cycle = cc.calculate(&data);

        let smooth = |i: usize| (data[i] + 2.0 * data[i - 1] + 2.0 * data[i - 2] + data[i - 3]) / 6.0;
        let a: f64 = 2.0 / 11.0;
        let expected = (1.0 - 0.5 * a).powi(2) * (smooth(6) - 2.0 * smooth(5) + smooth(4));
        assert!((cycle[6] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_cyber_cycle_known_values() {
        let cc = CyberCycle::new(4).unwrap();
        let data: [f64; 11] = [10.0, 12.0, 11.0, 15.0, 14.0, 18.0, 13.0, 16.0, 17.0, 12.0, 19.0];

        let cycle = cc.calculate(&data);

        let expected: [f64; 5] = [
            -0.42666666666666636,
            -1.0453333333333332,
            -0.9941333333333336,
            -1.1366400000000003,
            -0.5794133333333327,
        ];
        assert!(cycle[..6].iter().all(|&x| x == 0.0));
        for (i, (got, want)) in cycle[6..].iter().zip(expected).enumerate() {
            assert!((got - want).abs() < 1e-9, "cycle[{}] = {}, expected {}", i + 6, got, want);
        }
    }

    #[test]
    fn test_cyber_cycle_oscillation() {
        let cc = CyberCycle::default();
        let n = 100;
        let data: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.3).sin() * 20.0).collect();

        let cycle = cc.calculate(&data);

        let positive_count = cycle[20..].iter().filter(|&&x| x > 0.0).count();
        let negative_count = cycle[20..].iter().filter(|&&x| x < 0.0).count();

        assert!(positive_count > 0);
        assert!(negative_count > 0);
    }

    #[test]
    fn test_cyber_cycle_flat_input() {
        let cc = CyberCycle::new(14).unwrap();
        let cycle = cc.calculate(&vec![42.0; 40]);
        assert!(cycle.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_cyber_cycle_alpha_from_period() {
        let cc = CyberCycle::new(19).unwrap();
        assert!((cc.alpha() - 0.1).abs() < 1e-12);
        assert_eq!(cc.name(), "CyberCycle");
        assert_eq!(cc.min_periods(), 7);
    }
}
