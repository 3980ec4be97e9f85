//! Ehlers Fixed-Topology Recursive Filters
//!
//! Each filter derives its coefficients once from its configuration and then
//! consumes one price per `push`. Batch output is the same filter driven bar
//! by bar over a fresh instance.

pub mod bandpass;
pub mod super_smoother;
pub mod roofing;
pub mod cyber_cycle;
pub mod decycler;

pub use bandpass::Bandpass;
pub use super_smoother::SuperSmoother;
pub use roofing::RoofingFilter;
pub use cyber_cycle::CyberCycle;
pub use decycler::Decycler;

use dsp_spi::{DspError, Result};
use std::f64::consts::PI;

/// One-pole high-pass coefficient for a cutoff `period`, with the angle
/// scaled by `scale` (0.707 for the two-pole roofing stage, 1.0 otherwise).
pub(crate) fn highpass_alpha(period: usize, scale: f64) -> f64 {
    let angle = scale * 2.0 * PI / period as f64;
    (angle.cos() + angle.sin() - 1.0) / angle.cos()
}

/// Accepts coefficients strictly inside (0, 1).
pub(crate) fn unit_interval(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(DspError::invalid_parameter(
            name,
            format!("yields coefficient {} outside (0, 1)", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highpass_alpha_known_values() {
        let decycler = highpass_alpha(125, 1.0);
        assert!((decycler - 0.04904).abs() < 1e-4, "got {}", decycler);

        let roofing = highpass_alpha(48, 0.707);
        assert!((roofing - 0.0885).abs() < 1e-3, "got {}", roofing);
    }

    #[test]
    fn test_unit_interval_rejects_edges() {
        assert!(unit_interval("x", 0.0).is_err());
        assert!(unit_interval("x", 1.0).is_err());
        assert!(unit_interval("x", f64::INFINITY).is_err());
        assert!(unit_interval("x", 0.5).is_ok());
    }
}
