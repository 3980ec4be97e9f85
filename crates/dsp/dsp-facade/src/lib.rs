//! Adaptive DSP Filter Facade
//!
//! Unified re-exports for the DSP filter crates.

// Re-export everything from SPI
pub use dsp_spi::*;

// Re-export everything from API
pub use dsp_api::*;

// Re-export everything from Core
pub use dsp_core::*;

/// Common imports for streaming use.
pub mod prelude {
    pub use dsp_api::{MamaConfig, PipelineConfig};
    pub use dsp_core::{
        Bandpass, CrossoverDetector, CyberCycle, Decycler, FisherTransform, MamaFama,
        MultiSeriesTracker, Pipeline, RoofingFilter, SuperSmoother,
    };
    pub use dsp_spi::{CrossoverEvent, CrossoverKind, DspError, MamaFamaResult, Result, StreamingFilter};
}
