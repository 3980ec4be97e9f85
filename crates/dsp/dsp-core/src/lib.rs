//! Adaptive DSP Filter Core Implementations
//!
//! Streaming MAMA/FAMA with its cycle period detector, crossover detection,
//! the Fisher Transform and Ehlers' fixed recursive filters. Every component
//! consumes one price per call and owns all of its state; the batch functions
//! drive a fresh instance over a slice.

// ============================================================================
// Modules
// ============================================================================
pub mod series;
pub mod filters;
pub mod fisher;
pub mod cycle;
pub mod mama;
pub mod crossover;
pub mod batch;
pub mod pipeline;

// ============================================================================
// Exports
// ============================================================================
pub use series::SeriesBuffer;
pub use filters::{Bandpass, CyberCycle, Decycler, RoofingFilter, SuperSmoother};
pub use fisher::FisherTransform;
pub use cycle::{AdaptivePeriodDetector, CycleEstimate, CycleState, PERIOD_CEILING, PERIOD_FLOOR};
pub use mama::MamaFama;
pub use crossover::CrossoverDetector;
pub use pipeline::{run_many, MultiSeriesTracker, Pipeline, PipelineOutput};

pub use batch::{
    bandpass_filter, compute_fisher_transform, compute_mama_fama, cyber_cycle, decycler,
    detect_crossovers, roofing_filter, super_smoother,
};
