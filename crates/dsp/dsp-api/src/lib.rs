//! Adaptive DSP Configuration API
//!
//! Serializable configuration for every filter plus the aggregate
//! [`PipelineConfig`].

mod config;

pub use config::*;
