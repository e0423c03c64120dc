//! Services - business logic
//!
//! This module contains the pipeline's core logic:
//! - `mock_data` - mock dashboard dataset generation
//! - `collector` - per-source collection jobs (fetch loop + persist)
//! - `runner` - fixed-sequence orchestration and run summary

pub mod collector;
pub mod mock_data;
pub mod runner;

// Re-export commonly used types
pub use mock_data::MockDataset;
pub use runner::Runner;
