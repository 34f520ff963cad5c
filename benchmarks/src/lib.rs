//! Benchmark support for stride-regression.
//!
//! - Seeded synthetic horse data
//! - Held-out accuracy metrics (MSE, RMSE, MAE, R²)
//! - Timing helpers

pub mod data;
pub mod metrics;
pub mod utils;

pub use data::SyntheticHorses;
pub use metrics::RegressionMetrics;
pub use utils::{benchmark_with_warmup, time_fn, BenchmarkStats};
