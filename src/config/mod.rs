//! Configuration loading and management for the Coverage Engine.
//!
//! This module loads calculator settings (months-per-year scaling, rounding,
//! the attrition buffer) and the staffing model table from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use coverage_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Comparing against {} staffing models", config.models().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BufferSettings, CalculatorSettings, CoverageConfig, ModelsConfig, RoundingMode};
