//! Configuration loading and management for the Salary Engine.
//!
//! This module provides the engine options that govern formula evaluation
//! and a loader that reads them, together with a catalog of salary templates,
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Evaluation order: {:?}", config.options().evaluation_order);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineOptions, EvaluationOrder, UnresolvedVariablePolicy};
