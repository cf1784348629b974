//! Salary Template Computation Engine
//!
//! This crate turns a declarative salary template (an ordered list of named
//! components, each a fixed value or an arithmetic formula over CTC and other
//! components) into a fully resolved salary breakdown for a given
//! cost-to-company figure.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod formula;
pub mod models;
