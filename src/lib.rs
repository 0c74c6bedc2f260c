//! paperlint Library
//!
//! This crate provides the core of a style checker for LaTeX papers: document
//! preprocessing, environment tracking, the rule catalogue, and the
//! switches that decide which findings are reported.
//!
//! ```rust
//! use paperlint::rules::{AnalysisContext, CategorySet, Registry, RulesEngine};
//!
//! let registry = Registry::builtin();
//! let engine = RulesEngine::new(&registry, CategorySet::all(&registry));
//! let results = engine.run(&AnalysisContext::from_text("TODO write the intro"));
//!
//! assert!(results.active_by_rule("todo").next().is_some());
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod rules;
pub mod scanner;
pub mod utils;

pub use error::PaperlintError;
