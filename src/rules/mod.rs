//! Rules module - Rule model, switch resolution, and evaluation engine

pub mod category;
pub mod checks;
pub mod context;
pub mod engine;
pub mod registry;
pub mod resolver;
pub mod results;

pub use category::Category;
pub use context::AnalysisContext;
pub use engine::RulesEngine;
pub use registry::{Registry, Rule, RuleFn};
pub use resolver::{CategorySet, Operation, Switch, SwitchDirective, SwitchToken};
pub use results::{CheckResults, DocumentReport, Finding, ReportedFinding, Span};
