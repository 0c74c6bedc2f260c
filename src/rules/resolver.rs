//! Switch resolution
//!
//! Switches select which rules count as active. Each switch names either an
//! aggregate category token or a single rule, and is applied as an include
//! or an exclude. The sequence is replayed strictly left to right starting
//! from an empty set; an empty sequence means "include all".
//!
//! ```rust
//! use paperlint::rules::{CategorySet, Registry, SwitchToken};
//!
//! let registry = Registry::builtin();
//! let set = CategorySet::from_tokens(
//!     &registry,
//!     &[SwitchToken::include("all"), SwitchToken::exclude("typography")],
//! )
//! .unwrap();
//!
//! assert!(!set.contains("cite-space"));
//! assert!(set.contains("todo"));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::registry::Registry;
use crate::error::ConfigError;

/// Whether a switch adds or removes rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Include,
    Exclude,
}

/// A validated switch target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    /// Aggregate category token, resolved to its mask
    Category(Category),
    /// A single registered rule
    Rule(&'static str),
}

impl Switch {
    /// Validate a token against the category tokens, then the rule names.
    pub fn parse(token: &str, registry: &Registry) -> Result<Self, ConfigError> {
        if let Some(category) = Category::from_token(token) {
            return Ok(Self::Category(category));
        }
        registry
            .get(token)
            .map(|rule| Self::Rule(rule.name))
            .ok_or_else(|| ConfigError::UnknownSwitch(token.to_string()))
    }
}

/// An unvalidated switch as written on the command line or in the config file.
///
/// In TOML: `switches = [{ include = "all" }, { exclude = "style" }]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchToken {
    Include(String),
    Exclude(String),
}

impl SwitchToken {
    pub fn include(token: impl Into<String>) -> Self {
        Self::Include(token.into())
    }

    pub fn exclude(token: impl Into<String>) -> Self {
        Self::Exclude(token.into())
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Include(_) => Operation::Include,
            Self::Exclude(_) => Operation::Exclude,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::Include(token) | Self::Exclude(token) => token,
        }
    }
}

/// A validated operation on the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchDirective {
    pub operation: Operation,
    pub switch: Switch,
}

impl SwitchDirective {
    pub fn include(switch: Switch) -> Self {
        Self {
            operation: Operation::Include,
            switch,
        }
    }

    pub fn exclude(switch: Switch) -> Self {
        Self {
            operation: Operation::Exclude,
            switch,
        }
    }

    pub fn parse(token: &SwitchToken, registry: &Registry) -> Result<Self, ConfigError> {
        Ok(Self {
            operation: token.operation(),
            switch: Switch::parse(token.token(), registry)?,
        })
    }
}

/// The resolved set of active rule names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    active: BTreeSet<&'static str>,
}

impl CategorySet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every rule of the registry active
    pub fn all(registry: &Registry) -> Self {
        Self::resolve(registry, &[])
    }

    /// Replay `directives` left to right from an empty set.
    pub fn resolve(registry: &Registry, directives: &[SwitchDirective]) -> Self {
        let mut set = Self::empty();
        if directives.is_empty() {
            set.apply(
                registry,
                SwitchDirective::include(Switch::Category(Category::ALL)),
            );
            return set;
        }
        for directive in directives {
            set.apply(registry, *directive);
        }
        set
    }

    /// Validate every token first, then resolve. No partial result on error.
    pub fn from_tokens(registry: &Registry, tokens: &[SwitchToken]) -> Result<Self, ConfigError> {
        let directives = tokens
            .iter()
            .map(|token| SwitchDirective::parse(token, registry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::resolve(registry, &directives))
    }

    /// Apply one directive. Re-applying a directive is a no-op.
    pub fn apply(&mut self, registry: &Registry, directive: SwitchDirective) {
        match (directive.operation, directive.switch) {
            (Operation::Include, Switch::Category(Category::ALL)) => {
                self.active.extend(registry.names());
            }
            (Operation::Exclude, Switch::Category(Category::ALL)) => {
                self.active.clear();
            }
            (Operation::Include, Switch::Category(category)) => {
                self.active.extend(
                    registry
                        .rules()
                        .iter()
                        .filter(|r| r.category.intersects(category))
                        .map(|r| r.name),
                );
            }
            (Operation::Exclude, Switch::Category(category)) => {
                for rule in registry.rules() {
                    if rule.category.intersects(category) {
                        self.active.remove(rule.name);
                    }
                }
            }
            (Operation::Include, Switch::Rule(name)) => {
                self.active.insert(name);
            }
            (Operation::Exclude, Switch::Rule(name)) => {
                self.active.remove(name);
            }
        }
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.active.contains(rule)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Active rule names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.active.iter().copied()
    }
}
