//! Rule registration table
//!
//! A [`Rule`] is plain data: a stable name, a category mask, and a pure
//! function of the [`AnalysisContext`]. Rules never see each other's output
//! and cannot hold mutable state, so their execution order is irrelevant.

use std::fmt;

use super::category::Category;
use super::checks;
use super::context::AnalysisContext;
use super::results::Finding;

/// Signature of every rule implementation.
pub type RuleFn = fn(&AnalysisContext) -> Vec<Finding>;

/// A registered rule.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable name, used by `-i`/`-x` and in reports
    pub name: &'static str,
    /// Category bitmask
    pub category: Category,
    /// One-line description for `paperlint rules`
    pub description: &'static str,
    /// The check itself
    pub run: RuleFn,
}

impl Rule {
    pub const fn new(
        name: &'static str,
        category: Category,
        description: &'static str,
        run: RuleFn,
    ) -> Self {
        Self {
            name,
            category,
            description,
            run,
        }
    }

    /// Run the rule against a context
    pub fn check(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        (self.run)(ctx)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

/// Ordered collection of rules with unique names.
#[derive(Debug, Clone)]
pub struct Registry {
    rules: Vec<Rule>,
}

impl Registry {
    /// Build a registry; a later rule with an already registered name is dropped.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut unique: Vec<Rule> = Vec::new();
        for rule in rules {
            if unique.iter().any(|r| r.name == rule.name) {
                tracing::warn!(rule = rule.name, "Duplicate rule name ignored");
                continue;
            }
            unique.push(rule);
        }
        Self { rules: unique }
    }

    /// The complete built-in catalogue
    pub fn builtin() -> Self {
        Self::new(checks::CATALOGUE.iter().copied())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn nothing(_: &AnalysisContext) -> Vec<Finding> {
        Vec::new()
    }

    #[test]
    fn test_builtin_names_are_unique() {
        let registry = Registry::builtin();
        let names: HashSet<_> = registry.names().collect();
        assert_eq!(names.len(), checks::CATALOGUE.len());
    }

    #[test]
    fn test_builtin_has_full_catalogue() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 58);
        assert!(registry.get("cite-space").is_some());
        assert!(registry.get("missing-textstyle").is_some());
    }

    #[test]
    fn test_builtin_names_do_not_shadow_categories() {
        let registry = Registry::builtin();
        for name in registry.names() {
            assert!(Category::from_token(name).is_none(), "{name}");
        }
    }

    #[test]
    fn test_every_builtin_rule_has_a_category() {
        for rule in Registry::builtin().rules() {
            assert!(!rule.category.is_empty(), "{}", rule.name);
        }
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let registry = Registry::new([
            Rule::new("x", Category::STYLE, "first", nothing),
            Rule::new("x", Category::VISUAL, "second", nothing),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rules()[0].category, Category::STYLE);
    }
}
