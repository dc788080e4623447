// Mon Jan 19 2026 - Alex

use crate::structure::StructLayout;
use crate::validation::Finding;

/// A check applied to one validated struct in isolation.
///
/// Implementations must be pure: same layout in, same findings out.
pub trait StructRule: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, layout: &StructLayout) -> Vec<Finding>;
}

pub struct RuleBuilder {
    rules: Vec<Box<dyn StructRule>>,
}

impl RuleBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(mut self, rule: Box<dyn StructRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn add_rule_if(self, enabled: bool, rule: impl FnOnce() -> Box<dyn StructRule>) -> Self {
        if enabled {
            self.add_rule(rule())
        } else {
            self
        }
    }

    pub fn build(self) -> Vec<Box<dyn StructRule>> {
        self.rules
    }
}

impl Default for RuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
