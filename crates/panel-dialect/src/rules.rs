//! Organization-defined pattern rules.
//!
//! A rule is a data-only descriptor: a regular expression plus a transform
//! kind. Rules never carry executable code. They are compiled and sorted by
//! descending priority once, when a [`crate::Dialect`] is built.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// What a matching rule produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleTransform {
    /// Expand capture groups (`$1`, `${name}`) into a canonical code.
    Code { template: String },
    /// Resolve to a named preset of the same family.
    Preset { name: String },
}

/// A stored pattern rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub id: String,
    /// Case-insensitive regular expression, searched in the trimmed input.
    pub pattern: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub transform: RuleTransform,
}

impl PatternRule {
    pub fn code(
        id: impl Into<String>,
        pattern: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            priority: 0,
            enabled: true,
            transform: RuleTransform::Code {
                template: template.into(),
            },
        }
    }

    pub fn preset(
        id: impl Into<String>,
        pattern: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            priority: 0,
            enabled: true,
            transform: RuleTransform::Preset { name: name.into() },
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Output of a matching rule, before the family turns it into specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutput {
    Code(String),
    Preset(String),
}

/// A rule with its regex compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: PatternRule,
    regex: Regex,
}

impl CompiledRule {
    pub fn id(&self) -> &str {
        &self.rule.id
    }

    pub fn priority(&self) -> i32 {
        self.rule.priority
    }

    /// Apply the rule. `None` when the pattern does not match or the
    /// template expands to nothing.
    pub fn apply(&self, input: &str) -> Option<RuleOutput> {
        let caps = self.regex.captures(input.trim())?;
        match &self.rule.transform {
            RuleTransform::Code { template } => {
                let mut code = String::new();
                caps.expand(template, &mut code);
                let code = code.trim();
                (!code.is_empty()).then(|| RuleOutput::Code(code.to_string()))
            }
            RuleTransform::Preset { name } => Some(RuleOutput::Preset(name.clone())),
        }
    }
}

/// Compile enabled rules and order them by descending priority.
///
/// Rules with an invalid pattern are dropped with a warning; the remaining
/// rules are unaffected. Equal priorities keep their stored order.
pub fn compile_rules(rules: &[PatternRule]) -> Vec<CompiledRule> {
    let mut compiled: Vec<CompiledRule> = rules
        .iter()
        .filter(|rule| rule.enabled)
        .filter_map(|rule| {
            match RegexBuilder::new(&rule.pattern)
                .case_insensitive(true)
                .build()
            {
                Ok(regex) => Some(CompiledRule {
                    rule: rule.clone(),
                    regex,
                }),
                Err(error) => {
                    tracing::warn!(
                        rule_id = %rule.id,
                        pattern = %rule.pattern,
                        %error,
                        "disabling pattern rule with invalid regex"
                    );
                    None
                }
            }
        })
        .collect();
    compiled.sort_by_key(|rule| std::cmp::Reverse(rule.priority()));
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_by_priority_and_disabled_skipped() {
        let rules = vec![
            PatternRule::code("low", "^x$", "2L").with_priority(1),
            PatternRule::code("off", "^x$", "W1").with_priority(50).enabled(false),
            PatternRule::code("high", "^x$", "2W").with_priority(10),
        ];
        let compiled = compile_rules(&rules);
        let ids: Vec<&str> = compiled.iter().map(CompiledRule::id).collect();
        assert_eq!(ids, vec!["high", "low"]);
    }

    #[test]
    fn invalid_regex_only_disables_that_rule() {
        let rules = vec![
            PatternRule::code("broken", "([", "2L"),
            PatternRule::code("ok", "^band (\\d)$", "L$1"),
        ];
        let compiled = compile_rules(&rules);
        assert_eq!(compiled.len(), 1);
        assert_eq!(
            compiled[0].apply("BAND 1"),
            Some(RuleOutput::Code("L1".to_string()))
        );
        assert_eq!(compiled[0].apply("band x"), None);
    }

    #[test]
    fn preset_transform() {
        let compiled = compile_rules(&[PatternRule::preset("std", "standard hinge", "STD")]);
        assert_eq!(
            compiled[0].apply("two standard hinges"),
            Some(RuleOutput::Preset("STD".to_string()))
        );
    }
}
