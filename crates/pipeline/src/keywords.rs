//! Keyword-triggered course suggestions.
//!
//! Each rule fires when any of its trigger phrases occurs as a substring of
//! the lowercased raw message. Rules are independent; every rule that fires
//! contributes its full suggestion list, in table order. Triggers mix
//! English and Arabic phrases, so matching works on Unicode text and never
//! on normalized tokens.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A (course name, provider) pair recommended without scoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub provider: String,
}

impl Suggestion {
    pub fn new(name: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
        }
    }
}

/// A suggestion forced by a keyword rule, tagged with that rule's topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedSuggestion<'a> {
    pub topic: &'a str,
    pub suggestion: &'a Suggestion,
}

/// One row of the keyword table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Short label used in logs and explanations (e.g. "databases")
    pub topic: String,
    pub triggers: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl KeywordRule {
    pub fn new(topic: &str, triggers: &[&str], suggestions: &[(&str, &str)]) -> Self {
        Self {
            topic: topic.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            suggestions: suggestions
                .iter()
                .map(|(name, provider)| Suggestion::new(*name, *provider))
                .collect(),
        }
    }

    /// True if any trigger occurs in `lowered_text` (already lowercased).
    pub fn matches(&self, lowered_text: &str) -> bool {
        self.triggers
            .iter()
            .any(|trigger| lowered_text.contains(&trigger.to_lowercase()))
    }
}

/// Ordered keyword table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordRuleSet {
    rules: Vec<KeywordRule>,
}

impl KeywordRuleSet {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// A table with no rules; the keyword layer never fires.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that fire for `text`, in table order.
    pub fn matching_rules(&self, text: &str) -> Vec<&KeywordRule> {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.matches(&lowered))
            .collect()
    }

    /// Topics of the rules that fire for `text`, in table order.
    pub fn matching_topics(&self, text: &str) -> Vec<&str> {
        self.matching_rules(text)
            .into_iter()
            .map(|rule| rule.topic.as_str())
            .collect()
    }

    /// Concatenated suggestions of every rule that fires, in table order.
    /// Duplicates across rules are kept.
    pub fn forced_suggestions(&self, text: &str) -> Vec<ForcedSuggestion<'_>> {
        let matched = self.matching_rules(text);
        debug!(
            "Keyword rules fired: {:?}",
            matched.iter().map(|r| r.topic.as_str()).collect::<Vec<_>>()
        );
        matched
            .into_iter()
            .flat_map(|rule| {
                rule.suggestions.iter().map(move |suggestion| ForcedSuggestion {
                    topic: &rule.topic,
                    suggestion,
                })
            })
            .collect()
    }

    /// Reject tables that would misbehave at match time.
    ///
    /// A blank trigger is a substring of every message, and a rule without
    /// suggestions can never contribute anything.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.rules {
            if rule.triggers.is_empty() {
                bail!("keyword rule '{}' has no triggers", rule.topic);
            }
            if rule.triggers.iter().any(|t| t.trim().is_empty()) {
                bail!("keyword rule '{}' has a blank trigger", rule.topic);
            }
            if rule.suggestions.is_empty() {
                bail!("keyword rule '{}' has no suggestions", rule.topic);
            }
        }
        Ok(())
    }
}

impl Default for KeywordRuleSet {
    /// The built-in five-topic table.
    fn default() -> Self {
        Self::new(vec![
            KeywordRule::new(
                "taxes/accounting",
                &[
                    "ضرائب",
                    "tax",
                    "excel",
                    "حساب",
                    "محاسبة",
                    "calculate",
                    "calculations",
                    "financial report",
                ],
                &[
                    ("Advanced Excel Training", "Coursera"),
                    ("Tax Accounting Certification", "LinkedIn Learning"),
                    ("Financial Modeling", "edX"),
                ],
            ),
            KeywordRule::new(
                "databases",
                &[
                    "database",
                    "قواعد البيانات",
                    "بيانات",
                    "sql",
                    "data management",
                    "data analysis",
                ],
                &[
                    ("SQL Database Management", "Udemy"),
                    ("Data Analysis Training", "edX"),
                    ("Database Optimization", "Coursera"),
                ],
            ),
            KeywordRule::new(
                "human resources",
                &[
                    "human resources",
                    "الموارد البشرية",
                    "الموظفين",
                    "team management",
                    "hr",
                ],
                &[
                    ("HR Management Training", "LinkedIn Learning"),
                    ("Leadership Skills Training", "Skillshare"),
                    ("Employee Engagement Strategies", "Udemy"),
                ],
            ),
            KeywordRule::new(
                "cloud storage",
                &[
                    "cloud storage",
                    "تخزين سحابي",
                    "ملفات سحابية",
                    "cloud computing",
                    "backup",
                    "file management",
                ],
                &[
                    ("Cloud Computing", "Google Digital Garage"),
                    ("File Management in Cloud Platforms", "Coursera"),
                    ("AWS Cloud Practitioner", "AWS Training"),
                ],
            ),
            KeywordRule::new(
                "presentations",
                &[
                    "presentation",
                    "عروض تقديمية",
                    "اجتماعات",
                    "slides",
                    "public speaking",
                    "meetings",
                ],
                &[
                    ("Presentation Skills Training", "Skillshare"),
                    ("Public Speaking Masterclass", "Coursera"),
                    ("Effective Communication", "LinkedIn Learning"),
                ],
            ),
        ])
    }
}
