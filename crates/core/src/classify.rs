//! Complaint classification seam.
//!
//! [`ComplaintClassifier`] is the integration point for whatever produces
//! a category/subcategory/urgency triple from free text. The shipped
//! implementation is [`KeywordClassifier`], a deterministic keyword scorer
//! with a built-in rule set; a model-backed implementation can replace it
//! behind the same trait without touching the API layer.

use serde::Serialize;

use crate::complaint::{URGENCY_HIGH, URGENCY_LOW, URGENCY_MEDIUM};
use crate::error::CoreError;

/// Result of classifying a piece of complaint text.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
}

/// Produces a [`Classification`] for free-text complaint input.
pub trait ComplaintClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Classification, CoreError>;
}

// ---------------------------------------------------------------------------
// KeywordClassifier
// ---------------------------------------------------------------------------

/// Category matched when no rule fires.
pub const FALLBACK_CATEGORY: &str = "General";
/// Subcategory matched when no rule fires.
pub const FALLBACK_SUBCATEGORY: &str = "Other";

/// A keyword rule: if any keyword appears in the text, the rule's
/// category/subcategory apply. First match wins, in declaration order.
struct CategoryRule {
    category: &'static str,
    subcategory: &'static str,
    keywords: &'static [&'static str],
}

const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: "Billing",
        subcategory: "Refunds",
        keywords: &["refund", "money back", "reimburse"],
    },
    CategoryRule {
        category: "Billing",
        subcategory: "Charges",
        keywords: &["bill", "charge", "invoice", "payment", "fee"],
    },
    CategoryRule {
        category: "Technical",
        subcategory: "Connectivity",
        keywords: &["internet", "wifi", "network", "connection", "offline"],
    },
    CategoryRule {
        category: "Technical",
        subcategory: "Hardware",
        keywords: &["laptop", "printer", "monitor", "keyboard", "screen"],
    },
    CategoryRule {
        category: "Facilities",
        subcategory: "Maintenance",
        keywords: &["leak", "broken", "elevator", "light", "air conditioning", "heating"],
    },
    CategoryRule {
        category: "Facilities",
        subcategory: "Cleanliness",
        keywords: &["dirty", "trash", "clean", "smell"],
    },
    CategoryRule {
        category: "HR",
        subcategory: "Payroll",
        keywords: &["salary", "payroll", "payslip", "overtime"],
    },
];

const HIGH_URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "immediately",
    "emergency",
    "asap",
    "critical",
    "danger",
];

const LOW_URGENCY_KEYWORDS: &[&str] = &["whenever", "minor", "no rush", "suggestion"];

/// Deterministic keyword-based classifier with a built-in rule set.
#[derive(Debug, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl ComplaintClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Result<Classification, CoreError> {
        let haystack = text.to_lowercase();

        let (category, subcategory) = CATEGORY_RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| haystack.contains(kw)))
            .map(|rule| (rule.category, rule.subcategory))
            .unwrap_or((FALLBACK_CATEGORY, FALLBACK_SUBCATEGORY));

        let urgency = if HIGH_URGENCY_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
            URGENCY_HIGH
        } else if LOW_URGENCY_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
            URGENCY_LOW
        } else {
            URGENCY_MEDIUM
        };

        Ok(Classification {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            urgency: urgency.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Classification {
        KeywordClassifier::new()
            .classify(text)
            .expect("keyword classifier is infallible")
    }

    #[test]
    fn matches_billing_refund() {
        let c = classify("I want a refund for last month");
        assert_eq!(c.category, "Billing");
        assert_eq!(c.subcategory, "Refunds");
    }

    #[test]
    fn matches_technical_connectivity() {
        let c = classify("The office WiFi keeps dropping");
        assert_eq!(c.category, "Technical");
        assert_eq!(c.subcategory, "Connectivity");
    }

    #[test]
    fn unmatched_text_falls_back() {
        let c = classify("something unclassifiable happened");
        assert_eq!(c.category, FALLBACK_CATEGORY);
        assert_eq!(c.subcategory, FALLBACK_SUBCATEGORY);
        assert_eq!(c.urgency, URGENCY_MEDIUM);
    }

    #[test]
    fn urgency_keywords_override_default() {
        assert_eq!(classify("printer is on fire, urgent!").urgency, URGENCY_HIGH);
        assert_eq!(classify("minor issue with my payslip").urgency, URGENCY_LOW);
        assert_eq!(classify("my invoice looks wrong").urgency, URGENCY_MEDIUM);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = classify("REFUND ME IMMEDIATELY");
        assert_eq!(c.category, "Billing");
        assert_eq!(c.urgency, URGENCY_HIGH);
    }
}
