//! Defensive normalization of free-form model replies.
//!
//! Everything the remote model returns is untrusted: the reply may wrap its
//! JSON in prose, omit fields, use the wrong types, or not be JSON at all.
//! All of it converges through [`normalize_reply`] into a fully populated
//! [`AnalysisResult`].

use crate::models::analysis::{
    AnalysisResult, Reference, RiskItem, RiskLevel, RiskType, PLACEHOLDER_CONTENT,
    PLACEHOLDER_REFERENCE_TITLE, PLACEHOLDER_REFERENCE_URL, PLACEHOLDER_SOURCE,
    PLACEHOLDER_SUGGESTION, PLACEHOLDER_SUMMARY, PLACEHOLDER_TITLE,
};
use serde_json::{Map, Value};

/// Severity bucket produced by keyword classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
    Good,
}

pub struct ClassificationRule {
    pub keywords: &'static [&'static str],
    pub severity: Severity,
}

/// Rules for the `type` of a single clause, evaluated top to bottom; the
/// first rule with a matching substring wins. Chinese keywords are whole
/// terms so that unrelated words containing 中 or 低 stay unclassified.
pub const RISK_TYPE_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        keywords: &["high", "error", "高风险"],
        severity: Severity::High,
    },
    ClassificationRule {
        keywords: &["medium", "warning", "中等风险"],
        severity: Severity::Medium,
    },
    ClassificationRule {
        keywords: &["low", "info", "低风险"],
        severity: Severity::Low,
    },
    ClassificationRule {
        keywords: &["good", "良好"],
        severity: Severity::Good,
    },
];

/// Rules for the overall `riskLevel`, which the model usually answers with
/// a single character.
pub const RISK_LEVEL_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        keywords: &["high", "error", "高"],
        severity: Severity::High,
    },
    ClassificationRule {
        keywords: &["medium", "warning", "中"],
        severity: Severity::Medium,
    },
    ClassificationRule {
        keywords: &["low", "info", "低"],
        severity: Severity::Low,
    },
    ClassificationRule {
        keywords: &["good", "良好"],
        severity: Severity::Good,
    },
];

/// Outcome of looking for structured data in a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReply {
    Structured(Map<String, Value>),
    RawText(String),
}

impl ParsedReply {
    pub fn parse(reply: &str) -> Self {
        match extract_json_object(reply) {
            Some(object) => ParsedReply::Structured(object),
            None => ParsedReply::RawText(reply.to_string()),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ParsedReply::Structured(_))
    }
}

pub fn classify(rules: &[ClassificationRule], value: &str) -> Option<Severity> {
    let lower = value.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| rule.severity)
}

pub fn normalize_risk_type(value: Option<&Value>) -> RiskType {
    let Some(text) = value.and_then(string_like) else {
        return RiskType::Info;
    };

    match classify(RISK_TYPE_RULES, &text) {
        Some(Severity::High) => RiskType::High,
        Some(Severity::Medium) => RiskType::Medium,
        Some(Severity::Low) => RiskType::Low,
        Some(Severity::Good) => RiskType::Good,
        None => RiskType::Info,
    }
}

pub fn normalize_risk_level(value: Option<&Value>) -> RiskLevel {
    let Some(text) = value.and_then(string_like) else {
        return RiskLevel::Medium;
    };

    match classify(RISK_LEVEL_RULES, &text) {
        Some(Severity::High) => RiskLevel::High,
        Some(Severity::Low) => RiskLevel::Low,
        Some(Severity::Medium) | Some(Severity::Good) | None => RiskLevel::Medium,
    }
}

pub fn normalize_references(value: Option<&Value>) -> Vec<Reference> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| {
                Reference::new(
                    text_field(entry, &["title"], PLACEHOLDER_REFERENCE_TITLE),
                    text_field(entry, &["url"], PLACEHOLDER_REFERENCE_URL),
                )
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub fn normalize_risk_item(value: &Value) -> RiskItem {
    RiskItem {
        risk_type: normalize_risk_type(value.get("type")),
        title: text_field(value, &["title"], PLACEHOLDER_TITLE),
        content: text_field(value, &["content", "text"], PLACEHOLDER_CONTENT),
        suggestion: text_field(value, &["suggestion"], PLACEHOLDER_SUGGESTION),
        source: text_field(value, &["source"], PLACEHOLDER_SOURCE),
        references: normalize_references(value.get("references")),
    }
}

/// Builds a result from a parsed payload. A missing or non-array
/// `riskItems` becomes an empty list.
pub fn normalize_payload(payload: &Map<String, Value>, file_count: usize) -> AnalysisResult {
    let items = match payload.get("riskItems") {
        Some(Value::Array(items)) => items.iter().map(normalize_risk_item).collect(),
        _ => Vec::new(),
    };

    let summary = payload
        .get("summary")
        .and_then(string_like)
        .unwrap_or_else(|| PLACEHOLDER_SUMMARY.to_string());

    AnalysisResult::new(normalize_risk_level(payload.get("riskLevel")), file_count)
        .with_items(items)
        .with_summary(summary)
}

pub fn normalize_reply(reply: ParsedReply, file_count: usize) -> AnalysisResult {
    match reply {
        ParsedReply::Structured(payload) => normalize_payload(&payload, file_count),
        ParsedReply::RawText(text) => AnalysisResult::fallback(&text, file_count),
    }
}

/// Returns the first top-level `{...}` span in `text` that parses as a JSON
/// object. A span that fails to parse is skipped as a whole, never searched
/// for nested objects; an unbalanced span ends the search.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        let end = matching_brace(text, start)?;
        if let Ok(Value::Object(object)) = serde_json::from_str(&text[start..=end]) {
            return Some(object);
        }
        search_from = end + 1;
    }

    None
}

/// Byte index of the `}` closing the `{` at `start`, skipping braces inside
/// JSON string literals.
fn matching_brace(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + index);
                }
            }
            _ => {}
        }
    }

    None
}

/// Strings, numbers and booleans count as text; blank strings do not.
fn string_like(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn text_field(value: &Value, keys: &[&str], placeholder: &str) -> String {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(string_like))
        .unwrap_or_else(|| placeholder.to_string())
}
