use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_TITLE: &str = "风险条款";
pub const PLACEHOLDER_CONTENT: &str = "未识别条款内容";
pub const PLACEHOLDER_SUGGESTION: &str = "暂无建议";
pub const PLACEHOLDER_SOURCE: &str = "Kimi AI分析";
pub const PLACEHOLDER_SUMMARY: &str = "分析完成";
pub const PLACEHOLDER_REFERENCE_TITLE: &str = "参考链接";
pub const PLACEHOLDER_REFERENCE_URL: &str = "#";

/// Overall severity of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    #[default]
    Medium,
    Low,
}

/// Severity tag of a single flagged clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskType {
    High,
    Medium,
    Low,
    Good,
    #[default]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    #[serde(rename = "type")]
    pub risk_type: RiskType,
    pub title: String,
    pub content: String,
    pub suggestion: String,
    pub source: String,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    pub risk_items: Vec<RiskItem>,
    pub summary: String,
    pub analysis_date: DateTime<Utc>,
    pub file_count: usize,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }

    pub fn as_emoji(&self) -> &'static str {
        match self {
            RiskLevel::High => "🚨",
            RiskLevel::Medium => "🔶",
            RiskLevel::Low => "✅",
        }
    }
}

impl RiskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskType::High => "high",
            RiskType::Medium => "medium",
            RiskType::Low => "low",
            RiskType::Good => "good",
            RiskType::Info => "info",
        }
    }

    pub fn as_emoji(&self) -> &'static str {
        match self {
            RiskType::High => "🚨",
            RiskType::Medium => "⚠️",
            RiskType::Low => "🔷",
            RiskType::Good => "✅",
            RiskType::Info => "ℹ️",
        }
    }
}

impl Reference {
    pub fn new<T: Into<String>, U: Into<String>>(title: T, url: U) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Replaces blank fields with placeholders.
    pub fn normalized(self) -> Self {
        Self {
            title: or_placeholder(self.title, PLACEHOLDER_REFERENCE_TITLE),
            url: or_placeholder(self.url, PLACEHOLDER_REFERENCE_URL),
        }
    }
}

impl RiskItem {
    pub fn new(risk_type: RiskType) -> Self {
        Self {
            risk_type,
            title: PLACEHOLDER_TITLE.to_string(),
            content: PLACEHOLDER_CONTENT.to_string(),
            suggestion: PLACEHOLDER_SUGGESTION.to_string(),
            source: PLACEHOLDER_SOURCE.to_string(),
            references: Vec::new(),
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_suggestion<S: Into<String>>(mut self, suggestion: S) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = source.into();
        self
    }

    pub fn add_reference(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// Field-level normalization of an already typed item.
    pub fn normalized(self) -> Self {
        Self {
            risk_type: self.risk_type,
            title: or_placeholder(self.title, PLACEHOLDER_TITLE),
            content: or_placeholder(self.content, PLACEHOLDER_CONTENT),
            suggestion: or_placeholder(self.suggestion, PLACEHOLDER_SUGGESTION),
            source: or_placeholder(self.source, PLACEHOLDER_SOURCE),
            references: self
                .references
                .into_iter()
                .map(Reference::normalized)
                .collect(),
        }
    }
}

impl AnalysisResult {
    pub fn new(risk_level: RiskLevel, file_count: usize) -> Self {
        Self {
            risk_level,
            risk_items: Vec::new(),
            summary: PLACEHOLDER_SUMMARY.to_string(),
            analysis_date: Utc::now(),
            file_count,
        }
    }

    pub fn with_summary<S: Into<String>>(mut self, summary: S) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_items(mut self, items: Vec<RiskItem>) -> Self {
        self.risk_items = items;
        self
    }

    pub fn add_item(&mut self, item: RiskItem) {
        self.risk_items.push(item);
    }

    /// Result shown when the reply carried no locatable JSON: the raw model
    /// output is preserved as both the summary and the lone suggestion.
    /// A blank reply leaves placeholders instead.
    pub fn fallback(raw_reply: &str, file_count: usize) -> Self {
        let item = RiskItem::new(RiskType::Info)
            .with_title("分析结果")
            .with_content("Kimi AI分析完成")
            .with_suggestion(raw_reply);

        AnalysisResult::new(RiskLevel::Medium, file_count)
            .with_items(vec![item])
            .with_summary(raw_reply)
            .normalized()
    }

    /// Degraded result rendered when the analysis itself failed.
    pub fn failure(message: &str, file_count: usize) -> Self {
        let suggestion = if message.trim().is_empty() {
            "请检查API密钥配置或稍后重试"
        } else {
            message
        };

        let item = RiskItem::new(RiskType::High)
            .with_title("分析失败")
            .with_content("分析过程中出现错误")
            .with_suggestion(suggestion)
            .with_source("系统错误");

        AnalysisResult::new(RiskLevel::High, file_count)
            .with_items(vec![item])
            .with_summary("分析失败，请检查API密钥配置或稍后重试")
    }

    /// Re-applies field-level normalization. Idempotent.
    pub fn normalized(self) -> Self {
        Self {
            risk_level: self.risk_level,
            risk_items: self
                .risk_items
                .into_iter()
                .map(RiskItem::normalized)
                .collect(),
            summary: or_placeholder(self.summary, PLACEHOLDER_SUMMARY),
            analysis_date: self.analysis_date,
            file_count: self.file_count,
        }
    }

    pub fn count_by_type(&self, risk_type: RiskType) -> usize {
        self.risk_items
            .iter()
            .filter(|item| item.risk_type == risk_type)
            .count()
    }

    pub fn has_high_risk_items(&self) -> bool {
        self.count_by_type(RiskType::High) > 0
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}
