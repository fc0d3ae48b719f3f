use crate::cli::args::OutputFormat;
use crate::error::RentGuardError;
use crate::localization::LocalizedStrings;
use crate::models::{AnalysisResult, OutputLanguage, RiskItem, RiskLevel, RiskType};

const RULE_WIDTH: usize = 60;

pub struct ReportFormatter {
    use_colors: bool,
    verbose: bool,
    localized_strings: LocalizedStrings,
}

impl ReportFormatter {
    pub fn new(output_language: OutputLanguage, use_colors: bool, verbose: bool) -> Self {
        Self {
            use_colors,
            verbose,
            localized_strings: LocalizedStrings::new(output_language),
        }
    }

    pub fn render(&self, result: &AnalysisResult, format: OutputFormat) -> Result<String, RentGuardError> {
        match format {
            OutputFormat::Text => Ok(self.format_analysis_result(result)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        }
    }

    pub fn format_analysis_result(&self, result: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header(result));
        output.push('\n');

        output.push_str(&self.format_risk_level(&result.risk_level));
        output.push_str("\n\n");

        output.push_str(&self.format_section(
            self.localized_strings.get_section("summary"),
            &result.summary,
        ));
        output.push_str("\n\n");

        let items = if result.risk_items.is_empty() {
            self.localized_strings.get_message("no_items").to_string()
        } else {
            result
                .risk_items
                .iter()
                .enumerate()
                .map(|(i, item)| self.format_item(i + 1, item))
                .collect::<Vec<_>>()
                .join("\n\n")
        };
        output.push_str(&self.format_section(
            self.localized_strings.get_section("risk_items"),
            &items,
        ));
        output.push_str("\n\n");

        if self.verbose {
            output.push_str(&self.format_section(
                self.localized_strings.get_section("statistics"),
                &self.format_statistics(result),
            ));
            output.push_str("\n\n");
        }

        output.push_str(self.localized_strings.get_message("disclaimer"));
        output.push('\n');

        output
    }

    fn format_header(&self, result: &AnalysisResult) -> String {
        let rule = "═".repeat(RULE_WIDTH);
        format!(
            "{}\n{}\n{}: {}  |  {}: {}\n{}",
            rule,
            self.localized_strings.get("report_header"),
            self.localized_strings.get("report_files"),
            result.file_count,
            self.localized_strings.get("report_date"),
            result.analysis_date.format("%Y-%m-%d %H:%M:%S UTC"),
            rule
        )
    }

    fn format_risk_level(&self, level: &RiskLevel) -> String {
        let label = format!(
            "{} {}: {}",
            level.as_emoji(),
            self.localized_strings.get("report_overall_risk"),
            self.localized_strings.get_risk_level(level.as_str())
        );
        self.colorize(&label, level_color(level))
    }

    fn format_section(&self, title: &str, body: &str) -> String {
        format!("{}\n{}\n{}", title, "─".repeat(RULE_WIDTH), body)
    }

    fn format_item(&self, index: usize, item: &RiskItem) -> String {
        let heading = format!(
            "{}. {} [{}] {}",
            index,
            item.risk_type.as_emoji(),
            self.localized_strings.get_risk_type(item.risk_type.as_str()),
            item.title
        );

        let mut lines = vec![
            self.colorize(&heading, type_color(&item.risk_type)),
            format!("   {}: {}", self.localized_strings.get_field("content"), item.content),
            format!("   {}: {}", self.localized_strings.get_field("suggestion"), item.suggestion),
            format!("   {}: {}", self.localized_strings.get_field("source"), item.source),
        ];

        if !item.references.is_empty() {
            lines.push(format!("   {}:", self.localized_strings.get_field("references")));
            for reference in &item.references {
                lines.push(format!("     - {} <{}>", reference.title, reference.url));
            }
        }

        lines.join("\n")
    }

    fn format_statistics(&self, result: &AnalysisResult) -> String {
        [
            RiskType::High,
            RiskType::Medium,
            RiskType::Low,
            RiskType::Good,
            RiskType::Info,
        ]
        .iter()
        .map(|risk_type| {
            format!(
                "{}: {}",
                self.localized_strings.get_risk_type(risk_type.as_str()),
                result.count_by_type(*risk_type)
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
    }

    fn colorize(&self, text: &str, ansi_code: &str) -> String {
        if self.use_colors {
            format!("\x1b[{}m{}\x1b[0m", ansi_code, text)
        } else {
            text.to_string()
        }
    }
}

fn level_color(level: &RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "1;31",
        RiskLevel::Medium => "1;33",
        RiskLevel::Low => "1;32",
    }
}

fn type_color(risk_type: &RiskType) -> &'static str {
    match risk_type {
        RiskType::High => "31",
        RiskType::Medium => "33",
        RiskType::Low => "34",
        RiskType::Good => "32",
        RiskType::Info => "36",
    }
}
