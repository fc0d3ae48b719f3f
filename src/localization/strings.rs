use std::collections::HashMap;

lazy_static::lazy_static! {
    pub static ref ENGLISH_STRINGS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();

        // Overall risk levels
        m.insert("risk_level_high", "HIGH");
        m.insert("risk_level_medium", "MEDIUM");
        m.insert("risk_level_low", "LOW");

        // Clause types
        m.insert("risk_type_high", "High risk");
        m.insert("risk_type_medium", "Medium risk");
        m.insert("risk_type_low", "Low risk");
        m.insert("risk_type_good", "Good clause");
        m.insert("risk_type_info", "Note");

        // Section headers
        m.insert("section_summary", "SUMMARY");
        m.insert("section_risk_items", "FLAGGED CLAUSES");
        m.insert("section_statistics", "STATISTICS");

        // Item fields
        m.insert("field_content", "Clause");
        m.insert("field_suggestion", "Suggestion");
        m.insert("field_source", "Source");
        m.insert("field_references", "References");

        // Messages
        m.insert("message_no_items", "No clauses were flagged.");
        m.insert("message_disclaimer", "This report is for reference only and is not legal advice. Consult a lawyer for important contracts.");
        m.insert("message_key_saved", "API key saved.");
        m.insert("message_key_cleared", "API key cleared.");
        m.insert("message_key_missing", "No API key configured. Run `rentguard key set <KEY>` or pass --api-key.");

        // Report header
        m.insert("report_header", "RENTAL CONTRACT RISK REPORT");
        m.insert("report_overall_risk", "OVERALL RISK LEVEL");
        m.insert("report_files", "Files analyzed");
        m.insert("report_date", "Analyzed at");

        m
    };

    pub static ref CHINESE_STRINGS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();

        m.insert("risk_level_high", "高风险");
        m.insert("risk_level_medium", "中等风险");
        m.insert("risk_level_low", "低风险");

        m.insert("risk_type_high", "高风险");
        m.insert("risk_type_medium", "中等风险");
        m.insert("risk_type_low", "低风险");
        m.insert("risk_type_good", "良好条款");
        m.insert("risk_type_info", "提示");

        m.insert("section_summary", "总结建议");
        m.insert("section_risk_items", "风险条款");
        m.insert("section_statistics", "统计");

        m.insert("field_content", "条款内容");
        m.insert("field_suggestion", "改进建议");
        m.insert("field_source", "依据");
        m.insert("field_references", "参考链接");

        m.insert("message_no_items", "未发现需要关注的条款。");
        m.insert("message_disclaimer", "本报告仅供参考，不构成法律建议。重要合同请咨询专业律师。");
        m.insert("message_key_saved", "API密钥已保存。");
        m.insert("message_key_cleared", "API密钥已清除。");
        m.insert("message_key_missing", "尚未配置API密钥。请运行 `rentguard key set <KEY>` 或使用 --api-key。");

        m.insert("report_header", "租房合同风险分析报告");
        m.insert("report_overall_risk", "整体风险等级");
        m.insert("report_files", "分析文件数");
        m.insert("report_date", "分析时间");

        m
    };
}
