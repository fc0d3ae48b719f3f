use rentguard::analyzer::normalizer::{normalize_risk_level, normalize_risk_type, ParsedReply};
use rentguard::analyzer::KimiClient;
use rentguard::models::{AnalysisResult, RiskLevel, RiskType};
use serde_json::json;

fn assert_fully_populated(result: &AnalysisResult) {
    assert!(!result.summary.trim().is_empty());
    for item in &result.risk_items {
        assert!(!item.title.trim().is_empty());
        assert!(!item.content.trim().is_empty());
        assert!(!item.suggestion.trim().is_empty());
        assert!(!item.source.trim().is_empty());
        for reference in &item.references {
            assert!(!reference.title.trim().is_empty());
            assert!(!reference.url.trim().is_empty());
        }
    }
}

#[test]
fn test_malformed_replies_always_produce_complete_results() {
    let replies = [
        "",
        "   ",
        "{}",
        "null",
        "[]",
        "{\"riskLevel\": null, \"riskItems\": null, \"summary\": null}",
        "{\"riskItems\": [null, 1, \"x\", [], {}]}",
        "{\"riskItems\": [{\"references\": [{}, null, {\"title\": \"\"}]}]}",
        "{\"summary\": {\"nested\": true}, \"riskLevel\": [\"high\"]}",
        "prefix {\"riskLevel\": \"low\"",
        "{\"riskLevel\": \"高\"} trailing {\"riskLevel\": \"低\"}",
        "前言 { not json } 后记",
    ];

    for reply in replies {
        let result = KimiClient::parse_analysis_response(reply, 1);
        assert_fully_populated(&result);
        assert_eq!(result.file_count, 1, "reply: {reply:?}");
    }
}

#[test]
fn test_first_parseable_object_wins() {
    let result = KimiClient::parse_analysis_response("{\"riskLevel\": \"高\"} trailing {\"riskLevel\": \"低\"}", 1);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn test_blank_reply_becomes_fallback() {
    let result = KimiClient::parse_analysis_response("", 3);

    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.risk_items.len(), 1);
    assert_eq!(result.risk_items[0].risk_type, RiskType::Info);
    assert_eq!(result.file_count, 3);
}

#[test]
fn test_mixed_language_risk_types() {
    let cases = [
        (json!("high"), RiskType::High),
        (json!("HIGH RISK"), RiskType::High),
        (json!("高风险"), RiskType::High),
        (json!("error"), RiskType::High),
        (json!("Medium"), RiskType::Medium),
        (json!("中等风险"), RiskType::Medium),
        (json!("中性条款"), RiskType::Info),
        (json!("warning"), RiskType::Medium),
        (json!("low"), RiskType::Low),
        (json!("低风险"), RiskType::Low),
        (json!("低"), RiskType::Info),
        (json!("good"), RiskType::Good),
        (json!("条款良好"), RiskType::Good),
        (json!("info"), RiskType::Low),
        (json!("提示"), RiskType::Info),
        (json!(""), RiskType::Info),
        (json!(3), RiskType::Info),
        (json!(true), RiskType::Info),
    ];

    for (value, expected) in cases {
        assert_eq!(normalize_risk_type(Some(&value)), expected, "value: {value}");
    }
}

#[test]
fn test_mixed_language_risk_levels() {
    let cases = [
        (json!("High"), RiskLevel::High),
        (json!("高风险"), RiskLevel::High),
        (json!("medium"), RiskLevel::Medium),
        (json!("中等"), RiskLevel::Medium),
        (json!("Low"), RiskLevel::Low),
        (json!("低风险"), RiskLevel::Low),
        (json!("good"), RiskLevel::Medium),
        (json!("???"), RiskLevel::Medium),
        (json!(null), RiskLevel::Medium),
    ];

    for (value, expected) in cases {
        assert_eq!(normalize_risk_level(Some(&value)), expected, "value: {value}");
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let reply = r#"{"riskLevel": "warning", "summary": " ", "riskItems": [
        {"type": "info", "title": "", "content": "租期一年"},
        {"type": "良好", "title": "维修", "references": [{"url": "https://example.com"}]},
        {"type": "high", "suggestion": 0}
    ]}"#;

    let once = KimiClient::parse_analysis_response(reply, 1);
    let twice = once.clone().normalized();
    assert_eq!(once, twice);

    let reserialized = serde_json::to_string(&once).unwrap();
    let reparsed = KimiClient::parse_analysis_response(&reserialized, 1);
    assert_eq!(once.risk_level, reparsed.risk_level);
    assert_eq!(once.risk_items, reparsed.risk_items);
    assert_eq!(once.summary, reparsed.summary);
}

#[test]
fn test_structured_detection() {
    assert!(ParsedReply::parse("答复：{\"a\": 1}").is_structured());
    assert!(!ParsedReply::parse("没有结构化数据").is_structured());
}

#[test]
fn test_reply_cut_off_mid_object_keeps_raw_text() {
    let reply = r#"分析如下：{"riskLevel": "高", "riskItems": [{"type": "高风险", "title": "押金", "content": "押金不退"}, {"type": "中等风险", "title": "违约"#;

    assert!(!ParsedReply::parse(reply).is_structured());

    let result = KimiClient::parse_analysis_response(reply, 1);
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.summary, reply);
    assert_eq!(result.risk_items.len(), 1);
    assert_eq!(result.risk_items[0].suggestion, reply);
}
