pub struct PromptTemplate;

/// Separator placed between the extracted text of consecutive files.
pub const CONTRACT_SEPARATOR: &str = "\n\n---\n\n";

/// Topics every analysis must cover, in prompt order.
pub const FOCUS_AREAS: [&str; 6] = [
    "押金退还条款是否合理",
    "违约金是否过高",
    "维修责任划分是否明确",
    "提前退租条款是否公平",
    "转租限制是否合理",
    "房屋损坏赔偿责任是否明确",
];

impl PromptTemplate {
    pub fn build_system_prompt() -> String {
        "你是一名专业的租房合同审查专家，熟悉租赁相关法律法规，擅长识别合同中的风险条款并给出可操作的修改建议。\
         请逐条审阅用户提供的合同内容，重点关注押金、违约金、维修责任、提前退租、转租以及房屋损坏赔偿等关键条款。"
            .to_string()
    }

    pub fn join_contract_texts(texts: &[String]) -> String {
        texts.join(CONTRACT_SEPARATOR)
    }

    pub fn build_user_prompt(contract_text: &str) -> String {
        let focus = FOCUS_AREAS
            .iter()
            .map(|area| format!("- {}", area))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"请审查以下租房合同内容，找出其中的风险条款并给出专业建议。

分析要求：
1. 给出合同整体风险等级（高/中/低）
2. 逐条列出发现的条款，每一条包含：
   - 风险类型（高风险/中等风险/低风险/良好条款）
   - 条款标题与原文内容
   - 修改或应对建议
   - 相关法律依据
   - 参考案例链接（请调用联网搜索获取真实可访问的链接）

重点审查：
{}

请只返回一个JSON对象，字段如下：
- riskLevel: 整体风险等级
- riskItems: 条款数组，每个元素包含 type, title, content, suggestion, source, references（数组，元素为 {{"title", "url"}}）
- summary: 总结与建议

合同内容：
{}"#,
            focus, contract_text
        )
    }

    /// Rough size guard: one token is roughly four bytes of UTF-8 text.
    pub fn estimate_tokens(prompt: &str) -> usize {
        prompt.len() / 4
    }
}
