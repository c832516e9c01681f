//! 提示词构建 - 业务能力层
//!
//! 纯函数：同样的输入永远得到同样的指令文本

use crate::models::QuestionKind;

/// 构建发给模型的指令
///
/// 包含题目数量、题型标签、主题文本，以及固定的格式规则和两个题目模板。
/// 主题和附件同时为空属于调用方的前置条件错误，这里不做检查。
pub fn build_instruction(count: u32, kind: QuestionKind, topic_text: &str) -> String {
    format!(
        r#"Task: Generate {count} exam questions.
Type: {kind}
Topic: {topic}

STRICT RULES:
1. Output strictly pure Markdown.
2. Use LaTeX wrapped in '$' for inline math.
3. Start immediately with questions. No intro/outro text.
4. Make it COMPACT.

FORMAT (MCQ):
**1.** Question text? **(A)** Opt1 **(B)** Opt2 **(C)** Opt3 **(D)** Opt4

FORMAT (Subjective):
**1.** Concise question text.

ENSURE SPEED AND ACCURACY."#,
        count = count,
        kind = kind.label(),
        topic = topic_text,
    )
}
