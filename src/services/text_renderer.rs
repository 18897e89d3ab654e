//! 标注文本渲染服务 - 业务能力层
//!
//! 把 QuestionRecord 序列化为下游导入流程消费的 `@` 标签行格式。
//! 格式是逐字节约定：标签顺序固定，正确选项用 `@@option` 双前缀标记。

use crate::models::question::QuestionRecord;

/// 渲染单个题目块
///
/// 输出固定顺序的标签行，末尾带一个空行：
/// title / description / (空行) / question / instruction / difficulty /
/// Order / 选项列表 / explanation / subject / unit / topic / plusmarks
pub fn render_question_block(record: &QuestionRecord) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("@title {}", record.title));
    lines.push(format!("@description {}", record.description));
    lines.push(String::new());
    lines.push(format!("@question {}", record.question));
    lines.push(format!("@instruction {}", record.instruction));
    lines.push(format!("@difficulty {}", record.difficulty));
    lines.push(format!("@Order {}", record.order));

    for option in &record.options {
        // 正确选项用双 @ 前缀，顺序保持作者给定的展示顺序
        let prefix = if option == &record.answer {
            "@@option"
        } else {
            "@option"
        };
        lines.push(format!("{} {}", prefix, option));
    }

    lines.push("@explanation".to_string());
    lines.push(record.explanation.clone());
    lines.push(format!("@subject {}", record.subject));
    lines.push(format!("@unit {}", record.unit));
    lines.push(format!("@topic {}", record.topic));
    lines.push("@plusmarks 1".to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// 渲染整个批次
///
/// 块之间以一个空行分隔，记录顺序不重新排序
pub fn render_batch(records: &[QuestionRecord]) -> String {
    records
        .iter()
        .map(render_question_block)
        .collect::<Vec<_>>()
        .join("\n")
}
