use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 难度枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单
    Easy,
    /// 中等
    Moderate,
    /// 困难
    Hard,
}

impl Difficulty {
    /// 获取标签名称（用于 @difficulty 行）
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }

    /// 尝试从字符串解析难度
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "moderate" => Some(Difficulty::Moderate),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 选项配图的形状种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Star,
}

/// 题目配图规格
///
/// 内联参数交给 DiagramRenderer 绘制；`Remote` 变体表示外部图片引用，
/// 由 AssetFetcher 解析
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagramSpec {
    /// 直角三角形（两条直角边）
    RightTriangle { leg_a: f64, leg_b: f64 },
    /// 柱状图（每个标签一根柱子）
    BarChart { labels: Vec<String>, values: Vec<f64> },
    /// 带中点标注的数轴（R, S, T, V 四点）
    NumberLineMidpoints { segment_length: f64 },
    /// 部分着色的单位网格
    ShadedGrid { cols: u32, rows: u32, shaded: f64 },
    /// 三条线段夹两个正方形
    SegmentChain { ab: f64, cd: f64, ef: f64, square_side: f64 },
    /// 打孔卡片
    PunchedCard,
    /// 选项形状图标
    ShapeIcon { shape: ShapeKind },
    /// 外部图片引用
    Remote { url: String },
}

/// 单个题目记录
///
/// 构造后不可变，每条记录恰好被一次渲染调用消费
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub title: String,
    pub description: String,
    pub question: String,
    pub instruction: String,
    pub difficulty: Difficulty,
    pub order: u32,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
    pub subject: String,
    pub unit: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<DiagramSpec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub option_diagrams: BTreeMap<String, DiagramSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_rows: Option<Vec<Vec<String>>>,
}

impl QuestionRecord {
    /// 校验记录的数据不变量
    ///
    /// # 返回
    /// 校验失败时返回描述性错误（加载时立即失败，不渲染坏数据）
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.order == 0 {
            return Err(ValidationError::InvalidOrder {
                title: self.title.clone(),
            });
        }

        if self.options.len() < 2 {
            return Err(ValidationError::TooFewOptions {
                title: self.title.clone(),
                count: self.options.len(),
            });
        }

        if !self.options.iter().any(|opt| opt == &self.answer) {
            return Err(ValidationError::AnswerNotInOptions {
                title: self.title.clone(),
                answer: self.answer.clone(),
            });
        }

        if let Some(rows) = &self.table_rows {
            if let Some(first) = rows.first() {
                for row in rows {
                    if row.len() != first.len() {
                        return Err(ValidationError::UnevenTableRows {
                            title: self.title.clone(),
                            expected: first.len(),
                            found: row.len(),
                        });
                    }
                }
            }
        }

        for key in self.option_diagrams.keys() {
            if !self.options.iter().any(|opt| opt == key) {
                return Err(ValidationError::UnknownOptionDiagram {
                    title: self.title.clone(),
                    key: key.clone(),
                });
            }
        }

        Ok(())
    }
}

/// 一个题库批次（对应一个 TOML 文件）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBatch {
    /// 批次名称，决定输出文件名
    pub name: String,
    pub questions: Vec<QuestionRecord>,
}

impl QuestionBatch {
    /// 校验批次中所有题目
    pub fn validate(&self) -> Result<(), ValidationError> {
        for question in &self.questions {
            question.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> QuestionRecord {
        QuestionRecord {
            title: "Sample".to_string(),
            description: "desc".to_string(),
            question: "q?".to_string(),
            instruction: "pick one".to_string(),
            difficulty: Difficulty::Easy,
            order: 1,
            options: vec!["0".to_string(), "1".to_string()],
            answer: "0".to_string(),
            explanation: "because".to_string(),
            subject: "Quantitative Math".to_string(),
            unit: "Algebra".to_string(),
            topic: "Interpreting Variables".to_string(),
            diagram: None,
            option_diagrams: BTreeMap::new(),
            table_rows: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_record().validate().is_ok());
    }

    #[test]
    fn test_validate_answer_not_in_options() {
        let mut record = sample_record();
        record.answer = "42".to_string();
        let err = record.validate().unwrap_err();
        assert!(matches!(err, ValidationError::AnswerNotInOptions { .. }));
    }

    #[test]
    fn test_validate_order_zero() {
        let mut record = sample_record();
        record.order = 0;
        let err = record.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOrder { .. }));
    }

    #[test]
    fn test_validate_too_few_options() {
        let mut record = sample_record();
        record.options = vec!["0".to_string()];
        record.answer = "0".to_string();
        let err = record.validate().unwrap_err();
        assert!(matches!(err, ValidationError::TooFewOptions { .. }));
    }

    #[test]
    fn test_validate_uneven_table_rows() {
        let mut record = sample_record();
        record.table_rows = Some(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ]);
        let err = record.validate().unwrap_err();
        assert!(matches!(err, ValidationError::UnevenTableRows { .. }));
    }

    #[test]
    fn test_validate_unknown_option_diagram_key() {
        let mut record = sample_record();
        record.option_diagrams.insert(
            "missing".to_string(),
            DiagramSpec::ShapeIcon {
                shape: ShapeKind::Circle,
            },
        );
        let err = record.validate().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownOptionDiagram { .. }));
    }

    #[test]
    fn test_difficulty_roundtrip() {
        assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("moderate"), Some(Difficulty::Moderate));
        assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("impossible"), None);
        assert_eq!(Difficulty::Moderate.to_string(), "moderate");
    }
}
