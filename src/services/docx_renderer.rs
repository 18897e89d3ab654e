//! 富文档渲染服务 - 业务能力层
//!
//! 生成与标注文本同内容的分页 Word 文档：标签行作为段落，配图插在
//! 引入它的标签行之后，表格插在选项列表之前。图片是尽力而为：
//! 解析不到的图直接跳过，绝不因缺图丢弃整条记录。

use crate::config::Config;
use crate::models::question::{QuestionBatch, QuestionRecord};
use crate::services::asset_fetcher::{AssetFetcher, FetchedAsset};
use crate::services::diagram_service::DiagramRenderer;
use anyhow::{Context, Result};
use docx_rs::{Docx, Paragraph, Pic, Run, Table, TableCell, TableRow};
use image::GenericImageView;
use std::fs::File;
use std::path::Path;
use tracing::warn;

/// 题目主配图的目标宽度（3.5 英寸，EMU）
const DIAGRAM_WIDTH_EMU: u32 = 3_200_400;
/// 选项图标的目标宽度（0.9 英寸，EMU）
const OPTION_ICON_WIDTH_EMU: u32 = 822_960;

/// 已解析的内嵌图片
struct EmbeddedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

/// 富文档渲染服务
pub struct DocxRenderer {
    diagram_renderer: DiagramRenderer,
    asset_fetcher: AssetFetcher,
}

impl DocxRenderer {
    /// 创建新的富文档渲染服务
    pub fn new(config: &Config) -> Self {
        Self {
            diagram_renderer: DiagramRenderer::new(&config.images_dir),
            asset_fetcher: AssetFetcher::new(config),
        }
    }

    /// 把整个批次渲染为一个 .docx 文件
    pub async fn render_to_file(&self, batch: &QuestionBatch, path: &Path) -> Result<()> {
        let mut docx = Docx::new();

        for record in &batch.questions {
            docx = self.append_record(docx, &batch.name, record).await;
        }

        let file = File::create(path)
            .with_context(|| format!("无法创建文档文件: {}", path.display()))?;
        docx.build()
            .pack(file)
            .with_context(|| format!("无法写入文档文件: {}", path.display()))?;

        Ok(())
    }

    /// 追加单条记录的全部段落
    async fn append_record(&self, mut docx: Docx, bank: &str, record: &QuestionRecord) -> Docx {
        docx = docx
            .add_paragraph(text_paragraph(&format!("@title {}", record.title)))
            .add_paragraph(text_paragraph(&format!(
                "@description {}",
                record.description
            )))
            .add_paragraph(text_paragraph(""))
            .add_paragraph(text_paragraph(&format!("@question {}", record.question)))
            .add_paragraph(text_paragraph(&format!(
                "@instruction {}",
                record.instruction
            )))
            .add_paragraph(text_paragraph(&format!(
                "@difficulty {}",
                record.difficulty
            )))
            .add_paragraph(text_paragraph(&format!("@Order {}", record.order)));

        // 主配图紧跟 @Order 行
        if let Some(spec) = &record.diagram {
            let name = format!("{}_q{}", bank, record.order);
            if let Some(image) = self.resolve_image(&name, spec).await {
                docx = docx.add_paragraph(image_paragraph(&image, DIAGRAM_WIDTH_EMU));
            }
        }

        // 表格插在选项列表之前
        if let Some(rows) = &record.table_rows {
            docx = docx.add_table(table_block(rows));
        }

        for (index, option) in record.options.iter().enumerate() {
            let prefix = if option == &record.answer {
                "@@option"
            } else {
                "@option"
            };
            docx = docx.add_paragraph(text_paragraph(&format!("{} {}", prefix, option)));

            // 选项配图紧跟对应的选项行
            if let Some(spec) = record.option_diagrams.get(option) {
                let name = format!("{}_q{}_opt{}", bank, record.order, index + 1);
                if let Some(image) = self.resolve_image(&name, spec).await {
                    docx = docx.add_paragraph(image_paragraph(&image, OPTION_ICON_WIDTH_EMU));
                }
            }
        }

        docx = docx
            .add_paragraph(text_paragraph("@explanation"))
            .add_paragraph(text_paragraph(&record.explanation))
            .add_paragraph(text_paragraph(&format!("@subject {}", record.subject)))
            .add_paragraph(text_paragraph(&format!("@unit {}", record.unit)))
            .add_paragraph(text_paragraph(&format!("@topic {}", record.topic)))
            .add_paragraph(text_paragraph("@plusmarks 1"))
            .add_paragraph(text_paragraph(""))
            .add_paragraph(text_paragraph("---"))
            .add_paragraph(text_paragraph(""));

        docx
    }

    /// 把配图规格解析为可内嵌的图片字节
    ///
    /// 远程引用走 AssetFetcher；内联规格现场绘制。两条路径的失败都
    /// 降级为 `None`（跳过插图）
    async fn resolve_image(
        &self,
        name: &str,
        spec: &crate::models::question::DiagramSpec,
    ) -> Option<EmbeddedImage> {
        if let crate::models::question::DiagramSpec::Remote { url } = spec {
            return match self.asset_fetcher.resolve(url).await {
                FetchedAsset::Resolved {
                    bytes,
                    width,
                    height,
                } => Some(EmbeddedImage {
                    bytes,
                    width,
                    height,
                }),
                FetchedAsset::Unresolved => None,
            };
        }

        let path = match self.diagram_renderer.render(name, spec) {
            Ok(Some(path)) => path,
            Ok(None) => return None,
            Err(e) => {
                warn!("⚠️ 配图绘制失败 ({}): {}", name, e);
                return None;
            }
        };

        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                warn!("⚠️ 配图读取失败 ({}): {}", path.display(), e);
                return None;
            }
        };

        match image::load_from_memory(&bytes) {
            Ok(decoded) => Some(EmbeddedImage {
                width: decoded.width(),
                height: decoded.height(),
                bytes,
            }),
            Err(e) => {
                warn!("⚠️ 配图解码失败 ({}): {}", path.display(), e);
                None
            }
        }
    }
}

/// 纯文本段落
fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

/// 图片段落，按目标宽度等比缩放
fn image_paragraph(image: &EmbeddedImage, target_width_emu: u32) -> Paragraph {
    let target_height_emu =
        (target_width_emu as u64 * image.height as u64 / image.width.max(1) as u64) as u32;
    let pic = Pic::new(&image.bytes).size(target_width_emu, target_height_emu);
    Paragraph::new().add_run(Run::new().add_image(pic))
}

/// 无样式的文本表格
fn table_block(rows: &[Vec<String>]) -> Table {
    Table::new(
        rows.iter()
            .map(|row| {
                TableRow::new(
                    row.iter()
                        .map(|cell| TableCell::new().add_paragraph(text_paragraph(cell)))
                        .collect(),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Difficulty, DiagramSpec, QuestionRecord};
    use std::collections::BTreeMap;

    fn test_config() -> Config {
        let tmp = std::env::temp_dir().join("assessment_docgen_docx_test");
        Config {
            output_dir: tmp.to_string_lossy().to_string(),
            images_dir: tmp.join("images").to_string_lossy().to_string(),
            ..Config::default()
        }
    }

    fn record_with_diagram(diagram: Option<DiagramSpec>) -> QuestionRecord {
        QuestionRecord {
            title: "Punched Card".to_string(),
            description: "Orientation reasoning.".to_string(),
            question: "Which orientation is not possible?".to_string(),
            instruction: "Consider reflections.".to_string(),
            difficulty: Difficulty::Hard,
            order: 1,
            options: vec!["(A)".to_string(), "(B)".to_string()],
            answer: "(B)".to_string(),
            explanation: "The flipped card is a mirror image.".to_string(),
            subject: "Quantitative Math".to_string(),
            unit: "Geometry and Measurement".to_string(),
            topic: "Transformations (Dilating a shape)".to_string(),
            diagram,
            option_diagrams: BTreeMap::new(),
            table_rows: Some(vec![
                vec!["Shirt".to_string(), "Pants".to_string()],
                vec!["Tan".to_string(), "Black".to_string()],
            ]),
        }
    }

    #[tokio::test]
    async fn test_render_with_inline_diagram() {
        let config = test_config();
        std::fs::create_dir_all(&config.output_dir).unwrap();

        let batch = QuestionBatch {
            name: "docx_inline".to_string(),
            questions: vec![record_with_diagram(Some(DiagramSpec::PunchedCard))],
        };

        let renderer = DocxRenderer::new(&config);
        let path = std::path::PathBuf::from(&config.output_dir).join("docx_inline.docx");
        renderer.render_to_file(&batch, &path).await.unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // .docx 是 zip 容器
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_unresolved_remote_image_is_skipped() {
        let config = test_config();
        std::fs::create_dir_all(&config.output_dir).unwrap();

        // 连接立即被拒绝的地址：图片不可解析，但文档照常生成
        let batch = QuestionBatch {
            name: "docx_remote".to_string(),
            questions: vec![record_with_diagram(Some(DiagramSpec::Remote {
                url: "http://127.0.0.1:9/missing.png".to_string(),
            }))],
        };

        let renderer = DocxRenderer::new(&config);
        let path = std::path::PathBuf::from(&config.output_dir).join("docx_remote.docx");
        renderer.render_to_file(&batch, &path).await.unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
