use crate::config::Config;
use crate::models::loaders::load_all_banks;
use crate::models::question::QuestionBatch;
use crate::services::text_renderer;
use crate::services::DocxRenderer;
use crate::utils::logging;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config.bank_folder, &config.output_dir);

        fs::create_dir_all(&config.output_dir)
            .with_context(|| format!("无法创建输出目录: {}", config.output_dir))?;
        fs::create_dir_all(&config.images_dir)
            .with_context(|| format!("无法创建图片目录: {}", config.images_dir))?;

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    ///
    /// 加载全部题库，逐个渲染文本和文档两种产物，最后打印产物路径列表
    pub async fn run(&self) -> Result<()> {
        let banks = load_all_banks(&self.config.bank_folder).await?;

        if banks.is_empty() {
            warn!("⚠️ 没有找到题库 TOML 文件，程序结束");
            return Ok(());
        }

        let total_questions: usize = banks.iter().map(|b| b.questions.len()).sum();
        logging::log_banks_loaded(banks.len(), total_questions);

        let docx_renderer = DocxRenderer::new(&self.config);
        let mut artifacts: Vec<String> = Vec::new();

        for (index, batch) in banks.iter().enumerate() {
            logging::log_batch_start(index + 1, banks.len(), &batch.name, batch.questions.len());

            // 详细日志（如果启用）
            if self.config.verbose_logging {
                for question in &batch.questions {
                    info!(
                        "  Q{}: {}",
                        question.order,
                        logging::truncate_text(&question.title, 40)
                    );
                }
            }

            let text_path = self.render_text_artifact(batch)?;
            artifacts.push(text_path.to_string_lossy().to_string());

            let docx_path = self.render_docx_artifact(&docx_renderer, batch).await?;
            artifacts.push(docx_path.to_string_lossy().to_string());

            info!("✅ 题库 {} 处理完成\n", batch.name);
        }

        logging::print_artifacts(&artifacts);

        Ok(())
    }

    /// 渲染标注文本产物
    fn render_text_artifact(&self, batch: &QuestionBatch) -> Result<PathBuf> {
        let path = PathBuf::from(&self.config.output_dir).join(format!("{}.txt", batch.name));
        let content = text_renderer::render_batch(&batch.questions);

        fs::write(&path, content)
            .with_context(|| format!("无法写入文本文件: {}", path.display()))?;

        info!("✓ 文本产物: {}", path.display());
        Ok(path)
    }

    /// 渲染富文档产物
    async fn render_docx_artifact(
        &self,
        renderer: &DocxRenderer,
        batch: &QuestionBatch,
    ) -> Result<PathBuf> {
        let path = PathBuf::from(&self.config.output_dir).join(format!("{}.docx", batch.name));
        renderer.render_to_file(batch, &path).await?;

        info!("✓ 文档产物: {}", path.display());
        Ok(path)
    }
}
