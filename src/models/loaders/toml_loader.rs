use crate::error::{AppError, FileError};
use crate::models::question::QuestionBatch;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载数据并转换为 QuestionBatch 对象
///
/// 加载后立即校验全部题目，坏数据直接失败，不进入渲染
pub async fn load_toml_to_batch(toml_file_path: &Path) -> Result<QuestionBatch> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let batch: QuestionBatch = toml::from_str(&content).map_err(|e| {
        AppError::File(FileError::TomlParseFailed {
            path: toml_file_path.display().to_string(),
            source: Box::new(e),
        })
    })?;

    batch
        .validate()
        .with_context(|| format!("题库数据校验失败: {}", toml_file_path.display()))?;

    Ok(batch)
}

/// 从文件夹中加载所有 TOML 题库并转换为 QuestionBatch 对象列表
///
/// 按文件名排序，保证每次运行的批次顺序一致
pub async fn load_all_banks(folder_path: &str) -> Result<Vec<QuestionBatch>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        })
        .into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }

    toml_files.sort();

    let mut batches = Vec::new();
    for path in &toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        let batch = load_toml_to_batch(path).await?;
        tracing::info!("成功加载 {} 个题目", batch.questions.len());
        batches.push(batch);
    }

    Ok(batches)
}
