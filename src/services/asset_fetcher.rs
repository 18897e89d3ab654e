//! 外部图片获取服务 - 业务能力层
//!
//! 把远程图片引用解析为本地字节。任何失败（网络、超时、非图片内容）
//! 都返回 `Unresolved` 而不是错误：缺图只影响单条记录的插图，不中断批次。

use crate::config::Config;
use image::GenericImageView;
use std::time::Duration;
use tracing::{debug, warn};

/// 图片解析结果
///
/// 显式的和类型，调用方必须处理"没有图"的分支
#[derive(Debug, Clone)]
pub enum FetchedAsset {
    /// 成功解析：原始字节 + 解码出的像素尺寸
    Resolved {
        bytes: Vec<u8>,
        width: u32,
        height: u32,
    },
    /// 无法解析，视同"未指定配图"
    Unresolved,
}

impl FetchedAsset {
    pub fn is_resolved(&self) -> bool {
        matches!(self, FetchedAsset::Resolved { .. })
    }
}

/// 外部图片获取服务
pub struct AssetFetcher {
    client: reqwest::Client,
}

impl AssetFetcher {
    /// 创建新的图片获取服务（带固定请求超时）
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }

    /// 解析远程图片引用
    ///
    /// # 参数
    /// - `url`: 图片 URL
    ///
    /// # 返回
    /// 永不返回错误；失败一律降级为 `Unresolved`
    pub async fn resolve(&self, url: &str) -> FetchedAsset {
        debug!("获取远程图片: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("⚠️ 图片请求失败 ({}): {}", url, e);
                return FetchedAsset::Unresolved;
            }
        };

        if !response.status().is_success() {
            warn!("⚠️ 图片请求返回 {} ({})", response.status(), url);
            return FetchedAsset::Unresolved;
        }

        let bytes = match response.bytes().await {
            Ok(b) => b.to_vec(),
            Err(e) => {
                warn!("⚠️ 图片读取失败 ({}): {}", url, e);
                return FetchedAsset::Unresolved;
            }
        };

        if bytes.is_empty() {
            warn!("⚠️ 图片内容为空 ({})", url);
            return FetchedAsset::Unresolved;
        }

        // 解码校验：拿不到尺寸的内容按缺图处理
        match image::load_from_memory(&bytes) {
            Ok(decoded) => {
                let (width, height) = (decoded.width(), decoded.height());
                debug!("✓ 图片解析成功: {}x{} ({} 字节)", width, height, bytes.len());
                FetchedAsset::Resolved {
                    bytes,
                    width,
                    height,
                }
            }
            Err(e) => {
                warn!("⚠️ 图片解码失败 ({}): {}", url, e);
                FetchedAsset::Unresolved
            }
        }
    }
}
