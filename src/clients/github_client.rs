/// GitHub API 客户端
///
/// 封装所有与 GitHub API 相关的调用逻辑
use crate::config::Config;
use crate::error::AppError;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::debug;

/// GitHub API 客户端
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GithubClient {
    /// 创建新的 GitHub 客户端
    pub fn new(config: &Config, token: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("assessment-docgen")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            base_url: config.github_api_base_url.clone(),
            token: token.into(),
        }
    }

    /// 创建 Pull Request
    ///
    /// # 参数
    /// - `owner`: 仓库拥有者
    /// - `repo`: 仓库名
    /// - `head`: 源分支
    /// - `base`: 目标分支
    /// - `title`: PR 标题
    /// - `body`: PR 描述
    ///
    /// # 返回
    /// 返回创建成功的 PR 网页地址
    pub async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<String> {
        let endpoint = format!("{}/repos/{}/{}/pulls", self.base_url, owner, repo);

        let payload = json!({
            "title": title,
            "head": head,
            "base": base,
            "body": body,
        });

        debug!("创建 PR: {} ({} -> {})", endpoint, head, base);

        let response = self
            .http
            .post(&endpoint)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("PR 创建请求失败: {}", endpoint))?;

        let status = response.status();
        let result: Value = response
            .json()
            .await
            .with_context(|| format!("PR 响应解析失败: {}", endpoint))?;

        if !status.is_success() {
            let message = result
                .get("message")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());
            return Err(AppError::api_bad_response(endpoint, status.as_u16(), message).into());
        }

        let html_url = result
            .get("html_url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::Api(crate::error::ApiError::MissingField {
                endpoint: endpoint.clone(),
                field: "html_url".to_string(),
            }))?;

        debug!("✓ PR 创建成功: {}", html_url);

        Ok(html_url.to_string())
    }
}
