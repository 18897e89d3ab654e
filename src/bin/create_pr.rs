//! PR 提交工具
//!
//! 从当前仓库的 origin 远程解析访问令牌，向 GitHub 发起一次
//! Pull Request 创建请求。成功时打印 PR 地址；任何失败都打印
//! `ERROR: <message>` 到标准错误并以非零状态退出，不做重试。

use anyhow::Result;
use assessment_docgen::utils::{git, logging};
use assessment_docgen::{Config, GithubClient};

/// 固定的 PR 标题
const PR_TITLE: &str = "Add assessment documents and fixes (Q6=400, Q11 corrected)";

/// 固定的 PR 描述
const PR_BODY: &str = "Automated PR adding the Word document with 25 questions (images embedded), \
the generator, and fixes: Q6 corrected to 400m; Q11 updated to the provided question.\n\
Files: generated/assessment_25.docx, generated/assessment_25.txt.";

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env();

    let remote = git::remote_info()?;
    let head = git::current_branch()?;
    let base = git::default_branch()?;

    let client = GithubClient::new(&config, remote.token.clone());
    let pr_url = client
        .create_pull_request(&remote.owner, &remote.repo, &head, &base, PR_TITLE, PR_BODY)
        .await?;

    println!("{}", pr_url);

    Ok(())
}
