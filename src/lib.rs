//! # Assessment Docgen
//!
//! 一个把结构化题目数据渲染成考试文档的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目记录、配图规格、题库批次与数据校验
//! - `models/loaders` - 声明式 TOML 题库加载
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个渲染任务
//! - `DiagramRenderer` - 参数化配图绘制能力（plotters）
//! - `text_renderer` - 标注文本（@标签行）渲染能力
//! - `DocxRenderer` - 富文档（.docx）渲染能力
//! - `AssetFetcher` - 远程图片解析能力（失败降级为无图）
//!
//! ### ③ 客户端层（Clients）
//! - `clients/GithubClient` - GitHub Pull Request API
//!
//! ### ④ 编排层（App）
//! - `app` - 加载题库 → 渲染产物 → 打印产物列表
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::GithubClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Difficulty, DiagramSpec, QuestionBatch, QuestionRecord, ShapeKind};
pub use services::{AssetFetcher, DiagramRenderer, DocxRenderer, FetchedAsset};
