/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 默认 info 级别，可通过 RUST_LOG 覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `bank_folder`: 题库目录
/// - `output_dir`: 输出目录
pub fn log_startup(bank_folder: &str, output_dir: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目文档生成模式");
    info!("📁 题库目录: {}", bank_folder);
    info!("📂 输出目录: {}", output_dir);
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
pub fn log_banks_loaded(total_banks: usize, total_questions: usize) {
    info!("✓ 找到 {} 个题库，共 {} 道题目\n", total_banks, total_questions);
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `name`: 批次名称
/// - `question_count`: 题目数量
pub fn log_batch_start(batch_num: usize, total_batches: usize, name: &str, question_count: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 个题库: {}", batch_num, total_batches, name);
    info!("📄 题目数量: {}", question_count);
    info!("{}", "=".repeat(60));
}

/// 打印最终生成的文件列表
///
/// 这是生成流程的进程退出约定：成功时列出写入的全部文件路径
pub fn print_artifacts(artifacts: &[String]) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部生成完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));

    println!("Generated files:");
    for artifact in artifacts {
        println!(" - {}", artifact);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
