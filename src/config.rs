/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库 TOML 文件存放目录
    pub bank_folder: String,
    /// 生成文件输出目录
    pub output_dir: String,
    /// 图片输出目录
    pub images_dir: String,
    /// 远程图片下载超时（秒）
    pub fetch_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- GitHub API 配置 ---
    pub github_api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_folder: "question_banks".to_string(),
            output_dir: "generated".to_string(),
            images_dir: "generated/images".to_string(),
            fetch_timeout_secs: 20,
            verbose_logging: false,
            github_api_base_url: "https://api.github.com".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bank_folder: std::env::var("BANK_FOLDER").unwrap_or(default.bank_folder),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            images_dir: std::env::var("IMAGES_DIR").unwrap_or(default.images_dir),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fetch_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            github_api_base_url: std::env::var("GITHUB_API_BASE_URL").unwrap_or(default.github_api_base_url),
        }
    }
}
