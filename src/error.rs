use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 题目数据校验错误
    Validation(ValidationError),
    /// Git 操作错误
    Git(GitError),
    /// API 调用错误
    Api(ApiError),
    /// 文件操作错误
    File(FileError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "data validation error: {}", e),
            AppError::Git(e) => write!(f, "git error: {}", e),
            AppError::Api(e) => write!(f, "API error: {}", e),
            AppError::File(e) => write!(f, "file error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            AppError::Git(e) => Some(e),
            AppError::Api(e) => Some(e),
            AppError::File(e) => Some(e),
        }
    }
}

/// 题目数据校验错误
///
/// 在加载题库时立即触发，避免把坏数据渲染成错误的文档
#[derive(Debug)]
pub enum ValidationError {
    /// 答案不在选项列表中
    AnswerNotInOptions {
        title: String,
        answer: String,
    },
    /// 选项数量不足
    TooFewOptions {
        title: String,
        count: usize,
    },
    /// 题号无效（必须 >= 1）
    InvalidOrder {
        title: String,
    },
    /// 表格行长度不一致
    UnevenTableRows {
        title: String,
        expected: usize,
        found: usize,
    },
    /// 选项配图映射指向不存在的选项
    UnknownOptionDiagram {
        title: String,
        key: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::AnswerNotInOptions { title, answer } => {
                write!(f, "question '{}': answer '{}' is not one of the options", title, answer)
            }
            ValidationError::TooFewOptions { title, count } => {
                write!(f, "question '{}': needs at least 2 options, found {}", title, count)
            }
            ValidationError::InvalidOrder { title } => {
                write!(f, "question '{}': order must be >= 1", title)
            }
            ValidationError::UnevenTableRows { title, expected, found } => {
                write!(
                    f,
                    "question '{}': table rows must have equal length (expected {}, found {})",
                    title, expected, found
                )
            }
            ValidationError::UnknownOptionDiagram { title, key } => {
                write!(f, "question '{}': option diagram key '{}' names no option", title, key)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Git 操作错误
#[derive(Debug)]
pub enum GitError {
    /// git 命令执行失败
    CommandFailed {
        command: String,
        stderr: String,
    },
    /// 无法从远程 URL 解析 token / owner / repo
    RemoteParseFailed {
        url: String,
    },
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::CommandFailed { command, stderr } => {
                write!(f, "git command failed ({}): {}", command, stderr.trim())
            }
            GitError::RemoteParseFailed { url } => {
                write!(f, "could not parse token from remote URL: {}", url)
            }
        }
    }
}

impl std::error::Error for GitError {}

/// API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// API 返回错误响应
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// API 响应缺少预期字段
    MissingField {
        endpoint: String,
        field: String,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadResponse { endpoint, status, message } => {
                write!(
                    f,
                    "API returned error response ({}): status={}, message={:?}",
                    endpoint, status, message
                )
            }
            ApiError::MissingField { endpoint, field } => {
                write!(f, "API response missing field '{}' ({})", field, endpoint)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 目录不存在
    DirectoryNotFound {
        path: String,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::DirectoryNotFound { path } => write!(f, "directory not found: {}", path),
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML parse failed ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<GitError> for AppError {
    fn from(err: GitError) -> Self {
        AppError::Git(err)
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::File(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建 git 命令失败错误
    pub fn git_command_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        AppError::Git(GitError::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        })
    }

    /// 创建 API 错误响应错误
    pub fn api_bad_response(endpoint: impl Into<String>, status: u16, message: Option<String>) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            message,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
