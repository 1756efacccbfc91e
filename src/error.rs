use std::fmt;

/// 笔记服务的统一错误类型
///
/// 业务结果（笔记不存在、标题冲突、空库）不走这里，它们是 [`NoteStatus`] 的正常取值；
/// 这里只承载环境类故障：存储不可用、持久化内容损坏、参数缺失、配置错误。
///
/// [`NoteStatus`]: crate::notes::NoteStatus
#[derive(Debug)]
pub enum NotesError {
    /// 存储层错误
    Store(StoreError),
    /// 工具调用错误
    Tool(ToolError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误
    Other(String),
}

/// 存储层错误
#[derive(Debug)]
pub enum StoreError {
    /// 存储介质不可读/不可写
    Unavailable { location: String, message: String },
    /// 持久化内容非空但无法解析
    Malformed { location: String, message: String },
    /// 标题为空
    EmptyTitle,
    /// 序列化失败
    Serialization(String),
}

/// 工具执行错误
#[derive(Debug)]
pub enum ToolError {
    /// 工具未找到
    NotFound(String),
    /// 参数缺失
    MissingParameter(String),
    /// 参数类型错误
    InvalidParameter { name: String, message: String },
    /// 工具执行超时
    Timeout(String),
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),
    /// 配置解析失败
    ParseFailed(String),
    /// 配置值无效
    InvalidValue { field: String, message: String },
}

impl fmt::Display for NotesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotesError::Store(e) => write!(f, "Store Error: {}", e),
            NotesError::Tool(e) => write!(f, "Tool Error: {}", e),
            NotesError::Config(e) => write!(f, "Config Error: {}", e),
            NotesError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable { location, message } => {
                write!(f, "store '{}' unavailable: {}", location, message)
            }
            StoreError::Malformed { location, message } => {
                write!(f, "store '{}' is malformed: {}", location, message)
            }
            StoreError::EmptyTitle => write!(f, "note title must not be empty"),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::NotFound(name) => write!(f, "Tool '{}' not found", name),
            ToolError::MissingParameter(name) => write!(f, "Missing parameter: {}", name),
            ToolError::InvalidParameter { name, message } => {
                write!(f, "Invalid parameter '{}': {}", name, message)
            }
            ToolError::Timeout(name) => write!(f, "Tool '{}' timed out", name),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid config value for '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for NotesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotesError::Store(e) => Some(e),
            NotesError::Tool(e) => Some(e),
            NotesError::Config(e) => Some(e),
            NotesError::Other(_) => None,
        }
    }
}

impl std::error::Error for StoreError {}
impl std::error::Error for ToolError {}
impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for NotesError {
    fn from(err: serde_json::Error) -> Self {
        NotesError::Store(StoreError::Serialization(err.to_string()))
    }
}

impl From<serde_yaml::Error> for NotesError {
    fn from(err: serde_yaml::Error) -> Self {
        NotesError::Config(ConfigError::ParseFailed(err.to_string()))
    }
}

impl From<StoreError> for NotesError {
    fn from(err: StoreError) -> Self {
        NotesError::Store(err)
    }
}

impl From<ToolError> for NotesError {
    fn from(err: ToolError) -> Self {
        NotesError::Tool(err)
    }
}

impl From<ConfigError> for NotesError {
    fn from(err: ConfigError) -> Self {
        NotesError::Config(err)
    }
}

// 便捷的 Result 类型别名
pub type Result<T> = std::result::Result<T, NotesError>;
