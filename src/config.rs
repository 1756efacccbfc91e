use crate::error::{ConfigError, Result};
use crate::tools::ToolExecutionConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_STORE_PATH: &str = "notes.json";
pub const DEFAULT_TOOL_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// 运行时配置
///
/// 优先级：命令行参数 > 环境变量（含 `.env`）> YAML 配置文件 > 默认值。
///
/// ```yaml
/// store_path: ~/.notes-agent/notes.json
/// tool_timeout_ms: 10000
/// log_filter: notes_agent=debug
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NotesConfig {
    /// 笔记 JSON 文件路径
    pub store_path: PathBuf,
    /// 单次工具调用超时（毫秒），0 = 不限制
    pub tool_timeout_ms: u64,
    /// `tracing_subscriber::EnvFilter` 语法
    pub log_filter: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            tool_timeout_ms: DEFAULT_TOOL_TIMEOUT_MS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl NotesConfig {
    pub fn load(path: &str) -> Result<Self> {
        let file =
            std::fs::File::open(path).map_err(|_| ConfigError::FileNotFound(path.to_string()))?;
        let config: NotesConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// 用环境变量覆盖：`NOTES_FILE`、`NOTES_TOOL_TIMEOUT_MS`、`NOTES_LOG`
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = var("NOTES_FILE") {
            self.store_path = PathBuf::from(path);
        }
        if let Some(raw) = var("NOTES_TOOL_TIMEOUT_MS") {
            self.tool_timeout_ms =
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidValue {
                        field: "NOTES_TOOL_TIMEOUT_MS".to_string(),
                        message: e.to_string(),
                    })?;
        }
        if let Some(filter) = var("NOTES_LOG") {
            self.log_filter = filter;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store_path".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn tool_execution(&self) -> ToolExecutionConfig {
        ToolExecutionConfig {
            timeout_ms: self.tool_timeout_ms,
        }
    }
}
