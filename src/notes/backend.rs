//! 笔记存储介质
//!
//! [`NoteStore`](super::NoteStore) 只关心"整份读出 / 整份写回"的字节容器，
//! 具体介质由 [`NoteBackend`] 实现：
//!
//! - [`FileBackend`]：UTF-8 JSON 文件，生产使用
//! - [`InMemoryBackend`]：进程内存，适合测试和临时会话

use crate::error::{Result, StoreError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// 可整体读写的持久化容器
#[async_trait]
pub trait NoteBackend: Send + Sync {
    /// 读出全部内容；介质尚不存在时返回 `None`
    async fn read(&self) -> Result<Option<String>>;

    /// 用 `contents` 整体覆盖介质
    async fn write(&self, contents: &str) -> Result<()>;

    /// 介质位置的可读描述，用于日志和健康检查输出
    fn location(&self) -> String;
}

// ── FileBackend ───────────────────────────────────────────────────────────────

/// 基于单个 JSON 文件的介质
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: expand_tilde(path.as_ref()),
        }
    }

    fn unavailable(&self, e: std::io::Error) -> StoreError {
        StoreError::Unavailable {
            location: self.location(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl NoteBackend for FileBackend {
    async fn read(&self) -> Result<Option<String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "📖 读取笔记文件");
                // 能读出来但不是 UTF-8 属于内容损坏，而非介质不可用
                let raw = String::from_utf8(bytes).map_err(|e| StoreError::Malformed {
                    location: self.location(),
                    message: e.to_string(),
                })?;
                Ok(Some(raw))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.unavailable(e).into()),
        }
    }

    async fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.unavailable(e))?;
        }
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| self.unavailable(e))?;
        debug!(path = %self.path.display(), bytes = contents.len(), "💾 笔记文件已写入");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ── InMemoryBackend ───────────────────────────────────────────────────────────

/// 进程内存介质，不落盘
pub struct InMemoryBackend {
    contents: RwLock<Option<String>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// 空介质（相当于文件不存在）
    pub fn new() -> Self {
        Self {
            contents: RwLock::new(None),
        }
    }

    /// 以给定内容初始化
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RwLock::new(Some(contents.into())),
        }
    }

    /// 当前原始内容快照
    pub async fn snapshot(&self) -> Option<String> {
        self.contents.read().await.clone()
    }
}

#[async_trait]
impl NoteBackend for InMemoryBackend {
    async fn read(&self) -> Result<Option<String>> {
        Ok(self.contents.read().await.clone())
    }

    async fn write(&self, contents: &str) -> Result<()> {
        *self.contents.write().await = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if s.starts_with("~/")
        && let Some(home) = std::env::var("HOME")
            .ok()
            .or_else(|| std::env::var("USERPROFILE").ok())
    {
        return PathBuf::from(home).join(&s[2..]);
    }
    path.to_path_buf()
}
