//! Mock 存储介质，用于在不落盘的情况下测试 [`NoteStore`] 的读写行为。
//!
//! # 典型用途
//! - 断言只读操作从不写回介质
//! - 注入读/写失败，验证环境故障会向上传播而不是被吞掉
//!
//! # 示例
//!
//! ```rust
//! use notes_agent::notes::NoteStore;
//! use notes_agent::testing::MockBackend;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let backend = Arc::new(MockBackend::new().with_contents(r#"{"a": "1"}"#));
//! let store = NoteStore::new(backend.clone());
//!
//! store.list().await.unwrap();
//! assert_eq!(backend.read_count(), 1);
//! assert_eq!(backend.write_count(), 0);
//! # }
//! ```
//!
//! [`NoteStore`]: crate::notes::NoteStore

use crate::error::{Result, StoreError};
use crate::notes::NoteBackend;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 可脚本化的 Mock 介质
///
/// 未注入失败时行为与 [`InMemoryBackend`](crate::notes::InMemoryBackend) 一致，
/// 并额外记录读写次数和每次写入的内容。
pub struct MockBackend {
    contents: Arc<Mutex<Option<String>>>,
    read_error: Option<String>,
    write_error: Option<String>,
    reads: AtomicUsize,
    /// 每次成功写入的内容，按顺序记录
    writes: Arc<Mutex<Vec<String>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// 空介质（相当于文件不存在）
    pub fn new() -> Self {
        Self {
            contents: Arc::new(Mutex::new(None)),
            read_error: None,
            write_error: None,
            reads: AtomicUsize::new(0),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 预置介质内容
    pub fn with_contents(self, contents: impl Into<String>) -> Self {
        *self.contents.lock().unwrap() = Some(contents.into());
        self
    }

    /// 之后所有读取都返回 [`StoreError::Unavailable`]
    pub fn with_read_error(mut self, message: impl Into<String>) -> Self {
        self.read_error = Some(message.into());
        self
    }

    /// 之后所有写入都返回 [`StoreError::Unavailable`]，介质内容保持不变
    pub fn with_write_error(mut self, message: impl Into<String>) -> Self {
        self.write_error = Some(message.into());
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    /// 最近一次写入的内容
    pub fn last_write(&self) -> Option<String> {
        self.writes.lock().unwrap().last().cloned()
    }

    /// 当前介质内容
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    fn unavailable(&self, message: &str) -> StoreError {
        StoreError::Unavailable {
            location: self.location(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl NoteBackend for MockBackend {
    async fn read(&self) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.read_error {
            return Err(self.unavailable(message).into());
        }
        Ok(self.contents())
    }

    async fn write(&self, contents: &str) -> Result<()> {
        if let Some(message) = &self.write_error {
            return Err(self.unavailable(message).into());
        }
        *self.contents.lock().unwrap() = Some(contents.to_string());
        self.writes.lock().unwrap().push(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "mock".to_string()
    }
}
