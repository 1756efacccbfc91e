//! NoteStore：标题 → 内容 的持久化映射
//!
//! 每个操作都是一次完整的 "读出 → 修改 → 写回"，不跨调用缓存任何状态，
//! 因此多个 `NoteStore` 实例（或进程）看到的永远是介质上的最新内容。
//!
//! 持久化格式为扁平 JSON 对象，键顺序即插入顺序：
//!
//! ```json
//! {
//!   "shopping": "eggs and milk",
//!   "ideas": "write a note app"
//! }
//! ```
//!
//! 不做任何加锁：并发写入时后写者覆盖先写者。

use super::backend::{FileBackend, NoteBackend};
use super::status::NoteStatus;
use crate::error::{Result, StoreError};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

type NoteMap = Map<String, Value>;

/// 笔记存储
pub struct NoteStore {
    backend: Arc<dyn NoteBackend>,
}

impl NoteStore {
    pub fn new(backend: Arc<dyn NoteBackend>) -> Self {
        Self { backend }
    }

    /// 以 JSON 文件为介质打开 store（文件不必存在）
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(Arc::new(FileBackend::new(path)))
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// 新增笔记；标题已存在时返回 [`NoteStatus::AlreadyExists`] 且不写入
    pub async fn add(&self, title: &str, content: &str) -> Result<NoteStatus> {
        if title.is_empty() {
            return Err(StoreError::EmptyTitle.into());
        }
        let mut notes = self.load().await?;
        if notes.contains_key(title) {
            debug!(title = %title, "标题冲突，跳过写入");
            return Ok(NoteStatus::AlreadyExists {
                title: title.to_string(),
            });
        }
        notes.insert(title.to_string(), Value::String(content.to_string()));
        self.save(&notes).await?;
        info!(title = %title, total = notes.len(), "📝 笔记已保存");
        Ok(NoteStatus::Saved {
            title: title.to_string(),
        })
    }

    /// 列出全部标题（插入顺序）
    pub async fn list(&self) -> Result<NoteStatus> {
        let notes = self.load().await?;
        if notes.is_empty() {
            return Ok(NoteStatus::Empty);
        }
        Ok(NoteStatus::Listing {
            titles: notes.keys().cloned().collect(),
        })
    }

    /// 读取单条笔记的完整内容
    pub async fn read(&self, title: &str) -> Result<NoteStatus> {
        let notes = self.load().await?;
        match notes.get(title).and_then(Value::as_str) {
            Some(content) => Ok(NoteStatus::Content {
                title: title.to_string(),
                content: content.to_string(),
            }),
            None => Ok(not_found(title, &notes)),
        }
    }

    /// 删除笔记；不存在时返回与 [`read`](Self::read) 相同格式的未找到结果
    pub async fn delete(&self, title: &str) -> Result<NoteStatus> {
        let mut notes = self.load().await?;
        if notes.shift_remove(title).is_none() {
            return Ok(not_found(title, &notes));
        }
        self.save(&notes).await?;
        info!(title = %title, remaining = notes.len(), "🗑️ 笔记已删除");
        Ok(NoteStatus::Deleted {
            title: title.to_string(),
        })
    }

    /// 当前全部标题（插入顺序）
    pub async fn titles(&self) -> Result<Vec<String>> {
        Ok(self.load().await?.keys().cloned().collect())
    }

    /// 只读的可用性探测：返回笔记条数
    ///
    /// 与普通操作不同，介质不存在时不会创建它。
    pub async fn probe(&self) -> Result<usize> {
        match self.backend.read().await? {
            None => Ok(0),
            Some(raw) => Ok(self.parse(&raw)?.len()),
        }
    }

    async fn load(&self) -> Result<NoteMap> {
        let Some(raw) = self.backend.read().await? else {
            let notes = NoteMap::new();
            self.save(&notes).await?;
            debug!(location = %self.location(), "初始化空笔记库");
            return Ok(notes);
        };
        self.parse(&raw)
    }

    fn parse(&self, raw: &str) -> Result<NoteMap> {
        if raw.trim().is_empty() {
            return Ok(NoteMap::new());
        }
        let malformed = |message: String| StoreError::Malformed {
            location: self.location(),
            message,
        };
        let notes = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(malformed("top-level value is not an object".into()).into()),
            Err(e) => return Err(malformed(e.to_string()).into()),
        };
        if let Some((title, _)) = notes.iter().find(|(_, v)| !v.is_string()) {
            return Err(malformed(format!("content of '{}' is not a string", title)).into());
        }
        debug!(location = %self.location(), notes = notes.len(), "笔记库已加载");
        Ok(notes)
    }

    async fn save(&self, notes: &NoteMap) -> Result<()> {
        let json = serde_json::to_string_pretty(notes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.write(&json).await
    }
}

fn not_found(title: &str, notes: &NoteMap) -> NoteStatus {
    NoteStatus::NotFound {
        title: title.to_string(),
        available: notes.keys().cloned().collect(),
    }
}
