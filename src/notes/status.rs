use serde::{Deserialize, Serialize};
use std::fmt;

/// 笔记操作的业务结果
///
/// 冲突、未找到、空库都是正常返回值而不是错误，调用方（通常是 Agent）
/// 可以直接把 [`Display`](fmt::Display) 文本作为对话回复展示给用户。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoteStatus {
    /// 新笔记已保存
    Saved { title: String },
    /// 同名笔记已存在，未做任何修改
    AlreadyExists { title: String },
    /// 库中没有任何笔记
    Empty,
    /// 全部标题，按插入顺序
    Listing { titles: Vec<String> },
    /// 单条笔记的完整内容
    Content { title: String, content: String },
    /// 笔记不存在，附带当前全部可用标题
    NotFound {
        title: String,
        available: Vec<String>,
    },
    /// 笔记已删除
    Deleted { title: String },
}

impl NoteStatus {
    /// 是否为"否定"结果（冲突 / 未找到 / 空库）
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            NoteStatus::AlreadyExists { .. } | NoteStatus::NotFound { .. } | NoteStatus::Empty
        )
    }
}

impl fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteStatus::Saved { title } => write!(f, "✅ Note '{}' saved successfully.", title),
            NoteStatus::AlreadyExists { title } => write!(
                f,
                "⚠️ A note with title '{}' already exists. \
                 Use a different title or delete the existing one first.",
                title
            ),
            NoteStatus::Empty => write!(f, "📭 No notes found. Start by adding a note!"),
            NoteStatus::Listing { titles } => {
                write!(f, "📋 You have {} note(s):", titles.len())?;
                for title in titles {
                    write!(f, "\n- {}", title)?;
                }
                Ok(())
            }
            NoteStatus::Content { title, content } => write!(f, "📄 '{}':\n{}", title, content),
            NoteStatus::NotFound { title, available } => {
                let available = if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                };
                write!(
                    f,
                    "❌ Note '{}' not found. Available notes: {}",
                    title, available
                )
            }
            NoteStatus::Deleted { title } => {
                write!(f, "🗑️ Note '{}' deleted successfully.", title)
            }
        }
    }
}
