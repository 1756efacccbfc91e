//! 笔记工具：add_note / list_notes / read_note / delete_note
//!
//! | 工具          | 对应 NoteStore 操作        |
//! |---------------|---------------------------|
//! | `add_note`    | `store.add(title, content)` |
//! | `list_notes`  | `store.list()`              |
//! | `read_note`   | `store.read(title)`         |
//! | `delete_note` | `store.delete(title)`       |
//!
//! 冲突、未找到、空库都作为成功的 [`ToolResult`] 返回，输出即 [`NoteStatus`] 文本。

use crate::error::ToolError;
use crate::notes::{NoteStatus, NoteStore};
use crate::tools::{Tool, ToolParameters, ToolResult};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// 取出必填的字符串参数
fn required_str<'a>(parameters: &'a ToolParameters, name: &str) -> Result<&'a str, ToolError> {
    match parameters.get(name) {
        None | Some(Value::Null) => Err(ToolError::MissingParameter(name.to_string())),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ToolError::InvalidParameter {
            name: name.to_string(),
            message: format!("expected a string, got {}", other),
        }),
    }
}

fn status_result(tool: &str, status: NoteStatus) -> ToolResult {
    if status.is_negative() {
        warn!(tool = %tool, status = %status, "笔记操作返回否定结果");
    }
    ToolResult::success(status.to_string())
}

fn title_schema() -> Value {
    json!({
        "type": "string",
        "description": "The exact title of the note"
    })
}

/// 构建全部四个笔记工具，共享同一个 store
pub fn note_tools(store: Arc<NoteStore>) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(AddNoteTool::new(store.clone())),
        Box::new(ListNotesTool::new(store.clone())),
        Box::new(ReadNoteTool::new(store.clone())),
        Box::new(DeleteNoteTool::new(store)),
    ]
}

// ── AddNoteTool ──────────────────────────────────────────────────────────────

pub struct AddNoteTool {
    pub store: Arc<NoteStore>,
}

impl AddNoteTool {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl Tool for AddNoteTool {
    fn name(&self) -> &str {
        "add_note"
    }

    fn description(&self) -> &str {
        "Add a new note with a title and content."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": title_schema(),
                "content": {
                    "type": "string",
                    "description": "The body of the note, may be empty"
                }
            },
            "required": ["title", "content"]
        })
    }

    async fn execute(&self, parameters: ToolParameters) -> crate::error::Result<ToolResult> {
        let title = required_str(&parameters, "title")?;
        let content = required_str(&parameters, "content")?;

        debug!(title = %title, bytes = content.len(), "add_note 工具写入");

        let status = self.store.add(title, content).await?;
        Ok(status_result(self.name(), status))
    }
}

// ── ListNotesTool ────────────────────────────────────────────────────────────

pub struct ListNotesTool {
    pub store: Arc<NoteStore>,
}

impl ListNotesTool {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl Tool for ListNotesTool {
    fn name(&self) -> &str {
        "list_notes"
    }

    fn description(&self) -> &str {
        "List all available note titles."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _parameters: ToolParameters) -> crate::error::Result<ToolResult> {
        let status = self.store.list().await?;
        Ok(status_result(self.name(), status))
    }
}

// ── ReadNoteTool ─────────────────────────────────────────────────────────────

pub struct ReadNoteTool {
    pub store: Arc<NoteStore>,
}

impl ReadNoteTool {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl Tool for ReadNoteTool {
    fn name(&self) -> &str {
        "read_note"
    }

    fn description(&self) -> &str {
        "Read the full content of a note by its title."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "title": title_schema() },
            "required": ["title"]
        })
    }

    async fn execute(&self, parameters: ToolParameters) -> crate::error::Result<ToolResult> {
        let title = required_str(&parameters, "title")?;
        let status = self.store.read(title).await?;
        Ok(status_result(self.name(), status))
    }
}

// ── DeleteNoteTool ───────────────────────────────────────────────────────────

pub struct DeleteNoteTool {
    pub store: Arc<NoteStore>,
}

impl DeleteNoteTool {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteNoteTool {
    fn name(&self) -> &str {
        "delete_note"
    }

    fn description(&self) -> &str {
        "Delete a note by its title."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "title": title_schema() },
            "required": ["title"]
        })
    }

    async fn execute(&self, parameters: ToolParameters) -> crate::error::Result<ToolResult> {
        let title = required_str(&parameters, "title")?;
        let status = self.store.delete(title).await?;
        Ok(status_result(self.name(), status))
    }
}
