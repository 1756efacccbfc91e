//! 笔记存储
//!
//! | 组件 | 作用 |
//! |------|------|
//! | [`NoteStore`] | 新增 / 列出 / 读取 / 删除，每次调用都是一次完整的读改写 |
//! | [`NoteBackend`] | 整体读写的持久化介质（[`FileBackend`] / [`InMemoryBackend`]） |
//! | [`NoteStatus`] | 操作的业务结果，`Display` 即面向用户的文本 |
//!
//! ```rust,no_run
//! use notes_agent::notes::NoteStore;
//!
//! # async fn example() -> notes_agent::error::Result<()> {
//! let store = NoteStore::open("~/.notes-agent/notes.json");
//! println!("{}", store.add("shopping", "eggs and milk").await?);
//! println!("{}", store.list().await?);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod status;
pub mod store;

pub use backend::{FileBackend, InMemoryBackend, NoteBackend};
pub use status::NoteStatus;
pub use store::NoteStore;
