pub mod config;
pub mod error;
pub mod health;
pub mod notes;
pub mod testing;
pub mod tools;

pub mod prelude {
    pub use crate::config::NotesConfig;
    pub use crate::error::Result;
    pub use crate::notes::{FileBackend, InMemoryBackend, NoteBackend, NoteStatus, NoteStore};
    pub use crate::tools::notes::note_tools;
    pub use crate::tools::{Tool, ToolManager, ToolParameters, ToolResult};
}
