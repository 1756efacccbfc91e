//! 测试基础设施
//!
//! | 类型 | 用途 |
//! |------|------|
//! | [`MockBackend`] | 替代真实文件，可注入读写失败并统计读写次数 |

pub mod mock_backend;

pub use mock_backend::MockBackend;
