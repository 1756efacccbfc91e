//! 存活探测
//!
//! 只读地检查笔记库是否可达，不创建、不修改介质。
//! 存储不可用或内容损坏时报告 `degraded` / `offline`，而不是返回错误。

use crate::notes::NoteStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// `ok` 或 `degraded`
    pub status: String,
    /// 笔记库状态：`online` 或 `offline`
    pub store: String,
    /// 宿主进程自身，能生成报告即为 `online`
    pub service: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl HealthReport {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

pub async fn check(store: &NoteStore) -> HealthReport {
    let location = store.location();
    match store.probe().await {
        Ok(count) => HealthReport {
            status: "ok".to_string(),
            store: "online".to_string(),
            service: "online".to_string(),
            location,
            notes: Some(count),
            detail: None,
        },
        Err(e) => {
            warn!(location = %location, error = %e, "笔记库探测失败");
            HealthReport {
                status: "degraded".to_string(),
                store: "offline".to_string(),
                service: "online".to_string(),
                location,
                notes: None,
                detail: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::InMemoryBackend;
    use crate::testing::MockBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_healthy_store() {
        let backend = Arc::new(InMemoryBackend::with_contents(r#"{"a": "1", "b": "2"}"#));
        let report = check(&NoteStore::new(backend)).await;
        assert!(report.is_ok());
        assert_eq!(report.store, "online");
        assert_eq!(report.notes, Some(2));
    }

    #[tokio::test]
    async fn test_missing_medium_is_healthy_and_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let report = check(&NoteStore::open(&path)).await;
        assert!(report.is_ok());
        assert_eq!(report.notes, Some(0));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unreadable_store_is_degraded() {
        let backend = Arc::new(MockBackend::new().with_read_error("permission denied"));
        let report = check(&NoteStore::new(backend.clone())).await;
        assert_eq!(report.status, "degraded");
        assert_eq!(report.store, "offline");
        assert_eq!(report.service, "online");
        assert!(report.detail.unwrap().contains("permission denied"));
        assert_eq!(backend.write_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_store_is_degraded() {
        let backend = Arc::new(MockBackend::new().with_contents("nope"));
        let report = check(&NoteStore::new(backend)).await;
        assert!(!report.is_ok());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("notes").is_none());
    }

    #[tokio::test]
    async fn test_invalid_utf8_file_reports_malformed_not_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, b"{\"a\": \"\xff\xfe\"}").unwrap();

        let report = check(&NoteStore::open(&path)).await;
        assert_eq!(report.status, "degraded");
        let detail = report.detail.unwrap();
        assert!(detail.contains("malformed"), "detail: {}", detail);
        assert!(!detail.contains("unavailable"), "detail: {}", detail);
    }
}
