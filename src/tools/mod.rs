//! 工具系统
//!
//! 定义 [`Tool`] trait 和 [`ToolManager`]（注册、执行、超时）。
//! 笔记工具位于 [`notes`]。

pub mod notes;

use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// 工具执行结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(output: String) -> Self {
        Self {
            success: true,
            output,
            error: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error),
        }
    }

    /// 面向用户的文本：成功时为输出，失败时为错误信息
    pub fn text(&self) -> &str {
        match &self.error {
            Some(err) if !self.success => err,
            _ => &self.output,
        }
    }
}

/// 工具执行配置
#[derive(Debug, Clone)]
pub struct ToolExecutionConfig {
    /// 单次工具执行超时（毫秒）。0 = 不限制。默认 30_000（30 秒）
    pub timeout_ms: u64,
}

impl Default for ToolExecutionConfig {
    fn default() -> Self {
        Self { timeout_ms: 30_000 }
    }
}

pub type ToolParameters = HashMap<String, serde_json::Value>;

/// 工具接口
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    /// 供 Agent 选择工具时参考的自然语言描述
    fn description(&self) -> &str;
    /// 工具参数的 JSON Schema 定义
    fn parameters(&self) -> serde_json::Value;
    async fn execute(&self, parameters: ToolParameters) -> Result<ToolResult>;
}

/// 对外公布的工具定义（name、描述和参数 JSON Schema）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    pub fn from_tool(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.parameters(),
        }
    }
}

pub struct ToolManager {
    tools: HashMap<String, Box<dyn Tool>>,
    config: ToolExecutionConfig,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    pub fn new() -> Self {
        Self::new_with_config(ToolExecutionConfig::default())
    }

    pub fn new_with_config(config: ToolExecutionConfig) -> Self {
        Self {
            tools: HashMap::new(),
            config,
        }
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn register_tools(&mut self, tools: Vec<Box<dyn Tool>>) {
        for tool in tools {
            self.register(tool);
        }
    }

    /// 已注册工具名，按字母序
    pub fn list_tools(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|name| name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn get_tool(&self, tool_name: &str) -> Option<&dyn Tool> {
        self.tools.get(tool_name).map(|tool| &**tool)
    }

    /// 全部工具定义，按工具名排序
    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.list_tools()
            .into_iter()
            .filter_map(|name| self.get_tool(name))
            .map(ToolDefinition::from_tool)
            .collect()
    }

    /// 执行工具，错误原样返回
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: ToolParameters,
    ) -> Result<ToolResult> {
        let tool = self
            .get_tool(tool_name)
            .ok_or_else(|| ToolError::NotFound(tool_name.to_string()))?;

        debug!(tool = %tool_name, "🔧 执行工具");

        if self.config.timeout_ms == 0 {
            return tool.execute(parameters).await;
        }
        match tokio::time::timeout(
            Duration::from_millis(self.config.timeout_ms),
            tool.execute(parameters),
        )
        .await
        {
            Ok(r) => r,
            Err(_) => Err(ToolError::Timeout(tool_name.to_string()).into()),
        }
    }

    /// 执行工具，任何错误都转成失败的 [`ToolResult`]
    ///
    /// 单次调用失败不应让宿主进程退出，错误信息以 `Error: ...` 形式回传给调用方。
    pub async fn invoke(&self, tool_name: &str, parameters: ToolParameters) -> ToolResult {
        match self.execute_tool(tool_name, parameters).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %tool_name, error = %e, "工具执行失败");
                ToolResult::error(format!("Error: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct SlowTool;

    #[async_trait::async_trait]
    impl Tool for SlowTool {
        fn name(&self) -> &str {
            "slow"
        }

        fn description(&self) -> &str {
            "sleeps for a while"
        }

        fn parameters(&self) -> serde_json::Value {
            json!({ "type": "object", "properties": {} })
        }

        async fn execute(&self, _parameters: ToolParameters) -> Result<ToolResult> {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(ToolResult::success("done".to_string()))
        }
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let manager = ToolManager::new();
        match manager.execute_tool("nope", HashMap::new()).await {
            Err(crate::error::NotesError::Tool(ToolError::NotFound(name))) => {
                assert_eq!(name, "nope")
            }
            other => panic!("未注册工具应返回 NotFound，实际: {:?}", other),
        }

        let result = manager.invoke("nope", HashMap::new()).await;
        assert!(!result.success);
        assert_eq!(result.text(), "Error: Tool Error: Tool 'nope' not found");
    }

    #[tokio::test]
    async fn test_timeout() {
        let mut manager = ToolManager::new_with_config(ToolExecutionConfig { timeout_ms: 20 });
        manager.register(Box::new(SlowTool));

        let result = manager.invoke("slow", HashMap::new()).await;
        assert!(!result.success);
        assert!(result.text().contains("timed out"));
    }

    #[tokio::test]
    async fn test_zero_timeout_means_unlimited() {
        let mut manager = ToolManager::new_with_config(ToolExecutionConfig { timeout_ms: 0 });
        manager.register(Box::new(SlowTool));

        let result = manager.invoke("slow", HashMap::new()).await;
        assert!(result.success);
        assert_eq!(result.text(), "done");
    }

    #[test]
    fn test_definition_serializes_input_schema() {
        let def = ToolDefinition::from_tool(&SlowTool);
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["name"], "slow");
        assert_eq!(json["inputSchema"]["type"], "object");
    }
}
