//! 错误响应模型
//!
//! 任何失败都以 `{"message": "..."}` 的形式返回

use serde::{Deserialize, Serialize};

/// 错误响应结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// 错误信息
    pub message: String,
}

impl ErrorEnvelope {
    /// 创建错误响应，消息统一带 `Error: ` 前缀
    pub fn error(cause: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Error: {}", cause),
        }
    }
}
