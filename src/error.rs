//! 错误类型
//!
//! 服务端错误在请求内恢复并映射为 HTTP 状态码和错误响应；
//! 客户端错误直接向上传播，由入口终止进程。

use std::time::Duration;

use actix_web::http::StatusCode;
use thiserror::Error;

use crate::models::ErrorEnvelope;

/// 存储层错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 写入在期限内未完成
    #[error("database write timed out after {0:?}")]
    Timeout(Duration),

    /// 打开数据库失败
    #[error("database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    /// SQL 执行失败
    #[error("database query failed: {0}")]
    Database(#[from] diesel::result::Error),

    /// 后台写入任务异常退出，或连接锁已被污染
    #[error("database task failed: {0}")]
    Task(String),
}

/// 服务端请求处理错误
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid HTTP Method")]
    MethodNotAllowed,

    /// 上游请求在期限内未完成
    #[error("upstream request timed out after {0:?}")]
    UpstreamTimeout(Duration),

    #[error("upstream request failed: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    /// 上游返回非 2xx 状态
    #[error("upstream responded with status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("failed to decode upstream payload: {0}")]
    Decode(String),

    #[error("failed to persist quote: {0}")]
    Persist(#[from] StorageError),
}

impl ServerError {
    /// 错误对应的 HTTP 状态码
    ///
    /// 方法错误沿用 404，其余一律 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MethodNotAllowed => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::error(self)
    }
}

/// 客户端错误，任何一种都会终止整个运行
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to quote server failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request to quote server timed out after {0:?}")]
    Timeout(Duration),

    /// 服务端返回了错误响应
    #[error("quote server responded with status {status}: {message}")]
    Server { status: u16, message: String },

    #[error("failed to decode quote server response: {0}")]
    Decode(String),

    #[error("failed to write quote file: {0}")]
    FileWrite(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ServerError::MethodNotAllowed.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServerError::UpstreamTimeout(Duration::from_millis(200)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Decode("eof".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Persist(StorageError::Timeout(Duration::from_millis(100))).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_carries_cause() {
        let envelope = ServerError::UpstreamTimeout(Duration::from_millis(200)).envelope();
        assert_eq!(envelope.message, "Error: upstream request timed out after 200ms");

        let envelope = ServerError::MethodNotAllowed.envelope();
        assert_eq!(envelope.message, "Error: Invalid HTTP Method");
    }
}
