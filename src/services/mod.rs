//! 业务逻辑服务模块
//!
//! 封装上游获取、存储和请求流程

pub mod quote_service; // 报价请求流程
pub mod storage;       // 报价存储
pub mod upstream;      // 上游报价接口

pub use quote_service::QuoteService;
pub use storage::{QuoteStore, SqliteQuoteStore};
pub use upstream::UpstreamClient;
