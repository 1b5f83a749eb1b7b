//! 汇率报价中转服务
//!
//! 服务端在限定期限内请求上游汇率接口，保存报价后返回买入价；
//! 客户端在自己的期限内请求服务端，并把买入价写入本地文件。

pub mod client;   // 报价客户端
pub mod config;   // 配置加载
pub mod error;    // 错误类型
pub mod handlers; // HTTP 请求处理器
pub mod models;   // 数据模型定义
pub mod services; // 业务逻辑服务
