//! 上游报价接口
//!
//! 对接 https://economia.awesomeapi.com.br/json/last/USD-BRL

use std::time::Duration;

use reqwest::Client;

use crate::config::UpstreamConfig;
use crate::error::ServerError;
use crate::models::{Quote, QuotePayload};

/// 上游报价客户端
pub struct UpstreamClient {
    /// HTTP 客户端
    client: Client,
    url: String,
    /// 响应中货币对的键名，如 USDBRL
    pair: String,
    /// 单次请求期限
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.url.clone(),
            pair: config.pair.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    /// 请求上游并读取完整响应体
    ///
    /// 期限从本次调用开始计时，覆盖连接、发送和读取响应体；
    /// 超时后丢弃进行中的请求。
    pub async fn fetch_body(&self) -> Result<Vec<u8>, ServerError> {
        match tokio::time::timeout(self.timeout, self.send()).await {
            Ok(result) => result,
            Err(_) => Err(ServerError::UpstreamTimeout(self.timeout)),
        }
    }

    async fn send(&self) -> Result<Vec<u8>, ServerError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ServerError::UpstreamStatus(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// 解析上游响应 `{ "<pair>": { ... } }`
pub fn decode_quote(body: &[u8], pair: &str) -> Result<Quote, ServerError> {
    let mut payload: QuotePayload =
        serde_json::from_slice(body).map_err(|e| ServerError::Decode(e.to_string()))?;

    payload
        .remove(pair)
        .ok_or_else(|| ServerError::Decode(format!("missing field `{}`", pair)))
}
