//! 报价服务
//!
//! 请求流程：获取 → 解析 → 保存 → 返回精简报价，任一步失败即结束，不重试

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{ServerError, StorageError};
use crate::models::{Quote, QuoteSummary};

use super::storage::{QuoteStore, SqliteQuoteStore};
use super::upstream::{decode_quote, UpstreamClient};

/// 报价服务
///
/// 不在请求之间缓存任何报价
pub struct QuoteService {
    upstream: UpstreamClient,
    /// 为 None 时不保存
    store: Option<Arc<dyn QuoteStore>>,
    /// 写入期限，与上游期限相互独立
    persist_timeout: Duration,
}

impl QuoteService {
    pub fn new(
        upstream: UpstreamClient,
        store: Option<Arc<dyn QuoteStore>>,
        persist_timeout: Duration,
    ) -> Self {
        Self {
            upstream,
            store,
            persist_timeout,
        }
    }

    /// 按配置创建服务，启用存储时打开数据库
    pub fn from_config(config: &AppConfig) -> Result<Self, StorageError> {
        let store: Option<Arc<dyn QuoteStore>> = if config.storage.enabled {
            let store = SqliteQuoteStore::open(&config.storage.database_url)?;
            log::info!("报价存储已启用: {}", config.storage.database_url);
            Some(Arc::new(store))
        } else {
            log::info!("报价存储未启用");
            None
        };

        Ok(Self::new(
            UpstreamClient::new(&config.upstream),
            store,
            config.storage.timeout(),
        ))
    }

    /// 获取最新报价并返回买入价
    pub async fn get_quote(&self) -> Result<QuoteSummary, ServerError> {
        let body = self.upstream.fetch_body().await?;
        let quote = decode_quote(&body, self.upstream.pair())?;

        log::info!("Obtained response from upstream: {:?}", quote);

        self.persist(&quote).await?;

        Ok(QuoteSummary::from(&quote))
    }

    async fn persist(&self, quote: &Quote) -> Result<(), ServerError> {
        let Some(store) = &self.store else {
            return Ok(());
        };

        match tokio::time::timeout(self.persist_timeout, store.insert(quote)).await {
            Ok(result) => result?,
            Err(_) => return Err(StorageError::Timeout(self.persist_timeout).into()),
        }

        log::info!("Quote saved on database: {:?}", quote);
        Ok(())
    }
}
