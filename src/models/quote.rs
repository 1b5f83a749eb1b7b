//! 汇率报价模型
//!
//! 上游接口把数值都以字符串返回，这里原样保留，不做数值解析

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 上游返回的完整报价
///
/// 缺失的字段解码为空字符串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    /// 基础货币代码，如 USD
    pub code: String,
    /// 计价货币代码，如 BRL
    pub codein: String,
    /// 货币对名称
    pub name: String,
    /// 最高价
    pub high: String,
    /// 最低价
    pub low: String,
    /// 涨跌额
    #[serde(rename = "varBid")]
    pub var_bid: String,
    /// 涨跌幅
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    /// 买入价
    pub bid: String,
    /// 卖出价
    pub ask: String,
    /// 时间戳
    pub timestamp: String,
    /// 创建时间
    pub create_date: String,
}

/// 上游响应外层结构：`{ "USDBRL": { ... } }`
pub type QuotePayload = HashMap<String, Quote>;

/// 返回给客户端的精简报价，只包含买入价
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub bid: String,
}

impl From<&Quote> for QuoteSummary {
    fn from(quote: &Quote) -> Self {
        Self {
            bid: quote.bid.clone(),
        }
    }
}
