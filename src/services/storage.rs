//! 报价存储
//!
//! 只写不读：每次成功获取的报价插入一行，不更新也不删除。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::SqliteConnection;

use crate::error::StorageError;
use crate::models::Quote;

diesel::table! {
    quotes (id) {
        id -> Nullable<Integer>,
        code -> Text,
        codein -> Text,
        name -> Text,
        high -> Text,
        low -> Text,
        var_bid -> Text,
        pct_change -> Text,
        bid -> Text,
        ask -> Text,
        timestamp -> Text,
        create_date -> Text,
        saved_at -> Text,
    }
}

const CREATE_QUOTES_TABLE: &str = "CREATE TABLE IF NOT EXISTS quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL,
    codein TEXT NOT NULL,
    name TEXT NOT NULL,
    high TEXT NOT NULL,
    low TEXT NOT NULL,
    var_bid TEXT NOT NULL,
    pct_change TEXT NOT NULL,
    bid TEXT NOT NULL,
    ask TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    create_date TEXT NOT NULL,
    saved_at TEXT NOT NULL
)";

#[derive(Insertable)]
#[diesel(table_name = quotes)]
struct NewQuoteRow<'a> {
    code: &'a str,
    codein: &'a str,
    name: &'a str,
    high: &'a str,
    low: &'a str,
    var_bid: &'a str,
    pct_change: &'a str,
    bid: &'a str,
    ask: &'a str,
    timestamp: &'a str,
    create_date: &'a str,
    saved_at: String,
}

impl<'a> From<&'a Quote> for NewQuoteRow<'a> {
    fn from(quote: &'a Quote) -> Self {
        Self {
            code: &quote.code,
            codein: &quote.codein,
            name: &quote.name,
            high: &quote.high,
            low: &quote.low,
            var_bid: &quote.var_bid,
            pct_change: &quote.pct_change,
            bid: &quote.bid,
            ask: &quote.ask,
            timestamp: &quote.timestamp,
            create_date: &quote.create_date,
            saved_at: Utc::now().to_rfc3339(),
        }
    }
}

/// 报价存储接口
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// 插入一条报价记录
    async fn insert(&self, quote: &Quote) -> Result<(), StorageError>;
}

/// 基于 SQLite 的报价存储
///
/// 连接放在互斥锁中，写入在阻塞线程池上执行
pub struct SqliteQuoteStore {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqliteQuoteStore {
    /// 打开数据库并确保表存在
    ///
    /// `:memory:` 表示进程内数据库，进程退出后数据丢失
    pub fn open(database_url: &str) -> Result<Self, StorageError> {
        let mut conn = SqliteConnection::establish(database_url)?;
        sql_query(CREATE_QUOTES_TABLE).execute(&mut conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    #[cfg(test)]
    fn count(&self) -> Result<i64, StorageError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Task(e.to_string()))?;
        Ok(quotes::table.count().get_result(&mut *conn)?)
    }
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn insert(&self, quote: &Quote) -> Result<(), StorageError> {
        let conn = Arc::clone(&self.conn);
        let quote = quote.clone();

        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            let mut conn = conn.lock().map_err(|e| StorageError::Task(e.to_string()))?;
            diesel::insert_into(quotes::table)
                .values(NewQuoteRow::from(&quote))
                .execute(&mut *conn)?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quote(bid: &str) -> Quote {
        Quote {
            code: "USD".to_string(),
            codein: "BRL".to_string(),
            bid: bid.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_appends_rows() {
        let store = SqliteQuoteStore::open(":memory:").unwrap();

        store.insert(&sample_quote("5.43")).await.unwrap();
        store.insert(&sample_quote("5.44")).await.unwrap();

        assert_eq!(store.count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_reopen_file_database_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.db");
        let url = path.to_str().unwrap();

        SqliteQuoteStore::open(url)
            .unwrap()
            .insert(&sample_quote("5.43"))
            .await
            .unwrap();

        let store = SqliteQuoteStore::open(url).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_open_invalid_path() {
        let result = SqliteQuoteStore::open("/nonexistent-dir/quotes.db");
        assert!(result.is_err());
    }
}
