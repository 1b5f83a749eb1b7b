//! 报价客户端
//!
//! 向报价服务请求买入价，并把结果写入本地文件。
//! 任何一步失败都立即返回错误，失败时不会写文件。

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tempfile::NamedTempFile;

use crate::error::ClientError;
use crate::models::{ErrorEnvelope, QuoteSummary};

/// 默认服务地址
pub const DEFAULT_URL: &str = "http://localhost:8080/cotacao";
/// 默认输出文件
pub const DEFAULT_OUTPUT: &str = "cotacao.txt";
/// 货币对显示名称
pub const DEFAULT_LABEL: &str = "Dólar";
/// 默认请求期限（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 300;

pub struct QuoteClient {
    client: Client,
    url: String,
    /// 覆盖连接、传输和读取响应体的整体期限
    timeout: Duration,
}

impl QuoteClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }

    /// 请求报价服务，返回精简报价
    pub async fn fetch_summary(&self) -> Result<QuoteSummary, ClientError> {
        match tokio::time::timeout(self.timeout, self.request()).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.timeout)),
        }
    }

    async fn request(&self) -> Result<QuoteSummary, ClientError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        log::debug!("-> Body from Request: {}", String::from_utf8_lossy(&body));

        if !status.is_success() {
            // 错误响应体不是预期格式时，保留原文
            let message = match serde_json::from_slice::<ErrorEnvelope>(&body) {
                Ok(envelope) => envelope.message,
                Err(_) => String::from_utf8_lossy(&body).into_owned(),
            };
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// 输出文件内容：`<label>: <bid>`
pub fn format_quote_line(label: &str, summary: &QuoteSummary) -> String {
    format!("{}: {}", label, summary.bid)
}

/// 覆盖写入报价文件
///
/// 先写入同目录下的临时文件再替换目标，目标文件要么保持原样，要么是完整的新内容
pub fn write_quote_file(path: &Path, label: &str, summary: &QuoteSummary) -> Result<(), ClientError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(format_quote_line(label, summary).as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// 请求报价并写入文件
pub async fn run(client: &QuoteClient, output: &Path, label: &str) -> Result<QuoteSummary, ClientError> {
    let summary = client.fetch_summary().await?;
    write_quote_file(output, label, &summary)?;

    log::info!("已写入 {}: {}", output.display(), format_quote_line(label, &summary));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn summary(bid: &str) -> QuoteSummary {
        QuoteSummary { bid: bid.to_string() }
    }

    #[test]
    fn test_format_quote_line() {
        assert_eq!(format_quote_line(DEFAULT_LABEL, &summary("5.43")), "Dólar: 5.43");
    }

    #[test]
    fn test_write_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cotacao.txt");

        write_quote_file(&path, DEFAULT_LABEL, &summary("5.4300")).unwrap();
        write_quote_file(&path, DEFAULT_LABEL, &summary("5.1")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Dólar: 5.1");
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("cotacao.txt");

        let err = write_quote_file(&path, DEFAULT_LABEL, &summary("5.43")).unwrap_err();
        assert!(matches!(err, ClientError::FileWrite(_)));
    }

    #[test]
    fn test_write_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cotacao.txt");

        write_quote_file(&path, DEFAULT_LABEL, &summary("5.43")).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(entries, vec![path]);
    }

    #[test]
    fn test_failed_replace_keeps_target_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        // 目标是非空目录，替换必然失败
        let target = dir.path().join("cotacao.txt");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "Dólar: 4.99").unwrap();

        let err = write_quote_file(&target, DEFAULT_LABEL, &summary("5.43")).unwrap_err();

        assert!(matches!(err, ClientError::FileWrite(_)));
        assert_eq!(fs::read_to_string(target.join("keep")).unwrap(), "Dólar: 4.99");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(entries, vec![target]);
    }
}
