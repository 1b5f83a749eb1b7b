//! 报价客户端
//!
//! 请求报价服务，把买入价写入本地文件；任何失败都以非零状态退出，不写文件。

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use env_logger::Env;

use quote_relay::client::{self, QuoteClient, DEFAULT_LABEL, DEFAULT_OUTPUT, DEFAULT_TIMEOUT_MS, DEFAULT_URL};

/// Quote Client - 获取美元兑雷亚尔买入价并写入文件
#[derive(Parser, Debug)]
#[command(name = "quote-client", version, about)]
struct Args {
    /// 报价服务地址
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// 输出文件，每次运行覆盖
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// 货币对显示名称
    #[arg(long, default_value = DEFAULT_LABEL)]
    label: String,

    /// 整体请求期限（毫秒）
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    // 日志通过 RUST_LOG 控制
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();
    let quote_client = QuoteClient::new(args.url, Duration::from_millis(args.timeout_ms));

    match client::run(&quote_client, &args.output, &args.label).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
