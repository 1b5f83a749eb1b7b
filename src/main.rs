//! 报价服务端
//!
//! 提供 GET /quote（兼容 /cotacao），数据来源：awesomeapi 汇率接口

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use quote_relay::config::AppConfig;
use quote_relay::handlers;
use quote_relay::services::QuoteService;

/// 应用程序入口
///
/// 默认监听 0.0.0.0:8080
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先于配置文件；配置加载失败时按 info 输出
    let level = match &loaded {
        Ok(loaded) => loaded.config.log.level.clone(),
        Err(_) => "info".to_string(),
    };
    env_logger::init_from_env(Env::default().default_filter_or(level));

    let loaded = loaded.map_err(|e| {
        log::error!("{:#}", e);
        e
    })?;
    loaded.report();
    let config = loaded.config;

    let service = web::Data::new(QuoteService::from_config(&config)?);

    log::info!("启动报价服务，监听 {}", config.bind_addr());

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // 添加请求日志中间件
            .app_data(service.clone())
            .configure(handlers::config) // 配置路由
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.bind_addr())?.run().await?;
    Ok(())
}
