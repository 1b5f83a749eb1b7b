#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};

use quote_relay::config::UpstreamConfig;
use quote_relay::handlers;
use quote_relay::services::{QuoteService, QuoteStore, UpstreamClient};

pub const UPSTREAM_PATH: &str = "/json/last/USD-BRL";

/// 完整的上游响应
pub fn upstream_body(bid: &str) -> String {
    format!(
        r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.4500","low":"5.4010","varBid":"-0.0012","pctChange":"-0.02","bid":"{}","ask":"5.4410","timestamp":"1700000000","create_date":"2023-11-14 19:13:20"}}}}"#,
        bid
    )
}

/// 启动一个模拟上游，延迟 `delay` 后返回固定状态码和响应体
///
/// 返回完整的请求地址
pub fn spawn_upstream(status: u16, body: String, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(move || {
        let body = body.clone();
        App::new().route(
            UPSTREAM_PATH,
            web::get().to(move || {
                let body = body.clone();
                async move {
                    tokio::time::sleep(delay).await;
                    HttpResponse::build(StatusCode::from_u16(status).unwrap())
                        .content_type("application/json")
                        .body(body)
                }
            }),
        )
    })
    .workers(1)
    .listen(listener)
    .unwrap()
    .run();

    actix_web::rt::spawn(server);
    format!("http://{}{}", addr, UPSTREAM_PATH)
}

/// 一个当前没有任何进程监听的地址
pub fn unreachable_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, path)
}

pub fn quote_service(
    upstream_url: &str,
    upstream_timeout: Duration,
    store: Option<Arc<dyn QuoteStore>>,
    persist_timeout: Duration,
) -> QuoteService {
    let config = UpstreamConfig {
        url: upstream_url.to_string(),
        timeout_ms: upstream_timeout.as_millis() as u64,
        ..Default::default()
    };
    QuoteService::new(UpstreamClient::new(&config), store, persist_timeout)
}

/// 在随机端口上启动报价服务，返回 /cotacao 地址
pub fn spawn_quote_server(service: QuoteService) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let data = web::Data::new(service);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(handlers::config)
    })
    .workers(1)
    .listen(listener)
    .unwrap()
    .run();

    actix_web::rt::spawn(server);
    format!("http://{}/cotacao", addr)
}
