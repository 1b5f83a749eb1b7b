//! 报价接口处理器
//!
//! - GET /quote    - 获取最新买入价
//! - GET /cotacao  - 同上，兼容旧路径
//!
//! 其他方法统一返回 404 错误响应

use actix_web::{web, HttpResponse, Result};

use crate::error::ServerError;
use crate::services::QuoteService;

/// 获取最新报价
///
/// 成功返回 `{"bid": "..."}`，失败返回 `{"message": "Error: ..."}`
pub async fn get_quote(service: web::Data<QuoteService>) -> Result<HttpResponse> {
    log::info!("Starting request ...");

    let response = match service.get_quote().await {
        Ok(summary) => {
            log::info!("Request completed successfully");
            HttpResponse::Ok().json(summary)
        }
        Err(e) => error_response(&e),
    };

    log::info!("... Request finished");
    Ok(response)
}

pub async fn method_not_allowed() -> Result<HttpResponse> {
    Ok(error_response(&ServerError::MethodNotAllowed))
}

fn error_response(err: &ServerError) -> HttpResponse {
    let envelope = err.envelope();
    log::error!("{}", envelope.message);
    HttpResponse::build(err.status_code()).json(envelope)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    for path in ["/quote", "/cotacao"] {
        cfg.service(
            web::resource(path)
                .route(web::get().to(get_quote))
                .default_service(web::to(method_not_allowed)),
        );
    }
}
