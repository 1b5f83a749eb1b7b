pub mod quote;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    quote::config(cfg);
}
