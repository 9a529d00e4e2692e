//! HTTP surface. Each module registers its own routes under `/api`.

use actix_web::{error, web, HttpResponse};

pub mod goals;
pub mod health;
pub mod links;
pub mod reminders;
pub mod todos;
pub mod weather;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::config_routes)
        .configure(todos::config)
        .configure(weather::config)
        .configure(links::config)
        .configure(goals::config)
        .configure(reminders::config);
}

/// JSON extractor config: unparseable bodies become 400 `{"error": ...}`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid JSON body: {}", err);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
        )
        .into()
    })
}
