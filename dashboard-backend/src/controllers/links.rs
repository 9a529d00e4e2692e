//! Quick link endpoints under `/api/links`

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::links::QuickLink;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/links")
            .route("", web::get().to(list_links))
            .route("", web::post().to(add_link)),
    );
}

#[derive(Debug, Deserialize)]
struct AddLinkRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

async fn list_links(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.links.list())
}

async fn add_link(
    state: web::Data<AppState>,
    body: web::Json<AddLinkRequest>,
) -> impl Responder {
    let request = body.into_inner();
    let name = request.name.unwrap_or_default();
    let url = request.url.unwrap_or_default();

    if name.trim().is_empty() || url.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Name and URL are required"
        }));
    }

    if state.links.add(&name, &url) {
        HttpResponse::Created().json(QuickLink { name, url })
    } else {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to add link"
        }))
    }
}
