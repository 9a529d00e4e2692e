//! Reminder endpoints under `/api/reminders`

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::{DashboardError, DashboardResult};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/reminders")
            .route("", web::get().to(list_reminders))
            .route("", web::post().to(add_reminder))
            .route("/{id}", web::delete().to(delete_reminder))
            .route("/{id}/toggle", web::post().to(toggle_reminder)),
    );
}

#[derive(Debug, Deserialize)]
struct AddReminderRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default, rename = "type")]
    reminder_type: Option<String>,
}

async fn list_reminders(state: web::Data<AppState>) -> DashboardResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.reminders.list()?))
}

async fn add_reminder(
    state: web::Data<AppState>,
    body: web::Json<AddReminderRequest>,
) -> DashboardResult<HttpResponse> {
    let request = body.into_inner();
    let reminder = state.reminders.add(
        request.title.as_deref().unwrap_or_default(),
        request.due_date.as_deref().unwrap_or_default(),
        request.reminder_type.as_deref(),
    )?;
    Ok(HttpResponse::Created().json(reminder))
}

async fn delete_reminder(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> DashboardResult<HttpResponse> {
    if state.reminders.remove(&path)? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(DashboardError::not_found("Reminder not found"))
    }
}

async fn toggle_reminder(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> DashboardResult<HttpResponse> {
    match state.reminders.toggle(&path)? {
        Some(reminder) => Ok(HttpResponse::Ok().json(reminder)),
        None => Err(DashboardError::not_found("Reminder not found")),
    }
}
