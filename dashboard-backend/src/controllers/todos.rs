//! Task endpoints under `/api/todos`

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::{DashboardError, DashboardResult};
use crate::tasks::TaskUpdate;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/todos")
            .route("", web::get().to(list_todos))
            .route("", web::post().to(add_todo))
            .route("/{id}", web::put().to(update_todo))
            .route("/{id}", web::delete().to(delete_todo)),
    );
}

#[derive(Debug, Deserialize)]
struct AddTodoRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due: Option<String>,
}

async fn list_todos(state: web::Data<AppState>) -> DashboardResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.tasks.list()?))
}

async fn add_todo(
    state: web::Data<AppState>,
    body: web::Json<AddTodoRequest>,
) -> DashboardResult<HttpResponse> {
    let request = body.into_inner();
    let title = request.title.unwrap_or_default();
    let task = state
        .tasks
        .add(&title, request.priority.as_deref(), request.due)?;
    Ok(HttpResponse::Created().json(task))
}

async fn update_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<TaskUpdate>,
) -> DashboardResult<HttpResponse> {
    match state.tasks.update(&path, body.into_inner())? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(DashboardError::not_found("Task not found")),
    }
}

async fn delete_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> DashboardResult<HttpResponse> {
    if state.tasks.remove(&path)? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(DashboardError::not_found("Task not found"))
    }
}
