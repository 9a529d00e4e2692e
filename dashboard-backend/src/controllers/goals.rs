//! Daily goal endpoints under `/api/goals`

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::{DashboardError, DashboardResult};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/goals")
            .route("", web::get().to(get_goals))
            .route("", web::post().to(add_goal))
            .route("/stats", web::get().to(get_goal_stats))
            .route("/{id}/toggle", web::post().to(toggle_goal)),
    );
}

#[derive(Debug, Deserialize)]
struct AddGoalRequest {
    #[serde(default)]
    text: Option<String>,
}

async fn get_goals(state: web::Data<AppState>) -> DashboardResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.goals.get()?))
}

async fn add_goal(
    state: web::Data<AppState>,
    body: web::Json<AddGoalRequest>,
) -> DashboardResult<HttpResponse> {
    let goal = state
        .goals
        .add(body.text.as_deref().unwrap_or_default())?;
    Ok(HttpResponse::Created().json(goal))
}

async fn toggle_goal(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> DashboardResult<HttpResponse> {
    if state.goals.toggle(path.into_inner())? {
        Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
    } else {
        Err(DashboardError::not_found("Goal not found"))
    }
}

async fn get_goal_stats(state: web::Data<AppState>) -> DashboardResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.goals.stats()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::FixedClock;
    use crate::controllers::test_support;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_goals_capacity_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(test_support::state(dir.path()))
                .configure(config),
        )
        .await;

        for (i, text) in ["Read", "Run", "Code"].iter().enumerate() {
            let req = test::TestRequest::post()
                .uri("/api/goals")
                .set_json(json!({ "text": text }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let goal: Value = test::read_body_json(resp).await;
            assert_eq!(goal["id"], i + 1);
        }

        let req = test::TestRequest::post()
            .uri("/api/goals")
            .set_json(json!({"text": "One too many"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post().uri("/api/goals/2/toggle").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"success": true}));

        let req = test::TestRequest::post().uri("/api/goals/9/toggle").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/goals/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats, json!({"total": 3, "completed": 1, "percentage": 33.3}));

        let req = test::TestRequest::get().uri("/api/goals").to_request();
        let day: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(day["date"], "2025-03-10");
        assert_eq!(day["goals"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_goals_roll_over_at_midnight() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(FixedClock::ymd(2025, 3, 10));
        let state = test_support::state_with(
            dir.path(),
            clock.clone(),
            test_support::CountingTransport::new(500, json!({})),
        );
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/goals")
            .set_json(json!({"text": "Read"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        clock.set(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());

        let req = test::TestRequest::get().uri("/api/goals").to_request();
        let day: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(day, json!({"date": "2025-03-11", "goals": []}));

        let req = test::TestRequest::get().uri("/api/goals/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats, json!({"total": 0, "completed": 0, "percentage": 0.0}));
    }

    #[actix_web::test]
    async fn test_add_goal_requires_text() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(test_support::state(dir.path()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/goals")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
