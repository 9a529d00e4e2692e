use actix_web::{web, HttpResponse, Responder};

use crate::weather::WeatherSettings;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/weather").route(web::get().to(get_weather)));
}

/// Current weather for the configured city. Provider errors are reported in
/// the body with a 200 status.
async fn get_weather(state: web::Data<AppState>) -> impl Responder {
    let settings = WeatherSettings::load(&state.config.config_path());
    let report = state.weather.current_weather(&settings).await;
    HttpResponse::Ok().json(report)
}
