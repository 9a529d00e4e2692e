use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Instant;

mod clock;
mod config;
mod controllers;
mod error;
mod goals;
mod links;
mod reminders;
mod store;
mod tasks;
mod weather;

use clock::{Clock, SystemClock};
use config::Config;
use goals::GoalsTracker;
use links::QuickLinksStore;
use reminders::ReminderEngine;
use store::StoreError;
use tasks::TaskTracker;
use weather::{ReqwestTransport, WeatherService, WeatherTransport};

/// Process-scoped handles shared by every request handler.
///
/// The stores hold paths, not data: each request re-reads its document from
/// disk, so nothing here needs locking.
pub struct AppState {
    pub config: Config,
    pub tasks: TaskTracker,
    pub reminders: ReminderEngine,
    pub goals: GoalsTracker,
    pub links: QuickLinksStore,
    pub weather: WeatherService,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        clock: Arc<dyn Clock>,
        transport: Arc<dyn WeatherTransport>,
    ) -> Self {
        Self {
            tasks: TaskTracker::new(config.tasks_path(), clock.clone()),
            reminders: ReminderEngine::new(config.reminders_path(), clock.clone()),
            goals: GoalsTracker::new(config.goals_path(), clock),
            links: QuickLinksStore::new(config.config_path()),
            weather: WeatherService::new(config.weather_api_url.clone(), transport),
            config,
            started_at: Instant::now(),
        }
    }

    /// Create the data directory and any missing collection files
    pub fn init_storage(&self) -> Result<(), StoreError> {
        self.tasks.init()?;
        self.reminders.init()?;
        self.goals.init()?;
        Ok(())
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    log::info!("Dashboard backend v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Data directory: {}", config.data_dir.display());

    let state = web::Data::new(AppState::new(
        config.clone(),
        Arc::new(SystemClock),
        Arc::new(ReqwestTransport::new()),
    ));

    if let Err(e) = state.init_storage() {
        log::error!("Failed to initialize data files: {}", e);
    }

    let static_dir = if config.static_dir.join("index.html").exists() {
        log::info!("Serving dashboard UI from {}", config.static_dir.display());
        Some(config.static_dir.clone())
    } else {
        log::info!("No dashboard UI at {}, serving API only", config.static_dir.display());
        None
    };

    log::info!("Listening on http://{}:{}", config.bind_address, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(state.clone())
            .app_data(controllers::json_config())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::configure);

        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/", dir).index_file("index.html"));
        }

        app
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
