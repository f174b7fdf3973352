use std::sync::Mutex;

use actix_files::Files;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use log::info;
use serde::Deserialize;

use crate::export::export_rounds_csv;
use crate::roster::roster_from_names;
use crate::schedule::{ScheduleBuilder, ScheduleReport, SessionConfig, Strategy};

// Latest schedule only; every request builds with its own run state
pub struct AppState {
    pub latest: Mutex<Option<ScheduleReport>>,
    pub base_config: SessionConfig,
}

impl AppState {
    pub fn new(base_config: SessionConfig) -> Self {
        Self {
            latest: Mutex::new(None),
            base_config,
        }
    }
}

/// Schedule request from the form page
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub full: Vec<String>,
    #[serde(default)]
    pub early: Vec<String>,
    pub hours: Option<u32>,
    pub seed: Option<u64>,
    pub strategy: Option<Strategy>,
    pub start_time: Option<String>,
}

/// Applies the request's overrides on top of the server's base config
pub fn session_config(base: &SessionConfig, req: &ScheduleRequest) -> SessionConfig {
    let mut config = base.clone();
    if let Some(hours) = req.hours {
        config.total_rounds = SessionConfig::for_duration(hours).total_rounds;
    }
    if req.seed.is_some() {
        config.seed = req.seed;
    }
    if let Some(strategy) = req.strategy {
        config.strategy = strategy;
    }
    if req.start_time.is_some() {
        config.start_time = req.start_time.clone();
    }
    config
}

fn lock_error<T>(_: T) -> actix_web::Error {
    actix_web::error::ErrorInternalServerError("schedule state is unavailable")
}

// Generate schedule endpoint
async fn create_schedule(
    req: web::Json<ScheduleRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let config = session_config(&state.base_config, &req);
    let players = roster_from_names(&req.full, &req.early);

    match ScheduleBuilder::new(config).build(&players) {
        Ok(report) => {
            let body = serde_json::json!({"success": true, "schedule": &report});
            *state.latest.lock().map_err(lock_error)? = Some(report);
            Ok(HttpResponse::Ok().json(body))
        }
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": e.to_string()
        }))),
    }
}

// Latest schedule endpoint
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest.lock().map_err(lock_error)?;
    match latest.as_ref() {
        Some(report) => Ok(HttpResponse::Ok().json(report)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedule generated yet"}))),
    }
}

// CSV download endpoint
async fn get_schedule_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest.lock().map_err(lock_error)?;
    let Some(report) = latest.as_ref() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedule generated yet"})));
    };

    let mut body = Vec::new();
    export_rounds_csv(report, &mut body)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to export CSV: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(("Content-Disposition", "attachment; filename=\"schedule.csv\""))
        .body(body))
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers the page and API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/schedule", web::post().to(create_schedule))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/schedule/csv", web::get().to(get_schedule_csv));
}

pub async fn start_server(port: u16, base_config: SessionConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(base_config));
    info!("Serving court rotation on port {}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
