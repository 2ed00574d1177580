use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

use leaveguard::config::Config;
use leaveguard::docs::ApiDoc;
use leaveguard::engine::{Analyzer, HolidayCalendar};
use leaveguard::routes;
use leaveguard::store::LeaveLog;

use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Leave Request Analyzer"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let calendar = match &config.holidays_file {
        Some(path) => HolidayCalendar::from_json_file(path).unwrap_or_else(|e| {
            warn!(error = %e, path = %path, "Falling back to built-in holiday table");
            HolidayCalendar::builtin()
        }),
        None => HolidayCalendar::builtin(),
    };
    let engine = Analyzer::new(calendar);

    let log = LeaveLog::new(&config.dataset_path);
    if let Err(e) = log.ensure_exists() {
        eprintln!("Failed to initialize dataset {}: {e:?}", config.dataset_path);
        return Err(std::io::Error::other(e.to_string()));
    }
    match log.records() {
        Ok(records) => info!(count = records.len(), "Existing dataset records"),
        Err(e) => warn!(error = %e, "Could not read existing dataset"),
    }

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(engine.clone()))
            .app_data(Data::new(log.clone()))
            .service(index)
            .configure(routes::configure)
    })
    .bind(server_addr)?
    .run()
    .await
}
