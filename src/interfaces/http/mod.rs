mod auth;
mod error;

use actix_cors::Cors;
use actix_multipart::form::{bytes::Bytes, MultipartForm};
use actix_web::{
    dev::Server, get, http::header, middleware::Logger, post, web, App, HttpResponse, HttpServer,
};
use serde::Serialize;
use tracing::info;

use crate::application::{AuthUseCase, ForecastRequest, TabularSummaryUseCase, TrendForecastUseCase};
use crate::domain::error::AppError;
use crate::domain::user::Credentials;
use crate::infrastructure::config::AppConfig;

pub use auth::AuthenticatedUser;
pub use error::{json_config, multipart_config, ErrorBody};

/// Services shared by all workers
pub struct HttpState {
    pub auth_use_case: AuthUseCase,
    pub summary_use_case: TabularSummaryUseCase,
    pub forecast_use_case: TrendForecastUseCase,
    pub max_upload_bytes: usize,
}

#[derive(Serialize)]
struct MessageResponse {
    msg: String,
}

#[derive(Debug, MultipartForm)]
pub struct UploadForm {
    file: Option<Bytes>,
}

#[post("/register")]
async fn register(
    data: web::Data<HttpState>,
    req: web::Json<Credentials>,
) -> Result<HttpResponse, AppError> {
    info!(username = %req.username, "Register requested");

    data.auth_use_case.register(&req).await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        msg: "User created successfully".to_string(),
    }))
}

#[post("/login")]
async fn login(
    data: web::Data<HttpState>,
    req: web::Json<Credentials>,
) -> Result<HttpResponse, AppError> {
    info!(username = %req.username, "Login requested");

    let token = data.auth_use_case.login(&req).await?;
    Ok(HttpResponse::Ok().json(token))
}

#[post("/upload")]
async fn upload(
    data: web::Data<HttpState>,
    user: AuthenticatedUser,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> Result<HttpResponse, AppError> {
    let file = form
        .file
        .ok_or_else(|| AppError::MissingInput("No file part".to_string()))?;

    let file_name = file.file_name.as_deref().unwrap_or_default();
    if file_name.is_empty() {
        return Err(AppError::MissingInput("No selected file".to_string()));
    }
    if !file_name.ends_with(".csv") {
        return Err(AppError::ValidationError(
            "Invalid file type. Please upload a CSV.".to_string(),
        ));
    }

    info!(
        username = %user.username,
        file_name,
        bytes = file.data.len(),
        "Upload received"
    );

    // Parse on the blocking pool, not the worker
    let bytes = file.data;
    let summary = web::block(move || data.summary_use_case.execute(&bytes))
        .await
        .map_err(|e| AppError::Internal(format!("Summary task failed: {}", e)))??;
    Ok(HttpResponse::Ok().json(summary))
}

#[post("/predict")]
async fn predict(
    data: web::Data<HttpState>,
    user: AuthenticatedUser,
    req: web::Json<ForecastRequest>,
) -> Result<HttpResponse, AppError> {
    info!(username = %user.username, "Prediction requested");

    let forecast = data.forecast_use_case.execute(&req)?;
    Ok(HttpResponse::Ok().json(forecast))
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Register state, extractor settings and the `/api` routes
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<HttpState>) {
    let max_upload_bytes = state.max_upload_bytes;

    cfg.app_data(state)
        .app_data(json_config())
        .app_data(multipart_config(max_upload_bytes))
        .service(
            web::scope("/api")
                .service(register)
                .service(login)
                .service(upload)
                .service(predict)
                .service(health),
        );
}

fn cors(origin: &str) -> Cors {
    let cors = if origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(origin)
    };

    cors.allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600)
}

pub fn start_server(state: HttpState, config: &AppConfig) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let origin = config.cors_origin.clone();

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(cors(&origin))
            .wrap(Logger::default())
            .configure(|cfg| configure(cfg, state))
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
