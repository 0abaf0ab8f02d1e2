use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use cvsift_core::reader::pdf_bytes_to_text;
use cvsift_core::{ResumeParser, ResumeParsingResponse};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const UPLOAD_FIELD: &str = "upload_file";
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    parser: Arc<ResumeParser>,
}

pub fn router(parser: Arc<ResumeParser>) -> Router {
    Router::new()
        .route("/parse_resume", post(parse_resume))
        .route("/parse_resume/", post(parse_resume))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { parser })
}

/// Blocks until the server stops. The caller owns the runtime; `parser`
/// holds blocking clients and must be created outside it.
pub fn run(parser: ResumeParser, port: u16) -> Result<()> {
    let parser = Arc::new(parser);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(Arc::clone(&parser), port))
}

async fn serve(parser: Arc<ResumeParser>, port: u16) -> Result<()> {
    let app = router(parser);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting cvsift on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn is_pdf(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

async fn parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeParsingResponse>, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !is_pdf(&file_name) {
            tracing::error!("The file {} is not a PDF", file_name);
            return Err((
                StatusCode::BAD_REQUEST,
                "The given file is not a PDF".to_string(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        let parser = Arc::clone(&state.parser);
        let response = tokio::task::spawn_blocking(move || {
            let text = pdf_bytes_to_text(&bytes).unwrap_or_else(|e| {
                tracing::error!("Error reading PDF {}: {}", file_name, e);
                String::new()
            });
            parser.parse_text(&text)
        })
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

        return Ok(Json(response));
    }

    Err((
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Missing multipart field '{UPLOAD_FIELD}'"),
    ))
}
