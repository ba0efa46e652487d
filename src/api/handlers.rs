use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use tower_sessions::Session;
use tracing::debug;

use super::{errors::ErrorResponse, pages::render_page};
use crate::services::{
    calculator::{calculate_pension_tables, PensionTables}, config::AppConfig, errors::CalculatorError,
    shared::constants::SESSION_STATE_KEY, state::CalculatorState,
};

async fn load_state(session: &Session) -> Result<CalculatorState, ErrorResponse> {
    Ok(session
        .get::<CalculatorState>(SESSION_STATE_KEY)
        .await
        .map_err(ErrorResponse::session)?
        .unwrap_or_default())
}

async fn save_state(session: &Session, state: &CalculatorState) -> Result<(), ErrorResponse> {
    session
        .insert(SESSION_STATE_KEY, state)
        .await
        .map_err(ErrorResponse::session)
}

struct UploadedFile {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

async fn read_file_field(mut multipart: Multipart) -> Result<Option<UploadedFile>, ErrorResponse> {
    while let Some(field) = multipart.next_field().await.map_err(ErrorResponse::upload)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(ErrorResponse::upload)?;
        return Ok(Some(UploadedFile {
            file_name,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

pub async fn index(
    State(config): State<AppConfig>,
    session: Session,
) -> Result<Html<String>, ErrorResponse> {
    let state = load_state(&session).await?;
    Ok(Html(render_page(&state, &config.locale)))
}

pub async fn upload_csv(session: Session, multipart: Multipart) -> Result<Redirect, ErrorResponse> {
    let mut state = load_state(&session).await?;
    match read_file_field(multipart).await? {
        Some(upload) => state.upload_csv(&upload.bytes, upload.file_name.as_deref()),
        None => state.fail(CalculatorError::CsvParse("no file was uploaded".to_string())),
    }
    save_state(&session, &state).await?;
    Ok(Redirect::to("/"))
}

pub async fn upload_workbook(
    session: Session,
    multipart: Multipart,
) -> Result<Redirect, ErrorResponse> {
    let mut state = load_state(&session).await?;
    match read_file_field(multipart).await? {
        Some(upload) => state.upload_workbook(&upload.bytes, upload.file_name.as_deref()),
        None => state.fail(CalculatorError::WorkbookParse(
            "no file was uploaded".to_string(),
        )),
    }
    save_state(&session, &state).await?;
    Ok(Redirect::to("/"))
}

pub async fn calculate(
    State(config): State<AppConfig>,
    session: Session,
) -> Result<Redirect, ErrorResponse> {
    let mut state = load_state(&session).await?;
    if let Err(e) = state.calculate(&config.schedule) {
        debug!("Calculation not run: {}", e);
    }
    save_state(&session, &state).await?;
    Ok(Redirect::to("/"))
}

pub async fn schedule(State(config): State<AppConfig>) -> Json<PensionTables> {
    Json(calculate_pension_tables(&config.schedule))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
