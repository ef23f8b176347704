use crate::dtos::{DocumentResponse, ExtendedDocument};
use crate::models::Document;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics::counter;
use service_core::error::AppError;
use validator::Validate;

#[tracing::instrument(skip(state))]
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let records = state.store.list().await?;

    Ok(Json(
        records.into_iter().map(DocumentResponse::from).collect(),
    ))
}

#[tracing::instrument(skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Json<DocumentResponse>, AppError> {
    let record = state.store.get(&file_name).await?;
    Ok(Json(DocumentResponse::from(record)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn add_document(
    State(state): State<AppState>,
    payload: Result<Json<ExtendedDocument>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // Every body rejection (syntax, shape, content type) is a plain 400.
    let Json(request) = payload.map_err(|rejection| {
        counter!("documents_rejected_total", "reason" => "malformed").increment(1);
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    })?;

    request.validate().map_err(|e| {
        counter!("documents_rejected_total", "reason" => "invalid").increment(1);
        e
    })?;

    let document = Document::from(request);

    let record = state.store.add(document).await.map_err(|e| {
        if matches!(e, AppError::Conflict(_)) {
            counter!("documents_rejected_total", "reason" => "conflict").increment(1);
            tracing::info!("Rejected duplicate document: {}", e);
        }
        e
    })?;

    counter!("documents_added_total").increment(1);
    tracing::info!(
        file_name = %record.file_name,
        size = record.size,
        "Document added"
    );

    let location = format!("/api/document/{}", urlencoding::encode(&record.file_name));

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(DocumentResponse::from(record)),
    ))
}
