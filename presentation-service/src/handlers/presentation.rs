use crate::dtos::PresentationRequest;
use crate::pptx::PPTX_MEDIA_TYPE;
use crate::services::{content_disposition, record_presentation, render_presentation};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use service_core::error::AppError;
use validator::Validate;

#[tracing::instrument(skip_all)]
pub async fn generate_pptx(
    WithRejection(Json(request), _): WithRejection<Json<PresentationRequest>, AppError>,
) -> Result<Response, AppError> {
    request.validate()?;
    tracing::info!(topic = %request.topic, slides = request.slides.len(), "Generating presentation");

    let disposition = HeaderValue::from_str(&content_disposition(&request.topic))
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid topic for filename: {}", e)))?;
    let slide_count = request.slides.len() + 1;

    // Rendering is CPU-bound zip work
    let bytes = tokio::task::spawn_blocking(move || render_presentation(&request))
        .await
        .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))??;

    record_presentation(slide_count, bytes.len());
    tracing::info!(slides = slide_count, bytes = bytes.len(), "Presentation generated");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PPTX_MEDIA_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
