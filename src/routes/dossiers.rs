//! Project dossier routes

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
};
use std::sync::Arc;

use super::upload::read_document_upload;
use crate::api::Attachment;
use crate::app::AppState;
use crate::document::format::download_filename;
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestIdExt;

/// POST /dossiers/pdf
pub async fn generate_dossier_pdf(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Attachment> {
    let upload = read_document_upload(multipart).await?;
    let render_date = upload.render_date();
    let filename = download_filename(
        "Iron_Plumbing_Dossier",
        "Iron_Dossier.pdf",
        &upload.form.project_name,
    );
    let record = upload.form.into_dossier_record(upload.logo);

    tracing::info!(
        request_id = headers.request_id_or_unknown(),
        project_name = %record.project_name,
        %render_date,
        "Generating dossier PDF"
    );

    let composer_state = state.clone();
    let document = tokio::task::spawn_blocking(move || {
        composer_state.composer.render_dossier(&record, render_date)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Dossier render task failed: {e}")))??;

    Ok(Attachment::new(filename, "application/pdf", document.bytes).with_warnings(document.warnings))
}
