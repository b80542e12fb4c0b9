//! Bid proposal routes

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

/// POST /bids/pdf
///
/// Multipart `record` (+ optional `logo`) in, bid proposal PDF out.
pub async fn generate_bid_pdf(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Attachment> {
    let upload = read_document_upload(multipart).await?;
    if upload.form.bid_total.is_sign_negative() && !upload.form.bid_total.is_zero() {
        return Err(ApiError::bad_request("bid_total must not be negative"));
    }

    let render_date = upload.render_date();
    let filename = download_filename("Iron_Plumbing_Bid", "Iron_Bid.pdf", &upload.form.project_name);
    let record = upload.form.into_bid_record(upload.logo);

    tracing::info!(
        request_id = headers.request_id_or_unknown(),
        project_name = %record.project_name,
        %render_date,
        logo = record.logo.is_some(),
        "Generating bid PDF"
    );

    let composer_state = state.clone();
    let document = tokio::task::spawn_blocking(move || {
        composer_state.composer.render_bid(&record, render_date)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Bid render task failed: {e}")))??;

    tracing::info!(
        request_id = headers.request_id_or_unknown(),
        filename = %filename,
        pages = document.page_count,
        warnings = document.warnings.len(),
        "Bid PDF ready"
    );

    Ok(Attachment::new(filename, "application/pdf", document.bytes).with_warnings(document.warnings))
}
