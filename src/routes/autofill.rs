//! Auto-fill route
//!
//! Normalizes a flat JSON project mapping into the form fields the
//! document endpoints accept.

use axum::{body::Bytes, http::HeaderMap};

use crate::api::DataResponse;
use crate::domain::ProjectForm;
use crate::error::ApiResult;
use crate::middleware::RequestIdExt;

/// POST /autofill
pub async fn autofill(headers: HeaderMap, body: Bytes) -> ApiResult<DataResponse<ProjectForm>> {
    let form = ProjectForm::from_json(&body)?;

    tracing::info!(
        request_id = headers.request_id_or_unknown(),
        project_name = %form.project_name,
        fixtures = form.plumbing_fixtures.len(),
        "Auto-filled project form"
    );

    Ok(DataResponse::new(form))
}
