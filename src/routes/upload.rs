//! Multipart intake shared by the document endpoints.

use axum::extract::multipart::{Multipart, MultipartError};
use chrono::{Local, NaiveDate};

use crate::domain::ProjectForm;
use crate::error::{ApiError, ApiResult};

/// Part holding the project JSON.
pub const RECORD_PART: &str = "record";
/// Optional PNG/JPEG part.
pub const LOGO_PART: &str = "logo";

pub struct DocumentUpload {
    pub form: ProjectForm,
    pub logo: Option<Vec<u8>>,
}

impl DocumentUpload {
    /// The record's `render_date`, or today in local time.
    pub fn render_date(&self) -> NaiveDate {
        self.form
            .render_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::bad_request(format!("Invalid multipart body: {}", e.body_text()))
}

pub async fn read_document_upload(mut multipart: Multipart) -> ApiResult<DocumentUpload> {
    let mut form = None;
    let mut logo = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RECORD_PART) => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form = Some(ProjectForm::from_json(&bytes)?);
            }
            Some(LOGO_PART) => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was chosen
                if !bytes.is_empty() {
                    logo = Some(bytes.to_vec());
                }
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown multipart field");
            }
        }
    }

    let form = form.ok_or_else(|| ApiError::bad_request("Missing 'record' part"))?;
    Ok(DocumentUpload { form, logo })
}
