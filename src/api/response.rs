//! Standard API response types

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Header carrying non-fatal problems with uploaded assets.
pub const X_ASSET_WARNING: &str = "x-asset-warning";

/// Response for single data item
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Helper for creating responses with status codes
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Helper for no content responses
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// A file download: `Content-Disposition: attachment` plus any asset
/// warnings collected while producing it.
#[derive(Debug)]
pub struct Attachment {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    pub warnings: Vec<String>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

impl IntoResponse for Attachment {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename.replace('"', ""));
        let mut response = (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response();

        let headers = response.headers_mut();
        for warning in &self.warnings {
            // Header values must be visible ASCII
            let cleaned: String = warning
                .chars()
                .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
                .collect();
            if let Ok(value) = HeaderValue::from_str(&cleaned) {
                headers.append(HeaderName::from_static(X_ASSET_WARNING), value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_headers() {
        let response = Attachment::new("Iron_Bid.pdf", "application/pdf", b"%PDF-".to_vec())
            .with_warnings(vec!["logo upload is empty".to_string()])
            .into_response();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Iron_Bid.pdf\""
        );
        assert_eq!(headers[X_ASSET_WARNING], "logo upload is empty");
    }

    #[test]
    fn test_attachment_without_warnings_has_no_warning_header() {
        let response = Attachment::new("Iron_Estimate.csv", "text/csv", Vec::new()).into_response();
        assert!(response.headers().get(X_ASSET_WARNING).is_none());
    }
}
