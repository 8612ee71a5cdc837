//! Image uploads and the shared report submission policy.
//!
//! Creating a report and attaching its images are separate requests. The
//! report is created first; each image upload that fails afterwards is
//! recorded in the returned [`Submission`] instead of failing the whole
//! submission. Farmer and employee submissions both go through here.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::{segment, ApiClient, ApiError, ApiResult, ReportEnvelope};
use crate::models::{NewReport, Report};

const IMAGE_FIELD: &str = "image";

/// An image ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, guessing its content type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self::new(file_name, content_type, bytes))
    }
}

/// One image that could not be attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub file_name: String,
    pub error: String,
}

/// Outcome of creating a report with images: the created report plus any
/// uploads that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub report: Report,
    pub failed_uploads: Vec<UploadFailure>,
}

impl Submission {
    /// True when every image was attached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_uploads.is_empty()
    }
}

impl ApiClient {
    /// Uploads one image to `{group}/reports/{id}/images`.
    pub(super) async fn upload_report_image(
        &self,
        group: &str,
        report_id: &str,
        file: &UploadFile,
    ) -> ApiResult<()> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);
        let path = format!("{group}/reports/{}/images", segment(report_id));
        let request = self.authorized(Method::POST, &path)?.multipart(form);
        self.send_discarding(request).await
    }

    /// Creates a report under `group`, then attaches each image.
    pub(super) async fn submit_report(
        &self,
        group: &str,
        draft: &NewReport,
        images: &[UploadFile],
    ) -> ApiResult<Submission> {
        draft.validate().map_err(ApiError::Validation)?;

        let envelope: ReportEnvelope = self.post(&format!("{group}/reports"), draft).await?;
        let report = envelope.into_report();
        tracing::info!("Created report {} ({})", report.id, report.crop);

        let mut failed_uploads = Vec::new();
        for file in images {
            if let Err(error) = self.upload_report_image(group, &report.id, file).await {
                tracing::warn!(
                    "Image upload '{}' failed for report {}: {}",
                    file.file_name,
                    report.id,
                    error
                );
                failed_uploads.push(UploadFailure {
                    file_name: file.file_name.clone(),
                    error: error.user_message(),
                });
            }
        }

        Ok(Submission {
            report,
            failed_uploads,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_guesses_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.png");
        std::fs::write(&path, [0_u8, 1, 2]).unwrap();

        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.file_name, "leaf.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.bytes, vec![0, 1, 2]);
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.zzz");
        std::fs::write(&path, b"x").unwrap();
        assert_eq!(
            UploadFile::from_path(&path).unwrap().content_type,
            "application/octet-stream"
        );
    }
}
