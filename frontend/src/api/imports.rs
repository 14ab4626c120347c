use super::{
    client::{encode_segment, ApiClient},
    types::{ApiError, ImportJob},
};

impl ApiClient {
    /// Hands the spreadsheet to the backend, which validates and persists rows
    /// asynchronously.
    pub async fn upload_import(
        &self,
        bytes: &[u8],
        file_name: &str,
        content_type: &str,
    ) -> Result<ImportJob, ApiError> {
        self.upload_multipart("/import/upload", bytes, file_name, content_type)
            .await
    }

    pub async fn get_import_status(&self, id: &str) -> Result<ImportJob, ApiError> {
        self.get_json(&format!("/import/{}/status", encode_segment(id)))
            .await
    }

    pub async fn get_import_history(&self) -> Result<Vec<ImportJob>, ApiError> {
        self.get_json("/import/history").await
    }
}
