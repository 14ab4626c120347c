use reqwest::{
    multipart::{Form, Part},
    Method,
};

use super::{
    client::{encode_segment, map_json_response, ApiClient},
    types::{ApiError, FileMetadata},
};

fn file_part(bytes: &[u8], file_name: &str, content_type: &str) -> Part {
    let named = || Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
    named().mime_str(content_type).unwrap_or_else(|_| named())
}

impl ApiClient {
    pub(crate) async fn upload_multipart<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        bytes: &[u8],
        file_name: &str,
        content_type: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .send_with(Method::POST, path, |builder| {
                let form = Form::new().part("file", file_part(bytes, file_name, content_type));
                builder.multipart(form)
            })
            .await?;
        map_json_response(response).await
    }

    pub async fn upload_file(
        &self,
        bytes: &[u8],
        file_name: &str,
        content_type: &str,
    ) -> Result<FileMetadata, ApiError> {
        self.upload_multipart("/files/upload", bytes, file_name, content_type)
            .await
    }

    pub async fn get_file(&self, id: &str) -> Result<FileMetadata, ApiError> {
        self.get_json(&format!("/files/{}", encode_segment(id))).await
    }

    pub async fn delete_file(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/files/{}", encode_segment(id)))
            .await
    }
}
