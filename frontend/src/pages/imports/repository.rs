use crate::api::{ApiClient, ApiError, ImportJob};
use crate::pages::imports::preview::ImportFormat;
use crate::state::cache::{AppCaches, EXPENSE_LIST_PREFIX};
use std::rc::Rc;

#[derive(Clone)]
pub struct ImportsRepository {
    client: Rc<ApiClient>,
    caches: AppCaches,
}

impl ImportsRepository {
    pub fn new(api: ApiClient, caches: AppCaches) -> Self {
        Self {
            client: Rc::new(api),
            caches,
        }
    }

    pub async fn upload(
        &self,
        file_name: &str,
        bytes: &[u8],
        format: ImportFormat,
    ) -> Result<ImportJob, ApiError> {
        let job = self
            .client
            .upload_import(bytes, file_name, format.content_type())
            .await?;
        log::info!("import {} queued for {}", job.id, job.file_name);
        Ok(job)
    }

    /// A completed job adds expenses, so cached expense lists are dropped.
    pub async fn status(&self, id: &str) -> Result<ImportJob, ApiError> {
        let job = self.client.get_import_status(id).await?;
        if job.status.is_terminal() && job.imported_rows > 0 {
            self.caches.expense_lists.invalidate(EXPENSE_LIST_PREFIX);
        }
        Ok(job)
    }

    pub async fn history(&self) -> Result<Vec<ImportJob>, ApiError> {
        self.client.get_import_history().await
    }
}
