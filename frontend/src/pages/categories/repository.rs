use crate::api::{
    ApiClient, ApiError, Category, CategoryPayload, CategoryStatistics, CategoryUsage,
};
use crate::state::cache::{AppCaches, QueryKey};
use std::rc::Rc;

const CATEGORY_PREFIX: &str = "categories";

fn list_key(include_inactive: bool) -> QueryKey {
    if include_inactive {
        QueryKey::new("categories/all")
    } else {
        QueryKey::new("categories/active")
    }
}

#[derive(Clone)]
pub struct CategoriesRepository {
    client: Rc<ApiClient>,
    caches: AppCaches,
}

impl CategoriesRepository {
    pub fn new(api: ApiClient, caches: AppCaches) -> Self {
        Self {
            client: Rc::new(api),
            caches,
        }
    }

    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Category>, ApiError> {
        let client = self.client.clone();
        self.caches
            .categories
            .get_or_fetch(list_key(include_inactive), move || async move {
                client.list_categories(include_inactive).await
            })
            .await
    }

    pub async fn save(
        &self,
        id: Option<&str>,
        payload: &CategoryPayload,
    ) -> Result<Category, ApiError> {
        let saved = match id {
            Some(id) => self.client.update_category(id, payload).await?,
            None => self.client.create_category(payload).await?,
        };
        self.caches.categories.invalidate(CATEGORY_PREFIX);
        Ok(saved)
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> Result<Category, ApiError> {
        let updated = self.client.set_category_active(id, is_active).await?;
        self.caches.categories.invalidate(CATEGORY_PREFIX);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_category(id).await?;
        self.caches.categories.invalidate(CATEGORY_PREFIX);
        Ok(())
    }

    pub async fn usage(&self, id: &str) -> Result<CategoryUsage, ApiError> {
        self.client.get_category_usage(id).await
    }

    pub async fn statistics(&self) -> Result<CategoryStatistics, ApiError> {
        self.client.get_category_statistics().await
    }
}
