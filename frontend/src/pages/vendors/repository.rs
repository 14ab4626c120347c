use crate::api::{ApiClient, ApiError, Vendor, VendorPayload};
use crate::state::cache::{AppCaches, QueryKey};
use std::rc::Rc;

const VENDOR_PREFIX: &str = "vendors";

fn list_key(search: &str) -> QueryKey {
    let term = search.trim();
    if term.is_empty() {
        QueryKey::new("vendors/all")
    } else {
        QueryKey::new("vendors/search").with("q", term.to_lowercase())
    }
}

#[derive(Clone)]
pub struct VendorsRepository {
    client: Rc<ApiClient>,
    caches: AppCaches,
}

impl VendorsRepository {
    pub fn new(api: ApiClient, caches: AppCaches) -> Self {
        Self {
            client: Rc::new(api),
            caches,
        }
    }

    pub async fn list(&self, search: String) -> Result<Vec<Vendor>, ApiError> {
        let client = self.client.clone();
        let key = list_key(&search);
        self.caches
            .vendors
            .get_or_fetch(key, move || async move {
                client.list_vendors(Some(search.as_str())).await
            })
            .await
    }

    pub async fn save(&self, id: Option<&str>, payload: &VendorPayload) -> Result<Vendor, ApiError> {
        let saved = match id {
            Some(id) => self.client.update_vendor(id, payload).await?,
            None => self.client.create_vendor(payload).await?,
        };
        self.caches.vendors.invalidate(VENDOR_PREFIX);
        Ok(saved)
    }

    pub async fn toggle(&self, id: &str) -> Result<Vendor, ApiError> {
        let vendor = self.client.toggle_vendor(id).await?;
        self.caches.vendors.invalidate(VENDOR_PREFIX);
        log::info!("vendor {} is now {}", vendor.id, if vendor.is_active { "active" } else { "inactive" });
        Ok(vendor)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_vendor(id).await?;
        self.caches.vendors.invalidate(VENDOR_PREFIX);
        Ok(())
    }
}
