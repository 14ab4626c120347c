use crate::api::{ApiError, Category, CategoryPayload};
use leptos::*;

#[derive(Clone, Copy)]
pub struct CategoryFormState {
    pub editing_id: RwSignal<Option<String>>,
    pub name: RwSignal<String>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
}

impl Default for CategoryFormState {
    fn default() -> Self {
        Self {
            editing_id: create_rw_signal(None),
            name: create_rw_signal(String::new()),
            code: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
        }
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl CategoryFormState {
    pub fn edit(&self, category: &Category) {
        self.editing_id.set(Some(category.id.clone()));
        self.name.set(category.name.clone());
        self.code.set(category.code.clone().unwrap_or_default());
        self.description
            .set(category.description.clone().unwrap_or_default());
    }

    pub fn reset(&self) {
        self.editing_id.set(None);
        self.name.set(String::new());
        self.code.set(String::new());
        self.description.set(String::new());
    }

    pub fn to_payload(&self) -> Result<CategoryPayload, ApiError> {
        let name = self.name.get_untracked().trim().to_string();
        if name.is_empty() {
            return Err(ApiError::validation("Category name is required.")
                .with_details(serde_json::json!({ "fields": { "name": "Category name is required." } })));
        }
        Ok(CategoryPayload {
            name,
            code: optional(self.code.get_untracked()).map(|c| c.to_uppercase()),
            description: optional(self.description.get_untracked()),
        })
    }
}
