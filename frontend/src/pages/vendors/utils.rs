use crate::api::{ApiError, Vendor, VendorPayload};
use leptos::*;
use serde_json::{json, Map, Value};

#[derive(Clone, Copy)]
pub struct VendorFormState {
    pub editing_id: RwSignal<Option<String>>,
    pub name: RwSignal<String>,
    pub code: RwSignal<String>,
    pub contact_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
}

impl Default for VendorFormState {
    fn default() -> Self {
        Self {
            editing_id: create_rw_signal(None),
            name: create_rw_signal(String::new()),
            code: create_rw_signal(String::new()),
            contact_name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            phone: create_rw_signal(String::new()),
        }
    }
}

fn optional(signal: RwSignal<String>) -> Option<String> {
    let value = signal.get_untracked();
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl VendorFormState {
    pub fn edit(&self, vendor: &Vendor) {
        self.editing_id.set(Some(vendor.id.clone()));
        self.name.set(vendor.name.clone());
        self.code.set(vendor.code.clone().unwrap_or_default());
        self.contact_name
            .set(vendor.contact_name.clone().unwrap_or_default());
        self.email.set(vendor.email.clone().unwrap_or_default());
        self.phone.set(vendor.phone.clone().unwrap_or_default());
    }

    pub fn reset(&self) {
        self.editing_id.set(None);
        for field in [self.name, self.code, self.contact_name, self.email, self.phone] {
            field.set(String::new());
        }
    }

    pub fn to_payload(&self) -> Result<VendorPayload, ApiError> {
        let mut fields = Map::new();
        let name = self.name.get_untracked().trim().to_string();
        if name.is_empty() {
            fields.insert("name".into(), Value::from("Vendor name is required."));
        }
        let email = optional(self.email);
        if let Some(email) = email.as_deref() {
            if !email.contains('@') {
                fields.insert("email".into(), Value::from("Enter a valid email address."));
            }
        }
        if !fields.is_empty() {
            return Err(ApiError::validation("Please check the highlighted fields.")
                .with_details(json!({ "fields": fields })));
        }
        Ok(VendorPayload {
            name,
            code: optional(self.code),
            contact_name: optional(self.contact_name),
            email,
            phone: optional(self.phone),
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn payload_reports_each_invalid_field() {
        with_runtime(|| {
            let form = VendorFormState::default();
            form.email.set("not-an-email".into());
            let err = form.to_payload().unwrap_err();
            assert!(err.field_error("name").is_some());
            assert!(err.field_error("email").is_some());
        });
    }

    #[test]
    fn payload_drops_blank_optionals() {
        with_runtime(|| {
            let form = VendorFormState::default();
            form.name.set("Acme".into());
            form.phone.set("   ".into());
            let payload = form.to_payload().unwrap();
            assert_eq!(payload.name, "Acme");
            assert!(payload.phone.is_none());
            assert!(payload.email.is_none());
        });
    }
}
