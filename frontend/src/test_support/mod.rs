#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{Expense, ExpenseStatus, Role, UserResponse};
    use crate::state::auth::AuthState;
    use chrono::{NaiveDate, TimeZone, Utc};
    use leptos::*;

    pub fn accountant_user() -> UserResponse {
        UserResponse {
            id: "u-accountant".into(),
            name: "Avery Accountant".into(),
            email: "avery@example.com".into(),
            role: Role::Accountant,
            department: Some("Finance".into()),
            created_at: None,
        }
    }

    pub fn regular_user() -> UserResponse {
        UserResponse {
            id: "u-regular".into(),
            name: "Riley Member".into(),
            email: "riley@example.com".into(),
            role: Role::User,
            department: None,
            created_at: None,
        }
    }

    pub fn provide_auth(
        user: Option<UserResponse>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let is_authenticated = user.is_some();
        let (auth, set_auth) = create_signal(AuthState {
            user,
            is_authenticated,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }

    pub fn expense(id: &str, status: ExpenseStatus) -> Expense {
        let stamp = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        Expense {
            id: id.into(),
            payment_id: Some(format!("PAY-{}", id)),
            transaction_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            vendor_id: "v1".into(),
            vendor_name: Some("Acme Travel".into()),
            category: "Travel".into(),
            amount: 120.0,
            currency: "EUR".into(),
            vat_rate: Some(20.0),
            vat_amount: Some(20.0),
            description: Some("Train to Lyon".into()),
            status,
            submitted_by: "u-regular".into(),
            file_id: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }
}
