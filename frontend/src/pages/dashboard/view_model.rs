use crate::api::{ApiClient, ApiError, DashboardStats};
use crate::pages::dashboard::repository;
use crate::state::auth::use_auth;
use leptos::*;

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub stats: Resource<(), Result<DashboardStats, ApiError>>,
    pub show_approvals: Signal<bool>,
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let (auth, _) = use_auth();

    let stats = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { repository::fetch_stats(&api).await }
        },
    );
    let show_approvals = Signal::derive(move || {
        auth.get()
            .role()
            .map(|role| role.is_privileged())
            .unwrap_or(false)
    });

    DashboardViewModel {
        stats,
        show_approvals,
    }
}
