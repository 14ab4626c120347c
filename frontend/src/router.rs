use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::{ApiClient, ExpenseStatus, Role},
    components::guard::{RequireAuth, RequireRole},
    pages::{
        categories::CategoriesPage,
        dashboard::DashboardPage,
        expenses::{ExpenseDetailPage, ExpenseFormPage, ExpensesPage},
        home::HomePage,
        imports::ImportPage,
        login::LoginPage,
        notifications::NotificationsPage,
        profile::ProfilePage,
        register::RegisterPage,
        reports::ReportsPage,
        vendors::VendorsPage,
    },
    state::{auth::AuthProvider, cache::provide_caches, notifications::use_notifications, ui::UiState},
    utils::storage::default_store,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/dashboard",
    "/expenses",
    "/expenses/new",
    "/expenses/:id",
    "/expenses/:id/edit",
    "/categories",
    "/vendors",
    "/notifications",
    "/reports",
    "/import",
    "/profile",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/dashboard",
    "/expenses",
    "/expenses/new",
    "/expenses/:id",
    "/expenses/:id/edit",
    "/categories",
    "/vendors",
    "/notifications",
    "/reports",
    "/import",
    "/profile",
];

/// Routes that additionally require the accountant role.
pub const ACCOUNTANT_ROUTE_PATHS: &[&str] = &["/categories", "/vendors"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login", "/register"];

pub fn mount_app() {
    mount_to_body(app_root);
}

/// Shared services are provided before the auth context so the session hook
/// and caches are in place when it hydrates.
pub fn provide_app_context() -> ApiClient {
    let api = ApiClient::new();
    provide_context(api.clone());
    provide_caches();
    provide_context(UiState::new(default_store()));
    use_notifications();
    api
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_app_context();
    view! {
        <AuthProvider>
            <Title text="Expense Tracker"/>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/expenses" view=ProtectedExpenses/>
                    <Route path="/expenses/new" view=ProtectedExpenseCreate/>
                    <Route path="/expenses/:id" view=ProtectedExpenseDetail/>
                    <Route path="/expenses/:id/edit" view=ProtectedExpenseEdit/>
                    <Route path="/categories" view=AccountantCategories/>
                    <Route path="/vendors" view=AccountantVendors/>
                    <Route path="/notifications" view=ProtectedNotifications/>
                    <Route path="/reports" view=ProtectedReports/>
                    <Route path="/import" view=ProtectedImport/>
                    <Route path="/profile" view=ProtectedProfile/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

fn route_id() -> impl Fn() -> String + Copy {
    let params = use_params_map();
    move || params.with(|p| p.get("id").cloned().unwrap_or_default())
}

/// `?status=` on the list route, ignored when it names no known status.
pub fn status_from_query(value: Option<&str>) -> Option<ExpenseStatus> {
    value.and_then(ExpenseStatus::parse)
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage/></RequireAuth> }
}

#[component]
fn ProtectedExpenses() -> impl IntoView {
    let query = use_query_map();
    let initial = query.with_untracked(|q| status_from_query(q.get("status").map(String::as_str)));
    view! {
        <RequireAuth>
            {move || match initial {
                Some(status) => view! { <ExpensesPage initial_status=status/> }.into_view(),
                None => view! { <ExpensesPage/> }.into_view(),
            }}
        </RequireAuth>
    }
}

#[component]
fn ProtectedExpenseCreate() -> impl IntoView {
    view! { <RequireAuth><ExpenseFormPage/></RequireAuth> }
}

#[component]
fn ProtectedExpenseDetail() -> impl IntoView {
    let id = route_id();
    view! { <RequireAuth>{move || view! { <ExpenseDetailPage id=id()/> }}</RequireAuth> }
}

#[component]
fn ProtectedExpenseEdit() -> impl IntoView {
    let id = route_id();
    view! { <RequireAuth>{move || view! { <ExpenseFormPage id=id()/> }}</RequireAuth> }
}

#[component]
fn AccountantCategories() -> impl IntoView {
    view! { <RequireRole role=Role::Accountant><CategoriesPage/></RequireRole> }
}

#[component]
fn AccountantVendors() -> impl IntoView {
    view! { <RequireRole role=Role::Accountant><VendorsPage/></RequireRole> }
}

#[component]
fn ProtectedNotifications() -> impl IntoView {
    view! { <RequireAuth><NotificationsPage/></RequireAuth> }
}

#[component]
fn ProtectedReports() -> impl IntoView {
    view! { <RequireAuth><ReportsPage/></RequireAuth> }
}

#[component]
fn ProtectedImport() -> impl IntoView {
    view! { <RequireAuth><ImportPage/></RequireAuth> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><ProfilePage/></RequireAuth> }
}
