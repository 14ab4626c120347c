use crate::components::{
    error::InlineErrorMessage,
    layout::{Layout, LoadingSpinner},
};
use crate::pages::dashboard::{
    components::{RecentExpenses, StatusBreakdown, SummarySection},
    view_model::use_dashboard_view_model,
};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();

    view! {
        <Layout>
            <div class="space-y-6">
                <div>
                    <h1 class="text-2xl font-bold text-fg">"Dashboard"</h1>
                    <p class="mt-1 text-sm text-fg-muted">"Where your expenses stand right now."</p>
                </div>
                <Suspense fallback=|| view! { <LoadingSpinner /> }>
                    {move || vm.stats.get().map(|result| match result {
                        Ok(stats) => view! {
                            <div class="space-y-6">
                                <SummarySection stats=stats.clone() show_approvals=vm.show_approvals />
                                <div class="grid grid-cols-1 gap-6 lg:grid-cols-2">
                                    <StatusBreakdown stats=stats.clone() />
                                    <RecentExpenses expenses=stats.recent_expenses.clone() />
                                </div>
                            </div>
                        }.into_view(),
                        Err(err) => {
                            let error = Signal::derive(move || Some(err.clone()));
                            view! { <InlineErrorMessage error=error /> }.into_view()
                        }
                    })}
                </Suspense>
            </div>
        </Layout>
    }
}
