use crate::{
    api::DashboardStats,
    components::status_badge::StatusBadge,
    pages::dashboard::utils::{share_percent, status_breakdown},
    utils::time::format_amount,
};
use leptos::*;

#[component]
pub fn SummarySection(stats: DashboardStats, show_approvals: Signal<bool>) -> impl IntoView {
    let total = format_amount(stats.total_amount, &stats.currency);
    let pending = stats.pending_approvals;
    view! {
        <div class="grid grid-cols-1 gap-4 lg:grid-cols-3">
            <Metric label="Expenses" value=stats.total_expenses.to_string() />
            <Metric label="Total amount" value=total />
            <Show when=move || show_approvals.get()>
                <a href="/expenses?status=SUBMITTED" class="block">
                    <Metric label="Awaiting approval" value=pending.to_string() />
                </a>
            </Show>
        </div>
    }
}

#[component]
fn Metric(#[prop(into)] label: String, value: String) -> impl IntoView {
    view! {
        <div class="p-6 rounded-lg bg-surface-elevated border border-border shadow-sm">
            <p class="text-xs font-bold text-fg-muted uppercase tracking-widest">{label}</p>
            <p class="mt-3 text-3xl font-extrabold text-fg">{value}</p>
        </div>
    }
}

#[component]
pub fn StatusBreakdown(stats: DashboardStats) -> impl IntoView {
    let total = stats.total_expenses;
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-3">
            <h3 class="text-base font-semibold text-fg">"By status"</h3>
            <ul class="space-y-2">
                {status_breakdown(&stats)
                    .into_iter()
                    .map(|(status, count)| {
                        let width = format!("width: {}%", share_percent(count, total));
                        view! {
                            <li class="flex items-center gap-3 text-sm">
                                <span class="w-28"><StatusBadge status=status /></span>
                                <div class="flex-1 h-2 rounded bg-surface-muted">
                                    <div class="h-2 rounded bg-action-primary-bg" style=width></div>
                                </div>
                                <span class="w-10 text-right text-fg">{count}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
