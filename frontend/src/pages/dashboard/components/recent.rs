use crate::{
    api::Expense,
    components::{empty_state::EmptyState, status_badge::StatusBadge},
    utils::time::{format_amount, format_date},
};
use leptos::*;

#[component]
pub fn RecentExpenses(expenses: Vec<Expense>) -> impl IntoView {
    if expenses.is_empty() {
        return view! {
            <EmptyState title="No recent expenses" description="New expenses will show up here." />
        }
        .into_view();
    }
    view! {
        <div class="bg-surface-elevated shadow rounded-lg divide-y divide-border">
            <h3 class="px-6 py-4 text-base font-semibold text-fg">"Recent expenses"</h3>
            {expenses
                .into_iter()
                .map(|expense| {
                    let href = format!("/expenses/{}", expense.id);
                    let vendor = expense.vendor_name.clone().unwrap_or_else(|| expense.vendor_id.clone());
                    view! {
                        <a href=href class="flex items-center justify-between px-6 py-3 hover:bg-action-ghost-bg-hover">
                            <div>
                                <p class="text-sm font-medium text-fg">{vendor}</p>
                                <p class="text-xs text-fg-muted">
                                    {format_date(&expense.transaction_date)}" · "{expense.category.clone()}
                                </p>
                            </div>
                            <div class="flex items-center gap-3">
                                <span class="text-sm text-fg">{format_amount(expense.amount, &expense.currency)}</span>
                                <StatusBadge status=expense.status />
                            </div>
                        </a>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_view()
}
