use crate::api::{Expense, Paginated};
use crate::components::{empty_state::EmptyState, status_badge::StatusBadge};
use crate::utils::time::{format_amount, format_date};
use leptos::*;

#[component]
pub fn ExpenseTable(page: Paginated<Expense>) -> impl IntoView {
    if page.items.is_empty() {
        return view! {
            <EmptyState
                title="No expenses found"
                description="Adjust the filters or record a new expense."
                icon="fa-receipt"
            />
        }
        .into_view();
    }
    view! {
        <div class="bg-surface-elevated shadow rounded-lg overflow-x-auto">
            <table class="min-w-full divide-y divide-border">
                <thead class="bg-surface-muted">
                    <tr>
                        {["Date", "Payment", "Vendor", "Category", "Amount", "Status"]
                            .into_iter()
                            .map(|title| view! {
                                <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">{title}</th>
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {page
                        .items
                        .into_iter()
                        .map(|expense| {
                            let href = format!("/expenses/{}", expense.id);
                            let vendor = expense.vendor_name.clone().unwrap_or_else(|| expense.vendor_id.clone());
                            view! {
                                <tr class="hover:bg-action-ghost-bg-hover">
                                    <td class="px-4 py-3 text-sm text-fg">
                                        <a href=href class="text-link hover:underline">{format_date(&expense.transaction_date)}</a>
                                    </td>
                                    <td class="px-4 py-3 text-sm text-fg-muted">{expense.payment_id.clone().unwrap_or_else(|| "-".into())}</td>
                                    <td class="px-4 py-3 text-sm text-fg">{vendor}</td>
                                    <td class="px-4 py-3 text-sm text-fg">{expense.category.clone()}</td>
                                    <td class="px-4 py-3 text-sm text-fg text-right">{format_amount(expense.amount, &expense.currency)}</td>
                                    <td class="px-4 py-3 text-sm"><StatusBadge status=expense.status /></td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_view()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ExpenseStatus;
    use crate::test_support::helpers::expense;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn table_links_each_expense() {
        let page = Paginated {
            items: vec![expense("e1", ExpenseStatus::Draft), expense("e2", ExpenseStatus::Closed)],
            total: 2,
            page: 1,
            page_size: 20,
        };
        let html = render_to_string(move || view! { <ExpenseTable page=page /> });
        assert!(html.contains("/expenses/e1"));
        assert!(html.contains("/expenses/e2"));
        assert!(html.contains("120.00 EUR"));
        assert!(html.contains("PAY-e1"));
    }

    #[test]
    fn empty_table_shows_empty_state() {
        let page = Paginated::<Expense> {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size: 20,
        };
        let html = render_to_string(move || view! { <ExpenseTable page=page /> });
        assert!(html.contains("No expenses found"));
    }
}
