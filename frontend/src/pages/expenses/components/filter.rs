use crate::api::ExpenseStatus;
use crate::pages::expenses::{utils::ExpenseFilterState, view_model::ReferenceOptions};
use leptos::*;

const CONTROL: &str = "border border-form-control-border rounded px-2 py-1 text-sm bg-form-control-bg";

#[component]
pub fn ExpenseFilters(filter: ExpenseFilterState, options: ReferenceOptions) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 grid grid-cols-1 gap-3 md:grid-cols-3 lg:grid-cols-6">
            <select
                id="filter-status"
                class=CONTROL
                prop:value=filter.status
                on:change=move |ev| filter.set_filter(filter.status, event_target_value(&ev))
            >
                <option value="">"All statuses"</option>
                {ExpenseStatus::ALL
                    .into_iter()
                    .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                    .collect_view()}
            </select>
            <select
                id="filter-category"
                class=CONTROL
                prop:value=filter.category
                on:change=move |ev| filter.set_filter(filter.category, event_target_value(&ev))
            >
                <option value="">"All categories"</option>
                {move || options
                    .category_list()
                    .into_iter()
                    .map(|c| view! { <option value=c.name.clone()>{c.name}</option> })
                    .collect_view()}
            </select>
            <select
                id="filter-vendor"
                class=CONTROL
                prop:value=filter.vendor_id
                on:change=move |ev| filter.set_filter(filter.vendor_id, event_target_value(&ev))
            >
                <option value="">"All vendors"</option>
                {move || options
                    .vendor_list()
                    .into_iter()
                    .map(|v| view! { <option value=v.id>{v.name}</option> })
                    .collect_view()}
            </select>
            <input
                type="date"
                class=CONTROL
                aria-label="From"
                prop:value=filter.from
                on:change=move |ev| filter.set_filter(filter.from, event_target_value(&ev))
            />
            <input
                type="date"
                class=CONTROL
                aria-label="To"
                prop:value=filter.to
                on:change=move |ev| filter.set_filter(filter.to, event_target_value(&ev))
            />
            <div class="flex gap-2">
                <input
                    type="search"
                    class=format!("{} flex-1", CONTROL)
                    placeholder="Search"
                    prop:value=filter.search
                    on:change=move |ev| filter.set_filter(filter.search, event_target_value(&ev))
                />
                <button type="button" class="text-sm text-fg-muted underline" on:click=move |_| filter.clear()>
                    "Clear"
                </button>
            </div>
        </div>
    }
}
