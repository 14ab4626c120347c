use crate::api::ExpenseStatus;
use leptos::*;

#[component]
pub fn StatusBadge(#[prop(into)] status: MaybeSignal<ExpenseStatus>) -> impl IntoView {
    view! {
        <span
            class=move || format!(
                "status-badge inline-flex items-center gap-1 px-2 py-0.5 rounded-full text-xs font-medium {}",
                status.get().badge_class()
            )
            data-status=move || status.get().as_str()
        >
            <i class=move || format!("fas {}", status.get().icon()) aria-hidden="true"></i>
            {move || status.get().label()}
        </span>
    }
}
