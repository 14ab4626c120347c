use crate::pages::expenses::view_model::ExpenseFormViewModel;
use crate::utils::time::format_amount;
use leptos::*;

/// Converts the entered amount into another currency on request.
#[component]
pub fn CurrencyHelper(vm: ExpenseFormViewModel) -> impl IntoView {
    let pending = vm.convert_action.pending();
    let result = vm.convert_action.value();

    view! {
        <div class="rounded border border-border p-3 space-y-2">
            <div class="flex items-center gap-2 text-sm">
                <span class="text-fg-muted">"Convert to"</span>
                <input
                    id="convert-target"
                    type="text"
                    maxlength="3"
                    class="w-20 border border-form-control-border rounded px-2 py-1 uppercase"
                    prop:value=vm.convert_target
                    on:input=move |ev| vm.convert_target.set(event_target_value(&ev))
                />
                <button
                    type="button"
                    class="px-3 py-1 rounded border border-border disabled:opacity-50"
                    disabled=move || pending.get()
                    on:click=move |_| vm.request_conversion()
                >
                    {move || if pending.get() { "Converting..." } else { "Convert" }}
                </button>
            </div>
            {move || result.get().map(|outcome| match outcome {
                Ok(conversion) => {
                    let applied = conversion.clone();
                    view! {
                        <div class="flex items-center gap-3 text-sm">
                            <span class="text-fg">
                                {format_amount(conversion.amount, &conversion.from)}" = "
                                {format_amount(conversion.converted_amount, &conversion.to)}
                                {format!(" (rate {:.4})", conversion.rate)}
                            </span>
                            <button
                                type="button"
                                class="text-link underline"
                                on:click=move |_| vm.apply_conversion(&applied)
                            >
                                "Use this amount"
                            </button>
                        </div>
                    }
                    .into_view()
                }
                Err(err) => view! {
                    <p class="text-sm text-status-error-text">{err.error}</p>
                }
                .into_view(),
            })}
        </div>
    }
}
