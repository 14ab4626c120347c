use crate::components::{error::FieldError, error::InlineErrorMessage, feedback::MessageBanner};
use crate::pages::expenses::{
    components::{currency::CurrencyHelper, receipt::ReceiptField},
    view_model::ExpenseFormViewModel,
};
use leptos::{ev::SubmitEvent, *};

const INPUT: &str = "mt-1 block w-full border border-form-control-border bg-form-control-bg rounded px-3 py-2 text-sm";
const LABEL: &str = "block text-sm font-medium text-fg";

#[component]
pub fn ExpenseForm(vm: ExpenseFormViewModel) -> impl IntoView {
    let form = vm.form;
    let errors: Signal<Option<crate::api::ApiError>> = vm.error.into();
    let pending = vm.save_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <form class="bg-surface-elevated shadow rounded-lg p-6 space-y-4" on:submit=on_submit>
            <MessageBanner message=vm.message />
            <div class="grid grid-cols-1 gap-4 md:grid-cols-2">
                <div>
                    <label for="transaction-date" class=LABEL>"Transaction date"</label>
                    <input id="transaction-date" type="date" class=INPUT
                        prop:value=form.transaction_date
                        on:input=move |ev| form.transaction_date.set(event_target_value(&ev)) />
                    <FieldError error=errors field="transactionDate" />
                </div>
                <div>
                    <label for="payment-id" class=LABEL>"Payment reference"</label>
                    <input id="payment-id" type="text" class=INPUT
                        prop:value=form.payment_id
                        on:input=move |ev| form.payment_id.set(event_target_value(&ev)) />
                </div>
                <div>
                    <label for="vendor" class=LABEL>"Vendor"</label>
                    <select id="vendor" class=INPUT
                        prop:value=form.vendor_id
                        on:change=move |ev| form.vendor_id.set(event_target_value(&ev))
                    >
                        <option value="">"Choose a vendor"</option>
                        {move || vm.options
                            .vendor_list()
                            .into_iter()
                            .filter(|v| v.is_active || v.id == form.vendor_id.get())
                            .map(|v| view! { <option value=v.id>{v.name}</option> })
                            .collect_view()}
                    </select>
                    <FieldError error=errors field="vendorId" />
                </div>
                <div>
                    <label for="category" class=LABEL>"Category"</label>
                    <select id="category" class=INPUT
                        prop:value=form.category
                        on:change=move |ev| form.category.set(event_target_value(&ev))
                    >
                        <option value="">"Choose a category"</option>
                        {move || vm.options
                            .category_list()
                            .into_iter()
                            .map(|c| view! { <option value=c.name.clone()>{c.name}</option> })
                            .collect_view()}
                    </select>
                    <FieldError error=errors field="category" />
                </div>
                <div>
                    <label for="amount" class=LABEL>"Amount"</label>
                    <input id="amount" type="text" inputmode="decimal" class=INPUT
                        prop:value=form.amount
                        on:input=move |ev| form.amount.set(event_target_value(&ev)) />
                    <FieldError error=errors field="amount" />
                </div>
                <div>
                    <label for="currency" class=LABEL>"Currency"</label>
                    <input id="currency" type="text" maxlength="3" class=INPUT
                        prop:value=form.currency
                        on:input=move |ev| form.currency.set(event_target_value(&ev)) />
                    <FieldError error=errors field="currency" />
                </div>
                <div>
                    <label for="vat-rate" class=LABEL>"VAT rate (%)"</label>
                    <input id="vat-rate" type="text" inputmode="decimal" class=INPUT
                        prop:value=form.vat_rate
                        on:input=move |ev| form.vat_rate.set(event_target_value(&ev))
                        on:blur=move |_| form.fill_vat_amount() />
                    <FieldError error=errors field="vatRate" />
                </div>
                <div>
                    <label for="vat-amount" class=LABEL>"VAT amount"</label>
                    <input id="vat-amount" type="text" inputmode="decimal" class=INPUT
                        prop:value=form.vat_amount
                        on:input=move |ev| form.vat_amount.set(event_target_value(&ev)) />
                    <FieldError error=errors field="vatAmount" />
                </div>
            </div>
            <div>
                <label for="description" class=LABEL>"Description"</label>
                <textarea id="description" class=INPUT rows="3"
                    prop:value=form.description
                    on:input=move |ev| form.description.set(event_target_value(&ev))></textarea>
            </div>
            <CurrencyHelper vm=vm />
            <ReceiptField vm=vm />
            <InlineErrorMessage error=errors />
            <div class="flex justify-end gap-2">
                <a href="/expenses" class="px-4 py-2 rounded text-sm text-fg-muted">"Cancel"</a>
                <button
                    type="submit"
                    class="px-4 py-2 rounded text-sm text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    {move || match (pending.get(), vm.is_edit()) {
                        (true, _) => "Saving...",
                        (false, true) => "Save changes",
                        (false, false) => "Create expense",
                    }}
                </button>
            </div>
        </form>
    }
}
