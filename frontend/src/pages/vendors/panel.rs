use crate::api::{ApiError, Vendor};
use crate::components::{
    delete_dialog::DeleteDialog,
    empty_state::EmptyState,
    error::{FieldError, InlineErrorMessage},
    feedback::MessageBanner,
    layout::{Layout, LoadingSpinner},
};
use crate::pages::vendors::view_model::{use_vendors_view_model, VendorsViewModel};
use leptos::{ev::SubmitEvent, *};

#[component]
fn VendorForm(vm: VendorsViewModel) -> impl IntoView {
    let form = vm.form;
    let error: Signal<Option<ApiError>> = vm.form_error.into();
    let input = move |id: &'static str, placeholder: &'static str, signal: RwSignal<String>| {
        view! {
            <input id=id class="w-full border border-form-control-border rounded px-2 py-1 text-sm"
                placeholder=placeholder prop:value=signal
                on:input=move |ev| signal.set(event_target_value(&ev)) />
        }
    };
    view! {
        <form class="bg-surface-elevated shadow rounded-lg p-4 space-y-3"
            on:submit=move |ev: SubmitEvent| { ev.prevent_default(); vm.submit(); }>
            <h3 class="text-sm font-semibold text-fg">
                {move || if form.editing_id.get().is_some() { "Edit vendor" } else { "New vendor" }}
            </h3>
            {input("vendor-name", "Name", form.name)}
            <FieldError error=error field="name" />
            {input("vendor-code", "Code", form.code)}
            {input("vendor-contact", "Contact person", form.contact_name)}
            {input("vendor-email", "Email", form.email)}
            <FieldError error=error field="email" />
            {input("vendor-phone", "Phone", form.phone)}
            <div class="flex gap-2">
                <button type="submit" class="px-3 py-2 rounded text-sm text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                    disabled=move || vm.save_action.pending().get()>"Save"</button>
                <Show when=move || form.editing_id.get().is_some()>
                    <button type="button" class="px-3 py-2 rounded text-sm text-fg-muted" on:click=move |_| form.reset()>"Cancel"</button>
                </Show>
            </div>
        </form>
    }
}

#[component]
fn VendorTable(vm: VendorsViewModel, vendors: Vec<Vendor>) -> impl IntoView {
    view! {
        <table class="min-w-full bg-surface-elevated shadow rounded-lg divide-y divide-border">
            <thead>
                <tr class="text-left text-xs uppercase text-fg-muted">
                    <th class="px-4 py-2">"Name"</th>
                    <th class="px-4 py-2">"Contact"</th>
                    <th class="px-4 py-2">"Status"</th>
                    <th class="px-4 py-2"></th>
                </tr>
            </thead>
            <tbody class="divide-y divide-border">
                {vendors.into_iter().map(|vendor| {
                    let for_edit = vendor.clone();
                    let for_delete = vendor.clone();
                    let id = vendor.id.clone();
                    let contact = vendor.contact_name.clone().or(vendor.email.clone()).unwrap_or_else(|| "-".into());
                    view! {
                        <tr data-vendor=vendor.id.clone()>
                            <td class="px-4 py-2 text-sm text-fg">{vendor.name.clone()}</td>
                            <td class="px-4 py-2 text-sm text-fg-muted">{contact}</td>
                            <td class="px-4 py-2 text-sm">{if vendor.is_active { "Active" } else { "Inactive" }}</td>
                            <td class="px-4 py-2 text-sm space-x-2 text-right">
                                <button type="button" class="text-link underline" on:click=move |_| vm.form.edit(&for_edit)>"Edit"</button>
                                <button type="button" class="text-link underline" on:click=move |_| vm.toggle_action.dispatch(id.clone())>
                                    {if vendor.is_active { "Deactivate" } else { "Activate" }}
                                </button>
                                <button type="button" class="text-action-danger-text underline"
                                    on:click=move |_| vm.pending_delete.set(Some(for_delete.clone()))>"Delete"</button>
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[component]
pub fn VendorsPage() -> impl IntoView {
    let vm = use_vendors_view_model();
    let delete_open = Signal::derive(move || vm.pending_delete.get().is_some());
    let delete_message = Signal::derive(move || {
        vm.pending_delete
            .get()
            .map(|v| format!("\"{}\" will no longer be offered on new expenses.", v.name))
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="space-y-6">
                <h1 class="text-2xl font-bold text-fg">"Vendors"</h1>
                <MessageBanner message=vm.message />
                <form class="flex gap-2" on:submit=move |ev: SubmitEvent| { ev.prevent_default(); vm.apply_search(); }>
                    <input id="vendor-search" type="search" class="flex-1 border border-form-control-border rounded px-2 py-1 text-sm"
                        placeholder="Search vendors" prop:value=vm.search_input
                        on:input=move |ev| vm.search_input.set(event_target_value(&ev)) />
                    <button type="submit" class="px-3 py-1 rounded text-sm border border-border">"Search"</button>
                </form>
                <div class="grid grid-cols-1 gap-6 lg:grid-cols-3">
                    <div class="lg:col-span-2">
                        <Transition fallback=|| view! { <LoadingSpinner /> }>
                            {move || vm.vendors.get().map(|result| match result {
                                Ok(list) if list.is_empty() => view! {
                                    <EmptyState title="No vendors found" icon="fa-store" />
                                }.into_view(),
                                Ok(list) => view! { <VendorTable vm=vm vendors=list /> }.into_view(),
                                Err(err) => {
                                    let error = Signal::derive(move || Some(err.clone()));
                                    view! { <InlineErrorMessage error=error /> }.into_view()
                                }
                            })}
                        </Transition>
                    </div>
                    <VendorForm vm=vm />
                </div>
                <DeleteDialog
                    is_open=delete_open
                    subject="vendor"
                    detail=delete_message
                    pending=vm.delete_action.pending()
                    on_confirm=Callback::new(move |_| {
                        if let Some(vendor) = vm.pending_delete.get_untracked() {
                            vm.delete_action.dispatch(vendor.id);
                        }
                    })
                    on_cancel=Callback::new(move |_| vm.pending_delete.set(None))
                />
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{accountant_user, provide_auth};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn vendors_page_renders_search_and_form() {
        let html = render_to_string(move || {
            provide_auth(Some(accountant_user()));
            view! { <VendorsPage /> }
        });
        assert!(html.contains("vendor-search"));
        assert!(html.contains("vendor-name"));
        assert!(html.contains("New vendor"));
    }

    #[test]
    fn table_falls_back_to_email_for_contact() {
        let html = render_to_string(move || {
            let vm = use_vendors_view_model();
            let vendors = vec![Vendor {
                id: "v1".into(),
                name: "Acme".into(),
                code: None,
                contact_name: None,
                email: Some("billing@acme.test".into()),
                phone: None,
                is_active: true,
            }];
            view! { <VendorTable vm=vm vendors=vendors /> }
        });
        assert!(html.contains("billing@acme.test"));
        assert!(html.contains("Deactivate"));
    }
}
