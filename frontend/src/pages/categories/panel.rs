use crate::api::Category;
use crate::components::{
    delete_dialog::DeleteDialog,
    empty_state::EmptyState,
    error::{FieldError, InlineErrorMessage},
    feedback::MessageBanner,
    layout::{Layout, LoadingSpinner},
};
use crate::pages::categories::view_model::{use_categories_view_model, CategoriesViewModel};
use crate::utils::time::format_datetime;
use leptos::{ev::SubmitEvent, *};

#[component]
fn CategoryForm(vm: CategoriesViewModel) -> impl IntoView {
    let form = vm.form;
    let error: Signal<Option<crate::api::ApiError>> = vm.form_error.into();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };
    view! {
        <form class="bg-surface-elevated shadow rounded-lg p-4 space-y-3" on:submit=on_submit>
            <h3 class="text-sm font-semibold text-fg">
                {move || if form.editing_id.get().is_some() { "Edit category" } else { "New category" }}
            </h3>
            <input id="category-name" class="w-full border border-form-control-border rounded px-2 py-1 text-sm" placeholder="Name"
                prop:value=form.name on:input=move |ev| form.name.set(event_target_value(&ev)) />
            <FieldError error=error field="name" />
            <input class="w-full border border-form-control-border rounded px-2 py-1 text-sm" placeholder="Code"
                prop:value=form.code on:input=move |ev| form.code.set(event_target_value(&ev)) />
            <textarea class="w-full border border-form-control-border rounded px-2 py-1 text-sm" placeholder="Description"
                prop:value=form.description on:input=move |ev| form.description.set(event_target_value(&ev))></textarea>
            <div class="flex gap-2">
                <button type="submit" class="px-3 py-2 rounded text-sm text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                    disabled=move || vm.save_action.pending().get()>
                    "Save"
                </button>
                <Show when=move || form.editing_id.get().is_some()>
                    <button type="button" class="px-3 py-2 rounded text-sm text-fg-muted" on:click=move |_| form.reset()>"Cancel"</button>
                </Show>
            </div>
        </form>
    }
}

#[component]
fn CategoryRow(vm: CategoriesViewModel, category: Category) -> impl IntoView {
    let for_edit = category.clone();
    let for_delete = category.clone();
    let id = category.id.clone();
    let usage_id = category.id.clone();
    let active = category.is_active;
    view! {
        <tr>
            <td class="px-4 py-2 text-sm text-fg">{category.name.clone()}</td>
            <td class="px-4 py-2 text-sm text-fg-muted">{category.code.clone().unwrap_or_else(|| "-".into())}</td>
            <td class="px-4 py-2 text-sm">
                {if active { "Active" } else { "Inactive" }}
            </td>
            <td class="px-4 py-2 text-sm space-x-2 text-right">
                <button type="button" class="text-link underline" on:click=move |_| vm.usage_for.set(Some(usage_id.clone()))>"Usage"</button>
                <button type="button" class="text-link underline" on:click=move |_| vm.form.edit(&for_edit)>"Edit"</button>
                <button type="button" class="text-link underline"
                    on:click=move |_| vm.toggle_action.dispatch((id.clone(), !active))>
                    {if active { "Deactivate" } else { "Activate" }}
                </button>
                <button type="button" class="text-action-danger-text underline"
                    on:click=move |_| vm.pending_delete.set(Some(for_delete.clone()))>"Delete"</button>
            </td>
        </tr>
    }
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let vm = use_categories_view_model();
    let delete_open = Signal::derive(move || vm.pending_delete.get().is_some());
    let delete_message = Signal::derive(move || {
        vm.pending_delete
            .get()
            .map(|c| format!("Delete \"{}\"? Expenses keep their category label.", c.name))
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold text-fg">"Categories"</h1>
                    <label class="text-sm text-fg-muted flex items-center gap-2">
                        <input type="checkbox" prop:checked=vm.show_inactive
                            on:change=move |ev| vm.show_inactive.set(event_target_checked(&ev)) />
                        "Show inactive"
                    </label>
                </div>
                <MessageBanner message=vm.message />
                {move || vm.statistics.get().and_then(Result::ok).map(|stats| view! {
                    <p class="text-sm text-fg-muted" id="category-stats">
                        {format!("{} categories, {} active, {} inactive", stats.total, stats.active, stats.inactive)}
                    </p>
                })}
                <div class="grid grid-cols-1 gap-6 lg:grid-cols-3">
                    <div class="lg:col-span-2">
                        <Transition fallback=|| view! { <LoadingSpinner /> }>
                            {move || vm.categories.get().map(|result| match result {
                                Ok(list) if list.is_empty() => view! {
                                    <EmptyState title="No categories yet" icon="fa-tags" />
                                }.into_view(),
                                Ok(list) => view! {
                                    <table class="min-w-full bg-surface-elevated shadow rounded-lg divide-y divide-border">
                                        <tbody class="divide-y divide-border">
                                            {list.into_iter().map(|category| view! { <CategoryRow vm=vm category=category /> }).collect_view()}
                                        </tbody>
                                    </table>
                                }.into_view(),
                                Err(err) => {
                                    let error = Signal::derive(move || Some(err.clone()));
                                    view! { <InlineErrorMessage error=error /> }.into_view()
                                }
                            })}
                        </Transition>
                    </div>
                    <div class="space-y-4">
                        <CategoryForm vm=vm />
                        {move || vm.usage.get().flatten().map(|result| match result {
                            Ok(usage) => view! {
                                <div class="bg-surface-elevated shadow rounded-lg p-4 text-sm space-y-1">
                                    <p class="font-semibold text-fg">"Usage"</p>
                                    <p>{format!("{} expenses, {:.2} total", usage.expense_count, usage.total_amount)}</p>
                                    <p class="text-fg-muted">
                                        {usage.last_used_at.map(|at| format!("Last used {}", format_datetime(&at))).unwrap_or_else(|| "Never used".into())}
                                    </p>
                                </div>
                            }.into_view(),
                            Err(err) => view! { <p class="text-sm text-status-error-text">{err.error}</p> }.into_view(),
                        })}
                    </div>
                </div>
                <DeleteDialog
                    is_open=delete_open
                    subject="category"
                    detail=delete_message
                    pending=vm.delete_action.pending()
                    on_confirm=Callback::new(move |_| {
                        if let Some(category) = vm.pending_delete.get_untracked() {
                            vm.delete_action.dispatch(category.id);
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
    fn categories_page_renders_form() {
        let html = render_to_string(move || {
            provide_auth(Some(accountant_user()));
            view! { <CategoriesPage /> }
        });
        assert!(html.contains("Categories"));
        assert!(html.contains("category-name"));
        assert!(html.contains("New category"));
    }

    #[test]
    fn row_offers_activation_for_inactive_category() {
        let html = render_to_string(move || {
            let vm = use_categories_view_model();
            let category = Category {
                id: "c2".into(),
                name: "Legacy".into(),
                code: Some("LEG".into()),
                description: None,
                is_active: false,
            };
            view! { <table><tbody><CategoryRow vm=vm category=category /></tbody></table> }
        });
        assert!(html.contains("Inactive"));
        assert!(html.contains("Activate"));
        assert!(!html.contains("Deactivate"));
    }
}
