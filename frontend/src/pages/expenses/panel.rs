use crate::api::{ExpenseStatus, Role};
use crate::components::{
    delete_dialog::DeleteDialog,
    error::InlineErrorMessage,
    feedback::MessageBanner,
    layout::{Layout, LoadingSpinner},
    pagination::Pagination,
    status_badge::StatusBadge,
};
use crate::pages::expenses::{
    components::{
        ApprovalPanel, ExpenseFilters, ExpenseForm, ExpenseTable, StatusHistory,
        TransitionSelector,
    },
    view_model::{
        use_expense_detail_view_model, use_expense_form_view_model, use_expense_list_view_model,
        ExpenseDetailViewModel,
    },
};
use crate::utils::time::{format_amount, format_date, format_datetime};
use crate::workflow::{approval_gate_visible, TransitionDraft};
use leptos::*;

#[component]
pub fn ExpensesPage(#[prop(optional)] initial_status: Option<ExpenseStatus>) -> impl IntoView {
    let vm = use_expense_list_view_model(initial_status);

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="flex items-center justify-between">
                    <div>
                        <h1 class="text-2xl font-bold text-fg">"Expenses"</h1>
                        <p class="mt-1 text-sm text-fg-muted">"Record, track and approve business expenses."</p>
                    </div>
                    <a
                        href="/expenses/new"
                        class="px-4 py-2 rounded text-sm text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover"
                    >
                        <i class="fas fa-plus mr-1" aria-hidden="true"></i>
                        "New expense"
                    </a>
                </div>
                <ExpenseFilters filter=vm.filter options=vm.options />
                <Transition fallback=|| view! { <LoadingSpinner /> }>
                    {move || vm.expenses.get().map(|result| match result {
                        Ok(page) => {
                            let total_pages = page.total_pages();
                            let total = page.total;
                            view! {
                                <div class="space-y-4">
                                    <ExpenseTable page=page />
                                    <Pagination page=vm.filter.page total_pages=total_pages total=total noun="expenses" />
                                </div>
                            }
                            .into_view()
                        }
                        Err(err) => {
                            let error = Signal::derive(move || Some(err.clone()));
                            view! { <InlineErrorMessage error=error /> }.into_view()
                        }
                    })}
                </Transition>
            </div>
        </Layout>
    }
}

#[component]
fn ExpenseSummary(vm: ExpenseDetailViewModel) -> impl IntoView {
    let status = Signal::derive(move || vm.displayed_status().unwrap_or(ExpenseStatus::Draft));
    move || {
        vm.expense().map(|expense| {
            let vendor = expense
                .vendor_name
                .clone()
                .unwrap_or_else(|| expense.vendor_id.clone());
            let vat = match (expense.vat_amount, expense.vat_rate) {
                (Some(amount), Some(rate)) => format!("{} ({:.1}%)", format_amount(amount, &expense.currency), rate),
                (Some(amount), None) => format_amount(amount, &expense.currency),
                _ => "-".to_string(),
            };
            let rows = vec![
                ("Transaction date", format_date(&expense.transaction_date)),
                ("Payment reference", expense.payment_id.clone().unwrap_or_else(|| "-".into())),
                ("Vendor", vendor),
                ("Category", expense.category.clone()),
                ("Amount", format_amount(expense.amount, &expense.currency)),
                ("VAT", vat),
                ("Description", expense.description.clone().unwrap_or_else(|| "-".into())),
                ("Last updated", format_datetime(&expense.updated_at)),
            ];
            view! {
                <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                    <div class="flex items-center justify-between">
                        <h2 class="text-lg font-semibold text-fg">{format_amount(expense.amount, &expense.currency)}</h2>
                        <span id="expense-status"><StatusBadge status=status /></span>
                    </div>
                    <dl class="grid grid-cols-1 gap-3 sm:grid-cols-2">
                        {rows
                            .into_iter()
                            .map(|(label, value)| view! {
                                <div>
                                    <dt class="text-xs uppercase text-fg-muted">{label}</dt>
                                    <dd class="text-sm text-fg">{value}</dd>
                                </div>
                            })
                            .collect_view()}
                    </dl>
                </div>
            }
        })
    }
}

/// Accountants reviewing a submitted expense get the approval panel; every
/// other case gets the generic selector.
#[component]
fn StatusControls(
    vm: ExpenseDetailViewModel,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<TransitionDraft>,
) -> impl IntoView {
    let status = Signal::derive(move || vm.displayed_status().unwrap_or(ExpenseStatus::Draft));
    let role: Signal<Option<Role>> = vm.role;

    view! {
        <ApprovalPanel
            role=role
            status=status
            notes=vm.approval_notes
            pending=pending
            on_submit=on_submit
        />
        <Show when=move || !approval_gate_visible(role.get(), status.get())>
            <TransitionSelector
                status=status
                selected=vm.selected_target
                notes=vm.transition_notes
                pending=pending
                on_submit=on_submit
            />
        </Show>
    }
}

#[component]
pub fn ExpenseDetailPage(id: String) -> impl IntoView {
    let vm = use_expense_detail_view_model(id);
    let pending: Signal<bool> = vm.transition_action.pending().into();
    let on_transition = Callback::new(move |draft: TransitionDraft| vm.submit_transition(draft));
    let is_draft = move || vm.expense().map(|e| e.status == ExpenseStatus::Draft).unwrap_or(false);
    let edit_href = move || format!("/expenses/{}/edit", vm.id.get_value());

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="flex items-center justify-between">
                    <a href="/expenses" class="text-sm text-link hover:underline">
                        <i class="fas fa-arrow-left mr-1" aria-hidden="true"></i>
                        "Back to expenses"
                    </a>
                    <Show when=is_draft>
                        <div class="flex gap-2">
                            <a href=edit_href class="px-3 py-2 rounded text-sm border border-border">"Edit"</a>
                            <button
                                type="button"
                                id="expense-delete"
                                class="px-3 py-2 rounded text-sm text-action-danger-text bg-action-danger-bg"
                                on:click=move |_| vm.confirm_delete.set(true)
                            >
                                "Delete"
                            </button>
                        </div>
                    </Show>
                </div>
                <MessageBanner message=vm.message />
                <Suspense fallback=|| view! { <LoadingSpinner /> }>
                    {move || match vm.loaded.get() {
                        Some(Err(err)) if vm.confirmed.get().is_none() => {
                            let error = Signal::derive(move || Some(err.clone()));
                            view! {
                                <InlineErrorMessage error=error />
                                <button
                                    type="button"
                                    id="expense-retry"
                                    class="px-3 py-2 rounded text-sm border border-border"
                                    on:click=move |_| vm.retry_load()
                                >
                                    "Try again"
                                </button>
                            }
                            .into_view()
                        }
                        _ => view! {
                            <div class="grid grid-cols-1 gap-6 lg:grid-cols-3">
                                <div class="lg:col-span-2 space-y-6">
                                    <ExpenseSummary vm=vm />
                                    <div class="bg-surface-elevated shadow rounded-lg p-6">
                                        <h3 class="text-sm font-semibold text-fg mb-3">"History"</h3>
                                        {move || vm.history.get().map(|result| match result {
                                            Ok(entries) => view! { <StatusHistory entries=entries /> }.into_view(),
                                            Err(err) => view! { <p class="text-sm text-status-error-text">{err.error}</p> }.into_view(),
                                        })}
                                    </div>
                                </div>
                                <div class="space-y-4">
                                    <Show when=move || vm.expense().is_some()>
                                        <StatusControls vm=vm pending=pending on_submit=on_transition />
                                    </Show>
                                    <InlineErrorMessage error=vm.transition_error.into() />
                                    {move || vm.receipt.get().flatten().map(|result| match result {
                                        Ok(file) => view! {
                                            <div class="bg-surface-elevated shadow rounded-lg p-4 text-sm">
                                                <i class="fas fa-paperclip mr-1" aria-hidden="true"></i>
                                                {match file.url.clone() {
                                                    Some(url) => view! { <a href=url target="_blank" class="text-link underline">{file.file_name.clone()}</a> }.into_view(),
                                                    None => file.file_name.clone().into_view(),
                                                }}
                                            </div>
                                        }.into_view(),
                                        Err(err) => view! { <p class="text-sm text-status-error-text">{err.error}</p> }.into_view(),
                                    })}
                                </div>
                            </div>
                        }
                        .into_view(),
                    }}
                </Suspense>
                <DeleteDialog
                    is_open=vm.confirm_delete.into()
                    subject="expense"
                    detail="This draft will be removed permanently."
                    pending=vm.delete_action.pending()
                    on_confirm=Callback::new(move |_| vm.delete_action.dispatch(()))
                    on_cancel=Callback::new(move |_| vm.confirm_delete.set(false))
                />
            </div>
        </Layout>
    }
}

#[component]
pub fn ExpenseFormPage(#[prop(optional)] id: Option<String>) -> impl IntoView {
    let vm = use_expense_form_view_model(id);
    let title = if vm.is_edit() { "Edit expense" } else { "New expense" };
    view! {
        <Layout>
            <div class="max-w-3xl space-y-6">
                <h1 class="text-2xl font-bold text-fg">{title}</h1>
                <ExpenseForm vm=vm />
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::UserResponse;
    use crate::test_support::helpers::{accountant_user, expense, provide_auth, regular_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn list_page_renders_header_and_filters() {
        let html = render_to_string(move || {
            provide_auth(Some(regular_user()));
            view! { <ExpensesPage initial_status=ExpenseStatus::Submitted /> }
        });
        assert!(html.contains("New expense"));
        assert!(html.contains("filter-status"));
    }

    #[test]
    fn detail_for_submitted_expense_shows_approval_to_accountant() {
        let html = render_to_string(move || {
            provide_auth(Some(accountant_user()));
            let vm = use_expense_detail_view_model("e1".into());
            vm.confirmed.set(Some(expense("e1", ExpenseStatus::Submitted)));
            view! {
                <StatusControls vm=vm pending=Signal::derive(|| false) on_submit=Callback::new(|_| {}) />
                <ExpenseSummary vm=vm />
            }
        });
        assert!(html.contains("approval-panel"));
        assert!(html.contains("data-status=\"SUBMITTED\""));
        assert!(!html.contains("transition-selector"));
    }

    fn render_controls(user: Option<UserResponse>, status: ExpenseStatus) -> String {
        render_to_string(move || {
            provide_auth(user);
            let vm = use_expense_detail_view_model("e1".into());
            vm.confirmed.set(Some(expense("e1", status)));
            view! {
                <StatusControls vm=vm pending=Signal::derive(|| false) on_submit=Callback::new(|_| {}) />
            }
        })
    }

    #[test]
    fn submitted_expense_hides_review_actions_from_users() {
        let html = render_controls(Some(regular_user()), ExpenseStatus::Submitted);
        assert!(!html.contains("approval-panel"));
        assert!(!html.contains("data-target=\"APPROVED\""));
        assert!(!html.contains("data-target=\"DRAFT\""));
        assert!(html.contains("transition-awaiting-review"));
    }

    #[test]
    fn review_actions_appear_only_for_accountant_on_submitted() {
        for status in ExpenseStatus::ALL {
            for (user, is_accountant) in [
                (None, false),
                (Some(regular_user()), false),
                (Some(accountant_user()), true),
            ] {
                let html = render_controls(user, status);
                let expected = is_accountant && status == ExpenseStatus::Submitted;
                assert_eq!(html.contains("approval-approve"), expected, "{:?}", status);
                assert_eq!(html.contains("approval-return"), expected, "{:?}", status);
                if status == ExpenseStatus::Submitted {
                    assert!(!html.contains("data-target=\"APPROVED\""));
                    assert!(!html.contains("data-target=\"DRAFT\""));
                }
            }
        }
    }

    #[test]
    fn draft_expense_for_user_offers_only_submit() {
        let html = render_to_string(move || {
            provide_auth(Some(regular_user()));
            let vm = use_expense_detail_view_model("e1".into());
            vm.confirmed.set(Some(expense("e1", ExpenseStatus::Draft)));
            view! {
                <StatusControls vm=vm pending=Signal::derive(|| false) on_submit=Callback::new(|_| {}) />
            }
        });
        assert!(!html.contains("approval-panel"));
        assert!(html.contains("data-target=\"SUBMITTED\""));
        assert!(!html.contains("data-target=\"APPROVED\""));
    }

    #[test]
    fn form_page_titles_follow_mode() {
        let html = render_to_string(|| view! { <ExpenseFormPage /> });
        assert!(html.contains("New expense"));
        assert!(html.contains("Create expense"));
        let html = render_to_string(|| view! { <ExpenseFormPage id="e1".to_string() /> });
        assert!(html.contains("Edit expense"));
    }
}
