use crate::api::{ExpenseStatus, Role};
use crate::workflow::{approval_gate_visible, TransitionDraft};
use leptos::*;

#[component]
pub fn ApprovalPanel(
    #[prop(into)] role: Signal<Option<Role>>,
    #[prop(into)] status: Signal<ExpenseStatus>,
    notes: RwSignal<String>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<TransitionDraft>,
) -> impl IntoView {
    let return_enabled = move || !pending.get() && !notes.get().trim().is_empty();
    let send = move |target: ExpenseStatus| {
        on_submit.call(
            TransitionDraft::new(ExpenseStatus::Submitted, target).with_notes(notes.get_untracked()),
        );
    };

    view! {
        <Show when=move || approval_gate_visible(role.get(), status.get())>
            <div id="approval-panel" class="bg-surface-elevated shadow rounded-lg p-4 space-y-3 border-l-4 border-status-info-border">
                <h3 class="text-sm font-semibold text-fg">"Approval"</h3>
                <p class="text-xs text-fg-muted">
                    "Approve the expense, or return it to the submitter with an explanation."
                </p>
                <textarea
                    id="approval-notes"
                    class="w-full border border-form-control-border rounded px-2 py-1 text-sm"
                    placeholder="Notes"
                    prop:value=notes
                    on:input=move |ev| notes.set(event_target_value(&ev))
                ></textarea>
                <div class="flex gap-2">
                    <button
                        type="button"
                        id="approval-approve"
                        class="px-3 py-2 rounded text-sm text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                        disabled=move || pending.get()
                        on:click=move |_| send(ExpenseStatus::Approved)
                    >
                        <i class="fas fa-check mr-1" aria-hidden="true"></i>
                        "Approve"
                    </button>
                    <button
                        type="button"
                        id="approval-return"
                        aria-disabled=move || (!return_enabled()).to_string()
                        class="px-3 py-2 rounded text-sm text-action-danger-text bg-action-danger-bg disabled:opacity-50"
                        disabled=move || !return_enabled()
                        on:click=move |_| send(ExpenseStatus::Draft)
                    >
                        <i class="fas fa-undo mr-1" aria-hidden="true"></i>
                        "Return to draft"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::{opening_tag, render_to_string};

    fn render(role: Option<Role>, status: ExpenseStatus, notes: &str) -> String {
        let notes = notes.to_string();
        render_to_string(move || {
            let notes = create_rw_signal(notes);
            view! {
                <ApprovalPanel
                    role=Signal::derive(move || role)
                    status=Signal::derive(move || status)
                    notes=notes
                    pending=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                />
            }
        })
    }

    #[test]
    fn visible_only_to_accountants_on_submitted_expenses() {
        for status in ExpenseStatus::ALL {
            for role in [None, Some(Role::User), Some(Role::Accountant), Some(Role::Unknown)] {
                let html = render(role, status, "");
                let expected = role == Some(Role::Accountant) && status == ExpenseStatus::Submitted;
                assert_eq!(
                    html.contains("approval-panel"),
                    expected,
                    "role {:?} status {:?}",
                    role,
                    status
                );
            }
        }
    }

    #[test]
    fn return_requires_notes_but_approve_does_not() {
        let html = render(Some(Role::Accountant), ExpenseStatus::Submitted, "  ");
        assert!(opening_tag(&html, "approval-return")
            .unwrap()
            .contains("aria-disabled=\"true\""));
        assert!(html.contains("approval-approve"));

        let html = render(Some(Role::Accountant), ExpenseStatus::Submitted, "Wrong vendor");
        assert!(opening_tag(&html, "approval-return")
            .unwrap()
            .contains("aria-disabled=\"false\""));
    }
}
