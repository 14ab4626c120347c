use crate::api::ExpenseStatus;
use crate::workflow::{selector_targets, TransitionDraft};
use leptos::*;

/// Whether the confirm button for a composed transition may be pressed.
pub fn can_confirm(current: ExpenseStatus, target: Option<ExpenseStatus>, notes: &str) -> bool {
    target
        .filter(|target| selector_targets(current).contains(target))
        .map(|target| TransitionDraft::new(current, target).with_notes(notes).can_submit())
        .unwrap_or(false)
}

/// One action per status reachable from `status`, except the review decisions
/// on a submitted expense. Picking an action opens a notes field; moving back
/// to draft cannot be confirmed without notes.
#[component]
pub fn TransitionSelector(
    #[prop(into)] status: Signal<ExpenseStatus>,
    selected: RwSignal<Option<ExpenseStatus>>,
    notes: RwSignal<String>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<TransitionDraft>,
) -> impl IntoView {
    let confirm_enabled =
        move || !pending.get() && can_confirm(status.get(), selected.get(), &notes.get());
    let confirm = move |_| {
        if let Some(target) = selected.get_untracked() {
            let draft = TransitionDraft::new(status.get_untracked(), target)
                .with_notes(notes.get_untracked());
            on_submit.call(draft);
        }
    };

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-3" id="transition-selector">
            <h3 class="text-sm font-semibold text-fg">"Change status"</h3>
            {move || {
                let current = status.get();
                if current.is_terminal() {
                    return view! {
                        <button
                            type="button"
                            id="transition-none"
                            disabled=true
                            aria-disabled="true"
                            class="px-3 py-2 rounded text-sm bg-surface-muted text-fg-muted cursor-not-allowed"
                        >
                            "No further status changes"
                        </button>
                    }
                    .into_view();
                }
                let targets = selector_targets(current);
                if targets.is_empty() {
                    return view! {
                        <button
                            type="button"
                            id="transition-awaiting-review"
                            disabled=true
                            aria-disabled="true"
                            class="px-3 py-2 rounded text-sm bg-surface-muted text-fg-muted cursor-not-allowed"
                        >
                            <i class="fas fa-hourglass-half mr-1" aria-hidden="true"></i>
                            "Awaiting review"
                        </button>
                    }
                    .into_view();
                }
                targets
                    .iter()
                    .copied()
                    .map(|target| {
                        view! {
                            <button
                                type="button"
                                class="transition-option mr-2 px-3 py-2 rounded text-sm border border-border hover:bg-action-ghost-bg-hover"
                                class:ring-2=move || selected.get() == Some(target)
                                data-target=target.as_str()
                                disabled=move || pending.get()
                                on:click=move |_| selected.set(Some(target))
                            >
                                <i class=format!("fas {} mr-1", target.icon()) aria-hidden="true"></i>
                                {target.action_label()}
                            </button>
                        }
                    })
                    .collect_view()
            }}
            <Show when=move || selected.get().is_some()>
                <div class="space-y-2">
                    <label for="transition-notes" class="block text-xs text-fg-muted">
                        {move || if selected.get().map(ExpenseStatus::requires_notes).unwrap_or(false) {
                            "Notes (required)"
                        } else {
                            "Notes (optional)"
                        }}
                    </label>
                    <textarea
                        id="transition-notes"
                        class="w-full border border-form-control-border rounded px-2 py-1 text-sm"
                        prop:value=notes
                        on:input=move |ev| notes.set(event_target_value(&ev))
                    ></textarea>
                    <div class="flex gap-2">
                        <button
                            type="button"
                            id="transition-confirm"
                            aria-disabled=move || (!confirm_enabled()).to_string()
                            disabled=move || !confirm_enabled()
                            class="px-3 py-2 rounded text-sm text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                            on:click=confirm
                        >
                            {move || if pending.get() { "Saving..." } else { "Confirm" }}
                        </button>
                        <button
                            type="button"
                            class="px-3 py-2 rounded text-sm text-fg-muted"
                            on:click=move |_| {
                                selected.set(None);
                                notes.set(String::new());
                            }
                        >
                            "Cancel"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
