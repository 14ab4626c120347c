use leptos::ev::KeyboardEvent;
use leptos::*;

/// Modal asking the user to confirm removing a record. `subject` names the
/// kind of record ("expense", "vendor") and `detail` says what is lost.
#[component]
pub fn DeleteDialog(
    is_open: Signal<bool>,
    subject: &'static str,
    #[prop(into)] detail: MaybeSignal<String>,
    #[prop(optional, into)] pending: MaybeSignal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let heading = format!("Delete {}", subject);
    let detail = Signal::derive(move || detail.get());
    let dismiss = move || {
        if !pending.get_untracked() {
            on_cancel.call(());
        }
    };

    view! {
        <Show when=move || is_open.get()>
            <div
                class="fixed inset-0 z-[70] flex items-end sm:items-center justify-center bg-overlay-backdrop p-4"
                on:click=move |_| dismiss()
            >
                <section
                    id="delete-dialog"
                    class="w-full max-w-sm rounded-lg border border-status-error-border bg-surface-elevated shadow-xl"
                    role="alertdialog"
                    aria-modal="true"
                    aria-labelledby="delete-dialog-title"
                    aria-describedby="delete-dialog-detail"
                    tabindex="-1"
                    on:click=|ev| ev.stop_propagation()
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            dismiss();
                        }
                    }
                >
                    <header class="flex items-center gap-3 border-b border-border px-5 py-4">
                        <i class="fas fa-trash-alt text-status-error-text"></i>
                        <h2 id="delete-dialog-title" class="text-base font-semibold text-fg">
                            {heading.clone()}
                        </h2>
                    </header>
                    <p id="delete-dialog-detail" class="px-5 py-4 text-sm text-fg-muted">
                        {move || detail.get()}
                    </p>
                    <footer class="flex justify-end gap-2 px-5 pb-5">
                        <button
                            id="delete-dialog-keep"
                            type="button"
                            class="rounded-md px-4 py-2 text-sm font-medium text-fg hover:bg-surface-muted disabled:opacity-50"
                            disabled=move || pending.get()
                            aria-disabled=move || pending.get().to_string()
                            on:click=move |_| dismiss()
                        >
                            "Keep"
                        </button>
                        <button
                            id="delete-dialog-confirm"
                            type="button"
                            class="rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
                            disabled=move || pending.get()
                            aria-disabled=move || pending.get().to_string()
                            on:click=move |_| on_confirm.call(())
                        >
                            {move || if pending.get() { "Deleting…" } else { "Delete" }}
                        </button>
                    </footer>
                </section>
            </div>
        </Show>
    }
}
