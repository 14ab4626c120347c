use crate::pages::expenses::view_model::ExpenseFormViewModel;
use leptos::*;

/// Attach, show and remove the receipt file of the expense being edited.
#[component]
pub fn ReceiptField(vm: ExpenseFormViewModel) -> impl IntoView {
    let uploading = vm.upload_action.pending();
    let removing = vm.remove_receipt_action.pending();

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            spawn_local(async move {
                match crate::utils::download::read_file_bytes(&file).await {
                    Ok(bytes) => vm.upload_action.dispatch((bytes, file.name(), file.type_())),
                    Err(err) => log::error!("could not read receipt: {}", err),
                }
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = ev;
    };

    view! {
        <div class="space-y-2">
            <span class="block text-sm font-medium text-fg">"Receipt"</span>
            {move || match vm.form.file_id.get() {
                Some(file_id) => {
                    let to_remove = file_id.clone();
                    view! {
                        <div class="flex items-center gap-3 text-sm">
                            <i class="fas fa-paperclip text-fg-muted" aria-hidden="true"></i>
                            <span class="text-fg" id="receipt-file">{file_id}</span>
                            <button
                                type="button"
                                class="text-action-danger-text underline disabled:opacity-50"
                                disabled=move || removing.get()
                                on:click=move |_| vm.remove_receipt_action.dispatch(to_remove.clone())
                            >
                                "Remove"
                            </button>
                        </div>
                    }
                    .into_view()
                }
                None => view! {
                    <input
                        id="receipt-upload"
                        type="file"
                        accept="image/*,application/pdf"
                        class="text-sm"
                        disabled=move || uploading.get()
                        on:change=on_change
                    />
                }
                .into_view(),
            }}
            <Show when=move || uploading.get()>
                <p class="text-xs text-fg-muted">"Uploading..."</p>
            </Show>
        </div>
    }
}
