use crate::{components::error::InlineErrorMessage, pages::register::view_model::use_register_view_model};
use leptos::{ev::SubmitEvent, *};

const INPUT_CLASS: &str = "block w-full px-3 py-2 border border-form-control-border bg-form-control-bg text-fg rounded-md focus:outline-none sm:text-sm";

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let vm = use_register_view_model();
    let pending = vm.register_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4">
            <div class="max-w-md w-full space-y-6">
                <h2 class="text-center text-3xl font-extrabold text-fg">"Create your account"</h2>
                <form class="space-y-4" on:submit=on_submit>
                    <input id="name" type="text" class=INPUT_CLASS placeholder="Full name"
                        prop:value=vm.form.name
                        on:input=move |ev| vm.form.name.set(event_target_value(&ev)) />
                    <input id="email" type="email" class=INPUT_CLASS placeholder="Email"
                        prop:value=vm.form.email
                        on:input=move |ev| vm.form.email.set(event_target_value(&ev)) />
                    <input id="password" type="password" class=INPUT_CLASS placeholder="Password"
                        prop:value=vm.form.password
                        on:input=move |ev| vm.form.password.set(event_target_value(&ev)) />
                    <input id="confirm" type="password" class=INPUT_CLASS placeholder="Confirm password"
                        prop:value=vm.form.confirm
                        on:input=move |ev| vm.form.confirm.set(event_target_value(&ev)) />

                    <InlineErrorMessage error=vm.error.into() />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full py-2 px-4 text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Creating account..." } else { "Create account" }}
                    </button>
                    <p class="text-center text-sm text-fg-muted">
                        "Already registered? "
                        <a href="/login" class="text-link hover:underline">"Sign in"</a>
                    </p>
                </form>
            </div>
        </div>
    }
}
