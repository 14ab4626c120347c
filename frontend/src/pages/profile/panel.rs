use crate::components::{feedback::MessageBanner, layout::Layout};
use crate::pages::profile::view_model::use_profile_view_model;
use crate::state::auth::use_auth;
use leptos::{ev::SubmitEvent, *};

fn text_input(
    id: &'static str,
    label: &'static str,
    kind: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <label class="block text-sm font-medium text-fg" for=id>
            {label}
            <input id=id type=kind
                class="mt-1 w-full border border-form-control-border rounded px-2 py-1 text-sm"
                prop:value=value on:input=move |ev| value.set(event_target_value(&ev)) />
        </label>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let vm = use_profile_view_model();
    let (auth, _) = use_auth();
    let form = vm.form;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <Layout>
            <div class="max-w-xl space-y-6">
                <h1 class="text-2xl font-bold text-fg">"Profile"</h1>
                {move || auth.get().user.map(|user| view! {
                    <p class="text-sm text-fg-muted" id="profile-identity">
                        {format!("{} ({})", user.email, user.role.label())}
                    </p>
                })}
                <MessageBanner message=vm.message />
                <form class="bg-surface-elevated shadow rounded-lg p-6 space-y-4" on:submit=on_submit>
                    {text_input("profile-name", "Name", "text", form.name)}
                    {text_input("profile-department", "Department", "text", form.department)}
                    <fieldset class="space-y-3 pt-2 border-t border-border">
                        <legend class="text-sm font-semibold text-fg">"Change password"</legend>
                        {text_input("profile-current-password", "Current password", "password", form.current_password)}
                        {text_input("profile-new-password", "New password", "password", form.new_password)}
                        {text_input("profile-confirm-password", "Confirm new password", "password", form.confirm_password)}
                    </fieldset>
                    <button type="submit"
                        class="px-4 py-2 rounded text-sm text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                        disabled=move || vm.save_action.pending().get()>
                        {move || if vm.save_action.pending().get() { "Saving..." } else { "Save changes" }}
                    </button>
                </form>
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
    fn profile_page_shows_identity_and_fields() {
        let html = render_to_string(move || {
            provide_auth(Some(accountant_user()));
            view! { <ProfilePage /> }
        });
        assert!(html.contains("avery@example.com"));
        assert!(html.contains("Accountant"));
        assert!(html.contains("profile-new-password"));
    }
}
