use crate::state::auth::use_auth;
use leptos::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let (auth, _) = use_auth();
    let signed_in = move || auth.get().is_authenticated;
    view! {
        <div class="min-h-screen bg-surface">
            <div class="max-w-7xl mx-auto py-12 px-4 sm:px-6 lg:px-8">
                <div class="text-center">
                    <h1 class="text-4xl font-extrabold text-fg sm:text-5xl lg:text-6xl">
                        "Expense Tracker"
                    </h1>
                    <p class="mt-3 max-w-md mx-auto text-base text-fg-muted sm:text-lg lg:mt-5 lg:text-xl lg:max-w-3xl">
                        "Record expenses, attach receipts and move them through approval and payment."
                    </p>
                    <div class="mt-5 max-w-md mx-auto sm:flex sm:justify-center gap-3 lg:mt-8">
                        <Show
                            when=signed_in
                            fallback=|| view! {
                                <a href="/login" class="flex items-center justify-center px-8 py-3 rounded-md shadow text-base font-medium text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover">
                                    "Sign in"
                                </a>
                                <a href="/register" class="flex items-center justify-center px-8 py-3 rounded-md text-base font-medium text-link hover:underline">
                                    "Create an account"
                                </a>
                            }
                        >
                            <a href="/dashboard" class="flex items-center justify-center px-8 py-3 rounded-md shadow text-base font-medium text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover">
                                "Go to dashboard"
                            </a>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
