use crate::{
    api::Role,
    state::{
        auth::{self, use_auth},
        notifications::{use_notifications, NotificationPoller},
        ui::use_ui,
    },
};
use leptos::*;

pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub accountant_only: bool,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        href: "/dashboard",
        label: "Dashboard",
        icon: "fa-chart-pie",
        accountant_only: false,
    },
    NavItem {
        href: "/expenses",
        label: "Expenses",
        icon: "fa-receipt",
        accountant_only: false,
    },
    NavItem {
        href: "/categories",
        label: "Categories",
        icon: "fa-tags",
        accountant_only: true,
    },
    NavItem {
        href: "/vendors",
        label: "Vendors",
        icon: "fa-store",
        accountant_only: true,
    },
    NavItem {
        href: "/reports",
        label: "Reports",
        icon: "fa-file-export",
        accountant_only: false,
    },
    NavItem {
        href: "/import",
        label: "Import",
        icon: "fa-file-import",
        accountant_only: false,
    },
];

pub fn visible_nav_items(role: Option<Role>) -> Vec<&'static NavItem> {
    let privileged = role.map(Role::is_privileged).unwrap_or(false);
    NAV_ITEMS
        .iter()
        .filter(|item| privileged || !item.accountant_only)
        .collect()
}

fn badge_text(count: u32) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_string()),
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let ui = use_ui();
    let notifications = use_notifications();
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            if let Some(win) = web_sys::window() {
                let _ = win.location().set_href("/login");
            }
        }
    });
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    };
    let user_name = move || auth.get().user.map(|u| u.name).unwrap_or_default();
    let toggle_ui = ui.clone();

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-3">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            aria-label="Toggle sidebar"
                            aria-expanded=move || !ui.sidebar_collapsed()
                            on:click=move |_| toggle_ui.toggle_sidebar()
                        >
                            <i class="fas fa-bars"></i>
                        </button>
                        <h1 class="text-xl font-semibold text-fg">"Expense Tracker"</h1>
                    </div>
                    <div class="flex items-center gap-2">
                        <a
                            href="/notifications"
                            class="relative text-fg-muted hover:text-fg px-3 py-2 rounded-md hover:bg-action-ghost-bg-hover"
                            aria-label="Notifications"
                        >
                            <i class="fas fa-bell"></i>
                            {move || badge_text(notifications.unread.get()).map(|text| view! {
                                <span class="notification-badge absolute -top-1 -right-1 rounded-full bg-action-danger-bg text-action-danger-text text-xs px-1.5">
                                    {text}
                                </span>
                            })}
                        </a>
                        <a
                            href="/profile"
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                        >
                            {user_name}
                        </a>
                        <button
                            on:click=on_logout
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                            disabled=move || logout_pending.get()
                        >
                            "Sign out"
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let (auth, _) = use_auth();
    let ui = use_ui();
    let collapsed = {
        let ui = ui.clone();
        move || ui.sidebar_collapsed()
    };
    let items = move || visible_nav_items(auth.get().role());

    view! {
        <aside
            class="bg-surface-elevated border-r border-border min-h-screen transition-all"
            class:w-16=collapsed.clone()
            class:w-56=move || !collapsed()
        >
            <nav class="py-4 space-y-1">
                {move || {
                    let collapsed = ui.sidebar_collapsed();
                    items()
                        .into_iter()
                        .map(|item| view! {
                            <a
                                href=item.href
                                class="flex items-center gap-3 px-4 py-2 text-sm font-medium text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                                title=item.label
                            >
                                <i class=format!("fas {}", item.icon)></i>
                                <Show when=move || !collapsed>
                                    <span>{item.label}</span>
                                </Show>
                            </a>
                        })
                        .collect_view()
                }}
            </nav>
        </aside>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <NotificationPoller/>
            <Header/>
            <div class="flex">
                <Sidebar/>
                <main class="flex-1 py-6 px-4 sm:px-6 lg:px-8">
                    {children()}
                </main>
            </div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4" role="alert">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}
