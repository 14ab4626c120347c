use crate::api::{Notification, NotificationKind};
use crate::components::{
    empty_state::EmptyState,
    error::InlineErrorMessage,
    feedback::MessageBanner,
    layout::{Layout, LoadingSpinner},
    pagination::Pagination,
};
use crate::pages::notifications::view_model::{use_notifications_view_model, NotificationsViewModel};
use crate::utils::time::format_datetime;
use leptos::*;

fn kind_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::StatusChange => "fa-arrows-rotate",
        NotificationKind::Approval => "fa-circle-check",
        NotificationKind::Import => "fa-file-import",
        NotificationKind::General => "fa-bell",
    }
}

#[component]
fn NotificationItem(vm: NotificationsViewModel, notification: Notification) -> impl IntoView {
    let read_id = notification.id.clone();
    let delete_id = notification.id.clone();
    let row_class = if notification.is_read {
        "p-4 flex gap-3 items-start"
    } else {
        "p-4 flex gap-3 items-start bg-surface-muted font-medium"
    };
    view! {
        <li class=row_class data-read=notification.is_read.to_string()>
            <i class=format!("fas {} mt-1 text-fg-muted", kind_icon(notification.kind)) aria-hidden="true"></i>
            <div class="flex-1 space-y-1">
                <p class="text-sm text-fg">{notification.title.clone()}</p>
                <p class="text-sm text-fg-muted">{notification.message.clone()}</p>
                <p class="text-xs text-fg-muted">{format_datetime(&notification.created_at)}</p>
                {notification.expense_id.clone().map(|id| view! {
                    <a class="text-xs text-link underline" href=format!("/expenses/{}", id)>"Open expense"</a>
                })}
            </div>
            <div class="flex gap-2 text-xs">
                <Show when=move || !notification.is_read>
                    {
                        let read_id = read_id.clone();
                        view! {
                            <button type="button" class="text-link underline"
                                on:click=move |_| vm.mark_read_action.dispatch(read_id.clone())>"Mark read"</button>
                        }
                    }
                </Show>
                <button type="button" class="text-action-danger-text underline"
                    on:click=move |_| vm.delete_action.dispatch(delete_id.clone())>"Delete"</button>
            </div>
        </li>
    }
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let vm = use_notifications_view_model();
    view! {
        <Layout>
            <div class="space-y-4">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold text-fg">"Notifications"</h1>
                    <div class="flex items-center gap-4 text-sm">
                        <label class="flex items-center gap-2 text-fg-muted">
                            <input type="checkbox" prop:checked=vm.unread_only
                                on:change=move |ev| {
                                    vm.unread_only.set(event_target_checked(&ev));
                                    vm.page.set(1);
                                } />
                            "Unread only"
                        </label>
                        <button id="mark-all-read" type="button" class="text-link underline disabled:opacity-50"
                            disabled=move || vm.mark_all_action.pending().get()
                            on:click=move |_| vm.mark_all_action.dispatch(())>
                            "Mark all as read"
                        </button>
                    </div>
                </div>
                <MessageBanner message=vm.message />
                <Transition fallback=|| view! { <LoadingSpinner /> }>
                    {move || vm.notifications.get().map(|result| match result {
                        Ok(page) if page.items.is_empty() => view! {
                            <EmptyState title="You're all caught up" icon="fa-bell-slash" />
                        }.into_view(),
                        Ok(page) => {
                            let total_pages = page.total_pages();
                            let total = page.total;
                            view! {
                                <ul class="bg-surface-elevated shadow rounded-lg divide-y divide-border">
                                    {page.items.into_iter().map(|n| view! { <NotificationItem vm=vm notification=n /> }).collect_view()}
                                </ul>
                                <Pagination page=vm.page total_pages=total_pages total=total noun="notifications" />
                            }.into_view()
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

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_auth, regular_user};
    use crate::test_support::ssr::render_to_string;
    use chrono::{TimeZone, Utc};

    fn notification(read: bool) -> Notification {
        Notification {
            id: "n1".into(),
            kind: NotificationKind::StatusChange,
            title: "Status changed".into(),
            message: "Hotel moved to PAID".into(),
            is_read: read,
            expense_id: Some("e9".into()),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn unread_item_offers_mark_read_and_expense_link() {
        let html = render_to_string(move || {
            let vm = use_notifications_view_model();
            view! { <ul><NotificationItem vm=vm notification=notification(false) /></ul> }
        });
        assert!(html.contains("Mark read"));
        assert!(html.contains("/expenses/e9"));
        assert!(html.contains("data-read=\"false\""));
    }

    #[test]
    fn read_item_hides_mark_read() {
        let html = render_to_string(move || {
            let vm = use_notifications_view_model();
            view! { <ul><NotificationItem vm=vm notification=notification(true) /></ul> }
        });
        assert!(!html.contains("Mark read"));
        assert!(html.contains("Delete"));
    }

    #[test]
    fn page_renders_toolbar() {
        let html = render_to_string(move || {
            provide_auth(Some(regular_user()));
            view! { <NotificationsPage /> }
        });
        assert!(html.contains("mark-all-read"));
        assert!(html.contains("Unread only"));
    }
}
