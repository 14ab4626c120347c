use crate::api::{ApiClient, ApiError, Notification, Paginated};
use crate::components::feedback::{apply_result, MessageState};
use crate::pages::notifications::repository::NotificationsRepository;
use crate::state::notifications::use_notifications;
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct NotificationsViewModel {
    pub page: RwSignal<u32>,
    pub unread_only: RwSignal<bool>,
    pub notifications: Resource<(u32, bool, u32), Result<Paginated<Notification>, ApiError>>,
    pub mark_read_action: Action<String, Result<(), ApiError>>,
    pub mark_all_action: Action<(), Result<(), ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
    pub message: RwSignal<MessageState>,
}

pub fn use_notifications_view_model() -> NotificationsViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(NotificationsRepository::new_with_client(Rc::new(api)));
    let badge = use_notifications();
    let page = create_rw_signal(1u32);
    let unread_only = create_rw_signal(false);
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(MessageState::default());

    let notifications = create_resource(
        move || (page.get(), unread_only.get(), reload.get()),
        move |(page, unread_only, _)| {
            let repo = repository.get_value();
            async move { repo.list(page, unread_only).await }
        },
    );

    let mark_read_action = create_action(move |id: &String| {
        let repo = repository.get_value();
        let id = id.clone();
        async move { repo.mark_read(&id, badge).await }
    });
    let mark_all_action = create_action(move |_: &()| {
        let repo = repository.get_value();
        async move { repo.mark_all_read(badge).await }
    });
    let delete_action = create_action(move |id: &String| {
        let repo = repository.get_value();
        let id = id.clone();
        async move { repo.delete(&id, badge).await }
    });

    let bump = move || reload.update(|value| *value = value.wrapping_add(1));
    create_effect(move |_| match mark_read_action.value().get() {
        Some(Ok(())) => bump(),
        Some(Err(err)) => message.update(|m| m.set_error(err)),
        None => {}
    });
    create_effect(move |_| {
        if apply_result(mark_all_action.value().get(), message, "All notifications marked as read.") {
            bump();
        }
    });
    create_effect(move |_| {
        if apply_result(delete_action.value().get(), message, "Notification deleted.") {
            bump();
        }
    });
    // Leaving the last page empty after a delete steps back one page.
    create_effect(move |_| {
        if let Some(Ok(current)) = notifications.get() {
            if current.items.is_empty() && current.page > 1 {
                page.set(current.page - 1);
            }
        }
    });

    NotificationsViewModel {
        page,
        unread_only,
        notifications,
        mark_read_action,
        mark_all_action,
        delete_action,
        message,
    }
}
