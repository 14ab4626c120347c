use leptos::*;

use crate::{
    api::{ApiClient, ApiError},
    config,
    state::auth::use_auth,
    utils::poll::{start_poll, PollHandle},
};

#[derive(Clone, Copy)]
pub struct NotificationState {
    pub unread: RwSignal<u32>,
}

pub fn use_notifications() -> NotificationState {
    match use_context::<NotificationState>() {
        Some(state) => state,
        None => {
            let state = NotificationState {
                unread: create_rw_signal(0),
            };
            provide_context(state);
            state
        }
    }
}

pub async fn refresh_unread(api: &ApiClient, state: NotificationState) -> Result<u32, ApiError> {
    let count = api.get_unread_count().await?;
    state.unread.set(count);
    Ok(count)
}

/// Keeps the unread badge current while a user is signed in. The interval is
/// cleared when the owning component is torn down.
#[component]
pub fn NotificationPoller() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let state = use_notifications();
    let (auth, _) = use_auth();
    let poll = store_value(PollHandle::default());

    let tick = {
        let api = api.clone();
        move || {
            if !auth.get_untracked().is_authenticated {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                if let Err(err) = refresh_unread(&api, state).await {
                    log::debug!("unread count refresh failed: {}", err);
                }
            });
        }
    };

    create_effect(move |_| {
        let signed_in = auth.get().is_authenticated;
        poll.update_value(|handle| handle.cancel());
        if signed_in {
            tick();
            let period = config::current().poll_interval_ms();
            poll.set_value(start_poll(period, tick.clone()));
        } else {
            state.unread.set(0);
        }
    });

    on_cleanup(move || {
        poll.try_update_value(|handle| handle.cancel());
    });
}
