use crate::api::StatusHistoryEntry;
use crate::components::status_badge::StatusBadge;
use crate::utils::time::format_datetime;
use leptos::*;

#[component]
pub fn StatusHistory(entries: Vec<StatusHistoryEntry>) -> impl IntoView {
    if entries.is_empty() {
        return view! { <p class="text-sm text-fg-muted">"No status changes yet."</p> }.into_view();
    }
    view! {
        <ol class="relative border-l border-border space-y-4 ml-2">
            {entries
                .into_iter()
                .map(|entry| {
                    let actor = entry.changed_by_name.clone().unwrap_or_else(|| entry.changed_by.clone());
                    view! {
                        <li class="ml-4">
                            <div class="flex items-center gap-2 text-sm">
                                {entry.from_status.map(|from| view! {
                                    <StatusBadge status=from />
                                    <i class="fas fa-arrow-right text-fg-muted" aria-hidden="true"></i>
                                })}
                                <StatusBadge status=entry.to_status />
                            </div>
                            <p class="text-xs text-fg-muted mt-1">
                                {actor}" · "{format_datetime(&entry.changed_at)}
                            </p>
                            {entry.notes.map(|notes| view! {
                                <p class="text-sm text-fg mt-1 italic">{notes}</p>
                            })}
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
    .into_view()
}
