use leptos::*;

#[component]
pub fn Pagination(
    page: RwSignal<u32>,
    total_pages: u32,
    total: u64,
    #[prop(default = "items")] noun: &'static str,
) -> impl IntoView {
    let current = move || page.get().min(total_pages.max(1));
    view! {
        <div class="flex items-center justify-between text-sm text-fg-muted">
            <span>{move || format!("Page {} of {} ({} {})", current(), total_pages.max(1), total, noun)}</span>
            <div class="flex gap-2">
                <button
                    type="button"
                    class="px-3 py-1 rounded border border-border disabled:opacity-50"
                    disabled=move || current() <= 1
                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <button
                    type="button"
                    class="px-3 py-1 rounded border border-border disabled:opacity-50"
                    disabled=move || current() >= total_pages
                    on:click=move |_| page.update(|p| *p += 1)
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
