use leptos::*;

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
    #[prop(optional, into)] icon: Option<String>,
) -> impl IntoView {
    let icon_class = format!("fas {} text-3xl", icon.unwrap_or_else(|| "fa-inbox".into()));
    view! {
        <div class="text-center py-12 px-4 rounded-lg border-2 border-dashed border-border-strong bg-surface-muted">
            <div class="mx-auto h-12 w-12 text-fg-muted">
                <i class=icon_class aria-hidden="true"></i>
            </div>
            <h3 class="mt-2 text-sm font-semibold text-fg">{title}</h3>
            {description.map(|desc| view! {
                <p class="mt-1 text-sm text-fg-muted">{desc}</p>
            })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_title_and_description() {
        let html = render_to_string(|| {
            view! { <EmptyState title="No expenses yet" description="Create your first expense." /> }
        });
        assert!(html.contains("No expenses yet"));
        assert!(html.contains("Create your first expense."));
        assert!(html.contains("fa-inbox"));
    }
}
