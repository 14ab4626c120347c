use leptos::*;

/// Runs `f` inside a fresh reactive runtime. Resource loads are suppressed so
/// view models can be built without a local task set or a backend.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    leptos_reactive::suppress_resource_load(true);
    let result = f();
    leptos_reactive::suppress_resource_load(false);
    runtime.dispose();
    result
}

/// Renders with resource loading suppressed, so views show their pending
/// fallbacks instead of reaching the network.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    with_runtime(|| view().into_view().render_to_string().to_string())
}

/// The opening tag of the element carrying `id="{id}"`, for attribute checks.
pub fn opening_tag<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let marker = format!("id=\"{}\"", id);
    let at = html.find(&marker)?;
    let start = html[..at].rfind('<')?;
    let end = at + html[at..].find('>')?;
    Some(&html[start..=end])
}
