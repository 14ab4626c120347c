mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
mod state;
mod test_support;
pub mod utils;
mod workflow;

/// Browser entry point: logging, runtime config, then the application.
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(config::current().log_level()) {
        web_sys::console::warn_1(&format!("logger already initialised: {}", err).into());
    }
    log::info!("starting expense tracker frontend");

    // window.__EXPENSE_ENV (env.js) takes precedence over ./config.json.
    leptos::spawn_local(async move {
        let config = config::init().await;
        log::set_max_level(config.log_level().to_level_filter());
        log::info!("runtime config loaded, api at {}", config.api_base_url);
    });

    router::mount_app();
}
