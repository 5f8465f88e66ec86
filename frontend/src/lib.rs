mod api;
mod components;
pub mod config;
mod pages;
mod router;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

pub use router::{app_root, mount_app};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", err).into());
    }
    log::info!("Starting HRMS Lite frontend");

    // window.__HRMS_ENV / __HRMS_CONFIG win over ./config.json when present.
    // The page reads the default employee and time zone on first render.
    leptos::spawn_local(config::init_then(mount_app));
}
