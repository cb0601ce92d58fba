pub mod config;
pub mod model;
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod ui;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use leptos::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).unwrap_or(());

    let site = config::SiteConfig::embedded()
        .and_then(|config| Ok((config, model::ContentStore::embedded()?)));

    leptos::mount_to_body(move || {
        use crate::ui::App;
        match site {
            Ok((config, content)) => view! { <App config=config content=content/> }.into_view(),
            Err(e) => {
                log::error!("Failed to load site: {:#}", e);
                view! { <p>"Error loading site: " {format!("{:#}", e)}</p> }.into_view()
            }
        }
    });
}
