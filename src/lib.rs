//! Seasonal homepage crate.
//!
//! Renders a personal homepage in the browser: a typewriter loading screen,
//! seasonal falling particles on a full-viewport canvas, a quote widget, a
//! tabbed module panel, holiday lanterns, an IP panel and a chatty mascot.
//! The particle core (`particles`) is plain Rust over a `DrawSurface` trait so
//! it runs and tests natively; everything else is DOM glue.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod holiday;
pub mod ip_info;
pub mod layout;
pub mod mascot;
pub mod page;
pub mod panel;
pub mod particles;
pub mod quote;

pub use config::HomepageConfig;
pub use particles::animator::{ParticleAnimation, start_particle_field};
pub use particles::{POOL_SIZE, Particle, ParticleField, ResizePolicy, ShapePrimitive, Variant, draw_shape};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Info until a config asks otherwise; a second init is a no-op error.
    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Start the homepage with the default configuration.
#[wasm_bindgen]
pub fn start_homepage() -> Result<(), JsValue> {
    page::start(HomepageConfig::default())
}

/// Start the homepage with a JSON configuration; missing keys take defaults.
#[wasm_bindgen]
pub fn start_homepage_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = HomepageConfig::from_json(config_json).map_err(|e| JsValue::from_str(&format!("bad config: {e}")))?;
    log::set_max_level(config.level().to_level_filter());
    page::start(config)
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
