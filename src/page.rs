//! Page bootstrap: loading screen, then the main page and all its widgets.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::config::HomepageConfig;
use crate::particles::animator;
use crate::{dom, holiday, ip_info, layout, mascot, panel, quote};

/// Kick off the page sequence. Returns immediately; the work runs on the
/// browser's microtask queue.
pub fn start(config: HomepageConfig) -> Result<(), JsValue> {
    let doc = dom::document()?;
    spawn_local(async move {
        if let Err(e) = run(doc, config).await {
            log::error!("homepage init failed: {:?}", e);
        }
    });
    Ok(())
}

async fn run(doc: Document, config: HomepageConfig) -> Result<(), JsValue> {
    log::info!("loading screen: typing quote");
    quote::load_quote(
        &doc,
        &config.quote_endpoint,
        "loading-quote",
        "loading-author",
        Some(config.typewriter_speed_ms),
    )
    .await?;

    dom::sleep(config.loading_hold_ms).await?;
    show_main_page(&doc)?;

    match animator::start_particles(&doc, &config) {
        // dropping the handle leaves the loop running for the page lifetime
        Ok(_animation) => {}
        Err(e) => log::error!("particles unavailable: {:?}", e),
    }

    init_main_page(&doc, &config)?;
    log::info!("homepage ready");
    Ok(())
}

/// Set up every main-page widget. The quote and IP lookups run as their own
/// tasks, so a slow or hung API only leaves its widget empty.
pub fn init_main_page(doc: &Document, config: &HomepageConfig) -> Result<(), JsValue> {
    {
        let (doc, endpoint) = (doc.clone(), config.quote_endpoint.clone());
        spawn_local(async move {
            if let Err(e) = quote::load_quote(&doc, &endpoint, "quote-content", "quote-author", None).await {
                log::error!("quote unavailable: {:?}", e);
            }
        });
    }
    refresh_background(doc, config)?;
    schedule_quote_refresh(doc, config)?;

    panel::init_modules(doc)?;
    let (month, day) = holiday::today();
    holiday::init_holiday_greeting(doc, month, day)?;
    layout::init_responsive_layout()?;
    {
        let (doc, endpoint) = (doc.clone(), config.ip_endpoint.clone());
        spawn_local(async move {
            if let Err(e) = ip_info::load_ip_info(&doc, &endpoint).await {
                log::error!("ip panel unavailable: {:?}", e);
            }
        });
    }
    mascot::init_mascot(doc)
}

fn show_main_page(doc: &Document) -> Result<(), JsValue> {
    let loading: HtmlElement = dom::by_id(doc, "loading-screen")?;
    loading.style().set_property("opacity", "0")?;
    loading.style().set_property("visibility", "hidden")?;

    let main: HtmlElement = dom::by_id(doc, "main-page")?;
    main.style().set_property("display", "flex")?;
    log::info!("main page shown");
    Ok(())
}

fn refresh_background(doc: &Document, config: &HomepageConfig) -> Result<(), JsValue> {
    let img: HtmlImageElement = dom::by_id(doc, "background-wallpaper")?;
    let url = config.background_url(dom::now_ms());
    log::debug!("background: {}", url);
    img.set_src(&url);
    Ok(())
}

fn schedule_quote_refresh(doc: &Document, config: &HomepageConfig) -> Result<(), JsValue> {
    let doc = doc.clone();
    let endpoint = config.quote_endpoint.clone();
    dom::set_interval(config.quote_refresh_ms, move || {
        let doc = doc.clone();
        let endpoint = endpoint.clone();
        spawn_local(async move {
            if let Err(e) = quote::load_quote(&doc, &endpoint, "quote-content", "quote-author", None).await {
                log::warn!("quote refresh failed: {:?}", e);
            }
        });
    })?;
    Ok(())
}
