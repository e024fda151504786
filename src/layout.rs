//! Mobile/desktop classification, re-evaluated on every viewport resize.
//! The CSS does the actual layout; this only tags `<body data-layout=..>`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;

pub const MOBILE_MAX_WIDTH: f64 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    Mobile,
    Desktop,
}

impl LayoutMode {
    pub fn for_width(width: f64) -> Self {
        if width <= MOBILE_MAX_WIDTH { LayoutMode::Mobile } else { LayoutMode::Desktop }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Mobile => "mobile",
            LayoutMode::Desktop => "desktop",
        }
    }

    /// Line logged at info level on every layout pass.
    pub fn log_line(self, width: f64, height: f64) -> String {
        format!("viewport {width}x{height} -> {} layout", self.as_str())
    }
}

fn apply_layout() -> Result<LayoutMode, JsValue> {
    let win = dom::win()?;
    let (w, h) = dom::viewport_size(&win);
    let mode = LayoutMode::for_width(w);
    log::info!("{}", mode.log_line(w, h));
    if let Some(body) = dom::document()?.body() {
        body.set_attribute("data-layout", mode.as_str())?;
    }
    Ok(mode)
}

pub fn init_responsive_layout() -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move || {
        if let Err(e) = apply_layout() {
            log::warn!("layout update failed: {:?}", e);
        }
    }) as Box<dyn FnMut()>);
    dom::win()?.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    apply_layout().map(|_| ())
}
