//! Small browser helpers shared by the page widgets: element lookup, timers
//! and JSON fetch.

use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, Request, RequestInit, RequestMode, Response, Window, window};

pub fn win() -> Result<Window, JsValue> {
    window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    win()?.document().ok_or_else(|| JsValue::from_str("no document"))
}

/// Element by id, cast to the requested type.
pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has unexpected element type")))
}

/// First element matching `selector`, as an `HtmlElement`.
pub fn query(doc: &Document, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(doc.query_selector(selector)?.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

/// All elements matching `selector` that are `HtmlElement`s, in document order.
pub fn query_all(doc: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let list = doc.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Viewport size in CSS pixels.
pub fn viewport_size(win: &Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

// --- Timers -----------------------------------------------------------------

/// Run `f` once after `ms` milliseconds.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) -> Result<i32, JsValue> {
    let cb = Closure::once_into_js(f);
    win()?.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
}

/// Run `f` every `ms` milliseconds for the lifetime of the page.
pub fn set_interval(ms: i32, f: impl FnMut() + 'static) -> Result<i32, JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    let id = win()?
        .set_interval_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), ms)?;
    closure.forget();
    Ok(id)
}

/// Future resolving after `ms` milliseconds.
pub async fn sleep(ms: i32) -> Result<(), JsValue> {
    let w = win()?;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Err(e) = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms) {
            log::warn!("set_timeout failed: {:?}", e);
        }
    });
    JsFuture::from(promise).await?;
    Ok(())
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

// --- Fetch ------------------------------------------------------------------

/// GET `url` and decode the body as JSON into `T`.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(url, &opts)?;

    let resp: Response = JsFuture::from(win()?.fetch_with_request(&request)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("{url}: HTTP {}", resp.status())));
    }
    let text = JsFuture::from(resp.text()?).await?;
    let body = text.as_string().ok_or_else(|| JsValue::from_str("response body is not text"))?;
    serde_json::from_str(&body).map_err(|e| JsValue::from_str(&format!("{url}: {e}")))
}
