//! Calendar helpers: season of the year for particle theming and the holiday
//! greeting shown on the lantern banner.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

/// Lantern container selectors; hidden unless there is a greeting.
const LANTERN_BOXES: &str = ".deng-box, .deng-box1, .deng-box2, .deng-box3";
const LANTERN_IDS: [&str; 4] = ["lantern-1", "lantern-2", "lantern-3", "lantern-4"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// `month` is 1-based. Anything outside 3..=11 counts as winter.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

/// Local (month, day) from the browser clock, month 1-based.
pub fn today() -> (u32, u32) {
    let now = js_sys::Date::new_0();
    (now.get_month() + 1, now.get_date())
}

/// Greeting for the given date, if it is one of the celebrated days.
/// Spring festival is approximated as Jan 20 through Feb 15.
pub fn holiday_greeting(month: u32, day: u32) -> Option<&'static str> {
    match (month, day) {
        (1, 1) => Some("元旦快乐"),
        (1, 20..=31) | (2, 1..=15) => Some("春节快乐"),
        (5, 1) => Some("劳动快乐"),
        (10, 1) => Some("国庆快乐"),
        (12, 25) => Some("圣诞快乐"),
        _ => None,
    }
}

/// Characters placed on each lantern, one per lantern, extra characters dropped.
pub fn lantern_chars(greeting: &str) -> Vec<String> {
    greeting.chars().take(LANTERN_IDS.len()).map(String::from).collect()
}

/// Show or hide the lanterns for the given date and write the greeting onto them.
pub fn init_holiday_greeting(doc: &Document, month: u32, day: u32) -> Result<(), JsValue> {
    let greeting = holiday_greeting(month, day);
    let display = if greeting.is_some() { "block" } else { "none" };

    let boxes = doc.query_selector_all(LANTERN_BOXES)?;
    for i in 0..boxes.length() {
        if let Some(el) = boxes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            el.style().set_property("display", display)?;
        }
    }

    if let Some(text) = greeting {
        for (id, ch) in LANTERN_IDS.iter().zip(lantern_chars(text)) {
            if let Some(el) = doc.get_element_by_id(id) {
                el.set_text_content(Some(&ch));
            }
        }
    }
    log::info!("holiday greeting: {:?} (lanterns {})", greeting, display);
    Ok(())
}
