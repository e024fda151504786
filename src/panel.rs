//! Tabbed "module" content panel: about / tech / hobby sections switched by
//! nav buttons (click, hover) or a horizontal swipe on the nav.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, TouchEvent};

use crate::dom;

/// Horizontal travel (px) a touch must cover to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

pub struct PanelModule {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

pub const MODULES: [PanelModule; 3] = [
    PanelModule {
        id: "about",
        title: "关于我",
        content: "你好！我是一个热爱编程和技术的人。\n\n我喜欢探索新的技术领域，不断学习和成长。\n\n在我的个人主页上，你可以了解我的技术栈和兴趣爱好。\n\n欢迎访问我的个人主页！",
    },
    PanelModule {
        id: "tech",
        title: "技术栈",
        content: "前端技术：HTML5、CSS3、JavaScript、React\n\n后端技术：Node.js、Express、Python、Java\n\n数据库：MySQL、MongoDB\n\n其他：Git、Docker、Linux",
    },
    PanelModule {
        id: "hobby",
        title: "兴趣爱好",
        content: "编程：喜欢编写代码，解决问题\n\n阅读：喜欢阅读技术书籍和文章\n\n音乐：喜欢听各种类型的音乐\n\n运动：喜欢跑步和游泳\n\n旅行：喜欢去不同的地方旅行，了解不同的文化",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    Next,     // finger moved left
    Previous, // finger moved right
}

/// Classify a touch from its start and end x; short moves are not swipes.
pub fn classify_swipe(start_x: f64, end_x: f64) -> Option<Swipe> {
    let diff = start_x - end_x;
    if diff.abs() <= SWIPE_THRESHOLD_PX {
        None
    } else if diff > 0.0 {
        Some(Swipe::Next)
    } else {
        Some(Swipe::Previous)
    }
}

/// Index reached from `current` by `swipe`, wrapping at both ends.
pub fn swipe_target(current: usize, len: usize, swipe: Swipe) -> usize {
    if len == 0 {
        return 0;
    }
    match swipe {
        Swipe::Next => (current + 1) % len,
        Swipe::Previous => (current + len - 1) % len,
    }
}

/// Indicator (top, height) for a button, relative to its nav container.
pub fn indicator_geometry(button_top: f64, button_height: f64, nav_top: f64, nav_scroll_top: f64) -> (f64, f64) {
    (button_top - nav_top + nav_scroll_top, button_height)
}

// --- DOM wiring -------------------------------------------------------------

fn render_modules(doc: &Document) -> Result<(), JsValue> {
    let container: HtmlElement = dom::by_id(doc, "module-content")?;
    for (i, m) in MODULES.iter().enumerate() {
        let el = doc.create_element("div")?;
        el.set_class_name(if i == 0 { "module active" } else { "module" });
        el.set_id(&format!("module-{}", m.id));

        let title: HtmlElement = doc.create_element("h3")?.dyn_into()?;
        title.set_text_content(Some(m.title));
        title.style().set_property("color", "#34495e")?;
        title.style().set_property("margin-bottom", "20px")?;

        let body: HtmlElement = doc.create_element("p")?.dyn_into()?;
        body.set_text_content(Some(m.content));
        body.style().set_property("white-space", "pre-wrap")?;

        el.append_child(&title)?;
        el.append_child(&body)?;
        container.append_child(&el)?;
    }
    Ok(())
}

fn show_module(doc: &Document, id: &str) -> Result<(), JsValue> {
    for el in dom::query_all(doc, ".module")? {
        el.class_list().remove_1("active")?;
    }
    if let Some(el) = doc.get_element_by_id(&format!("module-{id}")) {
        el.class_list().add_1("active")?;
    }
    Ok(())
}

fn move_indicator(indicator: &HtmlElement, button: &HtmlElement) -> Result<(), JsValue> {
    let Some(nav) = button.parent_element() else { return Ok(()) };
    let rect = button.get_bounding_client_rect();
    let nav_rect = nav.get_bounding_client_rect();
    let (top, height) = indicator_geometry(rect.top(), rect.height(), nav_rect.top(), nav.scroll_top() as f64);
    indicator.style().set_property("top", &format!("{top}px"))?;
    indicator.style().set_property("height", &format!("{height}px"))?;
    Ok(())
}

fn mark_button(buttons: &[HtmlElement], target: &HtmlElement, class: &str) -> Result<(), JsValue> {
    for b in buttons {
        b.class_list().remove_2("active", "hover")?;
    }
    target.class_list().add_1(class)
}

fn on(el: &HtmlElement, event: &str, f: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Render the modules and hook up the nav buttons, indicator and swipe.
pub fn init_modules(doc: &Document) -> Result<(), JsValue> {
    render_modules(doc)?;

    let buttons = dom::query_all(doc, ".module-btn")?;
    let indicator = dom::query(doc, ".module-indicator")?;
    if buttons.is_empty() {
        log::warn!("module nav has no buttons");
        return Ok(());
    }

    for button in &buttons {
        let id = button.get_attribute("data-module").unwrap_or_default();

        // hover previews the module and moves the indicator
        {
            let (doc, buttons, button, indicator, id) =
                (doc.clone(), buttons.clone(), button.clone(), indicator.clone(), id.clone());
            on(&button.clone(), "mouseenter", move || {
                let r = mark_button(&buttons, &button, "hover")
                    .and_then(|_| indicator.as_ref().map_or(Ok(()), |ind| move_indicator(ind, &button)))
                    .and_then(|_| show_module(&doc, &id));
                if let Err(e) = r {
                    log::warn!("module hover failed: {:?}", e);
                }
            })?;
        }
        {
            let (doc, buttons, button, indicator) = (doc.clone(), buttons.clone(), button.clone(), indicator.clone());
            on(&button.clone(), "click", move || {
                let r = mark_button(&buttons, &button, "active")
                    .and_then(|_| indicator.as_ref().map_or(Ok(()), |ind| move_indicator(ind, &button)))
                    .and_then(|_| show_module(&doc, &id));
                if let Err(e) = r {
                    log::warn!("module click failed: {:?}", e);
                }
            })?;
        }
    }

    if let Some(nav) = dom::query(doc, ".module-nav")? {
        init_swipe(&nav, buttons.clone())?;
    }

    if let (Some(ind), Some(active)) = (indicator.as_ref(), dom::query(doc, ".module-btn.active")?) {
        move_indicator(ind, &active)?;
    }
    log::info!("module panel ready ({} modules)", MODULES.len());
    Ok(())
}

fn init_swipe(nav: &HtmlElement, buttons: Vec<HtmlElement>) -> Result<(), JsValue> {
    let start_x = Rc::new(Cell::new(0.0));
    let end_x = Rc::new(Cell::new(0.0));

    let touch_x = |evt: &TouchEvent| evt.touches().get(0).map(|t| t.client_x() as f64);

    {
        let start_x = start_x.clone();
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            if let Some(x) = touch_x(&evt) {
                start_x.set(x);
            }
        }) as Box<dyn FnMut(_)>);
        nav.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let end_x = end_x.clone();
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            if let Some(x) = touch_x(&evt) {
                end_x.set(x);
            }
        }) as Box<dyn FnMut(_)>);
        nav.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    on(nav, "touchend", move || {
        let Some(swipe) = classify_swipe(start_x.get(), end_x.get()) else { return };
        let current = buttons.iter().position(|b| b.class_list().contains("active"));
        if let Some(idx) = current {
            buttons[swipe_target(idx, buttons.len(), swipe)].click();
        }
    })
}
