//! Clickable mascot ("kanban musume") with a small scripted dialogue bubble.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use crate::dom;
use crate::particles::rng::{RandomSource, XorShift};

pub const HOVER_GREETING: &str = "嗨！点击我可以聊天哦~";
pub const WELCOME: &str = "欢迎来到我的主页！";

pub const MESSAGES: [&str; 15] = [
    "欢迎来到我的主页！",
    "今天天气真不错呢~",
    "有什么我可以帮助你的吗？",
    "记得多喝水哦！",
    "加油！你可以的！",
    "休息一下，看看风景吧~",
    "代码写累了吗？",
    "保持好心情最重要！",
    "每天进步一点点~",
    "相信自己，你是最棒的！",
    "遇到困难不要放弃！",
    "学习新知识很有趣吧？",
    "记得按时吃饭哦！",
    "保持好奇心，探索世界！",
    "今天也要元气满满！",
];

const HOVER_HIDE_MS: i32 = 3_000;
const AUTO_MESSAGE_MS: i32 = 60_000;
const AUTO_HIDE_MS: i32 = 5_000;
const WELCOME_DELAY_MS: i32 = 3_000;

/// Dialogue bubble state, independent of the DOM.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dialogue {
    visible: bool,
    text: String,
}

impl Dialogue {
    pub fn show(&mut self, text: &str) {
        self.text = text.to_string();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pointer entered the mascot: greet unless something is already shown.
    pub fn on_hover(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.show(HOVER_GREETING);
        true
    }

    /// Delayed check after the pointer left: drop the hover greeting only.
    pub fn on_hover_expired(&mut self) -> bool {
        if self.visible && self.text == HOVER_GREETING {
            self.hide();
            return true;
        }
        false
    }

    /// Periodic nudge: show `message` only if the bubble is hidden.
    pub fn on_auto_tick(&mut self, message: &str) -> bool {
        if self.visible {
            return false;
        }
        self.show(message);
        true
    }
}

pub fn random_message(rng: &mut impl RandomSource) -> &'static str {
    MESSAGES[rng.index(MESSAGES.len())]
}

// --- DOM wiring -------------------------------------------------------------

struct Mascot {
    dialogue: Dialogue,
    rng: XorShift,
    bubble: Element,
    text_el: Element,
}

impl Mascot {
    /// Push the dialogue state into the DOM.
    fn sync(&self) {
        self.text_el.set_text_content(Some(self.dialogue.text()));
        let classes = self.bubble.class_list();
        let r = if self.dialogue.is_visible() { classes.add_1("show") } else { classes.remove_1("show") };
        if let Err(e) = r {
            log::warn!("mascot bubble update failed: {:?}", e);
        }
    }
}

type Shared = Rc<RefCell<Mascot>>;

fn with(m: &Shared, f: impl FnOnce(&mut Mascot)) {
    let mut m = m.borrow_mut();
    f(&mut m);
    m.sync();
}

fn hide_later(m: &Shared, ms: i32) -> Result<(), JsValue> {
    let m = m.clone();
    dom::set_timeout(ms, move || with(&m, |m| m.dialogue.hide()))?;
    Ok(())
}

fn listen(target: &Element, event: &str, f: impl FnMut(MouseEvent) + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(MouseEvent)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Hook up the mascot. Missing elements only log a warning.
pub fn init_mascot(doc: &Document) -> Result<(), JsValue> {
    let ids = ["kanban-musume", "musume-dialog", "musume-text", "musume-close"];
    let [Some(body), Some(bubble), Some(text_el), Some(close)] = ids.map(|id| doc.get_element_by_id(id)) else {
        log::warn!("mascot elements missing, skipping");
        return Ok(());
    };

    let mascot: Shared = Rc::new(RefCell::new(Mascot {
        dialogue: Dialogue::default(),
        rng: XorShift::from_entropy(),
        bubble,
        text_el,
    }));

    {
        let m = mascot.clone();
        let close = close.clone();
        listen(&body, "click", move |evt: MouseEvent| {
            let on_close = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|t| t == close);
            if !on_close {
                with(&m, |m| {
                    let msg = random_message(&mut m.rng);
                    m.dialogue.show(msg);
                });
            }
        })?;
    }
    {
        let m = mascot.clone();
        listen(&close, "click", move |evt: MouseEvent| {
            evt.stop_propagation();
            with(&m, |m| m.dialogue.hide());
        })?;
    }
    {
        let m = mascot.clone();
        listen(&body, "mouseenter", move |_: MouseEvent| {
            with(&m, |m| {
                m.dialogue.on_hover();
            });
        })?;
    }
    {
        let m = mascot.clone();
        listen(&body, "mouseleave", move |_: MouseEvent| {
            let m = m.clone();
            let r = dom::set_timeout(HOVER_HIDE_MS, move || {
                with(&m, |m| {
                    m.dialogue.on_hover_expired();
                })
            });
            if let Err(e) = r {
                log::warn!("mascot hover timer failed: {:?}", e);
            }
        })?;
    }
    {
        let m = mascot.clone();
        dom::set_interval(AUTO_MESSAGE_MS, move || {
            let mut shown = false;
            with(&m, |m| {
                let msg = random_message(&mut m.rng);
                shown = m.dialogue.on_auto_tick(msg);
            });
            if shown {
                if let Err(e) = hide_later(&m, AUTO_HIDE_MS) {
                    log::warn!("mascot auto-hide failed: {:?}", e);
                }
            }
        })?;
    }
    {
        let m = mascot.clone();
        dom::set_timeout(WELCOME_DELAY_MS, move || {
            with(&m, |m| m.dialogue.show(WELCOME));
            if let Err(e) = hide_later(&m, AUTO_HIDE_MS) {
                log::warn!("mascot welcome hide failed: {:?}", e);
            }
        })?;
    }
    log::info!("mascot ready");
    Ok(())
}
