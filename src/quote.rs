//! Quote-of-the-day widget. Fetches a quote, falls back to a built-in one on
//! any failure, and can reveal the text with a typewriter effect.

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::dom;

const FALLBACK_TEXT: &str = "生活不是缺少美，而是缺少发现美的眼睛";
const FALLBACK_FROM: &str = "罗丹";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Quote {
    #[serde(rename = "hitokoto")]
    pub text: String,
    #[serde(default)]
    pub from: Option<String>,
}

impl Quote {
    pub fn fallback() -> Self {
        Self { text: FALLBACK_TEXT.into(), from: Some(FALLBACK_FROM.into()) }
    }

    /// `—— source`, or empty when the quote has no source. The source is shown as sent.
    pub fn author_line(&self) -> String {
        match self.from.as_deref() {
            Some(from) if !from.is_empty() => format!("—— {from}"),
            _ => String::new(),
        }
    }
}

/// Progressive reveal of a string, one character per step.
#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self { chars: text.chars().collect(), shown: 0 }
    }

    /// Reveal the next character, returning the visible prefix, or `None` when done.
    pub fn step(&mut self) -> Option<String> {
        if self.shown >= self.chars.len() {
            return None;
        }
        self.shown += 1;
        Some(self.chars[..self.shown].iter().collect())
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }
}

/// Fetch a quote, substituting the fallback on any error.
pub async fn fetch_quote(endpoint: &str) -> Quote {
    match dom::fetch_json::<Quote>(endpoint).await {
        Ok(q) => {
            log::debug!("quote loaded: {:?}", q);
            q
        }
        Err(e) => {
            log::error!("failed to load quote: {:?}", e);
            Quote::fallback()
        }
    }
}

async fn type_into(el: &Element, text: &str, speed_ms: i32) -> Result<(), JsValue> {
    el.set_text_content(Some(""));
    let mut tw = Typewriter::new(text);
    while let Some(visible) = tw.step() {
        el.set_text_content(Some(&visible));
        dom::sleep(speed_ms).await?;
    }
    Ok(())
}

/// Load a quote into `text_id` / `author_id`. With `typewriter_ms` set, the
/// text is typed out first and the author appears once it completes.
pub async fn load_quote(
    doc: &Document,
    endpoint: &str,
    text_id: &str,
    author_id: &str,
    typewriter_ms: Option<i32>,
) -> Result<Quote, JsValue> {
    let quote = fetch_quote(endpoint).await;
    let text_el: Element = dom::by_id(doc, text_id)?;
    let author_el: Element = dom::by_id(doc, author_id)?;
    match typewriter_ms {
        Some(ms) => type_into(&text_el, &quote.text, ms).await?,
        None => text_el.set_text_content(Some(&quote.text)),
    }
    author_el.set_text_content(Some(&quote.author_line()));
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_payload() {
        let q: Quote = serde_json::from_str(
            r#"{"id": 1, "hitokoto": "山有木兮木有枝", "type": "i", "from": "越人歌", "from_who": null}"#,
        )
        .unwrap();
        assert_eq!(q.text, "山有木兮木有枝");
        assert_eq!(q.author_line(), "—— 越人歌");
    }

    #[test]
    fn missing_or_null_source_gives_empty_author() {
        let q: Quote = serde_json::from_str(r#"{"hitokoto": "x"}"#).unwrap();
        assert_eq!(q.author_line(), "");
        let q: Quote = serde_json::from_str(r#"{"hitokoto": "x", "from": null}"#).unwrap();
        assert_eq!(q.author_line(), "");
        let q: Quote = serde_json::from_str(r#"{"hitokoto": "x", "from": ""}"#).unwrap();
        assert_eq!(q.author_line(), "");
    }

    #[test]
    fn source_is_not_trimmed() {
        let q: Quote = serde_json::from_str(r#"{"hitokoto": "x", "from": "  "}"#).unwrap();
        assert_eq!(q.author_line(), "——   ");
        let q: Quote = serde_json::from_str(r#"{"hitokoto": "x", "from": " 论语 "}"#).unwrap();
        assert_eq!(q.author_line(), "——  论语 ");
    }

    #[test]
    fn payload_without_text_is_an_error() {
        assert!(serde_json::from_str::<Quote>(r#"{"from": "nobody"}"#).is_err());
    }

    #[test]
    fn fallback_quote() {
        let q = Quote::fallback();
        assert_eq!(q.text, FALLBACK_TEXT);
        assert_eq!(q.author_line(), "—— 罗丹");
    }

    #[test]
    fn typewriter_reveals_one_char_per_step() {
        let mut tw = Typewriter::new("你好!");
        assert!(!tw.is_done());
        assert_eq!(tw.step().as_deref(), Some("你"));
        assert_eq!(tw.step().as_deref(), Some("你好"));
        assert_eq!(tw.step().as_deref(), Some("你好!"));
        assert!(tw.is_done());
        assert_eq!(tw.step(), None);
    }

    #[test]
    fn typewriter_on_empty_text_is_done() {
        let mut tw = Typewriter::new("");
        assert!(tw.is_done());
        assert_eq!(tw.step(), None);
    }
}
