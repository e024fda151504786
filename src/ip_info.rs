//! Visitor IP panel backed by the cz88 lookup API.

use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::dom;

const UNKNOWN: &str = "未知";
const MSG_UNAVAILABLE: &str = "无法获取IP信息";
const MSG_FAILED: &str = "获取IP信息失败";

#[derive(Debug, Deserialize)]
pub struct IpResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<IpData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpData {
    pub ip: Option<String>,
    pub districts: Option<String>,
    pub isp: Option<String>,
    pub net_work_type: Option<String>,
    pub locations: Option<Vec<IpLocation>>,
}

/// Coordinates arrive as either numbers or strings, so they stay loosely typed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IpLocation {
    pub latitude: Value,
    pub longitude: Value,
    pub radius: Value,
}

fn text_or_unknown(v: Option<&str>) -> String {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl IpData {
    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let loc = self.locations.as_ref().and_then(|l| l.first());
        let coord = |v: Option<&Value>| v.and_then(value_text).unwrap_or_else(|| UNKNOWN.to_string());
        vec![
            ("IP:", text_or_unknown(self.ip.as_deref())),
            ("地区:", text_or_unknown(self.districts.as_deref())),
            ("ISP:", text_or_unknown(self.isp.as_deref())),
            ("网络:", text_or_unknown(self.net_work_type.as_deref())),
            ("纬度:", coord(loc.map(|l| &l.latitude))),
            ("经度:", coord(loc.map(|l| &l.longitude))),
            (
                "半径:",
                loc.and_then(|l| value_text(&l.radius))
                    .map(|r| format!("{r}m"))
                    .unwrap_or_else(|| UNKNOWN.to_string()),
            ),
        ]
    }
}

/// What the panel should show for a lookup outcome.
pub enum IpView {
    Rows(Vec<(&'static str, String)>),
    Message(&'static str),
}

pub fn view_for(result: Result<IpResponse, JsValue>) -> IpView {
    match result {
        Ok(IpResponse { success: true, data: Some(data) }) => IpView::Rows(data.rows()),
        Ok(_) => IpView::Message(MSG_UNAVAILABLE),
        Err(e) => {
            log::error!("ip lookup failed: {:?}", e);
            IpView::Message(MSG_FAILED)
        }
    }
}

fn render(doc: &Document, panel: &Element, view: &IpView) -> Result<(), JsValue> {
    panel.set_inner_html("");
    match view {
        IpView::Rows(rows) => {
            let list = doc.create_element("div")?;
            list.set_class_name("ip-data");
            for (label, value) in rows {
                let item = doc.create_element("div")?;
                item.set_class_name("ip-item");
                let l = doc.create_element("span")?;
                l.set_class_name("ip-label");
                l.set_text_content(Some(label));
                let v = doc.create_element("span")?;
                v.set_class_name("ip-value");
                v.set_text_content(Some(value));
                item.append_child(&l)?;
                item.append_child(&v)?;
                list.append_child(&item)?;
            }
            panel.append_child(&list)?;
        }
        IpView::Message(msg) => {
            let div = doc.create_element("div")?;
            div.set_class_name("ip-loading");
            div.set_text_content(Some(msg));
            panel.append_child(&div)?;
        }
    }
    Ok(())
}

/// Look up the visitor's IP and fill `#ip-info`.
pub async fn load_ip_info(doc: &Document, endpoint: &str) -> Result<(), JsValue> {
    let panel: Element = dom::by_id(doc, "ip-info")?;
    let view = view_for(dom::fetch_json::<IpResponse>(endpoint).await);
    render(doc, &panel, &view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> IpResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn full_payload_rows() {
        let resp = parse(
            r#"{"code":200,"success":true,"data":{"ip":"1.2.3.4","districts":"浙江省杭州市","isp":"电信",
                "netWorkType":"宽带","locations":[{"latitude":"30.27","longitude":120.15,"radius":1500}]}}"#,
        );
        let IpView::Rows(rows) = view_for(Ok(resp)) else { panic!("expected rows") };
        let values: Vec<_> = rows.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, ["1.2.3.4", "浙江省杭州市", "电信", "宽带", "30.27", "120.15", "1500m"]);
        assert_eq!(rows[0].0, "IP:");
        assert_eq!(rows[6].0, "半径:");
    }

    #[test]
    fn missing_fields_render_unknown() {
        let resp = parse(r#"{"success":true,"data":{"ip":"5.6.7.8","districts":"","locations":[]}}"#);
        let IpView::Rows(rows) = view_for(Ok(resp)) else { panic!("expected rows") };
        assert_eq!(rows[0].1, "5.6.7.8");
        assert!(rows[1..].iter().all(|(_, v)| v == UNKNOWN), "{rows:?}");
    }

    #[test]
    fn unsuccessful_response_shows_unavailable() {
        let resp = parse(r#"{"success":false,"data":null}"#);
        assert!(matches!(view_for(Ok(resp)), IpView::Message(MSG_UNAVAILABLE)));
        let resp = parse(r#"{"success":true}"#);
        assert!(matches!(view_for(Ok(resp)), IpView::Message(MSG_UNAVAILABLE)));
    }
}
