//! Small DOM lookup helpers shared across the wiring modules.

use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow!("no window"))
}

#[inline]
pub fn document() -> anyhow::Result<web::Document> {
    window()?.document().ok_or_else(|| anyhow!("no document"))
}

/// All elements matching `selector`, skipping nodes that are not elements.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("bad selector: {selector}");
        return Vec::new();
    };
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(node) = list.get(i) {
            if let Ok(el) = node.dyn_into::<web::Element>() {
                out.push(el);
            }
        }
    }
    out
}

/// Parse a float data attribute, logging and skipping junk values.
pub fn parse_f64_attr(element: &web::Element, name: &str) -> Option<f64> {
    let raw = element.get_attribute(name)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            log::warn!("ignoring non-numeric {name}={raw:?}");
            None
        }
    }
}

/// Seconds-or-milliseconds CSS time string ("0.6s", "300ms") to ms.
pub fn parse_css_time_ms(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Some(s) = value.strip_suffix("ms") {
        return s.trim().parse::<f64>().ok();
    }
    if let Some(s) = value.strip_suffix('s') {
        return s.trim().parse::<f64>().ok().map(|v| v * 1000.0);
    }
    None
}
