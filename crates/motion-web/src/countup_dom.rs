//! DOM binding for animated counters.
//!
//! `[data-countup]` elements animate when 30 % visible. The attribute value
//! is the end number; `data-countup-start`, `data-countup-duration`,
//! `data-countup-prefix`, `data-countup-suffix` and `data-countup-decimals`
//! tune the run. Locale comes from the document's `lang`.

use crate::dom;
use motion_core::context::MotionContext;
use motion_core::countup::{count_up, CountUpOptions, TextTarget};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const VIEW_THRESHOLD: f64 = 0.3;

#[derive(Clone)]
pub struct DomText {
    element: web::Element,
}

impl TextTarget for DomText {
    fn set_text(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

/// Observe every counter on the page; each runs once on first visibility.
pub fn install(document: &web::Document, ctx: &Rc<MotionContext>) {
    let locale = document
        .document_element()
        .and_then(|el| el.get_attribute("lang"))
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| "en-US".to_owned());

    for element in dom::query_all(document, "[data-countup]") {
        let Some(end) = dom::parse_f64_attr(&element, "data-countup") else {
            log::warn!("data-countup element without a numeric end value");
            continue;
        };
        if let Err(e) = observe_counter(element, end, locale.clone(), Rc::clone(ctx)) {
            log::warn!("countup wiring failed: {e:?}");
        }
    }
}

fn read_options(element: &web::Element, end: f64, locale: String) -> CountUpOptions {
    let mut opts = CountUpOptions::new(end);
    opts.locale = locale;
    if let Some(start) = dom::parse_f64_attr(element, "data-countup-start") {
        opts.start = start;
    }
    if let Some(duration) = dom::parse_f64_attr(element, "data-countup-duration") {
        if duration >= 0.0 {
            opts.duration_ms = duration;
        }
    }
    if let Some(decimals) = dom::parse_f64_attr(element, "data-countup-decimals") {
        if (0.0..=9.0).contains(&decimals) {
            opts.decimals = decimals as u8;
        }
    }
    if let Some(prefix) = element.get_attribute("data-countup-prefix") {
        opts.prefix = prefix;
    }
    if let Some(suffix) = element.get_attribute("data-countup-suffix") {
        opts.suffix = suffix;
    }
    opts
}

fn observe_counter(
    element: web::Element,
    end: f64,
    locale: String,
    ctx: Rc<MotionContext>,
) -> Result<(), wasm_bindgen::JsValue> {
    // Reduced motion: write the final value now, no observer needed.
    if ctx.reduced_motion() {
        let target = DomText {
            element: element.clone(),
        };
        let opts = read_options(&element, end, locale);
        if let Err(e) = count_up(target, opts, &ctx) {
            log::warn!("countup rejected: {e}");
        }
        return Ok(());
    }

    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&VIEW_THRESHOLD.into());

    let started = Rc::new(RefCell::new(false));
    let observed = element.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            let intersecting = entries.iter().any(|entry| {
                entry
                    .dyn_into::<web::IntersectionObserverEntry>()
                    .map(|e| e.is_intersecting())
                    .unwrap_or(false)
            });
            if !intersecting || *started.borrow() {
                return;
            }
            *started.borrow_mut() = true;
            observer.unobserve(&observed);

            let target = DomText {
                element: observed.clone(),
            };
            let opts = read_options(&observed, end, locale.clone());
            if let Err(e) = count_up(target, opts, &ctx) {
                log::warn!("countup rejected: {e}");
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let observer = web::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    observer.observe(&element);
    callback.forget();
    Ok(())
}
