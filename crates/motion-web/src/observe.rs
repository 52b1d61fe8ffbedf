//! IntersectionObserver wiring for the scroll trigger.
//!
//! The engine plans observer groups; this module creates the real
//! observers, routes entries back by the `data-motion-key` attribute
//! stamped at registration, and relays `transitionend` for will-change
//! cleanup.

use crate::dom;
use crate::reveal::{read_spec, DomReveal};
use motion_core::context::MotionContext;
use motion_core::scroll::{ElementKey, ObserverConfig, ScrollOptions, ScrollTrigger};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const KEY_ATTR: &str = "data-motion-key";

pub type SharedTrigger = Rc<RefCell<ScrollTrigger<DomReveal>>>;

pub struct ScrollBinding {
    pub trigger: SharedTrigger,
    observers: Vec<web::IntersectionObserver>,
}

impl ScrollBinding {
    /// Register every `[data-animate]` element and start observing.
    pub fn install(document: &web::Document, ctx: Rc<MotionContext>) -> Self {
        let mut trigger = ScrollTrigger::new(ctx, ScrollOptions::default());
        let elements = dom::query_all(document, "[data-animate]");
        log::info!("scroll: {} animated elements", elements.len());

        for element in &elements {
            let key = trigger.register(DomReveal::new(element.clone()), read_spec(element));
            _ = element.set_attribute(KEY_ATTR, &key.0.to_string());
        }
        let groups = trigger.init();
        let trigger = Rc::new(RefCell::new(trigger));

        let mut observers = Vec::with_capacity(groups.len());
        for group in groups {
            let Some(observer) = make_observer(&group.config, &trigger) else {
                continue;
            };
            for key in &group.members {
                if let Some(element) = elements.get(key.0) {
                    observer.observe(element);
                }
            }
            observers.push(observer);
        }

        for element in &elements {
            wire_transition_end(element, &trigger);
        }

        Self { trigger, observers }
    }

    pub fn disconnect(&self) {
        for observer in &self.observers {
            observer.disconnect();
        }
        self.trigger.borrow_mut().destroy();
    }
}

fn make_observer(
    config: &ObserverConfig,
    trigger: &SharedTrigger,
) -> Option<web::IntersectionObserver> {
    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&config.threshold.into());
    if config.root_margin_bottom_pct > 0.0 {
        options.set_root_margin(&format!("0px 0px -{}% 0px", config.root_margin_bottom_pct));
    }

    let trigger = Rc::clone(trigger);
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(key) = element_key(&target) else {
                    continue;
                };
                let consumed = trigger
                    .borrow_mut()
                    .handle_intersection(key, entry.is_intersecting());
                if consumed {
                    observer.unobserve(&target);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let observer = web::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    )
    .map_err(|e| log::error!("IntersectionObserver unavailable: {e:?}"))
    .ok()?;
    callback.forget();
    Some(observer)
}

fn wire_transition_end(element: &web::Element, trigger: &SharedTrigger) {
    let Some(key) = element_key(element) else {
        return;
    };
    let trigger = Rc::clone(trigger);
    let listener = Closure::wrap(Box::new(move |_event: web::Event| {
        trigger.borrow_mut().notify_transition_end(key);
    }) as Box<dyn FnMut(web::Event)>);
    _ = element
        .add_event_listener_with_callback("transitionend", listener.as_ref().unchecked_ref());
    listener.forget();
}

fn element_key(element: &web::Element) -> Option<ElementKey> {
    element
        .get_attribute(KEY_ATTR)
        .and_then(|raw| raw.parse::<usize>().ok())
        .map(ElementKey)
}
