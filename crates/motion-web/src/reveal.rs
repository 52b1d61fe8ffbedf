//! DOM binding for scroll-triggered reveals.
//!
//! Elements opt in with `data-animate`; `data-animate-threshold` picks the
//! threshold class ("content", "visual", "immediate"). `data-animate-delay`
//! adds milliseconds before the transition starts, and children of a
//! `[data-animate-stagger]` container get an index exposed as
//! `--stagger-index` for CSS to consume.

use crate::dom;
use motion_core::scroll::{RevealSpec, RevealTarget, ThresholdKind};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Class applied when an element reveals; the site's CSS keys off it.
pub const VISIBLE_CLASS: &str = "is-visible";

const DEFAULT_TRANSITION_MS: f64 = 600.0;

#[derive(Clone)]
pub struct DomReveal {
    element: web::Element,
}

impl DomReveal {
    pub fn new(element: web::Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &web::Element {
        &self.element
    }

    fn style(&self) -> Option<web::CssStyleDeclaration> {
        self.element
            .dyn_ref::<web::HtmlElement>()
            .map(|el| el.style())
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(style) = self.style() {
            _ = style.set_property(property, value);
        }
    }
}

impl RevealTarget for DomReveal {
    fn mark_visible(&mut self) {
        _ = self.element.class_list().add_1(VISIBLE_CLASS);
    }

    fn disable_transition(&mut self) {
        self.set_style("transition", "none");
    }

    fn set_simplified_fade(&mut self) {
        self.set_style("transition", "opacity 100ms linear");
    }

    fn set_will_change(&mut self, active: bool) {
        if active {
            self.set_style("will-change", "opacity, transform");
        } else if let Some(style) = self.style() {
            _ = style.remove_property("will-change");
        }
    }

    fn set_stagger_index(&mut self, index: usize) {
        self.set_style("--stagger-index", &index.to_string());
    }

    fn transition_duration_ms(&self) -> f64 {
        let computed = web::window()
            .and_then(|w| w.get_computed_style(&self.element).ok())
            .flatten();
        let Some(computed) = computed else {
            return DEFAULT_TRANSITION_MS;
        };
        // Longest duration over comma-separated transition properties.
        computed
            .get_property_value("transition-duration")
            .ok()
            .and_then(|raw| {
                raw.split(',')
                    .filter_map(dom::parse_css_time_ms)
                    .fold(None, |acc: Option<f64>, ms| {
                        Some(acc.map_or(ms, |a| a.max(ms)))
                    })
            })
            .filter(|ms| *ms > 0.0)
            .unwrap_or(DEFAULT_TRANSITION_MS)
    }
}

/// Read an element's reveal configuration from its data attributes. The
/// `data-animate` value itself names an animation style for CSS, never a
/// threshold; only `data-animate-threshold` selects the threshold class.
pub fn read_spec(element: &web::Element) -> RevealSpec {
    let threshold = element
        .get_attribute("data-animate-threshold")
        .filter(|v| !v.is_empty())
        .map(|v| match ThresholdKind::from_name(&v) {
            Some(kind) => kind,
            None => {
                log::warn!("unknown animate threshold {v:?}, using content");
                ThresholdKind::Content
            }
        })
        .unwrap_or_default();

    let delay_ms = dom::parse_f64_attr(element, "data-animate-delay")
        .filter(|d| *d >= 0.0)
        .unwrap_or(0.0);

    // Index within the nearest stagger container, in document order.
    let stagger_index = element
        .closest("[data-animate-stagger]")
        .ok()
        .flatten()
        .and_then(|container| {
            let list = container.query_selector_all("[data-animate]").ok()?;
            (0..list.length())
                .find(|i| {
                    list.get(*i)
                        .is_some_and(|node| element.is_same_node(Some(&node)))
                })
                .map(|i| i as usize)
        });

    RevealSpec {
        threshold,
        delay_ms,
        stagger_index,
    }
}
