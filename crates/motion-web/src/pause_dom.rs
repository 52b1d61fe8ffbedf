//! Pause toggle UI and session persistence.
//!
//! `install` creates a fixed-position pause/play button in the bottom-right
//! corner and injects a stylesheet that freezes CSS animation while the
//! root element carries `motion-paused`, leaving hover and focus feedback
//! on interactive elements at a short duration. The button and root class
//! are kept in sync by registering a small [`Pausable`] UI controller on
//! the global switch, so state flips from any source update them.

use motion_core::pause::{Pausable, PauseControl, SessionStore};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const PAUSED_CLASS: &str = "motion-paused";
const STYLE_ID: &str = "motion-pause-style";
const TOGGLE_CLASS: &str = "motion-toggle";

const PAUSE_ICON: &str = "\
<svg width=\"14\" height=\"14\" viewBox=\"0 0 14 14\" fill=\"none\" \
xmlns=\"http://www.w3.org/2000/svg\" aria-hidden=\"true\">\
<rect x=\"3\" y=\"2\" width=\"3\" height=\"10\" rx=\"0.5\" fill=\"currentColor\"/>\
<rect x=\"8\" y=\"2\" width=\"3\" height=\"10\" rx=\"0.5\" fill=\"currentColor\"/>\
</svg>";

const PLAY_ICON: &str = "\
<svg width=\"14\" height=\"14\" viewBox=\"0 0 14 14\" fill=\"none\" \
xmlns=\"http://www.w3.org/2000/svg\" aria-hidden=\"true\">\
<path d=\"M4 2.5L11 7L4 11.5V2.5Z\" fill=\"currentColor\"/>\
</svg>";

// Inline so the button renders regardless of stylesheet load order.
const TOGGLE_STYLE: &str = "\
position: fixed; bottom: 16px; right: 16px; width: 32px; height: 32px;\
border-radius: 50%; border: 1px solid #E5E7EB; background: #F3F4F6;\
color: #6B7280; cursor: pointer; display: flex; align-items: center;\
justify-content: center; opacity: 0.8; z-index: 9998; padding: 0;";

const PAUSE_CSS: &str = "\
.motion-paused *, .motion-paused *::before, .motion-paused *::after {\
  animation-play-state: paused !important;\
  transition-duration: 0.001ms !important;\
}\
.motion-paused a, .motion-paused button, .motion-paused [role=\"button\"],\
.motion-paused input, .motion-paused select, .motion-paused textarea {\
  transition-duration: 100ms !important;\
}";

/// Session storage backed store; degrades to a no-op when storage is
/// blocked (private browsing, storage partitioning).
#[derive(Clone)]
pub struct DomSessionStore {
    storage: Option<web::Storage>,
}

impl DomSessionStore {
    pub fn new(window: &web::Window) -> Self {
        let storage = window.session_storage().ok().flatten();
        if storage.is_none() {
            log::warn!("sessionStorage unavailable, pause state will not persist");
        }
        Self { storage }
    }
}

impl SessionStore for DomSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            _ = storage.set_item(key, value);
        }
    }
}

pub type SharedPause = Rc<RefCell<PauseControl<DomSessionStore>>>;

/// Keeps the root class and toggle button in step with the global switch.
struct PauseUi {
    document: web::Document,
    button: web::Element,
}

impl PauseUi {
    fn sync(&self, paused: bool) {
        sync_page_state(&self.document, paused);
        self.button.set_inner_html(if paused { PLAY_ICON } else { PAUSE_ICON });
        _ = self
            .button
            .set_attribute("aria-pressed", if paused { "true" } else { "false" });
        let label = if paused {
            "Resume animations"
        } else {
            "Pause animations"
        };
        _ = self.button.set_attribute("aria-label", label);
    }
}

impl Pausable for PauseUi {
    fn pause(&mut self) {
        self.sync(true);
    }

    fn resume(&mut self) {
        self.sync(false);
    }
}

/// Install the pause stylesheet and create the floating toggle button.
pub fn install(document: &web::Document, control: &SharedPause) {
    inject_stylesheet(document);

    let Some(button) = create_button(document) else {
        log::warn!("could not create the pause toggle");
        return;
    };

    {
        let control = Rc::clone(control);
        let on_click = Closure::wrap(Box::new(move |_event: web::Event| {
            control.borrow_mut().toggle();
        }) as Box<dyn FnMut(web::Event)>);
        _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }

    let ui = PauseUi {
        document: document.clone(),
        button,
    };
    ui.sync(control.borrow().is_paused());
    control.borrow_mut().register(Rc::new(RefCell::new(ui)));
}

/// Reflect pause state onto the root element class.
fn sync_page_state(document: &web::Document, paused: bool) {
    if let Some(root) = document.document_element() {
        let result = if paused {
            root.class_list().add_1(PAUSED_CLASS)
        } else {
            root.class_list().remove_1(PAUSED_CLASS)
        };
        if result.is_err() {
            log::warn!("could not toggle {PAUSED_CLASS}");
        }
    }
}

fn create_button(document: &web::Document) -> Option<web::Element> {
    let body = document.body()?;
    let button = document.create_element("button").ok()?;
    _ = button.set_attribute("class", TOGGLE_CLASS);
    _ = button.set_attribute("type", "button");
    _ = button.set_attribute("data-pause-toggle", "");
    _ = button.set_attribute("style", TOGGLE_STYLE);
    body.append_child(&button).ok()?;
    Some(button)
}

fn inject_stylesheet(document: &web::Document) {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return;
    }
    let Ok(style) = document.create_element("style") else {
        return;
    };
    _ = style.set_attribute("id", STYLE_ID);
    style.set_text_content(Some(PAUSE_CSS));
    if let Some(head) = document.head() {
        _ = head.append_child(&style);
    }
}
