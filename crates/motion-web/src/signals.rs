//! Environment signal sampling and the live reduced-motion subscription.

use motion_core::capability::PlatformSignals;
use motion_core::context::MotionContext;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Sample the platform once at startup. Anything the browser does not
/// expose stays `None` and the engine treats it as capable.
pub fn read_signals(window: &web::Window) -> PlatformSignals {
    let navigator = window.navigator();

    let reduced_motion = match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(query)) => query.matches(),
        _ => false,
    };

    let cores = navigator.hardware_concurrency();
    let cpu_cores = if cores > 0.0 { Some(cores as u32) } else { None };

    // `deviceMemory` and `connection.saveData` have no stable bindings;
    // read them reflectively.
    let device_memory_gb = reflect_f64(navigator.as_ref(), "deviceMemory");
    let save_data = js_sys::Reflect::get(navigator.as_ref(), &JsValue::from_str("connection"))
        .ok()
        .filter(|c| !c.is_undefined() && !c.is_null())
        .and_then(|c| js_sys::Reflect::get(&c, &JsValue::from_str("saveData")).ok())
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    PlatformSignals {
        reduced_motion,
        cpu_cores,
        device_memory_gb,
        save_data,
    }
}

fn reflect_f64(target: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

/// Keep the context's reduced-motion flag in sync with the media query and
/// notify `on_change` on every flip.
pub fn subscribe_reduced_motion(
    window: &web::Window,
    ctx: Rc<MotionContext>,
    on_change: impl Fn(bool) + 'static,
) {
    let Ok(Some(query)) = window.match_media(REDUCED_MOTION_QUERY) else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |event: web::MediaQueryListEvent| {
        let reduced = event.matches();
        ctx.set_reduced_motion(reduced);
        log::info!("prefers-reduced-motion changed: {reduced}");
        on_change(reduced);
    }) as Box<dyn FnMut(web::MediaQueryListEvent)>);
    _ = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}
