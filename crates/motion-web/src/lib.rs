#![cfg(target_arch = "wasm32")]
//! Browser shell for the motion engine.
//!
//! Samples capability signals, builds one [`MotionContext`], wires the
//! scroll trigger, counters, hero diagram and pause control to the DOM,
//! and drives the whole engine from a single `requestAnimationFrame` loop.

use anyhow::anyhow;
use motion_core::context::MotionContext;
use motion_core::hero::HeroSequencer;
use motion_core::pause::{Pausable, PauseControl};
use motion_core::perf::PerfSampler;
use motion_core::runtime::Runtime;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod countup_dom;
mod dom;
mod hero_dom;
mod observe;
mod pause_dom;
mod reveal;
mod signals;
mod stroke;

use hero_dom::DomHeroSurface;
use stroke::DomStroke;

/// Interval between performance report log lines.
const PERF_REPORT_MS: f64 = 10_000.0;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("motion-web starting");

    if let Err(e) = init() {
        log::error!("init error: {e:?}");
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;

    let sig = signals::read_signals(&window);
    let runtime = Runtime::new();
    let ctx = MotionContext::new(runtime.clone(), &sig);
    log::info!(
        "motion mode: {:?} (cores={:?} memory={:?} save_data={})",
        ctx.mode(),
        sig.cpu_cores,
        sig.device_memory_gb,
        sig.save_data
    );

    // Scroll-triggered reveals.
    let scroll = observe::ScrollBinding::install(&document, Rc::clone(&ctx));
    let trigger = Rc::clone(&scroll.trigger);

    // Counters.
    countup_dom::install(&document, &ctx);

    // Hero diagram, when the page has one.
    let perf = Rc::new(RefCell::new(PerfSampler::new()));
    let hero = DomHeroSurface::find(&document).map(|surface| {
        let kb = surface.root_element().outer_html().len() as f64 / 1024.0;
        perf.borrow_mut().set_svg_payload_kb(kb);
        let mut sequencer = HeroSequencer::new(
            Rc::clone(&ctx),
            surface.clone(),
            surface.input_strokes(),
            surface.output_strokes(),
        );
        sequencer.prepare();
        Rc::new(RefCell::new(sequencer))
    });

    // Pause switch: restore persisted state, then the toggle button.
    let pause = Rc::new(RefCell::new(PauseControl::new(pause_dom::DomSessionStore::new(
        &window,
    ))));
    {
        let mut control = pause.borrow_mut();
        control.register(trigger.clone());
        if let Some(hero) = &hero {
            let hero: Rc<RefCell<dyn Pausable>> = hero.clone();
            control.register(hero);
        }
        control.init(ctx.reduced_motion());
    }
    pause_dom::install(&document, &pause);

    if let Some(hero) = &hero {
        // Under an active pause the stylesheet freezes the transitions and
        // the ambient tail stays off.
        hero.borrow_mut().play();
    }

    // Live reduced-motion toggle: force-reveal everything still hidden and
    // flip the global switch to paused.
    {
        let trigger = trigger.clone();
        let pause = Rc::clone(&pause);
        signals::subscribe_reduced_motion(&window, Rc::clone(&ctx), move |reduced| {
            if reduced {
                trigger.borrow_mut().reveal_all();
                pause.borrow_mut().pause();
            }
        });
    }

    perf.borrow_mut().start();
    {
        let perf = Rc::clone(&perf);
        runtime.schedule_repeating(PERF_REPORT_MS, move || perf.borrow().log_report());
    }

    wire_teardown(&window, scroll, hero, Rc::clone(&pause));
    run_frame_loop(&window, runtime, perf)?;
    Ok(())
}

/// Tear everything down on navigation so bfcache restores start clean.
fn wire_teardown(
    window: &web::Window,
    scroll: observe::ScrollBinding,
    hero: Option<Rc<RefCell<HeroSequencer<DomHeroSurface, DomStroke>>>>,
    pause: pause_dom::SharedPause,
) {
    let on_pagehide = Closure::wrap(Box::new(move |_event: web::Event| {
        scroll.disconnect();
        if let Some(hero) = &hero {
            hero.borrow_mut().destroy();
        }
        pause.borrow_mut().destroy();
    }) as Box<dyn FnMut(web::Event)>);
    _ = window
        .add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref());
    on_pagehide.forget();
}

/// The one rAF loop on the page: every browser frame advances the logical
/// clock, which fires due timers and the engine's frame callbacks.
fn run_frame_loop(
    window: &web::Window,
    runtime: Runtime,
    perf: Rc<RefCell<PerfSampler>>,
) -> anyhow::Result<()> {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_for_closure = Rc::clone(&tick);
    let win = window.clone();

    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        perf.borrow_mut()
            .record_frame(timestamp, runtime.pending_timers());
        runtime.advance(timestamp);

        if let Some(closure) = tick_for_closure.borrow().as_ref() {
            _ = win.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    let first = tick.borrow();
    let closure = first.as_ref().ok_or_else(|| anyhow!("frame closure missing"))?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("requestAnimationFrame failed: {e:?}"))?;
    Ok(())
}
