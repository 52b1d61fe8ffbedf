// Tests for SVG stroke draw/erase animation.

mod common;

use common::{ctx, MockStroke};
use motion_core::easing::{DRAW_EASING, ERASE_EASING};
use motion_core::path::{
    DrawDirection, DrawOptions, EraseOptions, PathAnimator, DRAW_SETTLE_MS, FALLBACK_PATH_LENGTH,
};

#[test]
fn prepare_hides_full_stroke() {
    let (_rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(240.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    path.prepare();
    assert!(path.is_prepared());
    assert_eq!(stroke.last_dash(), Some((Some(240.0), 240.0)));
}

#[test]
fn length_is_measured_once_and_cached() {
    let (_rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(100.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    assert_eq!(path.total_length(), 100.0);
    // A later re-measure must not change the cached value.
    stroke.0.borrow_mut().length = Some(999.0);
    assert_eq!(path.total_length(), 100.0);
}

#[test]
fn unmeasurable_path_uses_fallback_length() {
    let (_rt, ctx) = ctx(false, false);
    let stroke = MockStroke::default();
    let mut path = PathAnimator::new(ctx, stroke.clone());
    assert_eq!(path.total_length(), FALLBACK_PATH_LENGTH);
    path.prepare();
    assert_eq!(
        stroke.last_dash(),
        Some((Some(FALLBACK_PATH_LENGTH), FALLBACK_PATH_LENGTH))
    );
}

#[test]
fn draw_retargets_offset_to_zero_after_forcing_layout() {
    let (rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(300.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    path.prepare();
    let done = path.draw(DrawOptions::default());

    {
        let log = stroke.0.borrow();
        // prepare, hidden start, retarget to 0.
        assert_eq!(
            log.dashes,
            vec![(Some(300.0), 300.0), (Some(300.0), 300.0), (Some(300.0), 0.0)]
        );
        assert_eq!(log.layouts_forced, 1);
        let transition = log.transitions.last().unwrap().as_deref().unwrap();
        assert!(transition.contains("stroke-dashoffset 600ms"));
        assert!(transition.contains(DRAW_EASING));
    }
    assert!(!path.is_prepared());

    assert!(!done.is_done());
    rt.advance(600.0 + DRAW_SETTLE_MS);
    assert!(done.is_done());
    // Settle clears the inline transition.
    assert_eq!(stroke.last_transition(), Some(None));
}

#[test]
fn reverse_draw_starts_from_negative_offset() {
    let (_rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(120.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    path.draw(DrawOptions {
        direction: DrawDirection::Reverse,
        ..DrawOptions::default()
    });
    let log = stroke.0.borrow();
    assert_eq!(log.dashes[0], (Some(120.0), -120.0));
    assert_eq!(*log.dashes.last().unwrap(), (Some(120.0), 0.0));
}

#[test]
fn draw_delay_pushes_settle_out() {
    let (rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(100.0);
    let mut path = PathAnimator::new(ctx, stroke);
    let done = path.draw(DrawOptions {
        duration_ms: 500.0,
        delay_ms: 200.0,
        ..DrawOptions::default()
    });
    rt.advance(700.0);
    assert!(!done.is_done());
    rt.advance(700.0 + DRAW_SETTLE_MS);
    assert!(done.is_done());
}

#[test]
fn reduced_motion_draw_is_synchronous_and_visible() {
    let (rt, ctx) = ctx(true, false);
    let stroke = MockStroke::with_length(80.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    let done = path.draw(DrawOptions::default());
    assert!(done.is_done());
    assert_eq!(stroke.last_dash(), Some((None, 0.0)));
    assert_eq!(rt.pending_timers(), 0);
}

#[test]
fn erase_returns_stroke_to_hidden() {
    let (rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(150.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    path.draw(DrawOptions::default());
    rt.advance(1000.0);

    let done = path.erase(EraseOptions::default());
    {
        let log = stroke.0.borrow();
        assert_eq!(*log.dashes.last().unwrap(), (Some(150.0), 150.0));
        let transition = log.transitions.last().unwrap().as_deref().unwrap();
        assert!(transition.contains("stroke-dashoffset 400ms"));
        assert!(transition.contains(ERASE_EASING));
    }
    assert!(path.is_prepared());
    rt.advance(1000.0 + 400.0 + DRAW_SETTLE_MS);
    assert!(done.is_done());
}

#[test]
fn reset_disables_transition_and_hides() {
    let (_rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(90.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    path.draw(DrawOptions::default());
    path.reset();

    let log = stroke.0.borrow();
    assert_eq!(log.transitions.last().unwrap().as_deref(), Some("none"));
    assert_eq!(*log.dashes.last().unwrap(), (Some(90.0), 90.0));
    assert!(path.is_prepared());
}

#[test]
fn reset_drops_the_pending_settle_timer() {
    let (rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(90.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    path.draw(DrawOptions::default());
    path.reset();

    // The draw's settle must not fire later and undo the disabled
    // transition.
    rt.advance(600.0 + DRAW_SETTLE_MS + 16.0);
    let log = stroke.0.borrow();
    assert_eq!(log.transitions.last().unwrap().as_deref(), Some("none"));
}

#[test]
fn prepare_then_draw_round_trips_cleanly() {
    let (rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(200.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    for _ in 0..2 {
        path.prepare();
        assert!(path.is_prepared());
        let done = path.draw(DrawOptions::default());
        let target = rt.now() + 600.0 + DRAW_SETTLE_MS;
        rt.advance(target);
        assert!(done.is_done());
        assert!(!path.is_prepared());
    }
}

#[test]
fn skip_to_drawn_shows_stroke_without_timers() {
    let (rt, ctx) = ctx(false, false);
    let stroke = MockStroke::with_length(60.0);
    let mut path = PathAnimator::new(ctx, stroke.clone());
    path.prepare();
    path.skip_to_drawn();
    assert_eq!(stroke.last_dash(), Some((None, 0.0)));
    assert_eq!(rt.pending_timers(), 0);
}
