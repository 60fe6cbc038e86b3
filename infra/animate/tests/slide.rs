mod fixtures;

use fixtures::{FakeSurface, approx, ms, panel, settle};
use mcs_animate::{
    AnimateError, Animator, BoxMetrics, DEFAULT_SLIDE_DURATION, Direction, ElementId,
    RenderSurface, StyleProperty,
};

#[tokio::test(start_paused = true)]
async fn slide_down_reveals_hidden_element() {
    let surface = FakeSurface::new();
    let el = surface.add(BoxMetrics::with_height(120.0), true);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_down(el, ms(300)).unwrap();

    assert_eq!(surface.inline(el, StyleProperty::Height).as_deref(), Some("0px"));
    assert_eq!(surface.inline(el, StyleProperty::Overflow).as_deref(), Some("hidden"));
    assert!(!surface.computed_display(el).is_none());
    assert!(animator.is_animating(el));
    assert!(surface.flushes(el) >= 1);

    settle(ms(150)).await;
    let mid = surface.inline_px(el, StyleProperty::Height).expect("height is animated");
    assert!(mid > 0.0 && mid < 120.0, "mid-transition height was {mid}");

    settle(ms(151)).await;
    assert!(!animator.is_animating(el));
    assert!(!surface.has_overrides(el));
    assert!(approx(surface.current_metrics(el).height, 120.0));
}

#[tokio::test(start_paused = true)]
async fn slide_up_collapses_then_hides() {
    let surface = FakeSurface::new();
    let el = surface.add(panel(80.0), false);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_up(el, DEFAULT_SLIDE_DURATION).unwrap();

    assert_eq!(surface.inline(el, StyleProperty::Height).as_deref(), Some("80px"));
    assert_eq!(surface.inline(el, StyleProperty::PaddingTop).as_deref(), Some("8px"));
    assert_eq!(animator.state(el).map(|s| s.to), Some(BoxMetrics::ZERO));

    settle(DEFAULT_SLIDE_DURATION + ms(1)).await;
    assert!(surface.computed_display(el).is_none());
    assert_eq!(surface.inline(el, StyleProperty::Display).as_deref(), Some("none"));
    assert!(!surface.has_overrides(el));
}

#[tokio::test(start_paused = true)]
async fn slide_up_on_hidden_element_is_tolerated() {
    let surface = FakeSurface::new();
    let el = surface.add(panel(80.0), true);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_up(el, ms(100)).unwrap();
    settle(ms(101)).await;

    assert!(surface.computed_display(el).is_none());
    assert!(!surface.has_overrides(el));
}

#[tokio::test(start_paused = true)]
async fn slide_toggle_dispatches_on_computed_display() {
    let surface = FakeSurface::new();
    let hidden = surface.add(panel(40.0), true);
    let shown = surface.add(panel(40.0), false);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_toggle(hidden, ms(300)).unwrap();
    animator.slide_toggle(shown, ms(300)).unwrap();

    assert_eq!(animator.state(hidden).map(|s| s.direction), Some(Direction::Down));
    assert_eq!(animator.state(shown).map(|s| s.direction), Some(Direction::Up));

    settle(ms(301)).await;
    assert!(!surface.computed_display(hidden).is_none());
    assert!(surface.computed_display(shown).is_none());
}

#[tokio::test(start_paused = true)]
async fn slide_up_then_down_ends_visible_at_natural_height() {
    let surface = FakeSurface::new();
    let el = surface.add(panel(120.0), false);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_up(el, ms(300)).unwrap();
    animator.slide_down(el, ms(300)).unwrap();
    assert_eq!(animator.state(el).map(|s| s.direction), Some(Direction::Down));

    settle(ms(600)).await;
    assert!(!surface.computed_display(el).is_none());
    assert!(!surface.has_overrides(el));
    assert_eq!(surface.current_metrics(el), panel(120.0));
}

#[tokio::test(start_paused = true)]
async fn superseded_completion_never_runs() {
    let surface = FakeSurface::new();
    let el = surface.add(BoxMetrics::with_height(100.0), false);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_up(el, ms(300)).unwrap();
    settle(ms(100)).await;
    let partial = surface.current_metrics(el).height;
    assert!(partial < 100.0);

    animator.slide_down(el, ms(300)).unwrap();
    let state = animator.state(el).expect("down in flight");
    assert!(approx(state.from.height, partial), "reversal starts from the rendered height");

    // The slide_up would have hidden the element at t=300.
    settle(ms(250)).await;
    assert!(!surface.computed_display(el).is_none());
    assert!(animator.is_animating(el));

    settle(ms(100)).await;
    assert!(!animator.is_animating(el));
    assert!(approx(surface.current_metrics(el).height, 100.0));
}

#[tokio::test(start_paused = true)]
async fn rapid_toggling_converges_on_last_request() {
    let surface = FakeSurface::new();
    let el = surface.add(panel(60.0), false);
    let animator = Animator::new(surface.clone()).unwrap();

    // up, down, up, down, up
    for _ in 0..5 {
        let direction = if surface.computed_display(el).is_none()
            || animator.state(el).is_some_and(|s| s.direction == Direction::Up)
        {
            animator.slide_down(el, ms(200)).unwrap();
            Direction::Down
        } else {
            animator.slide_up(el, ms(200)).unwrap();
            Direction::Up
        };
        assert_eq!(animator.state(el).map(|s| s.direction), Some(direction));
        settle(ms(30)).await;
    }

    settle(ms(250)).await;
    assert!(!animator.is_animating(el));
    assert!(surface.computed_display(el).is_none());
    assert!(!surface.has_overrides(el));
}

#[tokio::test(start_paused = true)]
async fn slide_down_on_expanded_element_keeps_final_state() {
    let surface = FakeSurface::new();
    let el = surface.add(panel(50.0), false);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_down(el, ms(300)).unwrap();
    settle(ms(301)).await;

    assert!(!surface.has_overrides(el));
    assert_eq!(surface.current_metrics(el), panel(50.0));
}

#[tokio::test(start_paused = true)]
async fn zero_duration_completes_synchronously() {
    let surface = FakeSurface::new();
    let el = surface.add(panel(50.0), false);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_up(el, ms(0)).unwrap();
    assert!(!animator.is_animating(el));
    assert!(surface.computed_display(el).is_none());

    animator.slide_down(el, ms(0)).unwrap();
    assert!(!surface.computed_display(el).is_none());
    assert!(!surface.has_overrides(el));
}

#[tokio::test(start_paused = true)]
async fn detached_element_is_rejected_without_writes() {
    let surface = FakeSurface::new();
    let el = surface.add(panel(50.0), false);
    surface.detach(el);
    let animator = Animator::new(surface.clone()).unwrap();

    let err = animator.slide_toggle(el, ms(300)).expect_err("detached");
    assert!(matches!(err, AnimateError::InvalidTarget { element, .. } if element == el));

    let err = animator.slide_down(ElementId(999), ms(300)).expect_err("unknown");
    assert!(matches!(err, AnimateError::InvalidTarget { context: Some(_), .. }));

    assert_eq!(surface.style_count(el), 0);
    assert!(!animator.is_animating(el));
}

#[tokio::test(start_paused = true)]
async fn cancel_freezes_and_finish_all_completes() {
    let surface = FakeSurface::new();
    let frozen = surface.add(BoxMetrics::with_height(100.0), false);
    let finished = surface.add(BoxMetrics::with_height(100.0), true);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_up(frozen, ms(300)).unwrap();
    animator.slide_down(finished, ms(300)).unwrap();
    settle(ms(100)).await;

    assert!(animator.cancel(frozen));
    assert!(!animator.cancel(frozen));
    let height = surface.inline_px(frozen, StyleProperty::Height).expect("last frame stays");

    animator.finish_all();
    assert!(!animator.is_animating(finished));
    assert!(!surface.has_overrides(finished));
    assert!(approx(surface.current_metrics(finished).height, 100.0));

    settle(ms(400)).await;
    assert_eq!(surface.inline_px(frozen, StyleProperty::Height), Some(height));
    assert!(!surface.computed_display(frozen).is_none());
}

#[tokio::test(start_paused = true)]
async fn slide_down_after_cancel_resumes_from_frozen_frame() {
    let surface = FakeSurface::new();
    let el = surface.add(BoxMetrics::with_height(100.0), false);
    let animator = Animator::new(surface.clone()).unwrap();

    animator.slide_up(el, ms(300)).unwrap();
    settle(ms(100)).await;
    assert!(animator.cancel(el));
    let frozen = surface.inline_px(el, StyleProperty::Height).expect("last frame stays");
    assert!(frozen > 0.0 && frozen < 100.0, "frozen height was {frozen}");

    animator.slide_down(el, ms(300)).unwrap();
    let from = animator.state(el).expect("down in flight").from.height;
    assert!(approx(from, frozen), "resumed from {from}, frozen at {frozen}");
    assert!(surface.inline_px(el, StyleProperty::Height).is_some_and(|h| approx(h, frozen)));

    settle(ms(301)).await;
    assert!(!surface.has_overrides(el));
    assert!(approx(surface.current_metrics(el).height, 100.0));

    // Completed transitions leave nothing frozen behind.
    animator.slide_up(el, ms(0)).unwrap();
    animator.slide_down(el, ms(300)).unwrap();
    assert_eq!(animator.state(el).map(|s| s.from), Some(BoxMetrics::ZERO));
}

#[tokio::test(start_paused = true)]
async fn animator_accepts_trait_objects() {
    let surface = FakeSurface::new();
    let el = surface.add(panel(30.0), true);
    let dynamic: std::sync::Arc<dyn RenderSurface> = surface.clone();
    let animator = Animator::new(dynamic).unwrap().with_frame_interval(ms(0));

    animator.slide_toggle(el, ms(100)).unwrap();
    settle(ms(50)).await;
    assert_eq!(surface.inline(el, StyleProperty::Height).as_deref(), Some("0px"));

    settle(ms(51)).await;
    assert_eq!(surface.current_metrics(el), panel(30.0));
}

#[test]
fn animator_requires_a_runtime() {
    let surface = FakeSurface::new();
    let err = Animator::new(surface).expect_err("no runtime");
    assert!(matches!(err, AnimateError::Runtime { .. }));
}
