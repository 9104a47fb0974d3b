use std::cell::Cell;

use candlestick_viewer::application::{
    InputEffect, InputReducer, InputSettings, InteractionMode, LoopSignal, ViewportDelta,
};
use candlestick_viewer::domain::chart::{ScreenPoint, Viewport};
use candlestick_viewer::domain::events::{InputEvent, Key, PointerButton, ScrollDirection};

fn scroll(direction: ScrollDirection) -> InputEvent {
    InputEvent::Scroll { direction, delta: direction.sign() }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn starts_with_both_toggles_released() {
    let reducer = InputReducer::default();
    assert_eq!(reducer.mode(), InteractionMode::default());
    assert!(!reducer.is_terminated());
}

#[test]
fn scroll_pans_until_modifier_is_held() {
    let mut reducer = InputReducer::default();

    assert_eq!(
        reducer.reduce(&scroll(ScrollDirection::Up)),
        InputEffect::Viewport(ViewportDelta::CoarsePan { dx: -50.0 })
    );
    assert_eq!(
        reducer.reduce(&scroll(ScrollDirection::Down)),
        InputEffect::Viewport(ViewportDelta::CoarsePan { dx: 50.0 })
    );

    let held = reducer.reduce(&InputEvent::KeyDown(Key::LeftControl));
    assert!(matches!(held, InputEffect::ModeChanged(InteractionMode { zoom_modifier_held: true, .. })));

    assert_eq!(
        reducer.reduce(&scroll(ScrollDirection::Up)),
        InputEffect::Viewport(ViewportDelta::Zoom { step: 0.05 })
    );
    assert_eq!(
        reducer.reduce(&scroll(ScrollDirection::Down)),
        InputEffect::Viewport(ViewportDelta::Zoom { step: -0.05 })
    );

    reducer.reduce(&InputEvent::KeyUp(Key::LeftControl));
    assert!(!reducer.mode().zoom_modifier_held);
    assert!(matches!(
        reducer.reduce(&scroll(ScrollDirection::Up)),
        InputEffect::Viewport(ViewportDelta::CoarsePan { .. })
    ));
}

#[test]
fn drag_pans_with_damping() {
    let mut reducer = InputReducer::default();

    assert_eq!(reducer.reduce(&InputEvent::PointerMove { dx: 10.0, dy: 10.0 }), InputEffect::Ignored);

    reducer.reduce(&InputEvent::PointerDown(PointerButton::Primary));
    assert!(reducer.mode().drag_active);

    match reducer.reduce(&InputEvent::PointerMove { dx: 10.0, dy: -5.0 }) {
        InputEffect::Viewport(ViewportDelta::Pan { dx, dy }) => {
            assert!(approx(dx, 4.0));
            assert!(approx(dy, -2.0));
        }
        other => panic!("unexpected effect {:?}", other),
    }

    reducer.reduce(&InputEvent::PointerUp(PointerButton::Primary));
    assert!(!reducer.mode().drag_active);
    assert_eq!(reducer.reduce(&InputEvent::PointerMove { dx: 10.0, dy: 10.0 }), InputEffect::Ignored);
}

#[test]
fn other_buttons_do_not_start_a_drag() {
    let mut reducer = InputReducer::default();
    assert_eq!(reducer.reduce(&InputEvent::PointerDown(PointerButton::Secondary)), InputEffect::Ignored);
    assert_eq!(reducer.reduce(&InputEvent::PointerDown(PointerButton::Middle)), InputEffect::Ignored);
    assert!(!reducer.mode().drag_active);
}

#[test]
fn unrelated_keys_do_not_fall_through() {
    let mut reducer = InputReducer::default();
    let mut viewport = Viewport::default();
    let before = viewport;

    for event in [
        InputEvent::KeyDown(Key::Shift),
        InputEvent::KeyDown(Key::Other("KeyA".to_string())),
        InputEvent::KeyUp(Key::Alt),
    ] {
        assert_eq!(reducer.reduce(&event), InputEffect::Ignored);
        assert_eq!(reducer.handle(&event, &mut viewport, || ScreenPoint::new(5.0, 5.0)), LoopSignal::Continue);
    }

    assert_eq!(reducer.mode(), InteractionMode::default());
    assert_eq!(viewport, before);
}

#[test]
fn modifier_key_is_configurable() {
    let settings = InputSettings { zoom_modifier: Key::Shift, ..InputSettings::default() };
    let mut reducer = InputReducer::new(settings);

    assert_eq!(reducer.reduce(&InputEvent::KeyDown(Key::LeftControl)), InputEffect::Ignored);
    reducer.reduce(&InputEvent::KeyDown(Key::Shift));
    assert!(reducer.mode().zoom_modifier_held);
}

#[test]
fn quit_terminates() {
    let mut reducer = InputReducer::default();
    let mut viewport = Viewport::default();

    let signal = reducer.handle(&InputEvent::Quit, &mut viewport, || ScreenPoint::default());

    assert_eq!(signal, LoopSignal::Terminate);
    assert!(reducer.is_terminated());
}

#[test]
fn pointer_is_queried_only_for_zoom() {
    let mut reducer = InputReducer::default();
    let mut viewport = Viewport::default();
    let queries = Cell::new(0);
    let pointer = || {
        queries.set(queries.get() + 1);
        ScreenPoint::new(100.0, 100.0)
    };

    reducer.handle(&scroll(ScrollDirection::Up), &mut viewport, pointer);
    assert_eq!(queries.get(), 0);
    assert_eq!(viewport.pan_x, -50.0);

    reducer.handle(&InputEvent::KeyDown(Key::LeftControl), &mut viewport, pointer);
    reducer.handle(&scroll(ScrollDirection::Up), &mut viewport, pointer);
    assert_eq!(queries.get(), 1);
    assert!(approx(viewport.scale, 3.05));
}
