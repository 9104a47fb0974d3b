mod common;

use candlestick_viewer::application::{ChartViewer, LoopSignal};
use candlestick_viewer::config::ViewerConfig;
use candlestick_viewer::domain::chart::ScreenPoint;
use candlestick_viewer::domain::events::{InputEvent, Key, PointerButton, ScrollDirection};
use candlestick_viewer::domain::logging::LogLevel;
use candlestick_viewer::infrastructure::input::QueuedInput;
use candlestick_viewer::infrastructure::rendering::{DrawCommand, RecordingSurface};
use candlestick_viewer::infrastructure::services::MemoryLogger;
use common::{AAPL_CSV, capture_logs};

fn viewer() -> ChartViewer {
    let mut viewer = ChartViewer::new(&ViewerConfig::default());
    viewer.load_csv_text(AAPL_CSV).unwrap();
    viewer
}

#[test]
fn run_stops_on_quit_and_closes_the_surface() {
    capture_logs();
    let mut viewer = viewer();
    let mut input = QueuedInput::scripted([InputEvent::Quit]);
    let mut surface = RecordingSurface::new();

    viewer.run(&mut input, &mut surface).unwrap();

    assert!(viewer.is_terminated());
    assert!(!surface.is_open());
    assert_eq!(surface.frames_presented(), 0);
    assert_eq!(
        surface.commands(),
        &[
            DrawCommand::Open { title: "App - AAPL".to_string(), size: viewer.viewport().canvas() },
            DrawCommand::Close,
        ]
    );

    let messages: Vec<String> = MemoryLogger::take_captured()
        .into_iter()
        .filter(|e| e.level == LogLevel::Info)
        .map(|e| e.message)
        .collect();
    assert!(messages.iter().any(|m| m == "Window close requested"));
    assert_eq!(messages.last().map(String::as_str), Some("Application exiting"));
}

#[test]
fn events_are_drained_before_the_frame_is_drawn() {
    capture_logs();
    let mut viewer = viewer();
    let mut input = QueuedInput::new();
    let mut surface = RecordingSurface::new();

    input.extend([
        InputEvent::Scroll { direction: ScrollDirection::Up, delta: 1.0 },
        InputEvent::Scroll { direction: ScrollDirection::Up, delta: 1.0 },
    ]);
    assert_eq!(viewer.frame(&mut input, &mut surface), LoopSignal::Continue);

    assert_eq!(input.pending(), 0);
    assert_eq!(viewer.viewport().pan_x, -100.0);
    assert_eq!(surface.frames_presented(), 1);

    // both pans are visible in the first frame: wicks shifted by -100
    let first_wick = surface.lines().find(|l| l.x1 == l.x2 && l.y1 != 0.0).copied();
    assert_eq!(first_wick.map(|l| l.x1), Some(-100.0));
}

#[test]
fn zoom_follows_pointer_across_frames() {
    capture_logs();
    let mut viewer = viewer();
    let mut input = QueuedInput::new();
    let mut surface = RecordingSurface::new();
    input.set_pointer_position(ScreenPoint::new(0.0, 0.0));

    input.extend([
        InputEvent::KeyDown(Key::LeftControl),
        InputEvent::Scroll { direction: ScrollDirection::Down, delta: -1.0 },
    ]);
    viewer.frame(&mut input, &mut surface);
    assert!((viewer.viewport().scale - 2.95).abs() < 1e-9);

    input.extend([
        InputEvent::KeyUp(Key::LeftControl),
        InputEvent::Scroll { direction: ScrollDirection::Down, delta: -1.0 },
    ]);
    viewer.frame(&mut input, &mut surface);
    assert!((viewer.viewport().scale - 2.95).abs() < 1e-9);
    assert!((viewer.viewport().pan_x - 50.0).abs() < 1e-9);
    assert_eq!(surface.frames_presented(), 2);
}

#[test]
fn drag_across_frames_accumulates_damped_motion() {
    capture_logs();
    let mut viewer = viewer();
    let mut input = QueuedInput::new();
    let mut surface = RecordingSurface::new();

    input.extend([
        InputEvent::PointerDown(PointerButton::Primary),
        InputEvent::PointerMove { dx: 5.0, dy: 5.0 },
    ]);
    viewer.frame(&mut input, &mut surface);
    input.extend([
        InputEvent::PointerMove { dx: 5.0, dy: 5.0 },
        InputEvent::PointerUp(PointerButton::Primary),
        InputEvent::PointerMove { dx: 100.0, dy: 100.0 },
    ]);
    viewer.frame(&mut input, &mut surface);

    assert!((viewer.viewport().pan_x - 4.0).abs() < 1e-9);
    assert!((viewer.viewport().pan_y - 4.0).abs() < 1e-9);
    assert!(!viewer.reducer().mode().drag_active);
}

#[test]
fn quit_mid_queue_skips_the_render() {
    capture_logs();
    let mut viewer = viewer();
    let mut input = QueuedInput::scripted([
        InputEvent::Scroll { direction: ScrollDirection::Up, delta: 1.0 },
        InputEvent::Quit,
        InputEvent::Scroll { direction: ScrollDirection::Up, delta: 1.0 },
    ]);
    let mut surface = RecordingSurface::new();

    assert_eq!(viewer.frame(&mut input, &mut surface), LoopSignal::Terminate);
    assert_eq!(surface.frames_presented(), 0);
    assert_eq!(viewer.viewport().pan_x, -50.0);
    assert_eq!(input.pending(), 1);

    // terminal: later frames do nothing
    assert_eq!(viewer.frame(&mut input, &mut surface), LoopSignal::Terminate);
    assert_eq!(surface.frames_presented(), 0);
}

#[test]
fn empty_data_still_renders_frames() {
    capture_logs();
    let mut viewer = ChartViewer::new(&ViewerConfig::default());
    let mut input = QueuedInput::new();
    let mut surface = RecordingSurface::new();

    for _ in 0..3 {
        assert_eq!(viewer.frame(&mut input, &mut surface), LoopSignal::Continue);
    }

    assert_eq!(surface.frames_presented(), 3);
    assert_eq!(viewer.last_stats().candles, 0);
    assert!(surface.rects().next().is_none());
}

#[test]
fn invalid_instrument_renders_nothing() {
    capture_logs();
    let config = ViewerConfig { instrument: "   ".to_string(), ..ViewerConfig::default() };
    let mut viewer = ChartViewer::new(&config);

    assert!(viewer.load_csv_text(AAPL_CSV).is_err());
    assert!(viewer.store().is_empty());

    let mut surface = RecordingSurface::new();
    let stats = viewer.render_frame(&mut surface).unwrap();
    assert_eq!(stats.candles, 0);
}
