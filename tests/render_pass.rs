mod common;

use candlestick_viewer::application::{ChartViewer, FrameStats, RenderPass};
use candlestick_viewer::config::ViewerConfig;
use candlestick_viewer::domain::chart::{CandlePalette, CanvasSize, Color, Viewport};
use candlestick_viewer::domain::market_data::{InstrumentId, OhlcRecord, PriceSeries, SeriesStore};
use candlestick_viewer::infrastructure::rendering::{DrawCommand, RecordingSurface};
use common::{AAPL_CSV, capture_logs};

fn small_series() -> SeriesStore {
    let id = InstrumentId::from("TEST");
    let mut store = SeriesStore::with_active(id.clone());
    store
        .append(&id, [OhlcRecord::new(5.0, 1.0, 2.0, 4.0), OhlcRecord::new(6.0, 2.0, 5.0, 3.0)])
        .unwrap();
    store
}

fn small_viewport() -> Viewport {
    Viewport::new(CanvasSize::new(40.0, 20.0), 1.0)
}

#[test]
fn frame_transcript_with_grid() {
    capture_logs();
    let store = small_series();
    let mut surface = RecordingSurface::new();

    let stats = RenderPass::new(CandlePalette::default(), true)
        .execute(&mut surface, &small_viewport(), store.active_series())
        .unwrap();

    assert_eq!(stats, FrameStats { grid_lines: 6, candles: 2 });
    insta::assert_snapshot!(surface.transcript().trim_end(), @r"
    color 20 20 20 255
    clear
    color 100 100 100 255
    scale 1 1
    line 0 0 0 20
    line 10 0 10 20
    line 20 0 20 20
    line 30 0 30 20
    line 0 0 40 0
    line 0 10 40 10
    scale 1 1
    color 0 255 0 255
    line 0 5 0 17
    rect -1 16 2 -4
    color 255 0 0 255
    line 20 2 20 14
    rect 19 10 2 4
    present
    ");
}

#[test]
fn grid_off_goes_straight_to_scaled_candles() {
    let store = small_series();
    let mut surface = RecordingSurface::new();
    let viewport = Viewport::new(CanvasSize::new(40.0, 20.0), 3.0);

    RenderPass::new(CandlePalette::default(), false)
        .execute(&mut surface, &viewport, store.active_series())
        .unwrap();

    let commands = surface.commands();
    assert_eq!(commands[0], DrawCommand::SetDrawColor(Color::BACKGROUND));
    assert_eq!(commands[1], DrawCommand::Clear);
    assert_eq!(commands[2], DrawCommand::SetScale { sx: 3.0, sy: 3.0 });
    assert_eq!(commands.last(), Some(&DrawCommand::Present));
    assert_eq!(surface.lines().count(), 2);
    assert_eq!(surface.rects().count(), 2);
}

#[test]
fn every_candle_sets_its_color_first() {
    let store = small_series();
    let mut surface = RecordingSurface::new();

    RenderPass::new(CandlePalette::default(), false)
        .execute(&mut surface, &small_viewport(), store.active_series())
        .unwrap();

    let candle_commands = &surface.commands()[3..surface.commands().len() - 1];
    for chunk in candle_commands.chunks(3) {
        assert!(matches!(chunk[0], DrawCommand::SetDrawColor(_)));
        assert!(matches!(chunk[1], DrawCommand::Line(_)));
        assert!(matches!(chunk[2], DrawCommand::FillRect(_)));
    }
}

#[test]
fn missing_series_draws_background_only() {
    let mut surface = RecordingSurface::new();

    let stats = RenderPass::new(CandlePalette::default(), false)
        .execute(&mut surface, &small_viewport(), None)
        .unwrap();

    assert_eq!(stats, FrameStats::default());
    assert_eq!(surface.transcript(), "color 20 20 20 255\nclear\nscale 1 1\npresent\n");
}

#[test]
fn aapl_candles_land_in_two_slots() {
    capture_logs();
    let mut viewer = ChartViewer::new(&ViewerConfig::default());
    viewer.load_csv_text(AAPL_CSV).unwrap();
    let mut surface = RecordingSurface::new();

    let stats = viewer.render_frame(&mut surface).unwrap();

    assert_eq!(stats.candles, 2);
    let wick_xs: Vec<f64> = surface
        .last_frame()
        .iter()
        .skip_while(|c| !matches!(c, DrawCommand::SetScale { sx, .. } if *sx == 3.0))
        .filter_map(|c| match c {
            DrawCommand::Line(line) => Some(line.x1),
            _ => None,
        })
        .collect();
    assert_eq!(wick_xs, vec![0.0, 960.0]);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_projection_matches_sequential() {
    let id = InstrumentId::from("BULK");
    let mut store = SeriesStore::with_active(id.clone());
    store
        .append(&id, (0..2_500).map(|i| {
            let base = 100.0 + (i % 37) as f64;
            OhlcRecord::new(base + 3.0, base - 3.0, base, base + if i % 2 == 0 { 1.0 } else { -1.0 })
        }))
        .unwrap();
    let series: &PriceSeries = store.active_series().unwrap();
    let viewport = Viewport::default();

    let sequential = RenderPass::new(CandlePalette::default(), false)
        .with_parallel_threshold(usize::MAX)
        .project_series(series, &viewport);
    let eager = RenderPass::new(CandlePalette::default(), false)
        .with_parallel_threshold(0)
        .project_series(series, &viewport);

    assert_eq!(sequential.len(), 2_500);
    assert_eq!(sequential, eager);
}

#[test]
fn projection_serializes_for_inspection() {
    let store = small_series();
    let projections = RenderPass::new(CandlePalette::default(), false)
        .project_series(store.active_series().unwrap(), &small_viewport());

    insta::assert_json_snapshot!(projections[0], @r#"
    {
      "color": {
        "r": 0,
        "g": 255,
        "b": 0,
        "a": 255
      },
      "wick": {
        "x1": 0.0,
        "y1": 5.0,
        "x2": 0.0,
        "y2": 17.0
      },
      "body": {
        "x": -1.0,
        "y": 16.0,
        "width": 2.0,
        "height": -4.0
      }
    }
    "#);
}
