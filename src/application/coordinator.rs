use crate::application::use_cases::{DisplaySurface, FrameStats, InputReducer, InputSource, LoopSignal, RenderPass};
use crate::config::ViewerConfig;
use crate::domain::{
    chart::Viewport,
    errors::{AppError, IngestionResult},
    logging::{LogComponent, get_logger},
    market_data::{IngestReport, InstrumentId, PriceSeries, SeriesStore},
};
use crate::infrastructure::data::CsvSeriesLoader;
use std::path::Path;

/// Owns the series, the viewport and the interaction state, and alternates
/// input draining with rendering. Single-threaded: the viewport is written
/// only while draining and read only while rendering.
pub struct ChartViewer {
    title: String,
    instrument: InstrumentId,
    store: SeriesStore,
    viewport: Viewport,
    reducer: InputReducer,
    render_pass: RenderPass,
    loader: CsvSeriesLoader,
    last_stats: FrameStats,
}

impl ChartViewer {
    /// Viewer with the configured instrument registered but no data yet
    pub fn new(config: &ViewerConfig) -> Self {
        get_logger().info(LogComponent::Application("ChartViewer"), "Application starting");

        let store = match config.instrument_id() {
            Ok(id) => SeriesStore::with_active(id),
            Err(e) => {
                get_logger().error(LogComponent::Application("ChartViewer"), &e.to_string());
                SeriesStore::new()
            }
        };

        Self {
            title: config.title.clone(),
            instrument: InstrumentId::from(config.instrument.as_str()),
            store,
            viewport: config.initial_viewport(),
            reducer: InputReducer::new(config.input.clone()),
            render_pass: RenderPass::new(config.palette, config.show_grid),
            loader: CsvSeriesLoader::new(config.field_policy),
            last_stats: FrameStats::default(),
        }
    }

    /// Build the viewer and load `<data_dir>/<instrument>.csv`. A failed load
    /// is logged and the viewer starts with an empty series.
    pub fn bootstrap(config: &ViewerConfig) -> Self {
        let mut viewer = Self::new(config);
        let _ = viewer.load_file(&config.data_file());
        viewer
    }

    /// Append a CSV file to the instrument's series. An instrument that never
    /// got registered ends in the store's not-found path.
    pub fn load_file(&mut self, path: &Path) -> IngestionResult<IngestReport> {
        self.loader.ingest_file(&mut self.store, &self.instrument, path)
    }

    pub fn load_csv_text(&mut self, text: &str) -> IngestionResult<IngestReport> {
        self.loader.ingest_str(&mut self.store, &self.instrument, text)
    }

    pub fn instrument(&self) -> &InstrumentId {
        &self.instrument
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn active_series(&self) -> Option<&PriceSeries> {
        self.store.active_series()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn reducer(&self) -> &InputReducer {
        &self.reducer
    }

    pub fn is_terminated(&self) -> bool {
        self.reducer.is_terminated()
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Handle every queued event in arrival order. Stops at window-close.
    pub fn drain_input(&mut self, source: &mut dyn InputSource) -> LoopSignal {
        while let Some(event) = source.poll_event() {
            let signal = self.reducer.handle(&event, &mut self.viewport, || source.pointer_position());
            if signal == LoopSignal::Terminate {
                get_logger().info(LogComponent::Application("ChartViewer"), "Window close requested");
                return LoopSignal::Terminate;
            }
        }
        LoopSignal::Continue
    }

    pub fn render_frame(&mut self, surface: &mut dyn DisplaySurface) -> Result<FrameStats, AppError> {
        let stats = self.render_pass.execute(surface, &self.viewport, self.store.active_series())?;
        self.last_stats = stats;
        Ok(stats)
    }

    /// One loop iteration: drain input, then render unless the window closed.
    /// Render failures are logged; the loop keeps going.
    pub fn frame(&mut self, source: &mut dyn InputSource, surface: &mut dyn DisplaySurface) -> LoopSignal {
        if self.is_terminated() || self.drain_input(source) == LoopSignal::Terminate {
            return LoopSignal::Terminate;
        }
        if let Err(e) = self.render_frame(surface) {
            get_logger().error(LogComponent::Application("ChartViewer"), &e.to_string());
        }
        LoopSignal::Continue
    }

    /// Open the surface and loop until window-close, then release it.
    pub fn run(&mut self, source: &mut dyn InputSource, surface: &mut dyn DisplaySurface) -> Result<(), AppError> {
        surface.open(&self.title, self.viewport.canvas())?;
        while self.frame(source, surface) == LoopSignal::Continue {}
        self.shutdown(surface);
        Ok(())
    }

    pub fn shutdown(&mut self, surface: &mut dyn DisplaySurface) {
        surface.close();
        get_logger().info(LogComponent::Application("ChartViewer"), "Application exiting");
    }
}
