use crate::domain::{
    errors::{IngestionError, IngestionResult},
    logging::LogComponent,
    market_data::{IngestReport, InstrumentId, MalformedFieldPolicy, RawRow, RecordAssembler, SeriesStore},
};
use crate::{log_debug, log_error, log_info, log_trace, log_warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column layout of the source: date, open, high, low, close, adjclose, volume
const OPEN_COLUMN: usize = 1;
const HIGH_COLUMN: usize = 2;
const LOW_COLUMN: usize = 3;
const CLOSE_COLUMN: usize = 4;

/// Appends rows of a daily price CSV to a registered series.
///
/// The first line is always treated as a header and skipped. Rows that fail
/// to convert are handled by the configured [`MalformedFieldPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSeriesLoader {
    assembler: RecordAssembler,
}

impl CsvSeriesLoader {
    pub fn new(policy: MalformedFieldPolicy) -> Self {
        Self { assembler: RecordAssembler::new(policy) }
    }

    pub fn policy(&self) -> MalformedFieldPolicy {
        self.assembler.policy()
    }

    /// Load `path` into the series of `id`. A missing or unreadable file
    /// is logged and leaves the store untouched.
    pub fn ingest_file(
        &self,
        store: &mut SeriesStore,
        id: &InstrumentId,
        path: &Path,
    ) -> IngestionResult<IngestReport> {
        let file = File::open(path).map_err(|e| {
            log_error!(
                LogComponent::Infrastructure("CsvSeriesLoader"),
                "cannot open data file {}: {}",
                path.display(),
                e
            );
            IngestionError::SourceUnavailable { path: path.display().to_string(), reason: e.to_string() }
        })?;

        self.ingest_reader(store, id, file)
    }

    pub fn ingest_str(&self, store: &mut SeriesStore, id: &InstrumentId, text: &str) -> IngestionResult<IngestReport> {
        self.ingest_from(store, id, text.as_bytes(), "<text>")
    }

    pub fn ingest_reader<R: Read>(
        &self,
        store: &mut SeriesStore,
        id: &InstrumentId,
        reader: R,
    ) -> IngestionResult<IngestReport> {
        self.ingest_from(store, id, reader, "<reader>")
    }

    /// Records are appended only once the whole source has been read, so a
    /// read failure part way through leaves the series as it was.
    fn ingest_from<R: Read>(
        &self,
        store: &mut SeriesStore,
        id: &InstrumentId,
        reader: R,
        source: &str,
    ) -> IngestionResult<IngestReport> {
        let series = store.series_mut(id)?;
        let mut report = IngestReport::default();
        let mut accepted = Vec::new();

        let mut rows = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        for result in rows.byte_records() {
            let row = match result {
                Ok(row) => row,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    log_error!(
                        LogComponent::Infrastructure("CsvSeriesLoader"),
                        "read of {} failed after {} rows: {}",
                        source,
                        accepted.len() + report.discarded,
                        e
                    );
                    return Err(IngestionError::SourceUnavailable { path: source.to_string(), reason: e.to_string() });
                }
                Err(e) => {
                    log_warn!(LogComponent::Infrastructure("CsvSeriesLoader"), "skipping unreadable line: {}", e);
                    report.discarded += 1;
                    continue;
                }
            };
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            log_trace!(
                LogComponent::Infrastructure("CsvSeriesLoader"),
                "line {}: {:?}",
                line,
                row
            );

            let raw = RawRow {
                open: row.get(OPEN_COLUMN),
                high: row.get(HIGH_COLUMN),
                low: row.get(LOW_COLUMN),
                close: row.get(CLOSE_COLUMN),
            };
            let outcome = self.assembler.assemble(&raw);
            for failure in outcome.failures() {
                log_warn!(LogComponent::Infrastructure("CsvSeriesLoader"), "line {}: {}", line, failure);
            }
            report.tally(&outcome);

            if let Some(record) = outcome.record() {
                if !record.is_consistent() {
                    log_debug!(
                        LogComponent::Infrastructure("CsvSeriesLoader"),
                        "line {}: high/low do not bound open/close, kept as is",
                        line
                    );
                }
                accepted.push(*record);
            }
        }

        for record in accepted {
            series.push(record);
        }

        log_info!(
            LogComponent::Infrastructure("CsvSeriesLoader"),
            "📊 {}: {} records appended ({} patched, {} discarded)",
            id,
            report.appended,
            report.patched,
            report.discarded
        );
        Ok(report)
    }
}
