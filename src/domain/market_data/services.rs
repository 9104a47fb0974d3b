use super::value_objects::{MalformedFieldPolicy, OhlcRecord};
use crate::domain::errors::FieldError;

/// Numeric columns of one source row as undecoded bytes. `None` means the
/// row ended before the column. Text encoding is only checked per price
/// column, so bytes elsewhere in the row never matter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawRow<'a> {
    pub open: Option<&'a [u8]>,
    pub high: Option<&'a [u8]>,
    pub low: Option<&'a [u8]>,
    pub close: Option<&'a [u8]>,
}

/// Convert one price column
pub fn parse_price_field(column: &'static str, raw: Option<&[u8]>) -> Result<f64, FieldError> {
    let bytes = raw.ok_or(FieldError::Missing { column })?;
    let raw = std::str::from_utf8(bytes)
        .map_err(|_| FieldError::NotNumeric { column, raw: String::from_utf8_lossy(bytes).into_owned() })?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Missing { column });
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| FieldError::NotNumeric { column, raw: raw.to_string() })?;
    if !value.is_finite() {
        return Err(FieldError::NotFinite { column, raw: raw.to_string() });
    }
    Ok(value)
}

/// Result of turning one row into a record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Complete(OhlcRecord),
    /// Some columns failed and were zero-filled
    Patched { record: OhlcRecord, failures: Vec<FieldError> },
    Discarded { failures: Vec<FieldError> },
}

impl RecordOutcome {
    pub fn record(&self) -> Option<&OhlcRecord> {
        match self {
            RecordOutcome::Complete(record) | RecordOutcome::Patched { record, .. } => Some(record),
            RecordOutcome::Discarded { .. } => None,
        }
    }

    pub fn failures(&self) -> &[FieldError] {
        match self {
            RecordOutcome::Complete(_) => &[],
            RecordOutcome::Patched { failures, .. } | RecordOutcome::Discarded { failures } => failures,
        }
    }
}

/// Builds records from raw rows under a [`MalformedFieldPolicy`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordAssembler {
    policy: MalformedFieldPolicy,
}

impl RecordAssembler {
    pub fn new(policy: MalformedFieldPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MalformedFieldPolicy {
        self.policy
    }

    pub fn assemble(&self, row: &RawRow<'_>) -> RecordOutcome {
        let mut failures = Vec::new();
        let mut take = |column: &'static str, raw: Option<&[u8]>| match parse_price_field(column, raw) {
            Ok(value) => value,
            Err(err) => {
                failures.push(err);
                0.0
            }
        };

        let high = take("high", row.high);
        let low = take("low", row.low);
        let open = take("open", row.open);
        let close = take("close", row.close);
        let record = OhlcRecord::new(high, low, open, close);

        if failures.is_empty() {
            return RecordOutcome::Complete(record);
        }
        match self.policy {
            MalformedFieldPolicy::ZeroFill => RecordOutcome::Patched { record, failures },
            MalformedFieldPolicy::DiscardRecord => RecordOutcome::Discarded { failures },
        }
    }
}

/// Tally of one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub appended: usize,
    pub patched: usize,
    pub discarded: usize,
    pub field_failures: usize,
}

impl IngestReport {
    pub fn tally(&mut self, outcome: &RecordOutcome) {
        self.field_failures += outcome.failures().len();
        match outcome {
            RecordOutcome::Complete(_) => self.appended += 1,
            RecordOutcome::Patched { .. } => {
                self.appended += 1;
                self.patched += 1;
            }
            RecordOutcome::Discarded { .. } => self.discarded += 1,
        }
    }
}
