use super::value_objects::{InstrumentId, OhlcRecord};
use crate::domain::errors::{IngestionError, IngestionResult};
use crate::domain::logging::{LogComponent, get_logger};
use std::collections::HashMap;

/// Domain entity - chronological (oldest first) records of one instrument.
/// Horizontal position is the sequence index; there is no timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    records: Vec<OhlcRecord>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: OhlcRecord) {
        self.records.push(record);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OhlcRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[OhlcRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&OhlcRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lowest low and highest high across the series
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let first = self.records.first()?;
        let range = self.records.iter().fold((first.low, first.high), |(min, max), r| {
            (min.min(r.low), max.max(r.high))
        });
        Some(range)
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a OhlcRecord;
    type IntoIter = std::slice::Iter<'a, OhlcRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Domain entity - instrument identifier to series. The active instrument is
/// chosen at startup and never changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: HashMap<InstrumentId, PriceSeries>,
    active: Option<InstrumentId>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a single empty series registered and marked active
    pub fn with_active(id: InstrumentId) -> Self {
        let mut store = Self::new();
        store.register(id.clone());
        store.active = Some(id);
        store
    }

    /// Register an empty series; an existing one is left untouched
    pub fn register(&mut self, id: InstrumentId) {
        self.series.entry(id).or_default();
    }

    pub fn insert(&mut self, id: InstrumentId, series: PriceSeries) -> Option<PriceSeries> {
        self.series.insert(id, series)
    }

    pub fn get(&self, id: &InstrumentId) -> Option<&PriceSeries> {
        self.series.get(id)
    }

    pub fn contains(&self, id: &InstrumentId) -> bool {
        self.series.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn active(&self) -> Option<&InstrumentId> {
        self.active.as_ref()
    }

    pub fn active_series(&self) -> Option<&PriceSeries> {
        self.active.as_ref().and_then(|id| self.series.get(id))
    }

    /// Append records to a registered series, in order.
    ///
    /// An unknown identifier appends nothing: the miss is logged once and
    /// reported as [`IngestionError::SeriesNotFound`].
    pub fn append<I>(&mut self, id: &InstrumentId, records: I) -> IngestionResult<usize>
    where
        I: IntoIterator<Item = OhlcRecord>,
    {
        let series = self.series_mut(id)?;
        let before = series.len();
        for record in records {
            series.push(record);
        }
        Ok(series.len() - before)
    }

    /// Mutable access for ingestion into a registered series
    pub(crate) fn series_mut(&mut self, id: &InstrumentId) -> IngestionResult<&mut PriceSeries> {
        match self.series.get_mut(id) {
            Some(series) => Ok(series),
            None => {
                get_logger().warn(
                    LogComponent::Domain("SeriesStore"),
                    &format!("Cannot find quote {}: series not found", id),
                );
                Err(IngestionError::SeriesNotFound(id.clone()))
            }
        }
    }
}
