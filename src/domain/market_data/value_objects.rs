use derive_more::{Constructor, Deref, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Value Object - instrument identifier, also the stem of its data file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn new(id: String) -> Result<Self, String> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Instrument identifier cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Conventional data file name: `<id>.csv`
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

/// Value Object - one period of prices. Argument order follows the storage
/// order of the record: high, low, open, close.
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct OhlcRecord {
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
}

impl OhlcRecord {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_doji(&self) -> bool {
        self.open == self.close
    }

    /// `high >= max(open, close)` and `low <= min(open, close)`.
    /// Violations are tolerated by the series, this only reports them.
    pub fn is_consistent(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }
}

/// What to do with a row when one of its numeric columns fails to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MalformedFieldPolicy {
    /// Keep the row, the failed column contributes 0.0
    #[default]
    ZeroFill,
    /// Drop the whole row
    DiscardRecord,
}
