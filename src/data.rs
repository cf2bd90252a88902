use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub type TxNo = i32;

/// Minimum number of columns a data line must carry:
/// `TransactionNo,Items,DateTime,DayPart,DayType`. Extra columns are ignored.
pub const COLUMNS: usize = 5;

/// One validated line of the bakery CSV. `items` is never empty, and despite its
/// name it's a single cake label, not a list. The date and the two categories are
/// kept as free text since nothing downstream needs them parsed.
///
/// The whole record derives `Hash`/`Eq` so it can be its own deduplication key:
/// comparing fields structurally means `a|b` + `c` can never collide with `a` + `b|c`
/// the way a joined string key could.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub(crate) struct Transaction {
    #[serde(rename = "TransactionNo")]
    pub transaction_no: TxNo,
    #[serde(rename = "Items")]
    pub items: String,
    #[serde(rename = "DateTime")]
    pub datetime: String,
    #[serde(rename = "DayPart")]
    pub daypart: String,
    #[serde(rename = "DayType")]
    pub daytype: String,
}

/// A cake is nothing more than its name; it's always derived from a `Transaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Cake {
    #[serde(rename = "Name")]
    pub name: String,
}

impl Cake {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoadOptions {
    pub drop_header: bool,
    pub dedupe_rows: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            drop_header: true,
            dedupe_rows: true,
        }
    }
}

/// Per-category line counters. Every physical line lands in exactly one bucket,
/// the recognized header (if any) being the only line not counted here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoadStats {
    pub ok: usize,
    pub skipped_blank: usize,
    pub skipped_bad: usize,
    pub skipped_dup: usize,
    pub header_skipped: bool,
}

impl LoadStats {
    /// Number of physical lines seen, header included.
    pub fn lines(&self) -> usize {
        self.ok
            + self.skipped_blank
            + self.skipped_bad
            + self.skipped_dup
            + usize::from(self.header_skipped)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Loaded {
    pub rows: Vec<Transaction>,
    pub stats: LoadStats,
}

/// Why a single line was rejected. These never abort a load: the loader counts
/// them, logs them and moves on to the next line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RowError {
    #[error("expected at least 5 columns, found {0}")]
    TooFewColumns(usize),
    #[error("invalid transactionNo {0:?}")]
    InvalidTransactionNo(String),
    #[error("empty items")]
    EmptyItems,
    #[error("not valid UTF-8")]
    InvalidUtf8,
    #[error("duplicate row")]
    Duplicate,
}

impl RowError {
    /// Duplicates get their own counter; everything else is a malformed line.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RowError::Duplicate)
    }
}

/// Fatal loader errors; the only ones that make the whole run fail.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("read error after line {line}: {source}")]
    Read {
        line: usize,
        source: std::io::Error,
    },
}
