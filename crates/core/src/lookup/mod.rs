pub mod error;

use crate::domain::{ParticipantRecord, TimeWindow};
use crate::storage::SnapshotStore;
use serde::Serialize;
use std::sync::Arc;

pub use error::LookupError;

pub const NOT_FOUND: &str = "Not Found";
pub const NOT_AVAILABLE: &str = "N/A";

/// One line of the result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultRow {
    pub timeframe: &'static str,
    pub rank: String,
    pub mindshare: String,
    pub handle: String,
    pub found: bool,
}

impl SearchResultRow {
    fn found(window: TimeWindow, record: &ParticipantRecord) -> Self {
        Self {
            timeframe: window.label(),
            rank: format!("#{}", record.rank),
            mindshare: format_mindshare(record.mindshare),
            handle: record.username.clone(),
            found: true,
        }
    }

    fn not_found(window: TimeWindow, handle: &str) -> Self {
        Self {
            timeframe: window.label(),
            rank: NOT_FOUND.to_string(),
            mindshare: NOT_AVAILABLE.to_string(),
            handle: handle.to_string(),
            found: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupOutcome {
    /// Headline handle: taken from the first window that has a snapshot, so it
    /// carries snapshot casing when that window matched. The query handle when
    /// no window is loaded.
    pub handle: String,
    pub rows: Vec<SearchResultRow>,
}

/// Fraction to percentage with four decimals: `0.123456` -> `12.3456%`.
pub fn format_mindshare(mindshare: f64) -> String {
    format!("{}%", to_fixed_4(mindshare * 100.0))
}

// f64 has at most 1074 fractional decimal digits.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Four decimals, with exact halfway values rounded away from zero. `{:.4}`
/// alone rounds those to even.
fn to_fixed_4(value: f64) -> String {
    let plain = format!("{value:.4}");
    if !value.is_finite() {
        return plain;
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let Some((whole, fraction)) = exact.split_once('.') else {
        return plain;
    };
    let (kept, rest) = fraction.split_at(4);
    let halfway = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !halfway {
        return plain;
    }

    let mut digits: Vec<u8> = whole.bytes().chain(kept.bytes()).collect();
    let mut carry = true;
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            carry = false;
            break;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let digits: String = digits.into_iter().map(char::from).collect();
    let (int_part, frac_part) = digits.split_at(digits.len() - 4);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{int_part}.{frac_part}")
}

/// Accepts `@handle` after trimming. The handle may be empty.
pub fn parse_query(raw: &str) -> Result<&str, LookupError> {
    raw.trim()
        .strip_prefix('@')
        .ok_or_else(|| LookupError::InvalidFormat {
            raw: raw.to_string(),
        })
}

#[derive(Debug, Clone)]
pub struct LookupEngine {
    store: Arc<SnapshotStore>,
}

impl LookupEngine {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// One row per window in canonical order, whatever the store holds.
    pub fn search(&self, handle: &str) -> Vec<SearchResultRow> {
        TimeWindow::ALL
            .into_iter()
            .map(|window| {
                let snapshot = self.store.get(window);
                match snapshot.as_deref().and_then(|s| s.find(handle)) {
                    Some(record) => SearchResultRow::found(window, record),
                    None => SearchResultRow::not_found(window, handle),
                }
            })
            .collect()
    }

    pub fn lookup(&self, raw: &str) -> Result<LookupOutcome, LookupError> {
        let handle = match parse_query(raw) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::debug!(query = raw, "rejected lookup query");
                return Err(err);
            }
        };

        let rows = self.search(handle);
        let found = rows.iter().filter(|r| r.found).count();
        tracing::debug!(handle, found, "lookup finished");

        let loaded = self.store.loaded_windows();
        let headline = TimeWindow::ALL
            .into_iter()
            .zip(&rows)
            .find(|(window, _)| loaded.contains(window))
            .map(|(_, row)| row.handle.clone())
            .unwrap_or_else(|| handle.to_string());
        Ok(LookupOutcome {
            handle: headline,
            rows,
        })
    }
}
