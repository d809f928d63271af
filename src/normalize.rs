//! Series Normalizer: merges the user-supplied anchor into the historical series

use crate::data::Observation;
use crate::error::{DashboardError, Result};
use chrono::{NaiveDate, Utc};

/// The synthetic "today" observation built from user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Date of the anchor observation
    pub date: NaiveDate,
    /// User-entered closing rate
    pub value: f64,
}

impl Anchor {
    /// Create an anchor at an explicit date
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Create an anchor dated at the current instant
    pub fn today(value: f64) -> Self {
        Self {
            date: Utc::now().date_naive(),
            value,
        }
    }
}

/// Merge the anchor observation into the historical series.
///
/// The output preserves all historical rows in input order and appends
/// exactly one anchor row. The merged sequence is not re-sorted: an anchor
/// dated before the last historical row passes through out of order, and
/// how the forecasting engine treats that is the engine's responsibility.
pub fn merge_anchor(history: &[Observation], anchor: &Anchor) -> Result<Vec<Observation>> {
    if history.is_empty() {
        return Err(DashboardError::DataLoad(
            "historical series is empty".to_string(),
        ));
    }

    if !anchor.value.is_finite() || anchor.value <= 0.0 {
        return Err(DashboardError::Validation(format!(
            "anchor rate must be a positive number, got {}",
            anchor.value
        )));
    }

    let mut merged = Vec::with_capacity(history.len() + 1);
    merged.extend_from_slice(history);
    merged.push(Observation {
        date: anchor.date,
        value: anchor.value,
    });

    Ok(merged)
}
