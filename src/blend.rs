//! Forecast Blender: scales engine output and splices it with history
//!
//! The blended series is a disjoint union: historical rows carry only the
//! observed rate, forecast rows only the scaled prediction. Predictions
//! dated at or before the end of history are discarded, so a prediction
//! sharing a date with a historical row resolves to the historical value
//! (inherited behavior of the original fill-based merge).

use crate::data::Observation;
use crate::engine::Prediction;
use crate::error::{DashboardError, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Days per forecast year. Leap years are deliberately ignored; this is
/// inherited approximate behavior, not a bug to fix.
const DAYS_PER_YEAR: u32 = 365;

/// One row of the blended timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlendedRow {
    /// Row date
    pub date: NaiveDate,
    /// Historical closing rate, present on historical rows only
    pub observed: Option<f64>,
    /// Scaled prediction, present on forecast rows only
    pub adjusted: Option<f64>,
    /// The displayed value: observed if present, else adjusted
    pub combined: f64,
}

/// The merged historical + scaled-forecast timeline
#[derive(Debug, Clone)]
pub struct BlendedSeries {
    /// Historical rows followed by future forecast rows
    rows: Vec<BlendedRow>,
    /// All scaled predictions, retained for the component charts
    scaled_predictions: Vec<Prediction>,
}

/// Per-year summary derived from the blended series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum YearSummary {
    /// The selected year is in the past or current year and has observed rows
    Historical {
        /// Selected calendar year
        year: i32,
        /// Mean observed closing rate over the year
        actual: f64,
        /// Actual rate scaled by the current USD value
        adjusted: f64,
    },
    /// The selected year is in the future and has forecast rows
    Forecast {
        /// Selected calendar year
        year: i32,
        /// Mean scaled forecast rate over the year
        rate: f64,
    },
    /// No rows match the selected year
    NoData {
        /// Selected calendar year
        year: i32,
    },
}

impl std::fmt::Display for YearSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearSummary::Historical {
                year,
                actual,
                adjusted,
            } => {
                writeln!(f, "Historical Data for {}:", year)?;
                writeln!(f, "Actual Closing Rate: {:.4}", actual)?;
                write!(
                    f,
                    "Adjusted Closing Rate (based on current USD value): {:.4}",
                    adjusted
                )
            }
            YearSummary::Forecast { year, rate } => {
                writeln!(f, "Forecasted Data for {}:", year)?;
                write!(f, "Forecasted Closing Rate: {:.4}", rate)
            }
            YearSummary::NoData { year } => {
                write!(f, "No data available for the year {}.", year)
            }
        }
    }
}

/// Convert a forecast horizon in years to a day count.
///
/// Uses years x 365, ignoring leap years, to preserve the horizon
/// semantics of the original tool.
pub fn horizon_days(years: u32) -> usize {
    (years * DAYS_PER_YEAR) as usize
}

/// Blend the merged historical series with scaled engine predictions.
///
/// Every prediction's raw value is multiplied by `usd_scale`; trend and
/// yearly components pass through unscaled, for informational display
/// only. Only predictions dated strictly after the maximum historical
/// date contribute rows.
pub fn blend(
    history: &[Observation],
    predictions: &[Prediction],
    usd_scale: f64,
) -> Result<BlendedSeries> {
    if !usd_scale.is_finite() || usd_scale <= 0.0 {
        return Err(DashboardError::Validation(format!(
            "scale factor must be a positive number, got {}",
            usd_scale
        )));
    }

    let last_historical = history.iter().map(|o| o.date).max().ok_or_else(|| {
        DashboardError::Validation("cannot blend an empty historical series".to_string())
    })?;

    let scaled_predictions: Vec<Prediction> = predictions
        .iter()
        .map(|p| Prediction {
            date: p.date,
            yhat: p.yhat * usd_scale,
            trend: p.trend,
            yearly: p.yearly,
        })
        .collect();

    let mut rows = Vec::with_capacity(history.len() + scaled_predictions.len());

    for obs in history {
        rows.push(BlendedRow {
            date: obs.date,
            observed: Some(obs.value),
            adjusted: None,
            combined: obs.value,
        });
    }

    for prediction in &scaled_predictions {
        if prediction.date > last_historical {
            rows.push(BlendedRow {
                date: prediction.date,
                observed: None,
                adjusted: Some(prediction.yhat),
                combined: prediction.yhat,
            });
        }
    }

    Ok(BlendedSeries {
        rows,
        scaled_predictions,
    })
}

/// Summarize the blended series for one calendar year.
///
/// Years up to and including `current_year` report the mean observed rate
/// plus its USD-scaled variant; later years report the mean scaled
/// forecast. Years with no matching rows report no data rather than
/// averaging an empty set.
pub fn year_summary(
    series: &BlendedSeries,
    year: i32,
    usd_scale: f64,
    current_year: i32,
) -> YearSummary {
    let matching: Vec<&BlendedRow> = series
        .rows
        .iter()
        .filter(|row| row.date.year() == year)
        .collect();

    if matching.is_empty() {
        return YearSummary::NoData { year };
    }

    if year <= current_year {
        let observed: Vec<f64> = matching.iter().filter_map(|row| row.observed).collect();
        if observed.is_empty() {
            return YearSummary::NoData { year };
        }
        let actual = observed.iter().mean();
        YearSummary::Historical {
            year,
            actual,
            adjusted: actual * usd_scale,
        }
    } else {
        let adjusted: Vec<f64> = matching.iter().filter_map(|row| row.adjusted).collect();
        if adjusted.is_empty() {
            return YearSummary::NoData { year };
        }
        YearSummary::Forecast {
            year,
            rate: adjusted.iter().mean(),
        }
    }
}

impl BlendedSeries {
    /// Get the blended rows, historical rows first
    pub fn rows(&self) -> &[BlendedRow] {
        &self.rows
    }

    /// Get the scaled predictions retained for the component charts
    pub fn scaled_predictions(&self) -> &[Prediction] {
        &self.scaled_predictions
    }

    /// Get the number of blended rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the blended series is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Calendar-year bounds of the blended timeline, for the year selector
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let years = self.rows.iter().map(|row| row.date.year());
        match (years.clone().min(), years.max()) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }
}
