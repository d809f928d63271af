//! Forecasting engine seam
//!
//! The dashboard treats the statistical model as an opaque collaborator
//! behind these traits. Engines may return in-sample rows alongside the
//! requested future rows; the blender discards anything not strictly after
//! the end of history.

use crate::data::Observation;
use crate::error::Result;
use chrono::NaiveDate;
use std::fmt::Debug;

/// One engine output row
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted date
    pub date: NaiveDate,
    /// Raw predicted rate, before any user scaling
    pub yhat: f64,
    /// Trend component, for informational display only
    pub trend: f64,
    /// Yearly-seasonality component, absent for engines without a
    /// seasonal decomposition
    pub yearly: Option<f64>,
}

/// A fitted engine, ready to produce predictions
pub trait FittedEngine: Debug {
    /// Predict rates for the requested number of future days.
    ///
    /// The returned rows may include in-sample predictions for the
    /// training dates in addition to the `horizon_days` future rows.
    fn predict(&self, horizon_days: usize) -> Result<Vec<Prediction>>;

    /// Name of the engine
    fn name(&self) -> &str;
}

/// A forecasting engine that can be fitted to a merged training series
pub trait ForecastEngine: Debug {
    /// The type of fitted engine produced
    type Fitted: FittedEngine;

    /// Fit the engine to the training series
    fn fit(&self, observations: &[Observation]) -> Result<Self::Fitted>;

    /// Name of the engine
    fn name(&self) -> &str;
}

pub mod ets;
pub mod holt_seasonal;

pub use ets::AutoEts;
pub use holt_seasonal::HoltSeasonal;
