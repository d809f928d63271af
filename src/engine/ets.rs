//! ETS engine backed by the `augurs` crate
//!
//! Off-the-shelf exponential-smoothing alternative to [`HoltSeasonal`].
//! The automatic ETS search is non-seasonal, so predictions carry no
//! yearly component and the corresponding chart is omitted downstream.
//!
//! [`HoltSeasonal`]: crate::engine::HoltSeasonal

use crate::data::Observation;
use crate::engine::{FittedEngine, ForecastEngine, Prediction};
use crate::error::{DashboardError, Result};
use augurs::ets::AutoETS;
use augurs::prelude::*;
use chrono::{Duration, NaiveDate};

/// Minimum number of observations for a stable ETS fit
const MIN_OBSERVATIONS: usize = 7;

/// Prediction-interval level requested from the model
const INTERVAL_LEVEL: f64 = 0.95;

/// Automatic non-seasonal ETS engine
#[derive(Debug, Clone, Default)]
pub struct AutoEts;

/// Fitted ETS engine
///
/// Holds the training series; the ETS model search runs when predictions
/// are requested.
#[derive(Debug, Clone)]
pub struct FittedAutoEts {
    /// Training values, in input order
    values: Vec<f64>,
    /// Latest training date; future rows start the day after
    last_date: NaiveDate,
}

impl AutoEts {
    /// Create a new automatic ETS engine
    pub fn new() -> Self {
        Self
    }
}

impl ForecastEngine for AutoEts {
    type Fitted = FittedAutoEts;

    fn fit(&self, observations: &[Observation]) -> Result<Self::Fitted> {
        if observations.len() < MIN_OBSERVATIONS {
            return Err(DashboardError::Engine(format!(
                "need at least {} observations for an ETS fit, got {}",
                MIN_OBSERVATIONS,
                observations.len()
            )));
        }

        let last_date = match observations.iter().map(|o| o.date).max() {
            Some(date) => date,
            None => unreachable!("observations checked non-empty above"),
        };

        Ok(FittedAutoEts {
            values: observations.iter().map(|o| o.value).collect(),
            last_date,
        })
    }

    fn name(&self) -> &str {
        "Auto ETS (non-seasonal)"
    }
}

impl FittedEngine for FittedAutoEts {
    fn predict(&self, horizon_days: usize) -> Result<Vec<Prediction>> {
        let mut ets = AutoETS::non_seasonal();

        let model = ets
            .fit(&self.values)
            .map_err(|e| DashboardError::Engine(format!("ETS fit error: {}", e)))?;
        let forecast = model
            .predict(horizon_days, INTERVAL_LEVEL)
            .map_err(|e| DashboardError::Engine(format!("ETS predict error: {}", e)))?;

        let predictions = forecast
            .point
            .iter()
            .enumerate()
            .map(|(step, &yhat)| Prediction {
                date: self.last_date + Duration::days(step as i64 + 1),
                yhat,
                trend: yhat,
                yearly: None,
            })
            .collect();

        Ok(predictions)
    }

    fn name(&self) -> &str {
        "Auto ETS (non-seasonal)"
    }
}
