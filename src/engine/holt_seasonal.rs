//! Holt trend smoothing with a day-of-year seasonal component
//!
//! Default engine for the dashboard: a double-exponential (Holt) level and
//! trend pass over the training series, plus a yearly-seasonality component
//! averaged from the detrended residuals by day of year. The seasonal
//! component is only produced when the series spans at least two years.

use crate::data::Observation;
use crate::engine::{FittedEngine, ForecastEngine, Prediction};
use crate::error::{DashboardError, Result};
use chrono::{Datelike, Duration, NaiveDate};

/// Minimum training span, in days, for the yearly component to be fitted
const SEASONAL_MIN_SPAN_DAYS: i64 = 730;

/// Number of day-of-year buckets (leap-year ordinal included)
const SEASONAL_BUCKETS: usize = 366;

/// Holt smoothing engine with optional yearly seasonality
#[derive(Debug, Clone)]
pub struct HoltSeasonal {
    /// Name of the engine
    name: String,
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
}

/// Fitted Holt seasonal engine
#[derive(Debug, Clone)]
pub struct FittedHoltSeasonal {
    /// Name of the engine
    name: String,
    /// Final smoothed level
    level: f64,
    /// Final smoothed trend
    trend: f64,
    /// Latest training date; future rows start the day after
    last_date: NaiveDate,
    /// In-sample predictions for the training dates
    in_sample: Vec<Prediction>,
    /// Mean detrended residual per day of year, when fitted
    seasonal: Option<Vec<f64>>,
}

impl HoltSeasonal {
    /// Create a new Holt seasonal engine
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(DashboardError::Validation(
                "alpha must be between 0 and 1".to_string(),
            ));
        }
        if beta <= 0.0 || beta >= 1.0 {
            return Err(DashboardError::Validation(
                "beta must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Holt Seasonal (alpha={}, beta={})", alpha, beta),
            alpha,
            beta,
        })
    }
}

impl Default for HoltSeasonal {
    fn default() -> Self {
        Self {
            name: "Holt Seasonal (alpha=0.3, beta=0.1)".to_string(),
            alpha: 0.3,
            beta: 0.1,
        }
    }
}

impl ForecastEngine for HoltSeasonal {
    type Fitted = FittedHoltSeasonal;

    fn fit(&self, observations: &[Observation]) -> Result<Self::Fitted> {
        if observations.len() < 2 {
            return Err(DashboardError::Engine(
                "need at least two observations to fit".to_string(),
            ));
        }

        // Holt level and trend pass, recording the level path
        let mut level = observations[0].value;
        let mut trend = 0.0;
        let mut levels = Vec::with_capacity(observations.len());
        levels.push(level);

        for obs in &observations[1..] {
            let new_level = self.alpha * obs.value + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (new_level - level) + (1.0 - self.beta) * trend;
            level = new_level;
            levels.push(level);
        }

        let min_date = observations.iter().map(|o| o.date).min();
        let max_date = observations.iter().map(|o| o.date).max();
        let (min_date, max_date) = match (min_date, max_date) {
            (Some(min), Some(max)) => (min, max),
            _ => unreachable!("observations checked non-empty above"),
        };

        // Yearly component: mean detrended residual per day of year,
        // fitted only when the series spans at least two years
        let seasonal = if (max_date - min_date).num_days() >= SEASONAL_MIN_SPAN_DAYS {
            let mut sums = vec![0.0; SEASONAL_BUCKETS];
            let mut counts = vec![0usize; SEASONAL_BUCKETS];
            for (obs, fitted_level) in observations.iter().zip(&levels) {
                let bucket = obs.date.ordinal0() as usize;
                sums[bucket] += obs.value - fitted_level;
                counts[bucket] += 1;
            }
            let means = sums
                .iter()
                .zip(&counts)
                .map(|(sum, &count)| if count > 0 { sum / count as f64 } else { 0.0 })
                .collect();
            Some(means)
        } else {
            None
        };

        let in_sample = observations
            .iter()
            .zip(&levels)
            .map(|(obs, &fitted_level)| {
                let yearly = seasonal
                    .as_ref()
                    .map(|s: &Vec<f64>| s[obs.date.ordinal0() as usize]);
                Prediction {
                    date: obs.date,
                    yhat: fitted_level + yearly.unwrap_or(0.0),
                    trend: fitted_level,
                    yearly,
                }
            })
            .collect();

        Ok(FittedHoltSeasonal {
            name: self.name.clone(),
            level,
            trend,
            last_date: max_date,
            in_sample,
            seasonal,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedEngine for FittedHoltSeasonal {
    fn predict(&self, horizon_days: usize) -> Result<Vec<Prediction>> {
        let mut predictions = self.in_sample.clone();
        predictions.reserve(horizon_days);

        for step in 1..=horizon_days as i64 {
            let date = self.last_date + Duration::days(step);
            let trend = self.level + step as f64 * self.trend;
            let yearly = self
                .seasonal
                .as_ref()
                .map(|s| s[date.ordinal0() as usize]);
            predictions.push(Prediction {
                date,
                yhat: trend + yearly.unwrap_or(0.0),
                trend,
                yearly,
            });
        }

        Ok(predictions)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
