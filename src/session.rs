//! Calibration inputs and the per-session dashboard controller

use crate::blend::{blend, horizon_days, year_summary};
use crate::data::{DataLoader, Observation};
use crate::engine::{FittedEngine, ForecastEngine};
use crate::error::{DashboardError, Result};
use crate::normalize::{merge_anchor, Anchor};
use crate::view::DashboardView;
use chrono::{Datelike, Utc};
use log::{debug, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

/// Forecast horizon bounds, in years
const HORIZON_YEARS_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// Per-session user inputs; recreated on every input change, never persisted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationInputs {
    /// Current base-currency (USD) value; scales every forecast value
    pub current_usd: f64,
    /// Current quote-currency (GBP) closing rate; becomes the anchor value
    pub current_gbp: f64,
    /// Forecast horizon in years
    pub horizon_years: u32,
    /// Calendar year to summarize
    pub selected_year: i32,
}

impl Default for CalibrationInputs {
    fn default() -> Self {
        Self {
            current_usd: 1.0,
            current_gbp: 1.0,
            horizon_years: 5,
            selected_year: Utc::now().date_naive().year(),
        }
    }
}

impl CalibrationInputs {
    /// Validate the inputs.
    ///
    /// The year selector is not bounded here; an out-of-range year flows
    /// through to the no-data summary instead of failing the render.
    pub fn validate(&self) -> Result<()> {
        if !self.current_usd.is_finite() || self.current_usd <= 0.0 {
            return Err(DashboardError::Validation(format!(
                "current USD value must be a positive number, got {}",
                self.current_usd
            )));
        }
        if !self.current_gbp.is_finite() || self.current_gbp <= 0.0 {
            return Err(DashboardError::Validation(format!(
                "current GBP rate must be a positive number, got {}",
                self.current_gbp
            )));
        }
        if !HORIZON_YEARS_RANGE.contains(&self.horizon_years) {
            return Err(DashboardError::Validation(format!(
                "forecast horizon must be between {} and {} years, got {}",
                HORIZON_YEARS_RANGE.start(),
                HORIZON_YEARS_RANGE.end(),
                self.horizon_years
            )));
        }
        Ok(())
    }
}

/// Load-once historical data access.
///
/// Explicitly constructed and injected into the session controller: the
/// first load populates the cache, every later call reuses it.
#[derive(Debug)]
pub struct CachedLoader {
    /// Path to the historical CSV file
    path: PathBuf,
    /// Observations, populated by the first successful load
    cache: OnceCell<Vec<Observation>>,
}

impl CachedLoader {
    /// Create a loader for the given CSV path; nothing is read yet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: OnceCell::new(),
        }
    }

    /// Load the historical observations, reusing the cached result
    pub fn load(&self) -> Result<&[Observation]> {
        let observations = self.cache.get_or_try_init(|| {
            info!("loading historical data from {}", self.path.display());
            DataLoader::from_csv(&self.path).map(|series| series.into_observations())
        })?;
        Ok(observations.as_slice())
    }
}

/// The top-level session controller.
///
/// Owns the injected loader and the forecasting engine; each input change
/// triggers one full synchronous recomputation, with no state carried
/// between renders beyond the cached load.
#[derive(Debug)]
pub struct Session<E: ForecastEngine> {
    loader: CachedLoader,
    engine: E,
}

impl<E: ForecastEngine> Session<E> {
    /// Create a session over the given loader and engine
    pub fn new(loader: CachedLoader, engine: E) -> Self {
        Self { loader, engine }
    }

    /// Run one full render pass: load, normalize, fit, predict, blend,
    /// summarize, and assemble the view. Any stage error aborts the pass.
    pub fn render(&self, inputs: &CalibrationInputs) -> Result<DashboardView> {
        inputs.validate()?;

        let history = self.loader.load()?;
        let anchor = Anchor::today(inputs.current_gbp);
        let merged = merge_anchor(history, &anchor)?;
        debug!(
            "merged series: {} rows, anchor {} = {}",
            merged.len(),
            anchor.date,
            anchor.value
        );

        let fitted = self.engine.fit(&merged)?;
        let predictions = fitted.predict(horizon_days(inputs.horizon_years))?;
        debug!(
            "{} produced {} predictions",
            self.engine.name(),
            predictions.len()
        );

        let blended = blend(&merged, &predictions, inputs.current_usd)?;
        let current_year = Utc::now().date_naive().year();
        let summary = year_summary(
            &blended,
            inputs.selected_year,
            inputs.current_usd,
            current_year,
        );

        DashboardView::assemble(&merged, &blended, inputs.selected_year, summary)
    }
}
