//! Historical exchange-rate data handling

use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::fs::File;
use std::path::Path;

/// A single historical (date, closing-rate) data point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Trading day
    pub date: NaiveDate,
    /// Closing exchange rate
    pub value: f64,
}

/// Historical rate series with detected date and close columns
#[derive(Debug, Clone)]
pub struct RateSeries {
    /// Name of the date column in the source file
    date_column: String,
    /// Name of the closing-rate column in the source file
    close_column: String,
    /// Extracted observations, in file order
    observations: Vec<Observation>,
}

/// Data loader for the historical rate file
#[derive(Debug)]
pub struct DataLoader;

/// Date formats accepted in the `Date` column
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

impl DataLoader {
    /// Load a historical rate series from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<RateSeries> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            DashboardError::DataLoad(format!("cannot open {}: {}", path.display(), e))
        })?;

        // Use polars DataFrame reader directly
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::detect_and_build(df)
    }

    /// Create a rate series from an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<RateSeries> {
        Self::detect_and_build(df)
    }

    /// Detect date and close columns in a DataFrame and build a RateSeries
    fn detect_and_build(df: DataFrame) -> Result<RateSeries> {
        let date_column = Self::detect_date_column(&df)?;
        let close_column = Self::detect_close_column(&df)?;

        let dates = Self::extract_dates(df.column(&date_column)?)?;
        let values = Self::extract_values(df.column(&close_column)?)?;

        let observations = dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| Observation { date, value })
            .collect();

        Ok(RateSeries {
            date_column,
            close_column,
            observations,
        })
    }

    /// Detect the date column in a DataFrame
    fn detect_date_column(df: &DataFrame) -> Result<String> {
        let column_names = df.get_column_names();

        // Look for common date column names
        for name in &column_names {
            let lower_name = name.to_lowercase();
            if lower_name.contains("date")
                || lower_name.contains("time")
                || lower_name.contains("timestamp")
            {
                return Ok(name.to_string());
            }
        }

        // If not found, use the first column if it is temporal
        if let Some(first_col) = df.get_columns().first() {
            if first_col.dtype().is_temporal() {
                return Ok(first_col.name().to_string());
            }
        }

        Err(DashboardError::DataLoad(
            "no date column found in data".to_string(),
        ))
    }

    /// Detect the closing-rate column in a DataFrame
    fn detect_close_column(df: &DataFrame) -> Result<String> {
        let column_names = df.get_column_names();

        for name in &column_names {
            if name.to_lowercase().contains("close") {
                return Ok(name.to_string());
            }
        }

        // Fall back to a generic rate or price column
        for name in &column_names {
            let lower_name = name.to_lowercase();
            if lower_name.contains("rate") || lower_name.contains("price") {
                return Ok(name.to_string());
            }
        }

        Err(DashboardError::DataLoad(
            "no close column found in data".to_string(),
        ))
    }

    /// Extract the date column as calendar dates
    fn extract_dates(col: &Series) -> Result<Vec<NaiveDate>> {
        match col.dtype() {
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .enumerate()
                .map(|(row, opt)| {
                    let raw = opt.ok_or_else(|| {
                        DashboardError::DataLoad(format!("missing date at row {}", row))
                    })?;
                    Self::parse_date(raw)
                })
                .collect(),
            DataType::Date => col
                .date()?
                .into_iter()
                .enumerate()
                .map(|(row, opt)| {
                    let days = opt.ok_or_else(|| {
                        DashboardError::DataLoad(format!("missing date at row {}", row))
                    })?;
                    NaiveDate::from_ymd_opt(1970, 1, 1)
                        .and_then(|epoch| epoch.checked_add_days(chrono::Days::new(days as u64)))
                        .ok_or_else(|| {
                            DashboardError::DataLoad(format!("date out of range at row {}", row))
                        })
                })
                .collect(),
            DataType::Datetime(unit, _) => {
                let divisor = match unit {
                    TimeUnit::Milliseconds => 1_000,
                    TimeUnit::Microseconds => 1_000_000,
                    TimeUnit::Nanoseconds => 1_000_000_000,
                };
                col.datetime()?
                    .into_iter()
                    .enumerate()
                    .map(|(row, opt)| {
                        let ts = opt.ok_or_else(|| {
                            DashboardError::DataLoad(format!("missing date at row {}", row))
                        })?;
                        chrono::DateTime::from_timestamp(ts / divisor, 0)
                            .map(|dt| dt.date_naive())
                            .ok_or_else(|| {
                                DashboardError::DataLoad(format!(
                                    "timestamp out of range at row {}",
                                    row
                                ))
                            })
                    })
                    .collect()
            }
            other => Err(DashboardError::DataLoad(format!(
                "date column has unsupported type {:?}",
                other
            ))),
        }
    }

    /// Parse a date string, trying the accepted formats in order
    fn parse_date(raw: &str) -> Result<NaiveDate> {
        let trimmed = raw.trim();
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(date);
            }
        }
        Err(DashboardError::DataLoad(format!(
            "unparseable date '{}'",
            raw
        )))
    }

    /// Extract the close column as f64 values
    fn extract_values(col: &Series) -> Result<Vec<f64>> {
        let float_col = match col.dtype() {
            DataType::Float64 => col.clone(),
            DataType::Float32 | DataType::Int64 | DataType::Int32 => col.cast(&DataType::Float64)?,
            other => {
                return Err(DashboardError::DataLoad(format!(
                    "close column has unsupported type {:?}",
                    other
                )))
            }
        };

        float_col
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, opt)| {
                opt.ok_or_else(|| {
                    DashboardError::DataLoad(format!("missing close value at row {}", row))
                })
            })
            .collect()
    }
}

impl RateSeries {
    /// Get the observations in file order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Consume the series, returning the observations
    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Get the detected date column name
    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    /// Get the detected close column name
    pub fn close_column(&self) -> &str {
        &self.close_column
    }

    /// Get the number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Get the observation dates
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Get the closing rates
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Calculate the mean closing rate
    pub fn mean(&self) -> Result<f64> {
        if self.observations.is_empty() {
            return Err(DashboardError::DataLoad(
                "no observations available".to_string(),
            ));
        }

        Ok(self.observations.iter().map(|o| o.value).mean())
    }
}
