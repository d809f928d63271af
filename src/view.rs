//! Chart and summary view models consumed by the rendering surface
//!
//! The core produces these; the page widgets just render them.

use crate::blend::{BlendedSeries, YearSummary};
use crate::data::Observation;
use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Notice text shown when the engine supplied no yearly component
const SEASONALITY_NOTICE: &str = "Yearly seasonality data not available.";

/// A single point on a line chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Point date
    pub date: NaiveDate,
    /// Point value
    pub value: f64,
}

/// Highlighted band covering the selected calendar year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearBand {
    /// Selected year
    pub year: i32,
    /// January 1 of the selected year
    pub start: NaiveDate,
    /// December 31 of the selected year
    pub end: NaiveDate,
}

impl YearBand {
    /// Build the band for a calendar year
    pub fn for_year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self { year, start, end }),
            _ => Err(DashboardError::Validation(format!(
                "selected year {} is out of range",
                year
            ))),
        }
    }
}

/// The main rate chart: historical and forecast lines plus the year band
#[derive(Debug, Clone, Serialize)]
pub struct RateChart {
    /// Merged historical series, anchor included
    pub historical: Vec<ChartPoint>,
    /// Future forecast rows, scaled
    pub forecast: Vec<ChartPoint>,
    /// Band highlighting the selected year
    pub highlight: YearBand,
}

/// Trend and yearly-seasonality component charts
#[derive(Debug, Clone, Serialize)]
pub struct ComponentCharts {
    /// Trend component over every predicted date
    pub trend: Vec<ChartPoint>,
    /// Yearly-seasonality component, omitted when the engine supplied none
    pub yearly: Option<Vec<ChartPoint>>,
}

/// Everything one render pass hands to the page
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// The main rate chart
    pub chart: RateChart,
    /// Trend and seasonality component charts
    pub components: ComponentCharts,
    /// Calendar-year bounds for the page's year selector
    pub year_bounds: (i32, i32),
    /// The selected-year summary
    pub summary: YearSummary,
    /// The summary rendered as display text
    pub summary_text: String,
    /// Notice shown in place of the seasonality chart when it is omitted
    pub seasonality_notice: Option<String>,
}

impl DashboardView {
    /// Assemble the view from one render pass's outputs
    pub fn assemble(
        merged: &[Observation],
        blended: &BlendedSeries,
        selected_year: i32,
        summary: YearSummary,
    ) -> Result<Self> {
        let historical = merged
            .iter()
            .map(|obs| ChartPoint {
                date: obs.date,
                value: obs.value,
            })
            .collect();

        let forecast = blended
            .rows()
            .iter()
            .filter_map(|row| {
                row.adjusted.map(|value| ChartPoint {
                    date: row.date,
                    value,
                })
            })
            .collect();

        let trend = blended
            .scaled_predictions()
            .iter()
            .map(|p| ChartPoint {
                date: p.date,
                value: p.trend,
            })
            .collect();

        // Engines supply the yearly component for all rows or none
        let yearly: Option<Vec<ChartPoint>> = blended
            .scaled_predictions()
            .iter()
            .map(|p| {
                p.yearly.map(|value| ChartPoint {
                    date: p.date,
                    value,
                })
            })
            .collect();
        let yearly = yearly.filter(|points| !points.is_empty());

        let seasonality_notice = if yearly.is_none() {
            Some(SEASONALITY_NOTICE.to_string())
        } else {
            None
        };

        Ok(Self {
            chart: RateChart {
                historical,
                forecast,
                highlight: YearBand::for_year(selected_year)?,
            },
            components: ComponentCharts { trend, yearly },
            year_bounds: blended
                .year_bounds()
                .unwrap_or((selected_year, selected_year)),
            summary,
            summary_text: summary.to_string(),
            seasonality_notice,
        })
    }
}
