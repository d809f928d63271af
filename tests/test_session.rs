use chrono::{Datelike, Duration, NaiveDate, Utc};
use fx_forecast::blend::YearSummary;
use fx_forecast::engine::{AutoEts, HoltSeasonal};
use fx_forecast::error::DashboardError;
use fx_forecast::session::{CachedLoader, CalibrationInputs, Session};
use std::io::Write;
use tempfile::NamedTempFile;

/// Write a CSV of daily closes starting 2020-01-01
fn write_history(days: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Close").unwrap();

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    for i in 0..days {
        let date = start + Duration::days(i as i64);
        let value = 1.25 + i as f64 * 0.0001;
        writeln!(file, "{},{:.4}", date, value).unwrap();
    }
    file
}

fn default_session(file: &NamedTempFile) -> Session<HoltSeasonal> {
    Session::new(CachedLoader::new(file.path()), HoltSeasonal::default())
}

#[test]
fn test_render_full_pipeline() {
    let file = write_history(800);
    let session = default_session(&file);
    let inputs = CalibrationInputs::default();

    let view = session.render(&inputs).unwrap();

    // Historical line carries every loaded row plus the anchor
    assert_eq!(view.chart.historical.len(), 801);
    assert_eq!(view.chart.historical.last().unwrap().value, 1.0);

    // Forecast rows all land after the anchor date (today)
    let today = Utc::now().date_naive();
    assert!(!view.chart.forecast.is_empty());
    assert!(view.chart.forecast.iter().all(|p| p.date > today));

    // Default horizon is five years of daily rows
    assert_eq!(view.chart.forecast.len(), 5 * 365);

    // Year band covers the selected year
    assert_eq!(view.chart.highlight.year, inputs.selected_year);
    assert_eq!(view.chart.highlight.start.month(), 1);
    assert_eq!(view.chart.highlight.end.month(), 12);

    // Year selector bounds span history through the forecast end
    assert_eq!(view.year_bounds.0, 2020);
    assert!(view.year_bounds.1 >= today.year() + 4);
}

#[test]
fn test_render_current_year_summary_uses_anchor() {
    let file = write_history(800);
    let session = default_session(&file);
    let inputs = CalibrationInputs {
        current_gbp: 1.42,
        ..CalibrationInputs::default()
    };

    let view = session.render(&inputs).unwrap();

    // History ends in 2022, so the only observed row this year is the
    // anchor; the historical branch reports its value
    match view.summary {
        YearSummary::Historical { actual, .. } => {
            assert_approx_eq::assert_approx_eq!(actual, 1.42)
        }
        other => panic!("expected historical summary, got {:?}", other),
    }
    assert!(view.summary_text.contains("Historical Data for"));
}

#[test]
fn test_render_future_year_summary() {
    let file = write_history(800);
    let session = default_session(&file);
    let inputs = CalibrationInputs {
        selected_year: Utc::now().date_naive().year() + 2,
        ..CalibrationInputs::default()
    };

    let view = session.render(&inputs).unwrap();

    assert!(matches!(view.summary, YearSummary::Forecast { .. }));
    assert!(view.summary_text.contains("Forecasted Data for"));
}

#[test]
fn test_render_no_data_year() {
    let file = write_history(800);
    let session = default_session(&file);
    let inputs = CalibrationInputs {
        selected_year: 1900,
        ..CalibrationInputs::default()
    };

    let view = session.render(&inputs).unwrap();

    assert_eq!(view.summary, YearSummary::NoData { year: 1900 });
    assert_eq!(view.summary_text, "No data available for the year 1900.");
}

#[test]
fn test_render_is_idempotent_for_unchanged_inputs() {
    let file = write_history(800);
    let session = default_session(&file);
    let inputs = CalibrationInputs::default();

    let first = session.render(&inputs).unwrap();
    let second = session.render(&inputs).unwrap();

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.summary_text, second.summary_text);
    assert_eq!(first.chart.forecast.len(), second.chart.forecast.len());
}

#[test]
fn test_seasonality_chart_present_for_long_history() {
    // 800 days spans more than two years, so the default engine fits a
    // yearly component and the seasonality chart is populated
    let file = write_history(800);
    let session = default_session(&file);

    let view = session.render(&CalibrationInputs::default()).unwrap();

    assert!(view.components.yearly.is_some());
    assert!(view.seasonality_notice.is_none());
    assert!(!view.components.trend.is_empty());
}

#[test]
fn test_seasonality_notice_for_engine_without_seasonality() {
    let file = write_history(90);
    let session = Session::new(CachedLoader::new(file.path()), AutoEts::new());

    let view = session.render(&CalibrationInputs::default()).unwrap();

    assert!(view.components.yearly.is_none());
    assert_eq!(
        view.seasonality_notice.as_deref(),
        Some("Yearly seasonality data not available.")
    );
}

#[test]
fn test_input_validation() {
    let valid = CalibrationInputs::default();
    assert!(valid.validate().is_ok());

    let bad_usd = CalibrationInputs {
        current_usd: 0.0,
        ..valid
    };
    assert!(matches!(
        bad_usd.validate(),
        Err(DashboardError::Validation(_))
    ));

    let bad_gbp = CalibrationInputs {
        current_gbp: -1.3,
        ..valid
    };
    assert!(matches!(
        bad_gbp.validate(),
        Err(DashboardError::Validation(_))
    ));

    let horizon_too_short = CalibrationInputs {
        horizon_years: 0,
        ..valid
    };
    assert!(matches!(
        horizon_too_short.validate(),
        Err(DashboardError::Validation(_))
    ));

    let horizon_too_long = CalibrationInputs {
        horizon_years: 11,
        ..valid
    };
    assert!(matches!(
        horizon_too_long.validate(),
        Err(DashboardError::Validation(_))
    ));
}

#[test]
fn test_render_rejects_invalid_inputs() {
    let file = write_history(30);
    let session = default_session(&file);
    let inputs = CalibrationInputs {
        horizon_years: 11,
        ..CalibrationInputs::default()
    };

    let result = session.render(&inputs);

    assert!(matches!(result, Err(DashboardError::Validation(_))));
}

#[test]
fn test_cached_loader_reuses_first_load() {
    let file = write_history(30);
    let loader = CachedLoader::new(file.path());

    let first = loader.load().unwrap().to_vec();

    // Overwrite the file; the cached observations must not change
    std::fs::write(file.path(), "Date,Close\n2021-01-01,9.99\n").unwrap();
    let second = loader.load().unwrap();

    assert_eq!(second.len(), 30);
    assert_eq!(first, second.to_vec());
}

#[test]
fn test_cached_loader_missing_file() {
    let loader = CachedLoader::new("nonexistent_file.csv");

    assert!(matches!(loader.load(), Err(DashboardError::DataLoad(_))));
}
