use chrono::NaiveDate;
use fx_forecast::data::Observation;
use fx_forecast::error::DashboardError;
use fx_forecast::normalize::{merge_anchor, Anchor};
use pretty_assertions::assert_eq;

fn obs(date: &str, value: f64) -> Observation {
    Observation {
        date: date.parse().unwrap(),
        value,
    }
}

#[test]
fn test_merge_appends_anchor_at_today() {
    // History [(2020-01-01, 1.30), (2021-01-01, 1.35)], anchor (today, 1.40):
    // merged length 3, last value 1.40
    let history = vec![obs("2020-01-01", 1.30), obs("2021-01-01", 1.35)];
    let anchor = Anchor::today(1.40);

    let merged = merge_anchor(&history, &anchor).unwrap();

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0], history[0]);
    assert_eq!(merged[1], history[1]);
    assert_eq!(merged[2].value, 1.40);
    assert_eq!(merged[2].date, anchor.date);
}

#[test]
fn test_merge_preserves_history_order() {
    let history: Vec<Observation> = (1..=20)
        .map(|day| Observation {
            date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
            value: 1.0 + day as f64 / 100.0,
        })
        .collect();
    let anchor = Anchor::today(1.50);

    let merged = merge_anchor(&history, &anchor).unwrap();

    assert_eq!(merged.len(), history.len() + 1);
    assert_eq!(&merged[..history.len()], &history[..]);
    assert_eq!(merged.last().unwrap().value, 1.50);
}

#[test]
fn test_merge_does_not_resort_out_of_order_anchor() {
    // An anchor dated before the end of history still lands at the end;
    // the merged sequence is passed to the engine unmodified
    let history = vec![obs("2022-06-01", 1.20), obs("2023-06-01", 1.25)];
    let anchor = Anchor::new("2022-12-31".parse().unwrap(), 1.22);

    let merged = merge_anchor(&history, &anchor).unwrap();

    assert_eq!(merged[2].date.to_string(), "2022-12-31");
    assert!(merged[1].date > merged[2].date);
}

#[test]
fn test_merge_rejects_non_positive_anchor() {
    let history = vec![obs("2023-01-01", 1.30)];

    let zero = merge_anchor(&history, &Anchor::today(0.0));
    assert!(matches!(zero, Err(DashboardError::Validation(_))));

    let negative = merge_anchor(&history, &Anchor::today(-1.2));
    assert!(matches!(negative, Err(DashboardError::Validation(_))));

    let not_finite = merge_anchor(&history, &Anchor::today(f64::NAN));
    assert!(matches!(not_finite, Err(DashboardError::Validation(_))));
}

#[test]
fn test_merge_rejects_empty_history() {
    let result = merge_anchor(&[], &Anchor::today(1.40));

    assert!(matches!(result, Err(DashboardError::DataLoad(_))));
}
