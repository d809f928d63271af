use fx_forecast::engine::HoltSeasonal;
use fx_forecast::session::{CachedLoader, CalibrationInputs, Session};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "HistoricalPrices.csv".to_string());

    println!("USD/GBP Exchange Rate Forecast");
    println!("==============================\n");
    println!("Loading historical data from {}...", path);

    let session = Session::new(CachedLoader::new(&path), HoltSeasonal::default());
    let inputs = CalibrationInputs::default();

    let view = session.render(&inputs)?;

    println!(
        "Rendered {} historical and {} forecast points ({} year horizon)\n",
        view.chart.historical.len(),
        view.chart.forecast.len(),
        inputs.horizon_years
    );

    println!("{}\n", view.summary_text);

    if let Some(notice) = &view.seasonality_notice {
        println!("{}\n", notice);
    }

    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
