//! # fx_forecast
//!
//! The logic core of an exchange-rate forecast dashboard.
//!
//! ## Features
//!
//! - Historical rate loading from CSV with a load-once cached accessor
//! - Series normalization: splicing a user-supplied "today" anchor into
//!   the historical series before model fitting
//! - A forecasting-engine seam with two engines (Holt trend smoothing
//!   with yearly seasonality, and automatic ETS via `augurs`)
//! - Forecast blending: scaled predictions spliced with history into one
//!   continuous timeline, plus per-year summary statistics
//! - Serializable chart view models for the rendering surface
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use fx_forecast::engine::HoltSeasonal;
//! use fx_forecast::session::{CachedLoader, CalibrationInputs, Session};
//!
//! fn main() -> fx_forecast::Result<()> {
//!     // The loader reads the file once; later renders reuse the cache
//!     let loader = CachedLoader::new("HistoricalPrices.csv");
//!     let session = Session::new(loader, HoltSeasonal::default());
//!
//!     // Recomputed from scratch on every input change
//!     let inputs = CalibrationInputs {
//!         current_usd: 1.0,
//!         current_gbp: 1.27,
//!         horizon_years: 5,
//!         ..CalibrationInputs::default()
//!     };
//!
//!     let view = session.render(&inputs)?;
//!     println!("{}", view.summary_text);
//!     Ok(())
//! }
//! ```

pub mod blend;
pub mod data;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use crate::blend::{blend, horizon_days, year_summary, BlendedRow, BlendedSeries, YearSummary};
pub use crate::data::{DataLoader, Observation, RateSeries};
pub use crate::engine::{AutoEts, FittedEngine, ForecastEngine, HoltSeasonal, Prediction};
pub use crate::error::{DashboardError, Result};
pub use crate::normalize::{merge_anchor, Anchor};
pub use crate::session::{CachedLoader, CalibrationInputs, Session};
pub use crate::view::{ChartPoint, DashboardView, RateChart, YearBand};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
