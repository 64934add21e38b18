//! CytoDiff: Differential Abundance of Immune Cell Populations
//!
//! This library compares responder and non-responder cohorts within a fixed
//! treatment/sample-type/condition stratum. Per-sample cell counts are
//! converted to relative-abundance percentages, the analysis stratum is
//! selected, and each cell population is tested for a difference between the
//! two response groups with Welch's t-test.
//!
//! The main components of this library are:
//! - `PercentageDeriver`: Annotates records with totals and percentages
//! - `CohortFilter` / `split_cohort`: Stratum selection and response grouping
//! - `SignificanceAnalyzer`: Per-population Welch's t-test computation
//! - `AnalysisResults`: Structure to hold and display the results

mod analyze;
mod cohort;
mod config;
mod error;
pub mod io;
mod math;
mod percent;
mod record;
mod results;

pub use analyze::SignificanceAnalyzer;
pub use cohort::{split_cohort, CohortFilter};
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use percent::PercentageDeriver;
pub use record::{AnnotatedRecord, CellRecord};
pub use results::{AnalysisResults, SignificanceResult};
