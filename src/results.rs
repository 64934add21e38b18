use itertools::Itertools;
use serde::Serialize;

use crate::error::{Error, Result};

/// One significance row per cell population
#[derive(Debug, Clone, Serialize)]
pub struct SignificanceResult {
    pub population: String,
    pub responder_mean: f64,
    pub responder_std: f64,
    pub non_responder_mean: f64,
    pub non_responder_std: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// The aggregate outcome of a significance analysis
///
/// Successful rows keep the configured population order. Populations that
/// could not be tested are carried as failures alongside the successes so a
/// run report never drops them silently.
pub struct AnalysisResults {
    pub results: Vec<SignificanceResult>,
    pub failures: Vec<Error>,
}

impl AnalysisResults {
    pub fn from_outcomes(outcomes: Vec<Result<SignificanceResult>>) -> Self {
        let mut results = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(error) => failures.push(error),
            }
        }
        Self { results, failures }
    }

    /// Human-readable report, one block per population
    pub fn summary(&self, responder_label: &str, non_responder_label: &str) -> String {
        let mut report = String::from("Statistical Analysis Results:\n=============================\n");
        for row in &self.results {
            let sig_label = if row.significant {
                "Significant"
            } else {
                "Not significant"
            };
            report.push_str(&format!(
                "{}:\n  {}s: {:.2}% \u{b1} {:.2}%\n  {}s: {:.2}% \u{b1} {:.2}%\n  T-statistic: {:.4}, p-value: {:.4} ({})\n\n",
                display_name(&row.population),
                responder_label,
                row.responder_mean,
                row.responder_std,
                non_responder_label,
                row.non_responder_mean,
                row.non_responder_std,
                row.t_statistic,
                row.p_value,
                sig_label,
            ));
        }
        for failure in &self.failures {
            report.push_str(&format!("Skipped: {failure}\n"));
        }
        report
    }
}

/// Converts a population column name into its display form
/// (`cd8_t_cell` becomes `Cd8 T Cell`)
pub fn display_name(population: &str) -> String {
    population
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .join(" ")
}
