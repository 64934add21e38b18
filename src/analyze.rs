use rayon::prelude::*;

use crate::{
    config::AnalysisConfig,
    error::{Error, Result},
    math::{arithmetic_mean, round_to, sample_std, welch_t_test},
    record::AnnotatedRecord,
    results::{AnalysisResults, SignificanceResult},
};

/// Per-population significance analysis of responders vs non-responders
///
/// For each configured population the percentage values of the two groups
/// are compared with Welch's t-test. Populations are processed
/// independently; a failure on one (too few observations in either group)
/// is recorded and does not block the others. Result rows keep the
/// configured population order.
pub struct SignificanceAnalyzer<'a> {
    responders: &'a [AnnotatedRecord],
    non_responders: &'a [AnnotatedRecord],
    config: &'a AnalysisConfig,
}

impl<'a> SignificanceAnalyzer<'a> {
    pub fn new(
        responders: &'a [AnnotatedRecord],
        non_responders: &'a [AnnotatedRecord],
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            responders,
            non_responders,
            config,
        }
    }

    /// Run the analysis across all configured populations
    pub fn run(&self) -> AnalysisResults {
        let outcomes = self
            .config
            .populations
            .par_iter()
            .enumerate()
            .map(|(index, population)| self.process_population(index, population))
            .collect::<Vec<_>>();

        AnalysisResults::from_outcomes(outcomes)
    }

    /// Process a single population
    ///
    /// Group means and standard deviations are rounded to 2 decimals; the
    /// test itself runs on the raw value sequences and its statistic and
    /// p-value are rounded to 4 decimals. The significance flag compares the
    /// rounded p-value against the threshold, so a borderline raw p-value
    /// flips with its rounding.
    fn process_population(&self, index: usize, population: &str) -> Result<SignificanceResult> {
        let resp_values = percent_values(self.responders, index);
        let nonresp_values = percent_values(self.non_responders, index);

        check_sample_size(population, &self.config.responder_label, &resp_values)?;
        check_sample_size(population, &self.config.non_responder_label, &nonresp_values)?;

        let (t_stat, p_value) = welch_t_test(&resp_values, &nonresp_values);
        let p_value = round_to(p_value, 4);

        Ok(SignificanceResult {
            population: population.to_string(),
            responder_mean: round_to(arithmetic_mean(&resp_values), 2),
            responder_std: round_to(sample_std(&resp_values), 2),
            non_responder_mean: round_to(arithmetic_mean(&nonresp_values), 2),
            non_responder_std: round_to(sample_std(&nonresp_values), 2),
            t_statistic: round_to(t_stat, 4),
            p_value,
            significant: p_value < self.config.significance_threshold,
        })
    }
}

fn check_sample_size(population: &str, group: &str, values: &[f64]) -> Result<()> {
    if values.len() < 2 {
        return Err(Error::InsufficientSampleSize {
            population: population.to_string(),
            group: group.to_string(),
            observed: values.len(),
        });
    }
    Ok(())
}

fn percent_values(records: &[AnnotatedRecord], index: usize) -> Vec<f64> {
    records.iter().map(|r| r.percents[index]).collect()
}
