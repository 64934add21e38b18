use derive_new::new;

use crate::{config::AnalysisConfig, record::AnnotatedRecord};

/// Selects the analysis stratum from the annotated record set
///
/// A record belongs to the cohort when its treatment, sample type, and
/// condition equal the configured stratum and its response is one of the two
/// accepted values. Input order is preserved and no match is not an error;
/// an empty cohort flows through downstream components without crashing.
#[derive(Debug, Clone, Copy, new)]
pub struct CohortFilter<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> CohortFilter<'a> {
    pub fn filter(&self, records: &[AnnotatedRecord]) -> Vec<AnnotatedRecord> {
        records
            .iter()
            .filter(|r| {
                r.record.treatment == self.config.treatment
                    && r.record.sample_type == self.config.sample_type
                    && r.record.condition == self.config.condition
                    && self.config.accepts_response(&r.record.response)
            })
            .cloned()
            .collect()
    }
}

/// Partitions a filtered cohort into its responder and non-responder groups
///
/// Exhaustive and non-overlapping by construction: every cohort record
/// carries one of the two accepted response values. Order is preserved
/// within each group.
pub fn split_cohort(
    cohort: Vec<AnnotatedRecord>,
    config: &AnalysisConfig,
) -> (Vec<AnnotatedRecord>, Vec<AnnotatedRecord>) {
    cohort
        .into_iter()
        .partition(|r| r.response() == config.responder_value)
}
