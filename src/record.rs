use derive_new::new;

/// A raw per-sample row of cell counts
///
/// `counts` is parallel to the configured population list. `total_count` is
/// `Some` when the input table already carried a total; a preset total is
/// authoritative and never recomputed.
#[derive(Debug, Clone, new)]
pub struct CellRecord {
    pub sample: String,
    pub treatment: String,
    pub sample_type: String,
    pub condition: String,
    pub response: String,
    pub counts: Vec<u64>,
    pub total_count: Option<u64>,
}

/// A record annotated with its total count and per-population percentages
///
/// Produced by `PercentageDeriver` as a fresh copy; the underlying raw
/// record is never mutated, so the full-dataset export and the filtered
/// cohort never alias each other.
#[derive(Debug, Clone, new)]
pub struct AnnotatedRecord {
    pub record: CellRecord,
    pub total_count: u64,
    /// Percentages parallel to the configured population list, rounded to 2
    /// decimal places
    pub percents: Vec<f64>,
}

impl AnnotatedRecord {
    pub fn sample(&self) -> &str {
        &self.record.sample
    }

    pub fn response(&self) -> &str {
        &self.record.response
    }
}
