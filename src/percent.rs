use derive_new::new;

use crate::{
    config::AnalysisConfig,
    error::{Error, Result},
    math::round_to,
    record::{AnnotatedRecord, CellRecord},
};

/// Annotates raw records with total counts and relative abundances
///
/// The total count is computed only when absent on the input record; a
/// preset total is treated as authoritative. Each percentage is
/// `100 * count / total_count` rounded to 2 decimal places. The input
/// collection is left untouched and a fresh annotated copy is returned.
#[derive(Debug, Clone, Copy, new)]
pub struct PercentageDeriver<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> PercentageDeriver<'a> {
    pub fn annotate(&self, records: &[CellRecord]) -> Result<Vec<AnnotatedRecord>> {
        records.iter().map(|r| self.annotate_record(r)).collect()
    }

    /// A record whose counts sum to zero cannot be expressed as percentages
    /// and fails with `DegenerateRecord` rather than emitting NaN.
    fn annotate_record(&self, record: &CellRecord) -> Result<AnnotatedRecord> {
        if record.counts.len() < self.config.populations.len() {
            let absent = &self.config.populations[record.counts.len()];
            return Err(Error::MissingColumn(absent.clone()));
        }

        let total_count = record
            .total_count
            .unwrap_or_else(|| record.counts.iter().sum());
        if total_count == 0 {
            return Err(Error::DegenerateRecord(record.sample.clone()));
        }

        let percents = record
            .counts
            .iter()
            .take(self.config.populations.len())
            .map(|&count| round_to(100.0 * count as f64 / total_count as f64, 2))
            .collect();

        Ok(AnnotatedRecord::new(record.clone(), total_count, percents))
    }
}
