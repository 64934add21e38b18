//! Flat tabular input and output
//!
//! Readers and writers are generic over `Read`/`Write` with path
//! convenience wrappers. Missing required columns are a load-time failure;
//! the core pipeline only ever sees fully-populated records.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    record::{AnnotatedRecord, CellRecord},
    results::SignificanceResult,
};

const REQUIRED_COLUMNS: [&str; 5] = ["sample", "treatment", "sample_type", "condition", "response"];
const TOTAL_COLUMN: &str = "total_count";

/// Reads one `CellRecord` per row, validating the header against the
/// required columns and the configured population columns
pub fn read_records<R: Read>(reader: R, populations: &[String]) -> Result<Vec<CellRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let position = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };

    let [sample_idx, treatment_idx, sample_type_idx, condition_idx, response_idx] = [
        position(REQUIRED_COLUMNS[0])?,
        position(REQUIRED_COLUMNS[1])?,
        position(REQUIRED_COLUMNS[2])?,
        position(REQUIRED_COLUMNS[3])?,
        position(REQUIRED_COLUMNS[4])?,
    ];
    let population_idx = populations
        .iter()
        .map(|p| position(p))
        .collect::<Result<Vec<_>>>()?;
    let total_idx = headers.iter().position(|h| h == TOTAL_COLUMN);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let field = |idx: usize| row.get(idx).unwrap_or("").to_string();
        let sample = field(sample_idx);

        let parse_count = |idx: usize, column: &str| -> Result<u64> {
            row.get(idx)
                .unwrap_or("")
                .trim()
                .parse::<u64>()
                .map_err(|_| Error::InvalidCount {
                    sample: sample.clone(),
                    column: column.to_string(),
                    value: row.get(idx).unwrap_or("").to_string(),
                })
        };

        let counts = population_idx
            .iter()
            .zip(populations.iter())
            .map(|(&idx, population)| parse_count(idx, population))
            .collect::<Result<Vec<_>>>()?;
        let total_count = match total_idx {
            Some(idx) => Some(parse_count(idx, TOTAL_COLUMN)?),
            None => None,
        };

        records.push(CellRecord::new(
            sample,
            field(treatment_idx),
            field(sample_type_idx),
            field(condition_idx),
            field(response_idx),
            counts,
            total_count,
        ));
    }
    Ok(records)
}

pub fn read_records_from_path<P: AsRef<Path>>(
    path: P,
    populations: &[String],
) -> Result<Vec<CellRecord>> {
    let file = File::open(path)?;
    read_records(file, populations)
}

/// Writes the full annotated table: sample, total count, the raw counts,
/// then the percentage columns, in that fixed order
pub fn write_annotated<W: Write>(
    writer: W,
    records: &[AnnotatedRecord],
    populations: &[String],
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["sample".to_string(), TOTAL_COLUMN.to_string()];
    header.extend(populations.iter().cloned());
    header.extend(populations.iter().map(|p| format!("{p}_percent")));
    csv_writer.write_record(&header)?;

    for record in records {
        let mut row = vec![record.sample().to_string(), record.total_count.to_string()];
        row.extend(record.record.counts.iter().map(|c| c.to_string()));
        row.extend(record.percents.iter().map(|p| p.to_string()));
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_annotated_to_path<P: AsRef<Path>>(
    path: P,
    records: &[AnnotatedRecord],
    populations: &[String],
) -> Result<()> {
    let file = create_with_parents(path.as_ref())?;
    write_annotated(file, records, populations)
}

/// Writes the significance table, one row per testable population
pub fn write_significance<W: Write>(writer: W, results: &[SignificanceResult]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(result)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_significance_to_path<P: AsRef<Path>>(
    path: P,
    results: &[SignificanceResult],
) -> Result<()> {
    let file = create_with_parents(path.as_ref())?;
    write_significance(file, results)
}

fn create_with_parents(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cohort::{split_cohort, CohortFilter},
        config::AnalysisConfig,
        percent::PercentageDeriver,
        SignificanceAnalyzer,
    };
    use approx::assert_relative_eq;

    const INPUT: &str = "\
sample,treatment,sample_type,condition,response,b_cell,cd8_t_cell,cd4_t_cell,nk_cell,monocyte
s1,tr1,PBMC,melanoma,y,100,220,300,180,200
s2,tr1,PBMC,melanoma,y,120,210,310,170,190
s3,tr1,PBMC,melanoma,y,110,230,290,160,210
s4,tr1,PBMC,melanoma,n,200,150,250,200,200
s5,tr1,PBMC,melanoma,n,220,140,260,190,190
s6,tr1,PBMC,melanoma,n,210,160,240,210,180
s7,tr2,PBMC,melanoma,y,150,150,150,150,150
s8,tr1,tumor,melanoma,n,150,150,150,150,150
";

    #[test]
    fn test_read_records() {
        let config = AnalysisConfig::default();
        let records = read_records(INPUT.as_bytes(), &config.populations).unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].sample, "s1");
        assert_eq!(records[0].counts, vec![100, 220, 300, 180, 200]);
        assert!(records[0].total_count.is_none());
    }

    #[test]
    fn test_read_honors_total_count_column() {
        let input = "\
sample,treatment,sample_type,condition,response,total_count,b_cell,cd8_t_cell,cd4_t_cell,nk_cell,monocyte
s1,tr1,PBMC,melanoma,y,2000,100,220,300,180,200
";
        let config = AnalysisConfig::default();
        let records = read_records(input.as_bytes(), &config.populations).unwrap();
        assert_eq!(records[0].total_count, Some(2000));
    }

    #[test]
    fn test_missing_population_column_fails() {
        let input = "\
sample,treatment,sample_type,condition,response,b_cell
s1,tr1,PBMC,melanoma,y,100
";
        let config = AnalysisConfig::default();
        let err = read_records(input.as_bytes(), &config.populations).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(c) if c == "cd8_t_cell"));
    }

    #[test]
    fn test_invalid_count_fails() {
        let input = "\
sample,treatment,sample_type,condition,response,b_cell,cd8_t_cell,cd4_t_cell,nk_cell,monocyte
s1,tr1,PBMC,melanoma,y,abc,220,300,180,200
";
        let config = AnalysisConfig::default();
        let err = read_records(input.as_bytes(), &config.populations).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCount { column, .. } if column == "b_cell"
        ));
    }

    #[test]
    fn test_write_annotated_column_order() {
        let config = AnalysisConfig::default();
        let records = read_records(INPUT.as_bytes(), &config.populations).unwrap();
        let annotated = PercentageDeriver::new(&config).annotate(&records).unwrap();

        let mut buffer = Vec::new();
        write_annotated(&mut buffer, &annotated, &config.populations).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        let mut lines = written.lines();

        assert_eq!(
            lines.next().unwrap(),
            "sample,total_count,b_cell,cd8_t_cell,cd4_t_cell,nk_cell,monocyte,\
             b_cell_percent,cd8_t_cell_percent,cd4_t_cell_percent,nk_cell_percent,monocyte_percent"
        );
        assert_eq!(
            lines.next().unwrap(),
            "s1,1000,100,220,300,180,200,10,22,30,18,20"
        );
    }

    #[test]
    fn test_write_significance_header() {
        let result = SignificanceResult {
            population: "b_cell".to_string(),
            responder_mean: 11.0,
            responder_std: 1.0,
            non_responder_mean: 21.0,
            non_responder_std: 1.0,
            t_statistic: -12.2474,
            p_value: 0.0003,
            significant: true,
        };

        let mut buffer = Vec::new();
        write_significance(&mut buffer, &[result]).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        let mut lines = written.lines();

        assert_eq!(
            lines.next().unwrap(),
            "population,responder_mean,responder_std,non_responder_mean,\
             non_responder_std,t_statistic,p_value,significant"
        );
        assert_eq!(
            lines.next().unwrap(),
            "b_cell,11.0,1.0,21.0,1.0,-12.2474,0.0003,true"
        );
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let config = AnalysisConfig::default();
        let records = read_records(INPUT.as_bytes(), &config.populations).unwrap();
        let annotated = PercentageDeriver::new(&config).annotate(&records).unwrap();
        assert_eq!(annotated.len(), 8);

        let cohort = CohortFilter::new(&config).filter(&annotated);
        assert_eq!(cohort.len(), 6);

        let (responders, non_responders) = split_cohort(cohort, &config);
        assert_eq!(responders.len(), 3);
        assert_eq!(non_responders.len(), 3);

        let analysis = SignificanceAnalyzer::new(&responders, &non_responders, &config).run();
        assert!(analysis.failures.is_empty());
        assert_eq!(analysis.results.len(), 5);
        assert_eq!(analysis.results[0].population, "b_cell");

        // b_cell abundance is clearly higher among non-responders
        let b_cell = &analysis.results[0];
        assert!(b_cell.responder_mean < b_cell.non_responder_mean);
        assert!(b_cell.significant);
    }

    #[test]
    fn test_unmatched_stratum_is_empty_not_failing() {
        let config = AnalysisConfig::builder()
            .condition(String::from("healthy"))
            .build();
        let records = read_records(INPUT.as_bytes(), &config.populations).unwrap();
        let annotated = PercentageDeriver::new(&config).annotate(&records).unwrap();

        let cohort = CohortFilter::new(&config).filter(&annotated);
        assert!(cohort.is_empty());

        let (responders, non_responders) = split_cohort(cohort, &config);
        let analysis = SignificanceAnalyzer::new(&responders, &non_responders, &config).run();
        assert!(analysis.results.is_empty());
        assert_eq!(analysis.failures.len(), 5);

        // the full-dataset export is unaffected by the empty cohort
        let mut buffer = Vec::new();
        write_annotated(&mut buffer, &annotated, &config.populations).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 9);
    }
}
