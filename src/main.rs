use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cytodiff::{io, AnalysisConfig, CohortFilter, PercentageDeriver, SignificanceAnalyzer};

#[derive(Debug, Parser)]
#[command(
    name = "cytodiff",
    version,
    about = "Responder vs non-responder differential abundance of immune cell populations"
)]
struct Cli {
    /// Input CSV of per-sample cell counts
    #[arg(long, default_value = "data/cell-count.csv")]
    input: PathBuf,

    /// Directory for the annotated and significance tables
    #[arg(long, default_value = "output")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AnalysisConfig::default();

    let records = io::read_records_from_path(&cli.input, &config.populations)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let annotated = PercentageDeriver::new(&config).annotate(&records)?;

    let processed_path = cli.out.join("processed_cell_counts.csv");
    io::write_annotated_to_path(&processed_path, &annotated, &config.populations)?;
    println!("Processed data saved to {}", processed_path.display());

    let cohort = CohortFilter::new(&config).filter(&annotated);
    let (responders, non_responders) = cytodiff::split_cohort(cohort, &config);
    let analysis = SignificanceAnalyzer::new(&responders, &non_responders, &config).run();

    print!(
        "\n{}",
        analysis.summary(&config.responder_label, &config.non_responder_label)
    );

    let results_path = cli.out.join("statistical_results.csv");
    io::write_significance_to_path(&results_path, &analysis.results)?;
    println!("Statistical results saved to {}", results_path.display());

    Ok(())
}
