use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A column declared in the configuration is absent from the input.
    #[error("required column `{0}` is missing from the input")]
    MissingColumn(String),

    /// A record whose population counts sum to zero cannot be expressed as
    /// percentages.
    #[error("sample `{0}` has a total count of zero")]
    DegenerateRecord(String),

    /// A response group holds too few observations for a two-sample test.
    #[error(
        "population `{population}`: {group} group has {observed} observation(s), at least 2 required"
    )]
    InsufficientSampleSize {
        population: String,
        group: String,
        observed: usize,
    },

    #[error("column `{column}` of sample `{sample}`: invalid count `{value}`")]
    InvalidCount {
        sample: String,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
