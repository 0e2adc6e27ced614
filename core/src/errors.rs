use thiserror::Error;

/// Failure modes of the metrics engine.
///
/// Structural problems (no timestamps, empty series) are hard errors.
/// A missing telemetry field is only an error for the computation that
/// needs it; the summary assembler catches those per metric so one absent
/// signal never blocks the rest of the record.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// A required input field is not present in the series.
    #[error("required field `{0}` is not present in the series")]
    MissingField(&'static str),

    /// Zero samples, or nothing left after dropping null values.
    #[error("series contains no usable samples")]
    EmptySeries,

    /// Non-positive FTP or duration passed to an intensity computation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Raw record ingestion failed; the message names the offending path.
    #[error("could not parse sample records: {0}")]
    Parse(String),
}
