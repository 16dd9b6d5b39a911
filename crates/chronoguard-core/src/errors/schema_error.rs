/// Structured-generation schema violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("no JSON object found in generation output")]
    NoJsonObject,

    #[error("payload does not match the numeric timeline schema: {reason}")]
    Malformed { reason: String },

    #[error("implausible range: low {low}, most_likely {most_likely}, high {high}")]
    ImplausibleRange {
        low: f64,
        high: f64,
        most_likely: f64,
    },

    #[error("expected at least {required} evidence bullets citing a year, found {found}")]
    MissingYearReferences { required: usize, found: usize },

    #[error("unit {found} does not normalize to required unit {required}")]
    UnitMismatch { required: String, found: String },

    #[error("evidence cites unknown passage {passage_id}")]
    UnknownCitation { passage_id: String },
}
