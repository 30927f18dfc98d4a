use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarmError {
    #[error("Invalid allocation: {reason} (total area {total_area} ha, {plot_count} plots)")]
    InvalidAllocation {
        total_area: f64,
        plot_count: usize,
        reason: String,
    },

    #[error("Plot area out of range at index {index}: {value} ha (allowed {min} to {max} ha)")]
    OutOfRangeArea {
        index: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Over-allocation: plots sum to {allocated} ha, exceeding the farm total {total_area} ha by {overage} ha")]
    OverAllocation {
        total_area: f64,
        allocated: f64,
        overage: f64,
    },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingConfig { field: String },

    #[error("No plot named '{label}' in the plan")]
    UnknownPlot { label: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FarmError>;
