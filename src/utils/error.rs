use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required column '{column}' in input header")]
    MissingColumnError { column: String },

    #[error("Malformed record at row {row}: field '{field}' = '{value}' ({reason})")]
    MalformedRecordError {
        row: usize,
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate entity '{name}' at row {row} (first seen at row {first_row})")]
    DuplicateEntityError {
        name: String,
        first_row: usize,
        row: usize,
    },

    #[error("Coordinates out of range for '{name}' at row {row}: ({latitude}, {longitude})")]
    CoordinateRangeError {
        row: usize,
        name: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlanError::CsvError(_)
            | PlanError::MissingColumnError { .. }
            | PlanError::MalformedRecordError { .. }
            | PlanError::DuplicateEntityError { .. }
            | PlanError::CoordinateRangeError { .. } => ErrorCategory::Input,
            PlanError::ConfigError { .. }
            | PlanError::ConfigValidationError { .. }
            | PlanError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlanError::IoError(_) => ErrorCategory::Io,
            PlanError::SerializationError(_) | PlanError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Processing => match self {
                // An improper coloring means a bug, not bad input.
                PlanError::ProcessingError { .. } => ErrorSeverity::Critical,
                _ => ErrorSeverity::High,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlanError::CsvError(_) => {
                "Check that the input is a comma-separated file with a header row".to_string()
            }
            PlanError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            PlanError::SerializationError(_) => {
                "Disable the json output format and report the problem".to_string()
            }
            PlanError::MissingColumnError { column } => format!(
                "Add a '{}' column to the input or point the column mapping at an existing one",
                column
            ),
            PlanError::MalformedRecordError { row, field, .. } => format!(
                "Fix the '{}' value on row {}; every entity needs a name and numeric coordinates",
                field, row
            ),
            PlanError::DuplicateEntityError { name, .. } => format!(
                "Give each entity a unique name; '{}' appears more than once",
                name
            ),
            PlanError::CoordinateRangeError { .. } => {
                "Latitude must be within [-90, 90] and longitude within [-180, 180], or disable strict_coordinates"
                    .to_string()
            }
            PlanError::ConfigError { .. } | PlanError::ConfigValidationError { .. } => {
                "Review the configuration file syntax and values".to_string()
            }
            PlanError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            PlanError::ProcessingError { .. } => {
                "Re-run with --verbose and report the log output".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Input data problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Processing => format!("Planning failed: {}", self),
        }
    }

    /// Exit code for the binaries, by severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
