//! Error types for the attendance engine.
//!
//! Unparseable dates and times are never errors; they become null values
//! during normalization. The variants here cover the conditions that abort a
//! whole run: bad configuration and unusable input files.

use thiserror::Error;

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::MissingColumns {
///     columns: vec!["tanggal".to_string(), "pos_grade".to_string()],
/// };
/// assert_eq!(
///     error.to_string(),
///     "Uploaded file is missing required columns: tanggal, pos_grade"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The attendance file could not be opened.
    #[error("Attendance file not found: {path}")]
    InputNotFound {
        /// The path that could not be opened.
        path: String,
    },

    /// The attendance file lacks one or more required columns.
    #[error("Uploaded file is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Normalized names of every missing column.
        columns: Vec<String>,
    },

    /// The attendance file is not structurally valid CSV.
    #[error("Malformed CSV at line {line}: {message}")]
    MalformedCsv {
        /// The 1-based line number, or 0 when unknown.
        line: u64,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/dashboard.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/dashboard.yaml"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "clustering.clusters".to_string(),
            message: "must be at least 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value 'clustering.clusters': must be at least 1"
        );
    }

    #[test]
    fn test_missing_columns_lists_every_column() {
        let error = EngineError::MissingColumns {
            columns: vec!["generasi".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Uploaded file is missing required columns: generasi"
        );
    }

    #[test]
    fn test_malformed_csv_displays_line() {
        let error = EngineError::MalformedCsv {
            line: 7,
            message: "found record with 3 fields, but the previous record has 13 fields"
                .to_string(),
        };
        assert!(error.to_string().starts_with("Malformed CSV at line 7:"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_input_not_found() -> EngineResult<()> {
            Err(EngineError::InputNotFound {
                path: "/test.csv".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_input_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
