// Error types for blueprint

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum BlueprintError {
    // User input validation errors
    #[snafu(display("Invalid selection: {field} - {reason}"))]
    InvalidSelection { field: String, reason: String },
    #[snafu(display("Unknown package '{id}' for the {track} track"))]
    UnknownPackage { track: String, id: String },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Errors for the snapshot writer
    #[snafu(display("Error writing blueprint snapshot"))]
    WriterError { source: io::Error },
    #[snafu(display("Error loading blueprint snapshot"))]
    SnapshotLoaderError { source: io::Error },
}

impl BlueprintError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        BlueprintError::InvalidSelection {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
