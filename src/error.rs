use std::path::PathBuf;
use thiserror::Error;

use crate::geom::Axis;
use crate::validation::ValidationReport;

/// The main error type for boxmatch operations.
#[derive(Debug, Error)]
pub enum BoxmatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("axis {axis}: expected exactly 2 of edge1/edge2/center/length, got {supplied}")]
    InvalidParameterization { axis: Axis, supplied: usize },

    #[error("unsupported box field key: '{0}'")]
    UnsupportedKey(String),

    #[error("Failed to parse annotation JSON from {path}: {source}")]
    AnnotationJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write annotation JSON to {path}: {source}")]
    AnnotationJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid box {index} for image '{file_name}' in {path}: {source}")]
    AnnotationBox {
        path: PathBuf,
        file_name: String,
        index: usize,
        #[source]
        source: Box<BoxmatchError>,
    },

    #[error("box does not match the {schema} schema: {message}")]
    BoxSchemaMismatch {
        schema: &'static str,
        message: String,
    },

    #[error("Failed to parse VOC XML from {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("truth and prediction sets have different image counts ({truth} vs {predictions})")]
    ImageCountMismatch { truth: usize, predictions: usize },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported schema: {0}")]
    UnsupportedSchema(String),
}
