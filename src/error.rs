//! Error type shared by the loaders, reshaping helpers and renderers.

use plotters::drawing::DrawingAreaErrorKind;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors returned by this library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid delimited data in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file was readable but does not have the layout its tool produces.
    #[error("malformed {path}: {reason}")]
    Format { path: PathBuf, reason: String },

    #[error("no `.{suffix}` file in {dir}")]
    NoInputFile { dir: PathBuf, suffix: String },

    #[error("no measurement named `{0}`")]
    MissingMeasurement(String),

    #[error("no column `{0}`")]
    MissingColumn(String),

    #[error("no value in column `{column}` at index {index} of `{name}`")]
    MissingValue {
        name: String,
        column: String,
        index: f64,
    },

    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("nothing to plot: {0}")]
    EmptyData(String),

    #[error("drawing failed: {0}")]
    Render(String),

    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

/// Alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(e.to_string())
    }
}
