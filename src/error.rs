//! Error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// `latlng` or `altitude` was not provided
    #[error("Missing required stream `{0}`")]
    MissingRequiredStream(&'static str),

    /// `altitude` not aligned with `latlng`. Only raised for invalid input,
    /// well formed streams never hit it.
    #[error("Stream `{stream}` has {found} samples, expected {expected}")]
    StreamLengthMismatch {
        stream: &'static str,
        expected: usize,
        found: usize,
    },

    /// Routing tag not usable as an XML element name
    #[error("Invalid channel tag `{0}`")]
    InvalidChannelTag(String),

    /// Telemetry source could not deliver the streams
    #[error("Failed on read the telemetry: {0}")]
    Source(String),

    #[error("Failed on write the GPX: {0}")]
    Xml(#[from] xml::writer::Error),

    #[error("Failed on format the time: {0}")]
    TimeFormat(#[from] time::error::Format),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
