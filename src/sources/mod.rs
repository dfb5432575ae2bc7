//! Telemetry sources API

use crate::{Result, TelemetrySet};

/// Telemetry source
pub trait TelemetrySource {
    /// Fetch the activity streams
    fn fetch(&mut self) -> Result<TelemetrySet>;
}

mod json_file;

pub use json_file::{JsonLayout, JsonSource};
