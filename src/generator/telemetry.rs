//! Telemetry streams definition

use std::collections::BTreeMap;

/// Time-aligned sample streams of one recorded activity
///
/// `latlng` defines the sample count. Absent entries of the optional
/// streams are `None`, they never shift the other samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TelemetrySet {
    /// Seconds since the start of the activity
    pub time: Option<Vec<Option<f64>>>,
    /// (latitude, longitude) pairs in degrees
    pub latlng: Option<Vec<(f64, f64)>>,
    /// Elevation in meters
    pub altitude: Option<Vec<f64>>,
    /// Sensor channels by name, eg.: heartrate, watts
    pub channels: BTreeMap<String, Vec<Option<f64>>>,
}

impl TelemetrySet {
    /// Only the required streams
    pub fn basic(latlng: Vec<(f64, f64)>, altitude: Vec<f64>) -> Self {
        Self {
            time: None,
            latlng: Some(latlng),
            altitude: Some(altitude),
            channels: BTreeMap::new(),
        }
    }

    pub fn time(mut self, time: Vec<Option<f64>>) -> Self {
        self.time = Some(time);

        self
    }

    pub fn channel(mut self, name: &str, samples: Vec<Option<f64>>) -> Self {
        self.channels.insert(name.to_string(), samples);

        self
    }

    /// Sample count, defined by the `latlng` stream
    pub fn len(&self) -> usize {
        self.latlng.as_ref().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Finite value of the sample `i`, if any
pub(crate) fn sample(stream: Option<&[Option<f64>]>, i: usize) -> Option<f64> {
    stream
        .and_then(|s| s.get(i).copied().flatten())
        .filter(|v| v.is_finite())
}
