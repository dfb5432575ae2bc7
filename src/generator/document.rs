//! In-memory GPX document tree
//!
//! Plain records, built by [`crate::TrackBuilder`] and rendered by
//! [`crate::generator::gpx::write`]. No formatting happens here.

use geo::geometry::Point;
use time::OffsetDateTime;

use super::activity::ActivityType;

/// One track document
#[derive(Clone, Debug, PartialEq)]
pub struct TrackDocument {
    pub track: Track,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub name: String,
    pub activity: ActivityType,
    pub segment: TrackSegment,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackSegment {
    pub points: Vec<TrackPoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackPoint {
    /// x = longitude, y = latitude
    pub coordinates: Point,
    pub elevation: f64,
    /// Always on UTC
    pub time: OffsetDateTime,
    /// Only present when not empty
    pub extensions: Option<Extensions>,
}

impl TrackPoint {
    pub fn latitude(&self) -> f64 {
        self.coordinates.y()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.x()
    }
}

/// Content of `<extensions>`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extensions {
    /// Fields on the GPX namespace, eg.: power
    pub fields: Vec<ExtensionField>,
    /// Only present when not empty
    pub track_point: Option<TrackPointExtension>,
}

impl Extensions {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.track_point.is_none()
    }
}

/// Content of `<gpxtpx:TrackPointExtension>`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackPointExtension {
    pub fields: Vec<ExtensionField>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExtensionField {
    /// Local element name
    pub tag: String,
    pub value: f64,
}
