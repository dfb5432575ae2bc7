//! streams2gpx - GPX generator from activity telemetry streams

mod error;
pub mod generator;
pub mod sources;

pub use error::{Error, Result};
pub use generator::activity::{
    suggested_file_name, ActivityTitle, ActivityType, DEFAULT_ACTIVITY_NAME, GPX_MIME_TYPE,
};
pub use generator::channels::{ChannelRoute, ChannelRoutes, Placement};
pub use generator::document::{
    ExtensionField, Extensions, Track, TrackDocument, TrackPoint, TrackPointExtension,
    TrackSegment,
};
pub use generator::gpx::{serialize, write};
pub use generator::telemetry::TelemetrySet;
pub use generator::tracker::{SourceToGpx, TrackBuilder, SPEED_FACTOR};
pub use sources::TelemetrySource;
