//! Track builder API

use geo::geometry::Point;
use time::{Duration, OffsetDateTime, UtcOffset};
use tracing::{debug, trace, warn};

use super::activity::ActivityType;
use super::channels::{ChannelRoutes, Placement};
use super::document::{
    ExtensionField, Extensions, Track, TrackDocument, TrackPoint, TrackPointExtension,
    TrackSegment,
};
use super::gpx;
use super::telemetry::{sample, TelemetrySet};
use crate::{Error, Result, TelemetrySource};

/// Playback speed of the generated timestamps
pub const SPEED_FACTOR: f64 = 1.0;

pub struct TrackBuilder {
    /// Activity name
    pub name: String,
    pub activity: ActivityType,
    /// Time of the first sample
    pub origin: OffsetDateTime,
    /// Multiplier of the elapsed offsets
    pub speed_factor: f64,
    pub channels: ChannelRoutes,
}

impl TrackBuilder {
    /// Start a new builder with the default channels routing
    pub fn new(name: String, activity: &str, origin: OffsetDateTime) -> Self {
        Self {
            name,
            activity: ActivityType::from_label(activity),
            origin,
            speed_factor: SPEED_FACTOR,
            channels: ChannelRoutes::default(),
        }
    }

    pub fn speed_factor(&mut self, factor: f64) -> &mut Self {
        self.speed_factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            SPEED_FACTOR
        };

        self
    }

    pub fn channels(&mut self, channels: ChannelRoutes) -> &mut Self {
        self.channels = channels;

        self
    }

    /// Build the track document from the streams
    pub fn build(&self, telemetry: &TelemetrySet) -> Result<TrackDocument> {
        self.channels.validate()?;

        let latlng = telemetry
            .latlng
            .as_ref()
            .ok_or(Error::MissingRequiredStream("latlng"))?;
        let altitude = telemetry
            .altitude
            .as_ref()
            .ok_or(Error::MissingRequiredStream("altitude"))?;

        let size = latlng.len();
        if altitude.len() != size {
            return Err(Error::StreamLengthMismatch {
                stream: "altitude",
                expected: size,
                found: altitude.len(),
            });
        }

        let time = telemetry.time.as_deref();
        if let Some(t) = time {
            if t.len() != size {
                warn!(expected = size, found = t.len(), "time stream size differs");
            }
        }

        // Channels are looked up once, a missing one is kept as None
        let channels: Vec<_> = self
            .channels
            .iter()
            .map(|route| {
                let stream = telemetry.channels.get(&route.source).map(|s| s.as_slice());
                if let Some(s) = stream {
                    if s.len() != size {
                        warn!(
                            channel = route.source.as_str(),
                            expected = size,
                            found = s.len(),
                            "channel size differs"
                        );
                    }
                }
                (route, stream)
            })
            .collect();

        let origin = self.origin.to_offset(UtcOffset::UTC);
        let mut points = Vec::with_capacity(size);
        let mut omitted = 0usize;

        for (i, (&(lat, lon), &ele)) in latlng.iter().zip(altitude.iter()).enumerate() {
            let elapsed = sample(time, i).unwrap_or(i as f64);
            let millis = (elapsed * 1000f64 * self.speed_factor).trunc() as i64;

            let mut direct = vec![];
            let mut nested = vec![];

            for (route, stream) in &channels {
                let value = match sample(*stream, i) {
                    Some(v) => v,
                    None => {
                        if stream.is_some() {
                            omitted += 1;
                        }
                        continue;
                    }
                };

                let field = ExtensionField {
                    tag: route.tag.clone(),
                    value,
                };
                match route.placement {
                    Placement::Direct => direct.push(field),
                    Placement::Nested => nested.push(field),
                }
            }

            let track_point = if nested.is_empty() {
                None
            } else {
                Some(TrackPointExtension { fields: nested })
            };
            let extensions = Extensions {
                fields: direct,
                track_point,
            };

            points.push(TrackPoint {
                coordinates: Point::new(lon, lat),
                elevation: ele,
                time: origin.saturating_add(Duration::milliseconds(millis)),
                extensions: if extensions.is_empty() {
                    None
                } else {
                    Some(extensions)
                },
            });
        }

        debug!(
            name = self.name.as_str(),
            activity = self.activity.as_str(),
            points = points.len(),
            omitted,
            "track built"
        );

        Ok(TrackDocument {
            track: Track {
                name: self.name.clone(),
                activity: self.activity,
                segment: TrackSegment { points },
            },
        })
    }
}

/// Default GPX generator from source
pub struct SourceToGpx {}

impl SourceToGpx {
    /// Fetch the source, build the track and serialize it
    pub fn build<SU>(mut source: SU, tracker: &TrackBuilder) -> Result<String>
    where
        SU: TelemetrySource,
    {
        let telemetry = source.fetch()?;
        trace!(samples = telemetry.len(), "telemetry fetched");

        let doc = tracker.build(&telemetry)?;

        gpx::serialize(&doc)
    }
}
