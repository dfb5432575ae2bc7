//! JSON streams source integration

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use super::TelemetrySource;
use crate::{Error, Result, TelemetrySet};

/// Where the streams are inside the JSON document
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonLayout {
    /// Streams object on the root, as the streams endpoint responds
    Streams,
    /// Page props object, streams under `activity.streams`
    PageProps,
}

/// JSON telemetry source
pub struct JsonSource<T>
where
    T: Read,
{
    rdr: T,
    layout: JsonLayout,
}

impl<T> JsonSource<T>
where
    T: Read,
{
    pub fn new(rdr: T, layout: JsonLayout) -> Self {
        Self { rdr, layout }
    }

    pub fn streams(rdr: T) -> Self {
        Self::new(rdr, JsonLayout::Streams)
    }

    pub fn page_props(rdr: T) -> Self {
        Self::new(rdr, JsonLayout::PageProps)
    }
}

impl<T> TelemetrySource for JsonSource<T>
where
    T: Read,
{
    fn fetch(&mut self) -> Result<TelemetrySet> {
        let raw = match self.layout {
            JsonLayout::Streams => serde_json::from_reader::<_, RawStreams>(&mut self.rdr),
            JsonLayout::PageProps => {
                serde_json::from_reader::<_, PageProps>(&mut self.rdr).map(|p| p.activity.streams)
            }
        }
        .map_err(|e| Error::Source(format!("Failed on parse the streams: {}", e)))?;

        Ok(raw.into_telemetry())
    }
}

#[derive(Deserialize)]
struct PageProps {
    activity: PageActivity,
}

#[derive(Deserialize)]
struct PageActivity {
    streams: RawStreams,
}

#[derive(Deserialize)]
struct RawStreams {
    #[serde(default)]
    latlng: Option<Vec<(f64, f64)>>,
    #[serde(default)]
    altitude: Option<Vec<f64>>,
    #[serde(default)]
    time: Option<Vec<Value>>,
    #[serde(flatten)]
    others: BTreeMap<String, Value>,
}

impl RawStreams {
    fn into_telemetry(self) -> TelemetrySet {
        let mut channels = BTreeMap::new();

        for (name, value) in self.others {
            match value {
                Value::Array(items) => {
                    channels.insert(name, numbers(&items));
                }
                _ => trace!(stream = name.as_str(), "ignoring non array stream"),
            }
        }

        TelemetrySet {
            time: self.time.map(|t| numbers(&t)),
            latlng: self.latlng,
            altitude: self.altitude,
            channels,
        }
    }
}

fn numbers(items: &[Value]) -> Vec<Option<f64>> {
    items.iter().map(Value::as_f64).collect()
}

#[cfg(test)]
pub mod tests {
    use super::JsonSource;
    use crate::{Error, TelemetrySource};

    #[test]
    fn streams() -> Result<(), String> {
        let data = r#"{
            "latlng": [[-26.31832, -48.8702222], [-26.3185919, -48.8619776]],
            "altitude": [10, 20.5],
            "time": [0, 5],
            "heartrate": [150, null],
            "watts": ["n/a", 0],
            "resolution": "high"
        }"#;

        let mut source = JsonSource::streams(data.as_bytes());
        let telemetry = source.fetch().map_err(|e| e.to_string())?;

        assert_eq!(2, telemetry.len());
        assert_eq!(
            Some(vec![(-26.31832, -48.8702222), (-26.3185919, -48.8619776)]),
            telemetry.latlng
        );
        assert_eq!(Some(vec![10.0, 20.5]), telemetry.altitude);
        assert_eq!(Some(vec![Some(0.0), Some(5.0)]), telemetry.time);
        assert_eq!(
            Some(&vec![Some(150.0), None]),
            telemetry.channels.get("heartrate")
        );
        assert_eq!(Some(&vec![None, Some(0.0)]), telemetry.channels.get("watts"));
        assert!(!telemetry.channels.contains_key("resolution"));

        Ok(())
    }

    #[test]
    fn page_props() -> Result<(), String> {
        let data = r#"{
            "activity": {
                "id": 123,
                "streams": {
                    "latlng": [[1, 2], [3, 4], [5, 6]],
                    "altitude": [1, 2, 3],
                    "cadence": [80, 81, 82]
                }
            }
        }"#;

        let mut source = JsonSource::page_props(data.as_bytes());
        let telemetry = source.fetch().map_err(|e| e.to_string())?;

        assert_eq!(3, telemetry.len());
        assert_eq!(None, telemetry.time);
        assert_eq!(
            Some(&vec![Some(80.0), Some(81.0), Some(82.0)]),
            telemetry.channels.get("cadence")
        );

        Ok(())
    }

    #[test]
    fn missing_streams_are_kept_absent() -> Result<(), String> {
        let data = r#"{ "altitude": [1, 2] }"#;

        let mut source = JsonSource::streams(data.as_bytes());
        let telemetry = source.fetch().map_err(|e| e.to_string())?;
        assert_eq!(None, telemetry.latlng);
        assert_eq!(0, telemetry.len());

        Ok(())
    }

    #[test]
    fn invalid_json() {
        let mut source = JsonSource::page_props("{ \"streams\": {} }".as_bytes());

        assert!(matches!(source.fetch(), Err(Error::Source(_))));
    }
}
