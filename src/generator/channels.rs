//! Sensor channels to GPX extensions routing

use serde::Deserialize;

use crate::{Error, Result};

/// Where a channel value lands inside the `<extensions>` of a point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Child of `<extensions>`, GPX namespace
    Direct,
    /// Child of `<gpxtpx:TrackPointExtension>`, Garmin namespace
    Nested,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawChannelRoute")]
pub struct ChannelRoute {
    /// Channel name on the telemetry, eg.: heartrate
    pub source: String,
    /// Local element name on the output, eg.: hr
    pub tag: String,
    pub placement: Placement,
}

impl ChannelRoute {
    pub fn direct(source: &str, tag: &str) -> Self {
        Self {
            source: source.to_string(),
            tag: tag.to_string(),
            placement: Placement::Direct,
        }
    }

    pub fn nested(source: &str, tag: &str) -> Self {
        Self {
            source: source.to_string(),
            tag: tag.to_string(),
            placement: Placement::Nested,
        }
    }

    /// The tag must be usable as an element name (XML NCName)
    pub fn validate(&self) -> Result<()> {
        if is_ncname(&self.tag) {
            Ok(())
        } else {
            Err(Error::InvalidChannelTag(self.tag.clone()))
        }
    }
}

#[derive(Deserialize)]
struct RawChannelRoute {
    source: String,
    tag: String,
    placement: Placement,
}

impl TryFrom<RawChannelRoute> for ChannelRoute {
    type Error = Error;

    fn try_from(raw: RawChannelRoute) -> Result<Self> {
        let route = Self {
            source: raw.source,
            tag: raw.tag,
            placement: raw.placement,
        };
        route.validate()?;

        Ok(route)
    }
}

/// Non-colonized XML name: letter or `_` first, then letters, digits, `-`, `_`, `.`
pub(crate) fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Ordered routing table. The order is kept on the output elements.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ChannelRoutes(pub Vec<ChannelRoute>);

impl ChannelRoutes {
    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn route(mut self, route: ChannelRoute) -> Self {
        self.0.push(route);

        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelRoute> {
        self.0.iter()
    }

    pub fn validate(&self) -> Result<()> {
        self.iter().try_for_each(ChannelRoute::validate)
    }
}

impl Default for ChannelRoutes {
    fn default() -> Self {
        Self::empty()
            .route(ChannelRoute::direct("watts", "power"))
            .route(ChannelRoute::nested("heartrate", "hr"))
            .route(ChannelRoute::nested("cadence", "cad"))
            .route(ChannelRoute::nested("temp", "atemp"))
    }
}
