//! streams2gpx cli - GPX generator from activity telemetry streams

use std::fs::{self, File};
use std::io;

use argopt::{cmd_group, subcmd};
use serde::Deserialize;
use time::format_description::well_known;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use streams2gpx::sources::JsonSource;
use streams2gpx::{
    suggested_file_name, ActivityTitle, ChannelRoutes, SourceToGpx, TelemetrySource,
    TrackBuilder, DEFAULT_ACTIVITY_NAME, SPEED_FACTOR,
};

/// CLI of streams2gpx - Convert your activity streams into a GPX file
#[cmd_group(commands = [streams, page])]
fn main() -> Result<(), String> {}

/// Generate a GPX from a streams JSON file
#[subcmd]
fn streams(
    /// Streams JSON file source
    json_path: String,
    /// GPX path file destination. Default: <name>.gpx
    #[opt(long)]
    destination: Option<String>,
    /// Activity name
    #[opt(long)]
    name: Option<String>,
    /// Activity type: cycling, running, swimming, Ride, Run, Swim...
    #[opt(long)]
    activity: Option<String>,
    /// Page title, eg.: "Morning Ride | Ride | Strava"
    #[opt(long)]
    title: Option<String>,
    /// Start time, RFC3339 format. Default: now
    #[opt(long)]
    start: Option<String>,
    /// Channels configuration. Default: .streams2gpx.yaml, ~/.streams2gpx.yaml
    #[opt(long)]
    config: Option<String>,
    /// Debug logging
    #[opt(short, long)]
    verbose: bool,
) -> Result<(), String> {
    init_logging(verbose);

    let json = File::open(json_path)
        .map_err(|e| format!("Failed on open the JSON file: {}", e))?;
    let source = JsonSource::streams(json);

    let meta = Metadata::resolve(name, activity, title);
    generate(source, meta, destination, start, config)
}

/// Generate a GPX from an embedded page props JSON file
#[subcmd]
fn page(
    /// Page props JSON file source, streams under `activity.streams`
    json_path: String,
    /// GPX path file destination. Default: <name>.gpx
    #[opt(long)]
    destination: Option<String>,
    /// Activity name
    #[opt(long)]
    name: Option<String>,
    /// Activity type: cycling, running, swimming, Ride, Run, Swim...
    #[opt(long)]
    activity: Option<String>,
    /// Page title, eg.: "Morning Ride | Ride | Strava"
    #[opt(long)]
    title: Option<String>,
    /// Start time, RFC3339 format. Default: now
    #[opt(long)]
    start: Option<String>,
    /// Channels configuration. Default: .streams2gpx.yaml, ~/.streams2gpx.yaml
    #[opt(long)]
    config: Option<String>,
    /// Debug logging
    #[opt(short, long)]
    verbose: bool,
) -> Result<(), String> {
    init_logging(verbose);

    let json = File::open(json_path)
        .map_err(|e| format!("Failed on open the JSON file: {}", e))?;
    let source = JsonSource::page_props(json);

    let meta = Metadata::resolve(name, activity, title);
    generate(source, meta, destination, start, config)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Track name and type from the arguments
struct Metadata {
    name: String,
    activity: String,
}

impl Metadata {
    /// Explicit arguments win over the page title
    fn resolve(name: Option<String>, activity: Option<String>, title: Option<String>) -> Self {
        let title = title.map(|t| ActivityTitle::parse(&t));

        let name = name
            .or_else(|| title.as_ref().map(|t| t.name.clone()))
            .unwrap_or_else(|| DEFAULT_ACTIVITY_NAME.to_string());
        let activity = activity
            .or_else(|| title.as_ref().map(|t| t.activity().to_string()))
            .unwrap_or_default();

        Self { name, activity }
    }
}

fn generate<SU>(
    source: SU,
    meta: Metadata,
    destination: Option<String>,
    start: Option<String>,
    config: Option<String>,
) -> Result<(), String>
where
    SU: TelemetrySource,
{
    let origin = match start {
        Some(s) => OffsetDateTime::parse(&s, &well_known::Rfc3339)
            .map_err(|e| format!("Failed on parse the start time: {}", e))?,
        None => OffsetDateTime::now_utc(),
    };

    let destination = destination.unwrap_or_else(|| suggested_file_name(&meta.name));

    let conf = load_configs(config);
    debug!(?conf, "configs loaded");

    let mut tracker = TrackBuilder::new(meta.name, &meta.activity, origin);
    tracker
        .speed_factor(conf.speed_factor)
        .channels(conf.channels);

    let gpx = SourceToGpx::build(source, &tracker).map_err(|e| e.to_string())?;

    fs::write(&destination, gpx)
        .map_err(|e| format!("Failed on write the destination file: {}", e))?;

    info!("Activity saved to file {}", destination);

    Ok(())
}

/// Load the current config
fn load_configs(provided: Option<String>) -> Configs {
    let mut options = vec![];

    if let Some(sprovided) = provided {
        options.push(sprovided);
    }

    options.push(".streams2gpx.yaml".to_string());

    if let Some(home) = dirs::home_dir() {
        if let Some(shome) = home.to_str() {
            options.push(format!("{}/.streams2gpx.yaml", shome));
        }
    }

    let mut yaml: Option<(String, String)> = None;
    for fi in options {
        if let Ok(s) = fs::read_to_string(&fi) {
            yaml = Some((fi, s));
            break;
        }
    }

    if let Some((fi, s)) = yaml {
        match serde_yaml::from_str::<Configs>(&s) {
            Ok(conf) => return conf,
            Err(e) => warn!("Ignoring the config {}, using the defaults: {}", fi, e),
        }
    }

    Configs::default()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
struct Configs {
    pub channels: ChannelRoutes,
    pub speed_factor: f64,
}

impl Default for Configs {
    fn default() -> Self {
        Self {
            channels: ChannelRoutes::default(),
            speed_factor: SPEED_FACTOR,
        }
    }
}

#[test]
fn parse_configs() -> Result<(), String> {
    use streams2gpx::ChannelRoute;

    let yaml = "speed_factor: 1";

    let conf: Configs = serde_yaml::from_str(&yaml).map_err(|e| e.to_string())?;

    assert_eq!(Configs::default(), conf);

    let yaml = "\nchannels:\n  - source: heartrate\n    tag: hr\n    placement: nested\nspeed_factor: 2";

    let conf: Configs = serde_yaml::from_str(&yaml).map_err(|e| e.to_string())?;

    assert_eq!(
        Configs {
            channels: ChannelRoutes::empty().route(ChannelRoute::nested("heartrate", "hr")),
            speed_factor: 2.0,
        },
        conf
    );

    Ok(())
}

#[test]
fn resolve_metadata() {
    let meta = Metadata::resolve(None, None, Some("Morning Ride | Ride | Strava".to_string()));
    assert_eq!("Morning Ride", meta.name);
    assert_eq!("cycling", meta.activity);

    let meta = Metadata::resolve(
        Some("Evening".to_string()),
        Some("Run".to_string()),
        Some("Morning Ride | Ride | Strava".to_string()),
    );
    assert_eq!("Evening", meta.name);
    assert_eq!("Run", meta.activity);

    let meta = Metadata::resolve(None, None, None);
    assert_eq!("Activity", meta.name);
    assert_eq!("", meta.activity);
}

#[test]
fn invalid_configs_fallback_to_defaults() -> Result<(), String> {
    let path = std::env::temp_dir().join(format!("streams2gpx-{}.yaml", std::process::id()));
    fs::write(&path, "channels:\n  - source: heartrate\n    tag: hr\n    placement: nest")
        .map_err(|e| e.to_string())?;

    let conf = load_configs(path.to_str().map(|p| p.to_string()));
    fs::remove_file(&path).map_err(|e| e.to_string())?;

    assert_eq!(Configs::default(), conf);

    Ok(())
}
