//! GPX generation from telemetry streams

pub mod activity;
pub mod channels;
pub mod document;
pub mod gpx;
pub mod telemetry;
pub mod tracker;
