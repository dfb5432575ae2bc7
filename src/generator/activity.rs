//! Activity metadata: category, title and file naming

use std::fmt;

/// MIME type of the generated documents
pub const GPX_MIME_TYPE: &str = "application/gpx+xml";

/// Fallback when the activity has no name
pub const DEFAULT_ACTIVITY_NAME: &str = "Activity";

/// Track category, written on the `type` attribute of `<trk>`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityType {
    Cycling,
    Running,
    Swimming,
    Uncategorized,
}

impl ActivityType {
    /// Category from its name or from the site label (Ride, Run, Swim).
    /// Unknown labels are uncategorized.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "cycling" | "ride" => Self::Cycling,
            "running" | "run" => Self::Running,
            "swimming" | "swim" => Self::Swimming,
            _ => Self::Uncategorized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cycling => "cycling",
            Self::Running => "running",
            Self::Swimming => "swimming",
            Self::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and label from a page title like `Morning Ride | Ride | Strava`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityTitle {
    pub name: String,
    pub label: Option<String>,
}

impl ActivityTitle {
    pub fn parse(title: &str) -> Self {
        let mut parts = title.split(" | ");

        let name = match parts.next().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => DEFAULT_ACTIVITY_NAME.to_string(),
        };
        let label = parts
            .next()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        Self { name, label }
    }

    pub fn activity(&self) -> ActivityType {
        match &self.label {
            Some(l) => ActivityType::from_label(l),
            None => ActivityType::Uncategorized,
        }
    }
}

/// File name suggested for the activity document
pub fn suggested_file_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("{}.gpx", DEFAULT_ACTIVITY_NAME)
    } else {
        format!("{}.gpx", name)
    }
}

#[cfg(test)]
mod tests {
    use super::{suggested_file_name, ActivityTitle, ActivityType};

    #[test]
    fn labels() {
        assert_eq!(ActivityType::Cycling, ActivityType::from_label("Ride"));
        assert_eq!(ActivityType::Running, ActivityType::from_label("Run"));
        assert_eq!(ActivityType::Swimming, ActivityType::from_label("Swim"));
        assert_eq!(ActivityType::Cycling, ActivityType::from_label("cycling"));
        assert_eq!(ActivityType::Swimming, ActivityType::from_label(" SWIMMING "));
        assert_eq!(ActivityType::Uncategorized, ActivityType::from_label("Hike"));
        assert_eq!(ActivityType::Uncategorized, ActivityType::from_label(""));
        assert_eq!("uncategorized", ActivityType::from_label("Yoga").to_string());
    }

    #[test]
    fn title() {
        let title = ActivityTitle::parse("Morning Ride | Ride | Strava");
        assert_eq!("Morning Ride", title.name);
        assert_eq!(Some("Ride".to_string()), title.label);
        assert_eq!(ActivityType::Cycling, title.activity());

        let title = ActivityTitle::parse("Lunch laps");
        assert_eq!("Lunch laps", title.name);
        assert_eq!(None, title.label);
        assert_eq!(ActivityType::Uncategorized, title.activity());

        let title = ActivityTitle::parse(" | Run | Strava");
        assert_eq!("Activity", title.name);
        assert_eq!(ActivityType::Running, title.activity());
    }

    #[test]
    fn file_name() {
        assert_eq!("Morning Ride.gpx", suggested_file_name("Morning Ride"));
        assert_eq!("Activity.gpx", suggested_file_name("  "));
    }
}
