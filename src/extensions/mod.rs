//! Host collaborators the builder talks to through narrow traits.

pub mod geo;
pub mod notifications;

pub use geo::{GeoIndex, StaticGeoIndex, WorldCountryIndex};
pub use notifications::{BuilderNotice, ChartNotifier, RecordingNotifier, ZoneWarning};
