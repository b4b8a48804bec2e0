use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

use crate::core::calendar::{CalendarView, WeekStart};

pub const CONFIG_VERSION: u64 = 1;

fn default_server_url() -> String {
    "http://localhost:8001".to_string()
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, CosmicConfigEntry)]
pub struct CadenceConfig {
    /// Base URL of the companion backend, without a trailing slash.
    pub server_url: String,
    pub default_view: CalendarView,
    pub week_start: WeekStart,
    /// Configured coordinates for place discovery. Left unset, the explore
    /// page shows the placeholder suggestions instead of live results.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub debug_logging: bool,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            default_view: CalendarView::Month,
            week_start: WeekStart::Monday,
            latitude: None,
            longitude: None,
            debug_logging: false,
        }
    }
}

impl CadenceConfig {
    /// Coordinates, if both halves are configured.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}
