//! Region — a named location supplied by the host application.

use serde::{Deserialize, Serialize};
use super::{GeoPoint, Located};

/// A named region. The engine only ever reads its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub location: GeoPoint,
}

impl Region {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            location: GeoPoint::new(lat, lon),
        }
    }
}

impl Located for Region {
    fn location(&self) -> GeoPoint {
        self.location
    }
}
