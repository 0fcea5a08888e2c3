use foundation::geo::{LngLat, wrap_bearing};
use serde::{Deserialize, Serialize};

/// Maximum camera pitch in degrees.
pub const MAX_PITCH: f64 = 85.0;

/// Camera state for a 3D map viewport.
///
/// Fields are flat so the pose serializes like a wire type; use
/// [`CameraPose::center`] for geographic math. Bearing is wrapped to
/// `[0, 360)` and pitch clamped to `[0, MAX_PITCH]` on every write that goes
/// through the setters; raw field writes are for deserialization only.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub lng: f64,
    pub lat: f64,
    pub zoom: f64,
    #[serde(default)]
    pub bearing: f64,
    #[serde(default)]
    pub pitch: f64,
}

impl CameraPose {
    pub fn new(center: LngLat, zoom: f64) -> Self {
        Self {
            lng: center.lng,
            lat: center.lat,
            zoom,
            bearing: 0.0,
            pitch: 0.0,
        }
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(self.lng, self.lat)
    }

    pub fn set_center(&mut self, center: LngLat) {
        self.lng = center.lng;
        self.lat = center.lat;
    }

    pub fn set_bearing(&mut self, bearing_deg: f64) {
        self.bearing = wrap_bearing(bearing_deg);
    }

    pub fn set_pitch(&mut self, pitch_deg: f64) {
        self.pitch = pitch_deg.clamp(0.0, MAX_PITCH);
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraPose, MAX_PITCH};
    use foundation::geo::LngLat;

    #[test]
    fn setters_wrap_and_clamp() {
        let mut pose = CameraPose::new(LngLat::new(135.0, -25.0), 3.5);

        pose.set_bearing(540.0);
        assert_eq!(pose.bearing, 180.0);
        pose.set_bearing(-10.0);
        assert_eq!(pose.bearing, 350.0);

        pose.set_pitch(120.0);
        assert_eq!(pose.pitch, MAX_PITCH);
        pose.set_pitch(-5.0);
        assert_eq!(pose.pitch, 0.0);
    }

    #[test]
    fn center_round_trips() {
        let mut pose = CameraPose::new(LngLat::new(151.21, -33.87), 12.0);
        assert_eq!(pose.center(), LngLat::new(151.21, -33.87));

        pose.set_center(LngLat::new(144.96, -37.81));
        assert_eq!(pose.lng, 144.96);
        assert_eq!(pose.lat, -37.81);
    }
}
