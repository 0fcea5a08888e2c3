use foundation::geo::LngLat;
use serde::{Deserialize, Serialize};

/// Tuning block for every cinematic mode.
///
/// Hosts typically load this from JSON and override a handful of fields;
/// missing sections fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub ambient: AmbientTuning,
    pub flight: FlightTuning,
    pub targeting: TargetingTuning,
    pub selection: SelectionTuning,
    pub box_orbit: BoxOrbitTuning,
    pub home: HomeView,
}

/// Continuous rotate-in-place orbit around the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientTuning {
    pub degrees_per_second: f64,
}

impl Default for AmbientTuning {
    fn default() -> Self {
        // 0.1° per 30 ms tick in the original tuning.
        Self {
            degrees_per_second: 10.0 / 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    /// Forward translation per frame, degrees.
    pub speed_degrees_per_frame: f64,
    /// Eased transition into cruise attitude.
    pub transition_ms: f64,
    /// Window after start during which stop requests are ignored.
    pub guard_ms: f64,
    /// Eased slow-down window after a stop.
    pub deceleration_ms: f64,
    pub cruise_zoom: f64,
    pub cruise_pitch: f64,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            speed_degrees_per_frame: 0.001,
            transition_ms: 4000.0,
            guard_ms: 500.0,
            deceleration_ms: 2000.0,
            cruise_zoom: 14.5,
            cruise_pitch: 75.0,
        }
    }
}

/// Fly-then-orbit targeting sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingTuning {
    pub zoom: f64,
    pub pitch: f64,
    /// Fly duration per degree of planar distance, clamped below.
    pub ms_per_degree: f64,
    pub min_fly_ms: f64,
    pub max_fly_ms: f64,
    /// Gap between fly-in arrival and orbit start.
    pub orbit_start_buffer_ms: f64,
    pub crosshair_fade_start_ms: f64,
    pub crosshair_fade_ms: f64,
    pub orbit_degrees_per_second: f64,
    pub orbit_duration_ms: f64,
}

impl Default for TargetingTuning {
    fn default() -> Self {
        Self {
            zoom: 12.0,
            pitch: 60.0,
            ms_per_degree: 100.0,
            min_fly_ms: 800.0,
            max_fly_ms: 1600.0,
            orbit_start_buffer_ms: 100.0,
            crosshair_fade_start_ms: 3500.0,
            crosshair_fade_ms: 2000.0,
            orbit_degrees_per_second: 6.0,
            orbit_duration_ms: 60_000.0,
        }
    }
}

/// Marker-selection flavor of the targeting sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionTuning {
    /// Never fly out below this zoom when approaching a selected marker.
    pub min_zoom: f64,
    pub pitch: f64,
}

impl Default for SelectionTuning {
    fn default() -> Self {
        Self {
            min_zoom: 15.0,
            pitch: 55.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOrbitTuning {
    pub fly_ms: f64,
}

impl Default for BoxOrbitTuning {
    fn default() -> Self {
        Self { fly_ms: 3000.0 }
    }
}

/// The wide "whole country" resting view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeView {
    pub lng: f64,
    pub lat: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub fly_ms: f64,
}

impl HomeView {
    pub fn center(&self) -> LngLat {
        LngLat::new(self.lng, self.lat)
    }
}

impl Default for HomeView {
    fn default() -> Self {
        Self {
            lng: 135.0,
            lat: -25.0,
            zoom: 3.5,
            pitch: 0.0,
            bearing: 0.0,
            fly_ms: 3000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::CameraTuning;

    #[test]
    fn empty_json_yields_defaults() {
        let tuning: CameraTuning = serde_json::from_str("{}").unwrap();
        assert_eq!(tuning, CameraTuning::default());
    }

    #[test]
    fn partial_overrides_keep_sibling_defaults() {
        let tuning: CameraTuning =
            serde_json::from_str(r#"{"flight": {"cruise_zoom": 11.0}}"#).unwrap();
        assert_eq!(tuning.flight.cruise_zoom, 11.0);
        assert_eq!(tuning.flight.transition_ms, 4000.0);
        assert_eq!(tuning.targeting.min_fly_ms, 800.0);
    }

    #[test]
    fn tuning_round_trips_through_json() {
        let tuning = CameraTuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let back: CameraTuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tuning);
    }
}
