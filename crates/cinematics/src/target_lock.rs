use foundation::geo::LngLat;
use runtime::timers::TimerId;

use crate::config::{CameraTuning, TargetingTuning};
use crate::orbit::OrbitParameters;
use crate::session::SessionId;

/// Orbit flavor for the phase after the fly-in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum OrbitStyle {
    RotateInPlace,
    FixedRadius { radius_degrees: f64 },
}

/// A fly-then-orbit cinematic request, from a modifier-click or the
/// selection bridge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TargetLockRequest {
    pub target: LngLat,
    pub zoom: f64,
    pub pitch: f64,
    /// Approach bearing; `None` keeps the current bearing.
    pub bearing: Option<f64>,
    /// `None` computes the duration from the planar distance to the target.
    pub fly_duration_ms: Option<f64>,
    pub orbit: OrbitStyle,
}

impl TargetLockRequest {
    /// The direct-targeting defaults (modifier-click on the map).
    pub fn approach(target: LngLat, tuning: &CameraTuning) -> Self {
        Self {
            target,
            zoom: tuning.targeting.zoom,
            pitch: tuning.targeting.pitch,
            bearing: Some(180.0),
            fly_duration_ms: None,
            orbit: OrbitStyle::RotateInPlace,
        }
    }
}

/// Short hops stay snappy, long hops never feel instantaneous.
pub(crate) fn fly_duration_ms(distance_deg: f64, tuning: &TargetingTuning) -> f64 {
    (distance_deg * tuning.ms_per_degree).clamp(tuning.min_fly_ms, tuning.max_fly_ms)
}

/// Stage transitions scheduled as fixed delays from sequence start.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum StageEvent {
    /// Fly-in has arrived (duration + buffer); start the orbit phase and
    /// arm the interrupt bindings.
    SequenceOrbitStart,
    CrosshairFade,
    CrosshairRemove,
    /// Flyover's return leg: ease back to the remembered pose.
    FlyoverReturn {
        pose: camera::CameraPose,
        return_ms: f64,
    },
}

/// Live state of one fly-then-orbit sequence.
///
/// Every pending stage carries its own timer token; cancelling the sequence
/// cancels all of them, so no stage from a dead sequence ever fires.
#[derive(Debug)]
pub(crate) struct TargetSequence {
    pub(crate) orbit_params: OrbitParameters,
    pub(crate) orbit_duration_ms: f64,
    pub(crate) fly_session: SessionId,
    pub(crate) orbit_session: Option<SessionId>,
    pub(crate) timers: Vec<TimerId>,
    pub(crate) crosshair_active: bool,
}

#[cfg(test)]
mod tests {
    use foundation::geo::LngLat;

    use super::{OrbitStyle, TargetLockRequest, fly_duration_ms};
    use crate::config::{CameraTuning, TargetingTuning};

    #[test]
    fn fly_duration_clamps_both_ends() {
        let tuning = TargetingTuning::default();
        // 0.01° away: 1 ms raw, clamped up to the minimum.
        assert_eq!(fly_duration_ms(0.01, &tuning), 800.0);
        // 12°: 1200 ms raw, inside the band.
        assert_eq!(fly_duration_ms(12.0, &tuning), 1200.0);
        // Across the country: clamped down.
        assert_eq!(fly_duration_ms(40.0, &tuning), 1600.0);
    }

    #[test]
    fn approach_uses_targeting_defaults() {
        let tuning = CameraTuning::default();
        let req = TargetLockRequest::approach(LngLat::new(151.21, -33.87), &tuning);
        assert_eq!(req.zoom, 12.0);
        assert_eq!(req.pitch, 60.0);
        assert_eq!(req.bearing, Some(180.0));
        assert_eq!(req.fly_duration_ms, None);
        assert_eq!(req.orbit, OrbitStyle::RotateInPlace);
    }
}
