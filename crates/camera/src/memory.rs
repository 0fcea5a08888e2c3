use foundation::easing::Easing;
use foundation::geo::{LngLat, wrap_bearing};
use foundation::time::Time;

use crate::pose::CameraPose;
use crate::surface::{CameraMove, CameraSurface, EaseTo, FlyTo, SurfaceCapabilities};

/// Deterministic in-memory camera surface.
///
/// Stands in for the real rendering surface in tests and headless runs. The
/// host advances it with [`MemoryCamera::tick`]; parametric transitions
/// interpolate only the fields named in their target, so an instantaneous
/// `jump_to` on disjoint fields composes with an in-flight ease. The flight
/// engine relies on that independence.
#[derive(Debug)]
pub struct MemoryCamera {
    pose: CameraPose,
    transition: Option<Transition>,
    now: Time,
    ready: bool,
}

#[derive(Debug, Copy, Clone)]
struct Transition {
    start: Time,
    duration_ms: f64,
    easing: Easing,
    from: CameraPose,
    target: CameraMove,
}

impl MemoryCamera {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            transition: None,
            now: Time::ZERO,
            ready: true,
        }
    }

    /// A surface that has not finished initializing yet; attaching a
    /// director to it is a setup-ordering error.
    pub fn initializing(pose: CameraPose) -> Self {
        Self {
            ready: false,
            ..Self::new(pose)
        }
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn is_moving(&self) -> bool {
        self.transition.is_some()
    }

    /// Advances any in-flight parametric transition to `now`.
    pub fn tick(&mut self, now: Time) {
        self.now = now;
        let Some(tr) = self.transition else {
            return;
        };

        let t = if tr.duration_ms <= 0.0 {
            1.0
        } else {
            now.since(tr.start) / tr.duration_ms
        };
        let k = tr.easing.sample(t);

        if let Some(center) = tr.target.center {
            let from = tr.from.center();
            self.pose.set_center(LngLat::new(
                from.lng + (center.lng - from.lng) * k,
                from.lat + (center.lat - from.lat) * k,
            ));
        }
        if let Some(zoom) = tr.target.zoom {
            self.pose.zoom = tr.from.zoom + (zoom - tr.from.zoom) * k;
        }
        if let Some(pitch) = tr.target.pitch {
            self.pose.set_pitch(tr.from.pitch + (pitch - tr.from.pitch) * k);
        }
        if let Some(bearing) = tr.target.bearing {
            let delta = shortest_bearing_delta(tr.from.bearing, bearing);
            self.pose.set_bearing(tr.from.bearing + delta * k);
        }

        if t >= 1.0 {
            // Snap exactly onto the target so float drift never survives a
            // finished transition.
            self.apply(tr.target);
            self.transition = None;
        }
    }

    fn apply(&mut self, target: CameraMove) {
        if let Some(center) = target.center {
            self.pose.set_center(center);
        }
        if let Some(zoom) = target.zoom {
            self.pose.zoom = zoom;
        }
        if let Some(pitch) = target.pitch {
            self.pose.set_pitch(pitch);
        }
        if let Some(bearing) = target.bearing {
            self.pose.set_bearing(bearing);
        }
    }

    fn begin_transition(&mut self, target: CameraMove, duration_ms: f64, easing: Easing) {
        if duration_ms <= 0.0 {
            self.apply(target);
            self.transition = None;
            return;
        }
        self.transition = Some(Transition {
            start: self.now,
            duration_ms,
            easing,
            from: self.pose,
            target,
        });
    }
}

/// Signed shortest rotation from `from` to `to`, in `[-180, 180)` degrees.
fn shortest_bearing_delta(from: f64, to: f64) -> f64 {
    wrap_bearing(to - from + 180.0) - 180.0
}

impl CameraSurface for MemoryCamera {
    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities {
            parametric_motion: true,
            box_selection: true,
        }
    }

    fn set_bearing(&mut self, bearing_deg: f64) {
        self.pose.set_bearing(bearing_deg);
    }

    fn jump_to(&mut self, target: CameraMove) {
        self.apply(target);
    }

    fn ease_to(&mut self, ease: EaseTo) {
        self.begin_transition(ease.target, ease.duration_ms, ease.easing);
    }

    fn fly_to(&mut self, fly: FlyTo) {
        self.begin_transition(fly.target, fly.duration_ms, Easing::EaseInOutCubic);
    }

    fn stop_motion(&mut self) {
        self.transition = None;
    }
}
