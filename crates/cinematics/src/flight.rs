use camera::{CameraMove, CameraSurface, EaseTo};
use foundation::easing::Easing;
use foundation::geo::LngLat;
use rand::Rng;

use crate::config::FlightTuning;
use crate::session::{Animation, Tick};

/// Directional flight along a heading fixed at session start.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlightParameters {
    pub heading_degrees: f64,
    pub speed_degrees_per_frame: f64,
    pub cruise_zoom: f64,
    pub cruise_pitch: f64,
}

impl FlightParameters {
    pub fn with_heading(heading_degrees: f64, tuning: &FlightTuning) -> Self {
        Self {
            heading_degrees,
            speed_degrees_per_frame: tuning.speed_degrees_per_frame,
            cruise_zoom: tuning.cruise_zoom,
            cruise_pitch: tuning.cruise_pitch,
        }
    }

    /// Heading drawn uniformly from [0, 360): the "random flight" mode.
    pub fn random<R: Rng>(rng: &mut R, tuning: &FlightTuning) -> Self {
        Self::with_heading(rng.gen_range(0.0..360.0), tuning)
    }
}

/// Two motions run concurrently from the first frame: an eased transition
/// into cruise attitude (zoom/pitch/bearing, surface-driven), and the
/// per-frame forward translation below (instantaneous jumps on the center
/// only, so the two never fight over a field).
pub(crate) struct FlightAnimation {
    params: FlightParameters,
    guard_ms: f64,
    deceleration_ms: f64,
}

impl FlightAnimation {
    pub(crate) fn begin(
        params: FlightParameters,
        tuning: &FlightTuning,
        surface: &mut dyn CameraSurface,
    ) -> Self {
        surface.ease_to(EaseTo {
            target: CameraMove {
                zoom: Some(params.cruise_zoom),
                pitch: Some(params.cruise_pitch),
                bearing: Some(params.heading_degrees),
                center: None,
            },
            duration_ms: tuning.transition_ms,
            easing: Easing::EaseOutQuad,
        });
        Self {
            params,
            guard_ms: tuning.guard_ms,
            deceleration_ms: tuning.deceleration_ms,
        }
    }

    fn decelerate(&self, surface: &mut dyn CameraSurface) {
        let pose = surface.pose();
        surface.stop_motion();
        // Ease to rest at the current pose rather than freezing in place.
        surface.ease_to(EaseTo {
            target: CameraMove {
                center: Some(pose.center()),
                bearing: Some(pose.bearing),
                pitch: Some(pose.pitch),
                zoom: None,
            },
            duration_ms: self.deceleration_ms,
            easing: Easing::EaseOutQuad,
        });
    }
}

impl Animation for FlightAnimation {
    fn update(&mut self, _elapsed_ms: f64, surface: &mut dyn CameraSurface) -> Tick {
        let rad = self.params.heading_degrees.to_radians();
        let speed = self.params.speed_degrees_per_frame;
        let center = surface.center();
        surface.jump_to(CameraMove::center(LngLat::new(
            center.lng + speed * rad.sin(),
            center.lat + speed * rad.cos(),
        )));
        Tick::Continue
    }

    fn allows_stop(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.guard_ms
    }

    fn complete(&mut self, surface: &mut dyn CameraSurface) {
        self.decelerate(surface);
    }

    fn interrupt(&mut self, surface: &mut dyn CameraSurface) {
        self.decelerate(surface);
    }
}

#[cfg(test)]
mod tests {
    use camera::{CameraPose, CameraSurface, MemoryCamera};
    use foundation::geo::LngLat;
    use foundation::time::Time;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{FlightAnimation, FlightParameters};
    use crate::config::FlightTuning;
    use crate::session::Animation;

    fn camera() -> MemoryCamera {
        MemoryCamera::new(CameraPose::new(LngLat::new(151.0, -33.0), 10.0))
    }

    #[test]
    fn translation_is_deterministic_per_frame() {
        let tuning = FlightTuning::default();
        let mut cam = camera();
        let params = FlightParameters::with_heading(90.0, &tuning);
        let mut flight = FlightAnimation::begin(params, &tuning, &mut cam);

        for i in 0..10 {
            flight.update(i as f64 * 16.0, &mut cam);
        }

        // Heading 90° is due east: longitude only.
        assert!((cam.center().lng - (151.0 + 10.0 * 0.001)).abs() < 1e-12);
        assert!((cam.center().lat - -33.0).abs() < 1e-12);
    }

    #[test]
    fn translation_composes_with_the_cruise_transition() {
        let tuning = FlightTuning::default();
        let mut cam = camera();
        let params = FlightParameters::with_heading(0.0, &tuning);
        let mut flight = FlightAnimation::begin(params, &tuning, &mut cam);

        // Advance the eased attitude transition while translating north.
        for i in 1..=5 {
            cam.tick(Time(i as f64 * 100.0));
            flight.update(i as f64 * 100.0, &mut cam);
        }

        assert!((cam.center().lat - (-33.0 + 5.0 * 0.001)).abs() < 1e-12);
        assert!(cam.zoom() > 10.0, "cruise zoom transition is underway");
        assert!(cam.is_moving());
    }

    #[test]
    fn stop_is_refused_inside_the_guard_window() {
        let tuning = FlightTuning::default();
        let mut cam = camera();
        let params = FlightParameters::with_heading(45.0, &tuning);
        let flight = FlightAnimation::begin(params, &tuning, &mut cam);

        assert!(!flight.allows_stop(0.0));
        assert!(!flight.allows_stop(499.0));
        assert!(flight.allows_stop(500.0));
    }

    #[test]
    fn interrupt_replaces_cruise_ease_with_deceleration() {
        let tuning = FlightTuning::default();
        let mut cam = camera();
        let params = FlightParameters::with_heading(90.0, &tuning);
        let mut flight = FlightAnimation::begin(params, &tuning, &mut cam);

        cam.tick(Time(600.0));
        flight.update(600.0, &mut cam);
        flight.interrupt(&mut cam);

        // The deceleration ease is in flight and pinned to the current pose.
        assert!(cam.is_moving());
        let held = cam.pose();
        cam.tick(Time(600.0 + 2000.0));
        assert_eq!(cam.pose().center(), held.center());
    }

    #[test]
    fn random_heading_is_in_range() {
        let tuning = FlightTuning::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let params = FlightParameters::random(&mut rng, &tuning);
            assert!((0.0..360.0).contains(&params.heading_degrees));
        }
    }
}
